//! CSV export of the full aligned series.

use comparison_core::AlignedPair;

/// Render the complete aligned series as CSV, sorted by date ascending.
///
/// Export covers the whole overlap, not the row-limited table, and at
/// full precision. Canonical `YYYY-MM-DD` keys sort correctly as
/// strings.
pub fn to_csv(pairs: &[AlignedPair]) -> String {
    let mut sorted: Vec<&AlignedPair> = pairs.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let mut out = String::from("date,portfolio_return_pct,reference_return_pct,difference_pct\n");
    for pair in sorted {
        out.push_str(&format!(
            "{},{},{},{}\n",
            pair.date,
            pair.value_a,
            pair.value_b,
            pair.difference()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_only_for_empty_series() {
        let csv = to_csv(&[]);
        assert_eq!(
            csv,
            "date,portfolio_return_pct,reference_return_pct,difference_pct\n"
        );
    }

    #[test]
    fn rows_sorted_by_date() {
        let pairs = vec![
            AlignedPair {
                date: "2023-01-03".to_string(),
                value_a: 2.0,
                value_b: 1.0,
            },
            AlignedPair {
                date: "2023-01-02".to_string(),
                value_a: 1.0,
                value_b: 1.5,
            },
        ];
        let csv = to_csv(&pairs);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "2023-01-02,1,1.5,-0.5");
        assert_eq!(lines[2], "2023-01-03,2,1,1");
    }

    #[test]
    fn export_is_unbounded() {
        let pairs: Vec<AlignedPair> = (1..=40)
            .map(|i| AlignedPair {
                date: format!("2023-01-{:02}", i.min(31)),
                value_a: 0.0,
                value_b: 0.0,
            })
            .collect();
        let csv = to_csv(&pairs);
        // header + every pair, no truncation
        assert_eq!(csv.lines().count(), 41);
    }
}
