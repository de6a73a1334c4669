//! Bounded tabular projection of the aligned series.

use chrono::NaiveDate;
use comparison_core::{AlignedPair, DiffTable, DisplayRow};

/// Row bound of the on-screen comparison table.
pub const DEFAULT_ROW_LIMIT: usize = 15;

/// Project the first `row_limit` pairs into display rows.
///
/// Pairs are taken in their existing chronological order, never
/// re-sorted. The label is month+day only; comparisons live inside one
/// bounded range, so the year carries no information.
pub fn project(pairs: &[AlignedPair], row_limit: usize) -> DiffTable {
    let rows = pairs
        .iter()
        .take(row_limit)
        .map(|pair| DisplayRow {
            label: short_label(&pair.date),
            value_a: pair.value_a,
            value_b: pair.value_b,
            difference: pair.difference(),
        })
        .collect();

    DiffTable {
        rows,
        omitted_count: pairs.len().saturating_sub(row_limit),
    }
}

fn short_label(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%b %-d").to_string(),
        // Canonical dates always parse; keep the key rather than panic
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(n: usize) -> Vec<AlignedPair> {
        (0..n)
            .map(|i| AlignedPair {
                date: format!("2023-01-{:02}", i + 1),
                value_a: i as f64,
                value_b: i as f64 / 2.0,
            })
            .collect()
    }

    #[test]
    fn truncates_beyond_row_limit() {
        let table = project(&pairs(15), 10);
        assert_eq!(table.rows.len(), 10);
        assert_eq!(table.omitted_count, 5);
    }

    #[test]
    fn short_series_fits_entirely() {
        let table = project(&pairs(3), 10);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.omitted_count, 0);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = project(&[], DEFAULT_ROW_LIMIT);
        assert!(table.rows.is_empty());
        assert_eq!(table.omitted_count, 0);
    }

    #[test]
    fn difference_is_a_minus_b() {
        let table = project(
            &[AlignedPair {
                date: "2023-01-02".to_string(),
                value_a: 1.0,
                value_b: 1.5,
            }],
            10,
        );
        assert!((table.rows[0].difference - (-0.5)).abs() < 1e-12);
    }

    #[test]
    fn label_is_month_and_day() {
        let table = project(
            &[AlignedPair {
                date: "2023-01-02".to_string(),
                value_a: 0.0,
                value_b: 0.0,
            }],
            10,
        );
        assert_eq!(table.rows[0].label, "Jan 2");
    }

    #[test]
    fn keeps_existing_order() {
        let input = vec![
            AlignedPair {
                date: "2023-01-02".to_string(),
                value_a: 1.0,
                value_b: 0.0,
            },
            AlignedPair {
                date: "2023-01-03".to_string(),
                value_a: 2.0,
                value_b: 0.0,
            },
        ];
        let table = project(&input, 10);
        assert_eq!(table.rows[0].label, "Jan 2");
        assert_eq!(table.rows[1].label, "Jan 3");
    }
}
