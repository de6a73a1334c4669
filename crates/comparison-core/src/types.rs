use serde::{Deserialize, Serialize};

/// One calendar day present, with valid values, in both compared series.
/// Values are daily returns in percent units (already scaled x100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    /// Canonical `YYYY-MM-DD` join key.
    pub date: String,
    pub value_a: f64,
    pub value_b: f64,
}

impl AlignedPair {
    pub fn difference(&self) -> f64 {
        self.value_a - self.value_b
    }
}

/// Summary statistics for one side's full (unjoined) return sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    /// Arithmetic mean daily return, percent.
    pub mean_return: f64,
    /// Population std-dev scaled by sqrt(trading days), percent.
    pub annualized_volatility: f64,
    pub observation_count: usize,
}

/// One row of the bounded comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    /// Short month+day label, e.g. "Jan 2".
    pub label: String,
    pub value_a: f64,
    pub value_b: f64,
    pub difference: f64,
}

/// Bounded tabular projection of the aligned series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffTable {
    pub rows: Vec<DisplayRow>,
    /// Pairs beyond the row limit, not shown.
    pub omitted_count: usize,
}

/// Why a raw point was filtered out before the join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropReason {
    UnparseableDate,
    NonFiniteValue,
}

/// Per-side count of silently filtered points, by reason.
///
/// Dirty upstream data degrades to a smaller result instead of aborting
/// the comparison; these counts keep the degradation observable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropCounts {
    pub unparseable_date: usize,
    pub non_finite_value: usize,
}

impl DropCounts {
    pub fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::UnparseableDate => self.unparseable_date += 1,
            DropReason::NonFiniteValue => self.non_finite_value += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.unparseable_date + self.non_finite_value
    }
}

/// Result of joining two raw series on canonical dates.
///
/// An empty pair list means "no overlapping dates" — a distinct,
/// user-facing condition, not a failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Alignment {
    pub pairs: Vec<AlignedPair>,
    pub dropped_a: DropCounts,
    pub dropped_b: DropCounts,
}

impl Alignment {
    pub fn has_overlap(&self) -> bool {
        !self.pairs.is_empty()
    }
}
