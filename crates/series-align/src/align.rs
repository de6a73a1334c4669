//! Inner join of two daily return series on canonical dates.

use std::collections::{HashMap, HashSet};

use comparison_core::{AlignedPair, Alignment, DropCounts, DropReason, FieldMap};
use serde_json::Value;

use crate::normalize::canonical_date;

/// Join two raw record collections on matching calendar days.
///
/// Side B becomes a date -> value lookup (last write wins on duplicate
/// dates); side A is traversed in its given order and determines the
/// output order. A point survives only if its date normalizes and its
/// numeric value is finite — everything else is dropped and counted,
/// never raised. Values are emitted x100 (fractional return -> percent)
/// on both sides, so every downstream consumer sees one unit.
///
/// An empty result means no overlapping dates, which is a valid
/// outcome, not an error.
pub fn align(
    side_a: &[Value],
    side_b: &[Value],
    fields_a: &FieldMap,
    fields_b: &FieldMap,
) -> Alignment {
    let mut dropped_b = DropCounts::default();
    let mut lookup: HashMap<String, f64> = HashMap::with_capacity(side_b.len());
    for point in side_b {
        match validate(point, fields_b) {
            Ok((date, value)) => {
                lookup.insert(date, value);
            }
            Err(reason) => dropped_b.record(reason),
        }
    }

    let mut dropped_a = DropCounts::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut pairs = Vec::new();
    for point in side_a {
        let (date, value_a) = match validate(point, fields_a) {
            Ok(ok) => ok,
            Err(reason) => {
                dropped_a.record(reason);
                continue;
            }
        };
        // First occurrence wins on duplicate side-A dates
        if !seen.insert(date.clone()) {
            continue;
        }
        if let Some(&value_b) = lookup.get(&date) {
            pairs.push(AlignedPair {
                date,
                value_a: value_a * 100.0,
                value_b: value_b * 100.0,
            });
        }
    }

    if dropped_a.total() > 0 || dropped_b.total() > 0 {
        tracing::debug!(
            dropped_a = dropped_a.total(),
            dropped_b = dropped_b.total(),
            "filtered invalid points before join"
        );
    }
    if pairs.is_empty() {
        tracing::warn!("no overlapping dates between the two series");
    }

    Alignment {
        pairs,
        dropped_a,
        dropped_b,
    }
}

/// Normalize one point to `(canonical_date, finite_value)` or the
/// reason it must be dropped.
fn validate(point: &Value, fields: &FieldMap) -> Result<(String, f64), DropReason> {
    let date = fields
        .date_of(point)
        .and_then(canonical_date)
        .ok_or(DropReason::UnparseableDate)?;
    let value = fields
        .value_of(point)
        .filter(|v| v.is_finite())
        .ok_or(DropReason::NonFiniteValue)?;
    Ok((date, value))
}
