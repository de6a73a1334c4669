use serde_json::Value;

/// Field-access strategy for one raw data source.
///
/// Upstream producers disagree on field names (`Date` vs `date`,
/// `portfolio_return` vs `return`), so each source declares its
/// candidate keys once at the boundary instead of re-probing shapes
/// downstream. Keys are tried in order; first present wins.
#[derive(Debug, Clone)]
pub struct FieldMap {
    pub date_keys: Vec<&'static str>,
    pub value_keys: Vec<&'static str>,
}

impl FieldMap {
    /// Computed portfolio series: `{date, portfolio_return}` records,
    /// occasionally emitted with a capitalized date field.
    pub fn portfolio() -> Self {
        Self {
            date_keys: vec!["Date", "date"],
            value_keys: vec!["portfolio_return"],
        }
    }

    /// Single-ticker reference series: `{Date, return}` records.
    pub fn reference() -> Self {
        Self {
            date_keys: vec!["Date", "date"],
            value_keys: vec!["return"],
        }
    }

    /// Pull the raw date-like value out of a record, if any key is present.
    pub fn date_of<'a>(&self, point: &'a Value) -> Option<&'a Value> {
        self.date_keys
            .iter()
            .find_map(|k| point.get(k))
            .filter(|v| !v.is_null())
    }

    /// Pull the numeric value out of a record.
    ///
    /// Accepts JSON numbers and numeric strings. Absent, null, or
    /// non-numeric fields yield `None` — the caller decides whether to
    /// drop the point, never a silent zero.
    pub fn value_of(&self, point: &Value) -> Option<f64> {
        let raw = self.value_keys.iter().find_map(|k| point.get(k))?;
        match raw {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}
