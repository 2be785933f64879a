// crates/worldreport-core/src/response.rs

//! # Response Normalization
//!
//! The report service is not consistent about shapes: some endpoints return a
//! bare array of rows, others wrap it as `{ "data": [...], "globalPopulation": n }`,
//! and field names arrive as `camelCase`, `snake_case` or lower case.
//!
//! Everything is normalized here, immediately after deserialization, into
//! [`ReportPayload`] and [`Row`]. Nothing downstream re-guesses the shape.
//! Valid JSON of an unexpected shape is tolerated (it yields an empty or
//! partially empty dataset); only a body that is not JSON at all is an error.

use crate::error::Result;
use crate::text::field_key;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One raw record from the report service.
///
/// Keeps the fields exactly as received plus an index keyed by
/// [`field_key`] for case-insensitive access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Map<String, Value>,
    folded: HashMap<String, Value>,
}

impl Row {
    /// Non-object values become an empty row, so a stray scalar in the
    /// dataset renders as a blank line instead of failing the whole table.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::from_map(fields),
            _ => Self::default(),
        }
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        let folded = fields
            .iter()
            .map(|(k, v)| (field_key(k), v.clone()))
            .collect();
        Self { fields, folded }
    }

    /// Case-insensitive lookup. `null` counts as absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.folded.get(&field_key(name)).filter(|v| !v.is_null())
    }

    /// Exact-name lookup, used as the last fallback. `null` counts as absent.
    pub fn get_exact(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    /// First field among `names` whose value is truthy.
    pub fn first_truthy(&self, names: &[&str]) -> Option<&Value> {
        names
            .iter()
            .filter_map(|n| self.get(n))
            .find(|v| is_truthy(v))
    }

    /// Numeric view of a field; missing or non-numeric values are `0`.
    pub fn number_or_zero(&self, name: &str) -> f64 {
        self.get(name).and_then(as_number).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A normalized report response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPayload {
    pub rows: Vec<Row>,
    /// Global population context: top-level `globalPopulation`, or failing
    /// that the first row's `globalPopulation`. Zero is treated as absent.
    pub global_population: Option<f64>,
}

impl ReportPayload {
    pub fn parse(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Ok(Self::from_value(value))
    }

    pub fn from_value(value: Value) -> Self {
        let (rows, top_level_global) = match value {
            Value::Array(items) => (items, None),
            Value::Object(mut obj) => {
                let global = take_folded(&mut obj, "globalpopulation");
                match take_folded(&mut obj, "data") {
                    Some(Value::Array(items)) => (items, global),
                    _ => (Vec::new(), global),
                }
            }
            _ => (Vec::new(), None),
        };

        let rows: Vec<Row> = rows.into_iter().map(Row::from_value).collect();

        let global_population = top_level_global
            .as_ref()
            .and_then(as_number)
            .filter(|n| *n != 0.0)
            .or_else(|| {
                rows.first()
                    .and_then(|r| r.get("globalPopulation"))
                    .and_then(as_number)
                    .filter(|n| *n != 0.0)
            });

        Self {
            rows,
            global_population,
        }
    }
}

fn take_folded(obj: &mut Map<String, Value>, key: &str) -> Option<Value> {
    let actual = obj.keys().find(|k| field_key(k) == key)?.clone();
    obj.remove(&actual)
}

// -----------------------------------------------------------------------------
// VALUE HELPERS
// -----------------------------------------------------------------------------

/// Loose truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numeric coercion: numbers as-is, numeric strings parsed, everything else `None`.
pub fn as_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}
