// crates/worldreport-core/src/lookup.rs

//! Dropdown options for the scope-name and district selectors.
//!
//! The lookup endpoints answer with arrays of plain values, `{code, name}`
//! objects (countries: the code is submitted, the name is shown) or
//! `{value}` objects. All three collapse into [`LookupOption`].

use crate::error::Result;
use crate::text::contains_folded;
use serde::Serialize;
use serde_json::Value;

pub const ALL_PLACEHOLDER: &str = "(All)";
pub const ALL_DISTRICTS_PLACEHOLDER: &str = "(All districts)";

/// A single selectable option: `value` is submitted, `label` is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupOption {
    pub value: String,
    pub label: String,
}

impl LookupOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Options with an empty value stand for "no filter".
    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }

    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::String(s) => Some(Self::new(s.as_str(), s.as_str())),
            Value::Number(n) => Some(Self::new(n.to_string(), n.to_string())),
            Value::Object(obj) => {
                let text = |key: &str| {
                    obj.get(key)
                        .and_then(scalar_text)
                        .filter(|s| !s.is_empty())
                };
                match (text("code"), text("name")) {
                    (Some(code), Some(name)) => Some(Self::new(code, name)),
                    _ => text("value").map(|v| Self::new(v.clone(), v)),
                }
            }
            _ => None,
        }
    }
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a lookup response body. Entries of unknown shape are skipped; a
/// body that is not a JSON array yields no options.
pub fn parse_options(body: &str) -> Result<Vec<LookupOption>> {
    let value: Value = serde_json::from_str(body)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(LookupOption::from_value).collect(),
        _ => Vec::new(),
    })
}

/// The contents of one dropdown: a leading placeholder plus fetched options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupOptions {
    options: Vec<LookupOption>,
}

impl LookupOptions {
    /// Just the `(All)` placeholder.
    pub fn scope_placeholder() -> Self {
        Self::with_placeholder(ALL_PLACEHOLDER, Vec::new())
    }

    /// Just the `(All districts)` placeholder.
    pub fn district_placeholder() -> Self {
        Self::with_placeholder(ALL_DISTRICTS_PLACEHOLDER, Vec::new())
    }

    pub fn with_placeholder(placeholder: &str, fetched: Vec<LookupOption>) -> Self {
        let mut options = Vec::with_capacity(fetched.len() + 1);
        options.push(LookupOption::new("", placeholder));
        options.extend(fetched);
        Self { options }
    }

    pub fn options(&self) -> &[LookupOption] {
        &self.options
    }

    /// Number of real (non-placeholder) options.
    pub fn fetched_len(&self) -> usize {
        self.options.iter().filter(|o| !o.is_placeholder()).count()
    }

    /// Option whose submitted value is `value`.
    pub fn find(&self, value: &str) -> Option<&LookupOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Narrow to options whose label contains `query`, ignoring case and
    /// accents. Placeholders always survive.
    pub fn filter(&self, query: &str) -> Self {
        let options = self
            .options
            .iter()
            .filter(|o| o.is_placeholder() || contains_folded(&o.label, query))
            .cloned()
            .collect();
        Self { options }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_values_are_value_and_label() {
        let opts = parse_options(r#"["Asia", "Europe"]"#).unwrap();
        assert_eq!(opts, vec![LookupOption::new("Asia", "Asia"), LookupOption::new("Europe", "Europe")]);
    }

    #[test]
    fn country_objects_submit_code_show_name() {
        let opts = parse_options(r#"[{"code":"BRA","name":"Brazil"}]"#).unwrap();
        assert_eq!(opts[0].value, "BRA");
        assert_eq!(opts[0].label, "Brazil");
    }

    #[test]
    fn value_objects_use_value() {
        let opts = parse_options(r#"[{"type":"District","value":"São Paulo"}, {"type":"District"}, null]"#)
            .unwrap();
        assert_eq!(opts, vec![LookupOption::new("São Paulo", "São Paulo")]);
    }

    #[test]
    fn non_array_body_has_no_options() {
        assert!(parse_options(r#"{"error":"Missing country parameter"}"#).unwrap().is_empty());
        assert!(parse_options("not json").is_err());
    }

    #[test]
    fn placeholder_leads_and_survives_filtering() {
        let opts = LookupOptions::with_placeholder(
            ALL_DISTRICTS_PLACEHOLDER,
            vec![
                LookupOption::new("São Paulo", "São Paulo"),
                LookupOption::new("Bahia", "Bahia"),
            ],
        );
        assert_eq!(opts.options()[0].label, ALL_DISTRICTS_PLACEHOLDER);
        assert_eq!(opts.fetched_len(), 2);

        let narrowed = opts.filter("sao");
        assert_eq!(narrowed.options().len(), 2);
        assert!(narrowed.options()[0].is_placeholder());
        assert_eq!(narrowed.options()[1].value, "São Paulo");
        assert!(narrowed.find("Bahia").is_none());
    }
}
