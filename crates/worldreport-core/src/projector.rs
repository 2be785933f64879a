// crates/worldreport-core/src/projector.rs

//! # Row Projector
//!
//! Turns a raw [`Row`] into the value displayed under a given [`Column`].
//!
//! - `populations` derives both percentage columns from the raw totals.
//! - `languages` resolves alternate field names and trusts the service for
//!   the percentage columns, defaulting them to `0.00`.
//! - every other report is a straight case-insensitive field lookup.

use crate::format::{format_number, NumberStyle};
use crate::registry::{Column, ReportType};
use crate::response::Row;
use serde_json::Value;

/// A projected cell before display formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Display string: numbers grouped per `style`, text as-is, empty as `""`.
    pub fn display(&self, style: NumberStyle) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n, style),
        }
    }
}

impl From<&Value> for CellValue {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => CellValue::Empty,
            Value::Number(n) => n
                .as_f64()
                .map(CellValue::Number)
                .unwrap_or_else(|| CellValue::Text(n.to_string())),
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Bool(b) => CellValue::Text(b.to_string()),
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<Option<&Value>> for CellValue {
    fn from(v: Option<&Value>) -> Self {
        v.map(CellValue::from).unwrap_or(CellValue::Empty)
    }
}

const ZERO_PERCENT: &str = "0.00";

/// Derive the cell for (`report`, `column`) from `row`.
pub fn project(report: ReportType, column: Column, row: &Row) -> CellValue {
    match report {
        ReportType::Populations => project_population(column, row),
        ReportType::Languages => project_language(column, row),
        _ => project_plain(column, row),
    }
}

/// Display strings for every column of `row`.
pub fn project_row(
    report: ReportType,
    columns: &[Column],
    row: &Row,
    style: NumberStyle,
) -> Vec<String> {
    columns
        .iter()
        .map(|c| project(report, *c, row).display(style))
        .collect()
}

fn project_population(column: Column, row: &Row) -> CellValue {
    let total = row.number_or_zero("totalPopulation");
    let city = row.number_or_zero("cityPopulation");
    let non_city = row.number_or_zero("nonCityPopulation");

    match column {
        Column::Name => row
            .get("name")
            .or_else(|| row.get("label"))
            .or_else(|| row.get_exact(column.label()))
            .into(),
        Column::TotalPopulation => CellValue::Number(total),
        Column::LivingInCities => CellValue::Number(city),
        Column::LivingInCitiesPct => CellValue::Text(percentage(city, total)),
        Column::NotLivingInCities => CellValue::Number(non_city),
        Column::NotLivingInCitiesPct => CellValue::Text(percentage(non_city, total)),
        _ => project_plain(column, row),
    }
}

/// `round(100 * part / total, 2)` rendered with two decimals; `0.00` when
/// `total` is not positive.
pub fn percentage(part: f64, total: f64) -> String {
    if total > 0.0 {
        format!("{:.2}", part * 100.0 / total)
    } else {
        ZERO_PERCENT.to_string()
    }
}

fn project_language(column: Column, row: &Row) -> CellValue {
    let percent = |field: &str| -> CellValue {
        row.first_truthy(&[field])
            .map(CellValue::from)
            .unwrap_or_else(|| CellValue::Text(ZERO_PERCENT.to_string()))
    };

    match column {
        Column::Language => or_last(row, &["language", "name"]).into(),
        Column::Speakers => or_last(row, &["numberOfSpeakers", "speakers"]).into(),
        Column::PctOfGlobal => percent("percentOfGlobalPopulation"),
        Column::PctOfContinent => percent("percentOfContinentPopulation"),
        Column::PctOfRegion => percent("percentOfRegionPopulation"),
        Column::PctOfCountry => percent("percentOfCountryPopulation"),
        _ => project_plain(column, row),
    }
}

/// First truthy field among `names`, else whatever the last one holds
/// (so a falsy `0` still shows).
fn or_last<'r>(row: &'r Row, names: &[&str]) -> Option<&'r Value> {
    row.first_truthy(names)
        .or_else(|| names.last().and_then(|last| row.get(last)))
}

fn project_plain(column: Column, row: &Row) -> CellValue {
    let label = column.label();
    row.get(label).or_else(|| row.get_exact(label)).into()
}
