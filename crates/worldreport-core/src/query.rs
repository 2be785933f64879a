// crates/worldreport-core/src/query.rs

//! # Query Builder
//!
//! Pure projections from [`ViewState`] to request paths. Nothing here mutates
//! state. Parameters are only emitted when they differ from their defaults,
//! and values are percent-encoded (`São Paulo` -> `S%C3%A3o%20Paulo`).

use crate::registry::{ReportType, Scope};
use crate::state::ViewState;
use std::fmt;

/// A `GET /reports/{report}` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub report: ReportType,
    /// Ordered `(name, raw value)` pairs; encoding happens in [`ReportRequest::path`].
    pub params: Vec<(&'static str, String)>,
}

impl ReportRequest {
    /// Path plus query string. The `?` is always present, even with no
    /// parameters (`/reports/languages?`).
    pub fn path(&self) -> String {
        format!("/reports/{}?{}", self.report, encode_params(&self.params))
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for ReportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Request for the report currently described by `state`; `None` before a
/// report is selected.
pub fn report_request(state: &ViewState) -> Option<ReportRequest> {
    let report = state.report()?;
    let mut params = Vec::new();

    if state.scope() != Scope::Global {
        params.push(("scope", state.scope().param().to_string()));
    }
    if !state.scope_name().is_empty() {
        params.push(("name", state.scope_name().to_string()));
    }
    if report == ReportType::Cities && !state.district().is_empty() {
        params.push(("district", state.district().to_string()));
    }
    if let Some(limit) = state.top_n() {
        params.push(("limit", limit.to_string()));
    }

    Some(ReportRequest { report, params })
}

fn encode_params(params: &[(&'static str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

// -----------------------------------------------------------------------------
// LOOKUPS
// -----------------------------------------------------------------------------

/// Requests that populate the dependent dropdowns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupRequest {
    Continents,
    Regions,
    Countries,
    Districts { country: String },
}

impl LookupRequest {
    /// Scope-name lookup for `scope`; Global has none.
    pub fn for_scope(scope: Scope) -> Option<Self> {
        match scope {
            Scope::Global => None,
            Scope::Continent => Some(LookupRequest::Continents),
            Scope::Region => Some(LookupRequest::Regions),
            Scope::Country => Some(LookupRequest::Countries),
        }
    }

    /// District lookup; only meaningful once a country code is chosen.
    pub fn districts(country: &str) -> Option<Self> {
        let country = country.trim();
        (!country.is_empty()).then(|| LookupRequest::Districts {
            country: country.to_string(),
        })
    }

    pub fn path(&self) -> String {
        match self {
            LookupRequest::Continents => "/lookups/continents".to_string(),
            LookupRequest::Regions => "/lookups/regions".to_string(),
            LookupRequest::Countries => "/lookups/countries".to_string(),
            LookupRequest::Districts { country } => {
                format!("/lookups/districts?country={}", urlencoding::encode(country))
            }
        }
    }
}

impl fmt::Display for LookupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
