// crates/worldreport-core/src/registry.rs

//! # Column / Scope Registry
//!
//! Static tables keyed by [`ReportType`] (and, for `languages`, by [`Scope`])
//! describing which scopes a report accepts and which columns it displays.
//!
//! The column set never depends on row contents, so headers stay stable across
//! pages and across rows with missing fields.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// -----------------------------------------------------------------------------
// REPORT TYPES
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Countries,
    Cities,
    Capitals,
    Populations,
    Languages,
}

impl ReportType {
    pub const ALL: [ReportType; 5] = [
        ReportType::Countries,
        ReportType::Cities,
        ReportType::Capitals,
        ReportType::Populations,
        ReportType::Languages,
    ];

    /// Path segment used by the report service (`/reports/{as_str}`).
    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::Countries => "countries",
            ReportType::Cities => "cities",
            ReportType::Capitals => "capitals",
            ReportType::Populations => "populations",
            ReportType::Languages => "languages",
        }
    }

    /// Title-cased name, as shown in breadcrumbs.
    pub fn title(self) -> &'static str {
        match self {
            ReportType::Countries => "Countries",
            ReportType::Cities => "Cities",
            ReportType::Capitals => "Capitals",
            ReportType::Populations => "Populations",
            ReportType::Languages => "Languages",
        }
    }

    /// Valid scopes for this report. The first entry is always [`Scope::Global`].
    pub fn scopes(self) -> &'static [Scope] {
        match self {
            ReportType::Countries | ReportType::Capitals => &GLOBAL_CONTINENT_REGION[..],
            ReportType::Cities | ReportType::Populations | ReportType::Languages => &ALL_SCOPES[..],
        }
    }

    pub fn supports(self, scope: Scope) -> bool {
        self.scopes().contains(&scope)
    }

    /// Ordered column set for this report under `scope`.
    ///
    /// Only `languages` looks at the scope; every other report has a flat list.
    pub fn columns(self, scope: Scope) -> &'static [Column] {
        use Column::*;
        match self {
            ReportType::Countries => &[Code, Name, Capital, Continent, Population],
            ReportType::Cities => &[Name, Country, District, Population],
            ReportType::Capitals => &[Name, Country, Continent, Region, Population],
            ReportType::Populations => &[
                Name,
                TotalPopulation,
                LivingInCities,
                LivingInCitiesPct,
                NotLivingInCities,
                NotLivingInCitiesPct,
            ],
            ReportType::Languages => match scope {
                Scope::Global => &[Language, Speakers, PctOfGlobal],
                Scope::Continent => &[Language, Speakers, PctOfContinent, PctOfGlobal],
                Scope::Region => &[Language, Speakers, PctOfRegion, PctOfGlobal],
                Scope::Country => &[Language, Speakers, PctOfCountry, PctOfGlobal],
            },
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        ReportType::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ReportError::UnknownReport(s.to_string()))
    }
}

// -----------------------------------------------------------------------------
// SCOPES
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scope {
    #[default]
    Global,
    Continent,
    Region,
    Country,
}

const ALL_SCOPES: [Scope; 4] = [Scope::Global, Scope::Continent, Scope::Region, Scope::Country];
const GLOBAL_CONTINENT_REGION: [Scope; 3] = [Scope::Global, Scope::Continent, Scope::Region];
const GLOBAL_ONLY: [Scope; 1] = [Scope::Global];

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Global => "Global",
            Scope::Continent => "Continent",
            Scope::Region => "Region",
            Scope::Country => "Country",
        }
    }

    /// Lower-cased form sent as the `scope` query parameter.
    pub fn param(self) -> &'static str {
        match self {
            Scope::Global => "global",
            Scope::Continent => "continent",
            Scope::Region => "region",
            Scope::Country => "country",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        ALL_SCOPES
            .into_iter()
            .find(|sc| sc.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ReportError::UnknownScope(s.to_string()))
    }
}

// -----------------------------------------------------------------------------
// COLUMNS
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Column {
    Code,
    Name,
    Capital,
    Continent,
    Region,
    Country,
    District,
    Population,
    TotalPopulation,
    LivingInCities,
    LivingInCitiesPct,
    NotLivingInCities,
    NotLivingInCitiesPct,
    Language,
    Speakers,
    PctOfContinent,
    PctOfRegion,
    PctOfCountry,
    PctOfGlobal,
}

impl Column {
    /// Display header.
    pub fn label(self) -> &'static str {
        match self {
            Column::Code => "Code",
            Column::Name => "Name",
            Column::Capital => "Capital",
            Column::Continent => "Continent",
            Column::Region => "Region",
            Column::Country => "Country",
            Column::District => "District",
            Column::Population => "Population",
            Column::TotalPopulation => "Total Population",
            Column::LivingInCities => "Living in Cities",
            Column::LivingInCitiesPct => "Living in Cities (%)",
            Column::NotLivingInCities => "Not Living in Cities",
            Column::NotLivingInCitiesPct => "Not Living in Cities (%)",
            Column::Language => "Language",
            Column::Speakers => "Number of Speakers",
            Column::PctOfContinent => "% of Continent",
            Column::PctOfRegion => "% of Region",
            Column::PctOfCountry => "% of Country",
            Column::PctOfGlobal => "% of Global Population",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// -----------------------------------------------------------------------------
// STRING-KEYED LOOKUPS (fail safe)
// -----------------------------------------------------------------------------

/// Scopes for a report named by a raw string. Unknown names yield `[Global]`.
pub fn scopes_for_name(report: &str) -> &'static [Scope] {
    report
        .parse::<ReportType>()
        .map(ReportType::scopes)
        .unwrap_or(&GLOBAL_ONLY[..])
}

/// Columns for a report named by a raw string. Unknown names yield an empty
/// set, which callers treat as "no report selected".
pub fn columns_for_name(report: &str, scope: Scope) -> &'static [Column] {
    report
        .parse::<ReportType>()
        .map(|r| r.columns(scope))
        .unwrap_or(&[])
}
