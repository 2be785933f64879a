// crates/worldreport-core/src/state.rs

//! # View State
//!
//! The single mutable record behind a viewer session. Fields are private;
//! every mutation goes through one of the contract methods below, each of
//! which resets the page to 1 when it changes a filter.
//!
//! | method             | effect                                                     |
//! |--------------------|------------------------------------------------------------|
//! | [`select_report`]  | report set, all filters back to defaults                   |
//! | [`set_scope`]      | scope set, scope name cleared                              |
//! | [`apply_filters`]  | scope, name, district, Top-N and page size set at once     |
//! | [`set_page`]       | page set when in range, ignored otherwise                  |
//!
//! [`select_report`]: ViewState::select_report
//! [`set_scope`]: ViewState::set_scope
//! [`apply_filters`]: ViewState::apply_filters
//! [`set_page`]: ViewState::set_page

use crate::paginator;
use crate::registry::{Column, ReportType, Scope};
use crate::response::{ReportPayload, Row};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Client-side rows per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    /// Paging disabled: one page with every row (sentinel `-1`).
    All,
    /// Always > 0.
    Rows(usize),
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Rows(DEFAULT_PAGE_SIZE)
    }
}

impl PageSize {
    /// Any value below 1 disables paging.
    pub fn from_sentinel(n: i64) -> Self {
        match usize::try_from(n) {
            Ok(rows) if rows > 0 => PageSize::Rows(rows),
            _ => PageSize::All,
        }
    }

    /// Lenient parse: non-numeric input means "show all".
    pub fn parse(input: &str) -> Self {
        Self::from_sentinel(parse_sentinel(input))
    }

    pub fn as_sentinel(self) -> i64 {
        match self {
            PageSize::All => -1,
            PageSize::Rows(n) => i64::try_from(n).unwrap_or(i64::MAX),
        }
    }

    pub fn rows(self) -> Option<usize> {
        match self {
            PageSize::All => None,
            PageSize::Rows(n) => Some(n),
        }
    }
}

/// Lenient Top-N parse: `None` (unlimited) for `-1` and non-numeric input.
/// Any other integer, including `0`, is passed to the service as-is.
pub fn parse_top_n(input: &str) -> Option<i64> {
    match parse_sentinel(input) {
        -1 => None,
        n => Some(n),
    }
}

/// Parses a leading integer (`"25"`, `" 10 rows"`, `"-1"`), returning `-1`
/// when there is none.
pub fn parse_sentinel(input: &str) -> i64 {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    match digits[..end].parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => -1,
    }
}

/// The view state of one viewer session.
#[derive(Debug, Clone)]
pub struct ViewState {
    report: Option<ReportType>,
    scope: Scope,
    name: String,
    district: String,
    top_n: Option<i64>,
    page_size: PageSize,
    page: usize,
    data: Vec<Row>,
    global_population: Option<f64>,
    default_page_size: PageSize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::with_default_page_size(PageSize::default())
    }

    /// A session whose report selections start at `default_page_size`.
    pub fn with_default_page_size(default_page_size: PageSize) -> Self {
        Self {
            report: None,
            scope: Scope::Global,
            name: String::new(),
            district: String::new(),
            top_n: None,
            page_size: default_page_size,
            page: 1,
            data: Vec::new(),
            global_population: None,
            default_page_size,
        }
    }

    // -----------------------------------------------------------------------
    // READ ACCESS
    // -----------------------------------------------------------------------

    pub fn report(&self) -> Option<ReportType> {
        self.report
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn scope_name(&self) -> &str {
        &self.name
    }

    pub fn district(&self) -> &str {
        &self.district
    }

    pub fn top_n(&self) -> Option<i64> {
        self.top_n
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn data(&self) -> &[Row] {
        &self.data
    }

    pub fn global_population(&self) -> Option<f64> {
        self.global_population
    }

    /// Column set for the active (report, scope); empty before a report is chosen.
    pub fn columns(&self) -> &'static [Column] {
        self.report.map(|r| r.columns(self.scope)).unwrap_or(&[])
    }

    /// Scopes offered for the active report; `[Global]` before a report is chosen.
    pub fn scopes(&self) -> &'static [Scope] {
        match self.report {
            Some(r) => r.scopes(),
            None => &[Scope::Global],
        }
    }

    pub fn total_pages(&self) -> usize {
        paginator::total_pages(self.data.len(), self.page_size)
    }

    /// District filter applies to the cities report under the Country scope only.
    pub fn district_applicable(&self) -> bool {
        district_applicable(self.report, self.scope)
    }

    // -----------------------------------------------------------------------
    // MUTATION CONTRACT
    // -----------------------------------------------------------------------

    /// Activates `report` and resets every filter to its default.
    pub fn select_report(&mut self, report: ReportType) {
        self.report = Some(report);
        self.scope = Scope::Global;
        self.name.clear();
        self.district.clear();
        self.top_n = None;
        self.page_size = self.default_page_size;
        self.page = 1;
    }

    /// Changes scope and clears the scope name. Scopes the active report does
    /// not offer are ignored and `false` is returned.
    pub fn set_scope(&mut self, scope: Scope) -> bool {
        if !self.scopes().contains(&scope) {
            return false;
        }
        self.scope = scope;
        self.name.clear();
        if !self.district_applicable() {
            self.district.clear();
        }
        self.page = 1;
        true
    }

    /// Sets scope, scope name, district, Top-N and page size together.
    ///
    /// `top_n` and `page_size` are parsed leniently: non-numeric input means
    /// "unlimited" / "show all". A Top-N of `-1` is unlimited; a page size
    /// below 1 shows all rows. A scope the report
    /// does not offer falls back to Global. The district is kept only where it
    /// applies.
    pub fn apply_filters(
        &mut self,
        scope: Scope,
        name: &str,
        district: &str,
        top_n: &str,
        page_size: &str,
    ) {
        self.scope = if self.scopes().contains(&scope) {
            scope
        } else {
            Scope::Global
        };
        self.name = if self.scope == Scope::Global {
            String::new()
        } else {
            name.trim().to_string()
        };
        self.district = if self.district_applicable() {
            district.trim().to_string()
        } else {
            String::new()
        };
        self.top_n = parse_top_n(top_n);
        self.page_size = PageSize::parse(page_size);
        self.page = 1;
    }

    /// Moves to page `n`. Ignored (returns `false`) when paging is disabled or
    /// `n` is outside `[1, total_pages]`.
    pub fn set_page(&mut self, n: usize) -> bool {
        if self.page_size == PageSize::All || n < 1 || n > self.total_pages() {
            return false;
        }
        self.page = n;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        match self.page.checked_sub(1) {
            Some(n) => self.set_page(n),
            None => false,
        }
    }

    /// Jump-to-page from free-text input; anything but an in-range integer is ignored.
    pub fn jump_to_page(&mut self, input: &str) -> bool {
        match input.trim().parse::<usize>() {
            Ok(n) => self.set_page(n),
            Err(_) => false,
        }
    }

    /// Replaces the dataset wholesale with a freshly fetched payload and pulls
    /// the page back into range.
    pub(crate) fn replace_dataset(&mut self, payload: ReportPayload) {
        self.data = payload.rows;
        self.global_population = payload.global_population;
        self.page = self.page.clamp(1, self.total_pages());
    }
}

pub(crate) fn district_applicable(report: Option<ReportType>, scope: Scope) -> bool {
    report == Some(ReportType::Cities) && scope == Scope::Country
}
