// crates/worldreport-core/src/viewer.rs

//! # Fetch / Render Orchestrator
//!
//! [`Viewer`] owns the [`ViewState`] of one session and is the only place it
//! is mutated from. It turns user actions into state changes, tells the
//! front-end what those actions trigger ([`Triggers`]), and applies service
//! responses.
//!
//! Requests are split into `begin_*` / `complete_*` halves so the same engine
//! serves a blocking driver (the CLI, via [`ReportService`]) and an async one
//! (the browser, via `fetch()`). Every request carries a monotonically
//! increasing token; a response is applied only if its token is the latest
//! issued for that kind of request, so a slow stale response can never
//! overwrite a newer one.
//!
//! ```text
//! Idle ──begin_fetch──▶ Loading ──ok──▶ Rendered
//!                          │
//!                          └──err──▶ Failed  (dataset kept)
//! ```

use crate::config::ViewerConfig;
use crate::error::{ErrorKind, ReportError, Result};
use crate::lookup::{self, LookupOptions, ALL_DISTRICTS_PLACEHOLDER, ALL_PLACEHOLDER};
use crate::query::{self, LookupRequest, ReportRequest};
use crate::registry::{ReportType, Scope};
use crate::render::{self, RenderedTable};
use crate::response::ReportPayload;
use crate::service::ReportService;
use crate::state::ViewState;
use serde::Serialize;
use tracing::{debug, info, warn};

pub const STATUS_LOADING: &str = "Loading…";
pub const STATUS_ERROR: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Loading,
    Rendered,
    Failed,
}

/// Follow-up work a state change asks the front-end to perform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Triggers {
    pub fetch_report: bool,
    pub refresh_scope_names: bool,
    pub refresh_districts: bool,
}

impl Triggers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// An issued report request awaiting its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub token: u64,
    pub request: ReportRequest,
}

/// An issued lookup request awaiting its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    pub token: u64,
    pub request: LookupRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FetchOutcome {
    /// Dataset replaced.
    Applied { rows: usize },
    /// Failure surfaced in the table area; previous dataset kept.
    Failed { kind: ErrorKind },
    /// A newer request was issued meanwhile; response discarded.
    Stale,
    /// No report selected, nothing requested.
    Skipped,
}

#[derive(Debug, Default)]
struct Tokens {
    issued: u64,
    report: u64,
    scope_lookup: u64,
    district_lookup: u64,
}

impl Tokens {
    fn next(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }
}

/// One viewer session: view state, fetch lifecycle and dropdown contents.
#[derive(Debug)]
pub struct Viewer {
    state: ViewState,
    config: ViewerConfig,
    phase: Phase,
    status: String,
    error: Option<String>,
    scope_names: LookupOptions,
    districts: LookupOptions,
    tokens: Tokens,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            state: ViewState::with_default_page_size(config.page_size()),
            config,
            phase: Phase::Idle,
            status: String::new(),
            error: None,
            scope_names: LookupOptions::scope_placeholder(),
            districts: LookupOptions::district_placeholder(),
            tokens: Tokens::default(),
        }
    }

    /// Like [`Viewer::new`] but refuses an invalid configuration.
    pub fn try_new(config: ViewerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    // -----------------------------------------------------------------------
    // READ ACCESS
    // -----------------------------------------------------------------------

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Status line text (`Loading…`, `Loaded 25 rows`, `Error`).
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Message of the last failed report fetch, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn scope_names(&self) -> &LookupOptions {
        &self.scope_names
    }

    pub fn districts(&self) -> &LookupOptions {
        &self.districts
    }

    /// Whether the district selector is shown.
    pub fn district_visible(&self) -> bool {
        self.state.district_applicable()
    }

    pub fn breadcrumbs(&self) -> String {
        render::breadcrumbs(&self.state)
    }

    /// Redraws from current state. A failed last fetch shows its error in
    /// place of the table.
    pub fn render(&self) -> RenderedTable {
        match (&self.phase, &self.error) {
            (Phase::Failed, Some(msg)) => {
                render::render_error(&self.state, msg, self.config.number_style)
            }
            _ => render::render(&self.state, self.config.number_style),
        }
    }

    // -----------------------------------------------------------------------
    // USER ACTIONS
    // -----------------------------------------------------------------------

    /// Menu pick: resets filters, then the scope names and the report need loading.
    pub fn select_report(&mut self, report: ReportType) -> Triggers {
        debug!(%report, "report selected");
        self.state.select_report(report);
        self.reset_lookups();
        Triggers {
            fetch_report: true,
            refresh_scope_names: true,
            refresh_districts: self.state.district_applicable(),
        }
    }

    /// Like [`Viewer::select_report`] for a raw report name.
    pub fn select_report_named(&mut self, name: &str) -> Result<Triggers> {
        let report = name.parse::<ReportType>()?;
        Ok(self.select_report(report))
    }

    /// Scope dropdown change. Does not fetch the report.
    pub fn set_scope(&mut self, scope: Scope) -> Triggers {
        if !self.state.set_scope(scope) {
            debug!(%scope, "scope not offered by active report, ignored");
            return Triggers::none();
        }
        self.reset_lookups();
        Triggers {
            fetch_report: false,
            refresh_scope_names: true,
            refresh_districts: self.state.district_applicable(),
        }
    }

    /// Apply button. Non-numeric Top-N / page size mean "unlimited" / "all".
    pub fn apply_filters(
        &mut self,
        scope: Scope,
        name: &str,
        district: &str,
        top_n: &str,
        page_size: &str,
    ) -> Triggers {
        self.state
            .apply_filters(scope, name, district, top_n, page_size);
        debug!(
            scope = %self.state.scope(),
            name = self.state.scope_name(),
            district = self.state.district(),
            "filters applied"
        );
        Triggers {
            fetch_report: self.state.report().is_some(),
            ..Triggers::none()
        }
    }

    pub fn set_page(&mut self, n: usize) -> bool {
        let moved = self.state.set_page(n);
        self.navigated(moved)
    }

    pub fn next_page(&mut self) -> bool {
        let moved = self.state.next_page();
        self.navigated(moved)
    }

    pub fn prev_page(&mut self) -> bool {
        let moved = self.state.prev_page();
        self.navigated(moved)
    }

    pub fn jump_to_page(&mut self, input: &str) -> bool {
        let moved = self.state.jump_to_page(input);
        self.navigated(moved)
    }

    /// Paging away from a failed fetch redraws the rows still held.
    fn navigated(&mut self, moved: bool) -> bool {
        if moved && self.phase == Phase::Failed {
            self.phase = Phase::Rendered;
        }
        moved
    }

    /// Both dropdowns back to their placeholder; in-flight lookups become stale.
    fn reset_lookups(&mut self) {
        self.scope_names = LookupOptions::scope_placeholder();
        self.districts = LookupOptions::district_placeholder();
        self.tokens.scope_lookup = self.tokens.next();
        self.tokens.district_lookup = self.tokens.next();
    }

    // -----------------------------------------------------------------------
    // REPORT FETCH
    // -----------------------------------------------------------------------

    /// Issue a report request for the current state. Enters `Loading`.
    pub fn begin_fetch(&mut self) -> Option<PendingFetch> {
        let request = query::report_request(&self.state)?;
        let token = self.tokens.next();
        self.tokens.report = token;
        self.phase = Phase::Loading;
        self.status = STATUS_LOADING.to_string();
        debug!(token, path = %request, "report request issued");
        Some(PendingFetch { token, request })
    }

    /// Apply the response for `token`. Responses for superseded tokens are
    /// discarded without touching state.
    pub fn complete_fetch(&mut self, token: u64, response: Result<String>) -> FetchOutcome {
        if token != self.tokens.report {
            warn!(token, latest = self.tokens.report, "discarding stale report response");
            return FetchOutcome::Stale;
        }

        match response.and_then(|body| ReportPayload::parse(&body)) {
            Ok(payload) => {
                let rows = payload.rows.len();
                self.state.replace_dataset(payload);
                self.phase = Phase::Rendered;
                self.status = format!("Loaded {rows} rows");
                self.error = None;
                info!(token, rows, "report dataset replaced");
                FetchOutcome::Applied { rows }
            }
            Err(err) => self.fail_fetch(token, err),
        }
    }

    fn fail_fetch(&mut self, token: u64, err: ReportError) -> FetchOutcome {
        warn!(token, error = %err, "report fetch failed");
        let kind = err.kind();
        self.phase = Phase::Failed;
        self.status = STATUS_ERROR.to_string();
        self.error = Some(err.to_string());
        FetchOutcome::Failed { kind }
    }

    /// Blocking fetch through `service`.
    pub fn fetch_and_render<S: ReportService>(&mut self, service: &S) -> FetchOutcome {
        let Some(pending) = self.begin_fetch() else {
            return FetchOutcome::Skipped;
        };
        let response = service.get(&pending.request.path());
        self.complete_fetch(pending.token, response)
    }

    // -----------------------------------------------------------------------
    // DEPENDENT DROPDOWNS
    // -----------------------------------------------------------------------

    /// Issue the scope-name lookup. Global needs no request: the dropdown is
    /// just `(All)` and `None` is returned.
    pub fn begin_scope_lookup(&mut self) -> Option<PendingLookup> {
        self.scope_names = LookupOptions::scope_placeholder();
        let token = self.tokens.next();
        self.tokens.scope_lookup = token;
        let request = LookupRequest::for_scope(self.state.scope())?;
        debug!(token, path = %request, "scope lookup issued");
        Some(PendingLookup { token, request })
    }

    /// Apply a scope-name lookup response. Failures are logged and leave only
    /// the placeholder; they never affect the report.
    pub fn complete_scope_lookup(&mut self, token: u64, response: Result<String>) -> bool {
        if token != self.tokens.scope_lookup {
            debug!(token, "discarding stale scope lookup");
            return false;
        }
        self.scope_names = lookup_options(ALL_PLACEHOLDER, response, "scope");
        true
    }

    /// Issue the district lookup for `country`. The `(All districts)`
    /// placeholder is installed first; no request is made unless the district
    /// filter applies and a country is chosen.
    pub fn begin_district_lookup(&mut self, country: &str) -> Option<PendingLookup> {
        self.districts = LookupOptions::district_placeholder();
        let token = self.tokens.next();
        self.tokens.district_lookup = token;
        if !self.state.district_applicable() {
            return None;
        }
        let request = LookupRequest::districts(country)?;
        debug!(token, path = %request, "district lookup issued");
        Some(PendingLookup { token, request })
    }

    pub fn complete_district_lookup(&mut self, token: u64, response: Result<String>) -> bool {
        if token != self.tokens.district_lookup {
            debug!(token, "discarding stale district lookup");
            return false;
        }
        self.districts = lookup_options(ALL_DISTRICTS_PLACEHOLDER, response, "district");
        true
    }

    /// Blocking scope-name refresh.
    pub fn load_scope_names<S: ReportService>(&mut self, service: &S) -> &LookupOptions {
        if let Some(p) = self.begin_scope_lookup() {
            let response = service.get(&p.request.path());
            self.complete_scope_lookup(p.token, response);
        }
        &self.scope_names
    }

    /// Blocking district refresh for `country`.
    pub fn load_districts<S: ReportService>(&mut self, service: &S, country: &str) -> &LookupOptions {
        if let Some(p) = self.begin_district_lookup(country) {
            let response = service.get(&p.request.path());
            self.complete_district_lookup(p.token, response);
        }
        &self.districts
    }

    /// Perform everything `triggers` asks for, blocking on `service`.
    ///
    /// Lookups run first; their failures never prevent the report fetch.
    pub fn run_triggers<S: ReportService>(&mut self, service: &S, triggers: Triggers) -> FetchOutcome {
        if triggers.refresh_scope_names {
            self.load_scope_names(service);
        }
        if triggers.refresh_districts {
            let country = self.state.scope_name().to_string();
            self.load_districts(service, &country);
        }
        if triggers.fetch_report {
            self.fetch_and_render(service)
        } else {
            FetchOutcome::Skipped
        }
    }
}

fn lookup_options(placeholder: &str, response: Result<String>, what: &str) -> LookupOptions {
    match response.and_then(|body| lookup::parse_options(&body)) {
        Ok(fetched) => LookupOptions::with_placeholder(placeholder, fetched),
        Err(err) => {
            warn!(lookup = what, error = %err, "lookup failed");
            LookupOptions::with_placeholder(placeholder, Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: &str) -> Result<String> {
        Ok(body.to_string())
    }

    #[test]
    fn fetch_lifecycle() {
        let mut v = Viewer::default();
        assert_eq!(v.phase(), Phase::Idle);
        assert!(v.begin_fetch().is_none());

        v.select_report(ReportType::Countries);
        let p = v.begin_fetch().unwrap();
        assert_eq!(v.phase(), Phase::Loading);
        assert_eq!(v.status(), STATUS_LOADING);
        assert_eq!(p.request.path(), "/reports/countries?");

        let out = v.complete_fetch(p.token, ok(r#"[{"code":"ABW"},{"code":"AFG"}]"#));
        assert_eq!(out, FetchOutcome::Applied { rows: 2 });
        assert_eq!(v.phase(), Phase::Rendered);
        assert_eq!(v.status(), "Loaded 2 rows");
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut v = Viewer::default();
        v.select_report(ReportType::Cities);
        let first = v.begin_fetch().unwrap();
        let second = v.begin_fetch().unwrap();
        assert!(second.token > first.token);

        assert_eq!(
            v.complete_fetch(second.token, ok(r#"[{"name":"new"}]"#)),
            FetchOutcome::Applied { rows: 1 }
        );
        assert_eq!(
            v.complete_fetch(first.token, ok(r#"[{"name":"old"},{"name":"older"}]"#)),
            FetchOutcome::Stale
        );
        assert_eq!(v.state().data().len(), 1);
    }

    #[test]
    fn failure_keeps_previous_dataset() {
        let mut v = Viewer::default();
        v.select_report(ReportType::Cities);
        let p = v.begin_fetch().unwrap();
        v.complete_fetch(p.token, ok(r#"[{"name":"Tokyo"}]"#));

        let p = v.begin_fetch().unwrap();
        let out = v.complete_fetch(p.token, Err(ReportError::Http { status: 500 }));
        assert_eq!(out, FetchOutcome::Failed { kind: ErrorKind::HttpError });
        assert_eq!(v.phase(), Phase::Failed);
        assert_eq!(v.status(), STATUS_ERROR);
        assert_eq!(v.state().data().len(), 1);
        assert_eq!(v.render().to_html(), "<p>Error: HTTP 500</p>");
    }

    #[test]
    fn undecodable_body_is_a_failure() {
        let mut v = Viewer::default();
        v.select_report(ReportType::Cities);
        let p = v.begin_fetch().unwrap();
        let out = v.complete_fetch(p.token, ok("<html>gateway timeout</html>"));
        assert_eq!(out, FetchOutcome::Failed { kind: ErrorKind::MalformedResponse });
    }

    #[test]
    fn global_scope_lookup_needs_no_request() {
        let mut v = Viewer::default();
        let t = v.select_report(ReportType::Languages);
        assert!(t.fetch_report && t.refresh_scope_names && !t.refresh_districts);
        assert!(v.begin_scope_lookup().is_none());
        assert_eq!(v.scope_names().options().len(), 1);
        assert_eq!(v.scope_names().options()[0].label, ALL_PLACEHOLDER);
    }

    #[test]
    fn scope_change_does_not_fetch() {
        let mut v = Viewer::default();
        v.select_report(ReportType::Cities);
        let t = v.set_scope(Scope::Country);
        assert!(!t.fetch_report);
        assert!(t.refresh_scope_names);
        assert!(t.refresh_districts);
        assert!(v.district_visible());

        let p = v.begin_scope_lookup().unwrap();
        assert_eq!(p.request, LookupRequest::Countries);
        assert!(v.complete_scope_lookup(p.token, ok(r#"[{"code":"BRA","name":"Brazil"}]"#)));
        assert_eq!(v.scope_names().fetched_len(), 1);
    }

    #[test]
    fn rejected_scope_triggers_nothing() {
        let mut v = Viewer::default();
        v.select_report(ReportType::Capitals);
        assert!(v.set_scope(Scope::Country).is_empty());
    }

    #[test]
    fn lookup_failure_degrades_to_placeholder() {
        let mut v = Viewer::default();
        v.select_report(ReportType::Countries);
        v.set_scope(Scope::Continent);
        let p = v.begin_scope_lookup().unwrap();
        assert!(v.complete_scope_lookup(p.token, Err(ReportError::Network("offline".into()))));
        assert_eq!(v.scope_names().options().len(), 1);
        assert_eq!(v.phase(), Phase::Idle);
    }

    #[test]
    fn district_lookup_needs_country() {
        let mut v = Viewer::default();
        v.select_report(ReportType::Cities);
        v.set_scope(Scope::Country);
        assert!(v.begin_district_lookup("").is_none());
        assert_eq!(v.districts().options()[0].label, ALL_DISTRICTS_PLACEHOLDER);

        let p = v.begin_district_lookup("BRA").unwrap();
        assert_eq!(p.request.path(), "/lookups/districts?country=BRA");
        v.complete_district_lookup(p.token, ok(r#"[{"value":"São Paulo"}]"#));
        assert_eq!(v.districts().fetched_len(), 1);

        v.select_report(ReportType::Languages);
        v.set_scope(Scope::Country);
        assert!(v.begin_district_lookup("BRA").is_none());
    }

    #[test]
    fn scope_lookup_outlived_by_scope_change_is_stale() {
        let mut v = Viewer::default();
        v.select_report(ReportType::Countries);
        v.set_scope(Scope::Continent);
        let p = v.begin_scope_lookup().unwrap();

        v.set_scope(Scope::Global);
        assert!(v.begin_scope_lookup().is_none());
        assert!(!v.complete_scope_lookup(p.token, ok(r#"["Asia","Europe"]"#)));
        assert_eq!(v.scope_names().options().len(), 1);

        v.set_scope(Scope::Continent);
        let p = v.begin_scope_lookup().unwrap();
        v.select_report(ReportType::Cities);
        assert!(!v.complete_scope_lookup(p.token, ok(r#"["Asia"]"#)));
        assert_eq!(v.scope_names().fetched_len(), 0);
    }

    #[test]
    fn district_lookup_outlived_by_scope_change_is_stale() {
        let mut v = Viewer::default();
        v.select_report(ReportType::Cities);
        v.set_scope(Scope::Country);
        let p = v.begin_district_lookup("BRA").unwrap();

        v.set_scope(Scope::Continent);
        assert!(!v.district_visible());
        assert!(!v.complete_district_lookup(p.token, ok(r#"["Bahia"]"#)));
        assert_eq!(v.districts().options().len(), 1);

        v.set_scope(Scope::Country);
        let p = v.begin_district_lookup("BRA").unwrap();
        assert!(v.begin_district_lookup("").is_none());
        assert!(!v.complete_district_lookup(p.token, ok(r#"["Bahia"]"#)));
        assert_eq!(v.districts().options()[0].label, ALL_DISTRICTS_PLACEHOLDER);
        assert_eq!(v.districts().fetched_len(), 0);
    }

    #[test]
    fn paging_after_failure_redraws_kept_rows() {
        let mut v = Viewer::default();
        v.select_report(ReportType::Cities);
        v.apply_filters(Scope::Global, "", "", "", "1");
        let p = v.begin_fetch().unwrap();
        v.complete_fetch(p.token, ok(r#"[{"name":"Tokyo"},{"name":"Delhi"}]"#));

        let p = v.begin_fetch().unwrap();
        v.complete_fetch(p.token, Err(ReportError::Http { status: 502 }));
        assert_eq!(v.render().to_html(), "<p>Error: HTTP 502</p>");

        assert!(!v.prev_page());
        assert_eq!(v.phase(), Phase::Failed);
        assert!(v.next_page());
        assert_eq!(v.phase(), Phase::Rendered);
        let html = v.render().to_html();
        assert!(html.contains("Delhi"));
        assert!(!html.contains("Error"));
        assert_eq!(v.last_error(), Some("HTTP 502"));
    }

    #[test]
    fn invalid_config_is_refused() {
        let cfg = ViewerConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(Viewer::try_new(cfg).is_err());
    }
}
