// crates/worldreport-core/tests/viewer_flow.rs

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::json;
use worldreport_core::prelude::*;
use worldreport_core::TableBody;

/// In-memory report service. Unknown paths answer `404`.
#[derive(Default)]
struct FakeService {
    routes: HashMap<String, Result<String>>,
    calls: RefCell<Vec<String>>,
}

impl FakeService {
    fn route(mut self, path: &str, body: serde_json::Value) -> Self {
        self.routes.insert(path.to_string(), Ok(body.to_string()));
        self
    }

    fn fail(mut self, path: &str, err: ReportError) -> Self {
        self.routes.insert(path.to_string(), Err(err));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ReportService for FakeService {
    fn get(&self, path: &str) -> Result<String> {
        self.calls.borrow_mut().push(path.to_string());
        match self.routes.get(path) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(ReportError::Http { status })) => Err(ReportError::Http { status: *status }),
            Some(Err(e)) => Err(ReportError::Network(e.to_string())),
            None => Err(ReportError::Http { status: 404 }),
        }
    }
}

fn headers(table: &RenderedTable) -> Vec<String> {
    match &table.body {
        TableBody::Rows { headers, .. } => headers.clone(),
        other => panic!("expected rows, got {other:?}"),
    }
}

fn cities(n: usize) -> serde_json::Value {
    (0..n)
        .map(|i| json!({"name": format!("City {i}"), "country": "Brazil", "district": "São Paulo", "population": 1000 + i}))
        .collect()
}

#[test]
fn cities_in_a_district_end_to_end() {
    let svc = FakeService::default()
        .route("/lookups/countries", json!([{"code": "BRA", "name": "Brazil"}]))
        .route("/lookups/districts?country=BRA", json!(["São Paulo", {"value": "Bahia"}]))
        .route(
            "/reports/cities?scope=country&name=BRA&district=S%C3%A3o%20Paulo",
            json!({"globalPopulation": 6078749450u64, "data": [
                {"Name": "São Paulo", "Country": "Brazil", "district": "São Paulo", "population": 9968485}
            ]}),
        );

    let mut viewer = Viewer::default();
    let t = viewer.select_report(ReportType::Cities);
    viewer.run_triggers(&svc, Triggers { fetch_report: false, ..t });

    let t = viewer.set_scope(Scope::Country);
    assert!(!t.fetch_report);
    viewer.run_triggers(&svc, t);
    assert_eq!(viewer.scope_names().find("BRA").unwrap().label, "Brazil");

    viewer.load_districts(&svc, "BRA");
    assert_eq!(viewer.districts().options()[0].label, "(All districts)");
    assert_eq!(viewer.districts().fetched_len(), 2);

    let t = viewer.apply_filters(Scope::Country, "BRA", "São Paulo", "", "25");
    let outcome = viewer.run_triggers(&svc, t);
    assert_eq!(outcome, FetchOutcome::Applied { rows: 1 });
    assert_eq!(viewer.status(), "Loaded 1 rows");

    let table = viewer.render();
    assert_eq!(headers(&table), ["NAME", "COUNTRY", "DISTRICT", "POPULATION"]);
    let html = table.to_html();
    assert!(html.starts_with("<p><strong>Total Global Population:</strong> 6,078,749,450</p>"));
    assert!(html.contains("<td>9,968,485</td>"));
    assert_eq!(viewer.breadcrumbs(), "Home › Cities › Country › BRA › São Paulo");

    assert!(svc
        .calls()
        .contains(&"/reports/cities?scope=country&name=BRA&district=S%C3%A3o%20Paulo".to_string()));
}

#[test]
fn languages_global_has_no_parameters() {
    let svc = FakeService::default().route(
        "/reports/languages?",
        json!([{"language": "Chinese", "numberOfSpeakers": 1191843539u64, "percentOfGlobalPopulation": "19.61"}]),
    );

    let mut viewer = Viewer::default();
    let t = viewer.select_report(ReportType::Languages);
    viewer.run_triggers(&svc, t);

    // Global scope: the scope-name lookup is answered locally.
    assert_eq!(svc.calls(), ["/reports/languages?"]);
    assert_eq!(viewer.scope_names().options().len(), 1);

    let table = viewer.render();
    assert_eq!(headers(&table), ["LANGUAGE", "NUMBER OF SPEAKERS", "% OF GLOBAL POPULATION"]);
    assert_eq!(table.banner.unwrap().label, "Global Population");
}

#[test]
fn languages_country_percentage_precedes_global() {
    let svc = FakeService::default().route(
        "/reports/languages?scope=country&name=BRA",
        json!([{"name": "Portuguese", "speakers": 170115000, "percentOfCountryPopulation": "97.50", "percentOfGlobalPopulation": "2.80"}]),
    );

    let mut viewer = Viewer::default();
    viewer.select_report(ReportType::Languages);
    let t = viewer.apply_filters(Scope::Country, "BRA", "", "", "");
    viewer.run_triggers(&svc, t);

    let table = viewer.render();
    assert_eq!(
        headers(&table),
        ["LANGUAGE", "NUMBER OF SPEAKERS", "% OF COUNTRY", "% OF GLOBAL POPULATION"]
    );
    match table.body {
        TableBody::Rows { rows, .. } => {
            assert_eq!(rows[0], ["Portuguese", "170,115,000", "97.50", "2.80"]);
        }
        other => panic!("expected rows, got {other:?}"),
    }
}

#[test]
fn flat_reports_ignore_scope_for_headers() {
    for report in [ReportType::Countries, ReportType::Capitals, ReportType::Cities, ReportType::Populations] {
        let global = report.columns(Scope::Global);
        for scope in report.scopes() {
            assert_eq!(report.columns(*scope), global, "{report} under {scope}");
        }
    }
}

#[test]
fn paging_through_a_fetched_dataset() {
    let svc = FakeService::default().route("/reports/cities?", cities(60));

    let mut viewer = Viewer::default();
    let t = viewer.select_report(ReportType::Cities);
    viewer.run_triggers(&svc, t);
    assert_eq!(viewer.state().total_pages(), 3);
    assert!(viewer.render().nav.next_enabled);
    assert!(!viewer.render().nav.prev_enabled);

    assert!(!viewer.jump_to_page("0"));
    assert!(!viewer.jump_to_page("9999"));
    assert!(!viewer.jump_to_page("two"));
    assert_eq!(viewer.state().page(), 1);

    assert!(viewer.jump_to_page("3"));
    assert!(!viewer.next_page());
    let last = viewer.render();
    assert_eq!(last.row_count(), 10);
    assert_eq!(last.nav.info, "Page 3 / 3");
    assert!(!last.nav.next_enabled);

    let t = viewer.apply_filters(Scope::Global, "", "", "", "all");
    viewer.run_triggers(&svc, t);
    let all = viewer.render();
    assert_eq!(all.row_count(), 60);
    assert_eq!(all.nav.info, "Showing all 60 records");
    assert!(!all.nav.prev_enabled && !all.nav.next_enabled);
    assert!(!viewer.next_page());
}

#[test]
fn shrinking_dataset_pulls_page_back_in_range() {
    let svc = FakeService::default()
        .route("/reports/cities?", cities(60))
        .route("/reports/cities?limit=5", cities(5));

    let mut viewer = Viewer::default();
    let t = viewer.select_report(ReportType::Cities);
    viewer.run_triggers(&svc, t);
    viewer.jump_to_page("3");

    // Refetch without resetting the page first.
    let pending = viewer.begin_fetch().unwrap();
    let small = svc.get("/reports/cities?limit=5");
    viewer.complete_fetch(pending.token, small);
    assert_eq!(viewer.state().page(), 1);
}

#[test]
fn failure_keeps_stale_rows_and_reports_status() {
    let svc = FakeService::default()
        .route("/reports/countries?", json!([{"code": "ABW", "name": "Aruba"}]))
        .fail("/reports/countries?scope=continent&name=Asia", ReportError::Http { status: 503 });

    let mut viewer = Viewer::default();
    let t = viewer.select_report(ReportType::Countries);
    viewer.run_triggers(&svc, t);

    let t = viewer.apply_filters(Scope::Continent, "Asia", "", "", "");
    let outcome = viewer.run_triggers(&svc, t);
    assert_eq!(outcome, FetchOutcome::Failed { kind: ErrorKind::HttpError });
    assert_eq!(viewer.phase(), Phase::Failed);
    assert_eq!(viewer.status(), "Error");
    assert_eq!(viewer.state().data().len(), 1);
    assert_eq!(viewer.render().to_html(), "<p>Error: HTTP 503</p>");
    assert_eq!(viewer.last_error(), Some("HTTP 503"));
}

#[test]
fn network_error_message_is_escaped() {
    let svc = FakeService::default().fail(
        "/reports/capitals?",
        ReportError::Network("connect <refused>".into()),
    );
    let mut viewer = Viewer::default();
    let t = viewer.select_report(ReportType::Capitals);
    viewer.run_triggers(&svc, t);
    assert_eq!(viewer.render().to_html(), "<p>Error: connect &lt;refused&gt;</p>");
}

#[test]
fn lookup_failure_never_blocks_report() {
    let svc = FakeService::default()
        .fail("/lookups/regions", ReportError::Http { status: 500 })
        .route("/reports/populations?scope=region", json!([
            {"name": "Caribbean", "totalPopulation": 200, "cityPopulation": 50, "nonCityPopulation": 150}
        ]));

    let mut viewer = Viewer::default();
    viewer.select_report(ReportType::Populations);
    let t = viewer.set_scope(Scope::Region);
    viewer.run_triggers(&svc, t);
    assert_eq!(viewer.scope_names().options().len(), 1);
    assert_eq!(viewer.phase(), Phase::Idle);

    let t = viewer.apply_filters(Scope::Region, "", "", "", "");
    assert_eq!(viewer.run_triggers(&svc, t), FetchOutcome::Applied { rows: 1 });
    match viewer.render().body {
        TableBody::Rows { rows, .. } => {
            assert_eq!(rows[0], ["Caribbean", "200", "50", "25.00", "150", "75.00"]);
        }
        other => panic!("expected rows, got {other:?}"),
    }
}

#[test]
fn out_of_order_responses_keep_the_newest() {
    let mut viewer = Viewer::default();
    viewer.select_report(ReportType::Cities);

    viewer.apply_filters(Scope::Country, "JPN", "", "", "");
    let slow = viewer.begin_fetch().unwrap();
    viewer.apply_filters(Scope::Country, "BRA", "", "", "");
    let fast = viewer.begin_fetch().unwrap();
    assert_eq!(fast.request.param("name"), Some("BRA"));

    let fresh = json!([{"name": "São Paulo"}, {"name": "Rio de Janeiro"}]).to_string();
    let stale = json!([{"name": "Tokyo"}]).to_string();

    assert_eq!(viewer.complete_fetch(fast.token, Ok(fresh)), FetchOutcome::Applied { rows: 2 });
    assert_eq!(viewer.complete_fetch(slow.token, Ok(stale)), FetchOutcome::Stale);
    assert_eq!(viewer.state().data().len(), 2);
    assert_eq!(viewer.status(), "Loaded 2 rows");
}

#[test]
fn select_report_resets_everything() {
    let mut viewer = Viewer::new(ViewerConfig {
        default_page_size: 10,
        ..Default::default()
    });
    viewer.select_report(ReportType::Cities);
    viewer.apply_filters(Scope::Country, "BRA", "Bahia", "5", "50");
    viewer.select_report(ReportType::Countries);

    let s = viewer.state();
    assert_eq!(s.scope(), Scope::Global);
    assert_eq!(s.scope_name(), "");
    assert_eq!(s.district(), "");
    assert_eq!(s.top_n(), None);
    assert_eq!(s.page_size(), PageSize::Rows(10));
    assert_eq!(s.page(), 1);
}
