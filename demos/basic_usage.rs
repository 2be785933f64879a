//! Basic usage example for worldreport-rs
//!
//! This example demonstrates how to:
//! - Plug a report service into the viewer
//! - Select a report and apply filters
//! - Follow the triggers a state change returns
//! - Render the result as text and HTML
//!
//! Set `WORLDREPORT_URL` to talk to a running service; otherwise a small
//! canned dataset is used.

use serde_json::json;
use worldreport_rs::prelude::*;

/// Answers every request from memory.
struct CannedService;

impl ReportService for CannedService {
    fn get(&self, path: &str) -> Result<String> {
        let body = match path {
            "/lookups/countries" => json!([
                {"code": "BRA", "name": "Brazil"},
                {"code": "JPN", "name": "Japan"}
            ]),
            "/lookups/districts?country=BRA" => json!(["Bahia", "Rio de Janeiro", "São Paulo"]),
            p if p.starts_with("/reports/cities?") => json!({
                "globalPopulation": 6078749450u64,
                "data": [
                    {"name": "São Paulo", "country": "Brazil", "district": "São Paulo", "population": 9968485},
                    {"name": "Campinas", "country": "Brazil", "district": "São Paulo", "population": 950043},
                    {"name": "Guarulhos", "country": "Brazil", "district": "São Paulo", "population": 1095874}
                ]
            }),
            _ => return Err(ReportError::Http { status: 404 }),
        };
        Ok(body.to_string())
    }
}

fn run<S: ReportService>(service: &S) -> Result<()> {
    let mut viewer = Viewer::default();

    println!("--- Example 1: Select a report ---");
    let triggers = viewer.select_report(ReportType::Cities);
    println!("  triggers: {triggers:?}");
    println!("  scopes:   {:?}", viewer.state().scopes());
    println!("  columns:  {:?}\n", viewer.state().columns());

    println!("--- Example 2: Narrow the scope ---");
    let triggers = viewer.set_scope(Scope::Country);
    viewer.run_triggers(service, triggers);
    for o in viewer.scope_names().options() {
        println!("  {:<6} {}", o.value, o.label);
    }
    println!("  district selector visible: {}\n", viewer.district_visible());

    println!("--- Example 3: District lookup ---");
    viewer.load_districts(service, "BRA");
    println!("  {} districts\n", viewer.districts().fetched_len());

    println!("--- Example 4: Apply filters and fetch ---");
    let triggers = viewer.apply_filters(Scope::Country, "BRA", "São Paulo", "10", "25");
    if let Some(pending) = viewer.begin_fetch() {
        println!("  GET {}", pending.request);
        let outcome = viewer.complete_fetch(pending.token, service.get(&pending.request.path()));
        println!("  {outcome:?}, fetch requested: {}", triggers.fetch_report);
    }
    println!("  {}\n", viewer.status());

    println!("--- Example 5: Render ---");
    println!("{}", viewer.breadcrumbs());
    print!("{}", viewer.render().to_text());
    println!("\n{}", viewer.render().to_html());

    Ok(())
}

fn main() -> Result<()> {
    println!("=== worldreport-rs Basic Usage Example ===\n");

    match std::env::var("WORLDREPORT_URL") {
        Ok(base_url) => {
            let service = HttpReportService::new(ViewerConfig {
                base_url,
                ..Default::default()
            })?;
            run(&service)
        }
        Err(_) => run(&CannedService),
    }
}
