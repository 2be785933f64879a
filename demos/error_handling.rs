//! Error handling example for worldreport-rs
//!
//! Report failures are shown in place of the table while the previous rows
//! are kept; lookup failures only degrade a dropdown; bad input is rejected
//! at the boundary or silently ignored.

use serde_json::json;
use std::cell::Cell;
use worldreport_rs::prelude::*;

/// Succeeds once, then fails every request.
struct FlakyService {
    calls: Cell<u32>,
}

impl ReportService for FlakyService {
    fn get(&self, path: &str) -> Result<String> {
        let n = self.calls.get();
        self.calls.set(n + 1);
        match (n, path.starts_with("/lookups")) {
            (_, true) => Err(ReportError::Network("connection refused".into())),
            (0, false) => Ok(json!([{"code": "ABW", "name": "Aruba", "population": 103000}]).to_string()),
            (1, false) => Err(ReportError::Http { status: 503 }),
            _ => Ok("<html>proxy error</html>".to_string()),
        }
    }
}

fn main() -> Result<()> {
    println!("=== worldreport-rs Error Handling Example ===\n");

    println!("--- Example 1: Rejected input ---");
    for name in ["countries", "planets", " LANGUAGES "] {
        match name.parse::<ReportType>() {
            Ok(r) => println!("  {name:?} -> {r}"),
            Err(e) => println!("  {name:?} -> {e}"),
        }
    }
    let bad = ViewerConfig {
        base_url: "localhost".into(),
        ..Default::default()
    };
    if let Err(e) = Viewer::try_new(bad) {
        println!("  config -> {e}");
    }
    println!();

    let service = FlakyService { calls: Cell::new(0) };
    let mut viewer = Viewer::default();

    println!("--- Example 2: Successful fetch ---");
    let triggers = viewer.select_report(ReportType::Countries);
    viewer.fetch_and_render(&service);
    println!("  {} ({} rows, scope lookup requested: {})\n", viewer.status(), viewer.state().data().len(), triggers.refresh_scope_names);

    println!("--- Example 3: HTTP failure keeps the old rows ---");
    let outcome = viewer.fetch_and_render(&service);
    println!("  {outcome:?}");
    println!("  status: {}", viewer.status());
    println!("  html:   {}", viewer.render().to_html());
    println!("  rows still held: {}\n", viewer.state().data().len());

    println!("--- Example 4: Body that is not JSON ---");
    let outcome = viewer.fetch_and_render(&service);
    println!("  {outcome:?}: {}\n", viewer.last_error().unwrap_or_default());

    println!("--- Example 5: Lookup failure degrades to the placeholder ---");
    viewer.set_scope(Scope::Continent);
    let options = viewer.load_scope_names(&service);
    println!("  options: {:?}\n", options.options());

    println!("--- Example 6: Invalid page jumps are ignored ---");
    for input in ["0", "9999", "abc", "1"] {
        println!("  jump {input:>4} -> accepted: {}", viewer.jump_to_page(input));
    }

    Ok(())
}
