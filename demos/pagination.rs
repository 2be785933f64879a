//! Pagination example for worldreport-rs
//!
//! Loads a 60-row dataset and walks it page by page, then switches to
//! "show all".

use serde_json::json;
use worldreport_rs::prelude::*;

fn capitals(n: usize) -> String {
    let rows: Vec<_> = (1..=n)
        .map(|i| json!({"name": format!("Capital {i:02}"), "country": "Somewhere", "continent": "Asia", "region": "Eastern Asia", "population": i * 125_000}))
        .collect();
    json!(rows).to_string()
}

fn load(viewer: &mut Viewer, page_size: &str) {
    viewer.apply_filters(Scope::Global, "", "", "", page_size);
    if let Some(p) = viewer.begin_fetch() {
        viewer.complete_fetch(p.token, Ok(capitals(60)));
    }
}

fn main() {
    println!("=== worldreport-rs Pagination Example ===\n");

    let mut viewer = Viewer::new(ViewerConfig {
        number_style: NumberStyle::European,
        ..Default::default()
    });
    viewer.select_report(ReportType::Capitals);
    load(&mut viewer, "25");

    loop {
        let table = viewer.render();
        println!(
            "{} | rows on page: {} | prev: {} next: {}",
            table.nav.info,
            table.row_count(),
            table.nav.prev_enabled,
            table.nav.next_enabled
        );
        if !viewer.next_page() {
            break;
        }
    }

    println!("\nJumping back to page 2");
    viewer.jump_to_page("2");
    print!("{}", viewer.render().to_text());

    println!("\nShowing all rows");
    load(&mut viewer, "-1");
    println!("{}", viewer.render().nav.info);
}
