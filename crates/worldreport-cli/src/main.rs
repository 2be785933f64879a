//! worldreport — Command-line front-end for worldreport-core
//!
//! Drives the same viewer engine as the browser build, over blocking HTTP,
//! and prints reports as plain-text tables.
//!
//! Usage examples
//! --------------
//!
//! - Ten largest cities of a Brazilian state
//!   $ worldreport report cities --scope Country --name BRA --district "São Paulo" --top 10
//!
//! - Languages spoken in a region, every row on one page
//!   $ worldreport --page-size -1 report languages --scope Region --name Caribbean
//!
//! - Page through all countries
//!   $ worldreport browse countries
//!
//! - What can be passed as `--name`?
//!   $ worldreport lookups Country --filter bra
//!   $ worldreport districts BRA
//!
//! The service address comes from `--base-url` or `WORLDREPORT_URL`
//! (default `http://localhost:8081`). Logging goes to stderr and is
//! controlled by `RUST_LOG` (default `warn`).
mod args;

use crate::args::{CliArgs, Commands, FilterArgs};
use anyhow::{bail, Context};
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;
use worldreport_core::lookup::{self, LookupOptions, ALL_DISTRICTS_PLACEHOLDER, ALL_PLACEHOLDER};
use worldreport_core::prelude::*;
use worldreport_core::LookupRequest;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = CliArgs::parse();

    let config = ViewerConfig {
        base_url: args.base_url,
        default_page_size: args.page_size,
        number_style: if args.european {
            NumberStyle::European
        } else {
            NumberStyle::Standard
        },
    };
    let service = HttpReportService::new(config.clone())?;
    let mut viewer = Viewer::try_new(config)?;

    match args.command {
        Commands::Report {
            kind,
            filters,
            page,
        } => {
            load_report(&mut viewer, &service, &kind, &filters)?;
            if page > 1 && !viewer.set_page(page) {
                bail!(
                    "page {page} is out of range (1-{})",
                    viewer.state().total_pages()
                );
            }
            print_view(&viewer);
        }

        Commands::Browse { kind, filters } => {
            load_report(&mut viewer, &service, &kind, &filters)?;
            browse(&mut viewer, &service)?;
        }

        Commands::Lookups { scope, filter } => {
            let scope: Scope = scope.parse()?;
            let options = match LookupRequest::for_scope(scope) {
                Some(req) => fetch_options(&service, &req, ALL_PLACEHOLDER)?,
                None => LookupOptions::scope_placeholder(),
            };
            print_options(&options, filter.as_deref());
        }

        Commands::Districts { country, filter } => {
            let Some(req) = LookupRequest::districts(&country) else {
                bail!("a country code is required");
            };
            let options = fetch_options(&service, &req, ALL_DISTRICTS_PLACEHOLDER)?;
            print_options(&options, filter.as_deref());
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

// -----------------------------------------------------------------------------
// REPORTS
// -----------------------------------------------------------------------------

fn load_report<S: ReportService>(
    viewer: &mut Viewer,
    service: &S,
    kind: &str,
    filters: &FilterArgs,
) -> anyhow::Result<()> {
    let report: ReportType = kind.parse()?;
    let scope: Scope = filters.scope.parse()?;
    if !report.supports(scope) {
        let valid: Vec<&str> = report.scopes().iter().map(|s| s.as_str()).collect();
        bail!(
            "{report} cannot be scoped by {scope} (valid: {})",
            valid.join(", ")
        );
    }
    if !filters.district.is_empty() && !(report == ReportType::Cities && scope == Scope::Country) {
        tracing::warn!("--district only applies to cities with --scope Country; ignored");
    }

    viewer.select_report(report);
    let page_size = viewer.config().default_page_size.to_string();
    let triggers = viewer.apply_filters(
        scope,
        &filters.name,
        &filters.district,
        filters.top.as_deref().unwrap_or(""),
        &page_size,
    );
    fetch(viewer, service, triggers)
}

fn fetch<S: ReportService>(viewer: &mut Viewer, service: &S, triggers: Triggers) -> anyhow::Result<()> {
    match viewer.run_triggers(service, triggers) {
        FetchOutcome::Failed { .. } => bail!(
            "{}",
            viewer.last_error().unwrap_or("report request failed")
        ),
        _ => {
            eprintln!("{}", viewer.status());
            Ok(())
        }
    }
}

fn print_view(viewer: &Viewer) {
    println!("{}", viewer.breadcrumbs());
    print!("{}", viewer.render().to_text());
}

// -----------------------------------------------------------------------------
// INTERACTIVE PAGING
// -----------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum BrowseCommand {
    Next,
    Prev,
    Jump(String),
    Refresh,
    Quit,
    Help,
}

fn parse_browse_command(line: &str) -> BrowseCommand {
    let line = line.trim();
    let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match cmd.to_ascii_lowercase().as_str() {
        "n" | "next" | "" => BrowseCommand::Next,
        "p" | "prev" => BrowseCommand::Prev,
        "j" | "jump" => BrowseCommand::Jump(rest.trim().to_string()),
        "r" | "refresh" => BrowseCommand::Refresh,
        "q" | "quit" | "exit" => BrowseCommand::Quit,
        _ => BrowseCommand::Help,
    }
}

fn browse<S: ReportService>(viewer: &mut Viewer, service: &S) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_view(viewer);
        print!("[n]ext [p]rev [j]ump <page> [r]efresh [q]uit > ");
        io::stdout().flush().context("flushing prompt")?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        match parse_browse_command(&line.context("reading command")?) {
            BrowseCommand::Next => {
                viewer.next_page();
            }
            BrowseCommand::Prev => {
                viewer.prev_page();
            }
            BrowseCommand::Jump(page) => {
                viewer.jump_to_page(&page);
            }
            BrowseCommand::Refresh => {
                let triggers = Triggers {
                    fetch_report: true,
                    ..Triggers::none()
                };
                if let Err(e) = fetch(viewer, service, triggers) {
                    eprintln!("{e}");
                }
            }
            BrowseCommand::Quit => return Ok(()),
            BrowseCommand::Help => {
                eprintln!("commands: n, p, j <page>, r, q");
            }
        }
    }
}

// -----------------------------------------------------------------------------
// LOOKUPS
// -----------------------------------------------------------------------------

fn fetch_options<S: ReportService>(
    service: &S,
    request: &LookupRequest,
    placeholder: &str,
) -> anyhow::Result<LookupOptions> {
    let body = service
        .get(&request.path())
        .with_context(|| format!("requesting {request}"))?;
    let fetched = lookup::parse_options(&body)?;
    Ok(LookupOptions::with_placeholder(placeholder, fetched))
}

fn print_options(options: &LookupOptions, filter: Option<&str>) {
    let options = match filter {
        Some(q) => options.filter(q),
        None => options.clone(),
    };
    for o in options.options().iter().filter(|o| !o.is_placeholder()) {
        if o.value == o.label {
            println!("{}", o.label);
        } else {
            println!("{:<6} {}", o.value, o.label);
        }
    }
    eprintln!("{} entries", options.fetched_len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browse_commands() {
        assert_eq!(parse_browse_command(""), BrowseCommand::Next);
        assert_eq!(parse_browse_command("P"), BrowseCommand::Prev);
        assert_eq!(parse_browse_command("j 3"), BrowseCommand::Jump("3".into()));
        assert_eq!(parse_browse_command("jump"), BrowseCommand::Jump(String::new()));
        assert_eq!(parse_browse_command(" q "), BrowseCommand::Quit);
        assert_eq!(parse_browse_command("what"), BrowseCommand::Help);
    }

    #[test]
    fn args_parse() {
        let args = CliArgs::parse_from([
            "worldreport",
            "--page-size",
            "-1",
            "report",
            "cities",
            "--scope",
            "Country",
            "--name",
            "BRA",
            "--top",
            "10",
        ]);
        assert_eq!(args.page_size, -1);
        match args.command {
            Commands::Report { kind, filters, page } => {
                assert_eq!(kind, "cities");
                assert_eq!(filters.scope, "Country");
                assert_eq!(filters.top.as_deref(), Some("10"));
                assert_eq!(page, 1);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
