// crates/worldreport-core/src/render.rs

//! # Table Rendering
//!
//! [`render`] combines registry, projector and paginator into a
//! front-end-neutral [`RenderedTable`]. Rendering is a pure read of the view
//! state, so calling it repeatedly simply redraws the current page.
//!
//! Two outputs are provided:
//! - [`RenderedTable::to_html`] for the browser; every text node is escaped.
//! - [`RenderedTable::to_text`] for terminals.

use crate::format::{escape_html, format_number, NumberStyle};
use crate::paginator::{self, Navigation};
use crate::projector::project_row;
use crate::registry::{ReportType, Scope};
use crate::state::ViewState;
use serde::Serialize;

pub const NO_DATA: &str = "No data available";

/// Caption shown above the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    /// Rendered in bold.
    pub label: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableBody {
    /// No report selected yet.
    Idle,
    Rows {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// A report is active but the dataset is empty.
    Empty,
    /// The last report fetch failed. Holds the unescaped message.
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    pub banner: Option<Banner>,
    pub body: TableBody,
    pub nav: Navigation,
}

/// Render the current page of `state`.
pub fn render(state: &ViewState, style: NumberStyle) -> RenderedTable {
    let nav = paginator::navigation(state.data().len(), state.page_size(), state.page());

    let Some(report) = state.report() else {
        return RenderedTable {
            banner: None,
            body: TableBody::Idle,
            nav,
        };
    };

    let banner = banner(state, style);
    if state.data().is_empty() {
        return RenderedTable {
            banner,
            body: TableBody::Empty,
            nav,
        };
    }

    let columns = state.columns();
    let view = paginator::paginate(state.data(), state.page_size(), state.page());
    let headers = columns.iter().map(|c| c.label().to_uppercase()).collect();
    let rows = view
        .rows
        .iter()
        .map(|row| project_row(report, columns, row, style))
        .collect();

    RenderedTable {
        banner,
        body: TableBody::Rows { headers, rows },
        nav: view.nav,
    }
}

/// Render a failed fetch: the banner and navigation of the stale state, with
/// the error in place of the table.
pub fn render_error(state: &ViewState, message: &str, style: NumberStyle) -> RenderedTable {
    let mut table = render(state, style);
    table.body = TableBody::Error {
        message: message.to_string(),
    };
    table
}

/// Context caption for the active report.
///
/// `languages` names the scope being measured; every other report shows the
/// global population when the service supplied one.
pub fn banner(state: &ViewState, style: NumberStyle) -> Option<Banner> {
    match state.report()? {
        ReportType::Languages => {
            let label = match state.scope() {
                Scope::Global => "Global Population".to_string(),
                scope => {
                    let name = match state.scope_name() {
                        "" => "(All)",
                        n => n,
                    };
                    format!("{scope}: {name}")
                }
            };
            Some(Banner { label, value: None })
        }
        _ => state.global_population().map(|g| Banner {
            label: "Total Global Population:".to_string(),
            value: Some(format_number(g, style)),
        }),
    }
}

/// `Home › Cities › Country › BRA › São Paulo`
pub fn breadcrumbs(state: &ViewState) -> String {
    let mut parts = vec!["Home"];
    if let Some(report) = state.report() {
        parts.push(report.title());
        parts.push(state.scope().as_str());
        if !state.scope_name().is_empty() {
            parts.push(state.scope_name());
        }
        if report == ReportType::Cities && !state.district().is_empty() {
            parts.push(state.district());
        }
    }
    parts.join(" › ")
}

impl RenderedTable {
    pub fn row_count(&self) -> usize {
        match &self.body {
            TableBody::Rows { rows, .. } => rows.len(),
            _ => 0,
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();

        if let TableBody::Error { message } = &self.body {
            html.push_str("<p>Error: ");
            html.push_str(&escape_html(message));
            html.push_str("</p>");
            return html;
        }

        if let Some(b) = &self.banner {
            html.push_str("<p><strong>");
            html.push_str(&escape_html(&b.label));
            html.push_str("</strong>");
            if let Some(v) = &b.value {
                html.push(' ');
                html.push_str(&escape_html(v));
            }
            html.push_str("</p>");
        }

        match &self.body {
            TableBody::Idle | TableBody::Error { .. } => {}
            TableBody::Empty => {
                html.push_str("<p>");
                html.push_str(NO_DATA);
                html.push_str("</p>");
            }
            TableBody::Rows { headers, rows } => {
                html.push_str("<table><thead><tr>");
                for h in headers {
                    html.push_str("<th>");
                    html.push_str(&escape_html(h));
                    html.push_str("</th>");
                }
                html.push_str("</tr></thead><tbody>");
                for row in rows {
                    html.push_str("<tr>");
                    for cell in row {
                        html.push_str("<td>");
                        html.push_str(&escape_html(cell));
                        html.push_str("</td>");
                    }
                    html.push_str("</tr>");
                }
                html.push_str("</tbody></table>");
            }
        }
        html
    }

    /// Boxed plain-text table followed by the pagination line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        if let Some(b) = &self.banner {
            out.push_str(&b.label);
            if let Some(v) = &b.value {
                out.push(' ');
                out.push_str(v);
            }
            out.push('\n');
        }

        match &self.body {
            TableBody::Idle => return out,
            TableBody::Error { message } => {
                out.push_str("Error: ");
                out.push_str(message);
                out.push('\n');
                return out;
            }
            TableBody::Empty => {
                out.push_str(NO_DATA);
                out.push('\n');
            }
            TableBody::Rows { headers, rows } => {
                let widths = column_widths(headers, rows);
                let rule = rule_line(&widths);
                out.push_str(&rule);
                out.push_str(&text_row(headers, &widths));
                out.push_str(&rule);
                for row in rows {
                    out.push_str(&text_row(row, &widths));
                }
                out.push_str(&rule);
            }
        }

        out.push_str(&self.nav.info);
        out.push('\n');
        out
    }
}

fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths
}

fn rule_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn text_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, w) in cells.iter().zip(widths) {
        let pad = w.saturating_sub(cell.chars().count());
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad + 1));
        line.push('|');
    }
    line.push('\n');
    line
}
