// crates/worldreport-core/src/lib.rs

//! # worldreport-core
//!
//! Engine of an interactive world-statistics report viewer. A single
//! [`Viewer`] owns the view state (selected report, scope, filters, page)
//! and turns it into requests for the report service and into paginated,
//! formatted tables.
//!
//! Front-ends (the browser binding, the terminal CLI) only forward user
//! actions and perform the I/O the engine asks for.
//!
//! ```rust
//! use worldreport_core::prelude::*;
//!
//! let mut viewer = Viewer::default();
//! viewer.select_report(ReportType::Cities);
//! viewer.apply_filters(Scope::Country, "BRA", "São Paulo", "10", "25");
//!
//! let pending = viewer.begin_fetch().unwrap();
//! assert_eq!(
//!     pending.request.path(),
//!     "/reports/cities?scope=country&name=BRA&district=S%C3%A3o%20Paulo&limit=10"
//! );
//! ```

pub mod config;
pub mod error;
pub mod format;
#[cfg(feature = "http")]
pub mod http;
pub mod lookup;
pub mod paginator;
pub mod projector;
pub mod query;
pub mod registry;
pub mod render;
pub mod response;
pub mod service;
pub mod state;
pub mod text;
pub mod viewer;

// Re-exports
pub use crate::config::ViewerConfig;
pub use crate::error::{ErrorKind, ReportError, Result};
pub use crate::format::NumberStyle;
#[cfg(feature = "http")]
pub use crate::http::HttpReportService;
pub use crate::lookup::{LookupOption, LookupOptions};
pub use crate::paginator::Navigation;
pub use crate::query::{LookupRequest, ReportRequest};
pub use crate::registry::{Column, ReportType, Scope};
pub use crate::render::{Banner, RenderedTable, TableBody};
pub use crate::response::{ReportPayload, Row};
pub use crate::service::ReportService;
pub use crate::state::{PageSize, ViewState};
pub use crate::viewer::{FetchOutcome, PendingFetch, PendingLookup, Phase, Triggers, Viewer};

pub mod prelude {
    //! Common types for front-ends and demos.

    pub use crate::config::ViewerConfig;
    pub use crate::error::{ErrorKind, ReportError, Result};
    pub use crate::format::NumberStyle;
    #[cfg(feature = "http")]
    pub use crate::http::HttpReportService;
    pub use crate::registry::{Column, ReportType, Scope};
    pub use crate::render::RenderedTable;
    pub use crate::service::ReportService;
    pub use crate::state::PageSize;
    pub use crate::viewer::{FetchOutcome, Phase, Triggers, Viewer};
}
