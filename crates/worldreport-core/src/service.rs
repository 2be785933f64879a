// crates/worldreport-core/src/service.rs

use crate::error::Result;

/// The external report/lookup service, seen as a black-box JSON API.
///
/// Implementations perform a `GET` for `path` (already carrying its query
/// string) and hand back the raw body. A non-2xx answer must come back as
/// [`ReportError::Http`](crate::ReportError::Http) and a transport failure
/// as [`ReportError::Network`](crate::ReportError::Network); the body is only
/// interpreted by the [`Viewer`](crate::Viewer).
pub trait ReportService {
    fn get(&self, path: &str) -> Result<String>;
}

impl<S: ReportService + ?Sized> ReportService for &S {
    fn get(&self, path: &str) -> Result<String> {
        (**self).get(path)
    }
}
