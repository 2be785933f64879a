// crates/worldreport-core/src/config.rs

use crate::error::{ReportError, Result};
use crate::format::NumberStyle;
use crate::state::{PageSize, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};

/// Default address of the report service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";

/// Session-wide settings for a [`Viewer`](crate::Viewer).
///
/// Every field has a default, so partial JSON/JS objects deserialize fine:
///
/// ```rust
/// use worldreport_core::ViewerConfig;
///
/// let cfg: ViewerConfig = serde_json::from_str(r#"{ "default_page_size": 50 }"#).unwrap();
/// assert_eq!(cfg.default_page_size, 50);
/// assert_eq!(cfg.base_url, "http://localhost:8081");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Origin prefixed to every request path by blocking transports.
    pub base_url: String,
    /// Page size applied on every report selection; `-1` shows all rows.
    pub default_page_size: i64,
    pub number_style: NumberStyle,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE as i64,
            number_style: NumberStyle::Standard,
        }
    }
}

impl ViewerConfig {
    pub fn page_size(&self) -> PageSize {
        PageSize::from_sentinel(self.default_page_size)
    }

    /// Rejects settings no session can work with.
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ReportError::Config("base_url is empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ReportError::Config(format!(
                "base_url must start with http:// or https://, got {url}"
            )));
        }
        if self.default_page_size == 0 || self.default_page_size < -1 {
            return Err(ReportError::Config(format!(
                "default_page_size must be positive or -1, got {}",
                self.default_page_size
            )));
        }
        Ok(())
    }

    /// `base_url` joined with a request path, without doubled slashes.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
