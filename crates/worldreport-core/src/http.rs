// crates/worldreport-core/src/http.rs
#![cfg(feature = "http")]

use crate::config::ViewerConfig;
use crate::error::{ReportError, Result};
use crate::service::ReportService;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("worldreport/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(30);

// -----------------------------------------------------------------------------
// BLOCKING HTTP TRANSPORT
// -----------------------------------------------------------------------------

/// [`ReportService`] over blocking HTTP, rooted at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpReportService {
    client: reqwest::blocking::Client,
    config: ViewerConfig,
}

impl HttpReportService {
    pub fn new(config: ViewerConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| ReportError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

impl ReportService for HttpReportService {
    fn get(&self, path: &str) -> Result<String> {
        let url = self.config.url_for(path);
        debug!(%url, "GET");

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| ReportError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ReportError::Http {
                status: status.as_u16(),
            });
        }

        resp.text().map_err(|e| ReportError::Network(e.to_string()))
    }
}
