// crates/worldreport-core/src/error.rs
use serde::Serialize;
use thiserror::Error;

/// Coarse classification of a failure, used by front-ends to decide where
/// a failure is surfaced (table area vs. log only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Transport-level failure: DNS, refused connection, aborted fetch.
    NetworkFailure,
    /// The service answered with a non-2xx status.
    HttpError,
    /// The body was not JSON at all. Wrong-but-valid JSON shapes are
    /// tolerated by normalization and never produce this.
    MalformedResponse,
    /// Caller handed the engine a name it does not know.
    InvalidInput,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{0}")]
    Network(String),

    #[error("HTTP {status}")]
    Http { status: u16 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown report type: {0}")]
    UnknownReport(String),

    #[error("Unknown scope: {0}")]
    UnknownScope(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::Network(_) => ErrorKind::NetworkFailure,
            ReportError::Http { .. } => ErrorKind::HttpError,
            ReportError::Json(_) => ErrorKind::MalformedResponse,
            ReportError::UnknownReport(_)
            | ReportError::UnknownScope(_)
            | ReportError::Config(_) => ErrorKind::InvalidInput,
        }
    }

    /// Status code for [`ReportError::Http`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ReportError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_carries_status() {
        let err = ReportError::Http { status: 503 };
        assert_eq!(err.to_string(), "HTTP 503");
        assert_eq!(err.kind(), ErrorKind::HttpError);
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn network_error_keeps_message_verbatim() {
        let err = ReportError::Network("connection refused <localhost>".into());
        assert_eq!(err.to_string(), "connection refused <localhost>");
        assert_eq!(err.kind(), ErrorKind::NetworkFailure);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn json_error_is_malformed_response() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = ReportError::from(parse);
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }
}
