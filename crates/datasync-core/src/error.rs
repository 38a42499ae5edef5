//! Error types for datasync-core

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Result type for datasync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of pipeline failures.
///
/// Failed sources are reported as `"<kind>: <message>"`, so these names are
/// what users and CI logs see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    HttpError,
    InvalidJson,
    ShapeError,
    IoError,
    ConfigError,
    Timeout,
    Cancelled,
    NetworkError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::HttpError => "HttpError",
            ErrorKind::InvalidJson => "InvalidJson",
            ErrorKind::ShapeError => "ShapeError",
            ErrorKind::IoError => "IoError",
            ErrorKind::ConfigError => "ConfigError",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::Cancelled => "Cancelled",
            ErrorKind::NetworkError => "NetworkError",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in datasync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Non-200 response that is not a followable redirect
    #[error("HTTP {status} {reason} for {url}")]
    Http {
        url: String,
        status: u16,
        reason: String,
    },

    /// Redirect chain longer than the configured maximum
    #[error("Too many redirects (max {max}) starting at {url}")]
    RedirectLimit { url: String, max: usize },

    /// Redirect chain that revisits a URL
    #[error("Redirect loop detected at {url}")]
    RedirectLoop { url: String },

    /// Response body is not valid JSON
    #[error("Invalid JSON from {url}: {message}")]
    InvalidJson { url: String, message: String },

    /// Transport-level failure (DNS, connect, reset, body read)
    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// Fetched data does not have the shape of a table of records
    #[error("Invalid data for {source_name}: {message}")]
    Shape {
        source_name: String,
        message: String,
    },

    /// Missing, unknown or placeholder configuration
    #[error("{message}")]
    Config { message: String },

    /// A stage did not finish within its deadline
    #[error("{stage} timed out after {}s", .after.as_secs_f64())]
    Timeout { stage: String, after: Duration },

    /// The run was cancelled before this stage finished
    #[error("Cancelled during {stage}")]
    Cancelled { stage: String },

    /// Filesystem error from datasync-fs
    #[error(transparent)]
    Fs(#[from] datasync_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A blocking filesystem task panicked or was aborted
    #[error("Background write task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn shape(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Shape {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Classify this error for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Http { .. } | Error::RedirectLimit { .. } | Error::RedirectLoop { .. } => {
                ErrorKind::HttpError
            }
            Error::InvalidJson { .. } => ErrorKind::InvalidJson,
            Error::Network { .. } => ErrorKind::NetworkError,
            Error::Shape { .. } => ErrorKind::ShapeError,
            Error::Config { .. } => ErrorKind::ConfigError,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Cancelled { .. } => ErrorKind::Cancelled,
            Error::Fs(datasync_fs::Error::ConfigParse { .. })
            | Error::Fs(datasync_fs::Error::UnsupportedFormat { .. }) => ErrorKind::ConfigError,
            Error::Fs(_) | Error::Io(_) | Error::Join(_) => ErrorKind::IoError,
        }
    }

    /// Message used in failed sync results: `"<kind>: <message>"`.
    pub fn report_message(&self) -> String {
        format!("{}: {}", self.kind(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_report_message() {
        let err = Error::Http {
            url: "https://example.org/board.json".into(),
            status: 404,
            reason: "Not Found".into(),
        };
        assert_eq!(err.kind(), ErrorKind::HttpError);
        assert_eq!(
            err.report_message(),
            "HttpError: HTTP 404 Not Found for https://example.org/board.json"
        );
    }

    #[test]
    fn test_redirect_errors_are_http_errors() {
        let err = Error::RedirectLoop {
            url: "http://a".into(),
        };
        assert_eq!(err.kind(), ErrorKind::HttpError);
    }

    #[test]
    fn test_fs_errors_classify_as_io() {
        let err: Error = datasync_fs::Error::io(
            "/tmp/x",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        )
        .into();
        assert_eq!(err.kind(), ErrorKind::IoError);
    }

    #[test]
    fn test_timeout_message() {
        let err = Error::Timeout {
            stage: "fetch".into(),
            after: Duration::from_millis(1500),
        };
        assert_eq!(err.to_string(), "fetch timed out after 1.5s");
    }
}
