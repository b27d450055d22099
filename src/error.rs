// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for ClientSideEye
//!
//! Each error carries the context a tester needs to act on it: the URL that
//! failed, the bridge ports that were probed, the operation that timed out.

use thiserror::Error;

/// Result type alias for ClientSideEye operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// HTML parsing failed
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// Selector parsing error
    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    /// Timeout error
    #[error("{operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
        url: Option<String>,
    },

    /// Page could not be loaded
    #[error("Failed to load {target}: {reason}")]
    Load {
        target: String,
        status: Option<u16>,
        reason: String,
    },

    /// No bridge answered the health probe
    #[error("Bridge not reachable on localhost ports {first_port}-{last_port}")]
    BridgeUnreachable {
        first_port: u16,
        last_port: u16,
        last_error: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a selector error
    pub fn selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Selector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    /// Create a timeout error; the operation text is what users see
    pub fn timeout(operation: impl Into<String>, duration_ms: u64) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
            url: None,
        }
    }

    /// Create a timeout error with URL
    pub fn timeout_with_url(
        operation: impl Into<String>,
        duration_ms: u64,
        url: impl Into<String>,
    ) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
            url: Some(url.into()),
        }
    }

    /// Create a load error
    pub fn load(target: impl Into<String>, status: Option<u16>, reason: impl Into<String>) -> Self {
        Error::Load {
            target: target.into(),
            status,
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Http(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Load { status, .. } => *status,
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Load { target, .. } => Some(target),
            Error::Timeout { url: Some(u), .. } => Some(u),
            _ => None,
        }
    }

    /// Short message suitable for a one-line status display. Transport
    /// errors are unwrapped to their innermost cause.
    pub fn brief(&self) -> String {
        match self {
            Error::Http(e) => {
                if e.is_timeout() {
                    return "request timed out".to_string();
                }
                let mut source: Option<&dyn std::error::Error> = std::error::Error::source(e);
                let mut last = None;
                while let Some(s) = source {
                    last = Some(s.to_string());
                    source = s.source();
                }
                last.unwrap_or_else(|| e.to_string())
            }
            Error::Other(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

/// Prefix an error with the operation that failed
pub trait ErrorContext<T> {
    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            Error::Other(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error() {
        let err = Error::load("https://example.com", Some(403), "Forbidden");

        assert_eq!(err.status_code(), Some(403));
        assert_eq!(err.url(), Some("https://example.com"));
        assert_eq!(err.to_string(), "Failed to load https://example.com: Forbidden");
    }

    #[test]
    fn test_timeout_error() {
        let err = Error::timeout("Timed out executing scanner in tab", 5000);
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "Timed out executing scanner in tab");
        assert_eq!(err.brief(), "Timed out executing scanner in tab");
    }

    #[test]
    fn test_bridge_unreachable_message() {
        let err = Error::BridgeUnreachable {
            first_port: 17373,
            last_port: 17382,
            last_error: None,
        };
        assert_eq!(
            err.to_string(),
            "Bridge not reachable on localhost ports 17373-17382"
        );
    }

    #[test]
    fn test_context() {
        let res: std::result::Result<(), &str> = Err("boom");
        let err = res.context("reading page").unwrap_err();
        assert_eq!(err.to_string(), "reading page: boom");
    }
}
