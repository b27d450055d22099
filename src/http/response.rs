// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response type

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use url::Url;

use crate::error::{Error, Result};

/// HTTP response representation
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    pub response_time_ms: u64,
    /// Reason phrase the server sent when it differs from the standard one
    pub reason: Option<String>,
}

impl Response {
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            response_time_ms,
            reason: None,
        }
    }

    pub fn reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// `"{code} {reason}"`, e.g. `404 Not Found`; just the code when no
    /// reason is known
    pub fn status_line(&self) -> String {
        let reason = self
            .reason
            .as_deref()
            .or_else(|| self.status.canonical_reason())
            .unwrap_or("")
            .trim();
        if reason.is_empty() {
            self.status.as_u16().to_string()
        } else {
            format!("{} {}", self.status.as_u16(), reason)
        }
    }

    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec()).map_err(|e| Error::Other(e.to_string()))
    }

    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    pub fn is_html(&self) -> bool {
        self.content_type()
            .map(|ct| ct.contains("text/html") || ct.contains("application/xhtml"))
            .unwrap_or(false)
    }
}
