// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client layer
//!
//! Thin reqwest wrapper used for fetching target pages and talking to the
//! local bridge (health probes and form-encoded finding submissions).

mod client;
mod request;
mod response;

pub use client::{HttpClient, HttpClientConfig};
pub use request::Request;
pub use response::Response;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("ClientSideEye/", env!("CARGO_PKG_VERSION"));

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const CONTENT_TYPE: &str = "content-type";
}

/// Content type of bridge submissions
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
