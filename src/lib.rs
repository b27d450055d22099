// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # ClientSideEye - client-side access control finder
//!
//! Finds actionable UI elements (buttons, links, form controls) that are
//! disabled or hidden purely on the client side. Such controls often point at
//! endpoints that still answer direct requests, so each one is reported as a
//! potential authorization-bypass finding.
//!
//! ## Features
//!
//! - DOM scan: actionable/disabled/hidden predicates with an additive
//!   confidence score, inline and embedded stylesheet resolution
//! - Bridge client: localhost port discovery and form-encoded submission
//! - Passive analyzer: password values, gated controls, role hints, secret-ish
//!   and anti-DevTools inline scripts
//! - DevTools hints: best selector and a reveal snippet per finding
//!
//! ## Example
//!
//! ```rust,no_run
//! use clientsideeye::{scan_and_send, BridgeClient, BridgeConfig, BridgeLocator, BridgeSink};
//! use clientsideeye::{HttpClient, PageLoader, ScanConfig, Target};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let http = HttpClient::new()?;
//!     let bridge = BridgeConfig::from_env()?;
//!     let sink = BridgeSink::new(
//!         BridgeLocator::new(http.clone(), bridge.clone()),
//!         BridgeClient::new(http.clone(), bridge),
//!     );
//!
//!     let target: Target = "https://app.example.com/admin".parse()?;
//!     let outcome =
//!         scan_and_send(&PageLoader::new(http), &target, &ScanConfig::default(), &sink).await;
//!     println!("{}", outcome);
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod bridge;
pub mod config;
pub mod dom;
pub mod error;
pub mod finding;
pub mod hints;
pub mod http;
pub mod page;
pub mod scanner;

// Re-exports for convenience

// Scanning
pub use scanner::{scan_target, DomScanner, ScanReport, EXEC_TIMEOUT_MESSAGE};

// Bridge
pub use bridge::{
    scan_and_send, BridgeClient, BridgeLocator, BridgeSink, FindingSink, JsonSink, ScanOutcome,
    SubmissionSummary,
};

// Passive analysis and hints
pub use analyzer::HtmlAnalyzer;
pub use hints::FindHints;

// Configuration
pub use config::{BridgeConfig, ScanConfig};

// Findings
pub use finding::{Finding, FindingExport, FindingFilter, FindingType, Severity};

// Pages and DOM
pub use dom::{parse_html, parse_html_with_url, Document, Element, Node};
pub use page::{LoadedPage, PageLoader, Target};

// Errors
pub use error::{Error, ErrorContext, Result};

// HTTP
pub use http::{HttpClient, HttpClientConfig, Request, Response};

/// ClientSideEye version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
