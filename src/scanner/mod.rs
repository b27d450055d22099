// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM scanner for client-side disabled/hidden controls
//!
//! Every element matching [`CANDIDATE_SELECTOR`] is checked with three
//! independent predicates (actionable, disabled, hidden). Actionable elements
//! that are disabled or hidden become findings with an additive confidence
//! score.
//!
//! ```rust,ignore
//! use clientsideeye::{parse_html, DomScanner, ScanConfig};
//!
//! let doc = parse_html(r#"<button disabled>Delete</button>"#)?;
//! let report = DomScanner::new(ScanConfig::default()).scan(&doc);
//! assert_eq!(report.findings.len(), 1);
//! ```

mod collector;
mod predicates;
mod scoring;

pub use collector::{
    attribute_summary, inspect, DomScanner, ScanReport, CANDIDATE_SELECTOR, EVIDENCE_MAX_CHARS,
    FINDING_TITLE, SUMMARY_ATTRIBUTES,
};
pub use predicates::{is_actionable, is_disabled, is_hidden};
pub use scoring::{mentions_risk_word, severity_for, Signals};

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use crate::page::{PageLoader, Target};

/// Shown when loading and scanning a target exceeds the execution timeout
pub const EXEC_TIMEOUT_MESSAGE: &str = "Timed out executing scanner in tab";

/// Load `target` and scan it, bounded by `config.exec_timeout`
pub async fn scan_target(
    loader: &PageLoader,
    target: &Target,
    config: &ScanConfig,
) -> Result<ScanReport> {
    let scanner = DomScanner::new(config.clone());
    let work = async {
        let page = loader.load(target).await?;
        Ok::<_, Error>(scanner.scan(&page.document))
    };

    match tokio::time::timeout(config.exec_timeout, work).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Scan of {} exceeded {:?}", target, config.exec_timeout);
            Err(Error::timeout_with_url(
                EXEC_TIMEOUT_MESSAGE,
                config.exec_timeout.as_millis() as u64,
                target.to_string(),
            ))
        }
    }
}
