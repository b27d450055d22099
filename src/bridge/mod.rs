// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Local bridge client
//!
//! The bridge is a collector listening on one of a small set of localhost
//! ports. Discovery probes `/api/health` on each port in order and keeps the
//! first healthy base URL; findings are then posted one by one to
//! `/api/finding` as form data.

mod discovery;
mod sink;
mod status;
mod submit;

pub use discovery::{BridgeLocator, HEALTH_PATH};
pub use sink::{BridgeSink, FindingSink, JsonSink};
pub use status::{ScanOutcome, NO_FINDINGS_TEXT};
pub use submit::{BridgeClient, SubmissionSummary, FINDING_PATH};

use crate::config::ScanConfig;
use crate::page::{PageLoader, Target};
use crate::scanner::scan_target;

/// Scan `target` and deliver its findings to `sink`
pub async fn scan_and_send(
    loader: &PageLoader,
    target: &Target,
    config: &ScanConfig,
    sink: &dyn FindingSink,
) -> ScanOutcome {
    tracing::info!("Scanning {}", target);
    let report = match scan_target(loader, target, config).await {
        Ok(report) => report,
        Err(e) => return ScanOutcome::from_error(&e),
    };
    if report.findings.is_empty() {
        return ScanOutcome::NoFindings;
    }

    tracing::info!(
        "{} findings, delivering to {}",
        report.findings.len(),
        sink.name()
    );
    match sink.deliver(&report.findings, &report.url).await {
        Ok(summary) => ScanOutcome::Submitted(summary),
        Err(e) => ScanOutcome::from_error(&e),
    }
}
