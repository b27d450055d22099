// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! User-facing status of a scan-and-send run

use std::fmt;

use super::submit::SubmissionSummary;
use crate::error::Error;

pub const NO_FINDINGS_TEXT: &str = "No disabled/hidden actionable controls found.";

/// Final outcome of scanning a page and reporting to the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    NoFindings,
    BridgeUnreachable { first_port: u16, last_port: u16 },
    Submitted(SubmissionSummary),
    /// Any error that aborted the run
    Failed(String),
}

impl ScanOutcome {
    /// Map an aborting error; an unreachable bridge keeps its own text
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::BridgeUnreachable {
                first_port,
                last_port,
                ..
            } => ScanOutcome::BridgeUnreachable {
                first_port: *first_port,
                last_port: *last_port,
            },
            other => ScanOutcome::Failed(other.brief()),
        }
    }

    /// Nothing went wrong (no findings counts as success)
    pub fn is_success(&self) -> bool {
        match self {
            ScanOutcome::NoFindings => true,
            ScanOutcome::Submitted(summary) => summary.all_sent(),
            _ => false,
        }
    }
}

impl fmt::Display for ScanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanOutcome::NoFindings => f.write_str(NO_FINDINGS_TEXT),
            ScanOutcome::BridgeUnreachable {
                first_port,
                last_port,
            } => write!(
                f,
                "Bridge not reachable on localhost ports {}-{}.",
                first_port, last_port
            ),
            ScanOutcome::Submitted(s) => {
                write!(
                    f,
                    "Bridge: {}\nFound: {}\nSent: {}\nFailed: {}",
                    s.bridge, s.found, s.sent, s.failed
                )?;
                if let Some(ref status) = s.http_error {
                    write!(f, "\nHTTP error: {}", status)?;
                }
                if let Some(ref err) = s.first_error {
                    write!(f, "\nFirst error: {}", err)?;
                }
                Ok(())
            }
            ScanOutcome::Failed(message) => write!(f, "Error: {}", message),
        }
    }
}
