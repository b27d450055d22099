// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! JSON export of findings

use serde::Serialize;

use super::Finding;
use crate::error::Result;

/// Tool name stamped into exports
pub const EXPORT_TOOL_NAME: &str = "ClientSideEye";

/// Export envelope: `{"tool": .., "version": .., "findings": [..]}`
#[derive(Debug, Serialize)]
pub struct FindingExport<'a> {
    pub tool: &'static str,
    pub version: &'static str,
    pub findings: &'a [Finding],
}

impl<'a> FindingExport<'a> {
    pub fn new(findings: &'a [Finding]) -> Self {
        Self {
            tool: EXPORT_TOOL_NAME,
            version: crate::VERSION,
            findings,
        }
    }

    /// Compact single-line JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON for terminals and files
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::{FindingType, Severity};

    #[test]
    fn test_export_envelope() {
        let findings = vec![Finding::new(
            FindingType::HiddenOrDisabledControl,
            "https://example.test/admin",
        )
        .severity(Severity::High)
        .evidence("<a href=\"/admin/delete\" hidden>\"Delete\"\n</a>")];

        let json = FindingExport::new(&findings).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["tool"], EXPORT_TOOL_NAME);
        assert_eq!(value["version"], crate::VERSION);
        assert_eq!(value["findings"].as_array().unwrap().len(), 1);
        assert_eq!(value["findings"][0]["type"], "HIDDEN_OR_DISABLED_CONTROL");
        assert_eq!(
            value["findings"][0]["evidence"],
            "<a href=\"/admin/delete\" hidden>\"Delete\"\n</a>"
        );
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_empty_export() {
        let json = FindingExport::new(&[]).to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["findings"].as_array().unwrap().is_empty());
    }
}
