// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Finding model shared by the DOM scanner, the passive analyzer and the
//! bridge client.

mod export;
mod filter;

pub use export::{FindingExport, EXPORT_TOOL_NAME};
pub use filter::FindingFilter;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Kind of client-side control signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingType {
    /// Password value rendered into the markup
    PasswordValueInDom,
    /// Actionable control hidden or disabled on the client only
    HiddenOrDisabledControl,
    /// Role/permission vocabulary exposed to the client
    RolePermissionHint,
    /// Inline script that looks like it embeds a credential
    InlineScriptSecretish,
    /// Inline script that tries to stop DevTools inspection
    DevtoolsBlocking,
}

impl FindingType {
    pub const ALL: [FindingType; 5] = [
        FindingType::PasswordValueInDom,
        FindingType::HiddenOrDisabledControl,
        FindingType::RolePermissionHint,
        FindingType::InlineScriptSecretish,
        FindingType::DevtoolsBlocking,
    ];

    /// Wire name (`HIDDEN_OR_DISABLED_CONTROL`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingType::PasswordValueInDom => "PASSWORD_VALUE_IN_DOM",
            FindingType::HiddenOrDisabledControl => "HIDDEN_OR_DISABLED_CONTROL",
            FindingType::RolePermissionHint => "ROLE_PERMISSION_HINT",
            FindingType::InlineScriptSecretish => "INLINE_SCRIPT_SECRETISH",
            FindingType::DevtoolsBlocking => "DEVTOOLS_BLOCKING",
        }
    }

    /// Remediation advice attached to findings of this type
    pub fn recommendation(&self) -> &'static str {
        match self {
            FindingType::PasswordValueInDom => {
                "Do not render secrets or passwords into client-side HTML. Populate credentials server-side only when needed, and never include password values in responses. Enforce server-side authorization and consider rotating exposed credentials."
            }
            FindingType::HiddenOrDisabledControl => {
                "Do not rely on client-side disable/hide state for authorization. Enforce server-side authorization for action endpoints."
            }
            FindingType::RolePermissionHint => {
                "Confirm all authorization decisions are enforced server-side. Avoid leaking internal role names or authorization flags to the client unless required."
            }
            FindingType::InlineScriptSecretish => {
                "Avoid embedding secrets in client-side code. Use server-side sessions or retrieve short-lived tokens from protected endpoints with proper authorization."
            }
            FindingType::DevtoolsBlocking => {
                "Anti-debugging code does not protect client-side logic. Move sensitive decisions to the server and assume users can inspect and modify everything the browser receives."
            }
        }
    }
}

impl fmt::Display for FindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FindingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FindingType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown finding type: {}", s))
    }
}

/// Severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
            Severity::Info => "INFO",
        }
    }

    /// Lenient parse used for externally supplied values: unknown → MEDIUM
    pub fn parse_or_medium(s: &str) -> Self {
        s.parse().unwrap_or(Severity::Medium)
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Medium
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HIGH" => Ok(Severity::High),
            "MEDIUM" => Ok(Severity::Medium),
            "LOW" => Ok(Severity::Low),
            "INFO" | "INFORMATION" | "INFORMATIONAL" => Ok(Severity::Info),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// One reported client-side control signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub id: Uuid,
    pub time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub finding_type: FindingType,
    pub severity: Severity,
    /// 0..=100
    pub confidence: u8,
    pub url: String,
    pub host: String,
    pub title: String,
    pub summary: String,
    pub evidence: String,
    pub recommendation: String,
}

impl Finding {
    /// Create a finding for `url` with the type's default recommendation
    pub fn new(finding_type: FindingType, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: Uuid::new_v4(),
            time: Utc::now(),
            finding_type,
            severity: Severity::default(),
            confidence: 55,
            host: host_from_url(&url),
            url,
            title: String::new(),
            summary: String::new(),
            evidence: String::new(),
            recommendation: finding_type.recommendation().to_string(),
        }
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Set confidence, clamped to 100
    pub fn confidence(mut self, confidence: u8) -> Self {
        self.confidence = confidence.min(100);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = evidence.into();
        self
    }

    pub fn recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = recommendation.into();
        self
    }

    /// Identity used for de-duplication across scans
    pub fn stable_key(&self) -> String {
        format!("{}|{}|{}", self.finding_type, self.url, self.evidence)
    }
}

/// Host part of a URL, empty when the URL does not parse
pub fn host_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

/// Drop findings whose stable key was already seen, keeping first occurrences
pub fn dedupe(findings: Vec<Finding>) -> Vec<Finding> {
    let mut seen = HashSet::new();
    findings
        .into_iter()
        .filter(|f| seen.insert(f.stable_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parsing() {
        assert_eq!("high".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!(" Low ".parse::<Severity>().unwrap(), Severity::Low);
        assert_eq!("Information".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!(Severity::parse_or_medium("bogus"), Severity::Medium);
        assert!(Severity::High > Severity::Medium && Severity::Low > Severity::Info);
    }

    #[test]
    fn test_finding_type_roundtrip_names() {
        for t in FindingType::ALL {
            assert_eq!(t.as_str().parse::<FindingType>().unwrap(), t);
        }
        assert_eq!(
            "hidden_or_disabled_control".parse::<FindingType>().unwrap(),
            FindingType::HiddenOrDisabledControl
        );
        assert!("NOPE".parse::<FindingType>().is_err());
    }

    #[test]
    fn test_finding_builder() {
        let f = Finding::new(FindingType::HiddenOrDisabledControl, "https://app.test/admin?x=1")
            .severity(Severity::High)
            .confidence(250)
            .title("t")
            .evidence("<button disabled>Delete</button>");

        assert_eq!(f.host, "app.test");
        assert_eq!(f.confidence, 100);
        assert_eq!(f.severity, Severity::High);
        assert!(f.recommendation.contains("server-side authorization"));
    }

    #[test]
    fn test_host_from_bad_url() {
        assert_eq!(host_from_url("not a url"), "");
        assert_eq!(host_from_url(""), "");
    }

    #[test]
    fn test_serialized_shape() {
        let f = Finding::new(FindingType::RolePermissionHint, "https://a.test/");
        let value = serde_json::to_value(&f).unwrap();
        assert_eq!(value["type"], "ROLE_PERMISSION_HINT");
        assert_eq!(value["severity"], "MEDIUM");
        assert_eq!(value["host"], "a.test");
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let a = Finding::new(FindingType::RolePermissionHint, "https://a.test/").evidence("x");
        let b = Finding::new(FindingType::RolePermissionHint, "https://a.test/").evidence("x");
        let c = Finding::new(FindingType::RolePermissionHint, "https://a.test/").evidence("y");
        let first_id = a.id;
        let out = dedupe(vec![a, b, c]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, first_id);
    }
}
