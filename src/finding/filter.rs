// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Host / type / severity filtering of finding lists

use super::{Finding, FindingType, Severity};

/// Filter applied before findings are printed or exported.
/// Empty criteria accept everything.
#[derive(Debug, Clone, Default)]
pub struct FindingFilter {
    /// Case-insensitive substring of the finding host
    pub host: Option<String>,
    pub finding_type: Option<FindingType>,
    /// Accepted severities; empty accepts all
    pub severities: Vec<Severity>,
}

impl FindingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        let host = host.into().trim().to_lowercase();
        self.host = (!host.is_empty()).then_some(host);
        self
    }

    pub fn finding_type(mut self, finding_type: FindingType) -> Self {
        self.finding_type = Some(finding_type);
        self
    }

    pub fn severities(mut self, severities: impl IntoIterator<Item = Severity>) -> Self {
        self.severities = severities.into_iter().collect();
        self
    }

    /// Parse a comma separated severity list (`high,medium`)
    pub fn parse_severities(list: &str) -> Result<Vec<Severity>, String> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }

    pub fn matches(&self, finding: &Finding) -> bool {
        if let Some(ref host) = self.host {
            if !finding.host.to_lowercase().contains(host) {
                return false;
            }
        }
        if let Some(t) = self.finding_type {
            if finding.finding_type != t {
                return false;
            }
        }
        self.severities.is_empty() || self.severities.contains(&finding.severity)
    }

    /// Keep matching findings, ordered by severity then confidence (highest first)
    pub fn apply(&self, findings: Vec<Finding>) -> Vec<Finding> {
        let mut kept: Vec<_> = findings.into_iter().filter(|f| self.matches(f)).collect();
        kept.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then_with(|| b.confidence.cmp(&a.confidence))
        });
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(host_url: &str, t: FindingType, sev: Severity, conf: u8) -> Finding {
        Finding::new(t, host_url).severity(sev).confidence(conf)
    }

    #[test]
    fn test_empty_filter_accepts_all() {
        let f = finding("https://a.test/", FindingType::RolePermissionHint, Severity::Info, 35);
        assert!(FindingFilter::new().matches(&f));
    }

    #[test]
    fn test_filter_criteria() {
        let filter = FindingFilter::new()
            .host(" APP ")
            .finding_type(FindingType::HiddenOrDisabledControl)
            .severities([Severity::High, Severity::Medium]);

        let hit = finding(
            "https://app.example.test/x",
            FindingType::HiddenOrDisabledControl,
            Severity::High,
            90,
        );
        let wrong_host = finding(
            "https://other.test/x",
            FindingType::HiddenOrDisabledControl,
            Severity::High,
            90,
        );
        let wrong_sev = finding(
            "https://app.test/x",
            FindingType::HiddenOrDisabledControl,
            Severity::Low,
            50,
        );
        assert!(filter.matches(&hit));
        assert!(!filter.matches(&wrong_host));
        assert!(!filter.matches(&wrong_sev));
    }

    #[test]
    fn test_apply_sorts() {
        let list = vec![
            finding("https://a.test/", FindingType::RolePermissionHint, Severity::Low, 50),
            finding("https://a.test/", FindingType::RolePermissionHint, Severity::High, 85),
            finding("https://a.test/", FindingType::RolePermissionHint, Severity::High, 100),
        ];
        let out = FindingFilter::new().apply(list);
        let confs: Vec<_> = out.iter().map(|f| f.confidence).collect();
        assert_eq!(confs, vec![100, 85, 50]);
    }

    #[test]
    fn test_parse_severities() {
        assert_eq!(
            FindingFilter::parse_severities("high, low").unwrap(),
            vec![Severity::High, Severity::Low]
        );
        assert!(FindingFilter::parse_severities("high,bad").is_err());
    }
}
