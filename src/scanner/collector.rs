// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Single-pass collection of client-side disabled/hidden controls

use lazy_static::lazy_static;
use regex::Regex;

use super::predicates::{is_actionable, is_disabled, is_hidden};
use super::scoring::{mentions_risk_word, severity_for, Signals};
use crate::config::ScanConfig;
use crate::dom::{ComputedStyle, Document, Element, StyleSheet};
use crate::finding::{Finding, FindingType};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Elements considered by the scan, in document order
pub const CANDIDATE_SELECTOR: &str =
    "button,a,input,select,textarea,form,div,span,[role='button']";

/// Attributes summarised into the risk-word haystack
pub const SUMMARY_ATTRIBUTES: &[&str] = &[
    "id",
    "name",
    "type",
    "data-testid",
    "class",
    "aria-disabled",
    "href",
    "title",
    "aria-label",
];

pub const EVIDENCE_MAX_CHARS: usize = 420;

pub const FINDING_TITLE: &str = "Client-side disabled/hidden control found in rendered DOM";

/// Result of scanning one document
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Document URL, empty when unknown
    pub url: String,
    /// Findings in document order, capped at `ScanConfig::max_findings`
    pub findings: Vec<Finding>,
    /// Elements matched by the candidate selector
    pub candidates: usize,
    /// Matches before the cap was applied
    pub total_matches: usize,
}

impl ScanReport {
    pub fn truncated(&self) -> bool {
        self.total_matches > self.findings.len()
    }
}

/// Scans a parsed document for actionable controls that are disabled or
/// hidden on the client only
#[derive(Debug, Clone, Default)]
pub struct DomScanner {
    config: ScanConfig,
}

impl DomScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn scan(&self, doc: &Document) -> ScanReport {
        let url = doc.url_string().unwrap_or_default();
        let sheet = if self.config.use_stylesheets {
            StyleSheet::from_document(doc)
        } else {
            StyleSheet::default()
        };

        let candidates = doc.query_selector_all(CANDIDATE_SELECTOR);
        let mut report = ScanReport {
            url: url.clone(),
            candidates: candidates.len(),
            ..Default::default()
        };

        for el in &candidates {
            let style = sheet.computed_style(el);
            let Some(finding) = inspect(el, &style, &url) else {
                continue;
            };
            report.total_matches += 1;
            if report.findings.len() < self.config.max_findings {
                report.findings.push(finding);
            }
        }

        tracing::debug!(
            url = %report.url,
            candidates = report.candidates,
            matches = report.total_matches,
            "DOM scan finished"
        );
        report
    }
}

/// Score one element; `None` when it is not a suspect control
pub fn inspect(el: &Element, style: &ComputedStyle, url: &str) -> Option<Finding> {
    let actionable = is_actionable(el);
    let disabled = is_disabled(el);
    let hidden = is_hidden(el, style);
    if !actionable || !(disabled || hidden) {
        return None;
    }

    let attrs = attribute_summary(el);
    let text = visible_text(el);
    let signals = Signals {
        disabled,
        hidden,
        actionable,
        risky: mentions_risk_word(&format!("{} {}", attrs, text)),
    };
    let confidence = signals.confidence();

    let mut evidence = collapse_whitespace(&el.outer_html());
    if let Some((cut, _)) = evidence.char_indices().nth(EVIDENCE_MAX_CHARS) {
        evidence.truncate(cut);
    }
    if evidence.is_empty() {
        evidence = format!("{} text=\"{}\"", attrs, text);
    }

    Some(
        Finding::new(FindingType::HiddenOrDisabledControl, url)
            .severity(severity_for(confidence))
            .confidence(confidence)
            .title(FINDING_TITLE)
            .summary(format!(
                "Detected an actionable element that is {} on the client side.",
                signals.state_label()
            ))
            .evidence(evidence),
    )
}

/// `id="..." name="..." ...` over [`SUMMARY_ATTRIBUTES`], missing values empty
pub fn attribute_summary(el: &Element) -> String {
    SUMMARY_ATTRIBUTES
        .iter()
        .map(|k| format!("{}=\"{}\"", k, el.attr_or_empty(k)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rendered text, falling back to text content then the form value
fn visible_text(el: &Element) -> String {
    let text = Some(el.inner_text())
        .filter(|t| !t.is_empty())
        .or_else(|| Some(el.text_content()).filter(|t| !t.is_empty()))
        .or_else(|| el.value())
        .unwrap_or_default();
    collapse_whitespace(&text).trim().to_string()
}

fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html_with_url;
    use crate::finding::Severity;
    use url::Url;

    fn scan(html: &str) -> ScanReport {
        let doc = parse_html_with_url(html, Url::parse("https://app.test/admin").ok()).unwrap();
        DomScanner::default().scan(&doc)
    }

    #[test]
    fn test_disabled_risky_button() {
        let report = scan(r#"<button id="btnDelete" disabled>Delete user</button>"#);
        assert_eq!(report.findings.len(), 1);

        let f = &report.findings[0];
        // 45 + 15 disabled + 10 actionable + 15 risk word
        assert_eq!(f.confidence, 85);
        assert_eq!(f.severity, Severity::High);
        assert_eq!(f.url, "https://app.test/admin");
        assert_eq!(f.title, FINDING_TITLE);
        assert_eq!(
            f.summary,
            "Detected an actionable element that is disabled on the client side."
        );
        assert_eq!(f.evidence, r#"<button id="btnDelete" disabled="">Delete user</button>"#);
    }

    #[test]
    fn test_evidence_keeps_inter_tag_whitespace() {
        let report = scan("<button disabled>\n  <b>Re</b>\n  <i>ject</i>\n</button>");
        let f = &report.findings[0];
        assert_eq!(f.evidence, r#"<button disabled=""> <b>Re</b> <i>ject</i> </button>"#);
        assert!(f.evidence.len() < EVIDENCE_MAX_CHARS);
        let el = parse_html_with_url("<button>\n  <b>Re</b>\n  <i>ject</i>\n</button>", None)
            .unwrap()
            .query_selector("button")
            .unwrap();
        assert_eq!(visible_text(&el), "Re ject");
    }

    #[test]
    fn test_deeply_nested_hidden_control() {
        let depth = 5_000;
        let html = format!(
            "<div style=\"visibility:hidden\">{}<button>Delete</button>{}</div>",
            "<span>".repeat(depth),
            "</span>".repeat(depth)
        );
        let report = scan(&html);
        assert_eq!(report.candidates, depth + 2);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].confidence, 80);
        assert_eq!(report.findings[0].evidence, "<button>Delete</button>");
    }

    #[test]
    fn test_hidden_plain_link() {
        // "aria-disabled" is part of the attribute summary, so the risk-word
        // bonus applies even to a harmless link
        let report = scan(r#"<a href="/next" style="display:none">Next page</a>"#);
        let f = &report.findings[0];
        assert_eq!(f.confidence, 80);
        assert_eq!(f.severity, Severity::Medium);
        assert!(f.summary.contains("is hidden on"));
    }

    #[test]
    fn test_disabled_and_hidden_capped() {
        let report =
            scan(r#"<button class="btn-disabled" hidden onclick="grantAdmin()">Grant</button>"#);
        let f = &report.findings[0];
        assert_eq!(f.confidence, 95);
        assert!(f.summary.contains("disabled and hidden"));
    }

    #[test]
    fn test_non_actionable_or_visible_skipped() {
        let report = scan(
            r#"<div style="display:none">Admin panel</div>
               <input type="text" disabled value="x">
               <button>Save</button>"#,
        );
        assert!(report.findings.is_empty());
        assert!(report.candidates >= 3);
    }

    #[test]
    fn test_stylesheet_rules_apply() {
        let html = r#"<style>.admin-only { visibility: hidden }</style>
            <div class="admin-only"><a href="/admin/export">Export</a></div>"#;
        let report = scan(html);
        assert_eq!(report.findings.len(), 1);
        assert!(report.findings[0].evidence.starts_with("<a href=\"/admin/export\""));

        let doc = parse_html_with_url(html, None).unwrap();
        let inline_only = DomScanner::new(ScanConfig::inline_styles_only()).scan(&doc);
        assert!(inline_only.findings.is_empty());
        assert_eq!(inline_only.url, "");
    }

    #[test]
    fn test_hidden_attribute_not_inherited() {
        let report = scan(
            r#"<form action="/save" hidden><span role="button">Save</span></form>"#,
        );
        assert_eq!(report.findings.len(), 1);
        assert!(report.findings[0].evidence.starts_with("<form"));
    }

    #[test]
    fn test_cap_and_order() {
        let mut html = String::new();
        for i in 0..60 {
            html.push_str(&format!(r#"<button id="b{}" disabled>x</button>"#, i));
        }
        let report = scan(&html);
        assert_eq!(report.findings.len(), 50);
        assert_eq!(report.total_matches, 60);
        assert!(report.truncated());
        assert!(report.findings[0].evidence.contains("id=\"b0\""));
        assert!(report.findings[49].evidence.contains("id=\"b49\""));

        let doc = parse_html_with_url(&html, None).unwrap();
        let small = DomScanner::new(ScanConfig::new().max_findings(5)).scan(&doc);
        assert_eq!(small.findings.len(), 5);
    }

    #[test]
    fn test_evidence_collapsed_and_truncated() {
        let long = "a".repeat(600);
        let html = format!("<button disabled\n\n   title=\"{}\">\n  Go\n</button>", long);
        let f = &scan(&html).findings[0];
        assert_eq!(f.evidence.chars().count(), EVIDENCE_MAX_CHARS);
        assert!(!f.evidence.contains('\n'));
    }

    #[test]
    fn test_attribute_summary() {
        let doc = parse_html_with_url(r#"<a id="x" class="c" href="/h">t</a>"#, None).unwrap();
        let el = doc.query_selector("a").unwrap();
        assert_eq!(
            attribute_summary(&el),
            r#"id="x" name="" type="" data-testid="" class="c" aria-disabled="" href="/h" title="" aria-label="""#
        );
    }

    #[test]
    fn test_visible_text_falls_back_to_value() {
        let doc = parse_html_with_url(
            r#"<input type="submit" value="  Approve   all ">
               <button> <b>Re</b>ject
               now</button>"#,
            None,
        )
        .unwrap();
        let input = doc.query_selector("input").unwrap();
        assert_eq!(visible_text(&input), "Approve all");
        let button = doc.query_selector("button").unwrap();
        assert_eq!(visible_text(&button), "Reject now");
    }
}
