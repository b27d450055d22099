// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Passive analysis of served HTML
//!
//! Looks at a response body as delivered, before any script runs:
//! - password values rendered into `<input type=password>`
//! - hidden/disabled controls, scored by how privileged they look
//! - role/permission vocabulary
//! - inline scripts carrying secret-looking values
//! - inline anti-DevTools code

mod controls;
mod scripts;

pub use controls::{is_control, score_control, start_tag, ControlScore, GateState};
pub use scripts::{devtools_signals, looks_secretish};

use lazy_static::lazy_static;
use regex::Regex;

use crate::dom::{parse_html, Document, Element};
use crate::error::Result;
use crate::finding::{dedupe, Finding, FindingType, Severity};

lazy_static! {
    static ref ROLE_HINT: Regex =
        Regex::new(r"(?is)\b(role|permission|authorize|isadmin|is_admin|acl|rbac|privilege)\b")
            .unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Inline scripts reported per page, per finding type
pub const MAX_SCRIPT_FINDINGS: usize = 3;

/// Whitespace-collapsed, trimmed, cut to `max` chars with a trailing "…"
pub fn shrink(s: &str, max: usize) -> String {
    let collapsed = WHITESPACE.replace_all(s, " ");
    let collapsed = collapsed.trim();
    match collapsed.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", &collapsed[..cut]),
        None => collapsed.to_string(),
    }
}

/// Passive HTML analyzer
#[derive(Debug, Clone)]
pub struct HtmlAnalyzer {
    max_script_findings: usize,
}

impl Default for HtmlAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlAnalyzer {
    pub fn new() -> Self {
        Self {
            max_script_findings: MAX_SCRIPT_FINDINGS,
        }
    }

    pub fn max_script_findings(mut self, max: usize) -> Self {
        self.max_script_findings = max;
        self
    }

    /// Analyze the HTML served at `url`. Blank input yields no findings.
    pub fn analyze(&self, url: &str, html: &str) -> Result<Vec<Finding>> {
        if html.trim().is_empty() {
            return Ok(Vec::new());
        }
        let doc = parse_html(html)?;
        let mut out = Vec::new();

        self.find_password_values(&doc, url, &mut out);
        self.find_gated_controls(&doc, url, &mut out);
        self.find_role_hints(html, url, &mut out);

        let inline_scripts: Vec<String> = doc
            .scripts()
            .iter()
            .filter(|s| !s.has_attribute("src"))
            .map(Element::text_content)
            .filter(|body| !body.trim().is_empty())
            .collect();
        self.find_secretish_scripts(&inline_scripts, url, &mut out);
        self.find_devtools_blocking(&inline_scripts, url, &mut out);

        let out = dedupe(out);
        tracing::debug!(url, findings = out.len(), "passive analysis finished");
        Ok(out)
    }

    fn find_password_values(&self, doc: &Document, url: &str, out: &mut Vec<Finding>) {
        for input in doc.query_selector_all("input") {
            if !input.attr_or_empty("type").trim().eq_ignore_ascii_case("password") {
                continue;
            }
            let Some(value) = input.get_attribute("value") else {
                continue;
            };
            let value = value.trim();
            let confidence = if value.is_empty() {
                70
            } else if value.eq_ignore_ascii_case("password") || value == "********" {
                75
            } else {
                95
            };

            out.push(
                Finding::new(FindingType::PasswordValueInDom, url)
                    .severity(Severity::High)
                    .confidence(confidence)
                    .title("Password value present in HTML")
                    .summary("An <input type=\"password\"> includes a value attribute in the HTML. Users can reveal it via DevTools or intercepting proxies.")
                    .evidence(shrink(&input.outer_html(), 400)),
            );
        }
    }

    fn find_gated_controls(&self, doc: &Document, url: &str, out: &mut Vec<Finding>) {
        for el in doc.query_selector_all(controls::CONTROL_SELECTOR) {
            let state = GateState::of(&el);
            if !state.is_gated() || !is_control(&el) {
                continue;
            }

            let score = score_control(&el);
            let signals = if score.reasons.is_empty() {
                String::new()
            } else {
                format!(" Signals: {}.", score.reasons.join(", "))
            };

            out.push(
                Finding::new(FindingType::HiddenOrDisabledControl, url)
                    .severity(score.severity())
                    .confidence(score.confidence)
                    .title(format!("Client-side {} control present in HTML", state.label()))
                    .summary(format!(
                        "An interactive control is present in the HTML but is {} on the client side. If server-side authorization is missing, users may be able to enable/trigger privileged actions.{}",
                        state.label(),
                        signals
                    ))
                    .evidence(shrink(&el.outer_html(), 420)),
            );
        }
    }

    fn find_role_hints(&self, html: &str, url: &str, out: &mut Vec<Finding>) {
        let Some(caps) = ROLE_HINT.captures(html) else {
            return;
        };
        out.push(
            Finding::new(FindingType::RolePermissionHint, url)
                .severity(Severity::Info)
                .confidence(35)
                .title("Role/permission hints found in HTML/JS")
                .summary("The page contains role/permission-related keywords. This may help locate authorization logic or UI gating, but is not necessarily a vulnerability on its own.")
                .evidence(format!("Matched keyword: {}", &caps[1])),
        );
    }

    fn find_secretish_scripts(&self, scripts: &[String], url: &str, out: &mut Vec<Finding>) {
        for body in scripts
            .iter()
            .filter(|b| looks_secretish(b))
            .take(self.max_script_findings)
        {
            out.push(
                Finding::new(FindingType::InlineScriptSecretish, url)
                    .severity(Severity::Low)
                    .confidence(30)
                    .title("Potential secret-like value in inline script")
                    .summary("The page contains inline script content that looks like it may include credentials/tokens/keys. This is heuristic and can generate false positives.")
                    .evidence(shrink(body, 420)),
            );
        }
    }

    fn find_devtools_blocking(&self, scripts: &[String], url: &str, out: &mut Vec<Finding>) {
        let flagged = scripts
            .iter()
            .map(|b| (b, devtools_signals(b)))
            .filter(|(_, signals)| !signals.is_empty())
            .take(self.max_script_findings);

        for (body, signals) in flagged {
            out.push(
                Finding::new(FindingType::DevtoolsBlocking, url)
                    .severity(Severity::Low)
                    .confidence(40)
                    .title("Anti-DevTools logic in inline script")
                    .summary(format!(
                        "Inline script tries to detect or obstruct browser developer tools ({}). This hinders inspection but does not protect client-side logic.",
                        signals.join(", ")
                    ))
                    .evidence(shrink(body, 420)),
            );
        }
    }
}
