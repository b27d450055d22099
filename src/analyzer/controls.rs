// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Triage of hidden/disabled controls found in served HTML

use crate::dom::{Element, StyleDeclarations};
use crate::finding::Severity;

/// Keywords that often correlate with privileged actions
const RISK_KEYWORDS: &[&str] = &[
    "delete",
    "remove",
    "admin",
    "role",
    "permission",
    "privilege",
    "approve",
    "reject",
    "reset",
    "unlock",
    "disable",
    "enable",
    "export",
    "import",
    "service",
    "serviceaccount",
    "account",
    "sudo",
    "elevat",
    "impersonat",
    "grant",
    "revoke",
    "token",
    "key",
];

const EVENT_HANDLERS: &[&str] = &["onclick", "onmousedown", "onmouseup", "onchange"];

/// `<input>` types treated as controls
const CONTROL_INPUT_TYPES: &[&str] = &["", "submit", "button", "image", "password", "reset"];

pub(crate) const CONTROL_SELECTOR: &str = "button,a,input,[role='button']";

/// Client-side gating signals of one element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateState {
    pub hidden: bool,
    pub disabled: bool,
}

impl GateState {
    pub fn of(el: &Element) -> Self {
        let style = StyleDeclarations::parse(&el.attr_or_empty("style"));
        let declared = |prop: &str| {
            style
                .get(prop)
                .map(|d| d.value.to_lowercase())
                .unwrap_or_default()
        };
        let opacity_zero = declared("opacity")
            .trim_end_matches('%')
            .parse::<f64>()
            .map(|v| v == 0.0)
            .unwrap_or(false);

        Self {
            hidden: el.has_attribute("hidden")
                || declared("display") == "none"
                || declared("visibility") == "hidden"
                || opacity_zero,
            disabled: el.has_attribute("disabled")
                || el.get_attribute("aria-disabled").as_deref() == Some("true"),
        }
    }

    pub fn is_gated(&self) -> bool {
        self.hidden || self.disabled
    }

    /// "hidden", "disabled" or "hidden & disabled"
    pub fn label(&self) -> &'static str {
        match (self.hidden, self.disabled) {
            (true, true) => "hidden & disabled",
            (true, false) => "hidden",
            _ => "disabled",
        }
    }
}

/// Is this candidate interactive enough to report?
pub fn is_control(el: &Element) -> bool {
    if el.local_name() != "input" {
        return true;
    }
    let input_type = el.attr_or_empty("type").trim().to_lowercase();
    CONTROL_INPUT_TYPES.contains(&input_type.as_str())
}

/// Confidence with the signals that contributed to it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlScore {
    pub confidence: u8,
    pub reasons: Vec<&'static str>,
}

impl ControlScore {
    pub fn severity(&self) -> Severity {
        match self.confidence {
            85..=u8::MAX => Severity::High,
            60..=84 => Severity::Medium,
            35..=59 => Severity::Low,
            _ => Severity::Info,
        }
    }
}

/// Baseline 25, raised by action, keyword and context signals
pub fn score_control(el: &Element) -> ControlScore {
    let mut conf: i32 = 25;
    let mut reasons = Vec::new();

    if EVENT_HANDLERS.iter().any(|h| el.has_attribute(h)) {
        conf += 35;
        reasons.push("event handler");
    }
    if el.has_attribute("href") {
        conf += 25;
        reasons.push("href");
    }
    if el.attr_or_empty("type").trim().eq_ignore_ascii_case("submit") {
        conf += 25;
        reasons.push("submit");
    }

    let blob = format!(
        "{} {} {} {} {}",
        el.attr_or_empty("id"),
        el.attr_or_empty("name"),
        el.attr_or_empty("value"),
        start_tag(el),
        el.inner_text()
    )
    .to_lowercase();

    let hits = RISK_KEYWORDS.iter().filter(|k| blob.contains(*k)).count() as i32;
    if hits > 0 {
        conf += (hits * 8).min(30);
        reasons.push("risky keyword(s)");
    }

    if ["btn", "ctl00", "cphmain"].iter().any(|k| blob.contains(k)) {
        conf += 5;
        reasons.push("webforms-ish id/name");
    }

    if el.has_attribute("formaction") || el.closest("form").is_some() {
        conf += 5;
        reasons.push("form context");
    }

    ControlScore {
        confidence: conf.clamp(0, 100) as u8,
        reasons,
    }
}

/// Opening tag as served, e.g. `<a href="/x" hidden="">`
pub fn start_tag(el: &Element) -> String {
    let mut tag = format!("<{}", el.local_name());
    for (name, value) in el.attributes() {
        tag.push_str(&format!(" {}=\"{}\"", name, value.replace('"', "&quot;")));
    }
    tag.push('>');
    tag
}
