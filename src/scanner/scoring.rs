// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Additive confidence score and severity buckets

use lazy_static::lazy_static;
use regex::Regex;

use crate::finding::Severity;

lazy_static! {
    /// Vocabulary of privileged actions
    static ref RISK_WORDS: Regex = Regex::new(
        r"(?i)(save|submit|delete|remove|admin|role|permission|approve|reject|reset|unlock|disable|enable|export|import|grant|revoke|token|key)"
    )
    .unwrap();
}

pub const BASE_CONFIDENCE: u8 = 45;
pub const DISABLED_BONUS: u8 = 15;
pub const HIDDEN_BONUS: u8 = 10;
pub const ACTIONABLE_BONUS: u8 = 10;
pub const RISK_WORD_BONUS: u8 = 15;
pub const MAX_CONFIDENCE: u8 = 100;

/// Signals collected for one element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    pub disabled: bool,
    pub hidden: bool,
    pub actionable: bool,
    pub risky: bool,
}

impl Signals {
    /// Additive confidence, capped at 100
    pub fn confidence(&self) -> u8 {
        let mut conf = BASE_CONFIDENCE as u16;
        if self.disabled {
            conf += DISABLED_BONUS as u16;
        }
        if self.hidden {
            conf += HIDDEN_BONUS as u16;
        }
        if self.actionable {
            conf += ACTIONABLE_BONUS as u16;
        }
        if self.risky {
            conf += RISK_WORD_BONUS as u16;
        }
        conf.min(MAX_CONFIDENCE as u16) as u8
    }

    /// "disabled and hidden" / "disabled" / "hidden"
    pub fn state_label(&self) -> &'static str {
        match (self.disabled, self.hidden) {
            (true, true) => "disabled and hidden",
            (true, false) => "disabled",
            _ => "hidden",
        }
    }
}

/// Does the text mention a privileged action?
pub fn mentions_risk_word(text: &str) -> bool {
    RISK_WORDS.is_match(text)
}

/// Three-tier bucket: >=85 HIGH, >=60 MEDIUM, else LOW
pub fn severity_for(confidence: u8) -> Severity {
    if confidence >= 85 {
        Severity::High
    } else if confidence >= 60 {
        Severity::Medium
    } else {
        Severity::Low
    }
}
