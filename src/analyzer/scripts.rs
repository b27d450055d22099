// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Inline script heuristics: embedded secrets and anti-DevTools code

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LONG_TOKEN: Regex =
        Regex::new(r"(?i)\b([a-z0-9+/]{30,}={0,2}|[a-f0-9]{32,})\b").unwrap();
    static ref DEBUGGER_LOOP: Regex = Regex::new(
        r"(?is)\b(setInterval|setTimeout|requestAnimationFrame)\b.{0,200}?\bdebugger\b"
    )
    .unwrap();
    static ref DEBUGGER_CONSTRUCTOR: Regex =
        Regex::new(r#"(?i)constructor\s*\(\s*["']debugger["']\s*\)"#).unwrap();
    static ref WINDOW_SIZE_PROBE: Regex = Regex::new(
        r"(?is)outer(Width|Height).{0,60}?inner(Width|Height)|inner(Width|Height).{0,60}?outer(Width|Height)"
    )
    .unwrap();
    static ref DEVTOOLS_MARKER: Regex = Regex::new(
        r"(?i)devtools-?detect|devtoolschange|disable-devtool|isdevtoolsopen|devtools\s*\.\s*(isopen|open)\b"
    )
    .unwrap();
}

const SECRET_WORDS: &[&str] = &["apikey", "api_key", "secret", "token", "bearer"];

/// Credential-looking words or a long base64/hex literal
pub fn looks_secretish(body: &str) -> bool {
    let lower = body.to_lowercase();
    SECRET_WORDS.iter().any(|w| lower.contains(w)) || LONG_TOKEN.is_match(body)
}

/// Anti-debugging signals present in a script body
pub fn devtools_signals(body: &str) -> Vec<&'static str> {
    let mut signals = Vec::new();
    if DEBUGGER_LOOP.is_match(body) || DEBUGGER_CONSTRUCTOR.is_match(body) {
        signals.push("debugger trap");
    }
    if WINDOW_SIZE_PROBE.is_match(body) {
        signals.push("window size comparison");
    }
    if DEVTOOLS_MARKER.is_match(body) {
        signals.push("devtools detection marker");
    }
    signals
}
