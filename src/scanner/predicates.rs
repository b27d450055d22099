// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Element predicates: actionable, disabled, hidden

use lazy_static::lazy_static;
use regex::Regex;

use crate::dom::{ComputedStyle, Element};

lazy_static! {
    /// Class names frameworks use to fake a disabled state
    static ref DISABLED_CLASS: Regex =
        Regex::new(r"(?i)\b(disabled|pf-m-disabled|is-disabled|btn-disabled)\b").unwrap();
}

/// `<input>` types that submit, trigger or carry credentials
const ACTIONABLE_INPUT_TYPES: &[&str] = &["", "submit", "button", "image", "reset", "password"];

/// Does the element's tag or role imply it triggers navigation or an action?
pub fn is_actionable(el: &Element) -> bool {
    let tag = el.local_name();
    match tag.as_str() {
        "button" | "a" | "select" | "textarea" | "form" => return true,
        "input" => {
            let input_type = el.attr_or_empty("type").to_lowercase();
            return ACTIONABLE_INPUT_TYPES.contains(&input_type.as_str());
        }
        _ => {}
    }
    if el.get_attribute("role").as_deref() == Some("button") {
        return true;
    }
    !el.attr_or_empty("onclick").is_empty() || !el.attr_or_empty("formaction").is_empty()
}

/// Disabled through the `disabled` property, ARIA, or a disabled-looking class
pub fn is_disabled(el: &Element) -> bool {
    el.disabled()
        || el.get_attribute("aria-disabled").as_deref() == Some("true")
        || DISABLED_CLASS.is_match(&el.class_name())
}

/// Hidden through the `hidden` property or the resolved style
pub fn is_hidden(el: &Element, style: &ComputedStyle) -> bool {
    el.hidden() || style.display == "none" || style.visibility == "hidden" || style.opacity == "0"
}
