// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Style resolution for visibility checks
//!
//! Resolves the three properties that decide whether a control is visually
//! suppressed (`display`, `visibility`, `opacity`) from inline `style`
//! attributes and the document's own `<style>` blocks. External stylesheets
//! and media queries are not evaluated.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::document::Document;
use super::element::Element;
use super::node::NodeId;
use super::selector::{SelectorList, Specificity};

/// Properties tracked by the cascade
const TRACKED: &[&str] = &["display", "visibility", "opacity"];

/// One `property: value` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

/// Parsed declaration block (`display:none; opacity: 0 !important`)
#[derive(Debug, Clone, Default)]
pub struct StyleDeclarations {
    declarations: Vec<Declaration>,
}

impl StyleDeclarations {
    /// Parse a declaration block. Malformed entries are skipped.
    pub fn parse(block: &str) -> Self {
        let declarations = split_declarations(block)
            .into_iter()
            .filter_map(|decl| {
                let (prop, value) = decl.split_once(':')?;
                let property = prop.trim().to_lowercase();
                if property.is_empty() {
                    return None;
                }
                let value = value.trim().to_lowercase();
                let (value, important) = match value.strip_suffix("!important") {
                    Some(rest) => (rest.trim_end().to_string(), true),
                    None => (value, false),
                };
                if value.is_empty() {
                    return None;
                }
                Some(Declaration {
                    property,
                    value,
                    important,
                })
            })
            .collect();
        Self { declarations }
    }

    /// Last declaration for a property, preferring `!important` ones
    pub fn get(&self, property: &str) -> Option<&Declaration> {
        let mut found: Option<&Declaration> = None;
        for decl in self.declarations.iter().filter(|d| d.property == property) {
            match found {
                Some(prev) if prev.important && !decl.important => {}
                _ => found = Some(decl),
            }
        }
        found
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }
}

/// A `selectors { declarations }` rule from a `<style>` block
#[derive(Debug, Clone)]
struct StyleRule {
    selectors: SelectorList,
    declarations: StyleDeclarations,
    order: usize,
}

/// Rules collected from every `<style>` element of a document
#[derive(Debug, Default)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
    /// Resolved `visibility` per element, filled while styling
    visibility: Mutex<HashMap<NodeId, String>>,
}

impl Clone for StyleSheet {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            visibility: Mutex::default(),
        }
    }
}

impl StyleSheet {
    /// Collect the document's embedded style rules
    pub fn from_document(doc: &Document) -> Self {
        let mut sheet = Self::default();
        for style in doc.query_selector_all("style") {
            if style.ancestors().any(|a| a.local_name() == "template") {
                continue;
            }
            sheet.add_source(&style.text_content());
        }
        tracing::debug!(rules = sheet.rules.len(), "collected embedded style rules");
        sheet
    }

    /// Parse CSS text and append its rules
    pub fn add_source(&mut self, css: &str) {
        self.visibility.lock().clear();
        let css = strip_comments(css);
        let mut rest = css.as_str();

        while let Some(open) = rest.find('{') {
            let prelude = rest[..open].trim();
            let Some(close) = matching_brace(rest, open) else {
                break;
            };
            let body = &rest[open + 1..close];
            rest = &rest[close + 1..];

            // At-rules (@media, @keyframes, @font-face ...) are not evaluated
            if prelude.starts_with('@') || prelude.is_empty() {
                continue;
            }

            let declarations = StyleDeclarations::parse(body);
            if !declarations.iter().any(|d| TRACKED.contains(&d.property.as_str())) {
                continue;
            }

            match SelectorList::parse(prelude) {
                Ok(selectors) => {
                    let order = self.rules.len();
                    self.rules.push(StyleRule {
                        selectors,
                        declarations,
                        order,
                    });
                }
                Err(e) => tracing::debug!(selector = prelude, error = %e, "skipping style rule"),
            }
        }
    }

    /// Number of rules that touch a tracked property
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve the computed style of an element
    pub fn computed_style(&self, element: &Element) -> ComputedStyle {
        let display = self
            .cascaded(element, "display")
            .filter(|v| !is_global_keyword(v))
            .unwrap_or_else(|| default_display(&element.local_name()).to_string());

        let visibility = self.visibility(element);

        let opacity = self
            .cascaded(element, "opacity")
            .and_then(|v| normalize_opacity(&v))
            .unwrap_or_else(|| "1".to_string());

        ComputedStyle {
            display,
            visibility,
            opacity,
        }
    }

    /// Inherited `visibility`: walk up until an element declares one
    fn visibility(&self, element: &Element) -> String {
        let mut chain = Vec::new();
        let mut current = Some(element.clone());
        let mut resolved = "visible".to_string();

        while let Some(el) = current {
            if let Some(known) = self.visibility.lock().get(&el.node.id) {
                resolved = known.clone();
                break;
            }
            chain.push(el.node.id);
            match self.cascaded(&el, "visibility") {
                Some(v) if !is_global_keyword(&v) => {
                    resolved = v;
                    break;
                }
                Some(v) if v == "initial" => break,
                _ => current = el.parent_element(),
            }
        }

        let mut memo = self.visibility.lock();
        for id in chain {
            memo.insert(id, resolved.clone());
        }
        resolved
    }

    /// Winning declared value for one property: stylesheet rules ordered by
    /// specificity then source order, inline style above normal rules,
    /// `!important` above everything normal.
    fn cascaded(&self, element: &Element, property: &str) -> Option<String> {
        // (important, origin 0=sheet/1=inline, specificity, order)
        let mut best: Option<((bool, u8, Specificity, usize), String)> = None;
        let mut consider = |key: (bool, u8, Specificity, usize), value: &str| {
            if best.as_ref().map(|(k, _)| key >= *k).unwrap_or(true) {
                best = Some((key, value.to_string()));
            }
        };

        for rule in &self.rules {
            let Some(decl) = rule.declarations.get(property) else {
                continue;
            };
            if let Some(spec) = rule.selectors.matching_specificity(element) {
                consider((decl.important, 0, spec, rule.order), &decl.value);
            }
        }

        if let Some(inline) = element.get_attribute("style") {
            let inline = StyleDeclarations::parse(&inline);
            if let Some(decl) = inline.get(property) {
                consider(
                    (decl.important, 1, Specificity::default(), usize::MAX),
                    &decl.value,
                );
            }
        }

        best.map(|(_, v)| v)
    }
}

/// The resolved values the hidden-state check looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedStyle {
    pub display: String,
    pub visibility: String,
    /// Serialized like `getComputedStyle().opacity` ("0", "0.5", "1")
    pub opacity: String,
}

impl ComputedStyle {
    /// Convenience for inline-only resolution (no stylesheet)
    pub fn of(element: &Element) -> Self {
        StyleSheet::default().computed_style(element)
    }
}

fn is_global_keyword(value: &str) -> bool {
    matches!(value, "inherit" | "initial" | "unset" | "revert")
}

fn default_display(tag: &str) -> &'static str {
    match tag {
        "head" | "script" | "style" | "template" | "title" | "meta" | "link" | "base" => "none",
        "div" | "form" | "p" | "section" | "nav" | "header" | "footer" | "main" | "ul"
        | "ol" | "fieldset" | "body" | "html" => "block",
        "li" => "list-item",
        "button" | "select" | "textarea" | "input" => "inline-block",
        _ => "inline",
    }
}

fn normalize_opacity(value: &str) -> Option<String> {
    let value = value.trim();
    let number = match value.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f64>().ok()? / 100.0,
        None => value.parse::<f64>().ok()?,
    };
    let clamped = number.clamp(0.0, 1.0);
    Some(format!("{}", clamped))
}

/// Split a declaration block on `;` outside parentheses and quotes
fn split_declarations(block: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    for c in block.chars() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            current.push(c);
            continue;
        }
        match c {
            '"' | '\'' => {
                quote = Some(c);
                current.push(c);
            }
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth -= 1;
                current.push(c);
            }
            ';' if depth <= 0 => out.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    out.push(current);
    out.retain(|d| !d.trim().is_empty());
    out
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => {
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Index of the `}` closing the `{` at `open`, honouring nesting
fn matching_brace(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_parse_declarations() {
        let decls = StyleDeclarations::parse("display:none; Opacity: 0 !IMPORTANT;; color: red");
        assert_eq!(decls.get("display").unwrap().value, "none");
        let opacity = decls.get("opacity").unwrap();
        assert_eq!(opacity.value, "0");
        assert!(opacity.important);
        assert!(decls.get("visibility").is_none());
    }

    #[test]
    fn test_important_wins_within_block() {
        let decls = StyleDeclarations::parse("display: none !important; display: block");
        assert_eq!(decls.get("display").unwrap().value, "none");
    }

    #[test]
    fn test_inline_style() {
        let doc = parse_html(r#"<button style="visibility: hidden">x</button>"#).unwrap();
        let style = ComputedStyle::of(&doc.query_selector("button").unwrap());
        assert_eq!(style.visibility, "hidden");
        assert_eq!(style.display, "inline-block");
        assert_eq!(style.opacity, "1");
    }

    #[test]
    fn test_stylesheet_rules_and_specificity() {
        let html = r#"
            <style>
              /* admin-only controls */
              .admin-only { display: none }
              #keep.admin-only { display: inline }
              @media print { button { display: none } }
              a:hover { opacity: 0 }
            </style>
            <button class="admin-only" id="hide">Delete</button>
            <button class="admin-only" id="keep">Export</button>
            <a href="/x">x</a>
        "#;
        let doc = parse_html(html).unwrap();
        let sheet = StyleSheet::from_document(&doc);
        assert_eq!(sheet.len(), 3);

        let hide = doc.get_element_by_id("hide").unwrap();
        let keep = doc.get_element_by_id("keep").unwrap();
        let link = doc.query_selector("a").unwrap();
        assert_eq!(sheet.computed_style(&hide).display, "none");
        assert_eq!(sheet.computed_style(&keep).display, "inline");
        assert_eq!(sheet.computed_style(&link).opacity, "1");
    }

    #[test]
    fn test_inline_beats_sheet_unless_important() {
        let html = r#"
            <style>
              .a { display: none }
              .b { display: none !important }
            </style>
            <span class="a" style="display:block">a</span>
            <span class="b" style="display:block">b</span>
        "#;
        let doc = parse_html(html).unwrap();
        let sheet = StyleSheet::from_document(&doc);
        let spans = doc.query_selector_all("span");
        assert_eq!(sheet.computed_style(&spans[0]).display, "block");
        assert_eq!(sheet.computed_style(&spans[1]).display, "none");
    }

    #[test]
    fn test_visibility_inherits_but_display_does_not() {
        let html = r#"
            <div style="visibility:hidden; display:none">
              <button id="child">x</button>
              <button id="shown" style="visibility: visible">y</button>
            </div>
        "#;
        let doc = parse_html(html).unwrap();
        let sheet = StyleSheet::from_document(&doc);
        let child = sheet.computed_style(&doc.get_element_by_id("child").unwrap());
        assert_eq!(child.visibility, "hidden");
        assert_eq!(child.display, "inline-block");
        let shown = sheet.computed_style(&doc.get_element_by_id("shown").unwrap());
        assert_eq!(shown.visibility, "visible");
    }

    #[test]
    fn test_important_after_non_ascii_value() {
        // U+212A lower-cases to a shorter 'k'
        let decls = StyleDeclarations::parse("display: \u{212A}\u{212A}!important; opacity: 0 !Important");
        let display = decls.get("display").unwrap();
        assert_eq!(display.value, "kk");
        assert!(display.important);
        assert!(decls.get("opacity").unwrap().important);

        let doc = parse_html(
            "<button disabled style=\"display: \u{212A}\u{212A}!important\">x</button>",
        )
        .unwrap();
        let style = ComputedStyle::of(&doc.query_selector("button").unwrap());
        assert_eq!(style.display, "kk");
    }

    #[test]
    fn test_visibility_through_deep_nesting() {
        let depth = 10_000;
        let html = format!(
            "<div style=\"visibility:hidden\">{}<button id=\"deep\">x</button>{}</div>",
            "<span>".repeat(depth),
            "</span>".repeat(depth)
        );
        let doc = parse_html(&html).unwrap();
        let sheet = StyleSheet::from_document(&doc);

        let spans = doc.query_selector_all("span");
        assert_eq!(sheet.computed_style(&spans[depth / 2]).visibility, "hidden");
        let deep = doc.get_element_by_id("deep").unwrap();
        assert_eq!(sheet.computed_style(&deep).visibility, "hidden");
        assert_eq!(sheet.clone().computed_style(&deep).visibility, "hidden");
    }

    #[test]
    fn test_opacity_normalization() {
        assert_eq!(normalize_opacity("0.0").as_deref(), Some("0"));
        assert_eq!(normalize_opacity("0%").as_deref(), Some("0"));
        assert_eq!(normalize_opacity("50%").as_deref(), Some("0.5"));
        assert_eq!(normalize_opacity("2").as_deref(), Some("1"));
        assert_eq!(normalize_opacity("abc"), None);
    }
}
