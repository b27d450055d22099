// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DevTools hints for locating and re-enabling a reported control
//!
//! Works on the evidence snippet alone, so it applies to scanner and
//! analyzer findings alike.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref TAG: Regex = Regex::new(r"(?is)<[^>]+>").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

const TEXT_MAX_CHARS: usize = 80;

/// Attributes lifted from an evidence snippet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct EvidenceAttrs {
    id: String,
    data_testid: String,
    name: String,
    aria_label: String,
    input_type: String,
    value: String,
    href: String,
    src: String,
    action: String,
    text: String,
}

impl EvidenceAttrs {
    fn parse(evidence: &str) -> Self {
        Self {
            id: extract_attr(evidence, "id"),
            data_testid: extract_attr(evidence, "data-testid"),
            name: extract_attr(evidence, "name"),
            aria_label: extract_attr(evidence, "aria-label"),
            input_type: extract_attr(evidence, "type"),
            value: extract_attr(evidence, "value"),
            href: extract_attr(evidence, "href"),
            src: extract_attr(evidence, "src"),
            action: extract_attr(evidence, "action"),
            text: inner_text(evidence),
        }
    }

    /// Most specific selector available, in priority order
    fn best_selector(&self) -> String {
        let attr = |name: &str, v: &str| format!("[{}=\"{}\"]", name, css_escape(v));

        if !self.id.trim().is_empty() {
            attr("id", &self.id)
        } else if !self.data_testid.trim().is_empty() {
            attr("data-testid", &self.data_testid)
        } else if !self.name.trim().is_empty() {
            attr("name", &self.name)
        } else if !self.aria_label.trim().is_empty() {
            attr("aria-label", &self.aria_label)
        } else if !self.input_type.trim().is_empty() {
            let t = css_escape(&self.input_type);
            if self.value.trim().is_empty() {
                format!("button[type=\"{}\"],input[type=\"{}\"]", t, t)
            } else {
                format!("input[type=\"{}\"][value=\"{}\"]", t, css_escape(&self.value))
            }
        } else if !self.href.trim().is_empty() {
            format!("a{}", attr("href", &self.href))
        } else if !self.src.trim().is_empty() {
            attr("src", &self.src)
        } else if !self.action.trim().is_empty() {
            format!("form{}", attr("action", &self.action))
        } else {
            String::new()
        }
    }
}

/// Selector, DevTools hints and a reveal snippet for one evidence snippet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FindHints {
    /// Empty when the snippet carries no usable attribute
    pub best_selector: String,
    pub hints: Vec<String>,
    /// Console snippet that un-hides and re-enables the element
    pub reveal_snippet: String,
}

impl FindHints {
    pub fn build(evidence: &str) -> Self {
        let attrs = EvidenceAttrs::parse(evidence);
        let best_selector = attrs.best_selector();
        let mut hints = Vec::new();

        if !best_selector.trim().is_empty() {
            let js_selector = js_double_quote_escape(&best_selector);
            hints.push(format!(
                "Console (Chrome/Firefox): inspect(document.querySelector(\"{}\"))",
                js_selector
            ));
            hints.push(format!(
                "Console (Chrome/Firefox): document.querySelector(\"{}\")?.scrollIntoView({{block:'center'}})",
                js_selector
            ));
            hints.push(format!(
                "Elements/Inspector search (Chrome/Firefox): {}",
                best_selector
            ));
        }

        for (label, value) in [
            ("id", &attrs.id),
            ("data-testid", &attrs.data_testid),
            ("name", &attrs.name),
            ("aria-label", &attrs.aria_label),
            ("href", &attrs.href),
        ] {
            if !value.trim().is_empty() {
                hints.push(format!("Inspector text: {}=\"{}\"", label, value));
            }
        }
        if !attrs.text.is_empty() {
            hints.push(format!("Inspector text: {}", attrs.text));
        }

        let term = search_term(evidence, &attrs);
        if !term.is_empty() {
            hints.push(format!("Search term (markup): {}", term));
        }
        if hints.is_empty() {
            hints.push(format!("Search term (markup): {}", collapse(evidence)));
        }

        let reveal_snippet = reveal_snippet(&best_selector, &attrs);
        Self {
            best_selector,
            hints,
            reveal_snippet,
        }
    }
}

fn reveal_snippet(best_selector: &str, attrs: &EvidenceAttrs) -> String {
    let text = js_single_quote_escape(&attrs.text);
    let input_type = js_single_quote_escape(&attrs.input_type);
    let testid = js_single_quote_escape(&attrs.data_testid);
    let testid_css = js_single_quote_escape(&css_escape(&attrs.data_testid));
    let type_css = js_single_quote_escape(&css_escape(&attrs.input_type));

    let mut js = String::new();
    if best_selector.trim().is_empty() {
        js.push_str("let el = null;\n");
    } else {
        js.push_str(&format!(
            "let el = document.querySelector(\"{}\");\n",
            js_double_quote_escape(best_selector)
        ));
    }
    js.push_str(&format!(
        "if (!el && '{}') el = document.querySelector('[data-testid=\"{}\"]');\n",
        testid, testid_css
    ));
    js.push_str(&format!("if (!el && '{}') {{\n", text));
    js.push_str(&format!("  const want = '{}'.toLowerCase();\n", text));
    js.push_str("  el = [...document.querySelectorAll('button,a,input,[role=\"button\"]')].find(n => ((n.innerText||n.textContent||n.value||'').trim().toLowerCase() === want));\n");
    js.push_str("}\n");
    js.push_str(&format!("if (!el && '{}') {{\n", input_type));
    js.push_str(&format!(
        "  el = document.querySelector('input[type=\"{}\"],button[type=\"{}\"]');\n",
        type_css, type_css
    ));
    js.push_str("}\n");
    js.push_str(
        "if (el) {
  el.hidden = false;
  el.removeAttribute('hidden');
  el.removeAttribute('aria-hidden');
  el.removeAttribute('aria-disabled');
  if ('disabled' in el) el.disabled = false;
  el.removeAttribute('disabled');
  if (el.classList) {
    el.classList.remove('pf-m-disabled','is-disabled','btn-disabled','disabled');
  }
  el.style.display = '';
  el.style.visibility = 'visible';
  el.style.opacity = '1';
  el.style.pointerEvents = 'auto';
  el.style.filter = '';
  el.scrollIntoView({block:'center'});
  console.log('[ClientSideEye] reveal target:', el);
} else {
  console.log('[ClientSideEye] reveal target not found. Try Elements search with data-testid/text hints.');
}
",
    );
    js
}

/// Value of `attr` in the snippet, quoted or unquoted; empty when absent
pub fn extract_attr(text: &str, attr: &str) -> String {
    let pattern = format!(
        r#"(?i)\b{}\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#,
        regex::escape(attr)
    );
    let Ok(re) = Regex::new(&pattern) else {
        return String::new();
    };
    re.captures(text)
        .and_then(|c| c.get(1).or_else(|| c.get(2)).or_else(|| c.get(3)))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Markup with tags removed, whitespace collapsed, first 80 chars
fn inner_text(evidence: &str) -> String {
    let stripped = TAG.replace_all(evidence, " ");
    truncate_chars(&collapse(&stripped), TEXT_MAX_CHARS)
}

/// Term to paste into a raw-markup search
fn search_term(evidence: &str, attrs: &EvidenceAttrs) -> String {
    for (label, value) in [
        ("data-testid", &attrs.data_testid),
        ("href", &attrs.href),
        ("src", &attrs.src),
        ("action", &attrs.action),
    ] {
        if !value.trim().is_empty() {
            return format!("{}=\"{}\"", label, value);
        }
    }
    truncate_chars(&collapse(evidence), TEXT_MAX_CHARS)
}

fn collapse(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn css_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn js_single_quote_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

fn js_double_quote_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_hints_for_id() {
        let result = FindHints::build(r#"<button id="save" disabled>Save</button>"#);

        assert_eq!(result.best_selector, r#"[id="save"]"#);
        assert!(result
            .hints
            .iter()
            .any(|h| h.contains(r#"document.querySelector("[id=\"save\"]")"#)));
        assert!(result
            .reveal_snippet
            .contains(r#"document.querySelector("[id=\"save\"]")"#));
        assert!(result.hints.contains(&"Inspector text: id=\"save\"".to_string()));
        assert!(result.hints.contains(&"Inspector text: Save".to_string()));
    }

    #[test]
    fn test_unquoted_href() {
        let result = FindHints::build("<a href=/admin/delete>Delete</a>");

        assert_eq!(result.best_selector, r#"a[href="/admin/delete"]"#);
        assert!(result.hints.iter().any(|h| h
            == r#"Elements/Inspector search (Chrome/Firefox): a[href="/admin/delete"]"#));
        assert!(result
            .hints
            .contains(&r#"Search term (markup): href="/admin/delete""#.to_string()));
    }

    #[test]
    fn test_data_testid_and_reveal() {
        let evidence = r#"<button data-testid="localization-tab-save" aria-disabled="true" class="pf-v5-c-button pf-m-primary pf-m-disabled" disabled="" type="submit">Save</button>"#;
        let result = FindHints::build(evidence);

        assert_eq!(result.best_selector, r#"[data-testid="localization-tab-save"]"#);
        assert!(result.hints.iter().any(|h| h
            .contains(r#"document.querySelector("[data-testid=\"localization-tab-save\"]")"#)));
        assert!(result
            .hints
            .iter()
            .any(|h| h.contains(r#"Inspector text: data-testid="localization-tab-save""#)));
        assert!(result
            .reveal_snippet
            .contains("el.removeAttribute('aria-disabled')"));
        assert!(result.reveal_snippet.contains("el.removeAttribute('disabled')"));
        assert!(result
            .reveal_snippet
            .contains("el.classList.remove('pf-m-disabled'"));
    }

    #[test]
    fn test_type_value_selector() {
        let result = FindHints::build(r#"<input type=submit value="Delete it">"#);
        assert_eq!(
            result.best_selector,
            r#"input[type="submit"][value="Delete it"]"#
        );
        let bare = FindHints::build(r#"<button type='reset'>x</button>"#);
        assert_eq!(
            bare.best_selector,
            r#"button[type="reset"],input[type="reset"]"#
        );
    }

    #[test]
    fn test_no_attributes() {
        let result = FindHints::build("<span>   </span>");
        assert_eq!(result.best_selector, "");
        assert_eq!(result.hints, vec!["Search term (markup): <span> </span>"]);
        assert!(result
            .reveal_snippet
            .starts_with("let el = null;\n"));
    }

    #[test]
    fn test_text_escaped_in_reveal() {
        let result = FindHints::build("<button hidden>Don't</button>");
        assert!(result.reveal_snippet.contains(r"const want = 'Don\'t'.toLowerCase();"));
    }

    #[test]
    fn test_extract_attr() {
        assert_eq!(extract_attr(r#"<a data-testid="x" id='y'>"#, "id"), "y");
        assert_eq!(extract_attr("<a ID=z>", "id"), "z");
        assert_eq!(extract_attr("<a>", "id"), "");
    }
}
