// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Element-specific DOM operations

use super::node::{Node, NodeId, NodeStore, NodeType};
use super::selector::SelectorList;

/// Tags that carry a reflected `disabled` property
const DISABLEABLE_TAGS: &[&str] = &[
    "button", "input", "select", "textarea", "optgroup", "option", "fieldset",
];

/// Element node with extended operations
#[derive(Debug, Clone)]
pub struct Element {
    pub node: Node,
}

impl Element {
    /// Wrap a node if it is an element
    pub fn new(node: Node) -> Option<Self> {
        if node.node_type() == NodeType::Element {
            Some(Self { node })
        } else {
            None
        }
    }

    pub(crate) fn from_id(id: NodeId, nodes: NodeStore) -> Option<Self> {
        Self::new(Node::new(id, nodes))
    }

    /// Get the tag name (uppercase, like browsers)
    pub fn tag_name(&self) -> String {
        self.local_name().to_uppercase()
    }

    /// Get local name (lowercase)
    pub fn local_name(&self) -> String {
        self.node.local_name().unwrap_or_default()
    }

    /// Get element ID
    pub fn id(&self) -> Option<String> {
        self.node.get_attribute("id")
    }

    /// Raw `class` attribute (DOM `className`)
    pub fn class_name(&self) -> String {
        self.node.get_attribute("class").unwrap_or_default()
    }

    /// Get class list as vector
    pub fn class_list(&self) -> Vec<String> {
        self.class_name()
            .split_whitespace()
            .map(String::from)
            .collect()
    }

    /// Check if element has a class
    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().iter().any(|c| c == class)
    }

    /// Get an attribute
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.node.get_attribute(name)
    }

    /// Attribute value or empty string, like `getAttribute(k) || ""`
    pub fn attr_or_empty(&self, name: &str) -> String {
        self.get_attribute(name).unwrap_or_default()
    }

    /// Check if has attribute
    pub fn has_attribute(&self, name: &str) -> bool {
        self.node.has_attribute(name)
    }

    /// Get text content
    pub fn text_content(&self) -> String {
        self.node.text_content()
    }

    /// Get text as a browser would render it
    pub fn inner_text(&self) -> String {
        self.node.inner_text()
    }

    /// Get inner HTML
    pub fn inner_html(&self) -> String {
        self.node.inner_html()
    }

    /// Get outer HTML
    pub fn outer_html(&self) -> String {
        self.node.outer_html()
    }

    /// Get parent element
    pub fn parent_element(&self) -> Option<Element> {
        self.node.parent().and_then(Element::new)
    }

    /// Iterator over ancestor elements, nearest first
    pub fn ancestors(&self) -> impl Iterator<Item = Element> {
        std::iter::successors(self.parent_element(), |e| e.parent_element())
    }

    /// Get child elements (only element nodes)
    pub fn children(&self) -> Vec<Element> {
        self.node
            .children()
            .into_iter()
            .filter_map(Element::new)
            .collect()
    }

    /// All descendant elements in document order
    pub fn descendants(&self) -> Vec<Element> {
        let mut out = Vec::new();
        let mut stack: Vec<Element> = self.children().into_iter().rev().collect();
        while let Some(el) = stack.pop() {
            stack.extend(el.children().into_iter().rev());
            out.push(el);
        }
        out
    }

    /// Get previous sibling element
    pub fn previous_element_sibling(&self) -> Option<Element> {
        let mut sibling = self.node.prev_sibling();
        while let Some(s) = sibling {
            if s.is_element() {
                return Element::new(s);
            }
            sibling = s.prev_sibling();
        }
        None
    }

    /// Get next sibling element
    pub fn next_element_sibling(&self) -> Option<Element> {
        let mut sibling = self.node.next_sibling();
        while let Some(s) = sibling {
            if s.is_element() {
                return Element::new(s);
            }
            sibling = s.next_sibling();
        }
        None
    }

    /// Query selector all within this element's subtree
    pub fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        match SelectorList::parse(selector) {
            Ok(list) => self
                .descendants()
                .into_iter()
                .filter(|e| list.matches(e))
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Check if element matches a selector
    pub fn matches(&self, selector: &str) -> bool {
        SelectorList::parse(selector)
            .map(|list| list.matches(self))
            .unwrap_or(false)
    }

    /// Get closest ancestor (or self) matching selector
    pub fn closest(&self, selector: &str) -> Option<Element> {
        let list = SelectorList::parse(selector).ok()?;
        if list.matches(self) {
            return Some(self.clone());
        }
        self.ancestors().find(|a| list.matches(a))
    }

    /// Current value of a form control (attribute-backed)
    pub fn value(&self) -> Option<String> {
        match self.local_name().as_str() {
            "input" | "button" | "option" | "select" => self.get_attribute("value"),
            "textarea" => Some(self.text_content()),
            _ => None,
        }
    }

    /// Reflected `disabled` property. Only form-associated elements have it;
    /// a `disabled` attribute on a `<div>` or `<a>` has no effect in a browser.
    pub fn disabled(&self) -> bool {
        DISABLEABLE_TAGS.contains(&self.local_name().as_str()) && self.has_attribute("disabled")
    }

    /// Reflected `hidden` property
    pub fn hidden(&self) -> bool {
        self.has_attribute("hidden")
    }

    /// Get href for links
    pub fn href(&self) -> Option<String> {
        self.get_attribute("href")
    }

    /// Get the form this element belongs to
    pub fn form(&self) -> Option<Element> {
        self.ancestors().find(|a| a.local_name() == "form")
    }
}

impl std::ops::Deref for Element {
    type Target = Node;

    fn deref(&self) -> &Self::Target {
        &self.node
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::parse_html;

    #[test]
    fn test_element_class_list() {
        let doc = parse_html("<div class=\"foo bar baz\">test</div>").unwrap();
        let div = doc.query_selector("div").unwrap();
        let classes = div.class_list();
        assert!(classes.contains(&"foo".to_string()));
        assert!(classes.contains(&"bar".to_string()));
        assert!(div.has_class("baz"));
        assert_eq!(div.class_name(), "foo bar baz");
    }

    #[test]
    fn test_disabled_only_on_form_controls() {
        let doc = parse_html("<button disabled>a</button><a disabled href=\"/x\">b</a>").unwrap();
        assert!(doc.query_selector("button").unwrap().disabled());
        assert!(!doc.query_selector("a").unwrap().disabled());
    }

    #[test]
    fn test_inner_text_skips_scripts() {
        let doc = parse_html("<div>Save<script>var x = 1;</script></div>").unwrap();
        let div = doc.query_selector("div").unwrap();
        assert_eq!(div.inner_text(), "Save");
        assert!(div.text_content().contains("var x"));
    }

    #[test]
    fn test_closest_and_form() {
        let doc = parse_html("<form id=\"f\"><div><button>Go</button></div></form>").unwrap();
        let button = doc.query_selector("button").unwrap();
        assert_eq!(button.closest("form").and_then(|f| f.id()), Some("f".into()));
        assert!(button.form().is_some());
    }

    #[test]
    fn test_value_sources() {
        let doc =
            parse_html("<input value=\"Delete\"><textarea>notes</textarea><div>x</div>").unwrap();
        assert_eq!(doc.query_selector("input").unwrap().value(), Some("Delete".into()));
        assert_eq!(doc.query_selector("textarea").unwrap().value(), Some("notes".into()));
        assert_eq!(doc.query_selector("div").unwrap().value(), None);
    }
}
