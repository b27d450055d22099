// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM Node types

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

/// Shared node storage for one parsed document
pub(crate) type NodeStore = Arc<RwLock<HashMap<NodeId, NodeData>>>;

/// Unique node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a new unique node ID
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Document,
    Element,
    Text,
    Comment,
    DocumentType,
}

/// Internal node data
#[derive(Debug)]
pub struct NodeData {
    pub node_type: NodeType,
    /// Lower-cased tag name (elements only)
    pub tag_name: Option<String>,
    /// Text for text/comment nodes
    pub text_content: Option<String>,
    /// Attributes in source order, names lower-cased
    pub attributes: Vec<(String, String)>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl NodeData {
    fn blank(node_type: NodeType) -> Self {
        Self {
            node_type,
            tag_name: None,
            text_content: None,
            attributes: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a new element node data
    pub fn element(tag_name: impl Into<String>) -> Self {
        let mut data = Self::blank(NodeType::Element);
        data.tag_name = Some(tag_name.into().to_lowercase());
        data
    }

    /// Create a new text node data
    pub fn text(content: impl Into<String>) -> Self {
        let mut data = Self::blank(NodeType::Text);
        data.text_content = Some(content.into());
        data
    }

    /// Create a new comment node data
    pub fn comment(content: impl Into<String>) -> Self {
        let mut data = Self::blank(NodeType::Comment);
        data.text_content = Some(content.into());
        data
    }

    /// Create a doctype node data
    pub fn doctype() -> Self {
        Self::blank(NodeType::DocumentType)
    }

    /// Create a new document node data
    pub fn document() -> Self {
        Self::blank(NodeType::Document)
    }

    /// Look up an attribute by (lower-case) name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A reference to a node in the DOM tree
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    nodes: NodeStore,
}

impl Node {
    pub(crate) fn new(id: NodeId, nodes: NodeStore) -> Self {
        Self { id, nodes }
    }

    /// Get the node type
    pub fn node_type(&self) -> NodeType {
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| n.node_type)
            .unwrap_or(NodeType::Element)
    }

    /// Get the tag name in lowercase
    pub fn local_name(&self) -> Option<String> {
        self.nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.tag_name.clone())
    }

    /// Concatenated text of all descendant text nodes (DOM `textContent`)
    pub fn text_content(&self) -> String {
        let nodes = self.nodes.read();
        let mut out = String::new();
        collect_text(&nodes, self.id, false, &mut out);
        out
    }

    /// Rendered-ish text: like `text_content` but skipping script/style
    /// subtrees, which a browser's `innerText` never shows.
    pub fn inner_text(&self) -> String {
        let nodes = self.nodes.read();
        let mut out = String::new();
        collect_text(&nodes, self.id, true, &mut out);
        out
    }

    /// Get an attribute value
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        let name = name.to_lowercase();
        self.nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.attribute(&name).map(str::to_string))
    }

    /// Check if has an attribute
    pub fn has_attribute(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| n.attribute(&name).is_some())
            .unwrap_or(false)
    }

    /// All attributes in source order
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| n.attributes.clone())
            .unwrap_or_default()
    }

    /// Get parent node
    pub fn parent(&self) -> Option<Node> {
        self.nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.parent)
            .map(|id| Node::new(id, self.nodes.clone()))
    }

    /// Get child nodes
    pub fn children(&self) -> Vec<Node> {
        self.nodes
            .read()
            .get(&self.id)
            .map(|n| {
                n.children
                    .iter()
                    .map(|&id| Node::new(id, self.nodes.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sibling immediately before this node
    pub fn prev_sibling(&self) -> Option<Node> {
        self.sibling(-1)
    }

    /// Sibling immediately after this node
    pub fn next_sibling(&self) -> Option<Node> {
        self.sibling(1)
    }

    fn sibling(&self, offset: isize) -> Option<Node> {
        let nodes = self.nodes.read();
        let parent = nodes.get(&self.id)?.parent?;
        let siblings = &nodes.get(&parent)?.children;
        let pos = siblings.iter().position(|&id| id == self.id)? as isize + offset;
        if pos < 0 {
            return None;
        }
        siblings
            .get(pos as usize)
            .map(|&id| Node::new(id, self.nodes.clone()))
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    /// Get inner HTML
    pub fn inner_html(&self) -> String {
        let nodes = self.nodes.read();
        let mut out = String::new();
        if let Some(node) = nodes.get(&self.id) {
            for &child in &node.children {
                serialize_node(&nodes, child, &mut out);
            }
        }
        out
    }

    /// Get outer HTML
    pub fn outer_html(&self) -> String {
        let nodes = self.nodes.read();
        let mut out = String::new();
        serialize_node(&nodes, self.id, &mut out);
        out
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Append the text of `node_id` and its descendants in document order
fn collect_text(
    nodes: &HashMap<NodeId, NodeData>,
    node_id: NodeId,
    skip_hidden_content: bool,
    out: &mut String,
) {
    let mut stack = vec![node_id];
    while let Some(id) = stack.pop() {
        let Some(node) = nodes.get(&id) else {
            continue;
        };
        match node.node_type {
            NodeType::Text => out.push_str(node.text_content.as_deref().unwrap_or("")),
            NodeType::Element | NodeType::Document => {
                if skip_hidden_content
                    && matches!(
                        node.tag_name.as_deref(),
                        Some("script" | "style" | "template" | "noscript")
                    )
                {
                    continue;
                }
                stack.extend(node.children.iter().rev().copied());
            }
            _ => {}
        }
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

enum Step {
    Open(NodeId),
    Close(NodeId),
}

/// Serialize roughly the way a browser's `outerHTML` does
fn serialize_node(nodes: &HashMap<NodeId, NodeData>, node_id: NodeId, out: &mut String) {
    let mut stack = vec![Step::Open(node_id)];
    while let Some(step) = stack.pop() {
        let id = match step {
            Step::Open(id) => id,
            Step::Close(id) => {
                if let Some(tag) = nodes.get(&id).and_then(|n| n.tag_name.as_deref()) {
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                }
                continue;
            }
        };
        let Some(node) = nodes.get(&id) else {
            continue;
        };
        match node.node_type {
            NodeType::Text => {
                let raw_parent = node
                    .parent
                    .and_then(|p| nodes.get(&p))
                    .and_then(|p| p.tag_name.as_deref())
                    .map(|t| matches!(t, "script" | "style"))
                    .unwrap_or(false);
                let text = node.text_content.as_deref().unwrap_or("");
                if raw_parent {
                    out.push_str(text);
                } else {
                    out.push_str(&escape_text(text));
                }
            }
            NodeType::Comment => {
                out.push_str("<!--");
                out.push_str(node.text_content.as_deref().unwrap_or(""));
                out.push_str("-->");
            }
            NodeType::Element => {
                let tag = node.tag_name.as_deref().unwrap_or("div");
                out.push('<');
                out.push_str(tag);
                for (k, v) in &node.attributes {
                    out.push(' ');
                    out.push_str(k);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(v));
                    out.push('"');
                }
                out.push('>');
                if !VOID_ELEMENTS.contains(&tag) {
                    stack.push(Step::Close(id));
                    stack.extend(node.children.iter().rev().map(|&c| Step::Open(c)));
                }
            }
            NodeType::Document => {
                stack.extend(node.children.iter().rev().map(|&c| Step::Open(c)));
            }
            NodeType::DocumentType => out.push_str("<!DOCTYPE html>"),
        }
    }
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\u{a0}', "&nbsp;")
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\u{a0}', "&nbsp;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id1 = NodeId::new();
        let id2 = NodeId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_node_data() {
        let element = NodeData::element("DIV");
        assert_eq!(element.tag_name, Some("div".to_string()));
        assert_eq!(element.node_type, NodeType::Element);

        let text = NodeData::text("Hello");
        assert_eq!(text.text_content, Some("Hello".to_string()));
        assert_eq!(text.node_type, NodeType::Text);
    }

    #[test]
    fn test_attribute_order_is_preserved() {
        let mut data = NodeData::element("button");
        data.attributes.push(("type".into(), "submit".into()));
        data.attributes.push(("id".into(), "save".into()));
        assert_eq!(data.attribute("id"), Some("save"));
        assert_eq!(data.attributes[0].0, "type");
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_attr(r#"a"b&c"#), "a&quot;b&amp;c");
        assert_eq!(escape_text("<b> & </b>"), "&lt;b&gt; &amp; &lt;/b&gt;");
    }
}
