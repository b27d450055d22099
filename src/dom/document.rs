// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document representation

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use url::Url;

use super::element::Element;
use super::node::{Node, NodeData, NodeId, NodeStore};
use super::selector::SelectorList;

/// HTML Document representation
#[derive(Debug, Clone)]
pub struct Document {
    /// URL the document was loaded from
    pub url: Option<Url>,
    title: Arc<RwLock<String>>,
    root_id: NodeId,
    pub(crate) nodes: NodeStore,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        let root_id = NodeId::new();
        let mut nodes = HashMap::new();
        nodes.insert(root_id, NodeData::document());

        Self {
            url: None,
            title: Arc::new(RwLock::new(String::new())),
            root_id,
            nodes: Arc::new(RwLock::new(nodes)),
        }
    }

    /// Create a document with URL
    pub fn with_url(url: Url) -> Self {
        let mut doc = Self::new();
        doc.url = Some(url);
        doc
    }

    /// Get document URL as string (`location.href`)
    pub fn url_string(&self) -> Option<String> {
        self.url.as_ref().map(|u| u.to_string())
    }

    /// Get document title
    pub fn title(&self) -> String {
        self.title.read().clone()
    }

    pub(crate) fn set_title(&self, title: impl Into<String>) {
        *self.title.write() = title.into();
    }

    /// Get the root node
    pub fn root(&self) -> Node {
        Node::new(self.root_id, self.nodes.clone())
    }

    /// Get the document element (<html>)
    pub fn document_element(&self) -> Option<Element> {
        self.root().children().into_iter().find_map(Element::new)
    }

    /// Get the <head> element
    pub fn head(&self) -> Option<Element> {
        self.document_element()?
            .children()
            .into_iter()
            .find(|e| e.local_name() == "head")
    }

    /// Get the <body> element
    pub fn body(&self) -> Option<Element> {
        self.document_element()?
            .children()
            .into_iter()
            .find(|e| e.local_name() == "body")
    }

    /// Every element of the document in tree order
    pub fn elements(&self) -> Vec<Element> {
        let nodes = self.nodes.read();
        let mut order = Vec::with_capacity(nodes.len());
        let mut stack = vec![self.root_id];
        while let Some(id) = stack.pop() {
            if let Some(data) = nodes.get(&id) {
                if data.tag_name.is_some() {
                    order.push(id);
                }
                stack.extend(data.children.iter().rev().copied());
            }
        }
        drop(nodes);

        order
            .into_iter()
            .filter_map(|id| Element::from_id(id, self.nodes.clone()))
            .collect()
    }

    /// Query selector - find first matching element
    pub fn query_selector(&self, selector: &str) -> Option<Element> {
        let list = SelectorList::parse(selector).ok()?;
        self.elements().into_iter().find(|e| list.matches(e))
    }

    /// Query selector all - find all matching elements in tree order
    pub fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        match SelectorList::parse(selector) {
            Ok(list) => self
                .elements()
                .into_iter()
                .filter(|e| list.matches(e))
                .collect(),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring invalid selector");
                Vec::new()
            }
        }
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.elements()
            .into_iter()
            .find(|e| e.id().as_deref() == Some(id))
    }

    /// Get all forms
    pub fn forms(&self) -> Vec<Element> {
        self.query_selector_all("form")
    }

    /// Get all scripts
    pub fn scripts(&self) -> Vec<Element> {
        self.query_selector_all("script")
    }

    /// Number of nodes held by the document
    pub fn node_count(&self) -> usize {
        self.nodes.read().len()
    }

    /// Get the document's HTML
    pub fn outer_html(&self) -> String {
        self.root().outer_html()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
