// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use url::Url;

use super::document::Document;
use super::node::{NodeData, NodeId};
use crate::error::{Error, Result};

/// Parse HTML string into a Document
pub fn parse_html(html: &str) -> Result<Document> {
    parse_html_with_url(html, None)
}

/// Parse HTML string with the URL it was loaded from
pub fn parse_html_with_url(html: &str, url: Option<Url>) -> Result<Document> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| Error::HtmlParse(e.to_string()))?;

    let doc = match url {
        Some(u) => Document::with_url(u),
        None => Document::new(),
    };

    DomConverter { doc: &doc }.convert(&dom.document);

    if let Some(title_elem) = doc.query_selector("title") {
        doc.set_title(title_elem.text_content().trim());
    }

    tracing::debug!(
        nodes = doc.node_count(),
        url = doc.url_string().as_deref().unwrap_or("-"),
        "parsed document"
    );

    Ok(doc)
}

/// Copies the html5ever tree into our node store
struct DomConverter<'a> {
    doc: &'a Document,
}

impl DomConverter<'_> {
    /// Depth-first copy with an explicit work stack so nesting depth is
    /// bounded by heap, not by the thread stack
    fn convert(self, handle: &Handle) {
        let root_id = self.doc.root().id;
        let mut stack: Vec<(Handle, NodeId)> = handle
            .children
            .borrow()
            .iter()
            .rev()
            .map(|child| (child.clone(), root_id))
            .collect();

        while let Some((handle, parent_id)) = stack.pop() {
            let data = match handle.data {
                RcNodeData::Document | RcNodeData::ProcessingInstruction { .. } => continue,
                RcNodeData::Doctype { .. } => NodeData::doctype(),
                RcNodeData::Text { ref contents } => NodeData::text(contents.borrow().to_string()),
                RcNodeData::Comment { ref contents } => NodeData::comment(contents.to_string()),
                RcNodeData::Element {
                    ref name,
                    ref attrs,
                    ref template_contents,
                    ..
                } => {
                    let mut data = NodeData::element(name.local.to_string());
                    for attr in attrs.borrow().iter() {
                        data.attributes
                            .push((attr.name.local.to_lowercase(), attr.value.to_string()));
                    }
                    let node_id = self.insert(data, parent_id);
                    for child in handle.children.borrow().iter().rev() {
                        stack.push((child.clone(), node_id));
                    }
                    // <template> keeps its markup in a separate fragment, placed first
                    if let Some(contents) = template_contents.borrow().as_ref() {
                        for child in contents.children.borrow().iter().rev() {
                            stack.push((child.clone(), node_id));
                        }
                    }
                    continue;
                }
            };

            self.insert(data, parent_id);
        }
    }

    fn insert(&self, mut data: NodeData, parent_id: NodeId) -> NodeId {
        let node_id = NodeId::new();
        data.parent = Some(parent_id);

        let mut nodes = self.doc.nodes.write();
        nodes.insert(node_id, data);
        if let Some(parent) = nodes.get_mut(&parent_id) {
            parent.children.push(node_id);
        }
        node_id
    }
}
