// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM engine for HTML parsing and inspection
//!
//! Provides a DOM-like interface built on top of html5ever, plus just enough
//! style resolution to tell whether a control is visually suppressed.

mod document;
mod element;
mod node;
mod parser;
mod selector;
mod style;

pub use document::Document;
pub use element::Element;
pub use node::{Node, NodeId, NodeType};
pub use parser::{parse_html, parse_html_with_url};
pub use selector::{Selector, SelectorList, Specificity};
pub use style::{ComputedStyle, Declaration, StyleDeclarations, StyleSheet};
