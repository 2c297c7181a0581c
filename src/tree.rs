//! Rendered-tree abstraction and descendant-chain matching.
//!
//! `RenderedNode` is all the locator needs from a rendered tree: attribute
//! inspection and child traversal. [`RenderedTree`] implements it over an
//! HTML snapshot of rendered output.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

pub trait RenderedNode: Clone {
    fn attribute(&self, name: &str) -> Option<String>;

    fn child_nodes(&self) -> Vec<Self>;
}

/// True when the node's `attribute` holds `marker` as one of its
/// whitespace-separated tokens.
pub fn has_marker<N: RenderedNode>(node: &N, attribute: &str, marker: &str) -> bool {
    node.attribute(attribute)
        .map(|value| value.split_whitespace().any(|token| token == marker))
        .unwrap_or(false)
}

/// Every node marked with the last marker whose ancestors carry the earlier
/// markers in order. Ancestors need not be direct parents.
pub fn find_chain<N: RenderedNode>(root: &N, attribute: &str, markers: &[String]) -> Vec<N> {
    let mut found = Vec::new();
    if !markers.is_empty() {
        walk_chain(root, attribute, markers, 0, &mut found);
    }
    found
}

// `matched` is the length of the longest chain prefix carried by strict
// ancestors; taking the earliest match for each step is optimal for a
// subsequence search.
fn walk_chain<N: RenderedNode>(
    node: &N,
    attribute: &str,
    markers: &[String],
    matched: usize,
    found: &mut Vec<N>,
) {
    let last = markers.len() - 1;
    if matched == last && has_marker(node, attribute, &markers[last]) {
        found.push(node.clone());
    }

    let next = if matched < last && has_marker(node, attribute, &markers[matched]) {
        matched + 1
    } else {
        matched
    };

    for child in node.child_nodes() {
        walk_chain(&child, attribute, markers, next, found);
    }
}

impl RenderedNode for Handle {
    fn attribute(&self, name: &str) -> Option<String> {
        match &self.data {
            NodeData::Element { attrs, .. } => attrs
                .borrow()
                .iter()
                .find(|attr| &*attr.name.local == name)
                .map(|attr| attr.value.to_string()),
            _ => None,
        }
    }

    fn child_nodes(&self) -> Vec<Self> {
        self.children.borrow().clone()
    }
}

/// Parsed HTML snapshot of a rendered tree.
pub struct RenderedTree {
    dom: RcDom,
}

impl RenderedTree {
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        RenderedTree { dom }
    }

    pub fn root(&self) -> Handle {
        self.dom.document.clone()
    }

    /// Elements carrying `attribute`, in document order.
    pub fn elements_with(&self, attribute: &str) -> Vec<Handle> {
        let mut found = Vec::new();
        collect_with_attribute(&self.root(), attribute, &mut found);
        found
    }
}

fn collect_with_attribute(node: &Handle, attribute: &str, found: &mut Vec<Handle>) {
    if node.attribute(attribute).is_some() {
        found.push(node.clone());
    }
    for child in node.child_nodes() {
        collect_with_attribute(&child, attribute, found);
    }
}

pub fn tag_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

/// Attributes of an element in source order.
pub fn attributes(node: &Handle) -> Vec<(String, String)> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}
