//! Selector matching and tree queries.

use crate::document::Document;
use crate::element::NodeId;

/// A simple element selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `[role='name']`
    Role(String),
    /// Tag name.
    Tag(String),
    /// `[name]`
    Attr(String),
    /// `[name='value']`
    AttrEq { name: String, value: String },
}

impl Selector {
    pub fn role(name: impl Into<String>) -> Self {
        Self::Role(name.into())
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag(name.into())
    }

    pub fn attr(name: impl Into<String>) -> Self {
        Self::Attr(name.into())
    }

    pub fn attr_eq(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::AttrEq {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        let Some(element) = doc.get(id).filter(|el| el.is_element()) else {
            return false;
        };
        match self {
            Selector::Role(role) => element.role() == Some(role.as_str()),
            Selector::Tag(tag) => element.tag == *tag,
            Selector::Attr(name) => element.has_attribute(name),
            Selector::AttrEq { name, value } => element.get_attribute(name) == Some(value.as_str()),
        }
    }
}

/// Nearest inclusive ancestor of `start` matching `selector`.
pub fn closest(doc: &Document, start: NodeId, selector: &Selector) -> Option<NodeId> {
    std::iter::once(start)
        .chain(doc.ancestors(start))
        .find(|id| selector.matches(doc, *id))
}

/// Like [`closest`], but gives up at the first element matching `boundary`.
pub fn closest_within(
    doc: &Document,
    start: NodeId,
    selector: &Selector,
    boundary: &Selector,
) -> Option<NodeId> {
    for id in std::iter::once(start).chain(doc.ancestors(start)) {
        if selector.matches(doc, id) {
            return Some(id);
        }
        if boundary.matches(doc, id) {
            return None;
        }
    }
    None
}

/// First descendant of `root` (pre-order) matching `selector`.
pub fn query_selector(doc: &Document, root: NodeId, selector: &Selector) -> Option<NodeId> {
    doc.descendants(root)
        .into_iter()
        .find(|id| selector.matches(doc, *id))
}

/// All descendants of `root` (pre-order) matching `selector`.
pub fn query_selector_all(doc: &Document, root: NodeId, selector: &Selector) -> Vec<NodeId> {
    doc.descendants(root)
        .into_iter()
        .filter(|id| selector.matches(doc, *id))
        .collect()
}

/// Descendants of `root` matching `selector` that are currently displayed.
///
/// A subtree rooted at a `hidden` element is not displayed, nor is anything
/// below an element with `aria-expanded="false"`.
pub fn displayed_nodes(doc: &Document, root: NodeId, selector: &Selector) -> Vec<NodeId> {
    let mut result = Vec::new();
    collect_displayed(doc, root, selector, &mut result);
    result
}

fn collect_displayed(doc: &Document, id: NodeId, selector: &Selector, result: &mut Vec<NodeId>) {
    if doc.get_attribute(id, "aria-expanded") == Some("false") {
        return;
    }
    for child in doc.children(id) {
        if doc.has_attribute(*child, "hidden") {
            continue;
        }
        if selector.matches(doc, *child) {
            result.push(*child);
        }
        collect_displayed(doc, *child, selector, result);
    }
}
