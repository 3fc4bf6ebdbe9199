use std::collections::BTreeMap;

use super::NodeId;

/// Tag used for text nodes.
pub const TEXT_TAG: &str = "#text";

/// Tag used for the document root.
pub const DOCUMENT_TAG: &str = "#document";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    // Identity
    pub tag: String,

    // Content
    pub attributes: BTreeMap<String, String>,
    pub text: Option<String>,

    // Tree links (owned by the document)
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn text_node(content: impl Into<String>) -> Self {
        Self {
            text: Some(content.into()),
            ..Self::new(TEXT_TAG)
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    /// Elements are everything except text nodes and the document root.
    pub fn is_element(&self) -> bool {
        !self.is_text() && self.tag != DOCUMENT_TAG
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Shorthand for the `role` attribute.
    pub fn role(&self) -> Option<&str> {
        self.get_attribute("role")
    }
}
