//! Arena-owned element tree.
//!
//! The document owns every element it creates. Structure is held as parent
//! links plus ordered child lists, and every effective change is recorded as
//! a [`Mutation`] so that a runtime can react to child-set and attribute
//! changes after the fact.

use crate::element::{Element, NodeId, DOCUMENT_TAG};
use crate::error::DomError;

/// A recorded change to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// The child list of `target` changed.
    ChildList { target: NodeId },
    /// An attribute of `target` was added, changed or removed.
    Attribute {
        target: NodeId,
        name: String,
        old_value: Option<String>,
    },
}

impl Mutation {
    pub fn target(&self) -> NodeId {
        match self {
            Mutation::ChildList { target } | Mutation::Attribute { target, .. } => *target,
        }
    }
}

#[derive(Debug)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
    mutations: Vec<Mutation>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new(DOCUMENT_TAG)],
            root: NodeId(0),
            mutations: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    // -------------------------------------------------------------------------
    // Creation
    // -------------------------------------------------------------------------

    /// Add a detached element to the arena.
    pub fn insert(&mut self, mut element: Element) -> NodeId {
        element.parent = None;
        element.children.clear();
        let id = NodeId(self.nodes.len());
        self.nodes.push(element);
        id
    }

    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.insert(Element::new(tag))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.insert(Element::text_node(text))
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    fn check(&self, id: NodeId) -> Result<(), DomError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(DomError::UnknownNode(id))
        }
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` into `parent` before `reference` (or at the end).
    ///
    /// `child` is first detached from its current parent.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        self.check(parent)?;
        self.check(child)?;
        if self.nodes[parent.0].is_text() {
            return Err(DomError::TextParent(parent));
        }
        if child == self.root || self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        if let Some(reference) = reference {
            self.check(reference)?;
            if reference == child {
                return Ok(());
            }
            if self.nodes[reference.0].parent != Some(parent) {
                return Err(DomError::NotAChild {
                    parent,
                    child: reference,
                });
            }
        }

        self.detach(child);

        let siblings = &mut self.nodes[parent.0].children;
        let position = reference
            .and_then(|r| siblings.iter().position(|c| *c == r))
            .unwrap_or(siblings.len());
        siblings.insert(position, child);
        self.nodes[child.0].parent = Some(parent);
        self.mutations.push(Mutation::ChildList { target: parent });
        Ok(())
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check(parent)?;
        self.check(child)?;
        if self.nodes[child.0].parent != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(())
    }

    /// Remove `id` from its parent, if it has one.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes.get(id.0).and_then(|el| el.parent) else {
            return;
        };
        self.nodes[parent.0].children.retain(|c| *c != id);
        self.nodes[id.0].parent = None;
        self.mutations.push(Mutation::ChildList { target: parent });
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// The parent, unless it is the document root.
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id)
            .filter(|p| self.get(*p).is_some_and(Element::is_element))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|el| el.children.as_slice()).unwrap_or(&[])
    }

    /// Children that are elements (text nodes skipped).
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
            .collect()
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Element::is_element)
    }

    /// Ancestors from the parent upward, ending at the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// All descendants in pre-order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        self.descendants_recursive(id, &mut result);
        result
    }

    fn descendants_recursive(&self, id: NodeId, result: &mut Vec<NodeId>) {
        for child in self.children(id) {
            result.push(*child);
            self.descendants_recursive(*child, result);
        }
    }

    /// Inclusive containment: a node contains itself.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor == node || self.ancestors(node).any(|a| a == ancestor)
    }

    pub fn is_connected(&self, id: NodeId) -> bool {
        self.check(id).is_ok() && self.contains(self.root, id)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.get(id).and_then(|el| el.text.as_deref()) {
            out.push_str(text);
        }
        for node in self.descendants(id) {
            if let Some(text) = self.get(node).and_then(|el| el.text.as_deref()) {
                out.push_str(text);
            }
        }
        out
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.get_attribute(name)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get(id).is_some_and(|el| el.has_attribute(name))
    }

    /// Set an attribute. Returns true if the stored value changed.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> bool {
        let Some(element) = self.nodes.get_mut(id.0) else {
            log::debug!("[document] set_attribute({name}) on unknown node {id}");
            return false;
        };
        let value = value.into();
        if element.attributes.get(name) == Some(&value) {
            return false;
        }
        let old_value = element.attributes.insert(name.to_string(), value);
        self.mutations.push(Mutation::Attribute {
            target: id,
            name: name.to_string(),
            old_value,
        });
        true
    }

    /// Remove an attribute. Returns true if it was present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        let Some(element) = self.nodes.get_mut(id.0) else {
            log::debug!("[document] remove_attribute({name}) on unknown node {id}");
            return false;
        };
        let Some(old_value) = element.attributes.remove(name) else {
            return false;
        };
        self.mutations.push(Mutation::Attribute {
            target: id,
            name: name.to_string(),
            old_value: Some(old_value),
        });
        true
    }

    /// Add (as an empty value) or remove a boolean attribute.
    pub fn toggle_attribute(&mut self, id: NodeId, name: &str, on: bool) -> bool {
        if on {
            if self.has_attribute(id, name) {
                return false;
            }
            self.set_attribute(id, name, "")
        } else {
            self.remove_attribute(id, name)
        }
    }

    /// Set the attribute to `Some(value)` or remove it for `None`.
    pub fn reflect_attribute(&mut self, id: NodeId, name: &str, value: Option<&str>) -> bool {
        match value {
            Some(value) => self.set_attribute(id, name, value),
            None => self.remove_attribute(id, name),
        }
    }

    // -------------------------------------------------------------------------
    // Mutation records
    // -------------------------------------------------------------------------

    pub fn has_mutations(&self) -> bool {
        !self.mutations.is_empty()
    }

    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }
}

/// Iterator over the ancestors of a node.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}
