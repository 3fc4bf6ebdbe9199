//! Custom element registration.
//!
//! The built-in widgets are always defined. Other crates can contribute tags
//! at link time through `inventory`:
//!
//! ```ignore
//! inventory::submit! {
//!     ElementRegistration::new("my-badge", || Box::new(Badge::default()))
//! }
//! ```
//!
//! and pick them up with [`Host::with_registered_elements`](crate::Host::with_registered_elements).

use std::collections::HashMap;
use std::fmt;

use crate::component::Component;
use crate::error::HostError;
use crate::widgets::{
    DesignSystemProvider, ItemNode, ListContainer, SimpleTag, PROVIDER_TAG, SIMPLE_TAG,
    TASK_ITEM_TAG, TASK_LIST_TAG, TREE_ITEM_TAG, TREE_VIEW_TAG,
};

/// Builds a fresh component for an upgraded element.
pub type ComponentFactory = Box<dyn Fn() -> Box<dyn Component>>;

/// Element registration entry for inventory.
pub struct ElementRegistration {
    /// Custom element tag name.
    pub tag: &'static str,
    /// Factory function to create the component.
    pub factory: fn() -> Box<dyn Component>,
}

impl ElementRegistration {
    /// Create a new element registration.
    pub const fn new(tag: &'static str, factory: fn() -> Box<dyn Component>) -> Self {
        Self { tag, factory }
    }
}

inventory::collect!(ElementRegistration);

/// Get all elements registered through inventory.
pub fn registered_elements() -> impl Iterator<Item = &'static ElementRegistration> {
    inventory::iter::<ElementRegistration>()
}

// Names the HTML custom element rules reserve.
const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Whether `tag` is usable as a custom element name: starts with a
/// lowercase ASCII letter, contains a hyphen, has no uppercase letters or
/// whitespace, and is not reserved.
pub fn is_valid_custom_element_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    let starts_lower = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    starts_lower
        && tag.contains('-')
        && tag
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_'))
        && !RESERVED_NAMES.contains(&tag)
}

/// Tag name to component factory.
#[derive(Default)]
pub struct Registry {
    factories: HashMap<String, ComponentFactory>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("tags", &self.tags()).finish()
    }
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in widgets defined.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let builtins: [(&str, fn() -> Box<dyn Component>); 6] = [
            (TASK_ITEM_TAG, || Box::new(ItemNode::task_item())),
            (TASK_LIST_TAG, || Box::new(ListContainer::task_list())),
            (TREE_ITEM_TAG, || Box::new(ItemNode::tree_item())),
            (TREE_VIEW_TAG, || Box::new(ListContainer::tree_view())),
            (PROVIDER_TAG, || Box::new(DesignSystemProvider::default())),
            (SIMPLE_TAG, || Box::new(SimpleTag::default())),
        ];
        for (tag, factory) in builtins {
            registry
                .factories
                .insert(tag.to_string(), Box::new(factory));
        }
        registry
    }

    /// Define a custom element. Each tag can only be defined once.
    pub fn define(
        &mut self,
        tag: &str,
        factory: impl Fn() -> Box<dyn Component> + 'static,
    ) -> Result<(), HostError> {
        if !is_valid_custom_element_name(tag) {
            return Err(HostError::InvalidTagName(tag.to_string()));
        }
        if self.factories.contains_key(tag) {
            return Err(HostError::DuplicateTag(tag.to_string()));
        }
        log::debug!("[registry] defined <{tag}>");
        self.factories.insert(tag.to_string(), Box::new(factory));
        Ok(())
    }

    pub fn is_defined(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Build the component for `tag`, if it is defined.
    pub fn create(&self, tag: &str) -> Option<Box<dyn Component>> {
        self.factories.get(tag).map(|factory| factory())
    }

    /// Defined tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_element_names() {
        assert!(is_valid_custom_element_name("my-task-item"));
        assert!(is_valid_custom_element_name("x-1.2_b"));
        assert!(!is_valid_custom_element_name("task"));
        assert!(!is_valid_custom_element_name("My-task"));
        assert!(!is_valid_custom_element_name("1-task"));
        assert!(!is_valid_custom_element_name("my task-item"));
        assert!(!is_valid_custom_element_name("font-face"));
    }

    #[test]
    fn builtins_cannot_be_redefined() {
        let mut registry = Registry::with_builtins();
        assert_eq!(registry.tags().len(), 6);
        let err = registry
            .define(TASK_ITEM_TAG, || Box::new(ItemNode::task_item()))
            .unwrap_err();
        assert_eq!(err, HostError::DuplicateTag(TASK_ITEM_TAG.to_string()));
    }
}
