//! Declarative element trees for [`Host::mount`](crate::Host::mount).
//!
//! ```ignore
//! let list = task_list()
//!     .id("todo")
//!     .child(task_item("Buy milk").id("milk"))
//!     .child(task_item("Call mom").flag("disabled"))
//!     .child(
//!         task_item("Chores")
//!             .child(task_item("Dishes"))
//!             .child(task_item("Laundry")),
//!     );
//! let id = host.mount(host.root(), list)?;
//! ```

use crate::widgets::{
    PROVIDER_TAG, SIMPLE_TAG, TASK_ITEM_TAG, TASK_LIST_TAG, TREE_ITEM_TAG, TREE_VIEW_TAG,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<Markup>,
    },
    Text(String),
}

impl Markup {
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Element { attributes, .. } = &mut self {
            let name = name.into();
            attributes.retain(|(n, _)| *n != name);
            attributes.push((name, value.into()));
        }
        self
    }

    /// Boolean attribute, present with an empty value.
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attr(name, "")
    }

    pub fn flag_if(self, name: impl Into<String>, on: bool) -> Self {
        if on { self.flag(name) } else { self }
    }

    pub fn child(mut self, child: Markup) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn children(mut self, items: impl IntoIterator<Item = Markup>) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.extend(items);
        }
        self
    }

    /// Append a text child.
    pub fn content(self, text: impl Into<String>) -> Self {
        self.child(Self::text(text))
    }
}

pub fn task_list() -> Markup {
    Markup::element(TASK_LIST_TAG)
}

pub fn task_item(label: impl Into<String>) -> Markup {
    Markup::element(TASK_ITEM_TAG).content(label)
}

pub fn tree_view() -> Markup {
    Markup::element(TREE_VIEW_TAG)
}

pub fn tree_item(label: impl Into<String>) -> Markup {
    Markup::element(TREE_ITEM_TAG).content(label)
}

pub fn design_system_provider() -> Markup {
    Markup::element(PROVIDER_TAG)
}

pub fn simple_tag(heading: impl Into<String>) -> Markup {
    Markup::element(SIMPLE_TAG).content(heading)
}
