//! Built-in widgets.
//!
//! - [`ItemNode`] backs `my-task-item` and `my-tree-item`
//! - [`ListContainer`] backs `my-task-list` and `my-tree-view`
//! - [`DesignSystemProvider`] publishes color tokens to its subtree
//! - [`SimpleTag`] paints itself from the nearest provider

mod item;
mod list;
mod provider;
mod tag;
mod traits;

pub use item::{ItemNode, ItemRoles};
pub use list::ListContainer;
pub use provider::{custom_property, DesignSystemConfig, DesignSystemProvider};
pub use tag::SimpleTag;
pub use traits::HasEdgeSlots;

pub const TASK_ITEM_TAG: &str = "my-task-item";
pub const TASK_LIST_TAG: &str = "my-task-list";
pub const TREE_ITEM_TAG: &str = "my-tree-item";
pub const TREE_VIEW_TAG: &str = "my-tree-view";
pub const PROVIDER_TAG: &str = "my-design-system-provider";
pub const SIMPLE_TAG: &str = "my-tag";

/// Emitted by an item whenever its selection toggles.
pub const SELECTED_CHANGE: &str = "selected-change";
/// Emitted by a tree item whenever it expands or collapses.
pub const EXPANDED_CHANGE: &str = "expanded-change";
