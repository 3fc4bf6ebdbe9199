//! Keyboard-navigable task lists and tree views.
//!
//! Widgets are components attached to custom elements in a `listdom`
//! document. The [`Host`] owns the document, upgrades elements whose tag is
//! registered and routes input, lifecycle callbacks and notifications to
//! their components.
//!
//! ```ignore
//! use tasklist::{markup::*, Host, Key, Modifiers};
//!
//! let mut host = Host::new();
//! let list = host.mount(host.root(), task_list().child(task_item("Write docs")))?;
//! host.focus_next();
//! host.key_down(Key::Enter, Modifiers::new());
//! ```

pub mod component;
pub mod config;
pub mod context;
pub mod error;
pub mod host;
pub mod markup;
pub mod registration;
pub mod widgets;

pub use component::{AsAny, Component, Task};
pub use config::HostConfig;
pub use context::Context;
pub use error::HostError;
pub use host::{Host, Notification};
pub use markup::Markup;
pub use registration::{registered_elements, ElementRegistration, Registry};
pub use widgets::{
    DesignSystemConfig, DesignSystemProvider, HasEdgeSlots, ItemNode, ItemRoles, ListContainer,
    SimpleTag, EXPANDED_CHANGE, SELECTED_CHANGE,
};

// Re-export inventory for `inventory::submit!` in downstream crates
pub use inventory;

pub use listdom::{Event, HandlerResult, Key, Modifiers, NodeId};
