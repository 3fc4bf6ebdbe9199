pub mod dispatch;
pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod focus;
pub mod observable;
pub mod query;
pub mod types;

pub use dispatch::{propagation_path, HandlerResult};
pub use document::{Document, Mutation};
pub use element::{Element, NodeId};
pub use error::DomError;
pub use event::{Event, EventKind, Key, Modifiers, MouseButton};
pub use focus::{collect_focusable, is_focusable, FocusChange, FocusState};
pub use observable::{Observable, SubscriptionId};
pub use query::{closest, closest_within, displayed_nodes, query_selector, query_selector_all, Selector};
pub use types::*;
