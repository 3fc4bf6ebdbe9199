//! The component trait custom elements implement.

use std::any::Any;
use std::fmt;

use listdom::{Event, HandlerResult, NodeId};

use crate::context::Context;

/// Work a component queued for itself with [`Context::queue_update`].
///
/// Queued updates run after the current structural edit or event has fully
/// settled, so every element created alongside the component is upgraded and
/// connected by then.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Recompute the projected child set.
    SlotChanged,
    /// Adopt an item already marked `aria-selected="true"`.
    AdoptSelection,
    /// Re-derive reflected attributes.
    Render,
}

/// Downcasting support for components.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behaviour attached to an upgraded custom element.
///
/// All methods default to doing nothing, so components only implement the
/// callbacks they care about. Handlers receive the node they are attached to
/// and the shared [`Context`]; they run to completion on the host's single
/// dispatch thread.
pub trait Component: AsAny + fmt::Debug {
    /// The element was created and upgraded. It is not connected yet.
    fn created(&mut self, _node: NodeId, _cx: &mut Context) {}

    /// The element became reachable from the document root.
    fn connected(&mut self, _node: NodeId, _cx: &mut Context) {}

    /// The element is no longer reachable from the document root.
    fn disconnected(&mut self, _node: NodeId, _cx: &mut Context) {}

    /// An attribute of the element was added, changed or removed.
    fn attribute_changed(
        &mut self,
        _node: NodeId,
        _name: &str,
        _old_value: Option<&str>,
        _cx: &mut Context,
    ) {
    }

    /// The element's child list changed.
    fn children_changed(&mut self, _node: NodeId, _cx: &mut Context) {}

    /// A queued update is due.
    fn run_task(&mut self, _node: NodeId, _task: Task, _cx: &mut Context) {}

    fn on_key_down(&mut self, _node: NodeId, _event: &mut Event, _cx: &mut Context) -> HandlerResult {
        HandlerResult::IgnoredBubble
    }

    fn on_click(&mut self, _node: NodeId, _event: &mut Event, _cx: &mut Context) -> HandlerResult {
        HandlerResult::IgnoredBubble
    }

    fn on_focus_in(&mut self, _node: NodeId, _event: &mut Event, _cx: &mut Context) -> HandlerResult {
        HandlerResult::IgnoredBubble
    }

    fn on_focus_out(&mut self, _node: NodeId, _event: &mut Event, _cx: &mut Context) -> HandlerResult {
        HandlerResult::IgnoredBubble
    }

    /// A custom event reached a node this component registered a listener on.
    fn on_listener(&mut self, _node: NodeId, _event: &Event, _cx: &mut Context) {}
}
