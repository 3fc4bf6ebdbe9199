//! State shared with components while they handle callbacks.

use std::collections::{HashMap, VecDeque};

use listdom::{Document, Event, FocusState, NodeId};

use crate::component::Task;

/// Deferred work, processed in order by the host once mutations settle.
#[derive(Debug)]
pub(crate) enum Pending {
    Task(NodeId, Task),
    Emit(Event),
    Focus(NodeId),
}

/// Custom-event listeners: `(target, event name)` to listening components.
#[derive(Debug, Default)]
pub(crate) struct Listeners {
    map: HashMap<(NodeId, String), Vec<NodeId>>,
}

impl Listeners {
    fn add(&mut self, target: NodeId, name: &str, owner: NodeId) -> bool {
        let owners = self.map.entry((target, name.to_string())).or_default();
        if owners.contains(&owner) {
            return false;
        }
        owners.push(owner);
        true
    }

    fn remove(&mut self, target: NodeId, name: &str, owner: NodeId) -> bool {
        let key = (target, name.to_string());
        let Some(owners) = self.map.get_mut(&key) else {
            return false;
        };
        let before = owners.len();
        owners.retain(|o| *o != owner);
        let removed = owners.len() != before;
        if owners.is_empty() {
            self.map.remove(&key);
        }
        removed
    }

    fn owners(&self, target: NodeId, name: &str) -> Vec<NodeId> {
        self.map
            .get(&(target, name.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    fn count(&self, name: &str) -> usize {
        self.map
            .iter()
            .filter(|((_, n), _)| n == name)
            .map(|(_, owners)| owners.len())
            .sum()
    }
}

/// The document, focus and deferred-work queue, as seen by a component.
#[derive(Debug, Default)]
pub struct Context {
    pub(crate) doc: Document,
    pub(crate) focus: FocusState,
    pub(crate) pending: VecDeque<Pending>,
    pub(crate) listeners: Listeners,
}

impl Context {
    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focus.focused()
    }

    /// Emit a bubbling custom event from `target` once the current handler
    /// returns.
    pub fn emit(&mut self, target: NodeId, name: &str, detail: Option<Event>) {
        self.pending
            .push_back(Pending::Emit(Event::custom(target, name, detail)));
    }

    /// Move focus to `node` once pending mutations settle. Ignored if the
    /// node is not focusable by then.
    pub fn request_focus(&mut self, node: NodeId) {
        self.pending.push_back(Pending::Focus(node));
    }

    /// Run `task` on `node`'s component after the current work settles.
    pub fn queue_update(&mut self, node: NodeId, task: Task) {
        self.pending.push_back(Pending::Task(node, task));
    }

    /// Listen for `name` events reaching `target`. Registering the same
    /// owner twice has no effect. Returns true if newly added.
    pub fn add_listener(&mut self, target: NodeId, name: &str, owner: NodeId) -> bool {
        self.listeners.add(target, name, owner)
    }

    /// Returns true if the listener was registered.
    pub fn remove_listener(&mut self, target: NodeId, name: &str, owner: NodeId) -> bool {
        self.listeners.remove(target, name, owner)
    }

    pub fn listeners_on(&self, target: NodeId, name: &str) -> Vec<NodeId> {
        self.listeners.owners(target, name)
    }

    /// Total registrations for an event name, across all targets.
    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.count(name)
    }

    pub(crate) fn pop_pending(&mut self) -> Option<Pending> {
        self.pending.pop_front()
    }
}
