//! The widget runtime.
//!
//! A [`Host`] owns the document and one component per upgraded element.
//! Every public operation runs to completion before returning:
//! 1. The structural edit, attribute write or event dispatch itself
//! 2. Lifecycle callbacks (`connected` / `disconnected`)
//! 3. Settling: mutation records, queued updates, emitted events and focus
//!    requests are delivered until nothing is left

use std::collections::{HashMap, HashSet};

use listdom::{
    is_focusable, propagation_path, query_selector, Color, ColorContext, Document, Event,
    EventKind, HandlerResult, Key, Modifiers, Mutation, NodeId, Selector, Theme,
};

use crate::component::Component;
use crate::config::HostConfig;
use crate::context::{Context, Pending};
use crate::error::HostError;
use crate::markup::Markup;
use crate::registration::{registered_elements, Registry};
use crate::widgets::DesignSystemProvider;

/// A custom event that was emitted and delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub name: String,
    pub target: NodeId,
    /// The event that caused the notification, if any.
    pub detail: Option<Event>,
}

// Which handler an event kind is delivered to.
#[derive(Debug, Clone, Copy)]
enum Phase {
    KeyDown,
    Click,
    FocusIn,
    FocusOut,
    Custom,
}

impl Phase {
    fn of(kind: &EventKind) -> Self {
        match kind {
            EventKind::KeyDown { .. } => Phase::KeyDown,
            EventKind::Click { .. } => Phase::Click,
            EventKind::FocusIn { .. } => Phase::FocusIn,
            EventKind::FocusOut { .. } => Phase::FocusOut,
            EventKind::Custom { .. } => Phase::Custom,
        }
    }
}

#[derive(Debug)]
pub struct Host {
    config: HostConfig,
    registry: Registry,
    components: HashMap<NodeId, Box<dyn Component>>,
    cx: Context,
    notifications: Vec<Notification>,
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Host {
    /// A host with the built-in widgets defined.
    pub fn new() -> Self {
        Self::with_config(HostConfig::default())
    }

    pub fn with_config(config: HostConfig) -> Self {
        Self {
            config,
            registry: Registry::with_builtins(),
            components: HashMap::new(),
            cx: Context::default(),
            notifications: Vec::new(),
        }
    }

    /// A host with the built-ins plus every element submitted through
    /// inventory. Registrations that clash with an existing tag are skipped.
    pub fn with_registered_elements() -> Self {
        let mut host = Self::new();
        for registration in registered_elements() {
            if let Err(e) = host.registry.define(registration.tag, registration.factory) {
                log::warn!("[host] skipping registration <{}>: {e}", registration.tag);
            }
        }
        host
    }

    /// Define a custom element tag.
    pub fn define(
        &mut self,
        tag: &str,
        factory: impl Fn() -> Box<dyn Component> + 'static,
    ) -> Result<(), HostError> {
        self.registry.define(tag, factory)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    pub fn document(&self) -> &Document {
        &self.cx.doc
    }

    pub fn context(&self) -> &Context {
        &self.cx
    }

    pub fn root(&self) -> NodeId {
        self.cx.doc.root()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.cx.focus.focused()
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.cx.doc.get_attribute(node, name)
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.cx.doc.has_attribute(node, name)
    }

    /// Find an element by its `id` attribute.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        query_selector(&self.cx.doc, self.root(), &Selector::attr_eq("id", id))
    }

    /// The component attached to `node`, if it is of type `T`.
    pub fn component<T: Component + 'static>(&self, node: NodeId) -> Option<&T> {
        let component: &dyn Component = self.components.get(&node)?.as_ref();
        component.as_any().downcast_ref::<T>()
    }

    pub fn component_mut<T: Component + 'static>(&mut self, node: NodeId) -> Option<&mut T> {
        let component: &mut dyn Component = self.components.get_mut(&node)?.as_mut();
        component.as_any_mut().downcast_mut::<T>()
    }

    pub fn is_upgraded(&self, node: NodeId) -> bool {
        self.components.contains_key(&node)
    }

    /// Drain the custom events delivered since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Create a detached element, upgrading it if the tag is defined.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let node = self.cx.doc.create_element(tag);
        if let Some(mut component) = self.registry.create(tag) {
            component.created(node, &mut self.cx);
            self.components.insert(node, component);
            log::trace!("[host] upgraded <{tag}> as {node}");
        }
        node
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.cx.doc.create_text(text)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), HostError> {
        self.insert_before(parent, child, None)
    }

    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), HostError> {
        let was_connected = self.cx.doc.is_connected(child);
        // Validate before firing any lifecycle callbacks.
        if self.cx.doc.get(parent).is_none() {
            return Err(listdom::DomError::UnknownNode(parent).into());
        }
        if was_connected && self.cx.doc.contains(child, parent) {
            return Err(listdom::DomError::HierarchyRequest { parent, child }.into());
        }

        if was_connected {
            self.disconnect_subtree(child);
        }
        let result = self.cx.doc.insert_before(parent, child, reference);
        if result.is_err() && was_connected {
            // Still in its old position
            self.connect_subtree(child);
        } else if self.cx.doc.is_connected(child) {
            self.connect_subtree(child);
        }
        self.flush();
        Ok(result?)
    }

    /// Detach `node` from its parent.
    pub fn remove(&mut self, node: NodeId) {
        let was_connected = self.cx.doc.is_connected(node);
        if was_connected {
            self.disconnect_subtree(node);
        }
        self.cx.doc.detach(node);
        if let Some(focused) = self.cx.focus.focused() {
            if self.cx.doc.contains(node, focused) {
                log::debug!("[host] focused {focused} removed with {node}, clearing focus");
                self.cx.focus.blur();
            }
        }
        self.flush();
    }

    /// Build `markup` as a detached subtree and append it to `parent`.
    pub fn mount(&mut self, parent: NodeId, markup: Markup) -> Result<NodeId, HostError> {
        let root = self.build(markup)?;
        self.append_child(parent, root)?;
        Ok(root)
    }

    fn build(&mut self, markup: Markup) -> Result<NodeId, HostError> {
        match markup {
            Markup::Text(text) => Ok(self.cx.doc.create_text(text)),
            Markup::Element {
                tag,
                attributes,
                children,
            } => {
                let node = self.create_element(&tag);
                for (name, value) in attributes {
                    self.cx.doc.set_attribute(node, &name, value);
                }
                for child in children {
                    let child = self.build(child)?;
                    self.cx.doc.append_child(node, child)?;
                }
                Ok(node)
            }
        }
    }

    fn connect_subtree(&mut self, root: NodeId) {
        let nodes: Vec<NodeId> = std::iter::once(root)
            .chain(self.cx.doc.descendants(root))
            .collect();
        for node in nodes {
            if let Some(component) = self.components.get_mut(&node) {
                component.connected(node, &mut self.cx);
            }
        }
    }

    fn disconnect_subtree(&mut self, root: NodeId) {
        let nodes: Vec<NodeId> = std::iter::once(root)
            .chain(self.cx.doc.descendants(root))
            .collect();
        for node in nodes {
            if let Some(component) = self.components.get_mut(&node) {
                component.disconnected(node, &mut self.cx);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.cx.doc.set_attribute(node, name, value);
        self.flush();
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        self.cx.doc.remove_attribute(node, name);
        self.flush();
    }

    pub fn toggle_attribute(&mut self, node: NodeId, name: &str, on: bool) {
        self.cx.doc.toggle_attribute(node, name, on);
        self.flush();
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Deliver a key press to the focused element. Unhandled Tab and
    /// Shift+Tab move through the tab order.
    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) -> HandlerResult {
        let outcome = match self.cx.focus.focused() {
            Some(target) => self.dispatch_key(target, key, modifiers),
            None => HandlerResult::IgnoredBubble,
        };

        if self.config.tab_navigation && outcome.continues() {
            match key {
                Key::Tab if modifiers.shift => self.focus_previous(),
                Key::Tab => self.focus_next(),
                Key::BackTab => self.focus_previous(),
                _ => false,
            };
        }
        outcome
    }

    /// Deliver a key press to a specific element.
    pub fn dispatch_key(&mut self, target: NodeId, key: Key, modifiers: Modifiers) -> HandlerResult {
        let outcome = self.dispatch_event(Event::key_down(target, key, modifiers));
        self.flush();
        outcome
    }

    pub fn click(&mut self, target: NodeId) -> HandlerResult {
        let outcome = self.dispatch_event(Event::click(target));
        self.flush();
        outcome
    }

    /// Focus `node` if it is focusable. Returns true if focus moved.
    pub fn focus(&mut self, node: NodeId) -> bool {
        let moved = self.apply_focus(node);
        self.flush();
        moved
    }

    /// Clear focus, dispatching a focus-out with no related target.
    pub fn blur(&mut self) {
        if let Some(previous) = self.cx.focus.blur() {
            self.dispatch_event(Event::new(
                EventKind::FocusOut {
                    related_target: None,
                },
                previous,
            ));
            self.flush();
        }
    }

    pub fn focus_next(&mut self) -> bool {
        match self.cx.focus.next_candidate(&self.cx.doc, self.root()) {
            Some(next) => self.focus(next),
            None => false,
        }
    }

    pub fn focus_previous(&mut self) -> bool {
        match self.cx.focus.prev_candidate(&self.cx.doc, self.root()) {
            Some(prev) => self.focus(prev),
            None => false,
        }
    }

    fn apply_focus(&mut self, node: NodeId) -> bool {
        if !is_focusable(&self.cx.doc, node) {
            log::debug!("[host] focus request for {node} ignored, not focusable");
            return false;
        }
        let Some(change) = self.cx.focus.focus(node) else {
            return false;
        };
        log::debug!("[host] focus {:?} -> {}", change.previous, change.current);

        if let Some(previous) = change.previous {
            self.dispatch_event(Event::new(
                EventKind::FocusOut {
                    related_target: Some(node),
                },
                previous,
            ));
        }
        self.dispatch_event(Event::new(
            EventKind::FocusIn {
                related_target: change.previous,
            },
            node,
        ));
        true
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Walk the propagation path, calling each component's handler and any
    /// listeners registered on the node. Does not settle.
    fn dispatch_event(&mut self, mut event: Event) -> HandlerResult {
        let phase = Phase::of(&event.kind);
        let name = event.name().map(str::to_owned);
        let mut outcome = HandlerResult::IgnoredBubble;

        for node in propagation_path(&self.cx.doc, event.target) {
            event.current_target = node;

            let result = match self.components.get_mut(&node) {
                Some(component) => match phase {
                    Phase::KeyDown => component.on_key_down(node, &mut event, &mut self.cx),
                    Phase::Click => component.on_click(node, &mut event, &mut self.cx),
                    Phase::FocusIn => component.on_focus_in(node, &mut event, &mut self.cx),
                    Phase::FocusOut => component.on_focus_out(node, &mut event, &mut self.cx),
                    Phase::Custom => HandlerResult::IgnoredBubble,
                },
                None => HandlerResult::IgnoredBubble,
            };

            if let Some(name) = &name {
                for owner in self.cx.listeners_on(node, name) {
                    if let Some(component) = self.components.get_mut(&owner) {
                        component.on_listener(owner, &event, &mut self.cx);
                    }
                }
            }

            log::trace!("[host] {phase:?} at {node} (target {}) -> {result:?}", event.target);

            match result {
                HandlerResult::Handled => {
                    event.prevent_default();
                    outcome = HandlerResult::Handled;
                    break;
                }
                HandlerResult::Ignored => {
                    outcome = HandlerResult::Ignored;
                    break;
                }
                HandlerResult::IgnoredBubble => {}
            }

            if event.propagation_stopped() || !event.bubbles {
                break;
            }
        }

        outcome
    }

    // -------------------------------------------------------------------------
    // Settling
    // -------------------------------------------------------------------------

    /// Deliver mutations, queued updates, emitted events and focus requests
    /// until nothing is left.
    pub fn flush(&mut self) {
        let mut passes = 0;
        loop {
            if passes >= self.config.max_flush_passes {
                log::warn!(
                    "[host] flush did not settle after {passes} passes, {} items still pending",
                    self.cx.pending.len()
                );
                break;
            }
            passes += 1;

            if self.cx.doc.has_mutations() {
                let mutations = self.cx.doc.take_mutations();
                self.deliver_mutations(mutations);
                continue;
            }

            let Some(pending) = self.cx.pop_pending() else {
                break;
            };
            match pending {
                Pending::Task(node, task) => {
                    if let Some(component) = self.components.get_mut(&node) {
                        component.run_task(node, task, &mut self.cx);
                    }
                }
                Pending::Emit(event) => {
                    self.notifications.push(Notification {
                        name: event.name().unwrap_or_default().to_string(),
                        target: event.target,
                        detail: event.detail().cloned(),
                    });
                    self.dispatch_event(event);
                }
                Pending::Focus(node) => {
                    self.apply_focus(node);
                }
            }
        }
    }

    fn deliver_mutations(&mut self, mutations: Vec<Mutation>) {
        let mut child_lists = HashSet::new();
        for mutation in mutations {
            match mutation {
                Mutation::Attribute {
                    target,
                    name,
                    old_value,
                } => {
                    if let Some(component) = self.components.get_mut(&target) {
                        component.attribute_changed(
                            target,
                            &name,
                            old_value.as_deref(),
                            &mut self.cx,
                        );
                    }
                }
                Mutation::ChildList { target } => {
                    // One child-set recomputation per batch.
                    if !child_lists.insert(target) {
                        continue;
                    }
                    if let Some(component) = self.components.get_mut(&target) {
                        component.children_changed(target, &mut self.cx);
                    }
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Theming
    // -------------------------------------------------------------------------

    /// Resolve a color token through the nearest enclosing design system
    /// provider (inclusive).
    pub fn resolve_token(&self, node: NodeId, token: &str) -> Option<Color> {
        let doc = &self.cx.doc;
        std::iter::once(node)
            .chain(doc.ancestors(node))
            .find_map(|id| self.component::<DesignSystemProvider>(id))
            .and_then(|provider| {
                provider.resolve(token)?;
                Some(ColorContext::new(provider).resolve(&Color::var(token)))
            })
    }
}
