//! Task lists and tree views.
//!
//! The container owns the roving tabindex across its direct items and
//! enforces single selection: it listens for `selected-change` on every
//! item and clears the previously selected one.

use listdom::{query_selector_all, Event, HandlerResult, Key, NodeId, Selector};

use crate::component::{Component, Task};
use crate::context::Context;

use super::item::{is_disabled, ItemNode, ItemRoles};
use super::SELECTED_CHANGE;

#[derive(Debug)]
pub struct ListContainer {
    roles: ItemRoles,
    mounted: bool,
    /// Projected children in DOM order, items or not.
    slotted_items: Vec<NodeId>,
    /// `None` until the first recomputation after mount.
    items: Option<Vec<NodeId>>,
    current_selected: Option<NodeId>,
}

impl ListContainer {
    pub fn new(roles: ItemRoles) -> Self {
        Self {
            roles,
            mounted: false,
            slotted_items: Vec::new(),
            items: None,
            current_selected: None,
        }
    }

    pub fn task_list() -> Self {
        Self::new(ItemRoles::TASK)
    }

    pub fn tree_view() -> Self {
        Self::new(ItemRoles::TREE)
    }

    pub fn roles(&self) -> ItemRoles {
        self.roles
    }

    /// Direct item children, in DOM order.
    pub fn items(&self) -> &[NodeId] {
        self.items.as_deref().unwrap_or_default()
    }

    pub fn slotted_items(&self) -> &[NodeId] {
        &self.slotted_items
    }

    /// The item that most recently reported itself selected.
    pub fn current_selected(&self) -> Option<NodeId> {
        self.current_selected
    }

    fn unlisten(&mut self, node: NodeId, cx: &mut Context) {
        for item in self.items.take().unwrap_or_default() {
            cx.remove_listener(item, SELECTED_CHANGE, node);
        }
    }

    fn slotted_items_changed(&mut self, node: NodeId, cx: &mut Context) {
        self.unlisten(node, cx);

        let doc = cx.doc();
        let selector = self.roles.item_selector();
        self.slotted_items = doc.children(node).to_vec();
        let items: Vec<NodeId> = self
            .slotted_items
            .iter()
            .copied()
            .filter(|id| selector.matches(doc, *id))
            .collect();
        log::debug!("[list] {node} has {} items", items.len());

        self.set_items(node, items, cx);
    }

    fn set_items(&mut self, node: NodeId, items: Vec<NodeId>, cx: &mut Context) {
        let first_enabled = items.iter().copied().find(|item| !is_disabled(cx.doc(), *item));

        for item in &items {
            cx.add_listener(*item, SELECTED_CHANGE, node);
            if Some(*item) == first_enabled {
                cx.doc_mut().set_attribute(*item, "tabindex", "0");
            } else {
                cx.doc_mut().remove_attribute(*item, "tabindex");
            }
        }
        self.items = Some(items);
    }

    /// Adopt an item rendered as selected before the list mounted.
    fn adopt_selection(&mut self, node: NodeId, cx: &mut Context) {
        let selected = query_selector_all(cx.doc(), node, &Selector::attr_eq("aria-selected", "true"));
        let Some((first, rest)) = selected.split_first() else {
            return;
        };
        log::debug!("[list] {node} adopts selected item {first}");
        self.current_selected = Some(*first);
        for extra in rest {
            log::warn!("[list] {node} has more than one selected item, clearing {extra}");
            cx.doc_mut().remove_attribute(*extra, "selected");
        }
    }

    fn handle_item_selected(&mut self, node: NodeId, item: NodeId, cx: &mut Context) {
        if self.current_selected == Some(item) {
            return;
        }
        if let Some(previous) = self.current_selected {
            log::debug!("[list] {node} deselects {previous}");
            cx.doc_mut().remove_attribute(previous, "selected");
        }
        self.current_selected = Some(item);
    }
}

impl Component for ListContainer {
    fn created(&mut self, node: NodeId, cx: &mut Context) {
        cx.doc_mut().set_attribute(node, "role", self.roles.container);
    }

    fn connected(&mut self, node: NodeId, cx: &mut Context) {
        self.mounted = true;
        cx.queue_update(node, Task::SlotChanged);
        cx.queue_update(node, Task::AdoptSelection);
    }

    fn disconnected(&mut self, node: NodeId, cx: &mut Context) {
        self.unlisten(node, cx);
        self.mounted = false;
    }

    fn children_changed(&mut self, node: NodeId, cx: &mut Context) {
        if self.mounted {
            self.slotted_items_changed(node, cx);
        }
    }

    fn run_task(&mut self, node: NodeId, task: Task, cx: &mut Context) {
        if !self.mounted {
            return;
        }
        match task {
            Task::SlotChanged => self.slotted_items_changed(node, cx),
            Task::AdoptSelection => self.adopt_selection(node, cx),
            Task::Render => {}
        }
    }

    fn on_key_down(&mut self, _node: NodeId, event: &mut Event, cx: &mut Context) -> HandlerResult {
        let Some(items) = &self.items else {
            return HandlerResult::IgnoredBubble;
        };
        let enabled = |item: &&NodeId| !is_disabled(cx.doc(), **item);
        let target = match event.key() {
            Some(Key::Home) => items.iter().find(enabled),
            Some(Key::End) => items.iter().rev().find(enabled),
            _ => return HandlerResult::IgnoredBubble,
        }
        .copied();
        if let Some(target) = target {
            ItemNode::focus_item(cx, target);
        }
        HandlerResult::Handled
    }

    fn on_focus_out(&mut self, node: NodeId, event: &mut Event, cx: &mut Context) -> HandlerResult {
        let target = event.target;
        let moved_within = event
            .related_target()
            .is_some_and(|related| related != target && cx.doc().contains(node, related));
        if moved_within && cx.doc().is_element(target) {
            cx.doc_mut().remove_attribute(target, "tabindex");
        }
        HandlerResult::IgnoredBubble
    }

    fn on_listener(&mut self, node: NodeId, event: &Event, cx: &mut Context) {
        if event.name() == Some(SELECTED_CHANGE) {
            self.handle_item_selected(node, event.target, cx);
        }
    }
}
