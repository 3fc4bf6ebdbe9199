//! Task and tree items.
//!
//! An item owns its `selected`, `disabled`, `expanded` and `focusable` flags
//! and reflects them onto ARIA attributes. Keyboard navigation between items
//! lives here too: each item handles the arrow keys aimed at itself and
//! moves focus through the flattened, displayed item sequence of its list.

use listdom::{
    closest, closest_within, displayed_nodes, Document, Event, HandlerResult, Key, NodeId,
    Observable, Selector, SubscriptionId,
};

use crate::component::{Component, Task};
use crate::context::Context;

use super::traits::{slotted, HasEdgeSlots, END_SLOT, START_SLOT};
use super::{EXPANDED_CHANGE, SELECTED_CHANGE};

/// The roles an item and its enclosing container carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRoles {
    pub container: &'static str,
    pub item: &'static str,
    /// Whether items expand and collapse their children.
    pub collapsible: bool,
}

impl ItemRoles {
    pub const TASK: ItemRoles = ItemRoles {
        container: "list",
        item: "listitem",
        collapsible: false,
    };

    pub const TREE: ItemRoles = ItemRoles {
        container: "tree",
        item: "treeitem",
        collapsible: true,
    };

    pub fn item_selector(&self) -> Selector {
        Selector::role(self.item)
    }

    pub fn container_selector(&self) -> Selector {
        Selector::role(self.container)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

/// Whether `node` should be skipped by keyboard navigation.
pub(crate) fn is_disabled(doc: &Document, node: NodeId) -> bool {
    doc.has_attribute(node, "disabled") || doc.get_attribute(node, "aria-disabled") == Some("true")
}

#[derive(Debug)]
pub struct ItemNode {
    roles: ItemRoles,
    selected: Observable<bool>,
    disabled: Observable<bool>,
    focusable: Observable<bool>,
    expanded: Observable<bool>,
    child_items: Vec<NodeId>,
    start: Vec<NodeId>,
    end: Vec<NodeId>,
}

impl ItemNode {
    pub fn new(roles: ItemRoles) -> Self {
        Self {
            roles,
            selected: Observable::new(false),
            disabled: Observable::new(false),
            focusable: Observable::new(false),
            expanded: Observable::new(false),
            child_items: Vec::new(),
            start: Vec::new(),
            end: Vec::new(),
        }
    }

    pub fn task_item() -> Self {
        Self::new(ItemRoles::TASK)
    }

    pub fn tree_item() -> Self {
        Self::new(ItemRoles::TREE)
    }

    pub fn roles(&self) -> ItemRoles {
        self.roles
    }

    pub fn is_selected(&self) -> bool {
        self.selected.value()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.value()
    }

    pub fn is_focusable(&self) -> bool {
        self.focusable.value()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded.value()
    }

    /// True iff the item has at least one nested item child.
    pub fn is_expandable(&self) -> bool {
        !self.child_items.is_empty()
    }

    /// Direct nested items, in DOM order.
    pub fn child_items(&self) -> &[NodeId] {
        &self.child_items
    }

    /// Call `f` with the new value whenever the selected flag changes.
    pub fn on_selected_change(&mut self, mut f: impl FnMut(bool) + 'static) -> SubscriptionId {
        self.selected.subscribe(move |_, selected| f(*selected))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.selected.unsubscribe(id)
    }

    /// Give `node` the roving tabindex and move focus to it.
    ///
    /// Does not strip the tabindex from the previously focused item; the
    /// container does that when it sees focus leave. Callers pick enabled
    /// targets; the host refuses to focus a disabled item.
    pub fn focus_item(cx: &mut Context, node: NodeId) {
        log::debug!("[item] focus {node}");
        cx.doc_mut().set_attribute(node, "tabindex", "0");
        cx.request_focus(node);
    }

    // -------------------------------------------------------------------------
    // Reflection
    // -------------------------------------------------------------------------

    fn sync_attribute(&mut self, doc: &Document, node: NodeId, name: &str) -> bool {
        match name {
            "selected" => self.selected.set(doc.has_attribute(node, "selected")),
            "disabled" => self.disabled.set(doc.has_attribute(node, "disabled")),
            "expanded" => self.expanded.set(doc.has_attribute(node, "expanded")),
            "tabindex" => self
                .focusable
                .set(doc.get_attribute(node, "tabindex") == Some("0")),
            _ => false,
        }
    }

    fn sync_children(&mut self, doc: &Document, node: NodeId) {
        let item = self.roles.item_selector();
        self.child_items = doc
            .element_children(node)
            .into_iter()
            .filter(|child| item.matches(doc, *child))
            .collect();
        self.start = slotted(doc, node, START_SLOT);
        self.end = slotted(doc, node, END_SLOT);
    }

    /// Write the derived attributes for the current state.
    fn render(&self, doc: &mut Document, node: NodeId) {
        let selected = self.is_selected();
        let disabled = self.is_disabled();

        doc.set_attribute(node, "role", self.roles.item);

        let nested = doc
            .parent_element(node)
            .is_some_and(|parent| doc.get_attribute(parent, "role") == Some(self.roles.item));
        if nested {
            doc.set_attribute(node, "slot", "item");
        } else if doc.get_attribute(node, "slot") == Some("item") {
            doc.remove_attribute(node, "slot");
        }

        doc.toggle_attribute(node, "selected", selected);
        doc.toggle_attribute(node, "disabled", disabled);
        if self.roles.collapsible {
            doc.toggle_attribute(node, "expanded", self.is_expanded());
        }

        if self.is_focusable() && !disabled {
            doc.set_attribute(node, "tabindex", "0");
        } else if doc.get_attribute(node, "tabindex") == Some("0") {
            doc.remove_attribute(node, "tabindex");
        }

        let class: Vec<&str> = [(selected, "selected"), (disabled, "disabled")]
            .into_iter()
            .filter_map(|(on, name)| on.then_some(name))
            .collect();
        let class = class.join(" ");
        doc.reflect_attribute(node, "class", (!class.is_empty()).then_some(class.as_str()));

        doc.set_attribute(node, "aria-selected", bool_str(selected));
        doc.set_attribute(node, "aria-disabled", bool_str(disabled));

        let expanded = match (self.is_expandable(), self.roles.collapsible) {
            (false, _) => None,
            (true, false) => Some("true"),
            (true, true) => Some(bool_str(self.is_expanded())),
        };
        doc.reflect_attribute(node, "aria-expanded", expanded);
    }

    // -------------------------------------------------------------------------
    // Behaviour
    // -------------------------------------------------------------------------

    fn handle_selected(&mut self, node: NodeId, event: &Event, cx: &mut Context) {
        let selected = !self.is_selected();
        log::debug!("[item] {node} selected -> {selected}");
        self.selected.set(selected);
        self.render(cx.doc_mut(), node);
        cx.emit(node, SELECTED_CHANGE, Some(event.clone()));
    }

    fn set_expanded(&mut self, node: NodeId, expanded: bool, cx: &mut Context) {
        log::debug!("[item] {node} expanded -> {expanded}");
        self.expanded.set(expanded);
        self.render(cx.doc_mut(), node);
        cx.emit(node, EXPANDED_CHANGE, None);
    }

    /// The nearest enclosing item, not crossing the list boundary.
    fn parent_item(&self, doc: &Document, node: NodeId) -> Option<NodeId> {
        let parent = doc.parent_element(node)?;
        closest_within(
            doc,
            parent,
            &self.roles.item_selector(),
            &self.roles.container_selector(),
        )
    }

    /// The next or previous enabled item in display order. Stops at either
    /// end of the sequence.
    fn adjacent_item(&self, doc: &Document, node: NodeId, direction: Direction) -> Option<NodeId> {
        let list = closest(doc, node, &self.roles.container_selector())?;
        let items = displayed_nodes(doc, list, &self.roles.item_selector());
        let index = items.iter().position(|id| *id == node)?;

        let mut candidates: Box<dyn Iterator<Item = &NodeId>> = match direction {
            Direction::Next => Box::new(items[index + 1..].iter()),
            Direction::Previous => Box::new(items[..index].iter().rev()),
        };
        candidates.find(|id| !is_disabled(doc, **id)).copied()
    }

    fn handle_left(&mut self, node: NodeId, cx: &mut Context) -> HandlerResult {
        if self.roles.collapsible && self.is_expandable() && self.is_expanded() {
            self.set_expanded(node, false, cx);
            return HandlerResult::Handled;
        }
        match self.parent_item(cx.doc(), node) {
            Some(parent) if !is_disabled(cx.doc(), parent) => {
                Self::focus_item(cx, parent);
                HandlerResult::Handled
            }
            _ => HandlerResult::IgnoredBubble,
        }
    }

    fn handle_right(&mut self, node: NodeId, cx: &mut Context) -> HandlerResult {
        if !self.roles.collapsible || !self.is_expandable() {
            return HandlerResult::IgnoredBubble;
        }
        if !self.is_expanded() {
            self.set_expanded(node, true, cx);
            return HandlerResult::Handled;
        }
        let first = self
            .child_items
            .iter()
            .copied()
            .find(|child| !is_disabled(cx.doc(), *child));
        match first {
            Some(child) => {
                Self::focus_item(cx, child);
                HandlerResult::Handled
            }
            None => HandlerResult::IgnoredBubble,
        }
    }

    fn handle_vertical(
        &mut self,
        node: NodeId,
        direction: Direction,
        event: &mut Event,
        cx: &mut Context,
    ) -> HandlerResult {
        // Arrow keys never scroll the surrounding view.
        event.prevent_default();
        match self.adjacent_item(cx.doc(), node, direction) {
            Some(target) => {
                Self::focus_item(cx, target);
                HandlerResult::Handled
            }
            None => {
                log::debug!("[item] no {direction:?} item from {node}");
                HandlerResult::IgnoredBubble
            }
        }
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

impl HasEdgeSlots for ItemNode {
    fn start_slot(&self) -> &[NodeId] {
        &self.start
    }

    fn end_slot(&self) -> &[NodeId] {
        &self.end
    }
}

impl Component for ItemNode {
    fn created(&mut self, node: NodeId, cx: &mut Context) {
        cx.doc_mut().set_attribute(node, "role", self.roles.item);
    }

    fn connected(&mut self, node: NodeId, cx: &mut Context) {
        for name in ["selected", "disabled", "expanded", "tabindex"] {
            self.sync_attribute(cx.doc(), node, name);
        }
        self.sync_children(cx.doc(), node);
        self.render(cx.doc_mut(), node);
    }

    fn attribute_changed(
        &mut self,
        node: NodeId,
        name: &str,
        _old_value: Option<&str>,
        cx: &mut Context,
    ) {
        if self.sync_attribute(cx.doc(), node, name) {
            self.render(cx.doc_mut(), node);
        }
    }

    fn children_changed(&mut self, node: NodeId, cx: &mut Context) {
        self.sync_children(cx.doc(), node);
        self.render(cx.doc_mut(), node);
    }

    fn run_task(&mut self, node: NodeId, task: Task, cx: &mut Context) {
        if task == Task::Render {
            self.render(cx.doc_mut(), node);
        }
    }

    fn on_key_down(&mut self, node: NodeId, event: &mut Event, cx: &mut Context) -> HandlerResult {
        // Keys aimed at a nested item belong to that item.
        if !event.is_from_self() {
            return HandlerResult::IgnoredBubble;
        }
        let Some(key) = event.key() else {
            return HandlerResult::IgnoredBubble;
        };

        match key {
            Key::Left => self.handle_left(node, cx),
            Key::Right => self.handle_right(node, cx),
            Key::Down => self.handle_vertical(node, Direction::Next, event, cx),
            Key::Up => self.handle_vertical(node, Direction::Previous, event, cx),
            Key::Enter if self.is_disabled() => HandlerResult::IgnoredBubble,
            Key::Enter => {
                self.handle_selected(node, event, cx);
                HandlerResult::Handled
            }
            _ => HandlerResult::IgnoredBubble,
        }
    }

    fn on_click(&mut self, node: NodeId, event: &mut Event, cx: &mut Context) -> HandlerResult {
        if event.default_prevented() {
            return HandlerResult::IgnoredBubble;
        }
        if self.is_disabled() {
            log::trace!("[item] click on disabled {node} swallowed");
            return HandlerResult::Ignored;
        }
        self.handle_selected(node, event, cx);
        HandlerResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles() {
        assert_eq!(ItemNode::task_item().roles().item, "listitem");
        assert_eq!(ItemNode::tree_item().roles().container, "tree");
        assert!(!ItemRoles::TASK.collapsible);
        assert!(ItemRoles::TREE.collapsible);
    }

    #[test]
    fn render_reflects_flags() {
        let mut doc = Document::new();
        let node = doc.create_element("my-task-item");
        let mut item = ItemNode::task_item();
        item.selected.set(true);
        item.focusable.set(true);
        item.render(&mut doc, node);

        assert_eq!(doc.get_attribute(node, "role"), Some("listitem"));
        assert_eq!(doc.get_attribute(node, "aria-selected"), Some("true"));
        assert_eq!(doc.get_attribute(node, "aria-disabled"), Some("false"));
        assert_eq!(doc.get_attribute(node, "tabindex"), Some("0"));
        assert_eq!(doc.get_attribute(node, "class"), Some("selected"));
        assert!(doc.has_attribute(node, "selected"));
        assert!(!doc.has_attribute(node, "aria-expanded"));
    }

    #[test]
    fn disabled_item_drops_tabindex() {
        let mut doc = Document::new();
        let node = doc.create_element("my-task-item");
        doc.set_attribute(node, "tabindex", "0");
        let mut item = ItemNode::task_item();
        item.focusable.set(true);
        item.disabled.set(true);
        item.render(&mut doc, node);

        assert_eq!(doc.get_attribute(node, "tabindex"), None);
        assert_eq!(doc.get_attribute(node, "class"), Some("disabled"));
    }

    #[test]
    fn selected_observer() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut item = ItemNode::task_item();
        let sink = seen.clone();
        let id = item.on_selected_change(move |selected| sink.borrow_mut().push(selected));

        item.selected.set(true);
        item.selected.set(true);
        item.selected.set(false);
        assert!(item.unsubscribe(id));
        item.selected.set(true);

        assert_eq!(*seen.borrow(), vec![true, false]);
    }
}
