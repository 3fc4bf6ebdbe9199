use tasklist::markup::{task_item, task_list};
use tasklist::{
    HandlerResult, Host, ItemNode, Key, ListContainer, Modifiers, NodeId, SELECTED_CHANGE,
};

fn id(host: &Host, name: &str) -> NodeId {
    host.get_element_by_id(name)
        .unwrap_or_else(|| panic!("no element #{name}"))
}

fn press(host: &mut Host, key: Key) -> HandlerResult {
    host.key_down(key, Modifiers::new())
}

/// list > [a, b (disabled), c]
fn flat_list() -> Host {
    let mut host = Host::new();
    let root = host.root();
    host.mount(
        root,
        task_list()
            .id("list")
            .child(task_item("A").id("a"))
            .child(task_item("B").id("b").flag("disabled"))
            .child(task_item("C").id("c")),
    )
    .unwrap();
    host
}

/// list > [a, b > [b1, b2], c]
fn nested_list() -> Host {
    let mut host = Host::new();
    let root = host.root();
    host.mount(
        root,
        task_list()
            .id("list")
            .child(task_item("A").id("a"))
            .child(
                task_item("B")
                    .id("b")
                    .child(task_item("B1").id("b1"))
                    .child(task_item("B2").id("b2")),
            )
            .child(task_item("C").id("c")),
    )
    .unwrap();
    host
}

fn tabindex_holders(host: &Host, items: &[NodeId]) -> Vec<NodeId> {
    items
        .iter()
        .copied()
        .filter(|item| host.get_attribute(*item, "tabindex") == Some("0"))
        .collect()
}

// ============================================================================
// Mounting
// ============================================================================

#[test]
fn test_mount_upgrades_and_renders_roles() {
    let host = flat_list();
    let list = id(&host, "list");
    let a = id(&host, "a");

    assert!(host.is_upgraded(list));
    assert_eq!(host.get_attribute(list, "role"), Some("list"));
    assert_eq!(host.get_attribute(a, "role"), Some("listitem"));
    assert_eq!(host.get_attribute(a, "aria-selected"), Some("false"));
    assert_eq!(host.get_attribute(a, "aria-disabled"), Some("false"));
    assert_eq!(host.get_attribute(id(&host, "b"), "aria-disabled"), Some("true"));
    assert_eq!(host.get_attribute(a, "aria-expanded"), None);
}

#[test]
fn test_roving_tabindex_starts_on_first_enabled_item() {
    let host = flat_list();
    let (a, b, c) = (id(&host, "a"), id(&host, "b"), id(&host, "c"));

    assert_eq!(tabindex_holders(&host, &[a, b, c]), vec![a]);
    assert_eq!(host.focused(), None);

    let list = host.component::<ListContainer>(id(&host, "list")).unwrap();
    assert_eq!(list.items(), &[a, b, c]);
}

#[test]
fn test_first_item_disabled_passes_tabindex_on() {
    let mut host = Host::new();
    let root = host.root();
    host.mount(
        root,
        task_list()
            .child(task_item("A").id("a").flag("disabled"))
            .child(task_item("B").id("b")),
    )
    .unwrap();

    let (a, b) = (id(&host, "a"), id(&host, "b"));
    assert_eq!(tabindex_holders(&host, &[a, b]), vec![b]);
}

#[test]
fn test_nested_items_render_slot_and_expanded() {
    let host = nested_list();
    let b = id(&host, "b");
    let b1 = id(&host, "b1");

    assert_eq!(host.get_attribute(b, "aria-expanded"), Some("true"));
    assert_eq!(host.get_attribute(b1, "slot"), Some("item"));
    assert_eq!(host.get_attribute(b, "slot"), None);

    let item = host.component::<ItemNode>(b).unwrap();
    assert!(item.is_expandable());
    assert_eq!(item.child_items(), &[b1, id(&host, "b2")]);
}

#[test]
fn test_empty_list_is_a_no_op() {
    let mut host = Host::new();
    let root = host.root();
    let list = host.mount(root, task_list()).unwrap();

    assert!(host.component::<ListContainer>(list).unwrap().items().is_empty());
    assert_eq!(host.dispatch_key(list, Key::Home, Modifiers::new()), HandlerResult::Handled);
    assert_eq!(host.focused(), None);
}

// ============================================================================
// Arrow navigation
// ============================================================================

#[test]
fn test_arrow_down_skips_disabled_item() {
    let mut host = flat_list();
    let (a, b, c) = (id(&host, "a"), id(&host, "b"), id(&host, "c"));

    assert!(host.focus_next());
    assert_eq!(host.focused(), Some(a));

    assert_eq!(press(&mut host, Key::Down), HandlerResult::Handled);
    assert_eq!(host.focused(), Some(c));
    assert_eq!(tabindex_holders(&host, &[a, b, c]), vec![c]);
}

#[test]
fn test_arrow_up_skips_disabled_item() {
    let mut host = flat_list();
    let (a, c) = (id(&host, "a"), id(&host, "c"));

    host.focus(a);
    press(&mut host, Key::End);
    assert_eq!(host.focused(), Some(c));

    press(&mut host, Key::Up);
    assert_eq!(host.focused(), Some(a));
}

#[test]
fn test_arrows_stop_at_the_ends() {
    let mut host = flat_list();
    let (a, c) = (id(&host, "a"), id(&host, "c"));

    host.focus(a);
    assert_eq!(press(&mut host, Key::Up), HandlerResult::IgnoredBubble);
    assert_eq!(host.focused(), Some(a));

    press(&mut host, Key::Down);
    assert_eq!(press(&mut host, Key::Down), HandlerResult::IgnoredBubble);
    assert_eq!(host.focused(), Some(c));
}

#[test]
fn test_arrow_down_walks_into_nested_items() {
    let mut host = nested_list();
    let order: Vec<NodeId> = ["a", "b", "b1", "b2", "c"]
        .iter()
        .map(|name| id(&host, name))
        .collect();

    host.focus(order[0]);
    for expected in &order[1..] {
        press(&mut host, Key::Down);
        assert_eq!(host.focused(), Some(*expected));
    }
    assert_eq!(tabindex_holders(&host, &order), vec![order[4]]);
}

#[test]
fn test_arrow_left_moves_to_parent_item() {
    let mut host = nested_list();
    let (a, b, b2) = (id(&host, "a"), id(&host, "b"), id(&host, "b2"));

    host.focus(a);
    for _ in 0..3 {
        press(&mut host, Key::Down);
    }
    assert_eq!(host.focused(), Some(b2));

    assert_eq!(press(&mut host, Key::Left), HandlerResult::Handled);
    assert_eq!(host.focused(), Some(b));
    assert_eq!(host.get_attribute(b2, "tabindex"), None);
}

#[test]
fn test_arrow_left_on_top_level_item_is_ignored() {
    let mut host = nested_list();
    let a = id(&host, "a");

    host.focus(a);
    assert_eq!(press(&mut host, Key::Left), HandlerResult::IgnoredBubble);
    assert_eq!(host.focused(), Some(a));
}

#[test]
fn test_arrow_right_does_nothing_on_task_items() {
    let mut host = nested_list();
    let b = id(&host, "b");

    host.focus_next();
    press(&mut host, Key::Down);
    assert_eq!(host.focused(), Some(b));
    assert_eq!(press(&mut host, Key::Right), HandlerResult::IgnoredBubble);
    assert_eq!(host.focused(), Some(b));
}

#[test]
fn test_home_and_end() {
    let mut host = nested_list();
    let (a, b1, c) = (id(&host, "a"), id(&host, "b1"), id(&host, "c"));

    host.focus(a);
    press(&mut host, Key::Down);
    press(&mut host, Key::Down);
    assert_eq!(host.focused(), Some(b1));

    // Home bubbles up from the nested item to the list
    assert_eq!(press(&mut host, Key::Home), HandlerResult::Handled);
    assert_eq!(host.focused(), Some(a));

    assert_eq!(press(&mut host, Key::End), HandlerResult::Handled);
    assert_eq!(host.focused(), Some(c));
    assert_eq!(host.get_attribute(a, "tabindex"), None);
}

#[test]
fn test_home_and_end_skip_disabled_items() {
    let mut host = Host::new();
    let root = host.root();
    host.mount(
        root,
        task_list()
            .child(task_item("A").id("a").flag("disabled"))
            .child(task_item("B").id("b"))
            .child(task_item("C").id("c"))
            .child(task_item("D").id("d").flag("disabled")),
    )
    .unwrap();
    let items = ["a", "b", "c", "d"].map(|name| id(&host, name));
    let (b, c) = (items[1], items[2]);

    assert!(host.focus_next());
    assert_eq!(host.focused(), Some(b));
    press(&mut host, Key::Down);
    assert_eq!(host.focused(), Some(c));

    assert_eq!(press(&mut host, Key::Home), HandlerResult::Handled);
    assert_eq!(host.focused(), Some(b));
    assert_eq!(tabindex_holders(&host, &items), vec![b]);

    assert_eq!(press(&mut host, Key::End), HandlerResult::Handled);
    assert_eq!(host.focused(), Some(c));
    assert_eq!(tabindex_holders(&host, &items), vec![c]);
}

#[test]
fn test_arrow_left_to_disabled_parent_is_ignored() {
    let mut host = Host::new();
    let root = host.root();
    host.mount(
        root,
        task_list()
            .child(task_item("A").id("a"))
            .child(
                task_item("P")
                    .id("p")
                    .flag("disabled")
                    .child(task_item("P1").id("p1")),
            ),
    )
    .unwrap();
    let (p, p1) = (id(&host, "p"), id(&host, "p1"));

    host.focus_next();
    press(&mut host, Key::Down);
    assert_eq!(host.focused(), Some(p1));

    assert_eq!(press(&mut host, Key::Left), HandlerResult::IgnoredBubble);
    assert_eq!(host.focused(), Some(p1));
    assert_eq!(host.get_attribute(p, "tabindex"), None);
    assert_eq!(host.get_attribute(p1, "tabindex"), Some("0"));
}

#[test]
fn test_unhandled_keys_bubble() {
    let mut host = flat_list();
    host.focus_next();
    assert_eq!(press(&mut host, Key::Char('x')), HandlerResult::IgnoredBubble);
    assert_eq!(press(&mut host, Key::PageDown), HandlerResult::IgnoredBubble);
}

// ============================================================================
// Focus
// ============================================================================

#[test]
fn test_focus_leaving_the_list_keeps_tabindex() {
    let mut host = Host::new();
    let root = host.root();
    host.mount(
        root,
        task_list()
            .child(task_item("A").id("a"))
            .child(task_item("B").id("b")),
    )
    .unwrap();
    let button = host.create_element("button");
    host.set_attribute(button, "tabindex", "0");
    host.append_child(root, button).unwrap();

    let (a, b) = (id(&host, "a"), id(&host, "b"));
    host.focus(a);
    press(&mut host, Key::Down);
    assert_eq!(host.focused(), Some(b));

    press(&mut host, Key::Tab);
    assert_eq!(host.focused(), Some(button));
    assert_eq!(host.get_attribute(b, "tabindex"), Some("0"));

    // Shift+Tab returns to the roving item
    host.key_down(Key::Tab, Modifiers::shift());
    assert_eq!(host.focused(), Some(b));
}

#[test]
fn test_disabled_items_cannot_be_focused() {
    let mut host = flat_list();
    let b = id(&host, "b");
    host.set_attribute(b, "tabindex", "0");
    assert!(!host.focus(b));
    assert_eq!(host.get_attribute(b, "tabindex"), None);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_click_selects_and_notifies_once() {
    let mut host = flat_list();
    let a = id(&host, "a");

    assert_eq!(host.click(a), HandlerResult::Handled);
    assert_eq!(host.get_attribute(a, "aria-selected"), Some("true"));
    assert!(host.has_attribute(a, "selected"));
    assert_eq!(host.get_attribute(a, "class"), Some("selected"));

    let notifications = host.take_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].name, SELECTED_CHANGE);
    assert_eq!(notifications[0].target, a);
    let detail = notifications[0].detail.as_ref().unwrap();
    assert_eq!(detail.target, a);

    let list = host.component::<ListContainer>(id(&host, "list")).unwrap();
    assert_eq!(list.current_selected(), Some(a));
}

#[test]
fn test_selecting_another_item_deselects_previous() {
    let mut host = flat_list();
    let (a, c) = (id(&host, "a"), id(&host, "c"));

    host.click(a);
    host.click(c);

    assert!(!host.has_attribute(a, "selected"));
    assert_eq!(host.get_attribute(a, "aria-selected"), Some("false"));
    assert!(host.has_attribute(c, "selected"));
    assert_eq!(host.take_notifications().len(), 2);

    let list = host.component::<ListContainer>(id(&host, "list")).unwrap();
    assert_eq!(list.current_selected(), Some(c));
}

#[test]
fn test_enter_toggles_selection() {
    let mut host = flat_list();
    let a = id(&host, "a");
    host.focus_next();

    assert_eq!(press(&mut host, Key::Enter), HandlerResult::Handled);
    assert!(host.component::<ItemNode>(a).unwrap().is_selected());

    assert_eq!(press(&mut host, Key::Enter), HandlerResult::Handled);
    assert!(!host.component::<ItemNode>(a).unwrap().is_selected());
    assert_eq!(host.get_attribute(a, "aria-selected"), Some("false"));

    let names: Vec<String> = host
        .take_notifications()
        .into_iter()
        .map(|n| n.name)
        .collect();
    assert_eq!(names, vec![SELECTED_CHANGE, SELECTED_CHANGE]);
}

#[test]
fn test_disabled_item_swallows_click() {
    let mut host = flat_list();
    let b = id(&host, "b");

    assert_eq!(host.click(b), HandlerResult::Ignored);
    assert!(!host.has_attribute(b, "selected"));
    assert!(host.take_notifications().is_empty());
}

#[test]
fn test_enter_on_disabled_item_is_declined() {
    let mut host = flat_list();
    let b = id(&host, "b");

    assert_eq!(
        host.dispatch_key(b, Key::Enter, Modifiers::new()),
        HandlerResult::IgnoredBubble
    );
    assert!(!host.has_attribute(b, "selected"));
    assert_eq!(host.get_attribute(b, "aria-selected"), Some("false"));
    assert!(host.take_notifications().is_empty());
}

#[test]
fn test_nested_item_selection_reaches_list() {
    let mut host = nested_list();
    let (a, b1) = (id(&host, "a"), id(&host, "b1"));

    host.click(a);
    host.click(b1);

    assert!(!host.has_attribute(a, "selected"));
    assert!(host.has_attribute(b1, "selected"));
    // The parent item did not toggle itself
    assert!(!host.has_attribute(id(&host, "b"), "selected"));

    let list = host.component::<ListContainer>(id(&host, "list")).unwrap();
    assert_eq!(list.current_selected(), Some(b1));
}

#[test]
fn test_preselected_item_is_adopted() {
    let mut host = Host::new();
    let root = host.root();
    host.mount(
        root,
        task_list()
            .id("list")
            .child(task_item("A").id("a").flag("selected"))
            .child(task_item("B").id("b")),
    )
    .unwrap();
    let (a, b) = (id(&host, "a"), id(&host, "b"));

    let list = host.component::<ListContainer>(id(&host, "list")).unwrap();
    assert_eq!(list.current_selected(), Some(a));
    assert_eq!(host.get_attribute(a, "aria-selected"), Some("true"));

    host.click(b);
    assert!(!host.has_attribute(a, "selected"));
    assert!(host.has_attribute(b, "selected"));
}

#[test]
fn test_selected_observer_fires() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut host = flat_list();
    let a = id(&host, "a");
    let c = id(&host, "c");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    host.component_mut::<ItemNode>(a)
        .unwrap()
        .on_selected_change(move |selected| sink.borrow_mut().push(selected));

    host.click(a);
    host.click(c);

    assert_eq!(*seen.borrow(), vec![true, false]);
}

// ============================================================================
// Structure changes
// ============================================================================

#[test]
fn test_listeners_follow_item_set() {
    let mut host = flat_list();
    let list = id(&host, "list");
    assert_eq!(host.context().listener_count(SELECTED_CHANGE), 3);

    host.mount(list, task_item("D").id("d")).unwrap();
    assert_eq!(host.context().listener_count(SELECTED_CHANGE), 4);
    assert_eq!(host.component::<ListContainer>(list).unwrap().items().len(), 4);

    let a = id(&host, "a");
    host.remove(a);
    assert_eq!(host.context().listener_count(SELECTED_CHANGE), 3);

    host.remove(list);
    assert_eq!(host.context().listener_count(SELECTED_CHANGE), 0);
}

#[test]
fn test_removed_item_no_longer_notifies_list() {
    let mut host = flat_list();
    let list = id(&host, "list");
    let (a, c) = (id(&host, "a"), id(&host, "c"));

    host.click(a);
    host.remove(c);
    host.click(c);

    // The detached item toggles itself, the list is unaffected.
    assert!(host.has_attribute(a, "selected"));
    assert_eq!(
        host.component::<ListContainer>(list).unwrap().current_selected(),
        Some(a)
    );
}

#[test]
fn test_non_item_children_are_not_items() {
    let mut host = flat_list();
    let list = id(&host, "list");
    let divider = host.create_element("hr");
    host.append_child(list, divider).unwrap();

    let container = host.component::<ListContainer>(list).unwrap();
    assert_eq!(container.items().len(), 3);
    assert_eq!(container.slotted_items().len(), 4);
}

#[test]
fn test_removing_focused_item_clears_focus() {
    let mut host = flat_list();
    let a = id(&host, "a");
    host.focus(a);
    host.remove(a);
    assert_eq!(host.focused(), None);
}
