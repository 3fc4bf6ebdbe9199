use listdom::{
    closest, closest_within, collect_focusable, displayed_nodes, is_focusable, query_selector,
    query_selector_all, Document, FocusState, NodeId, Selector,
};

struct Fixture {
    doc: Document,
    list: NodeId,
    a: NodeId,
    b: NodeId,
    b1: NodeId,
    c: NodeId,
}

/// list > [a, b > [b1], c]
fn fixture() -> Fixture {
    let mut doc = Document::new();
    let list = doc.create_element("my-task-list");
    doc.set_attribute(list, "role", "list");
    let item = |doc: &mut Document, parent: NodeId| {
        let id = doc.create_element("my-task-item");
        doc.set_attribute(id, "role", "listitem");
        doc.append_child(parent, id).unwrap();
        id
    };
    doc.append_child(doc.root(), list).unwrap();
    let a = item(&mut doc, list);
    let b = item(&mut doc, list);
    let b1 = item(&mut doc, b);
    let c = item(&mut doc, list);
    Fixture {
        doc,
        list,
        a,
        b,
        b1,
        c,
    }
}

// ============================================================================
// Selectors
// ============================================================================

#[test]
fn test_closest_is_inclusive() {
    let f = fixture();
    let item = Selector::role("listitem");
    assert_eq!(closest(&f.doc, f.b1, &item), Some(f.b1));
    assert_eq!(closest(&f.doc, f.b1, &Selector::role("list")), Some(f.list));
    assert_eq!(closest(&f.doc, f.list, &item), None);
}

#[test]
fn test_closest_within_stops_at_boundary() {
    let f = fixture();
    let item = Selector::role("listitem");
    let list = Selector::role("list");
    assert_eq!(closest_within(&f.doc, f.b, &item, &list), Some(f.b));
    assert_eq!(closest_within(&f.doc, f.list, &item, &list), None);
}

#[test]
fn test_query_selector_pre_order() {
    let mut f = fixture();
    f.doc.set_attribute(f.b1, "aria-selected", "true");
    f.doc.set_attribute(f.c, "aria-selected", "true");
    let selected = Selector::attr_eq("aria-selected", "true");
    assert_eq!(query_selector(&f.doc, f.list, &selected), Some(f.b1));
    assert_eq!(query_selector_all(&f.doc, f.list, &selected), vec![f.b1, f.c]);
    assert_eq!(query_selector_all(&f.doc, f.list, &Selector::tag("my-task-item")).len(), 4);
}

#[test]
fn test_displayed_nodes_flatten_in_document_order() {
    let f = fixture();
    assert_eq!(
        displayed_nodes(&f.doc, f.list, &Selector::role("listitem")),
        vec![f.a, f.b, f.b1, f.c]
    );
}

#[test]
fn test_displayed_nodes_skip_hidden_and_collapsed() {
    let mut f = fixture();
    f.doc.set_attribute(f.b, "aria-expanded", "false");
    assert_eq!(
        displayed_nodes(&f.doc, f.list, &Selector::role("listitem")),
        vec![f.a, f.b, f.c]
    );

    f.doc.set_attribute(f.b, "aria-expanded", "true");
    f.doc.toggle_attribute(f.a, "hidden", true);
    assert_eq!(
        displayed_nodes(&f.doc, f.list, &Selector::role("listitem")),
        vec![f.b, f.b1, f.c]
    );
}

// ============================================================================
// Focus
// ============================================================================

#[test]
fn test_focusable_requires_tabindex_and_enabled() {
    let mut f = fixture();
    assert!(!is_focusable(&f.doc, f.a));
    f.doc.set_attribute(f.a, "tabindex", "0");
    assert!(is_focusable(&f.doc, f.a));
    f.doc.set_attribute(f.a, "tabindex", "-1");
    assert!(!is_focusable(&f.doc, f.a));
    f.doc.set_attribute(f.a, "tabindex", "0");
    f.doc.toggle_attribute(f.a, "disabled", true);
    assert!(!is_focusable(&f.doc, f.a));
}

#[test]
fn test_tab_cycles_through_tab_order() {
    let mut f = fixture();
    f.doc.set_attribute(f.a, "tabindex", "0");
    f.doc.set_attribute(f.c, "tabindex", "0");
    assert_eq!(collect_focusable(&f.doc, f.doc.root()), vec![f.a, f.c]);

    let mut focus = FocusState::new();
    let root = f.doc.root();
    assert_eq!(focus.next_candidate(&f.doc, root), Some(f.a));
    focus.focus(f.a);
    assert_eq!(focus.next_candidate(&f.doc, root), Some(f.c));
    focus.focus(f.c);
    assert_eq!(focus.next_candidate(&f.doc, root), Some(f.a));
    assert_eq!(focus.prev_candidate(&f.doc, root), Some(f.a));
}

#[test]
fn test_tab_continues_from_element_that_left_tab_order() {
    let mut f = fixture();
    f.doc.set_attribute(f.a, "tabindex", "0");
    f.doc.set_attribute(f.c, "tabindex", "0");

    let mut focus = FocusState::new();
    focus.focus(f.b1);
    let root = f.doc.root();
    assert_eq!(focus.next_candidate(&f.doc, root), Some(f.c));
    assert_eq!(focus.prev_candidate(&f.doc, root), Some(f.a));
}

#[test]
fn test_focus_reports_previous() {
    let f = fixture();
    let mut focus = FocusState::new();
    let first = focus.focus(f.a).unwrap();
    assert_eq!(first.previous, None);
    assert!(focus.focus(f.a).is_none());
    let second = focus.focus(f.c).unwrap();
    assert_eq!(second.previous, Some(f.a));
    assert_eq!(focus.blur(), Some(f.c));
    assert_eq!(focus.focused(), None);
}
