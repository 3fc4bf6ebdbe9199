use proptest::prelude::*;

use tasklist::markup::{task_item, task_list};
use tasklist::{Host, Key, ListContainer, Modifiers, NodeId};

#[derive(Debug, Clone)]
enum Action {
    Click(usize),
    Press(Key),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0usize..8).prop_map(Action::Click),
        prop_oneof![
            Just(Key::Up),
            Just(Key::Down),
            Just(Key::Home),
            Just(Key::End),
            Just(Key::Enter),
            Just(Key::Left),
            Just(Key::Right),
        ]
        .prop_map(Action::Press),
    ]
}

fn mount(disabled: &[bool]) -> (Host, Vec<NodeId>) {
    let mut host = Host::new();
    let root = host.root();
    let list = task_list().children(
        disabled
            .iter()
            .enumerate()
            .map(|(i, off)| task_item(format!("Item {i}")).flag_if("disabled", *off)),
    );
    let list = host.mount(root, list).unwrap();
    let items = host.component::<ListContainer>(list).unwrap().items().to_vec();
    (host, items)
}

fn holders(host: &Host, items: &[NodeId], attribute: &str, value: &str) -> Vec<NodeId> {
    items
        .iter()
        .copied()
        .filter(|item| host.get_attribute(*item, attribute) == Some(value))
        .collect()
}

proptest! {
    #[test]
    fn prop_at_most_one_item_selected(
        disabled in prop::collection::vec(any::<bool>(), 1..8),
        actions in prop::collection::vec(action(), 0..40),
    ) {
        let (mut host, items) = mount(&disabled);
        host.focus_next();

        for action in actions {
            match action {
                Action::Click(i) => {
                    host.click(items[i % items.len()]);
                }
                Action::Press(key) => {
                    host.key_down(key, Modifiers::new());
                }
            }
            prop_assert!(holders(&host, &items, "aria-selected", "true").len() <= 1);
        }
    }

    #[test]
    fn prop_roving_tabindex_follows_focus(
        disabled in prop::collection::vec(any::<bool>(), 1..8),
        keys in prop::collection::vec(
            prop_oneof![Just(Key::Up), Just(Key::Down), Just(Key::Home), Just(Key::End)],
            0..40,
        ),
    ) {
        let (mut host, items) = mount(&disabled);
        host.focus_next();

        for key in keys {
            host.key_down(key, Modifiers::new());
            let tabbable = holders(&host, &items, "tabindex", "0");
            prop_assert!(tabbable.len() <= 1);
            if let Some(focused) = host.focused() {
                prop_assert_eq!(tabbable, vec![focused]);
                prop_assert!(!host.has_attribute(focused, "disabled"));
            }
        }
    }
}
