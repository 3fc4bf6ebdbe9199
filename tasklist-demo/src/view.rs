//! Turns the document into terminal rows.

use listdom::{displayed_nodes, query_selector_all, Document, NodeId, Rgb, Selector};
use tasklist::{HasEdgeSlots, Host, ItemNode, SimpleTag};

use crate::terminal::Line;

const LISTS: &[(&str, &str)] = &[("list", "listitem"), ("tree", "treeitem")];

/// Text directly inside `node`, ignoring nested elements.
fn own_text(doc: &Document, node: NodeId) -> String {
    doc.children(node)
        .iter()
        .filter(|child| !doc.is_element(**child))
        .map(|child| doc.text_content(*child))
        .collect::<String>()
        .trim()
        .to_string()
}

fn depth(doc: &Document, node: NodeId, item: &Selector) -> usize {
    doc.ancestors(node)
        .filter(|id| item.matches(doc, *id))
        .count()
}

fn token(host: &Host, node: NodeId, name: &str) -> Option<Rgb> {
    host.resolve_token(node, name).map(|color| color.to_rgb())
}

fn item_line(host: &Host, node: NodeId, item_selector: &Selector) -> Line {
    let doc = host.document();
    let Some(item) = host.component::<ItemNode>(node) else {
        return Line::plain(own_text(doc, node));
    };

    let indent = "  ".repeat(depth(doc, node, item_selector) + 1);
    let disclosure = match (item.is_expandable(), item.roles().collapsible, item.is_expanded()) {
        (false, _, _) => "  ",
        (true, true, false) => "▸ ",
        _ => "▾ ",
    };
    let check = if item.is_selected() { "[x]" } else { "[ ]" };
    let cursor = if host.focused() == Some(node) { ">" } else { " " };
    let tab = if doc.get_attribute(node, "tabindex") == Some("0") { " ·" } else { "" };
    let edges = if item.has_start() || item.has_end() { " +" } else { "" };

    let mut line = Line::plain(format!(
        "{cursor}{indent}{disclosure}{check} {}{edges}{tab}",
        own_text(doc, node)
    ));
    line.node = Some(node);
    line.dim = item.is_disabled();
    line.bold = host.focused() == Some(node);
    if let Some(fg) = token(host, node, "neutral-foreground-rest") {
        line.fg = if item.is_disabled() { Rgb::new(128, 128, 128) } else { fg };
    }
    if item.is_selected() {
        line.bg = token(host, node, "neutral-fill-stealth-selected");
    }
    line
}

/// All rows, top to bottom.
pub fn lines(host: &Host, status: &str) -> Vec<Line> {
    let doc = host.document();
    let root = host.root();
    let mut lines = Vec::new();

    for tag in query_selector_all(doc, root, &Selector::tag(tasklist::widgets::SIMPLE_TAG)) {
        let mut line = Line::plain(format!(" {}", own_text(doc, tag)));
        line.bold = true;
        line.fg = token(host, tag, "neutral-foreground-rest").unwrap_or(line.fg);
        line.bg = host
            .component::<SimpleTag>(tag)
            .and_then(SimpleTag::background)
            .and_then(listdom::Color::parse)
            .map(|color| color.to_rgb());
        lines.push(line);
    }
    lines.push(Line::plain(""));

    for &(container, item) in LISTS {
        let item = Selector::role(item);
        for list in query_selector_all(doc, root, &Selector::role(container)) {
            let title = doc.get_attribute(list, "aria-label").unwrap_or(container);
            lines.push(Line::plain(format!(" {title}")));
            lines.extend(
                displayed_nodes(doc, list, &item)
                    .into_iter()
                    .map(|node| item_line(host, node, &item)),
            );
            lines.push(Line::plain(""));
        }
    }

    let mut help = Line::plain(" ↑/↓ move  ←/→ collapse/expand  Home/End  Enter/click select  Tab  q quit");
    help.dim = true;
    lines.push(help);
    lines.push(Line::plain(format!(" {status}")));
    lines
}
