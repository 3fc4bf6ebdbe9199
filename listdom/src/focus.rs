use crate::document::Document;
use crate::element::NodeId;

/// A completed focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChange {
    pub previous: Option<NodeId>,
    pub current: NodeId,
}

/// Tracks which element is currently focused.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<NodeId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused element.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Programmatically focus an element.
    /// Returns the change if focus moved.
    pub fn focus(&mut self, id: NodeId) -> Option<FocusChange> {
        if self.focused == Some(id) {
            return None;
        }
        let previous = self.focused.replace(id);
        Some(FocusChange {
            previous,
            current: id,
        })
    }

    /// Clear focus.
    /// Returns the element that lost focus, if any.
    pub fn blur(&mut self) -> Option<NodeId> {
        self.focused.take()
    }

    /// The element Tab would move focus to.
    pub fn next_candidate(&self, doc: &Document, root: NodeId) -> Option<NodeId> {
        let focusable = collect_focusable(doc, root);
        if focusable.is_empty() {
            return None;
        }

        let candidate = match self.focused {
            None => focusable[0],
            Some(current) => match focusable.iter().position(|id| *id == current) {
                Some(i) => focusable[(i + 1) % focusable.len()],
                None => first_after(doc, &focusable, current).unwrap_or(focusable[0]),
            },
        };

        (self.focused != Some(candidate)).then_some(candidate)
    }

    /// The element Shift+Tab would move focus to.
    pub fn prev_candidate(&self, doc: &Document, root: NodeId) -> Option<NodeId> {
        let focusable = collect_focusable(doc, root);
        if focusable.is_empty() {
            return None;
        }

        let last = focusable[focusable.len() - 1];
        let candidate = match self.focused {
            None => last,
            Some(current) => match focusable.iter().position(|id| *id == current) {
                Some(0) => last,
                Some(i) => focusable[i - 1],
                None => last_before(doc, &focusable, current).unwrap_or(last),
            },
        };

        (self.focused != Some(candidate)).then_some(candidate)
    }
}

/// Whether an element can take focus: connected, a non-negative `tabindex`
/// and not `disabled`.
pub fn is_focusable(doc: &Document, id: NodeId) -> bool {
    let tab_index = doc
        .get_attribute(id, "tabindex")
        .and_then(|v| v.trim().parse::<i32>().ok());
    matches!(tab_index, Some(i) if i >= 0)
        && !doc.has_attribute(id, "disabled")
        && doc.is_connected(id)
}

/// Collect all focusable elements under `root` in tree order.
pub fn collect_focusable(doc: &Document, root: NodeId) -> Vec<NodeId> {
    doc.descendants(root)
        .into_iter()
        .filter(|id| is_focusable(doc, *id))
        .collect()
}

// When the focused element has dropped out of the tab order (its tabindex was
// stripped), continue from its tree position rather than restarting.
fn first_after(doc: &Document, focusable: &[NodeId], current: NodeId) -> Option<NodeId> {
    let order = doc.descendants(doc.root());
    let pos = order.iter().position(|id| *id == current)?;
    focusable
        .iter()
        .copied()
        .find(|id| order.iter().position(|o| o == id).is_some_and(|p| p > pos))
}

fn last_before(doc: &Document, focusable: &[NodeId], current: NodeId) -> Option<NodeId> {
    let order = doc.descendants(doc.root());
    let pos = order.iter().position(|id| *id == current)?;
    focusable
        .iter()
        .rev()
        .copied()
        .find(|id| order.iter().position(|o| o == id).is_some_and(|p| p < pos))
}
