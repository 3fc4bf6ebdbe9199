//! Capabilities shared by item widgets.

use listdom::{Document, NodeId};

/// Slot name for leading decorations (icons, checkboxes).
pub const START_SLOT: &str = "start";
/// Slot name for trailing decorations (badges, actions).
pub const END_SLOT: &str = "end";

/// A widget that projects children into `start` and `end` slots.
///
/// Children opt in with `slot="start"` or `slot="end"`; anything else is
/// default content.
pub trait HasEdgeSlots {
    /// Children currently projected into the start slot, in DOM order.
    fn start_slot(&self) -> &[NodeId];

    /// Children currently projected into the end slot, in DOM order.
    fn end_slot(&self) -> &[NodeId];

    fn has_start(&self) -> bool {
        !self.start_slot().is_empty()
    }

    fn has_end(&self) -> bool {
        !self.end_slot().is_empty()
    }
}

/// Direct element children of `node` assigned to `slot`.
pub(crate) fn slotted(doc: &Document, node: NodeId, slot: &str) -> Vec<NodeId> {
    doc.element_children(node)
        .into_iter()
        .filter(|child| doc.get_attribute(*child, "slot") == Some(slot))
        .collect()
}
