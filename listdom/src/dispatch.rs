//! Handler chaining along the ancestor path.

use crate::document::Document;
use crate::element::NodeId;

/// Outcome of a single handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerResult {
    /// The handler acted. Default is prevented and propagation stops.
    Handled,
    /// The handler declined and swallows the event. Propagation stops,
    /// default is left alone.
    Ignored,
    /// The handler declined. The event continues to the next ancestor.
    IgnoredBubble,
}

impl HandlerResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, HandlerResult::Handled)
    }

    /// Whether the dispatcher should keep walking ancestors.
    pub fn continues(&self) -> bool {
        matches!(self, HandlerResult::IgnoredBubble)
    }
}

/// The target followed by its ancestors (document root excluded).
pub fn propagation_path(doc: &Document, target: NodeId) -> Vec<NodeId> {
    std::iter::once(target)
        .chain(doc.ancestors(target))
        .filter(|id| *id != doc.root())
        .collect()
}
