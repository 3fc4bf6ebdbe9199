mod node;

pub use node::{Element, DOCUMENT_TAG, TEXT_TAG};

/// Handle to an element owned by a [`Document`](crate::Document).
///
/// Ids are arena indices and stay valid for the lifetime of the document,
/// including after the element has been detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
