use thiserror::Error;

use crate::element::NodeId;

/// Errors from structural edits of a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("node {0} does not belong to this document")]
    UnknownNode(NodeId),

    #[error("cannot insert {child} into {parent}: it would become its own ancestor")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("{child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("text node {0} cannot have children")]
    TextParent(NodeId),
}
