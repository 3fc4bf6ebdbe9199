//! Host error types.

use listdom::DomError;
use thiserror::Error;

/// Errors from host operations.
///
/// Widget handlers never produce these: missing relationships (no parent
/// item, no next item, an empty list) are silent no-ops. Only structural
/// edits, tag definitions and configuration can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("'{0}' is not a valid custom element name")]
    InvalidTagName(String),

    #[error("custom element '{0}' is already defined")]
    DuplicateTag(String),

    #[error("invalid color '{0}'")]
    InvalidColor(String),
}
