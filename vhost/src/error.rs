//! Registry errors.

use thiserror::Error;

/// Failures reported by round-robin selection.
///
/// Both are recoverable; the registry never retries on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("there is no open connections")]
    EmptyRegistry,

    #[error("could not find next host (cursor {cursor}, {len} hosts)")]
    CursorOutOfRange { cursor: usize, len: usize },
}

impl From<RegistryError> for ztunnel_shared::Error {
    fn from(err: RegistryError) -> Self {
        ztunnel_shared::Error::Registry(err.to_string())
    }
}
