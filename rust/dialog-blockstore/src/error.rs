use dialog_common::Cancelled;
use ipld_core::cid::Cid;
use thiserror::Error;

/// The common error type used by this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockStoreError {
    /// The store holds no block for the [Cid]
    #[error("Block not found: {0}")]
    NotFound(Cid),

    /// The operation was abandoned because its cancellation token fired
    #[error("Block store operation was cancelled")]
    Cancelled,

    /// An error that occurs when working with a storage backend
    #[error("Block store backend error: {0}")]
    Backend(String),
}

impl From<Cancelled> for BlockStoreError {
    fn from(_: Cancelled) -> Self {
        BlockStoreError::Cancelled
    }
}
