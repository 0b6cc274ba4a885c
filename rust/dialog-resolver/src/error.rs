use dialog_blockstore::BlockStoreError;
use dialog_common::Cancelled;
use dialog_format::{Cid, FormatError, describe_codec};
use thiserror::Error;

/// The common error type used by this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// No format is registered for the code and none could be loaded
    #[error("No format registered for {name} (0x{code:x})")]
    UnknownFormat {
        /// The multicodec code that was requested
        code: u64,
        /// The human readable name of that code
        name: String,
    },

    /// A format was registered for a code that is already taken
    #[error("A format is already registered for {name} (0x{code:x})")]
    AlreadyRegistered {
        /// The multicodec code that is taken
        code: u64,
        /// The human readable name of that code
        name: String,
    },

    /// A parameter had an unusable value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The block store holds no block for the [Cid]
    #[error("Block not found: {0}")]
    NotFound(Cid),

    /// The operation was abandoned because its cancellation token fired
    #[error("Operation was cancelled")]
    Cancelled,

    /// A format could not encode a node
    #[error("Failed to serialize a node: {0}")]
    Serialization(String),

    /// A format could not decode a block
    #[error("Failed to deserialize a node: {0}")]
    Deserialization(String),

    /// A path did not exist inside a node
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// The block store failed for a reason other than a missing block
    #[error("Block store error: {0}")]
    Storage(String),

    /// A format loader failed
    #[error("Failed to load format: {0}")]
    Loader(String),
}

impl ResolverError {
    /// The [ResolverError::UnknownFormat] error for `code`
    pub fn unknown_format(code: u64) -> Self {
        ResolverError::UnknownFormat {
            code,
            name: describe_codec(code),
        }
    }

    /// The [ResolverError::AlreadyRegistered] error for `code`
    pub fn already_registered(code: u64) -> Self {
        ResolverError::AlreadyRegistered {
            code,
            name: describe_codec(code),
        }
    }
}

impl From<FormatError> for ResolverError {
    fn from(value: FormatError) -> Self {
        match value {
            FormatError::Serialization(message) => ResolverError::Serialization(message),
            FormatError::Deserialization(message) => ResolverError::Deserialization(message),
            FormatError::PathNotFound(path) => ResolverError::PathNotFound(path),
            FormatError::InvalidArgument(message) => ResolverError::InvalidArgument(message),
        }
    }
}

impl From<BlockStoreError> for ResolverError {
    fn from(value: BlockStoreError) -> Self {
        match value {
            BlockStoreError::NotFound(cid) => ResolverError::NotFound(cid),
            BlockStoreError::Cancelled => ResolverError::Cancelled,
            BlockStoreError::Backend(message) => ResolverError::Storage(message),
        }
    }
}

impl From<Cancelled> for ResolverError {
    fn from(_: Cancelled) -> Self {
        ResolverError::Cancelled
    }
}
