use thiserror::Error;

/// The common error type produced by [crate::Format] implementations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The format could not encode a node
    #[error("Failed to serialize a node: {0}")]
    Serialization(String),

    /// The format could not decode some bytes
    #[error("Failed to deserialize a node: {0}")]
    Deserialization(String),

    /// A path segment did not name anything inside the node
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// A caller supplied a value the format cannot work with, such as an
    /// impossible CID version and hash combination
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
