//! Error types for format operations

use std::fmt;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during parsing
    ParseError(String),
    /// Error during serialization
    SerializationError(String),
    /// Format does not support the requested operation
    NotSupported(String),
    /// A block references an entity key that is absent from the entity map
    MissingEntity { block: usize, key: u32 },
    /// An atomic block has no entity range to render
    AtomicWithoutEntity { block: usize },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
            FormatError::MissingEntity { block, key } => {
                write!(f, "Block {block} references entity {key}, which is not in the entity map")
            }
            FormatError::AtomicWithoutEntity { block } => {
                write!(f, "Atomic block {block} has no entity range")
            }
        }
    }
}

impl std::error::Error for FormatError {}
