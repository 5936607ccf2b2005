//! Error types for sqldom.

use thiserror::Error;

use crate::ast::{Key, NodeId};

/// The main error type for compiling and rendering SQL.
#[derive(Debug, Error)]
pub enum SqlDomError {
    /// UPDATE, DELETE or INSERT without a target table.
    #[error("{statement} statement has no target table")]
    MissingTarget { statement: &'static str },

    /// A foreign key with no referencing or referenced columns.
    #[error("Foreign key '{constraint}' has an empty {side} column list")]
    EmptyForeignKeyColumns {
        constraint: String,
        side: &'static str,
    },

    /// Referencing and referenced column lists differ in length.
    #[error("Foreign key '{constraint}' references {referenced} columns with {referencing}")]
    ForeignKeyColumnMismatch {
        constraint: String,
        referencing: usize,
        referenced: usize,
    },

    #[error("Sequence increment must not be zero")]
    ZeroSequenceIncrement,

    /// Start, minimum and maximum values are not ordered.
    #[error("Invalid sequence bounds: {0}")]
    InvalidSequenceBounds(String),

    #[error("Sequence has no name")]
    MissingSequenceName,

    #[error("Sequence '{0}' has no schema")]
    MissingSequenceSchema(String),

    /// An UPDATE assignment targets a column of another table.
    #[error("Column '{column}' is not bound to the updated table")]
    UnboundUpdateColumn { column: String },

    /// A node was entered while already on the traversal path.
    #[error("Circular reference detected at node {0}")]
    CircularReference(NodeId),

    #[error("View '{0}' has no defining query")]
    MissingViewDefinition(String),

    #[error("Comment contains forbidden characters: {0:?}")]
    InvalidComment(String),

    /// The dialect has no rendering for the requested construct.
    #[error("{0} is not supported by this dialect")]
    NotSupported(String),

    /// Lookup of a parameter that was never compiled or was explicitly named.
    #[error("Parameter {0} was not found in the compilation result")]
    ParameterNotFound(NodeId),

    #[error("No value supplied for placeholder '{0}'")]
    UnresolvedPlaceholder(String),

    #[error("No dynamic filter values supplied for '{0}'")]
    MissingFilterValues(Key),

    /// A cycle row is narrower than the body template expects.
    #[error("Dynamic filter '{key}' row has {width} values, item {index} requested")]
    FilterRowMismatch { key: Key, width: usize, index: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SqlDomError {
    /// Create a not-supported error.
    pub fn not_supported(what: impl Into<String>) -> Self {
        Self::NotSupported(what.into())
    }

    /// Whether this error reports malformed input to the compiler.
    pub fn is_compiler_error(&self) -> bool {
        matches!(
            self,
            Self::MissingTarget { .. }
                | Self::EmptyForeignKeyColumns { .. }
                | Self::ForeignKeyColumnMismatch { .. }
                | Self::ZeroSequenceIncrement
                | Self::InvalidSequenceBounds(_)
                | Self::MissingSequenceName
                | Self::MissingSequenceSchema(_)
                | Self::UnboundUpdateColumn { .. }
                | Self::CircularReference(_)
                | Self::MissingViewDefinition(_)
                | Self::InvalidComment(_)
        )
    }

    /// Whether this error reports a gap in the dialect's feature set.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported(_))
    }
}

/// Result type alias for sqldom operations.
pub type SqlDomResult<T> = Result<T, SqlDomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SqlDomError::MissingTarget {
            statement: "UPDATE",
        };
        assert_eq!(err.to_string(), "UPDATE statement has no target table");
        assert!(err.is_compiler_error());
        assert!(!err.is_not_supported());
    }

    #[test]
    fn test_not_supported_classification() {
        let err = SqlDomError::not_supported("FOR SHARE");
        assert_eq!(err.to_string(), "FOR SHARE is not supported by this dialect");
        assert!(err.is_not_supported());
        assert!(!err.is_compiler_error());
    }
}
