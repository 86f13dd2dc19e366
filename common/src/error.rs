use thiserror::Error;

/// Convenience alias used throughout the reservoir crates
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building or driving a reservoir
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Two operands had incompatible shapes, given as `(rows, cols)`
    #[error("dimension mismatch in {op}: left is {left:?}, right is {right:?}")]
    DimensionMismatch {
        /// The operation that was attempted
        op: &'static str,
        /// Shape of the receiver
        left: (usize, usize),
        /// Shape of the argument
        right: (usize, usize),
    },

    /// A node with this identifier is already registered
    #[error("node id {0:?} is already registered")]
    DuplicateId(String),

    /// A parameter is outside of its valid range
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Name of the offending field
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Rows passed to a matrix constructor did not all have the same length
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        /// Index of the first offending row
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        found: usize,
    },

    /// A named matrix entry whose key is not `{prefix}_{row}_{col}`
    #[error("malformed entry key {0:?}")]
    MalformedKey(String),
}

impl Error {
    /// Shorthand for a [`Error::DimensionMismatch`]
    pub fn dimension_mismatch(op: &'static str, left: (usize, usize), right: (usize, usize)) -> Self {
        Error::DimensionMismatch { op, left, right }
    }

    /// Shorthand for an [`Error::InvalidParameter`]
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
