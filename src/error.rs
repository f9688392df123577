// model = "claude-opus-4-5"
// created = "2026-02-01"
// modified = "2026-02-01"
// driver = "Isaac Clayton"

//! Error taxonomy for rope operations and tree builders.

/// Error returned by rope operations and structural builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RopeError {
    /// An index or range fell outside the rope.
    OutOfRange,
    /// A builder was handed inputs that would violate the tree shape.
    InvalidArgument,
    /// An internal invariant failed to hold. Always a bug.
    Internal,
}

impl std::fmt::Display for RopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return match self {
            RopeError::OutOfRange => write!(f, "index out of range"),
            RopeError::InvalidArgument => write!(f, "argument violates tree invariants"),
            RopeError::Internal => write!(f, "internal invariant violated"),
        };
    }
}

impl std::error::Error for RopeError {}
