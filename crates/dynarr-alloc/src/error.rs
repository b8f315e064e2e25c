//! Allocation error types.

use std::error::Error;
use std::fmt;

/// Errors raised when an allocation strategy cannot supply storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The requested element count does not fit in a valid layout
    /// (its byte size would exceed `isize::MAX`).
    CapacityOverflow {
        /// Number of elements requested.
        requested: usize,
    },
    /// The strategy could not provide a block of the requested layout.
    Exhausted {
        /// Size of the rejected request in bytes.
        size: usize,
        /// Alignment of the rejected request in bytes.
        align: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} elements requested")
            }
            Self::Exhausted { size, align } => {
                write!(f, "allocation failed: {size} bytes with alignment {align}")
            }
        }
    }
}

impl Error for AllocError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_request() {
        let err = AllocError::Exhausted { size: 64, align: 8 };
        assert_eq!(
            err.to_string(),
            "allocation failed: 64 bytes with alignment 8"
        );

        let err = AllocError::CapacityOverflow {
            requested: usize::MAX,
        };
        assert!(err.to_string().contains("capacity overflow"));
    }
}
