//! Growth policy configuration.

use std::error::Error;
use std::fmt;

/// How a [`DynamicArray`](crate::DynamicArray) picks its next capacity
/// when an append finds it full.
///
/// An empty array jumps to `initial_capacity`; a full one multiplies its
/// capacity by `growth_factor`. Geometric growth keeps the total relocation
/// work of N appends at O(N).
///
/// Fields are private: a policy obtained from [`GrowthPolicy::new`] or
/// [`Default`] is always valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GrowthPolicy {
    initial_capacity: usize,
    growth_factor: usize,
}

impl GrowthPolicy {
    /// Default capacity of the first allocation made by an append.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 8;

    /// Default multiplier applied to a full array's capacity.
    pub const DEFAULT_GROWTH_FACTOR: usize = 2;

    /// The default policy: start at 8 slots, then double.
    pub const DEFAULT: Self = Self {
        initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
        growth_factor: Self::DEFAULT_GROWTH_FACTOR,
    };

    /// Create a validated policy.
    ///
    /// `initial_capacity` must be at least 1 and `growth_factor` at least 2,
    /// otherwise appends could never make room.
    pub fn new(initial_capacity: usize, growth_factor: usize) -> Result<Self, GrowthPolicyError> {
        if initial_capacity == 0 {
            return Err(GrowthPolicyError::ZeroInitialCapacity);
        }
        if growth_factor < 2 {
            return Err(GrowthPolicyError::GrowthFactorTooSmall {
                factor: growth_factor,
            });
        }
        Ok(Self {
            initial_capacity,
            growth_factor,
        })
    }

    /// Capacity of the first allocation made by an append.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Multiplier applied to a full array's capacity.
    pub fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    /// Capacity to grow to from `current`.
    ///
    /// Saturates at `usize::MAX`; the layout check downstream turns an
    /// unrepresentable request into a capacity-overflow error.
    pub fn next_capacity(&self, current: usize) -> usize {
        if current == 0 {
            self.initial_capacity
        } else {
            current.saturating_mul(self.growth_factor)
        }
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Errors detected by [`GrowthPolicy::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrowthPolicyError {
    /// The first allocation would hold no elements.
    ZeroInitialCapacity,
    /// A factor below 2 would not grow a full array.
    GrowthFactorTooSmall {
        /// The rejected factor.
        factor: usize,
    },
}

impl fmt::Display for GrowthPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInitialCapacity => write!(f, "initial capacity must be at least 1"),
            Self::GrowthFactorTooSmall { factor } => {
                write!(f, "growth factor must be at least 2, got {factor}")
            }
        }
    }
}

impl Error for GrowthPolicyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_starts_at_eight_and_doubles() {
        let policy = GrowthPolicy::default();
        assert_eq!(policy.next_capacity(0), 8);
        assert_eq!(policy.next_capacity(8), 16);
        assert_eq!(policy.next_capacity(16), 32);
    }

    #[test]
    fn custom_policy_is_honoured() {
        let policy = GrowthPolicy::new(3, 4).unwrap();
        assert_eq!(policy.initial_capacity(), 3);
        assert_eq!(policy.growth_factor(), 4);
        assert_eq!(policy.next_capacity(0), 3);
        assert_eq!(policy.next_capacity(3), 12);
    }

    #[test]
    fn rejects_degenerate_values() {
        assert_eq!(
            GrowthPolicy::new(0, 2),
            Err(GrowthPolicyError::ZeroInitialCapacity)
        );
        assert_eq!(
            GrowthPolicy::new(8, 1),
            Err(GrowthPolicyError::GrowthFactorTooSmall { factor: 1 })
        );
    }

    #[test]
    fn next_capacity_saturates() {
        let policy = GrowthPolicy::default();
        assert_eq!(policy.next_capacity(usize::MAX / 2 + 1), usize::MAX);
    }
}
