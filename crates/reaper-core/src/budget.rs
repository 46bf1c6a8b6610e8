//! Size thresholds derived from the configured maximum

/// Fraction of the ceiling that eviction shrinks the cache down to, as
/// numerator/denominator. Fixed at 80%.
const FLOOR_NUMERATOR: u128 = 4;
const FLOOR_DENOMINATOR: u128 = 5;

/// The two thresholds a reap cycle works against
///
/// Crossing the ceiling triggers a reap; eviction then continues until the
/// cache is at or below the floor, so the next cycle does not immediately
/// have to reap again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    ceiling: u64,
    floor: u64,
}

impl Budget {
    /// Derive the budget for a maximum size in bytes
    pub fn new(max_size_bytes: u64) -> Self {
        let floor = (max_size_bytes as u128 * FLOOR_NUMERATOR / FLOOR_DENOMINATOR) as u64;
        Self {
            ceiling: max_size_bytes,
            floor,
        }
    }

    /// Hard ceiling (the configured maximum)
    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    /// Target floor (80% of the ceiling)
    pub fn floor(&self) -> u64 {
        self.floor
    }

    /// Whether a cache of `size` bytes must be reaped
    ///
    /// A cache sitting exactly at the ceiling is still within budget.
    pub fn is_exceeded_by(&self, size: u64) -> bool {
        size > self.ceiling
    }

    /// Whether eviction can stop at `size` bytes
    pub fn is_satisfied_by(&self, size: u64) -> bool {
        size <= self.floor
    }
}
