//! Debug assertion macros for ring log invariants.
//!
//! Active only in debug builds; release builds pay nothing.

/// Assert the occupancy count never exceeds capacity.
///
/// **Invariant**: `occupied_len() <= capacity()`
macro_rules! debug_assert_occupancy_bounded {
    ($occupied:expr, $capacity:expr) => {
        debug_assert!(
            $occupied <= $capacity,
            "occupancy accounting violated: {} occupied slots with capacity {}",
            $occupied,
            $capacity
        )
    };
}

/// Assert every slot inside the occupied window holds a record.
///
/// **Invariant**: a slot is occupied iff it lies in the cyclic range
/// `[out_off, in_off)`, or all slots when full.
macro_rules! debug_assert_window_occupied {
    ($all_present:expr) => {
        debug_assert!(
            $all_present,
            "occupancy window violated: empty slot inside [out_off, in_off)"
        )
    };
}

/// Assert logical size equals the sum of occupied record lengths.
///
/// **Invariant**: `logical_size() == Σ len(occupied records)`
macro_rules! debug_assert_size_accounting {
    ($logical:expr, $summed:expr) => {
        debug_assert!(
            $logical == $summed,
            "size accounting violated: logical_size {} != summed {}",
            $logical,
            $summed
        )
    };
}

pub(crate) use debug_assert_occupancy_bounded;
pub(crate) use debug_assert_size_accounting;
pub(crate) use debug_assert_window_occupied;
