//! LSD radix sort for numeric slices
//!
//! This crate sorts slices of `f32`, `f64`, `isize`, `i32`, `i64`, `usize`,
//! `u32` and `u64` with a least-significant-digit radix sort over 8-bit
//! digits. Negative integers and floats are ordered correctly, NaNs are
//! moved to the front, already-sorted input exits after a single pass, and
//! a [`Sorter`] can keep scratch buffers alive across calls.
//!
//! ```
//! use numsort::{sort, Sequence};
//!
//! let mut offsets = vec![0x40u64, 0x10, 0x30, 0x10];
//! sort(Sequence::from(&mut offsets)).unwrap();
//! assert_eq!(offsets, [0x10, 0x10, 0x30, 0x40]);
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

pub mod error;
pub mod config;

// Sorting engine
pub mod radix_key;
pub mod radix_sort;
pub mod comparison_sort;
pub mod sequence;
pub mod sorter;

// Command-line driver
pub mod core_sort;

// Re-export commonly used types
pub use comparison_sort::Sortable;
pub use config::{NumericKind, SortConfig};
pub use error::{SortError, SortResult};
pub use radix_key::RadixKey;
pub use radix_sort::{sort_in_place, sort_with_scratch, try_sort_with_scratch};
pub use sequence::{sort, sort_to_copy, NumericVec, Sequence};
pub use sorter::Sorter;

/// Exit codes matching GNU sort
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const SORT_FAILURE: i32 = 2;

/// Runs the command-line operation described by `config`
pub fn run(config: &SortConfig) -> SortResult<i32> {
    let core_sort = crate::core_sort::CoreSort::new(config.clone());
    core_sort.sort()
}
