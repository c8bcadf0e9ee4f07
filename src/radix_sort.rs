//! LSD radix sort over 8-bit digits for every `RadixKey` type.
//!
//! Each pass histograms one byte and checks sortedness in the same sweep, so
//! data that is already ordered stops after a single read. The caller's slice
//! and the scratch buffer trade roles every pass; when the last pass leaves
//! the result in scratch it is copied back once at the end.

use crate::error::{SortError, SortResult};
use crate::radix_key::{quarantine_nans, RadixKey};
use log::trace;

const RADIX: usize = 256;

/// Sorts `x` ascending.
///
/// Slices shorter than the kind's threshold use a comparison sort; larger
/// ones allocate a scratch buffer of `x.len()` and radix sort.
pub fn sort_in_place<T: RadixKey>(x: &mut [T]) {
    if x.len() < T::MIN_SIZE {
        T::fallback_sort(x);
        return;
    }

    let mut scratch = vec![T::default(); x.len()];
    radix_passes(x, &mut scratch);
}

/// Sorts `x` ascending using `scratch` as the second ping-pong buffer.
///
/// Always takes the radix path, even for tiny slices.
///
/// # Panics
///
/// Panics if `scratch` is shorter than `x`. The check happens before `x`
/// is touched.
pub fn sort_with_scratch<T: RadixKey>(x: &mut [T], scratch: &mut [T]) {
    if scratch.len() < x.len() {
        panic!(
            "scratch buffer too small: need {} elements, have {}",
            x.len(),
            scratch.len()
        );
    }
    radix_passes(x, scratch);
}

/// Checked variant of [`sort_with_scratch`].
pub fn try_sort_with_scratch<T: RadixKey>(x: &mut [T], scratch: &mut [T]) -> SortResult<()> {
    if scratch.len() < x.len() {
        return Err(SortError::scratch_too_small(x.len(), scratch.len()));
    }
    radix_passes(x, scratch);
    Ok(())
}

/// Returns a sorted copy of `x`, leaving `x` untouched.
pub fn sort_to_copy<T: RadixKey>(x: &[T]) -> Vec<T> {
    let mut copy = x.to_vec();
    sort_in_place(&mut copy);
    copy
}

/// Runs the digit passes and returns how many scatter passes were needed.
///
/// Caller guarantees `scratch.len() >= x.len()`. The sorted result always
/// ends up in `x`.
pub(crate) fn radix_passes<T: RadixKey>(x: &mut [T], scratch: &mut [T]) -> usize {
    debug_assert!(scratch.len() >= x.len());
    if x.len() < 2 {
        return 0;
    }

    // NaNs go up front and take no part in the digit passes
    let nans = quarantine_nans(x);
    let n = x.len() - nans;

    let mut active: &mut [T] = &mut x[nans..];
    let mut spare: &mut [T] = &mut scratch[..n];
    // true while `active` is the scratch buffer rather than the caller's slice
    let mut in_scratch = false;

    let passes = T::passes();
    let mut offsets = [0usize; RADIX];

    for pass in 0..passes {
        let mut counts = [0usize; RADIX];
        let mut sorted = true;
        let mut prev = T::LOWEST;

        for &elem in active.iter() {
            counts[elem.digit(pass)] += 1;
            if sorted {
                sorted = prev.in_order(elem);
                prev = elem;
            }
        }

        if sorted {
            if in_scratch {
                spare.copy_from_slice(active);
            }
            trace!("radix sort of {} keys finished early after {} passes", n, pass);
            return pass;
        }

        bucket_offsets(&counts, &mut offsets, T::SIGNED && pass == passes - 1);

        // Stable scatter into the spare buffer
        for &elem in active.iter() {
            let digit = elem.digit(pass);
            spare[offsets[digit]] = elem;
            offsets[digit] += 1;
        }

        std::mem::swap(&mut active, &mut spare);
        in_scratch = !in_scratch;
    }

    if in_scratch {
        spare.copy_from_slice(active);
    }
    passes
}

/// Turns a digit histogram into bucket start offsets.
///
/// With `split_sign` the buckets for bytes `128..=255` (negative values in
/// the top byte of a two's-complement key) come first.
fn bucket_offsets(counts: &[usize; RADIX], offsets: &mut [usize; RADIX], split_sign: bool) {
    const HALF: usize = RADIX / 2;

    if split_sign {
        let negatives: usize = counts[HALF..].iter().sum();
        offsets[HALF] = 0;
        offsets[0] = negatives;
        for i in 1..HALF {
            offsets[i] = offsets[i - 1] + counts[i - 1];
            offsets[i + HALF] = offsets[i + HALF - 1] + counts[i + HALF - 1];
        }
    } else {
        offsets[0] = 0;
        for i in 1..RADIX {
            offsets[i] = offsets[i - 1] + counts[i - 1];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radix_sort_simple_integers() {
        let mut data = vec![456u32, 123, 1, 789];
        let mut scratch = vec![0u32; 4];
        sort_with_scratch(&mut data, &mut scratch);
        assert_eq!(data, vec![1, 123, 456, 789]);
    }

    #[test]
    fn test_negative_numbers() {
        let mut data = vec![-5i32, 3, -1, 0, i32::MAX, i32::MIN];
        let mut scratch = vec![0i32; data.len()];
        sort_with_scratch(&mut data, &mut scratch);
        assert_eq!(data, vec![i32::MIN, -5, -1, 0, 3, i32::MAX]);
    }

    #[test]
    fn test_float_nans_first() {
        let mut data = vec![f64::NAN, -0.0, 3.5, f64::NAN, -2.0];
        let mut scratch = vec![0.0f64; data.len()];
        sort_with_scratch(&mut data, &mut scratch);
        assert!(data[0].is_nan() && data[1].is_nan());
        assert_eq!(data[2], -2.0);
        assert!(data[3] == 0.0 && data[3].is_sign_negative());
        assert_eq!(data[4], 3.5);
    }

    #[test]
    fn test_sorted_check_uses_key_order() {
        // Equal under `==` but not in key order
        let mut data = vec![0.0f64, -0.0];
        let mut scratch = vec![0.0f64; 2];
        sort_with_scratch(&mut data, &mut scratch);
        assert!(data[0].is_sign_negative());
        assert!(data[1].is_sign_positive());
    }

    #[test]
    fn test_all_nan_is_noop() {
        let mut data = vec![f32::NAN; 5];
        let mut scratch = vec![0.0f32; 5];
        assert_eq!(radix_passes(&mut data, &mut scratch), 0);
        assert!(data.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_empty_and_single() {
        let mut empty: Vec<u64> = Vec::new();
        let mut none: Vec<u64> = Vec::new();
        sort_with_scratch(&mut empty, &mut none);
        assert!(empty.is_empty());

        let mut one = vec![42i64];
        let mut scratch = vec![0i64; 1];
        sort_with_scratch(&mut one, &mut scratch);
        assert_eq!(one, vec![42]);
    }

    #[test]
    fn test_sorted_input_short_circuits_on_first_pass() {
        let mut data: Vec<u64> = (0..10_000).collect();
        let expected = data.clone();
        let mut scratch = vec![0u64; data.len()];
        assert_eq!(radix_passes(&mut data, &mut scratch), 0);
        assert_eq!(data, expected);
    }

    #[test]
    fn test_odd_pass_short_circuit_copies_back() {
        // Sorted after the low byte pass, detected at the start of pass 1
        // while the data sits in scratch.
        let mut data: Vec<u32> = vec![2, 1, 3, 0];
        let mut scratch = vec![0u32; 4];
        assert_eq!(radix_passes(&mut data, &mut scratch), 1);
        assert_eq!(data, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_scratch_may_be_longer() {
        let mut data = vec![9u64, 7, 8];
        let mut scratch = vec![0u64; 64];
        sort_with_scratch(&mut data, &mut scratch);
        assert_eq!(data, vec![7, 8, 9]);
    }

    #[test]
    #[should_panic(expected = "scratch buffer too small")]
    fn test_undersized_scratch_panics() {
        let mut data = vec![3u32, 2, 1];
        let mut scratch = vec![0u32; 2];
        sort_with_scratch(&mut data, &mut scratch);
    }

    #[test]
    fn test_try_undersized_scratch_leaves_input() {
        let mut data = vec![3i64, -2, 1];
        let mut scratch = vec![0i64; 1];
        let err = try_sort_with_scratch(&mut data, &mut scratch).unwrap_err();
        assert!(matches!(
            err,
            SortError::ScratchTooSmall {
                needed: 3,
                available: 1
            }
        ));
        assert_eq!(data, vec![3, -2, 1]);
    }

    #[test]
    fn test_sort_to_copy_leaves_input() {
        let input = vec![5u32, 1, 4];
        let sorted = sort_to_copy(&input);
        assert_eq!(sorted, vec![1, 4, 5]);
        assert_eq!(input, vec![5, 1, 4]);
    }

    #[test]
    fn test_large_signed_input_takes_radix_path() {
        let mut data: Vec<i64> = (0..1000).map(|i| (i * 7919 % 1000) - 500).collect();
        let mut expected = data.clone();
        expected.sort_unstable();
        sort_in_place(&mut data);
        assert_eq!(data, expected);
    }

    #[test]
    fn test_signed_split_offsets() {
        let mut counts = [0usize; RADIX];
        counts[0x00] = 2;
        counts[0x7F] = 1;
        counts[0x80] = 3;
        counts[0xFF] = 4;
        let mut offsets = [0usize; RADIX];
        bucket_offsets(&counts, &mut offsets, true);
        assert_eq!(offsets[0x80], 0);
        assert_eq!(offsets[0xFF], 3);
        assert_eq!(offsets[0x00], 7);
        assert_eq!(offsets[0x7F], 9);
    }
}
