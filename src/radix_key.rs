//! Per-kind adapters for the radix engine.
//!
//! Each supported numeric type describes how the generic LSD engine should
//! see it: how wide it is, how to pull an 8-bit digit out of it, whether NaN
//! values must be set aside first, and whether the final pass has to split
//! buckets on the sign bit.

use crate::config::NumericKind;

/// A numeric type the radix engine knows how to sort.
///
/// `radix_bits` must return a value whose bytes, read from least to most
/// significant, sort the same way as the type's natural order. The one
/// exception is signed integers: they return their raw two's-complement
/// bits and set `SIGNED`, and the engine reorders the top byte's buckets.
pub trait RadixKey: Copy + PartialOrd + Default + Send + Sync + 'static {
    /// Tag used by the dispatcher and the buffer-reuse sorter.
    const KIND: NumericKind;
    /// Width of the key in bits. Always a multiple of 8.
    const BITS: u32;
    /// Slices shorter than this go to the comparison fallback.
    const MIN_SIZE: usize;
    /// Final pass places byte values `128..=255` before `0..=127`.
    const SIGNED: bool = false;
    /// Floating point kinds quarantine NaNs before sorting.
    const HAS_NAN: bool = false;
    /// Smallest value in natural order, used to seed the sortedness check.
    const LOWEST: Self;

    /// Bit pattern the digits are read from.
    fn radix_bits(self) -> u64;

    #[inline]
    fn is_nan(self) -> bool {
        false
    }

    /// Whether `self` followed by `next` is ascending. Never called with NaNs.
    #[inline(always)]
    fn in_order(self, next: Self) -> bool {
        self <= next
    }

    /// Comparison sort used for small slices.
    fn fallback_sort(slice: &mut [Self]);

    /// Number of 8-bit digit passes.
    #[inline]
    fn passes() -> usize {
        (Self::BITS as usize + 7) / 8
    }

    /// Byte `pass` of the key (0 is least significant).
    #[inline(always)]
    fn digit(self, pass: usize) -> usize {
        ((self.radix_bits() >> (pass * 8)) & 0xFF) as usize
    }
}

macro_rules! impl_unsigned {
    ($($t:ty => $kind:ident, $min_size:expr);* $(;)?) => {$(
        impl RadixKey for $t {
            const KIND: NumericKind = NumericKind::$kind;
            const BITS: u32 = <$t>::BITS;
            const MIN_SIZE: usize = $min_size;
            const LOWEST: Self = <$t>::MIN;

            #[inline(always)]
            fn radix_bits(self) -> u64 {
                self as u64
            }

            fn fallback_sort(slice: &mut [Self]) {
                slice.sort_unstable();
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($t:ty => $u:ty, $kind:ident, $min_size:expr);* $(;)?) => {$(
        impl RadixKey for $t {
            const KIND: NumericKind = NumericKind::$kind;
            const BITS: u32 = <$t>::BITS;
            const MIN_SIZE: usize = $min_size;
            const SIGNED: bool = true;
            const LOWEST: Self = <$t>::MIN;

            // Reinterpret through the unsigned twin so no sign extension
            // leaks into the upper bytes of narrow types.
            #[inline(always)]
            fn radix_bits(self) -> u64 {
                self as $u as u64
            }

            fn fallback_sort(slice: &mut [Self]) {
                slice.sort_unstable();
            }
        }
    )*};
}

impl_unsigned! {
    usize => Usize, 256;
    u32 => U32, 128;
    u64 => U64, 256;
}

impl_signed! {
    isize => usize, Isize, 256;
    i32 => u32, I32, 128;
    i64 => u64, I64, 256;
}

macro_rules! impl_float {
    ($($t:ty => $kind:ident, $bits:expr, $sign:expr);* $(;)?) => {$(
        impl RadixKey for $t {
            const KIND: NumericKind = NumericKind::$kind;
            const BITS: u32 = $bits;
            const MIN_SIZE: usize = 256;
            const HAS_NAN: bool = true;
            const LOWEST: Self = <$t>::NEG_INFINITY;

            #[inline(always)]
            fn radix_bits(self) -> u64 {
                let bits = self.to_bits();
                let flipped = if bits & $sign != 0 { !bits } else { bits | $sign };
                flipped as u64
            }

            #[inline(always)]
            fn is_nan(self) -> bool {
                <$t>::is_nan(self)
            }

            // Key order, so -0.0 followed by 0.0 is the only ascending pair
            #[inline(always)]
            fn in_order(self, next: Self) -> bool {
                self.radix_bits() <= next.radix_bits()
            }

            fn fallback_sort(slice: &mut [Self]) {
                let nans = quarantine_nans(slice);
                slice[nans..].sort_unstable_by(|a, b| a.total_cmp(b));
            }
        }
    )*};
}

impl_float! {
    f32 => F32, 32, 0x8000_0000u32;
    f64 => F64, 64, 0x8000_0000_0000_0000u64;
}

/// Moves every NaN to the front of `slice` and returns how many there were.
///
/// Single left-to-right pass; the relative order of the NaNs themselves is
/// not preserved.
pub fn quarantine_nans<T: RadixKey>(slice: &mut [T]) -> usize {
    if !T::HAS_NAN {
        return 0;
    }
    let mut nans = 0;
    for idx in 0..slice.len() {
        if slice[idx].is_nan() {
            slice.swap(nans, idx);
            nans += 1;
        }
    }
    nans
}
