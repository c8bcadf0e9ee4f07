//! Buffer-reusing sorter.
//!
//! [`Sorter`] owns one scratch buffer per numeric kind and hands it to the
//! radix engine on every call, so repeated sorts of the same kind stop
//! allocating once the buffer is large enough. Buffers grow but never
//! shrink. All methods take `&mut self`: one sorter serves one thread at a
//! time, and concurrent callers should each own a sorter.

use crate::comparison_sort::sort_sortable;
use crate::config::NumericKind;
use crate::error::SortResult;
use crate::radix_key::RadixKey;
use crate::radix_sort::radix_passes;
use crate::sequence::{NumericVec, Sequence};
use log::debug;

/// Reusable scratch space for repeated sorts
#[derive(Debug, Default)]
pub struct Sorter {
    f32_buf: Vec<f32>,
    f64_buf: Vec<f64>,
    isize_buf: Vec<isize>,
    i32_buf: Vec<i32>,
    i64_buf: Vec<i64>,
    usize_buf: Vec<usize>,
    u32_buf: Vec<u32>,
    u64_buf: Vec<u64>,
}

/// Maps a key type to the sorter field holding its scratch buffer.
trait ScratchSlot<T> {
    fn slot(&mut self) -> &mut Vec<T>;
}

macro_rules! impl_scratch_slot {
    ($($t:ty => $field:ident),* $(,)?) => {$(
        impl ScratchSlot<$t> for Sorter {
            #[inline]
            fn slot(&mut self) -> &mut Vec<$t> {
                &mut self.$field
            }
        }
    )*};
}

impl_scratch_slot! {
    f32 => f32_buf,
    f64 => f64_buf,
    isize => isize_buf,
    i32 => i32_buf,
    i64 => i64_buf,
    usize => usize_buf,
    u32 => u32_buf,
    u64 => u64_buf,
}

/// New buffer length for a request that the current buffer cannot hold.
///
/// The first allocation is exact; later ones leave 25% headroom.
fn alloc_size(current: usize, requested: usize) -> usize {
    if current == 0 {
        requested
    } else {
        requested + requested / 4
    }
}

impl Sorter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorts `seq` in place using the retained buffer for its kind.
    ///
    /// Numeric kinds always take the radix path. `Comparable` sequences go
    /// to the comparison sort and need no buffer.
    pub fn sort(&mut self, seq: Sequence<'_>) -> SortResult<()> {
        match seq {
            Sequence::F32(x) => self.sort_kind(x),
            Sequence::F64(x) => self.sort_kind(x),
            Sequence::Isize(x) => self.sort_kind(x),
            Sequence::I32(x) => self.sort_kind(x),
            Sequence::I64(x) => self.sort_kind(x),
            Sequence::Usize(x) => self.sort_kind(x),
            Sequence::U32(x) => self.sort_kind(x),
            Sequence::U64(x) => self.sort_kind(x),
            Sequence::Comparable(x) => sort_sortable(x),
        }
        Ok(())
    }

    /// Returns a sorted copy of `seq`, leaving it untouched.
    ///
    /// Only the eight numeric kinds can be copied; `Comparable` yields
    /// `UnsupportedKind`.
    pub fn copy_sort(&mut self, seq: &Sequence<'_>) -> SortResult<NumericVec> {
        let mut copy = seq.to_numeric_vec()?;
        self.sort(copy.as_sequence())?;
        Ok(copy)
    }

    /// Length of the scratch buffer currently retained for `kind`
    pub fn scratch_len(&self, kind: NumericKind) -> usize {
        match kind {
            NumericKind::F32 => self.f32_buf.len(),
            NumericKind::F64 => self.f64_buf.len(),
            NumericKind::Isize => self.isize_buf.len(),
            NumericKind::I32 => self.i32_buf.len(),
            NumericKind::I64 => self.i64_buf.len(),
            NumericKind::Usize => self.usize_buf.len(),
            NumericKind::U32 => self.u32_buf.len(),
            NumericKind::U64 => self.u64_buf.len(),
        }
    }

    fn sort_kind<T: RadixKey>(&mut self, x: &mut [T])
    where
        Self: ScratchSlot<T>,
    {
        let buf: &mut Vec<T> = <Self as ScratchSlot<T>>::slot(self);
        if buf.len() < x.len() {
            let new_len = alloc_size(buf.len(), x.len());
            debug!(
                "growing {} scratch buffer from {} to {} elements",
                T::KIND,
                buf.len(),
                new_len
            );
            *buf = vec![T::default(); new_len];
        }
        radix_passes(x, &mut buf[..x.len()]);
    }
}
