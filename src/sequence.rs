//! Kind-dispatching facade.
//!
//! [`Sequence`] is a closed tagged union over the eight numeric kinds the
//! radix engine handles, plus a `Comparable` escape hatch for anything that
//! implements [`Sortable`]. [`NumericVec`] is its owned counterpart and is
//! what copy-sorts hand back.

use crate::comparison_sort::{sort_sortable, Sortable};
use crate::config::NumericKind;
use crate::error::{SortError, SortResult};
use crate::radix_key::RadixKey;
use crate::radix_sort;
use itertools::Itertools;

/// A borrowed, mutable numeric sequence of one kind
pub enum Sequence<'a> {
    F32(&'a mut [f32]),
    F64(&'a mut [f64]),
    Isize(&'a mut [isize]),
    I32(&'a mut [i32]),
    I64(&'a mut [i64]),
    Usize(&'a mut [usize]),
    U32(&'a mut [u32]),
    U64(&'a mut [u64]),
    /// Anything with length, pairwise less-than and pairwise swap
    Comparable(&'a mut dyn Sortable),
}

/// An owned numeric sequence of one kind
#[derive(Debug, Clone, PartialEq)]
pub enum NumericVec {
    F32(Vec<f32>),
    F64(Vec<f64>),
    Isize(Vec<isize>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    Usize(Vec<usize>),
    U32(Vec<u32>),
    U64(Vec<u64>),
}

macro_rules! impl_conversions {
    ($($t:ty => $variant:ident),* $(,)?) => {$(
        impl<'a> From<&'a mut [$t]> for Sequence<'a> {
            fn from(x: &'a mut [$t]) -> Self {
                Sequence::$variant(x)
            }
        }

        impl<'a> From<&'a mut Vec<$t>> for Sequence<'a> {
            fn from(x: &'a mut Vec<$t>) -> Self {
                Sequence::$variant(x.as_mut_slice())
            }
        }

        impl From<Vec<$t>> for NumericVec {
            fn from(x: Vec<$t>) -> Self {
                NumericVec::$variant(x)
            }
        }
    )*};
}

impl_conversions! {
    f32 => F32,
    f64 => F64,
    isize => Isize,
    i32 => I32,
    i64 => I64,
    usize => Usize,
    u32 => U32,
    u64 => U64,
}

impl<'a> Sequence<'a> {
    /// Numeric kind, or `None` for `Comparable`
    pub fn kind(&self) -> Option<NumericKind> {
        match self {
            Sequence::F32(_) => Some(NumericKind::F32),
            Sequence::F64(_) => Some(NumericKind::F64),
            Sequence::Isize(_) => Some(NumericKind::Isize),
            Sequence::I32(_) => Some(NumericKind::I32),
            Sequence::I64(_) => Some(NumericKind::I64),
            Sequence::Usize(_) => Some(NumericKind::Usize),
            Sequence::U32(_) => Some(NumericKind::U32),
            Sequence::U64(_) => Some(NumericKind::U64),
            Sequence::Comparable(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Sequence::F32(x) => x.len(),
            Sequence::F64(x) => x.len(),
            Sequence::Isize(x) => x.len(),
            Sequence::I32(x) => x.len(),
            Sequence::I64(x) => x.len(),
            Sequence::Usize(x) => x.len(),
            Sequence::U32(x) => x.len(),
            Sequence::U64(x) => x.len(),
            Sequence::Comparable(x) => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Duplicates the sequence into an owned [`NumericVec`].
    ///
    /// `Comparable` sequences cannot be duplicated and yield
    /// [`SortError::UnsupportedKind`].
    pub fn to_numeric_vec(&self) -> SortResult<NumericVec> {
        Ok(match self {
            Sequence::F32(x) => NumericVec::F32(x.to_vec()),
            Sequence::F64(x) => NumericVec::F64(x.to_vec()),
            Sequence::Isize(x) => NumericVec::Isize(x.to_vec()),
            Sequence::I32(x) => NumericVec::I32(x.to_vec()),
            Sequence::I64(x) => NumericVec::I64(x.to_vec()),
            Sequence::Usize(x) => NumericVec::Usize(x.to_vec()),
            Sequence::U32(x) => NumericVec::U32(x.to_vec()),
            Sequence::U64(x) => NumericVec::U64(x.to_vec()),
            Sequence::Comparable(_) => return Err(SortError::unsupported_kind("comparable")),
        })
    }
}

impl NumericVec {
    /// Empty vector of the given kind
    pub fn empty(kind: NumericKind) -> Self {
        match kind {
            NumericKind::F32 => NumericVec::F32(Vec::new()),
            NumericKind::F64 => NumericVec::F64(Vec::new()),
            NumericKind::Isize => NumericVec::Isize(Vec::new()),
            NumericKind::I32 => NumericVec::I32(Vec::new()),
            NumericKind::I64 => NumericVec::I64(Vec::new()),
            NumericKind::Usize => NumericVec::Usize(Vec::new()),
            NumericKind::U32 => NumericVec::U32(Vec::new()),
            NumericKind::U64 => NumericVec::U64(Vec::new()),
        }
    }

    pub fn kind(&self) -> NumericKind {
        match self {
            NumericVec::F32(_) => NumericKind::F32,
            NumericVec::F64(_) => NumericKind::F64,
            NumericVec::Isize(_) => NumericKind::Isize,
            NumericVec::I32(_) => NumericKind::I32,
            NumericVec::I64(_) => NumericKind::I64,
            NumericVec::Usize(_) => NumericKind::Usize,
            NumericVec::U32(_) => NumericKind::U32,
            NumericVec::U64(_) => NumericKind::U64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NumericVec::F32(x) => x.len(),
            NumericVec::F64(x) => x.len(),
            NumericVec::Isize(x) => x.len(),
            NumericVec::I32(x) => x.len(),
            NumericVec::I64(x) => x.len(),
            NumericVec::Usize(x) => x.len(),
            NumericVec::U32(x) => x.len(),
            NumericVec::U64(x) => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow as a dispatchable sequence
    pub fn as_sequence(&mut self) -> Sequence<'_> {
        match self {
            NumericVec::F32(x) => Sequence::F32(x),
            NumericVec::F64(x) => Sequence::F64(x),
            NumericVec::Isize(x) => Sequence::Isize(x),
            NumericVec::I32(x) => Sequence::I32(x),
            NumericVec::I64(x) => Sequence::I64(x),
            NumericVec::Usize(x) => Sequence::Usize(x),
            NumericVec::U32(x) => Sequence::U32(x),
            NumericVec::U64(x) => Sequence::U64(x),
        }
    }

    /// Removes consecutive equal values, keeping the first of each run.
    ///
    /// Only removes all duplicates when the vector is sorted. NaNs never
    /// compare equal and are all kept. Returns the number of values removed.
    pub fn dedup(&mut self) -> usize {
        let before = self.len();
        match self {
            NumericVec::F32(x) => x.dedup(),
            NumericVec::F64(x) => x.dedup(),
            NumericVec::Isize(x) => x.dedup(),
            NumericVec::I32(x) => x.dedup(),
            NumericVec::I64(x) => x.dedup(),
            NumericVec::Usize(x) => x.dedup(),
            NumericVec::U32(x) => x.dedup(),
            NumericVec::U64(x) => x.dedup(),
        }
        before - self.len()
    }

    pub fn reverse(&mut self) {
        match self {
            NumericVec::F32(x) => x.reverse(),
            NumericVec::F64(x) => x.reverse(),
            NumericVec::Isize(x) => x.reverse(),
            NumericVec::I32(x) => x.reverse(),
            NumericVec::I64(x) => x.reverse(),
            NumericVec::Usize(x) => x.reverse(),
            NumericVec::U32(x) => x.reverse(),
            NumericVec::U64(x) => x.reverse(),
        }
    }

    /// Index of the first value that sorts before its predecessor.
    ///
    /// NaNs are expected at the front, as the radix engine leaves them.
    pub fn first_disorder(&self) -> Option<usize> {
        match self {
            NumericVec::F32(x) => first_disorder(x),
            NumericVec::F64(x) => first_disorder(x),
            NumericVec::Isize(x) => first_disorder(x),
            NumericVec::I32(x) => first_disorder(x),
            NumericVec::I64(x) => first_disorder(x),
            NumericVec::Usize(x) => first_disorder(x),
            NumericVec::U32(x) => first_disorder(x),
            NumericVec::U64(x) => first_disorder(x),
        }
    }
}

fn first_disorder<T: RadixKey>(x: &[T]) -> Option<usize> {
    x.iter()
        .tuple_windows()
        .position(|(&prev, &next)| {
            if prev.is_nan() {
                false
            } else {
                next.is_nan() || !prev.in_order(next)
            }
        })
        .map(|idx| idx + 1)
}

/// Sorts `seq` ascending in place, picking the engine from its kind.
///
/// Numeric kinds go to the radix engine (comparison sort below the kind's
/// threshold); `Comparable` sequences go to the generic comparison sort.
pub fn sort(seq: Sequence<'_>) -> SortResult<()> {
    match seq {
        Sequence::F32(x) => radix_sort::sort_in_place(x),
        Sequence::F64(x) => radix_sort::sort_in_place(x),
        Sequence::Isize(x) => radix_sort::sort_in_place(x),
        Sequence::I32(x) => radix_sort::sort_in_place(x),
        Sequence::I64(x) => radix_sort::sort_in_place(x),
        Sequence::Usize(x) => radix_sort::sort_in_place(x),
        Sequence::U32(x) => radix_sort::sort_in_place(x),
        Sequence::U64(x) => radix_sort::sort_in_place(x),
        Sequence::Comparable(x) => sort_sortable(x),
    }
    Ok(())
}

/// Returns a sorted copy of `seq`, leaving it untouched.
///
/// Fails with [`SortError::UnsupportedKind`] for `Comparable` sequences.
pub fn sort_to_copy(seq: &Sequence<'_>) -> SortResult<NumericVec> {
    let mut copy = seq.to_numeric_vec()?;
    sort(copy.as_sequence())?;
    Ok(copy)
}
