//! Vectorized quicksort built from compare, compress and mask primitives.
//!
//! Partitioning streams the range one vector at a time. Lanes that sort
//! before the pivot are compressed to the front of the keys in place (the
//! write cursor never passes the read cursor); the rest are compressed into
//! the scratch buffer and copied back behind them. No lane-level branches.
//!
//! The driver is iterative: an explicit stack of ranges, smaller side first,
//! and a per-range depth budget after which the range falls back to heapsort.
//!
//! Every function here is `#[inline(always)]` so a kernel's
//! `#[target_feature]` attribute applies to the whole sort.

use super::order::{KeyOrder, Order};
use super::scalar::{heap_sort, insertion_sort, is_nan, ninther};
use crate::simd::{Descriptor, Lane, MAX_LANES};

/// Ranges of at most this many keys are insertion sorted.
pub const BASE_CASE_LEN: usize = 32;

/// Pending-range stack capacity. Processing the smaller side first bounds
/// the depth by `log2(len) + 1`.
const STACK_LEN: usize = usize::BITS as usize + 8;

/// Partition rounds a range of `len` keys may use before heapsort takes over.
#[inline(always)]
#[must_use]
pub fn depth_budget(len: usize) -> u32 {
    2 * len.max(1).ilog2() + 4
}

/// Sorts `keys` in the order `O`, using `scratch` as the partition spill area.
///
/// NaN sorts after every other key: last when ascending, first when
/// descending. The order among NaN keys is unspecified.
///
/// # Panics
///
/// If `keys.len() > 1` and `scratch.len() < keys.len() + D::LANES`.
#[inline(always)]
pub fn sort<D: Descriptor, O: KeyOrder>(d: D, keys: &mut [D::Lane], scratch: &mut [D::Lane]) {
    let len = keys.len();
    if len <= 1 {
        return;
    }
    if len <= BASE_CASE_LEN {
        insertion_sort::<_, O>(set_nans_aside::<_, O>(keys));
        return;
    }
    assert!(
        scratch.len() >= len + D::LANES,
        "scratch holds {} keys, sorting {} keys needs {}",
        scratch.len(),
        len,
        len + D::LANES
    );

    let keys = if <D::Lane as Lane>::FLOAT {
        split_nans::<D, O>(d, keys, scratch)
    } else {
        keys
    };
    let len = keys.len();

    let mut stack = [(0usize, 0usize, 0u32); STACK_LEN];
    stack[0] = (0, len, depth_budget(len));
    let mut top = 1;

    while top > 0 {
        top -= 1;
        let (start, end, budget) = stack[top];
        let range = &mut keys[start..end];

        if range.len() <= BASE_CASE_LEN {
            insertion_sort::<_, O>(range);
            continue;
        }
        if budget == 0 {
            heap_sort::<_, O>(range);
            continue;
        }

        let pivot = d.set1(ninther::<_, O>(range));
        let num_first = partition(d, range, scratch, |v| O::first(d, v, pivot));

        if num_first == 0 {
            // Nothing sorts before the pivot. Pivot-equal keys are final; move
            // them to the front and continue with what sorts after them.
            let num_equal = partition(d, range, scratch, |v| d.mask_not(O::first(d, pivot, v)));
            stack[top] = (start + num_equal, end, budget - 1);
            top += 1;
            continue;
        }

        let mid = start + num_first;
        let (left, right) = ((start, mid, budget - 1), (mid, end, budget - 1));
        // Push the larger side first so the smaller one is processed next.
        if mid - start <= end - mid {
            stack[top] = right;
            stack[top + 1] = left;
        } else {
            stack[top] = left;
            stack[top + 1] = right;
        }
        top += 2;
        debug_assert!(top <= STACK_LEN);
    }
}

/// Moves NaN keys to their final end of `keys` and returns the rest.
///
/// Pivots and comparisons below never see a NaN afterwards.
#[inline(always)]
fn split_nans<'a, D: Descriptor, O: KeyOrder>(
    d: D,
    keys: &'a mut [D::Lane],
    scratch: &mut [D::Lane],
) -> &'a mut [D::Lane] {
    match O::ORDER {
        Order::Ascending => {
            let num_ordered = partition(d, keys, scratch, |v| d.eq(v, v));
            &mut keys[..num_ordered]
        }
        Order::Descending => {
            let num_nan = partition(d, keys, scratch, |v| d.mask_not(d.eq(v, v)));
            &mut keys[num_nan..]
        }
    }
}

/// Scalar [`split_nans`] for base-case ranges, which need no scratch.
#[inline(always)]
fn set_nans_aside<T: Lane, O: KeyOrder>(keys: &mut [T]) -> &mut [T] {
    if !T::FLOAT {
        return keys;
    }
    let len = keys.len();
    match O::ORDER {
        Order::Ascending => {
            let mut end = len;
            let mut i = 0;
            while i < end {
                if is_nan(keys[i]) {
                    end -= 1;
                    keys.swap(i, end);
                } else {
                    i += 1;
                }
            }
            &mut keys[..end]
        }
        Order::Descending => {
            let mut start = 0;
            let mut i = 0;
            while i < len {
                if is_nan(keys[i]) {
                    keys.swap(i, start);
                    start += 1;
                }
                i += 1;
            }
            &mut keys[start..]
        }
    }
}

/// Moves the keys whose lanes `select` marks to the front of `keys`, keeping
/// the rest behind them, and returns how many were selected.
///
/// Both groups keep their relative order. `scratch` must hold at least
/// `keys.len() + D::LANES` keys.
#[inline(always)]
pub fn partition<D, F>(d: D, keys: &mut [D::Lane], scratch: &mut [D::Lane], select: F) -> usize
where
    D: Descriptor,
    F: Fn(D::V) -> D::M,
{
    let len = keys.len();
    let lanes = D::LANES;
    let mut num_front = 0;
    let mut num_back = 0;
    let mut read = 0;

    while read + lanes <= len {
        let v = d.load(&keys[read..]);
        let front = select(v);
        // num_front <= read, so this only overwrites keys already loaded.
        num_front += d.compress_store(v, front, &mut keys[num_front..]);
        num_back += d.compress_store(v, d.mask_not(front), &mut scratch[num_back..]);
        read += lanes;
    }

    let remaining = len - read;
    if remaining != 0 {
        let mut tail = [<D::Lane as Lane>::ZERO; MAX_LANES];
        tail[..remaining].copy_from_slice(&keys[read..]);
        let v = d.load(&tail);
        let valid = d.first_n(remaining);
        let front = d.mask_and(select(v), valid);
        let back = d.mask_and_not(front, valid);

        // A full-width store at num_front could run past the end of keys.
        let mut packed = [<D::Lane as Lane>::ZERO; MAX_LANES];
        let count = d.compress_store(v, front, &mut packed);
        keys[num_front..num_front + count].copy_from_slice(&packed[..count]);
        num_front += count;
        num_back += d.compress_store(v, back, &mut scratch[num_back..]);
    }

    keys[num_front..].copy_from_slice(&scratch[..num_back]);
    num_front
}
