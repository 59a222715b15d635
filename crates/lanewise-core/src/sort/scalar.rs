//! Scalar base cases: insertion sort for short ranges, heapsort when the
//! partition depth budget runs out.

use super::order::KeyOrder;
use crate::simd::Lane;

/// Stable insertion sort. Used for ranges of at most `BASE_CASE_LEN` keys.
#[inline]
pub fn insertion_sort<T: Lane, O: KeyOrder>(keys: &mut [T]) {
    for i in 1..keys.len() {
        let key = keys[i];
        let mut j = i;
        while j > 0 && O::before(key, keys[j - 1]) {
            keys[j] = keys[j - 1];
            j -= 1;
        }
        keys[j] = key;
    }
}

/// In-place heapsort, O(n log n) regardless of input.
#[inline]
pub fn heap_sort<T: Lane, O: KeyOrder>(keys: &mut [T]) {
    let len = keys.len();
    for root in (0..len / 2).rev() {
        sift_down::<T, O>(keys, root, len);
    }
    for end in (1..len).rev() {
        keys.swap(0, end);
        sift_down::<T, O>(keys, 0, end);
    }
}

/// Restores the heap property below `root` within `keys[..end]`. The root of
/// the heap is the key that sorts last.
#[inline]
fn sift_down<T: Lane, O: KeyOrder>(keys: &mut [T], mut root: usize, end: usize) {
    loop {
        let mut child = 2 * root + 1;
        if child >= end {
            break;
        }
        if child + 1 < end && O::before(keys[child], keys[child + 1]) {
            child += 1;
        }
        if !O::before(keys[root], keys[child]) {
            break;
        }
        keys.swap(root, child);
        root = child;
    }
}

/// True only for a NaN float; integers are always ordered.
#[inline(always)]
pub fn is_nan<T: Lane>(key: T) -> bool {
    key.partial_cmp(&key).is_none()
}

/// Median of three under `O`.
#[inline(always)]
pub fn median3<T: Lane, O: KeyOrder>(a: T, b: T, c: T) -> T {
    let (a, b) = if O::before(b, a) { (b, a) } else { (a, b) };
    if O::before(c, a) {
        a
    } else if O::before(b, c) {
        b
    } else {
        c
    }
}

/// Ninther: median of the medians of three evenly spaced triples.
///
/// Always returns an element of `keys`. Requires `keys.len() >= 9` and no
/// NaN keys.
#[inline(always)]
pub fn ninther<T: Lane, O: KeyOrder>(keys: &[T]) -> T {
    let len = keys.len();
    let step = len / 8;
    let a = median3::<T, O>(keys[0], keys[step], keys[2 * step]);
    let b = median3::<T, O>(keys[3 * step], keys[4 * step], keys[5 * step]);
    let c = median3::<T, O>(keys[6 * step], keys[7 * step], keys[len - 1]);
    median3::<T, O>(a, b, c)
}
