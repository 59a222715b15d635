//! Public sort entry points.
//!
//! One dispatched routine per (key type, order). The first call to any of
//! them probes the CPU and resolves that routine's kernel; later calls go
//! straight to it.

use std::mem::size_of;

use super::order::Order;
use crate::dispatch::{sort_routine, Routine};
use crate::error::Result;
use crate::simd::{Lane, MAX_VECTOR_BYTES};
use crate::targets::Target;

/// Scratch length required to sort `count` keys of type `T`.
///
/// `count` plus one vector of the widest target.
#[inline]
#[must_use]
pub const fn scratch_len<T>(count: usize) -> usize {
    count + MAX_VECTOR_BYTES / size_of::<T>()
}

/// A key type with dispatched ascending and descending sorts.
pub trait SortKey: Lane + bytemuck::Pod {
    /// The ascending routine for this key type.
    fn ascending() -> &'static Routine<Self>;

    /// The descending routine for this key type.
    fn descending() -> &'static Routine<Self>;

    /// The routine for `order`.
    #[inline]
    fn routine(order: Order) -> &'static Routine<Self> {
        match order {
            Order::Ascending => Self::ascending(),
            Order::Descending => Self::descending(),
        }
    }
}

/// Sorts `keys` in `order`.
///
/// `scratch` must hold at least [`scratch_len::<T>(keys.len())`](scratch_len)
/// keys; its contents on return are unspecified. For floats, NaN keys sort
/// after every other key (last when ascending, first when descending).
///
/// # Panics
///
/// If `scratch` is too short.
///
/// # Example
///
/// ```
/// use lanewise_core::{scratch_len, sort, Order};
///
/// let mut keys = vec![2.5f64, -1.0, 9.75, 0.0];
/// let mut scratch = vec![0.0; scratch_len::<f64>(keys.len())];
/// sort(&mut keys, &mut scratch, Order::Ascending);
/// assert_eq!(keys, [-1.0, 0.0, 2.5, 9.75]);
/// ```
#[inline]
pub fn sort<T: SortKey>(keys: &mut [T], scratch: &mut [T], order: Order) {
    T::routine(order).call(keys, scratch);
}

macro_rules! sort_entry_points {
    ($($key:ty: $asc:ident / $asc_static:ident, $desc:ident / $desc_static:ident;)+) => {$(
        sort_routine! {
            #[doc = concat!("Dispatch table for [`", stringify!($asc), "`].")]
            pub static $asc_static: $key = $asc;
        }

        sort_routine! {
            #[doc = concat!("Dispatch table for [`", stringify!($desc), "`].")]
            pub static $desc_static: $key = $desc;
        }

        #[doc = concat!("Sorts `", stringify!($key), "` keys ascending.")]
        ///
        /// `scratch` must hold at least `scratch_len(keys.len())` keys.
        #[inline]
        pub fn $asc(keys: &mut [$key], scratch: &mut [$key]) {
            $asc_static.call(keys, scratch);
        }

        #[doc = concat!("Sorts `", stringify!($key), "` keys descending.")]
        ///
        /// `scratch` must hold at least `scratch_len(keys.len())` keys.
        #[inline]
        pub fn $desc(keys: &mut [$key], scratch: &mut [$key]) {
            $desc_static.call(keys, scratch);
        }

        impl SortKey for $key {
            #[inline]
            fn ascending() -> &'static Routine<$key> {
                &$asc_static
            }

            #[inline]
            fn descending() -> &'static Routine<$key> {
                &$desc_static
            }
        }
    )+};
}

sort_entry_points! {
    i16: sort_i16_asc / SORT_I16_ASC, sort_i16_desc / SORT_I16_DESC;
    u16: sort_u16_asc / SORT_U16_ASC, sort_u16_desc / SORT_U16_DESC;
    i32: sort_i32_asc / SORT_I32_ASC, sort_i32_desc / SORT_I32_DESC;
    u32: sort_u32_asc / SORT_U32_ASC, sort_u32_desc / SORT_U32_DESC;
    i64: sort_i64_asc / SORT_I64_ASC, sort_i64_desc / SORT_I64_DESC;
    u64: sort_u64_asc / SORT_U64_ASC, sort_u64_desc / SORT_U64_DESC;
    f32: sort_f32_asc / SORT_F32_ASC, sort_f32_desc / SORT_F32_DESC;
    f64: sort_f64_asc / SORT_F64_ASC, sort_f64_desc / SORT_F64_DESC;
}

/// Resolves every sort routine now instead of on first call.
///
/// Returns `(routine name, chosen target)` pairs.
///
/// # Example
///
/// ```
/// use lanewise_core::{best_target, warmup_dispatch};
///
/// let resolved = warmup_dispatch().unwrap();
/// assert_eq!(resolved.len(), 16);
/// assert!(resolved.iter().all(|(_, target)| *target == best_target()));
/// ```
pub fn warmup_dispatch() -> Result<Vec<(&'static str, Target)>> {
    fn resolve<T: SortKey>(out: &mut Vec<(&'static str, Target)>) -> Result<()> {
        for routine in [T::ascending(), T::descending()] {
            out.push((routine.name(), routine.resolve()?));
        }
        Ok(())
    }

    let mut resolved = Vec::with_capacity(16);
    resolve::<i16>(&mut resolved)?;
    resolve::<u16>(&mut resolved)?;
    resolve::<i32>(&mut resolved)?;
    resolve::<u32>(&mut resolved)?;
    resolve::<i64>(&mut resolved)?;
    resolve::<u64>(&mut resolved)?;
    resolve::<f32>(&mut resolved)?;
    resolve::<f64>(&mut resolved)?;
    tracing::debug!(routines = resolved.len(), "sort dispatch warmed up");
    Ok(resolved)
}

// =============================================================================
// Sorter
// =============================================================================

/// Sorts with an owned, reusable scratch buffer.
///
/// The buffer grows to fit the largest sort seen and is shared across key
/// types.
///
/// ```
/// use lanewise_core::{Order, Sorter};
///
/// let mut sorter = Sorter::new();
/// let mut a = vec![3u32, 1, 2];
/// sorter.sort(&mut a, Order::Descending);
/// assert_eq!(a, [3, 2, 1]);
///
/// let mut b = vec![0.5f32, -0.5];
/// sorter.sort(&mut b, Order::Ascending);
/// assert_eq!(b, [-0.5, 0.5]);
/// ```
#[derive(Debug, Default)]
pub struct Sorter {
    // u64 words so the arena is aligned for every key type.
    arena: Vec<u64>,
}

impl Sorter {
    /// Creates a sorter with no scratch allocated yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sorter pre-sized for `count` keys of type `T`.
    #[must_use]
    pub fn with_capacity<T: SortKey>(count: usize) -> Self {
        let mut sorter = Self::new();
        sorter.arena.resize(Self::words_for::<T>(count), 0);
        sorter
    }

    /// Sorts `keys` in `order`.
    pub fn sort<T: SortKey>(&mut self, keys: &mut [T], order: Order) {
        let words = Self::words_for::<T>(keys.len());
        if self.arena.len() < words {
            self.arena.resize(words, 0);
        }
        let scratch: &mut [T] = bytemuck::cast_slice_mut(&mut self.arena[..words]);
        sort(keys, scratch, order);
    }

    /// Current scratch size in bytes.
    #[must_use]
    pub fn scratch_bytes(&self) -> usize {
        self.arena.len() * size_of::<u64>()
    }

    fn words_for<T>(count: usize) -> usize {
        (scratch_len::<T>(count) * size_of::<T>()).div_ceil(size_of::<u64>())
    }
}
