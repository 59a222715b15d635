//! The descriptor trait: a compile-time tag for {lane type, lowering, lane count}.

// SAFETY: `count_ones`/`trailing_zeros` of a u64 fit in usize/isize.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

use super::lane::Lane;

/// Upper bound on `Descriptor::LANES` for every lowering.
pub const MAX_LANES: usize = 64;

/// Widest vector any target operates on, in bytes.
pub const MAX_VECTOR_BYTES: usize = 64;

/// Mask with the low `n` bits set, saturating at 64.
#[inline(always)]
#[must_use]
pub const fn low_bits(n: usize) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Vector and mask operations for one lane type on one lowering.
///
/// Descriptors are `Copy` values passed first to every operation
/// (`d.load(..)`, `d.count_true(m)`). Vectors (`V`) and masks (`M`) are
/// opaque: lanes are only observable through `store`, `mask_bits` and the
/// reductions.
///
/// # Contracts
///
/// - Slices handed to `load`, `store` and `compress_store` hold at least
///   `LANES` elements; shorter slices panic.
/// - `mask_bits` never reports bits at or above `LANES`.
/// - Masks passed to `if_then_else` come from comparisons, mask algebra or
///   `mask_from_vec`.
pub trait Descriptor: Copy + Send + Sync + 'static {
    /// Element type of one lane.
    type Lane: Lane;
    /// Opaque vector of `LANES` lanes.
    type V: Copy;
    /// Opaque per-lane predicate.
    type M: Copy;
    /// Number of lanes, between 1 and [`MAX_LANES`].
    const LANES: usize;

    /// Loads the first `LANES` elements of `src`.
    fn load(self, src: &[Self::Lane]) -> Self::V;
    /// Stores all lanes to the first `LANES` elements of `dst`.
    fn store(self, v: Self::V, dst: &mut [Self::Lane]);
    /// All lanes zero.
    fn zero(self) -> Self::V;
    /// Broadcasts `value` to every lane.
    fn set1(self, value: Self::Lane) -> Self::V;

    /// `[first, first + 1, ...]`, wrapping for integer lanes.
    #[inline(always)]
    fn iota(self, first: Self::Lane) -> Self::V {
        let mut lanes = [<Self::Lane as Lane>::ZERO; MAX_LANES];
        for (i, lane) in lanes[..Self::LANES].iter_mut().enumerate() {
            *lane = first.offset(i);
        }
        self.load(&lanes)
    }

    /// Lanes where `a == b`.
    fn eq(self, a: Self::V, b: Self::V) -> Self::M;
    /// Lanes where `a < b`.
    fn lt(self, a: Self::V, b: Self::V) -> Self::M;
    /// Lanes where `a > b`.
    #[inline(always)]
    fn gt(self, a: Self::V, b: Self::V) -> Self::M {
        self.lt(b, a)
    }
    /// Lanewise minimum.
    fn min(self, a: Self::V, b: Self::V) -> Self::V;
    /// Lanewise maximum.
    fn max(self, a: Self::V, b: Self::V) -> Self::V;

    /// Mask whose lane `i` is bit `i` of `bits`. Bits at or above `LANES` are ignored.
    fn mask_from_bits(self, bits: u64) -> Self::M;
    /// Packs the mask into the low `LANES` bits.
    fn mask_bits(self, m: Self::M) -> u64;

    /// `a & b`.
    fn mask_and(self, a: Self::M, b: Self::M) -> Self::M;
    /// `a | b`.
    fn mask_or(self, a: Self::M, b: Self::M) -> Self::M;
    /// `a ^ b`.
    fn mask_xor(self, a: Self::M, b: Self::M) -> Self::M;
    /// `!a & b`.
    fn mask_and_not(self, a: Self::M, b: Self::M) -> Self::M;
    /// `!m`.
    fn mask_not(self, m: Self::M) -> Self::M;

    /// Every lane selected.
    #[inline(always)]
    fn mask_true(self) -> Self::M {
        self.first_n(Self::LANES)
    }
    /// No lane selected.
    #[inline(always)]
    fn mask_false(self) -> Self::M {
        self.mask_from_bits(0)
    }
    /// The first `min(n, LANES)` lanes selected.
    #[inline(always)]
    fn first_n(self, n: usize) -> Self::M {
        self.mask_from_bits(low_bits(n))
    }

    /// Lanes whose bits are not all zero.
    fn mask_from_vec(self, v: Self::V) -> Self::M;
    /// All-ones lanes where `m` is set, zero elsewhere.
    fn vec_from_mask(self, m: Self::M) -> Self::V;

    /// `m ? yes : no`, per lane.
    fn if_then_else(self, m: Self::M, yes: Self::V, no: Self::V) -> Self::V;
    /// `m ? yes : 0`, per lane.
    #[inline(always)]
    fn if_then_else_zero(self, m: Self::M, yes: Self::V) -> Self::V {
        self.if_then_else(m, yes, self.zero())
    }
    /// `m ? 0 : no`, per lane.
    #[inline(always)]
    fn if_then_zero_else(self, m: Self::M, no: Self::V) -> Self::V {
        self.if_then_else(m, self.zero(), no)
    }

    /// Number of selected lanes.
    #[inline(always)]
    fn count_true(self, m: Self::M) -> usize {
        self.mask_bits(m).count_ones() as usize
    }
    /// Index of the lowest selected lane, or -1 if none.
    #[inline(always)]
    fn find_first_true(self, m: Self::M) -> isize {
        let bits = self.mask_bits(m);
        if bits == 0 {
            -1
        } else {
            bits.trailing_zeros() as isize
        }
    }
    /// True when every lane is selected.
    #[inline(always)]
    fn all_true(self, m: Self::M) -> bool {
        self.mask_bits(m) == low_bits(Self::LANES)
    }
    /// True when no lane is selected.
    #[inline(always)]
    fn all_false(self, m: Self::M) -> bool {
        self.mask_bits(m) == 0
    }

    /// Writes `ceil(LANES / 8)` bytes, lane 0 in the least significant bit of
    /// byte 0, padding bits zero. Returns the byte count.
    #[inline]
    fn store_mask_bits(self, m: Self::M, out: &mut [u8]) -> usize {
        let num_bytes = Self::LANES.div_ceil(8);
        let bytes = self.mask_bits(m).to_le_bytes();
        out[..num_bytes].copy_from_slice(&bytes[..num_bytes]);
        num_bytes
    }

    /// Writes the selected lanes of `v`, in lane order, to the start of `dst`
    /// and returns how many were written. `dst` must hold `LANES` elements;
    /// elements past the returned count are unspecified afterwards.
    fn compress_store(self, v: Self::V, m: Self::M, dst: &mut [Self::Lane]) -> usize;
}
