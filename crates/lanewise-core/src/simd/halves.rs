//! Half-width extraction and recombination.
//!
//! The default methods round-trip through a stack buffer, which every
//! lowering supports. Native lowerings override the concat operations with
//! lane-crossing shuffles.

use super::descriptor::{Descriptor, MAX_LANES};
use super::lane::Lane;

/// Vector type of the half-width descriptor of `D`.
pub type HalfVec<D> = <<D as Halves>::Half as Descriptor>::V;

/// A descriptor with a half-width counterpart over the same lane type.
///
/// Only implemented for lane counts of two or more, so asking for the halves
/// of a single-lane vector fails to compile.
pub trait Halves: Descriptor {
    /// Descriptor of `LANES / 2` lanes.
    type Half: Descriptor<Lane = Self::Lane>;

    /// The half-width descriptor.
    fn half(self) -> Self::Half;

    /// Lanes `[0, LANES / 2)`.
    #[inline(always)]
    fn lower_half(self, v: Self::V) -> HalfVec<Self> {
        let mut lanes = [<Self::Lane as Lane>::ZERO; MAX_LANES];
        self.store(v, &mut lanes);
        self.half().load(&lanes)
    }

    /// Lanes `[LANES / 2, LANES)`.
    #[inline(always)]
    fn upper_half(self, v: Self::V) -> HalfVec<Self> {
        let mut lanes = [<Self::Lane as Lane>::ZERO; MAX_LANES];
        self.store(v, &mut lanes);
        self.half().load(&lanes[Self::LANES / 2..])
    }

    /// `lo` in the lower half, `hi` in the upper half.
    #[inline(always)]
    fn combine(self, hi: HalfVec<Self>, lo: HalfVec<Self>) -> Self::V {
        let half = Self::LANES / 2;
        let mut lanes = [<Self::Lane as Lane>::ZERO; MAX_LANES];
        self.half().store(lo, &mut lanes);
        self.half().store(hi, &mut lanes[half..]);
        self.load(&lanes)
    }

    /// `lo` in the lower half, zeros above.
    #[inline(always)]
    fn zero_extend_vector(self, lo: HalfVec<Self>) -> Self::V {
        self.combine(self.half().zero(), lo)
    }

    /// Upper half of `hi` above the lower half of `lo`.
    #[inline(always)]
    fn concat_upper_lower(self, hi: Self::V, lo: Self::V) -> Self::V {
        self.combine(self.upper_half(hi), self.lower_half(lo))
    }

    /// Upper half of `hi` above the upper half of `lo`.
    #[inline(always)]
    fn concat_upper_upper(self, hi: Self::V, lo: Self::V) -> Self::V {
        self.combine(self.upper_half(hi), self.upper_half(lo))
    }

    /// Lower half of `hi` above the upper half of `lo`.
    #[inline(always)]
    fn concat_lower_upper(self, hi: Self::V, lo: Self::V) -> Self::V {
        self.combine(self.lower_half(hi), self.upper_half(lo))
    }

    /// Lower half of `hi` above the lower half of `lo`.
    #[inline(always)]
    fn concat_lower_lower(self, hi: Self::V, lo: Self::V) -> Self::V {
        self.combine(self.lower_half(hi), self.lower_half(lo))
    }
}
