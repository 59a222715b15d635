//! Array-backed lowering usable on every target.
//!
//! `Simd<T, N>` has no instruction-set requirement. Compiled inside a
//! `#[target_feature]` kernel, its fixed-length loops auto-vectorize to that
//! target's registers, which is how the SSE4, NEON and scalar targets (and
//! 16-bit lanes on AVX2/AVX-512) share one source.

use std::fmt;
use std::marker::PhantomData;

use super::descriptor::{low_bits, Descriptor, MAX_LANES};
use super::halves::Halves;
use super::lane::Lane;

/// Portable descriptor of `N` lanes of `T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simd<T, const N: usize> {
    _lane: PhantomData<T>,
}

impl<T: Lane, const N: usize> Simd<T, N> {
    /// Creates the descriptor.
    #[inline(always)]
    #[must_use]
    pub const fn new() -> Self {
        Self { _lane: PhantomData }
    }
}

/// Vector of a portable descriptor.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Vector<T, const N: usize>([T; N]);

impl<T: Lane, const N: usize> fmt::Debug for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Mask of a portable descriptor, one bit per lane.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask<const N: usize>(u64);

impl<const N: usize> fmt::Debug for Mask<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask<{N}>({:#0width$b})", self.0, width = N + 2)
    }
}

impl<T: Lane, const N: usize> Descriptor for Simd<T, N> {
    type Lane = T;
    type V = Vector<T, N>;
    type M = Mask<N>;
    const LANES: usize = {
        assert!(N >= 1 && N <= MAX_LANES, "portable vectors hold 1 to 64 lanes");
        N
    };

    #[inline(always)]
    fn load(self, src: &[T]) -> Vector<T, N> {
        let mut lanes = [T::ZERO; N];
        lanes.copy_from_slice(&src[..Self::LANES]);
        Vector(lanes)
    }

    #[inline(always)]
    fn store(self, v: Vector<T, N>, dst: &mut [T]) {
        dst[..Self::LANES].copy_from_slice(&v.0);
    }

    #[inline(always)]
    fn zero(self) -> Vector<T, N> {
        Vector([T::ZERO; N])
    }

    #[inline(always)]
    fn set1(self, value: T) -> Vector<T, N> {
        Vector([value; N])
    }

    #[inline(always)]
    fn eq(self, a: Vector<T, N>, b: Vector<T, N>) -> Mask<N> {
        let mut bits = 0u64;
        for (i, (x, y)) in a.0.iter().zip(b.0.iter()).enumerate() {
            bits |= u64::from(x == y) << i;
        }
        Mask(bits)
    }

    #[inline(always)]
    fn lt(self, a: Vector<T, N>, b: Vector<T, N>) -> Mask<N> {
        let mut bits = 0u64;
        for (i, (x, y)) in a.0.iter().zip(b.0.iter()).enumerate() {
            bits |= u64::from(x < y) << i;
        }
        Mask(bits)
    }

    #[inline(always)]
    fn min(self, a: Vector<T, N>, b: Vector<T, N>) -> Vector<T, N> {
        Vector(std::array::from_fn(|i| if b.0[i] < a.0[i] { b.0[i] } else { a.0[i] }))
    }

    #[inline(always)]
    fn max(self, a: Vector<T, N>, b: Vector<T, N>) -> Vector<T, N> {
        Vector(std::array::from_fn(|i| if a.0[i] < b.0[i] { b.0[i] } else { a.0[i] }))
    }

    #[inline(always)]
    fn mask_from_bits(self, bits: u64) -> Mask<N> {
        Mask(bits & low_bits(Self::LANES))
    }

    #[inline(always)]
    fn mask_bits(self, m: Mask<N>) -> u64 {
        m.0
    }

    #[inline(always)]
    fn mask_and(self, a: Mask<N>, b: Mask<N>) -> Mask<N> {
        Mask(a.0 & b.0)
    }

    #[inline(always)]
    fn mask_or(self, a: Mask<N>, b: Mask<N>) -> Mask<N> {
        Mask(a.0 | b.0)
    }

    #[inline(always)]
    fn mask_xor(self, a: Mask<N>, b: Mask<N>) -> Mask<N> {
        Mask(a.0 ^ b.0)
    }

    #[inline(always)]
    fn mask_and_not(self, a: Mask<N>, b: Mask<N>) -> Mask<N> {
        Mask(!a.0 & b.0)
    }

    #[inline(always)]
    fn mask_not(self, m: Mask<N>) -> Mask<N> {
        Mask(!m.0 & low_bits(Self::LANES))
    }

    #[inline(always)]
    fn mask_from_vec(self, v: Vector<T, N>) -> Mask<N> {
        let mut bits = 0u64;
        for (i, lane) in v.0.iter().enumerate() {
            bits |= u64::from(lane.to_bits() != 0) << i;
        }
        Mask(bits)
    }

    #[inline(always)]
    fn vec_from_mask(self, m: Mask<N>) -> Vector<T, N> {
        Vector(std::array::from_fn(|i| {
            if m.0 >> i & 1 != 0 {
                T::all_ones()
            } else {
                T::ZERO
            }
        }))
    }

    #[inline(always)]
    fn if_then_else(self, m: Mask<N>, yes: Vector<T, N>, no: Vector<T, N>) -> Vector<T, N> {
        Vector(std::array::from_fn(|i| {
            if m.0 >> i & 1 != 0 {
                yes.0[i]
            } else {
                no.0[i]
            }
        }))
    }

    #[inline(always)]
    fn compress_store(self, v: Vector<T, N>, m: Mask<N>, dst: &mut [T]) -> usize {
        let dst = &mut dst[..Self::LANES];
        let mut count = 0;
        for (i, lane) in v.0.iter().enumerate() {
            // count <= i here, so the unconditional write stays in bounds.
            dst[count] = *lane;
            count += usize::from(m.0 >> i & 1 != 0);
        }
        count
    }
}

macro_rules! impl_portable_halves {
    ($($full:literal => $half:literal),+ $(,)?) => {$(
        impl<T: Lane> Halves for Simd<T, $full> {
            type Half = Simd<T, $half>;

            #[inline(always)]
            fn half(self) -> Simd<T, $half> {
                Simd::new()
            }

            #[inline(always)]
            fn lower_half(self, v: Vector<T, $full>) -> Vector<T, $half> {
                Vector(std::array::from_fn(|i| v.0[i]))
            }

            #[inline(always)]
            fn upper_half(self, v: Vector<T, $full>) -> Vector<T, $half> {
                Vector(std::array::from_fn(|i| v.0[$half + i]))
            }

            #[inline(always)]
            fn combine(self, hi: Vector<T, $half>, lo: Vector<T, $half>) -> Vector<T, $full> {
                Vector(std::array::from_fn(|i| if i < $half { lo.0[i] } else { hi.0[i - $half] }))
            }
        }
    )+};
}

impl_portable_halves!(2 => 1, 4 => 2, 8 => 4, 16 => 8, 32 => 16, 64 => 32);
