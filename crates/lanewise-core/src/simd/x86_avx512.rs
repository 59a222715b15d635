//! AVX-512 native descriptors for 32- and 64-bit lanes.
//!
//! Vectors are `__m512*` and masks are the `__mmask16`/`__mmask8` predicate
//! registers, so mask algebra is plain integer arithmetic and compress is a
//! single `vpcompress` instruction.

// SAFETY: Numeric casts in this file are intentional:
// - Unsigned lanes are reinterpreted as the same-width signed type for set1.
// - Mask bits are truncated to the lane count of the predicate register.
// - Macro arms share one `as` cast, which is the identity for signed lanes.
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::unnecessary_cast)]

use std::arch::x86_64::*;
use std::marker::PhantomData;

use super::descriptor::Descriptor;
use super::halves::Halves;
use super::lane::Lane;
use super::portable::Simd;

/// AVX-512 descriptor. Only obtainable once AVX-512F support is confirmed.
#[derive(Debug, Clone, Copy)]
pub struct Avx512<T> {
    _lane: PhantomData<T>,
    _token: (),
}

impl<T: Lane> Avx512<T> {
    /// Returns the descriptor if the running CPU supports AVX-512F.
    #[must_use]
    pub fn try_new() -> Option<Self> {
        if is_x86_feature_detected!("avx512f") {
            // SAFETY: AVX-512F support was confirmed just above.
            Some(unsafe { Self::new_unchecked() })
        } else {
            None
        }
    }

    /// Creates the descriptor without checking CPU support.
    ///
    /// # Safety
    ///
    /// The running CPU must support AVX-512F.
    #[inline(always)]
    #[must_use]
    pub const unsafe fn new_unchecked() -> Self {
        Self {
            _lane: PhantomData,
            _token: (),
        }
    }
}

macro_rules! impl_avx512 {
    (
        $t:ty, lanes = $lanes:literal, vec = $vec:ty, mask = $mask:ty,
        load = $load:ident, store = $store:ident, zero = $zero:ident,
        set1 = $set1:ident as $set1_ty:ty,
        eq = $eq:ident, lt = $lt:ident, min = $min:ident, max = $max:ident,
        blend = $blend:ident, compress = $compress:ident,
        to_int = $to_int:ident, from_int = $from_int:ident,
        test = $test:ident, movz = $movz:ident, ones = $ones:ident
    ) => {
        impl Descriptor for Avx512<$t> {
            type Lane = $t;
            type V = $vec;
            type M = $mask;
            const LANES: usize = $lanes;

            #[inline(always)]
            fn load(self, src: &[$t]) -> $vec {
                let src = &src[..$lanes];
                // SAFETY: `src` holds a full vector; loadu has no alignment requirement.
                unsafe { $load(src.as_ptr().cast()) }
            }

            #[inline(always)]
            fn store(self, v: $vec, dst: &mut [$t]) {
                let dst = &mut dst[..$lanes];
                // SAFETY: `dst` holds a full vector; storeu has no alignment requirement.
                unsafe { $store(dst.as_mut_ptr().cast(), v) }
            }

            #[inline(always)]
            fn zero(self) -> $vec {
                // SAFETY: the descriptor exists only on AVX-512F CPUs.
                unsafe { $zero() }
            }

            #[inline(always)]
            fn set1(self, value: $t) -> $vec {
                // SAFETY: the descriptor exists only on AVX-512F CPUs.
                unsafe { $set1(value as $set1_ty) }
            }

            #[inline(always)]
            fn eq(self, a: $vec, b: $vec) -> $mask {
                // SAFETY: the descriptor exists only on AVX-512F CPUs.
                unsafe { $eq(a, b) }
            }

            #[inline(always)]
            fn lt(self, a: $vec, b: $vec) -> $mask {
                // SAFETY: the descriptor exists only on AVX-512F CPUs.
                unsafe { $lt(a, b) }
            }

            #[inline(always)]
            fn min(self, a: $vec, b: $vec) -> $vec {
                // SAFETY: the descriptor exists only on AVX-512F CPUs.
                unsafe { $min(a, b) }
            }

            #[inline(always)]
            fn max(self, a: $vec, b: $vec) -> $vec {
                // SAFETY: the descriptor exists only on AVX-512F CPUs.
                unsafe { $max(a, b) }
            }

            #[inline(always)]
            fn mask_from_bits(self, bits: u64) -> $mask {
                bits as $mask
            }

            #[inline(always)]
            fn mask_bits(self, m: $mask) -> u64 {
                u64::from(m)
            }

            #[inline(always)]
            fn mask_and(self, a: $mask, b: $mask) -> $mask {
                a & b
            }

            #[inline(always)]
            fn mask_or(self, a: $mask, b: $mask) -> $mask {
                a | b
            }

            #[inline(always)]
            fn mask_xor(self, a: $mask, b: $mask) -> $mask {
                a ^ b
            }

            #[inline(always)]
            fn mask_and_not(self, a: $mask, b: $mask) -> $mask {
                !a & b
            }

            #[inline(always)]
            fn mask_not(self, m: $mask) -> $mask {
                !m
            }

            #[inline(always)]
            fn mask_from_vec(self, v: $vec) -> $mask {
                // SAFETY: the descriptor exists only on AVX-512F CPUs.
                unsafe {
                    let bits = $to_int(v);
                    $test(bits, bits)
                }
            }

            #[inline(always)]
            fn vec_from_mask(self, m: $mask) -> $vec {
                // SAFETY: the descriptor exists only on AVX-512F CPUs.
                unsafe { $from_int($movz(m, $ones(-1))) }
            }

            #[inline(always)]
            fn if_then_else(self, m: $mask, yes: $vec, no: $vec) -> $vec {
                // SAFETY: the descriptor exists only on AVX-512F CPUs.
                unsafe { $blend(m, no, yes) }
            }

            #[inline(always)]
            fn compress_store(self, v: $vec, m: $mask, dst: &mut [$t]) -> usize {
                let dst = &mut dst[..$lanes];
                // SAFETY: `dst` holds a full vector; storeu has no alignment requirement.
                unsafe { $store(dst.as_mut_ptr().cast(), $compress(m, v)) }
                m.count_ones() as usize
            }
        }
    };
}

#[inline(always)]
fn same_si512(v: __m512i) -> __m512i {
    v
}

impl_avx512!(
    i32, lanes = 16, vec = __m512i, mask = __mmask16,
    load = _mm512_loadu_epi32, store = _mm512_storeu_epi32, zero = _mm512_setzero_si512,
    set1 = _mm512_set1_epi32 as i32,
    eq = _mm512_cmpeq_epi32_mask, lt = _mm512_cmplt_epi32_mask,
    min = _mm512_min_epi32, max = _mm512_max_epi32,
    blend = _mm512_mask_blend_epi32, compress = _mm512_maskz_compress_epi32,
    to_int = same_si512, from_int = same_si512,
    test = _mm512_test_epi32_mask, movz = _mm512_maskz_mov_epi32, ones = _mm512_set1_epi32
);
impl_avx512!(
    u32, lanes = 16, vec = __m512i, mask = __mmask16,
    load = _mm512_loadu_epi32, store = _mm512_storeu_epi32, zero = _mm512_setzero_si512,
    set1 = _mm512_set1_epi32 as i32,
    eq = _mm512_cmpeq_epi32_mask, lt = _mm512_cmplt_epu32_mask,
    min = _mm512_min_epu32, max = _mm512_max_epu32,
    blend = _mm512_mask_blend_epi32, compress = _mm512_maskz_compress_epi32,
    to_int = same_si512, from_int = same_si512,
    test = _mm512_test_epi32_mask, movz = _mm512_maskz_mov_epi32, ones = _mm512_set1_epi32
);
impl_avx512!(
    f32, lanes = 16, vec = __m512, mask = __mmask16,
    load = _mm512_loadu_ps, store = _mm512_storeu_ps, zero = _mm512_setzero_ps,
    set1 = _mm512_set1_ps as f32,
    eq = _mm512_cmpeq_ps_mask, lt = _mm512_cmplt_ps_mask,
    min = _mm512_min_ps, max = _mm512_max_ps,
    blend = _mm512_mask_blend_ps, compress = _mm512_maskz_compress_ps,
    to_int = _mm512_castps_si512, from_int = _mm512_castsi512_ps,
    test = _mm512_test_epi32_mask, movz = _mm512_maskz_mov_epi32, ones = _mm512_set1_epi32
);
impl_avx512!(
    i64, lanes = 8, vec = __m512i, mask = __mmask8,
    load = _mm512_loadu_epi64, store = _mm512_storeu_epi64, zero = _mm512_setzero_si512,
    set1 = _mm512_set1_epi64 as i64,
    eq = _mm512_cmpeq_epi64_mask, lt = _mm512_cmplt_epi64_mask,
    min = _mm512_min_epi64, max = _mm512_max_epi64,
    blend = _mm512_mask_blend_epi64, compress = _mm512_maskz_compress_epi64,
    to_int = same_si512, from_int = same_si512,
    test = _mm512_test_epi64_mask, movz = _mm512_maskz_mov_epi64, ones = _mm512_set1_epi64
);
impl_avx512!(
    u64, lanes = 8, vec = __m512i, mask = __mmask8,
    load = _mm512_loadu_epi64, store = _mm512_storeu_epi64, zero = _mm512_setzero_si512,
    set1 = _mm512_set1_epi64 as i64,
    eq = _mm512_cmpeq_epi64_mask, lt = _mm512_cmplt_epu64_mask,
    min = _mm512_min_epu64, max = _mm512_max_epu64,
    blend = _mm512_mask_blend_epi64, compress = _mm512_maskz_compress_epi64,
    to_int = same_si512, from_int = same_si512,
    test = _mm512_test_epi64_mask, movz = _mm512_maskz_mov_epi64, ones = _mm512_set1_epi64
);
impl_avx512!(
    f64, lanes = 8, vec = __m512d, mask = __mmask8,
    load = _mm512_loadu_pd, store = _mm512_storeu_pd, zero = _mm512_setzero_pd,
    set1 = _mm512_set1_pd as f64,
    eq = _mm512_cmpeq_pd_mask, lt = _mm512_cmplt_pd_mask,
    min = _mm512_min_pd, max = _mm512_max_pd,
    blend = _mm512_mask_blend_pd, compress = _mm512_maskz_compress_pd,
    to_int = _mm512_castpd_si512, from_int = _mm512_castsi512_pd,
    test = _mm512_test_epi64_mask, movz = _mm512_maskz_mov_epi64, ones = _mm512_set1_epi64
);

// =============================================================================
// Halves: 128-bit block shuffles
// =============================================================================

// `shuffle(lo, hi, imm)` takes blocks 0-1 of the result from `lo` and blocks
// 2-3 from `hi`, two selector bits per block.
macro_rules! impl_avx512_halves {
    ($($t:ty => $half:literal, $shuffle:ident;)+) => {$(
        impl Halves for Avx512<$t> {
            type Half = Simd<$t, $half>;

            #[inline(always)]
            fn half(self) -> Simd<$t, $half> {
                Simd::new()
            }

            #[inline(always)]
            fn concat_upper_lower(self, hi: Self::V, lo: Self::V) -> Self::V {
                // SAFETY: the descriptor exists only on AVX-512F CPUs.
                unsafe { $shuffle(lo, hi, 0xE4) }
            }

            #[inline(always)]
            fn concat_upper_upper(self, hi: Self::V, lo: Self::V) -> Self::V {
                // SAFETY: the descriptor exists only on AVX-512F CPUs.
                unsafe { $shuffle(lo, hi, 0xEE) }
            }

            #[inline(always)]
            fn concat_lower_upper(self, hi: Self::V, lo: Self::V) -> Self::V {
                // SAFETY: the descriptor exists only on AVX-512F CPUs.
                unsafe { $shuffle(lo, hi, 0x4E) }
            }

            #[inline(always)]
            fn concat_lower_lower(self, hi: Self::V, lo: Self::V) -> Self::V {
                // SAFETY: the descriptor exists only on AVX-512F CPUs.
                unsafe { $shuffle(lo, hi, 0x44) }
            }
        }
    )+};
}

impl_avx512_halves! {
    i32 => 8, _mm512_shuffle_i32x4;
    u32 => 8, _mm512_shuffle_i32x4;
    i64 => 4, _mm512_shuffle_i64x2;
    u64 => 4, _mm512_shuffle_i64x2;
    f32 => 8, _mm512_shuffle_f32x4;
    f64 => 4, _mm512_shuffle_f64x2;
}
