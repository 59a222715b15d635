//! AVX2 native descriptors for 32- and 64-bit lanes.
//!
//! Vectors are `__m256*`. Masks are vectors with all-bits-set or all-bits-clear
//! lanes, as the AVX2 compare instructions produce them. Compress uses a
//! permutation table indexed by the mask's `movemask` bits.
//!
//! All methods are `#[inline(always)]` so they fold into the
//! `#[target_feature]` kernels that instantiate the sort engine.

// SAFETY: Numeric casts in this file are intentional:
// - Unsigned lanes are reinterpreted as the same-width signed type for set1.
// - `movemask` results are non-negative and fit in u64 after widening.
// - Mask bits are truncated to the lane count before broadcast.
// - Macro arms share one `as` cast, which is the identity for signed lanes.
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::unnecessary_cast)]
#![allow(clippy::cast_sign_loss)]

use std::arch::x86_64::*;
use std::marker::PhantomData;

use super::descriptor::Descriptor;
use super::halves::Halves;
use super::lane::Lane;
use super::portable::Simd;

/// AVX2 descriptor. Only obtainable once AVX2 support is confirmed.
#[derive(Debug, Clone, Copy)]
pub struct Avx2<T> {
    _lane: PhantomData<T>,
    _token: (),
}

impl<T: Lane> Avx2<T> {
    /// Returns the descriptor if the running CPU supports AVX2.
    #[must_use]
    pub fn try_new() -> Option<Self> {
        if is_x86_feature_detected!("avx2") {
            // SAFETY: AVX2 support was confirmed just above.
            Some(unsafe { Self::new_unchecked() })
        } else {
            None
        }
    }

    /// Creates the descriptor without checking CPU support.
    ///
    /// # Safety
    ///
    /// The running CPU must support AVX2. Kernels compiled with
    /// `#[target_feature(enable = "avx2")]` satisfy this by construction.
    #[inline(always)]
    #[must_use]
    pub const unsafe fn new_unchecked() -> Self {
        Self {
            _lane: PhantomData,
            _token: (),
        }
    }
}

// =============================================================================
// Compress permutation tables
// =============================================================================

/// For each 8-bit mask, the 32-bit lane indices with selected lanes first.
static COMPRESS_32: [[i32; 8]; 256] = compress_table_32();

/// For each 4-bit mask, 32-bit index pairs moving selected 64-bit lanes first.
static COMPRESS_64: [[i32; 8]; 16] = compress_table_64();

const fn compress_table_32() -> [[i32; 8]; 256] {
    let mut table = [[0i32; 8]; 256];
    let mut mask = 0;
    while mask < 256 {
        let mut out = 0;
        let mut lane = 0;
        while lane < 8 {
            if mask & (1 << lane) != 0 {
                table[mask][out] = lane as i32;
                out += 1;
            }
            lane += 1;
        }
        // Unselected lanes fill the rest so every entry is a permutation.
        lane = 0;
        while lane < 8 {
            if mask & (1 << lane) == 0 {
                table[mask][out] = lane as i32;
                out += 1;
            }
            lane += 1;
        }
        mask += 1;
    }
    table
}

const fn compress_table_64() -> [[i32; 8]; 16] {
    let mut table = [[0i32; 8]; 16];
    let mut mask = 0;
    while mask < 16 {
        let mut out = 0;
        let mut lane = 0;
        while lane < 4 {
            if mask & (1 << lane) != 0 {
                table[mask][2 * out] = 2 * lane as i32;
                table[mask][2 * out + 1] = 2 * lane as i32 + 1;
                out += 1;
            }
            lane += 1;
        }
        lane = 0;
        while lane < 4 {
            if mask & (1 << lane) == 0 {
                table[mask][2 * out] = 2 * lane as i32;
                table[mask][2 * out + 1] = 2 * lane as i32 + 1;
                out += 1;
            }
            lane += 1;
        }
        mask += 1;
    }
    table
}

// =============================================================================
// Comparison helpers
// =============================================================================

#[inline(always)]
unsafe fn lt_epi32(a: __m256i, b: __m256i) -> __m256i {
    _mm256_cmpgt_epi32(b, a)
}

#[inline(always)]
unsafe fn lt_epu32(a: __m256i, b: __m256i) -> __m256i {
    let bias = _mm256_set1_epi32(i32::MIN);
    _mm256_cmpgt_epi32(_mm256_xor_si256(b, bias), _mm256_xor_si256(a, bias))
}

#[inline(always)]
unsafe fn lt_epi64(a: __m256i, b: __m256i) -> __m256i {
    _mm256_cmpgt_epi64(b, a)
}

#[inline(always)]
unsafe fn lt_epu64(a: __m256i, b: __m256i) -> __m256i {
    let bias = _mm256_set1_epi64x(i64::MIN);
    _mm256_cmpgt_epi64(_mm256_xor_si256(b, bias), _mm256_xor_si256(a, bias))
}

/// Lanes whose bit in `bits` is set, as a 32-bit lane vector mask.
#[inline(always)]
unsafe fn mask32_from_bits(bits: u64) -> __m256i {
    let select = _mm256_setr_epi32(1, 2, 4, 8, 16, 32, 64, 128);
    let broadcast = _mm256_set1_epi32((bits & 0xFF) as i32);
    _mm256_cmpeq_epi32(_mm256_and_si256(broadcast, select), select)
}

/// Lanes whose bit in `bits` is set, as a 64-bit lane vector mask.
#[inline(always)]
unsafe fn mask64_from_bits(bits: u64) -> __m256i {
    let select = _mm256_setr_epi64x(1, 2, 4, 8);
    let broadcast = _mm256_set1_epi64x((bits & 0xF) as i64);
    _mm256_cmpeq_epi64(_mm256_and_si256(broadcast, select), select)
}

// =============================================================================
// Integer lanes
// =============================================================================

macro_rules! impl_avx2_int {
    (
        $t:ty, lanes = $lanes:literal, set1 = $set1:ident as $signed:ty, eq = $eq:ident,
        lt = $lt:ident, min = $min:ident, max = $max:ident,
        from_bits = $from_bits:ident, movemask = $movemask:ident, cast = $cast:ident,
        table = $table:ident
    ) => {
        impl Descriptor for Avx2<$t> {
            type Lane = $t;
            type V = __m256i;
            type M = __m256i;
            const LANES: usize = $lanes;

            #[inline(always)]
            fn load(self, src: &[$t]) -> __m256i {
                let src = &src[..$lanes];
                // SAFETY: `src` holds a full vector; loadu has no alignment requirement.
                unsafe { _mm256_loadu_si256(src.as_ptr().cast()) }
            }

            #[inline(always)]
            fn store(self, v: __m256i, dst: &mut [$t]) {
                let dst = &mut dst[..$lanes];
                // SAFETY: `dst` holds a full vector; storeu has no alignment requirement.
                unsafe { _mm256_storeu_si256(dst.as_mut_ptr().cast(), v) }
            }

            #[inline(always)]
            fn zero(self) -> __m256i {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { _mm256_setzero_si256() }
            }

            #[inline(always)]
            fn set1(self, value: $t) -> __m256i {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { $set1(value as $signed) }
            }

            #[inline(always)]
            fn eq(self, a: __m256i, b: __m256i) -> __m256i {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { $eq(a, b) }
            }

            #[inline(always)]
            fn lt(self, a: __m256i, b: __m256i) -> __m256i {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { $lt(a, b) }
            }

            #[inline(always)]
            fn min(self, a: __m256i, b: __m256i) -> __m256i {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { $min(a, b) }
            }

            #[inline(always)]
            fn max(self, a: __m256i, b: __m256i) -> __m256i {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { $max(a, b) }
            }

            #[inline(always)]
            fn mask_from_bits(self, bits: u64) -> __m256i {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { $from_bits(bits) }
            }

            #[inline(always)]
            fn mask_bits(self, m: __m256i) -> u64 {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { $movemask($cast(m)) as u32 as u64 }
            }

            #[inline(always)]
            fn mask_and(self, a: __m256i, b: __m256i) -> __m256i {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { _mm256_and_si256(a, b) }
            }

            #[inline(always)]
            fn mask_or(self, a: __m256i, b: __m256i) -> __m256i {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { _mm256_or_si256(a, b) }
            }

            #[inline(always)]
            fn mask_xor(self, a: __m256i, b: __m256i) -> __m256i {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { _mm256_xor_si256(a, b) }
            }

            #[inline(always)]
            fn mask_and_not(self, a: __m256i, b: __m256i) -> __m256i {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { _mm256_andnot_si256(a, b) }
            }

            #[inline(always)]
            fn mask_not(self, m: __m256i) -> __m256i {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { _mm256_xor_si256(m, _mm256_set1_epi32(-1)) }
            }

            #[inline(always)]
            fn mask_from_vec(self, v: __m256i) -> __m256i {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { self.mask_not($eq(v, _mm256_setzero_si256())) }
            }

            #[inline(always)]
            fn vec_from_mask(self, m: __m256i) -> __m256i {
                m
            }

            #[inline(always)]
            fn if_then_else(self, m: __m256i, yes: __m256i, no: __m256i) -> __m256i {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { _mm256_blendv_epi8(no, yes, m) }
            }

            #[inline(always)]
            fn compress_store(self, v: __m256i, m: __m256i, dst: &mut [$t]) -> usize {
                let dst = &mut dst[..$lanes];
                let bits = self.mask_bits(m) as usize;
                // SAFETY: `bits` < table length; `dst` holds a full vector.
                unsafe {
                    let indices = _mm256_loadu_si256($table[bits].as_ptr().cast());
                    let packed = _mm256_permutevar8x32_epi32(v, indices);
                    _mm256_storeu_si256(dst.as_mut_ptr().cast(), packed);
                }
                bits.count_ones() as usize
            }
        }
    };
}

#[inline(always)]
unsafe fn min_epi64(a: __m256i, b: __m256i) -> __m256i {
    _mm256_blendv_epi8(a, b, lt_epi64(b, a))
}

#[inline(always)]
unsafe fn max_epi64(a: __m256i, b: __m256i) -> __m256i {
    _mm256_blendv_epi8(a, b, lt_epi64(a, b))
}

#[inline(always)]
unsafe fn min_epu64(a: __m256i, b: __m256i) -> __m256i {
    _mm256_blendv_epi8(a, b, lt_epu64(b, a))
}

#[inline(always)]
unsafe fn max_epu64(a: __m256i, b: __m256i) -> __m256i {
    _mm256_blendv_epi8(a, b, lt_epu64(a, b))
}

impl_avx2_int!(
    i32, lanes = 8, set1 = _mm256_set1_epi32 as i32, eq = _mm256_cmpeq_epi32,
    lt = lt_epi32, min = _mm256_min_epi32, max = _mm256_max_epi32,
    from_bits = mask32_from_bits, movemask = _mm256_movemask_ps, cast = _mm256_castsi256_ps,
    table = COMPRESS_32
);
impl_avx2_int!(
    u32, lanes = 8, set1 = _mm256_set1_epi32 as i32, eq = _mm256_cmpeq_epi32,
    lt = lt_epu32, min = _mm256_min_epu32, max = _mm256_max_epu32,
    from_bits = mask32_from_bits, movemask = _mm256_movemask_ps, cast = _mm256_castsi256_ps,
    table = COMPRESS_32
);
impl_avx2_int!(
    i64, lanes = 4, set1 = _mm256_set1_epi64x as i64, eq = _mm256_cmpeq_epi64,
    lt = lt_epi64, min = min_epi64, max = max_epi64,
    from_bits = mask64_from_bits, movemask = _mm256_movemask_pd, cast = _mm256_castsi256_pd,
    table = COMPRESS_64
);
impl_avx2_int!(
    u64, lanes = 4, set1 = _mm256_set1_epi64x as i64, eq = _mm256_cmpeq_epi64,
    lt = lt_epu64, min = min_epu64, max = max_epu64,
    from_bits = mask64_from_bits, movemask = _mm256_movemask_pd, cast = _mm256_castsi256_pd,
    table = COMPRESS_64
);

// =============================================================================
// Float lanes
// =============================================================================

impl Descriptor for Avx2<f32> {
    type Lane = f32;
    type V = __m256;
    type M = __m256;
    const LANES: usize = 8;

    #[inline(always)]
    fn load(self, src: &[f32]) -> __m256 {
        let src = &src[..8];
        // SAFETY: `src` holds a full vector; loadu has no alignment requirement.
        unsafe { _mm256_loadu_ps(src.as_ptr()) }
    }

    #[inline(always)]
    fn store(self, v: __m256, dst: &mut [f32]) {
        let dst = &mut dst[..8];
        // SAFETY: `dst` holds a full vector; storeu has no alignment requirement.
        unsafe { _mm256_storeu_ps(dst.as_mut_ptr(), v) }
    }

    #[inline(always)]
    fn zero(self) -> __m256 {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_setzero_ps() }
    }

    #[inline(always)]
    fn set1(self, value: f32) -> __m256 {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_set1_ps(value) }
    }

    #[inline(always)]
    fn eq(self, a: __m256, b: __m256) -> __m256 {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_cmp_ps(a, b, _CMP_EQ_OQ) }
    }

    #[inline(always)]
    fn lt(self, a: __m256, b: __m256) -> __m256 {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_cmp_ps(a, b, _CMP_LT_OQ) }
    }

    #[inline(always)]
    fn min(self, a: __m256, b: __m256) -> __m256 {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_min_ps(a, b) }
    }

    #[inline(always)]
    fn max(self, a: __m256, b: __m256) -> __m256 {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_max_ps(a, b) }
    }

    #[inline(always)]
    fn mask_from_bits(self, bits: u64) -> __m256 {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_castsi256_ps(mask32_from_bits(bits)) }
    }

    #[inline(always)]
    fn mask_bits(self, m: __m256) -> u64 {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_movemask_ps(m) as u32 as u64 }
    }

    #[inline(always)]
    fn mask_and(self, a: __m256, b: __m256) -> __m256 {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_and_ps(a, b) }
    }

    #[inline(always)]
    fn mask_or(self, a: __m256, b: __m256) -> __m256 {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_or_ps(a, b) }
    }

    #[inline(always)]
    fn mask_xor(self, a: __m256, b: __m256) -> __m256 {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_xor_ps(a, b) }
    }

    #[inline(always)]
    fn mask_and_not(self, a: __m256, b: __m256) -> __m256 {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_andnot_ps(a, b) }
    }

    #[inline(always)]
    fn mask_not(self, m: __m256) -> __m256 {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_xor_ps(m, _mm256_castsi256_ps(_mm256_set1_epi32(-1))) }
    }

    #[inline(always)]
    fn mask_from_vec(self, v: __m256) -> __m256 {
        // Bitwise test: -0.0 and NaN lanes count as set.
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe {
            let bits = _mm256_castps_si256(v);
            let zero = _mm256_cmpeq_epi32(bits, _mm256_setzero_si256());
            _mm256_castsi256_ps(_mm256_xor_si256(zero, _mm256_set1_epi32(-1)))
        }
    }

    #[inline(always)]
    fn vec_from_mask(self, m: __m256) -> __m256 {
        m
    }

    #[inline(always)]
    fn if_then_else(self, m: __m256, yes: __m256, no: __m256) -> __m256 {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_blendv_ps(no, yes, m) }
    }

    #[inline(always)]
    fn compress_store(self, v: __m256, m: __m256, dst: &mut [f32]) -> usize {
        let dst = &mut dst[..8];
        let bits = self.mask_bits(m) as usize;
        // SAFETY: `bits` < 256; `dst` holds a full vector.
        unsafe {
            let indices = _mm256_loadu_si256(COMPRESS_32[bits].as_ptr().cast());
            _mm256_storeu_ps(dst.as_mut_ptr(), _mm256_permutevar8x32_ps(v, indices));
        }
        bits.count_ones() as usize
    }
}

impl Descriptor for Avx2<f64> {
    type Lane = f64;
    type V = __m256d;
    type M = __m256d;
    const LANES: usize = 4;

    #[inline(always)]
    fn load(self, src: &[f64]) -> __m256d {
        let src = &src[..4];
        // SAFETY: `src` holds a full vector; loadu has no alignment requirement.
        unsafe { _mm256_loadu_pd(src.as_ptr()) }
    }

    #[inline(always)]
    fn store(self, v: __m256d, dst: &mut [f64]) {
        let dst = &mut dst[..4];
        // SAFETY: `dst` holds a full vector; storeu has no alignment requirement.
        unsafe { _mm256_storeu_pd(dst.as_mut_ptr(), v) }
    }

    #[inline(always)]
    fn zero(self) -> __m256d {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_setzero_pd() }
    }

    #[inline(always)]
    fn set1(self, value: f64) -> __m256d {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_set1_pd(value) }
    }

    #[inline(always)]
    fn eq(self, a: __m256d, b: __m256d) -> __m256d {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_cmp_pd(a, b, _CMP_EQ_OQ) }
    }

    #[inline(always)]
    fn lt(self, a: __m256d, b: __m256d) -> __m256d {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_cmp_pd(a, b, _CMP_LT_OQ) }
    }

    #[inline(always)]
    fn min(self, a: __m256d, b: __m256d) -> __m256d {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_min_pd(a, b) }
    }

    #[inline(always)]
    fn max(self, a: __m256d, b: __m256d) -> __m256d {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_max_pd(a, b) }
    }

    #[inline(always)]
    fn mask_from_bits(self, bits: u64) -> __m256d {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_castsi256_pd(mask64_from_bits(bits)) }
    }

    #[inline(always)]
    fn mask_bits(self, m: __m256d) -> u64 {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_movemask_pd(m) as u32 as u64 }
    }

    #[inline(always)]
    fn mask_and(self, a: __m256d, b: __m256d) -> __m256d {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_and_pd(a, b) }
    }

    #[inline(always)]
    fn mask_or(self, a: __m256d, b: __m256d) -> __m256d {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_or_pd(a, b) }
    }

    #[inline(always)]
    fn mask_xor(self, a: __m256d, b: __m256d) -> __m256d {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_xor_pd(a, b) }
    }

    #[inline(always)]
    fn mask_and_not(self, a: __m256d, b: __m256d) -> __m256d {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_andnot_pd(a, b) }
    }

    #[inline(always)]
    fn mask_not(self, m: __m256d) -> __m256d {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_xor_pd(m, _mm256_castsi256_pd(_mm256_set1_epi32(-1))) }
    }

    #[inline(always)]
    fn mask_from_vec(self, v: __m256d) -> __m256d {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe {
            let bits = _mm256_castpd_si256(v);
            let zero = _mm256_cmpeq_epi64(bits, _mm256_setzero_si256());
            _mm256_castsi256_pd(_mm256_xor_si256(zero, _mm256_set1_epi32(-1)))
        }
    }

    #[inline(always)]
    fn vec_from_mask(self, m: __m256d) -> __m256d {
        m
    }

    #[inline(always)]
    fn if_then_else(self, m: __m256d, yes: __m256d, no: __m256d) -> __m256d {
        // SAFETY: the descriptor exists only on AVX2-capable CPUs.
        unsafe { _mm256_blendv_pd(no, yes, m) }
    }

    #[inline(always)]
    fn compress_store(self, v: __m256d, m: __m256d, dst: &mut [f64]) -> usize {
        let dst = &mut dst[..4];
        let bits = self.mask_bits(m) as usize;
        // SAFETY: `bits` < 16; `dst` holds a full vector.
        unsafe {
            let indices = _mm256_loadu_si256(COMPRESS_64[bits].as_ptr().cast());
            let packed = _mm256_permutevar8x32_ps(_mm256_castpd_ps(v), indices);
            _mm256_storeu_pd(dst.as_mut_ptr(), _mm256_castps_pd(packed));
        }
        bits.count_ones() as usize
    }
}

// =============================================================================
// Halves: 128-bit lane-crossing concat
// =============================================================================

macro_rules! impl_avx2_halves {
    ($($t:ty => $half:literal, $permute:ident;)+) => {$(
        impl Halves for Avx2<$t> {
            type Half = Simd<$t, $half>;

            #[inline(always)]
            fn half(self) -> Simd<$t, $half> {
                Simd::new()
            }

            #[inline(always)]
            fn concat_upper_lower(self, hi: Self::V, lo: Self::V) -> Self::V {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { $permute(hi, lo, 0x12) }
            }

            #[inline(always)]
            fn concat_upper_upper(self, hi: Self::V, lo: Self::V) -> Self::V {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { $permute(hi, lo, 0x13) }
            }

            #[inline(always)]
            fn concat_lower_upper(self, hi: Self::V, lo: Self::V) -> Self::V {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { $permute(hi, lo, 0x03) }
            }

            #[inline(always)]
            fn concat_lower_lower(self, hi: Self::V, lo: Self::V) -> Self::V {
                // SAFETY: the descriptor exists only on AVX2-capable CPUs.
                unsafe { $permute(hi, lo, 0x02) }
            }
        }
    )+};
}

impl_avx2_halves! {
    i32 => 4, _mm256_permute2x128_si256;
    u32 => 4, _mm256_permute2x128_si256;
    i64 => 2, _mm256_permute2x128_si256;
    u64 => 2, _mm256_permute2x128_si256;
    f32 => 4, _mm256_permute2f128_ps;
    f64 => 2, _mm256_permute2f128_pd;
}
