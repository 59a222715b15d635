//! Descriptor enumeration and helpers shared by the simd unit tests.
//!
//! Each test is a visitor struct whose generic `visit` runs once per
//! descriptor: every portable width for all ten lane types, plus the native
//! descriptors the running CPU supports.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Descriptor, Halves, Lane, Simd};

pub(crate) trait DescriptorVisitor {
    fn visit<D: Descriptor>(&mut self, d: D);
}

pub(crate) trait HalvesVisitor {
    fn visit<D: Halves>(&mut self, d: D);
}

pub(crate) trait QuarterVisitor {
    fn visit<D>(&mut self, d: D)
    where
        D: Halves,
        D::Half: Halves;
}

macro_rules! for_each_lane_type {
    ($f:ident, $v:expr) => {
        $f::<u8, _>(&mut *$v);
        $f::<u16, _>(&mut *$v);
        $f::<u32, _>(&mut *$v);
        $f::<u64, _>(&mut *$v);
        $f::<i8, _>(&mut *$v);
        $f::<i16, _>(&mut *$v);
        $f::<i32, _>(&mut *$v);
        $f::<i64, _>(&mut *$v);
        $f::<f32, _>(&mut *$v);
        $f::<f64, _>(&mut *$v);
    };
}

macro_rules! for_each_native {
    (@arch $v:expr, $desc:ident, $($t:ident)+) => {
        $(
            if let Some(d) = $desc::<$t>::try_new() {
                $v.visit(d);
            }
        )+
    };
    ($v:expr) => {
        #[cfg(target_arch = "x86_64")]
        {
            use super::{Avx2, Avx512};
            for_each_native!(@arch $v, Avx2, i32 u32 f32 i64 u64 f64);
            for_each_native!(@arch $v, Avx512, i32 u32 f32 i64 u64 f64);
        }
    };
}

fn portable_all<T: Lane, V: DescriptorVisitor>(v: &mut V) {
    v.visit(Simd::<T, 1>::new());
    v.visit(Simd::<T, 2>::new());
    v.visit(Simd::<T, 4>::new());
    v.visit(Simd::<T, 8>::new());
    v.visit(Simd::<T, 16>::new());
    v.visit(Simd::<T, 32>::new());
    v.visit(Simd::<T, 64>::new());
}

fn portable_halves<T: Lane, V: HalvesVisitor>(v: &mut V) {
    v.visit(Simd::<T, 2>::new());
    v.visit(Simd::<T, 4>::new());
    v.visit(Simd::<T, 8>::new());
    v.visit(Simd::<T, 16>::new());
    v.visit(Simd::<T, 32>::new());
    v.visit(Simd::<T, 64>::new());
}

fn portable_quarters<T: Lane, V: QuarterVisitor>(v: &mut V) {
    v.visit(Simd::<T, 4>::new());
    v.visit(Simd::<T, 8>::new());
    v.visit(Simd::<T, 16>::new());
    v.visit(Simd::<T, 32>::new());
    v.visit(Simd::<T, 64>::new());
}

/// Runs `visitor` over every portable width of every lane type, then the
/// supported native descriptors.
pub(crate) fn for_all_descriptors<V: DescriptorVisitor>(visitor: &mut V) {
    for_each_lane_type!(portable_all, visitor);
    for_each_native!(visitor);
}

/// As [`for_all_descriptors`], restricted to descriptors of two or more lanes.
pub(crate) fn for_all_halves<V: HalvesVisitor>(visitor: &mut V) {
    for_each_lane_type!(portable_halves, visitor);
    for_each_native!(visitor);
}

/// As [`for_all_descriptors`], restricted to descriptors of four or more lanes.
pub(crate) fn for_all_quarters<V: QuarterVisitor>(visitor: &mut V) {
    for_each_lane_type!(portable_quarters, visitor);
    for_each_native!(visitor);
}

pub(crate) fn test_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A vector of random bit patterns (floats may be NaN).
pub(crate) fn random_vec<D: Descriptor>(d: D, rng: &mut StdRng) -> D::V {
    let lanes: Vec<D::Lane> = (0..D::LANES)
        .map(|_| D::Lane::from_bits(rng.gen()))
        .collect();
    d.load(&lanes)
}

pub(crate) fn random_mask_bits<D: Descriptor>(rng: &mut StdRng) -> u64 {
    rng.gen::<u64>() & super::low_bits(D::LANES)
}

/// Lanes of `v` as raw bits, so NaN lanes compare equal to themselves.
pub(crate) fn lane_bits<D: Descriptor>(d: D, v: D::V) -> Vec<u64> {
    lanes_of(d, v).into_iter().map(Lane::to_bits).collect()
}

pub(crate) fn lanes_of<D: Descriptor>(d: D, v: D::V) -> Vec<D::Lane> {
    let mut out = vec![<D::Lane as Lane>::ZERO; D::LANES];
    d.store(v, &mut out);
    out
}

/// Label for assertion messages, e.g. `i32x8`.
pub(crate) fn label<D: Descriptor>() -> String {
    format!("{}x{}", <D::Lane as Lane>::NAME, D::LANES)
}
