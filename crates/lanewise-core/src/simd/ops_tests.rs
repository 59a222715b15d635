//! Tests for load/store, broadcast, iota, comparisons, min/max and
//! compress_store.

#![allow(clippy::cast_possible_truncation)]

use rand::Rng;

use super::test_util::{
    for_all_descriptors, label, lane_bits, lanes_of, random_mask_bits, random_vec, test_rng,
    DescriptorVisitor,
};
use super::{Descriptor, Lane};

/// Random lanes drawn from a small range so comparisons hit equal pairs.
fn small_lanes<T: Lane>(rng: &mut rand::rngs::StdRng, count: usize) -> Vec<T> {
    (0..count)
        .map(|_| T::ZERO.offset(rng.gen_range(0..8)))
        .collect()
}

// ============================================================================
// Memory and constants
// ============================================================================

struct LoadStore;

impl DescriptorVisitor for LoadStore {
    fn visit<D: Descriptor>(&mut self, d: D) {
        let mut rng = test_rng(1);
        let src: Vec<D::Lane> = (0..D::LANES + 3)
            .map(|_| D::Lane::from_bits(rng.gen()))
            .collect();

        // Unaligned source: start one element in.
        let v = d.load(&src[1..]);
        let mut dst = vec![<D::Lane as Lane>::ZERO; D::LANES + 2];
        d.store(v, &mut dst[1..]);

        let expected: Vec<u64> = src[1..=D::LANES].iter().map(|x| x.to_bits()).collect();
        let actual: Vec<u64> = dst[1..=D::LANES].iter().map(|x| x.to_bits()).collect();
        assert_eq!(actual, expected, "{}", label::<D>());
        assert_eq!(dst[0].to_bits(), 0, "{} wrote before dst", label::<D>());
        assert_eq!(dst[D::LANES + 1].to_bits(), 0, "{} wrote past LANES", label::<D>());
    }
}

#[test]
fn test_load_store_unaligned() {
    for_all_descriptors(&mut LoadStore);
}

struct Constants;

impl DescriptorVisitor for Constants {
    fn visit<D: Descriptor>(&mut self, d: D) {
        assert!(lane_bits(d, d.zero()).iter().all(|&b| b == 0), "{}", label::<D>());

        let value = D::Lane::ZERO.offset(5);
        assert!(
            lanes_of(d, d.set1(value)).iter().all(|&x| x == value),
            "{} set1",
            label::<D>()
        );

        let first = D::Lane::ZERO.offset(3);
        for (i, lane) in lanes_of(d, d.iota(first)).into_iter().enumerate() {
            assert_eq!(lane, first.offset(i), "{} iota lane {}", label::<D>(), i);
        }
    }
}

#[test]
fn test_zero_set1_iota() {
    for_all_descriptors(&mut Constants);
}

// ============================================================================
// Comparisons and min/max
// ============================================================================

struct Compare;

impl DescriptorVisitor for Compare {
    fn visit<D: Descriptor>(&mut self, d: D) {
        let mut rng = test_rng(2);
        for _ in 0..32 {
            let a_lanes = small_lanes::<D::Lane>(&mut rng, D::LANES);
            let b_lanes = small_lanes::<D::Lane>(&mut rng, D::LANES);
            let (a, b) = (d.load(&a_lanes), d.load(&b_lanes));

            let eq = d.mask_bits(d.eq(a, b));
            let lt = d.mask_bits(d.lt(a, b));
            let gt = d.mask_bits(d.gt(a, b));
            let min = lanes_of(d, d.min(a, b));
            let max = lanes_of(d, d.max(a, b));

            for i in 0..D::LANES {
                let (x, y) = (a_lanes[i], b_lanes[i]);
                let ctx = format!("{} lane {}: {:?} vs {:?}", label::<D>(), i, x, y);
                assert_eq!(eq >> i & 1 != 0, x == y, "eq {ctx}");
                assert_eq!(lt >> i & 1 != 0, x < y, "lt {ctx}");
                assert_eq!(gt >> i & 1 != 0, x > y, "gt {ctx}");
                assert_eq!(min[i], if y < x { y } else { x }, "min {ctx}");
                assert_eq!(max[i], if x < y { y } else { x }, "max {ctx}");
            }
        }
    }
}

#[test]
fn test_compare_min_max() {
    for_all_descriptors(&mut Compare);
}

struct CompareExtremes;

impl DescriptorVisitor for CompareExtremes {
    fn visit<D: Descriptor>(&mut self, d: D) {
        // Unsigned lanes must not compare as signed: all-ones is the maximum.
        let high = if D::Lane::FLOAT {
            D::Lane::ZERO.offset(1000)
        } else if D::Lane::SIGNED {
            D::Lane::from_bits(u64::MAX >> (65 - D::Lane::BITS))
        } else {
            D::Lane::all_ones()
        };
        let low = D::Lane::ZERO;
        let lt = d.lt(d.set1(low), d.set1(high));
        assert!(d.all_true(lt), "{}: {:?} < {:?}", label::<D>(), low, high);
        assert!(d.all_false(d.lt(d.set1(high), d.set1(low))), "{}", label::<D>());
    }
}

#[test]
fn test_compare_extremes() {
    for_all_descriptors(&mut CompareExtremes);
}

// ============================================================================
// Compress
// ============================================================================

struct CompressStore;

impl CompressStore {
    fn check<D: Descriptor>(d: D, v: D::V, bits: u64) {
        let lanes = lane_bits(d, v);
        let mut dst = vec![<D::Lane as Lane>::ZERO; D::LANES];
        let count = d.compress_store(v, d.mask_from_bits(bits), &mut dst);

        let expected: Vec<u64> = (0..D::LANES)
            .filter(|i| bits >> i & 1 != 0)
            .map(|i| lanes[i])
            .collect();
        let actual: Vec<u64> = dst[..count].iter().map(|x| x.to_bits()).collect();
        assert_eq!(count, expected.len(), "{} mask {:#b}", label::<D>(), bits);
        assert_eq!(actual, expected, "{} mask {:#b}", label::<D>(), bits);
    }
}

impl DescriptorVisitor for CompressStore {
    fn visit<D: Descriptor>(&mut self, d: D) {
        let mut rng = test_rng(3);
        let v = d.iota(D::Lane::ZERO.offset(1));
        for code in 0..1u64 << D::LANES.min(8) {
            Self::check(d, v, code);
        }
        for _ in 0..64 {
            let v = random_vec(d, &mut rng);
            Self::check(d, v, random_mask_bits::<D>(&mut rng));
        }
    }
}

#[test]
fn test_compress_store() {
    for_all_descriptors(&mut CompressStore);
}

#[test]
#[should_panic(expected = "range end index")]
fn test_compress_store_short_destination_panics() {
    use super::Simd;
    let d = Simd::<u32, 8>::new();
    let mut dst = [0u32; 4];
    d.compress_store(d.iota(0), d.first_n(2), &mut dst);
}
