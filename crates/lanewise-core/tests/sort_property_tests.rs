//! Property-based equivalence tests for the dispatched sorts.
//!
//! Every public entry point, and every per-target variant this CPU supports,
//! is compared against `sort_unstable` over randomized inputs and lengths
//! around the base case and vector boundaries.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

use proptest::{
    collection::vec,
    prelude::{any, prop_assert, prop_assert_eq, prop_oneof, Just, Strategy},
    proptest,
    test_runner::{Config as ProptestConfig, FileFailurePersistence},
};
use lanewise_core::sort::{
    SORT_F32_ASC, SORT_F32_DESC, SORT_I16_DESC, SORT_I64_ASC, SORT_U32_DESC, SORT_U64_ASC,
};
use lanewise_core::{
    scratch_len, sort, sort_f64_asc, sort_f64_desc, sort_i32_asc, sort_i32_desc, sort_u16_asc,
    Order, Routine, SortKey, Sorter, Target,
};

const SORT_PROP_CASES: u32 = 128;
const SORT_PROP_MAX_SHRINK_ITERS: u32 = 1024;

fn length_strategy() -> impl Strategy<Value = usize> {
    prop_oneof![
        Just(0_usize),
        Just(1_usize),
        Just(2_usize),
        Just(31_usize),
        Just(32_usize),
        Just(33_usize),
        Just(63_usize),
        Just(64_usize),
        Just(65_usize),
        Just(129_usize),
        Just(1000_usize),
        0_usize..=4096,
    ]
}

/// Keys drawn from a small range so duplicates and long equal runs occur.
fn few_distinct_i32() -> impl Strategy<Value = Vec<i32>> {
    length_strategy().prop_flat_map(|len| vec(-3_i32..=3, len))
}

fn any_i32() -> impl Strategy<Value = Vec<i32>> {
    length_strategy().prop_flat_map(|len| vec(any::<i32>(), len))
}

fn finite_f64() -> impl Strategy<Value = Vec<f64>> {
    length_strategy().prop_flat_map(|len| vec(-1.0e12_f64..1.0e12, len))
}

fn sort_proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: SORT_PROP_CASES,
        max_shrink_iters: SORT_PROP_MAX_SHRINK_ITERS,
        // Integration tests do not have a nearby lib.rs/main.rs, so set an
        // explicit persistence root for reproducible counterexamples.
        failure_persistence: Some(Box::new(FileFailurePersistence::WithSource(
            "sort-property-regressions",
        ))),
        ..ProptestConfig::default()
    }
}

fn reference<T: PartialOrd + Copy>(keys: &[T], order: Order) -> Vec<T> {
    let mut sorted = keys.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
    if order == Order::Descending {
        sorted.reverse();
    }
    sorted
}

/// Runs every supported variant of `routine` and returns the outputs.
fn each_variant<T: SortKey>(routine: &Routine<T>, keys: &[T]) -> Vec<(Target, Vec<T>)> {
    Target::ALL
        .into_iter()
        .filter_map(|target| {
            let kernel = routine.kernel_for(target)?;
            let mut sorted = keys.to_vec();
            let mut scratch = vec![T::ZERO; scratch_len::<T>(keys.len())];
            // SAFETY: kernel_for only returns kernels supported on this CPU.
            unsafe { kernel(&mut sorted, &mut scratch) };
            Some((target, sorted))
        })
        .collect()
}

proptest! {
    #![proptest_config(sort_proptest_config())]

    #[test]
    fn test_i32_entry_points_match_std(keys in any_i32()) {
        let mut scratch = vec![0; scratch_len::<i32>(keys.len())];

        let mut asc = keys.clone();
        sort_i32_asc(&mut asc, &mut scratch);
        prop_assert_eq!(asc, reference(&keys, Order::Ascending));

        let mut desc = keys.clone();
        sort_i32_desc(&mut desc, &mut scratch);
        prop_assert_eq!(desc, reference(&keys, Order::Descending));
    }

    #[test]
    fn test_duplicate_heavy_keys_match_std(keys in few_distinct_i32()) {
        let mut sorter = Sorter::new();
        for order in [Order::Ascending, Order::Descending] {
            let mut sorted = keys.clone();
            sorter.sort(&mut sorted, order);
            prop_assert_eq!(sorted, reference(&keys, order));
        }
    }

    #[test]
    fn test_f64_entry_points_match_std(keys in finite_f64()) {
        let mut scratch = vec![0.0; scratch_len::<f64>(keys.len())];

        let mut asc = keys.clone();
        sort_f64_asc(&mut asc, &mut scratch);
        prop_assert_eq!(asc, reference(&keys, Order::Ascending));

        let mut desc = keys.clone();
        sort_f64_desc(&mut desc, &mut scratch);
        prop_assert_eq!(desc, reference(&keys, Order::Descending));
    }

    #[test]
    fn test_u16_generic_sort_matches_std(keys in length_strategy().prop_flat_map(|len| vec(any::<u16>(), len))) {
        let mut scratch = vec![0; scratch_len::<u16>(keys.len())];
        let mut sorted = keys.clone();
        sort(&mut sorted, &mut scratch, Order::Ascending);
        prop_assert_eq!(&sorted, &reference(&keys, Order::Ascending));

        let mut again = keys.clone();
        sort_u16_asc(&mut again, &mut scratch);
        prop_assert_eq!(again, sorted);
    }

    #[test]
    fn test_every_variant_agrees(
        small in length_strategy().prop_flat_map(|len| vec(any::<i16>(), len)),
        wide in length_strategy().prop_flat_map(|len| vec(any::<u64>(), len)),
    ) {
        let expected = reference(&small, Order::Descending);
        for (target, sorted) in each_variant(&SORT_I16_DESC, &small) {
            prop_assert_eq!(&sorted, &expected, "sort_i16_desc on {}", target);
        }

        let expected = reference(&wide, Order::Ascending);
        for (target, sorted) in each_variant(&SORT_U64_ASC, &wide) {
            prop_assert_eq!(&sorted, &expected, "sort_u64_asc on {}", target);
        }

        let narrow: Vec<u32> = wide.iter().map(|k| (k >> 40) as u32).collect();
        let expected = reference(&narrow, Order::Descending);
        for (target, sorted) in each_variant(&SORT_U32_DESC, &narrow) {
            prop_assert_eq!(&sorted, &expected, "sort_u32_desc on {}", target);
        }

        let signed: Vec<i64> = wide.iter().map(|k| k.wrapping_sub(u64::MAX / 2) as i64).collect();
        let expected = reference(&signed, Order::Ascending);
        for (target, sorted) in each_variant(&SORT_I64_ASC, &signed) {
            prop_assert_eq!(&sorted, &expected, "sort_i64_asc on {}", target);
        }
    }

    #[test]
    fn test_every_f32_variant_agrees(keys in length_strategy().prop_flat_map(|len| vec(-1.0e6_f32..1.0e6, len))) {
        for (routine, order) in [(&SORT_F32_ASC, Order::Ascending), (&SORT_F32_DESC, Order::Descending)] {
            let expected = reference(&keys, order);
            for (target, sorted) in each_variant(routine, &keys) {
                prop_assert_eq!(&sorted, &expected, "{} on {}", routine.name(), target);
            }
        }
    }

    #[test]
    fn test_nan_keys_lead_descending_output(
        keys in length_strategy().prop_flat_map(|len| vec(any::<f32>(), len)),
    ) {
        let mut sorted = keys.clone();
        let mut scratch = vec![0.0; scratch_len::<f32>(keys.len())];
        sort(&mut sorted, &mut scratch, Order::Descending);

        let bits = |v: &[f32]| {
            let mut b: Vec<u32> = v.iter().map(|k| k.to_bits()).collect();
            b.sort_unstable();
            b
        };
        prop_assert_eq!(bits(&sorted), bits(&keys));

        let num_nan = keys.iter().filter(|k| k.is_nan()).count();
        prop_assert!(sorted[..num_nan].iter().all(|k| k.is_nan()));
        prop_assert!(sorted[num_nan..].windows(2).all(|w| w[0] >= w[1]));
    }
}
