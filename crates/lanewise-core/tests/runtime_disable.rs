//! Runtime target exclusion.
//!
//! The disable list is process-wide and fixed by the first probe, so this
//! file holds a single test.

use lanewise_core::sort::SORT_I32_DESC;
use lanewise_core::{
    best_target, configure, scratch_len, sort_i32_desc, supported_targets, DispatchConfig, Error,
    Target, TargetSet,
};

#[test]
fn test_disable_everything_but_scalar() {
    let config = DispatchConfig {
        disabled_targets: vec!["avx512".into(), "avx2".into(), "sse4".into(), "neon".into()],
    };
    configure(&config).unwrap();

    assert_eq!(supported_targets(), TargetSet::EMPTY.with(Target::Scalar));
    assert_eq!(best_target(), Target::Scalar);

    let mut keys: Vec<i32> = (0..5000).map(|i: i32| i.wrapping_mul(-1_640_531_535) >> 7).collect();
    let mut expected = keys.clone();
    expected.sort_unstable_by(|a, b| b.cmp(a));
    let mut scratch = vec![0; scratch_len::<i32>(keys.len())];
    sort_i32_desc(&mut keys, &mut scratch);

    assert_eq!(keys, expected);
    assert_eq!(SORT_I32_DESC.resolved_target(), Some(Target::Scalar));
    assert!(SORT_I32_DESC.kernel_for(Target::Avx2).is_none());

    let err = configure(&DispatchConfig::default()).unwrap_err();
    assert!(matches!(err, Error::RegistryFrozen));
}
