//! Tests for dispatch tables and entry-point resolution.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::dispatch::{Kernel, Routine, Slot};
use crate::sort::{SORT_I64_ASC, SORT_U16_DESC};
use crate::targets::{best_target, supported_targets, Target, TargetSet};

static SCALAR_CALLS: AtomicUsize = AtomicUsize::new(0);

fn fill_with_len(keys: &mut [u8], scratch: &mut [u8]) {
    SCALAR_CALLS.fetch_add(1, Ordering::SeqCst);
    keys.fill(u8::try_from(scratch.len()).unwrap_or(u8::MAX));
}

/// A routine with only a scalar kernel compiled.
static SCALAR_ONLY: Routine<u8> = {
    unsafe fn trampoline(keys: &mut [u8], scratch: &mut [u8]) {
        SCALAR_ONLY.resolve_and_call(keys, scratch);
    }
    Routine::new(
        "fill_with_len",
        [
            Slot::new(Target::Avx512, None),
            Slot::new(Target::Avx2, None),
            Slot::new(Target::Sse4, None),
            Slot::new(Target::Neon, None),
            Slot::new(Target::Scalar, Some(fill_with_len as Kernel<u8>)),
        ],
        trampoline as *mut (),
    )
};

#[test]
fn test_scalar_only_routine_resolves_to_scalar() {
    assert_eq!(SCALAR_ONLY.compiled_targets(), TargetSet::EMPTY.with(Target::Scalar));

    let mut keys = [0u8; 4];
    let mut scratch = [0u8; 9];
    SCALAR_ONLY.call(&mut keys, &mut scratch);
    SCALAR_ONLY.call(&mut keys, &mut scratch);

    assert_eq!(keys, [9; 4]);
    assert_eq!(SCALAR_ONLY.resolved_target(), Some(Target::Scalar));
    assert!(SCALAR_CALLS.load(Ordering::SeqCst) >= 2);
}

#[test]
fn test_kernel_for_missing_slot_is_none() {
    for target in Target::ALL {
        let kernel = SCALAR_ONLY.kernel_for(target);
        assert_eq!(kernel.is_some(), target == Target::Scalar, "{target}");
    }
}

#[test]
fn test_resolve_is_idempotent() {
    let first = SORT_I64_ASC.resolve().unwrap();
    let second = SORT_I64_ASC.resolve().unwrap();
    assert_eq!(first, second);
    assert_eq!(first, best_target());
    assert_eq!(SORT_I64_ASC.resolved_target(), Some(first));
}

#[test]
fn test_concurrent_first_calls_agree() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let mut keys: Vec<u16> = (0..500).map(|k| (k * 31 + i) % 257).collect();
                let mut scratch = vec![0; crate::scratch_len::<u16>(keys.len())];
                SORT_U16_DESC.call(&mut keys, &mut scratch);
                assert!(keys.windows(2).all(|w| w[0] >= w[1]));
                SORT_U16_DESC.resolved_target()
            })
        })
        .collect();

    let chosen: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(chosen.iter().all(|t| *t == Some(best_target())));
}

#[test]
fn test_compiled_targets_respect_build() {
    let compiled = SORT_I64_ASC.compiled_targets();
    for target in Target::ALL {
        assert_eq!(compiled.contains(target), target.is_compiled(), "{target}");
    }
    assert!(supported_targets().iter().all(|t| compiled.contains(t)));
}

#[test]
fn test_routine_debug() {
    let debug = format!("{SCALAR_ONLY:?}");
    assert!(debug.contains("Routine"));
    assert!(debug.contains("fill_with_len"));
}
