//! First-call dispatch under contention.
//!
//! Lives in its own test binary so no other test resolves the routine first.

use std::sync::{Arc, Barrier};
use std::thread;

use lanewise_core::sort::SORT_F32_ASC;
use lanewise_core::{best_target, scratch_len, sort_f32_asc};

#[test]
fn test_racing_first_calls_converge() {
    const THREADS: usize = 16;

    assert_eq!(SORT_F32_ASC.resolved_target(), None);

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                #[allow(clippy::cast_precision_loss)]
                let mut keys: Vec<f32> = (0..2000).map(|i| ((i * 7919 + t) % 1013) as f32).collect();
                let mut scratch = vec![0.0; scratch_len::<f32>(keys.len())];
                barrier.wait();
                sort_f32_asc(&mut keys, &mut scratch);
                assert!(keys.windows(2).all(|w| w[0] <= w[1]), "thread {t}");
                SORT_F32_ASC.resolved_target()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(best_target()));
    }
    assert_eq!(SORT_F32_ASC.resolve().unwrap(), best_target());
}
