//! Vector and mask abstraction layer.
//!
//! Routines are written against [`Descriptor`]: a compile-time tag naming a
//! lane type, a lane count and a lowering. Each lowering maps the same
//! operations onto its own registers.
//!
//! # Module Structure
//!
//! - `lane`: the sealed [`Lane`] trait over the ten supported element types
//! - `descriptor`: the [`Descriptor`] trait and its derived mask operations
//! - `halves`: [`Halves`]: half extraction, combine and concat
//! - `portable`: array-backed [`Simd`] descriptors, valid on every target
//! - `x86_avx2`: `__m256*` descriptors with vector masks (x86_64 only)
//! - `x86_avx512`: `__m512*` descriptors with predicate masks (x86_64 only)
//!
//! Native descriptors carry a capability token: `try_new` checks the CPU, and
//! `new_unchecked` is reserved for kernels compiled with the matching
//! `#[target_feature]`. Holding a native descriptor therefore proves the
//! instructions it emits are available.

// =============================================================================
// Unsafe Invariants Reference
// =============================================================================
// SAFETY: Shared invariants for intrinsic calls in this module tree.
// - Condition 1: Native descriptors are only constructed after runtime feature
//   detection or inside a `#[target_feature]` kernel selected by the dispatcher.
// - Condition 2: Every load/store first reslices to exactly `LANES` elements, so
//   out-of-range access panics before any intrinsic runs.
// - Condition 3: All memory intrinsics are the unaligned `loadu`/`storeu` forms.

mod descriptor;
mod halves;
mod lane;
mod portable;

#[cfg(target_arch = "x86_64")]
mod x86_avx2;
#[cfg(target_arch = "x86_64")]
mod x86_avx512;

pub use descriptor::{low_bits, Descriptor, MAX_LANES, MAX_VECTOR_BYTES};
pub use halves::{HalfVec, Halves};
pub use lane::Lane;
pub use portable::{Mask, Simd, Vector};

#[cfg(target_arch = "x86_64")]
pub use x86_avx2::Avx2;
#[cfg(target_arch = "x86_64")]
pub use x86_avx512::Avx512;

#[cfg(test)]
mod test_util;

#[cfg(test)]
mod ops_tests;
