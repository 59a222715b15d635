//! Per-target compiled variants of the sort engine.
//!
//! Each submodule instantiates [`crate::sort::engine::sort`] for every key
//! type and order inside a function carrying that target's
//! `#[target_feature]` attribute. The engine and descriptor methods are
//! `#[inline(always)]`, so each wrapper is a complete copy of the sort
//! compiled for its instruction set.
//!
//! Calling a non-scalar kernel on a CPU without its features is undefined
//! behavior; only the dispatcher calls them, after the capability probe.

pub(crate) mod scalar;

#[cfg(all(target_arch = "x86_64", not(feature = "disable-sse4")))]
pub(crate) mod x86_sse4;

#[cfg(all(target_arch = "x86_64", not(feature = "disable-avx2")))]
pub(crate) mod x86_avx2;

#[cfg(all(target_arch = "x86_64", not(feature = "disable-avx512")))]
pub(crate) mod x86_avx512;

#[cfg(all(target_arch = "aarch64", not(feature = "disable-neon")))]
pub(crate) mod neon;

/// Defines one sort kernel per `name: key => descriptor, order` line.
///
/// With a feature string the kernels are `#[target_feature]` functions;
/// without one they are plain functions.
macro_rules! sort_kernels {
    (
        features = $features:literal;
        $($name:ident: $key:ty => $desc:expr, $order:ty;)+
    ) => {$(
        #[target_feature(enable = $features)]
        pub(crate) unsafe fn $name(keys: &mut [$key], scratch: &mut [$key]) {
            $crate::sort::engine::sort::<_, $order>($desc, keys, scratch);
        }
    )+};
    (
        $($name:ident: $key:ty => $desc:expr, $order:ty;)+
    ) => {$(
        pub(crate) fn $name(keys: &mut [$key], scratch: &mut [$key]) {
            $crate::sort::engine::sort::<_, $order>($desc, keys, scratch);
        }
    )+};
}

pub(crate) use sort_kernels;

/// Builds the `[Slot; Target::COUNT]` table for one kernel name.
///
/// Targets excluded from the build get an empty slot, so the dispatcher never
/// sees a kernel that was not compiled.
macro_rules! kernel_slots {
    ($key:ty, $kernel:ident) => {{
        use $crate::dispatch::{Kernel, Slot};
        use $crate::targets::Target;

        #[cfg(all(target_arch = "x86_64", not(feature = "disable-avx512")))]
        const AVX512: Option<Kernel<$key>> =
            Some($crate::kernels::x86_avx512::$kernel as Kernel<$key>);
        #[cfg(not(all(target_arch = "x86_64", not(feature = "disable-avx512"))))]
        const AVX512: Option<Kernel<$key>> = None;

        #[cfg(all(target_arch = "x86_64", not(feature = "disable-avx2")))]
        const AVX2: Option<Kernel<$key>> = Some($crate::kernels::x86_avx2::$kernel as Kernel<$key>);
        #[cfg(not(all(target_arch = "x86_64", not(feature = "disable-avx2"))))]
        const AVX2: Option<Kernel<$key>> = None;

        #[cfg(all(target_arch = "x86_64", not(feature = "disable-sse4")))]
        const SSE4: Option<Kernel<$key>> = Some($crate::kernels::x86_sse4::$kernel as Kernel<$key>);
        #[cfg(not(all(target_arch = "x86_64", not(feature = "disable-sse4"))))]
        const SSE4: Option<Kernel<$key>> = None;

        #[cfg(all(target_arch = "aarch64", not(feature = "disable-neon")))]
        const NEON: Option<Kernel<$key>> = Some($crate::kernels::neon::$kernel as Kernel<$key>);
        #[cfg(not(all(target_arch = "aarch64", not(feature = "disable-neon"))))]
        const NEON: Option<Kernel<$key>> = None;

        const SCALAR: Option<Kernel<$key>> = Some($crate::kernels::scalar::$kernel as Kernel<$key>);

        [
            Slot::new(Target::Avx512, AVX512),
            Slot::new(Target::Avx2, AVX2),
            Slot::new(Target::Sse4, SSE4),
            Slot::new(Target::Neon, NEON),
            Slot::new(Target::Scalar, SCALAR),
        ]
    }};
}

pub(crate) use kernel_slots;
