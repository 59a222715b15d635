//! Dynamic dispatch tables.
//!
//! Each logical routine is one static [`Routine`]: a slot per target holding
//! the compiled kernel (or nothing, if the target is excluded from the
//! build) and an entry pointer. The entry pointer starts at a trampoline;
//! the first call resolves the best supported kernel, publishes it, and every
//! later call is one atomic load plus one indirect call.
//!
//! Routines are only built inside this crate, where every slot is filled by
//! the kernel tables and every trampoline by `sort_routine!`. Outside code
//! can use them but never assemble one:
//!
//! ```compile_fail
//! use lanewise_core::Routine;
//!
//! let _forge = Routine::<u8>::new;
//! ```
//!
//! ```compile_fail
//! use lanewise_core::dispatch::Slot;
//! ```

use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::targets::{self, Target, TargetSet};

/// A compiled sort kernel: `(keys, scratch)`.
///
/// Unsafe because non-scalar kernels require their target's CPU features.
pub type Kernel<T> = unsafe fn(&mut [T], &mut [T]);

/// One target's entry in a dispatch table.
pub(crate) struct Slot<T> {
    target: Target,
    kernel: Option<Kernel<T>>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<T> {}

impl<T> Slot<T> {
    /// A slot for `target`; `None` if the target was not compiled.
    #[must_use]
    pub(crate) const fn new(target: Target, kernel: Option<Kernel<T>>) -> Self {
        Self { target, kernel }
    }
}

/// Dispatch table and cached entry point for one routine.
pub struct Routine<T> {
    name: &'static str,
    slots: [Slot<T>; Target::COUNT],
    entry: AtomicPtr<()>,
    chosen: OnceLock<Target>,
}

impl<T> Routine<T> {
    /// Creates a routine whose entry pointer is `trampoline`.
    ///
    /// `slots` must follow [`Target::ALL`] order and the scalar slot must hold
    /// a kernel; both are checked at compile time for statics. `trampoline`
    /// must be an `unsafe fn(&mut [T], &mut [T])` that calls
    /// [`Routine::resolve_and_call`] on this routine. Any other pointer makes
    /// [`Routine::call`] undefined behaviour, which is why only this crate
    /// builds routines.
    #[must_use]
    pub(crate) const fn new(
        name: &'static str,
        slots: [Slot<T>; Target::COUNT],
        trampoline: *mut (),
    ) -> Self {
        let mut i = 0;
        while i < Target::COUNT {
            assert!(
                slots[i].target as usize == Target::ALL[i] as usize,
                "dispatch slots must follow Target::ALL order"
            );
            i += 1;
        }
        assert!(
            slots[Target::COUNT - 1].kernel.is_some(),
            "every routine needs a scalar kernel"
        );
        Self {
            name,
            slots,
            entry: AtomicPtr::new(trampoline),
            chosen: OnceLock::new(),
        }
    }

    /// Routine name, e.g. `sort_i32_desc`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Calls the resolved kernel, resolving it first if needed.
    #[inline]
    pub fn call(&self, keys: &mut [T], scratch: &mut [T]) {
        let entry = self.entry.load(Ordering::Acquire);
        // SAFETY: `entry` is either the trampoline installed by `new` or a
        // kernel published by `resolve`, whose target passed the capability
        // probe. Both have the `Kernel<T>` signature.
        unsafe {
            let kernel = std::mem::transmute::<*mut (), Kernel<T>>(entry);
            kernel(keys, scratch);
        }
    }

    /// Picks the best kernel, publishes it as the entry point and returns its
    /// target. Idempotent; concurrent callers converge on the same target.
    ///
    /// # Errors
    ///
    /// [`Error::NoVariant`] if no supported target has a compiled kernel.
    pub fn resolve(&self) -> Result<Target> {
        let supported = targets::supported_targets();
        let (target, kernel) = self
            .slots
            .iter()
            .find_map(|slot| match slot.kernel {
                Some(kernel) if supported.contains(slot.target) => Some((slot.target, kernel)),
                _ => None,
            })
            .ok_or(Error::NoVariant(self.name))?;

        let chosen = *self.chosen.get_or_init(|| target);
        self.entry.store(kernel as *mut (), Ordering::Release);
        tracing::debug!(routine = self.name, target = %chosen, "dispatch resolved");
        Ok(chosen)
    }

    /// Trampoline body: resolve, then forward the call.
    ///
    /// # Panics
    ///
    /// If resolution fails, which requires a build without a scalar kernel.
    pub(crate) fn resolve_and_call(&self, keys: &mut [T], scratch: &mut [T]) {
        if let Err(err) = self.resolve() {
            tracing::error!(routine = self.name, error = %err, "dispatch failed");
            panic!("{err}");
        }
        self.call(keys, scratch);
    }

    /// The target chosen by the first resolution, if any.
    #[must_use]
    pub fn resolved_target(&self) -> Option<Target> {
        self.chosen.get().copied()
    }

    /// Targets with a compiled kernel for this routine.
    #[must_use]
    pub fn compiled_targets(&self) -> TargetSet {
        self.slots
            .iter()
            .filter(|slot| slot.kernel.is_some())
            .map(|slot| slot.target)
            .collect()
    }

    /// The kernel compiled for `target`, if supported on this CPU.
    ///
    /// Lets tests and benchmarks run every variant directly; dispatch itself
    /// always uses the best one.
    #[must_use]
    pub fn kernel_for(&self, target: Target) -> Option<Kernel<T>> {
        if !targets::is_supported(target) {
            return None;
        }
        self.slots[target.index()].kernel
    }
}

impl<T> std::fmt::Debug for Routine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Routine")
            .field("name", &self.name)
            .field("compiled", &self.compiled_targets())
            .field("resolved", &self.resolved_target())
            .finish_non_exhaustive()
    }
}

/// Declares a dispatched sort routine backed by the kernels named `$kernel`.
macro_rules! sort_routine {
    ($(#[$attr:meta])* $vis:vis static $name:ident: $key:ty = $kernel:ident;) => {
        $(#[$attr])*
        $vis static $name: $crate::dispatch::Routine<$key> = {
            unsafe fn trampoline(keys: &mut [$key], scratch: &mut [$key]) {
                $name.resolve_and_call(keys, scratch);
            }
            $crate::dispatch::Routine::new(
                stringify!($kernel),
                $crate::kernels::kernel_slots!($key, $kernel),
                trampoline as *mut (),
            )
        };
    };
}

pub(crate) use sort_routine;
