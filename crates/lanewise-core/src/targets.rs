//! Instruction-set targets, the capability probe and the runtime disable list.
//!
//! This module provides:
//! - [`Target`], the static best-first list of compiled-in targets
//! - [`TargetSet`], a small bit set of targets
//! - [`supported_targets()`], the cached probe result for this process
//! - [`configure()`], applying a runtime disable list before the first probe

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::config::DispatchConfig;
use crate::error::{Error, Result};

// =============================================================================
// Target
// =============================================================================

/// An instruction-set target, ordered best-first.
///
/// The derived `Ord` follows declaration order, so `Avx512 < Scalar` means
/// AVX-512 is preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// AVX-512 F/VL/DQ/BW (x86_64).
    Avx512,
    /// AVX2 with FMA, BMI1 and BMI2 (x86_64).
    Avx2,
    /// SSE4.1 and SSE4.2 (x86_64).
    Sse4,
    /// Advanced SIMD (aarch64).
    Neon,
    /// Portable single-lane fallback. Always compiled, always supported.
    Scalar,
}

impl Target {
    /// Every target, best first. `Scalar` is last.
    pub const ALL: [Target; 5] = [
        Target::Avx512,
        Target::Avx2,
        Target::Sse4,
        Target::Neon,
        Target::Scalar,
    ];

    /// Number of targets.
    pub const COUNT: usize = Self::ALL.len();

    /// Position in [`Target::ALL`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Target::Avx512 => "avx512",
            Target::Avx2 => "avx2",
            Target::Sse4 => "sse4",
            Target::Neon => "neon",
            Target::Scalar => "scalar",
        }
    }

    /// Width of one vector register in bytes. Scalar processes one lane.
    #[must_use]
    pub const fn vector_bytes(self) -> Option<usize> {
        match self {
            Target::Avx512 => Some(64),
            Target::Avx2 => Some(32),
            Target::Sse4 | Target::Neon => Some(16),
            Target::Scalar => None,
        }
    }

    /// Lanes of `lane_bytes`-wide elements per vector.
    #[must_use]
    pub const fn lanes(self, lane_bytes: usize) -> usize {
        match self.vector_bytes() {
            Some(bytes) => bytes / lane_bytes,
            None => 1,
        }
    }

    /// True if this target's kernels are part of the build.
    ///
    /// Requires the matching architecture and no `disable-<target>` feature.
    #[must_use]
    pub const fn is_compiled(self) -> bool {
        match self {
            Target::Avx512 => cfg!(all(target_arch = "x86_64", not(feature = "disable-avx512"))),
            Target::Avx2 => cfg!(all(target_arch = "x86_64", not(feature = "disable-avx2"))),
            Target::Sse4 => cfg!(all(target_arch = "x86_64", not(feature = "disable-sse4"))),
            Target::Neon => cfg!(all(target_arch = "aarch64", not(feature = "disable-neon"))),
            Target::Scalar => true,
        }
    }

    /// Raw CPU/OS capability check, ignoring build and runtime exclusions.
    #[must_use]
    pub fn is_detected(self) -> bool {
        match self {
            Target::Avx512 | Target::Avx2 | Target::Sse4 => detect_x86(self),
            Target::Neon => cfg!(target_arch = "aarch64"),
            Target::Scalar => true,
        }
    }
}

#[cfg(target_arch = "x86_64")]
fn detect_x86(target: Target) -> bool {
    match target {
        Target::Avx512 => {
            is_x86_feature_detected!("avx512f")
                && is_x86_feature_detected!("avx512vl")
                && is_x86_feature_detected!("avx512dq")
                && is_x86_feature_detected!("avx512bw")
                && detect_x86(Target::Avx2)
        }
        Target::Avx2 => {
            is_x86_feature_detected!("avx2")
                && is_x86_feature_detected!("fma")
                && is_x86_feature_detected!("bmi1")
                && is_x86_feature_detected!("bmi2")
                && detect_x86(Target::Sse4)
        }
        Target::Sse4 => {
            is_x86_feature_detected!("sse4.1") && is_x86_feature_detected!("sse4.2")
        }
        Target::Neon | Target::Scalar => false,
    }
}

#[cfg(not(target_arch = "x86_64"))]
fn detect_x86(_target: Target) -> bool {
    false
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Target::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownTarget(name.to_string()))
    }
}

// =============================================================================
// TargetSet
// =============================================================================

/// A set of targets, iterated best-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TargetSet(u8);

impl TargetSet {
    /// The empty set.
    pub const EMPTY: TargetSet = TargetSet(0);

    /// Returns the set with `target` added.
    #[must_use]
    pub const fn with(self, target: Target) -> Self {
        Self(self.0 | 1 << target.index())
    }

    /// Returns the set with `target` removed.
    #[must_use]
    pub const fn without(self, target: Target) -> Self {
        Self(self.0 & !(1 << target.index()))
    }

    /// Membership test.
    #[must_use]
    pub const fn contains(self, target: Target) -> bool {
        self.0 & 1 << target.index() != 0
    }

    /// Number of members.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// True if the set has no members.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The most preferred member.
    #[must_use]
    pub fn best(self) -> Option<Target> {
        self.iter().next()
    }

    /// Members in priority order.
    pub fn iter(self) -> impl Iterator<Item = Target> {
        Target::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

impl FromIterator<Target> for TargetSet {
    fn from_iter<I: IntoIterator<Item = Target>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, TargetSet::with)
    }
}

impl fmt::Display for TargetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (i, target) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(target.name())?;
        }
        Ok(())
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Runtime-disabled targets, fixed before the first probe.
static RUNTIME_DISABLED: OnceLock<TargetSet> = OnceLock::new();

/// Probe result, computed once per process.
static SUPPORTED: OnceLock<TargetSet> = OnceLock::new();

/// Targets that are compiled, detected and not in `disabled`, best first.
///
/// `Scalar` is always a member.
#[must_use]
pub fn probe(disabled: TargetSet) -> TargetSet {
    Target::ALL
        .into_iter()
        .filter(|t| *t == Target::Scalar || !disabled.contains(*t))
        .filter(|t| t.is_compiled() && t.is_detected())
        .collect()
}

/// Applies a runtime disable list.
///
/// Must run before anything probes the registry, i.e. before the first
/// dispatched call, [`supported_targets()`] or [`best_target()`].
///
/// # Errors
///
/// - [`Error::UnknownTarget`] / [`Error::ScalarNotDisableable`] for a bad list
/// - [`Error::RegistryFrozen`] if the disable list was already fixed
pub fn configure(config: &DispatchConfig) -> Result<()> {
    let disabled = config.disabled_set()?;
    RUNTIME_DISABLED
        .set(disabled)
        .map_err(|_| Error::RegistryFrozen)?;
    tracing::debug!(%disabled, "runtime target disable list applied");
    Ok(())
}

/// The runtime disable list, falling back to `LANEWISE_DISABLED_TARGETS`.
#[must_use]
pub fn runtime_disabled() -> TargetSet {
    *RUNTIME_DISABLED.get_or_init(|| {
        match DispatchConfig::from_env().and_then(|config| config.disabled_set()) {
            Ok(disabled) => disabled,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring invalid LANEWISE_DISABLED_TARGETS");
                TargetSet::EMPTY
            }
        }
    })
}

/// Targets usable in this process, probed once and cached.
///
/// Concurrent first calls converge on the same value.
#[must_use]
pub fn supported_targets() -> TargetSet {
    *SUPPORTED.get_or_init(|| {
        let disabled = runtime_disabled();
        let supported = probe(disabled);
        tracing::info!(
            best = %supported.best().unwrap_or(Target::Scalar),
            %supported,
            %disabled,
            "SIMD target probe complete"
        );
        supported
    })
}

/// The most preferred supported target.
#[must_use]
pub fn best_target() -> Target {
    supported_targets().best().unwrap_or(Target::Scalar)
}

/// True if dispatch may select `target` in this process.
#[must_use]
pub fn is_supported(target: Target) -> bool {
    supported_targets().contains(target)
}
