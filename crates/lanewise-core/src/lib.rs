//! # Lanewise Core
//!
//! Portable SIMD with runtime target dispatch and a mask-driven vectorized
//! quicksort.
//!
//! Routines are written once against the [`simd::Descriptor`] vector/mask
//! model, compiled once per instruction-set target, and the best variant the
//! running CPU supports is picked on first use.
//!
//! ## Quick Start
//!
//! ```rust
//! use lanewise_core::{scratch_len, sort_i32_desc};
//!
//! let mut keys = vec![3, -7, 12, 0, 12, 5];
//! let mut scratch = vec![0; scratch_len::<i32>(keys.len())];
//! sort_i32_desc(&mut keys, &mut scratch);
//! assert_eq!(keys, [12, 12, 5, 3, 0, -7]);
//! ```
//!
//! ## Module Structure
//!
//! - `simd`: lane types, descriptors, portable and native x86 lowerings
//! - `targets`: target list, capability probe, runtime disable list
//! - `dispatch`: per-routine dispatch tables with a cached entry pointer
//! - `sort`: partition/sort engine and the public sort entry points
//! - `config`: figment-based configuration

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod dispatch;
pub mod error;
mod kernels;
pub mod simd;
pub mod sort;
pub mod targets;

#[cfg(test)]
mod dispatch_tests;

pub use config::{DispatchConfig, LanewiseConfig, LoggingConfig};
pub use dispatch::{Kernel, Routine};
pub use error::{Error, Result};
pub use sort::{
    scratch_len, sort, sort_f32_asc, sort_f32_desc, sort_f64_asc, sort_f64_desc, sort_i16_asc,
    sort_i16_desc, sort_i32_asc, sort_i32_desc, sort_i64_asc, sort_i64_desc, sort_u16_asc,
    sort_u16_desc, sort_u32_asc, sort_u32_desc, sort_u64_asc, sort_u64_desc, warmup_dispatch,
    Order, SortKey, Sorter,
};
pub use targets::{best_target, configure, supported_targets, Target, TargetSet};
