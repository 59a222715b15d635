//! Sort orders.
//!
//! The engine is generic over [`KeyOrder`]; the two orders differ only in
//! which operand of the compare comes first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::simd::{Descriptor, Lane};

/// Runtime choice of sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Smallest key first.
    #[default]
    Ascending,
    /// Largest key first.
    Descending,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Order::Ascending => "ascending",
            Order::Descending => "descending",
        })
    }
}

/// Compile-time sort order.
pub trait KeyOrder: Copy + Default + Send + Sync + 'static {
    /// The runtime value of this order.
    const ORDER: Order;

    /// Lanes where `a` must be placed before `b`.
    fn first<D: Descriptor>(d: D, a: D::V, b: D::V) -> D::M;

    /// Scalar counterpart of [`KeyOrder::first`].
    fn before<T: Lane>(a: T, b: T) -> bool;
}

/// Smallest key first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ascending;

/// Largest key first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Descending;

impl KeyOrder for Ascending {
    const ORDER: Order = Order::Ascending;

    #[inline(always)]
    fn first<D: Descriptor>(d: D, a: D::V, b: D::V) -> D::M {
        d.lt(a, b)
    }

    #[inline(always)]
    fn before<T: Lane>(a: T, b: T) -> bool {
        a < b
    }
}

impl KeyOrder for Descending {
    const ORDER: Order = Order::Descending;

    #[inline(always)]
    fn first<D: Descriptor>(d: D, a: D::V, b: D::V) -> D::M {
        d.lt(b, a)
    }

    #[inline(always)]
    fn before<T: Lane>(a: T, b: T) -> bool {
        b < a
    }
}
