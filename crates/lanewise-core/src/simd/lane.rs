//! Lane element types.

// SAFETY: Numeric casts in this file are intentional bit reinterpretations.
// - Integer `to_bits`/`from_bits` go through the same-width unsigned type, so
//   `from_bits(to_bits(x)) == x` for every value.
// - `offset` wraps for integers, matching lane arithmetic on hardware.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use std::fmt::Debug;

mod sealed {
    pub trait Sealed {}
}

/// A scalar type that can occupy one vector lane.
///
/// Implemented for `u8 u16 u32 u64 i8 i16 i32 i64 f32 f64` only.
pub trait Lane:
    sealed::Sealed + Copy + Default + PartialEq + PartialOrd + Debug + Send + Sync + 'static
{
    /// Lane width in bits.
    const BITS: u32;
    /// The zero value (`+0.0` for floats).
    const ZERO: Self;
    /// Rust type name, used in diagnostics and test messages.
    const NAME: &'static str;
    /// True for signed integers and floats.
    const SIGNED: bool;
    /// True for `f32` and `f64`.
    const FLOAT: bool;

    /// Raw bits, zero-extended to 64 bits.
    fn to_bits(self) -> u64;

    /// Reinterprets the low `BITS` bits of `bits`.
    fn from_bits(bits: u64) -> Self;

    /// The lane with every bit set. For floats this is a NaN pattern.
    #[inline(always)]
    fn all_ones() -> Self {
        Self::from_bits(u64::MAX)
    }

    /// `self + i`, wrapping for integers.
    fn offset(self, i: usize) -> Self;
}

macro_rules! impl_lane_int {
    ($($t:ty => $bits:ty, $signed:literal;)+) => {$(
        impl sealed::Sealed for $t {}

        impl Lane for $t {
            const BITS: u32 = <$t>::BITS;
            const ZERO: Self = 0;
            const NAME: &'static str = stringify!($t);
            const SIGNED: bool = $signed;
            const FLOAT: bool = false;

            #[inline(always)]
            fn to_bits(self) -> u64 {
                self as $bits as u64
            }

            #[inline(always)]
            fn from_bits(bits: u64) -> Self {
                bits as $bits as $t
            }

            #[inline(always)]
            fn offset(self, i: usize) -> Self {
                self.wrapping_add(i as $t)
            }
        }
    )+};
}

impl_lane_int! {
    u8 => u8, false;
    u16 => u16, false;
    u32 => u32, false;
    u64 => u64, false;
    i8 => u8, true;
    i16 => u16, true;
    i32 => u32, true;
    i64 => u64, true;
}

macro_rules! impl_lane_float {
    ($($t:ty => $bits:ty;)+) => {$(
        impl sealed::Sealed for $t {}

        impl Lane for $t {
            const BITS: u32 = <$bits>::BITS;
            const ZERO: Self = 0.0;
            const NAME: &'static str = stringify!($t);
            const SIGNED: bool = true;
            const FLOAT: bool = true;

            #[inline(always)]
            fn to_bits(self) -> u64 {
                <$t>::to_bits(self) as u64
            }

            #[inline(always)]
            fn from_bits(bits: u64) -> Self {
                <$t>::from_bits(bits as $bits)
            }

            #[inline(always)]
            fn offset(self, i: usize) -> Self {
                self + i as $t
            }
        }
    )+};
}

impl_lane_float! {
    f32 => u32;
    f64 => u64;
}
