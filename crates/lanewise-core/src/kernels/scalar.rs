//! Portable single-lane kernels. Always compiled; the last-resort dispatch target.

use super::sort_kernels;
use crate::simd::Simd;
use crate::sort::order::{Ascending, Descending};

sort_kernels! {
    sort_i16_asc: i16 => Simd::<i16, 1>::new(), Ascending;
    sort_i16_desc: i16 => Simd::<i16, 1>::new(), Descending;
    sort_u16_asc: u16 => Simd::<u16, 1>::new(), Ascending;
    sort_u16_desc: u16 => Simd::<u16, 1>::new(), Descending;
    sort_i32_asc: i32 => Simd::<i32, 1>::new(), Ascending;
    sort_i32_desc: i32 => Simd::<i32, 1>::new(), Descending;
    sort_u32_asc: u32 => Simd::<u32, 1>::new(), Ascending;
    sort_u32_desc: u32 => Simd::<u32, 1>::new(), Descending;
    sort_i64_asc: i64 => Simd::<i64, 1>::new(), Ascending;
    sort_i64_desc: i64 => Simd::<i64, 1>::new(), Descending;
    sort_u64_asc: u64 => Simd::<u64, 1>::new(), Ascending;
    sort_u64_desc: u64 => Simd::<u64, 1>::new(), Descending;
    sort_f32_asc: f32 => Simd::<f32, 1>::new(), Ascending;
    sort_f32_desc: f32 => Simd::<f32, 1>::new(), Descending;
    sort_f64_asc: f64 => Simd::<f64, 1>::new(), Ascending;
    sort_f64_desc: f64 => Simd::<f64, 1>::new(), Descending;
}
