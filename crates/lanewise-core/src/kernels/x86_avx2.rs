//! AVX2 kernels.
//!
//! 32- and 64-bit keys use the native `Avx2` descriptors; 16-bit keys use
//! 16-lane portable descriptors, auto-vectorized to 256-bit registers.

use super::sort_kernels;
use crate::simd::{Avx2, Simd};
use crate::sort::order::{Ascending, Descending};

// SAFETY: these kernels run only when the probe reported AVX2, FMA, BMI1 and
// BMI2, so constructing `Avx2` descriptors without a check is sound.
sort_kernels! {
    features = "avx2,fma,bmi1,bmi2";
    sort_i16_asc: i16 => Simd::<i16, 16>::new(), Ascending;
    sort_i16_desc: i16 => Simd::<i16, 16>::new(), Descending;
    sort_u16_asc: u16 => Simd::<u16, 16>::new(), Ascending;
    sort_u16_desc: u16 => Simd::<u16, 16>::new(), Descending;
    sort_i32_asc: i32 => unsafe { Avx2::<i32>::new_unchecked() }, Ascending;
    sort_i32_desc: i32 => unsafe { Avx2::<i32>::new_unchecked() }, Descending;
    sort_u32_asc: u32 => unsafe { Avx2::<u32>::new_unchecked() }, Ascending;
    sort_u32_desc: u32 => unsafe { Avx2::<u32>::new_unchecked() }, Descending;
    sort_i64_asc: i64 => unsafe { Avx2::<i64>::new_unchecked() }, Ascending;
    sort_i64_desc: i64 => unsafe { Avx2::<i64>::new_unchecked() }, Descending;
    sort_u64_asc: u64 => unsafe { Avx2::<u64>::new_unchecked() }, Ascending;
    sort_u64_desc: u64 => unsafe { Avx2::<u64>::new_unchecked() }, Descending;
    sort_f32_asc: f32 => unsafe { Avx2::<f32>::new_unchecked() }, Ascending;
    sort_f32_desc: f32 => unsafe { Avx2::<f32>::new_unchecked() }, Descending;
    sort_f64_asc: f64 => unsafe { Avx2::<f64>::new_unchecked() }, Ascending;
    sort_f64_desc: f64 => unsafe { Avx2::<f64>::new_unchecked() }, Descending;
}
