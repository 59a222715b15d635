//! AVX-512 kernels.
//!
//! 32- and 64-bit keys use the native `Avx512` descriptors; 16-bit keys use
//! 32-lane portable descriptors, auto-vectorized with AVX-512BW.

use super::sort_kernels;
use crate::simd::{Avx512, Simd};
use crate::sort::order::{Ascending, Descending};

// SAFETY: these kernels run only when the probe reported AVX-512 F/VL/DQ/BW
// together with the AVX2 feature set, so `Avx512` descriptors are sound.
sort_kernels! {
    features = "avx512f,avx512vl,avx512dq,avx512bw,avx2,fma,bmi1,bmi2";
    sort_i16_asc: i16 => Simd::<i16, 32>::new(), Ascending;
    sort_i16_desc: i16 => Simd::<i16, 32>::new(), Descending;
    sort_u16_asc: u16 => Simd::<u16, 32>::new(), Ascending;
    sort_u16_desc: u16 => Simd::<u16, 32>::new(), Descending;
    sort_i32_asc: i32 => unsafe { Avx512::<i32>::new_unchecked() }, Ascending;
    sort_i32_desc: i32 => unsafe { Avx512::<i32>::new_unchecked() }, Descending;
    sort_u32_asc: u32 => unsafe { Avx512::<u32>::new_unchecked() }, Ascending;
    sort_u32_desc: u32 => unsafe { Avx512::<u32>::new_unchecked() }, Descending;
    sort_i64_asc: i64 => unsafe { Avx512::<i64>::new_unchecked() }, Ascending;
    sort_i64_desc: i64 => unsafe { Avx512::<i64>::new_unchecked() }, Descending;
    sort_u64_asc: u64 => unsafe { Avx512::<u64>::new_unchecked() }, Ascending;
    sort_u64_desc: u64 => unsafe { Avx512::<u64>::new_unchecked() }, Descending;
    sort_f32_asc: f32 => unsafe { Avx512::<f32>::new_unchecked() }, Ascending;
    sort_f32_desc: f32 => unsafe { Avx512::<f32>::new_unchecked() }, Descending;
    sort_f64_asc: f64 => unsafe { Avx512::<f64>::new_unchecked() }, Ascending;
    sort_f64_desc: f64 => unsafe { Avx512::<f64>::new_unchecked() }, Descending;
}
