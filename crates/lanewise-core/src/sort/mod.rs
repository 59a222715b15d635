//! Mask-driven vectorized sort.
//!
//! # Module Structure
//!
//! - `engine`: partition and the iterative quicksort driver, generic over
//!   descriptor and order
//! - `order`: [`Order`] and the compile-time [`KeyOrder`] implementations
//! - `scalar`: insertion sort, heapsort and pivot selection
//! - `api`: dispatched entry points, [`SortKey`] and [`Sorter`]

pub mod engine;
pub mod order;
pub mod scalar;

mod api;

pub use api::{
    scratch_len, sort, sort_f32_asc, sort_f32_desc, sort_f64_asc, sort_f64_desc, sort_i16_asc,
    sort_i16_desc, sort_i32_asc, sort_i32_desc, sort_i64_asc, sort_i64_desc, sort_u16_asc,
    sort_u16_desc, sort_u32_asc, sort_u32_desc, sort_u64_asc, sort_u64_desc, warmup_dispatch,
    SortKey, Sorter, SORT_F32_ASC, SORT_F32_DESC, SORT_F64_ASC, SORT_F64_DESC, SORT_I16_ASC,
    SORT_I16_DESC, SORT_I32_ASC, SORT_I32_DESC, SORT_I64_ASC, SORT_I64_DESC, SORT_U16_ASC,
    SORT_U16_DESC, SORT_U32_ASC, SORT_U32_DESC, SORT_U64_ASC, SORT_U64_DESC,
};
pub use order::{Ascending, Descending, KeyOrder, Order};
