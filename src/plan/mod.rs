//! Paging layout planner
//!
//! # Overview
//!
//! The planner turns an `(offset, limit)` window plus a maximum page size
//! into a [`PagePlan`]: the uniform page size to request, the first and
//! last page numbers, and the boundary slices that crop off the undesired
//! leading/trailing elements of the first and last page. It is a pure
//! function of its three integers; the executor consumes its output.

mod planner;
mod types;

pub use types::{FirstPage, LastPage, PagePlan, PageRange, PageSlice, SliceEnd};
