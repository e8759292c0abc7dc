//! # pagewise
//!
//! Pagination planning and lazy execution for offset/limit windows over
//! page-numbered APIs.
//!
//! Many remote APIs only speak fixed-size, 1-based pages while callers
//! think in `(offset, limit)` windows. This crate turns an arbitrary
//! window plus a set of opaque filter conditions into a minimal sequence
//! of page requests and streams back exactly the requested slice, one row
//! at a time. Transport, authentication and row (de)serialization stay
//! with the caller: the crate only ever sees integers, ranges and an
//! injected page-fetch function.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagewise::{Criteria, FetchedPage, PageRequest, Result};
//!
//! let mut criteria = Criteria::new()
//!     .with_filter("status", "open")
//!     .with_offset(12)
//!     .with_limit(31);
//!
//! let fetcher = |request: &PageRequest| -> Result<FetchedPage<serde_json::Value>> {
//!     // issue the real request with request.page / request.per_page
//!     # unimplemented!()
//! };
//!
//! for row in criteria.results(fetcher) {
//!     let row = row?;
//!     // process the row
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        Criteria                            │
//! │  filters / limit / offset / sort / strict / max_per_page   │
//! └────────────────────────────┬───────────────────────────────┘
//!                              │ plan()
//! ┌────────────────────────────┴───────────────────────────────┐
//! │                        PagePlan                            │
//! │  page_size      first page / last page     boundary slices │
//! └────────────────────────────┬───────────────────────────────┘
//!                              │ results(fetcher)
//! ┌────────────────────────────┴───────────────────────────────┐
//! │                        Results                             │
//! │  PageCursor   PageFetcher   slicing   short-page stop rule │
//! └────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// The page-fetch collaborator contract
pub mod fetch;

/// Paging layout planner
pub mod plan;

/// Query intent store
pub mod criteria;

/// Lazy page-by-page execution
pub mod executor;

pub use criteria::Criteria;
pub use error::{Error, Result};
pub use executor::{PageCursor, Results};
pub use fetch::{FetchedPage, PageFetcher, PageRequest};
pub use plan::{FirstPage, LastPage, PagePlan, PageRange, PageSlice, SliceEnd};
pub use types::{JsonObject, JsonValue, DEFAULT_MAX_PER_PAGE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
