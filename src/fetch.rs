//! The page-fetch collaborator contract
//!
//! The planner and executor never talk to the network themselves. A
//! caller-provided [`PageFetcher`] receives a [`PageRequest`] snapshot of
//! the criteria (filters, sort, page and per-page numbers) and returns one
//! [`FetchedPage`] of rows, or an error. The row type is opaque to this
//! crate.

use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use serde::Serialize;

/// A snapshot of the criteria for one outbound page request.
///
/// Carries everything a driver needs to embed into its request: the
/// resolved filter conjunction, the opaque sort spec and the page/per-page
/// numbers. The caller's `offset`/`limit` never appear here; they are
/// consumed entirely by the planner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRequest {
    /// Conjunctive filter map, passed through unchanged
    pub filters: JsonObject,
    /// Opaque sort spec, passed through unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<JsonValue>,
    /// 1-based page number to request
    pub page: u64,
    /// Fixed page size to request
    pub per_page: u64,
}

/// One fetched page of rows.
///
/// `raw_count` must report the number of rows the remote page actually
/// contained before any driver-side slicing; the executor compares it to
/// the planned page size to detect the natural end of the remote data set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage<T> {
    /// The rows of this page, in remote order
    pub rows: Vec<T>,
    /// Unsliced row count of the remote page
    pub raw_count: usize,
}

impl<T> FetchedPage<T> {
    /// Create a page whose raw count equals its row count
    pub fn new(rows: Vec<T>) -> Self {
        let raw_count = rows.len();
        Self { rows, raw_count }
    }

    /// Create a page with an explicit raw (pre-slice) count
    pub fn with_raw_count(rows: Vec<T>, raw_count: usize) -> Self {
        Self { rows, raw_count }
    }

    /// An empty page, as substituted for suppressed fetch errors
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            raw_count: 0,
        }
    }
}

/// The injected driver that executes one page fetch.
///
/// Blanket-implemented for `FnMut` closures, so plain functions work:
///
/// ```rust,ignore
/// let fetcher = |request: &PageRequest| -> Result<FetchedPage<Row>> {
///     client.search(request)
/// };
/// ```
pub trait PageFetcher<T> {
    /// Fetch the page described by `request`
    fn fetch_page(&mut self, request: &PageRequest) -> Result<FetchedPage<T>>;
}

impl<T, F> PageFetcher<T> for F
where
    F: FnMut(&PageRequest) -> Result<FetchedPage<T>>,
{
    fn fetch_page(&mut self, request: &PageRequest) -> Result<FetchedPage<T>> {
        self(request)
    }
}
