//! Paging layout types
//!
//! A [`PagePlan`] is the immutable result of planning one offset/limit
//! window against a fixed maximum page size: which pages to fetch, at
//! which size, and how the boundary pages must be sliced so the
//! concatenated pages reproduce exactly the requested window.

use serde::Serialize;

/// Details of the first planned page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FirstPage {
    /// 1-based number of the first page to request
    pub page_number: u64,
    /// Count of elements belonging to pages strictly before this one
    pub skipped_elements: u64,
    /// Leading elements of this page's raw content to drop
    pub start_offset: u64,
}

/// Details of the last planned page.
///
/// All fields are `None` for an open-ended plan (`limit == 0`): the last
/// page is unknown until the remote data set runs dry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LastPage {
    /// 1-based number of the last page to request, `None` when open-ended
    pub page_number: Option<u64>,
    /// Total elements covered through the end of the last page
    pub total_elements: Option<u64>,
    /// Zero-based inclusive index, within the concatenation of the planned
    /// pages, at which the requested window ends
    pub end_offset: Option<u64>,
}

/// The inclusive range of page numbers a plan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRange {
    /// First page number
    pub start: u64,
    /// Last page number, `None` when the range is open-ended
    pub end: Option<u64>,
}

impl PageRange {
    /// Whether the range has no planned last page
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Whether the given page number falls inside the range
    pub fn contains(&self, page: u64) -> bool {
        page >= self.start && self.end.is_none_or(|end| page <= end)
    }
}

/// Where a slice over a page's rows ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SliceEnd {
    /// Keep rows through the natural end of the page
    Open,
    /// Keep rows through this zero-based inclusive index
    At(usize),
}

/// A slice over the rows of one fetched page (or over the concatenation
/// of all planned pages, for the absolute result slice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSlice {
    /// Zero-based index of the first row to keep
    pub start: usize,
    /// Inclusive end of the kept rows
    pub end: SliceEnd,
}

impl PageSlice {
    /// A slice that keeps every row
    pub fn full() -> Self {
        Self {
            start: 0,
            end: SliceEnd::Open,
        }
    }

    /// Whether this slice keeps the whole page untouched
    pub fn is_full(&self) -> bool {
        self.start == 0 && self.end == SliceEnd::Open
    }

    /// Apply the slice to a page of rows.
    pub fn apply<T>(&self, rows: Vec<T>) -> Vec<T> {
        if self.start >= rows.len() {
            return Vec::new();
        }
        match self.end {
            SliceEnd::Open => rows.into_iter().skip(self.start).collect(),
            SliceEnd::At(end) => {
                if end < self.start {
                    return Vec::new();
                }
                rows.into_iter()
                    .skip(self.start)
                    .take(end - self.start + 1)
                    .collect()
            }
        }
    }
}

/// The planned paging layout for one offset/limit window.
///
/// The plan builds a page layout like this:
///
/// ```text
/// [P1][P2][P3][P4]
/// ```
///
/// and decides which pages are relevant for the window. When the window's
/// start or end does not coincide with a page boundary, the first and/or
/// last page is unaligned and must be sliced:
///
/// ```text
/// [P1] ([P2][P3]) [P4]
/// ```
///
/// Fetching `page_range()` at `page_size`, concatenating the pages and
/// applying `result_slice()` yields exactly the elements of the window
/// `[offset, offset + limit)` (or `[offset, ∞)` when `limit == 0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PagePlan {
    /// The window's leading-element skip this plan was computed for
    pub offset: u64,
    /// The window's element count this plan was computed for (0 = all)
    pub limit: u64,
    /// Uniform size of every planned page request
    pub page_size: u64,
    /// First page details
    pub first_page: FirstPage,
    /// Last page details
    pub last_page: LastPage,
}

impl PagePlan {
    /// The planned page range, possibly open-ended.
    pub fn page_range(&self) -> PageRange {
        PageRange {
            start: self.first_page.page_number,
            end: self.last_page.page_number,
        }
    }

    /// Whether the first page is boundary aligned, so its full raw
    /// content can be used without slicing.
    pub fn first_page_aligned(&self) -> bool {
        self.first_page.start_offset == 0
    }

    /// Whether the last page is boundary aligned, so its full raw
    /// content can be used without slicing.
    pub fn last_page_aligned(&self) -> bool {
        self.relative_last_page_slice().end == SliceEnd::Open
    }

    /// The absolute result slice over the concatenation of all planned
    /// pages.
    pub fn result_slice(&self) -> PageSlice {
        PageSlice {
            start: self.first_page.start_offset as usize,
            end: self
                .last_page
                .end_offset
                .map_or(SliceEnd::Open, |end| SliceEnd::At(end as usize)),
        }
    }

    /// The slice to apply to the first fetched page when it is unaligned:
    /// drop the leading `start_offset` rows, keep the rest.
    pub fn relative_first_page_slice(&self) -> PageSlice {
        PageSlice {
            start: self.first_page.start_offset as usize,
            end: SliceEnd::Open,
        }
    }

    /// The slice to apply to the last fetched page when it is unaligned.
    pub fn relative_last_page_slice(&self) -> PageSlice {
        // When the total is unknown, the ending is open too
        let Some(total) = self.last_page.total_elements else {
            return PageSlice::full();
        };

        // Take (n) from total elements
        let take =
            self.first_page.skipped_elements + self.first_page.start_offset + self.limit;

        // Drop the zero-indexing offset (2) for the slice range; a result
        // of -1 keeps one element, -2 keeps the whole page
        let mut ending = total as i64 - take as i64 - 2;
        if ending < 0 {
            ending += 1;
        }

        if ending < 0 {
            PageSlice::full()
        } else {
            PageSlice {
                start: 0,
                end: SliceEnd::At(ending as usize),
            }
        }
    }
}
