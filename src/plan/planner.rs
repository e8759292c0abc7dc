//! The paging layout computation
//!
//! Pure arithmetic over `(offset, limit, max_per_page)`: no I/O, fully
//! deterministic. The boundary-mark enumeration below is intentionally
//! kept in its enumerated form; the worked fixtures in the test matrix
//! are the authoritative description of the layout, not a closed-form
//! re-derivation.

use super::types::{FirstPage, LastPage, PagePlan};
use crate::error::{Error, Result};

impl PagePlan {
    /// Compute the paging layout for the window `[offset, offset + limit)`
    /// (`limit == 0` means everything from `offset` on) under a maximum
    /// page size of `max_per_page`.
    pub fn compute(offset: u64, limit: u64, max_per_page: u64) -> Result<Self> {
        if max_per_page == 0 {
            return Err(Error::planning("max per page must be positive"));
        }

        let page_size = select_page_size(offset, limit, max_per_page);
        let first_page = compute_first_page(offset, page_size);
        let last_page = compute_last_page(limit, page_size, &first_page);

        tracing::trace!(
            offset,
            limit,
            max_per_page,
            page_size,
            first = first_page.page_number,
            "computed page plan"
        );

        Ok(Self {
            offset,
            limit,
            page_size,
            first_page,
            last_page,
        })
    }
}

/// Pick a good page size for the request(s).
///
/// The maximum page size is respected to honor API server load and rate
/// limits; within that bound the selection minimizes the request count,
/// packing the whole window into a single page when it fits.
fn select_page_size(offset: u64, limit: u64, max_per_page: u64) -> u64 {
    let mut page_size = limit;
    if limit > max_per_page || limit == 0 {
        page_size = max_per_page;
    }
    if limit > 1 && offset != limit && offset + limit <= max_per_page {
        page_size = offset + limit;
    }
    page_size
}

/// Locate the page that contains element `offset` and the intra-page
/// position of the window start.
///
/// Page-boundary marks `page_size, 2·page_size, …` are enumerated up to
/// the window start; the last mark not past `offset` gives the skipped
/// element count, and the distance from there to `offset` is the leading
/// slice of the first page. The page number gets a +1 correction when the
/// window starts exactly on a boundary one page later than the naive mark
/// count suggests.
fn compute_first_page(offset: u64, page_size: u64) -> FirstPage {
    let stop = if offset >= page_size {
        offset
    } else {
        offset + page_size
    };

    let marks: Vec<u64> = boundary_marks(page_size, page_size, stop);

    let mut skipped_elements = *marks.last().unwrap_or(&0);
    if offset < page_size {
        skipped_elements = 0;
    }

    let start_offset = skipped_elements.abs_diff(offset);

    let mut page_number = marks.len() as u64;
    if (skipped_elements > 0 && skipped_elements == offset) || skipped_elements == page_size {
        page_number += 1;
    }

    FirstPage {
        page_number,
        skipped_elements,
        start_offset,
    }
}

/// Locate the page that holds the window end.
///
/// Without a limit the last page is unknown, so every field stays open.
/// Otherwise boundary marks are enumerated from the first page's end up
/// to the window end; an extra backlog mark is appended when the window
/// does not end exactly on a mark, and the leading mark is dropped when
/// it coincides with the first page itself.
fn compute_last_page(limit: u64, page_size: u64, first_page: &FirstPage) -> LastPage {
    if limit == 0 {
        return LastPage {
            page_number: None,
            total_elements: None,
            end_offset: None,
        };
    }

    let mut total_elements = first_page.skipped_elements + first_page.start_offset + limit;
    let end_offset = first_page.start_offset + limit - 1;

    let start = first_page.skipped_elements + page_size;
    let stop = first_page.skipped_elements + first_page.start_offset + limit;

    let mut marks = Vec::new();
    if start != stop {
        marks = boundary_marks(start, page_size, stop);

        // When the last page is unaligned, we add a backlog page
        if let Some(&last) = marks.last() {
            if last < total_elements {
                marks.push(last + page_size);
            }
        }

        // The starting mark coincides with the first page when its
        // leading slice fits into the page size
        if first_page.start_offset < page_size && !marks.is_empty() {
            marks.remove(0);
        }

        if let Some(&last) = marks.last() {
            total_elements = last;
        }
    }

    LastPage {
        page_number: Some(marks.len() as u64 + first_page.page_number),
        total_elements: Some(total_elements),
        end_offset: Some(end_offset),
    }
}

/// Enumerate the marks `start, start + step, …` up to and including
/// `stop`.
fn boundary_marks(start: u64, step: u64, stop: u64) -> Vec<u64> {
    let mut marks = Vec::new();
    let mut mark = start;
    while mark <= stop {
        marks.push(mark);
        mark += step;
    }
    marks
}
