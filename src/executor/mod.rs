//! Lazy page-by-page execution
//!
//! # Overview
//!
//! The executor consumes a [`crate::plan::PagePlan`] and an injected
//! [`PageFetcher`] to produce a pull-based sequence of rows. Pages are
//! fetched one at a time, boundary pages are sliced to the planned
//! window, and iteration stops early when the remote data set ends before
//! the planned last page (a short page). Nothing is fetched until the
//! consumer pulls.

mod cursor;

pub use cursor::PageCursor;

use crate::criteria::Criteria;
use crate::error::{Error, Result};
use crate::fetch::{FetchedPage, PageFetcher};
use std::collections::VecDeque;

/// The lazy result sequence of one iteration call.
///
/// Created by [`Criteria::results`]. Yields `Result<T>`: in strict mode a
/// failed page fetch surfaces as an `Err` item and ends the sequence, in
/// lenient mode it is treated as an empty page (which in turn triggers
/// the short-page stop rule).
pub struct Results<'a, T, F> {
    criteria: &'a mut Criteria,
    fetcher: F,
    buffer: VecDeque<T>,
    window: u64,
    yielded: u64,
    advance_pending: bool,
    done: bool,
}

impl<'a, T, F> Results<'a, T, F>
where
    F: PageFetcher<T>,
{
    pub(crate) fn new(criteria: &'a mut Criteria, fetcher: F) -> Self {
        let window = criteria.limit();
        Self {
            criteria,
            fetcher,
            buffer: VecDeque::new(),
            window,
            yielded: 0,
            advance_pending: false,
            done: false,
        }
    }

    /// Fetch the page the cursor points at and buffer its sliced rows.
    ///
    /// The cursor stays on a page until its rows are fully consumed and
    /// the next page is actually needed, so `current_page` diagnostics
    /// reflect the page being served.
    fn pull_page(&mut self) -> Result<()> {
        let plan = self.criteria.plan()?;

        if self.advance_pending {
            self.advance_pending = false;
            self.criteria.cursor_mut()?.advance();
        }

        let Some(page) = self.criteria.cursor_mut()?.peek() else {
            self.done = true;
            return Ok(());
        };

        let request = self.criteria.page_request(page, plan.page_size);
        let fetched = match self.fetcher.fetch_page(&request) {
            Ok(fetched) => fetched,
            Err(error @ Error::Fetch(_)) if !self.criteria.is_strict() => {
                // Lenient mode casts driver failures to empty pages; the
                // short-page stop rule then ends the iteration.
                tracing::debug!(page, %error, "suppressed page fetch error");
                FetchedPage::empty()
            }
            Err(error) => {
                self.done = true;
                return Err(error);
            }
        };

        let raw_count = fetched.raw_count;
        let mut rows = fetched.rows;
        let range = plan.page_range();

        if page == range.start && !plan.first_page_aligned() {
            rows = plan.relative_first_page_slice().apply(rows);
        }
        if range.end == Some(page) && !plan.last_page_aligned() {
            rows = plan.relative_last_page_slice().apply(rows);
        }

        tracing::debug!(page, raw_count, kept = rows.len(), "fetched page");
        self.buffer.extend(rows);

        if raw_count < plan.page_size as usize {
            // The page does not fill its boundaries, so the remote data
            // set ended before the planned last page. This also covers
            // completely empty pages.
            tracing::debug!(page, raw_count, "short page, stopping iteration");
            self.done = true;
        } else {
            self.advance_pending = true;
        }

        Ok(())
    }
}

impl<T, F> Iterator for Results<'_, T, F>
where
    F: PageFetcher<T>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.buffer.pop_front() {
                self.yielded += 1;
                if self.window > 0 && self.yielded >= self.window {
                    // The window is served in full; planned trailing
                    // pages are never requested and the cursor leaves
                    // the page it just finished.
                    self.done = true;
                    self.buffer.clear();
                    if self.advance_pending {
                        self.advance_pending = false;
                        if let Ok(cursor) = self.criteria.cursor_mut() {
                            cursor.advance();
                        }
                    }
                }
                return Some(Ok(row));
            }

            if self.done {
                return None;
            }

            if let Err(error) = self.pull_page() {
                return Some(Err(error));
            }
        }
    }
}
