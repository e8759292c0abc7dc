//! The page cursor
//!
//! Tracks the paging execution across a planned page range. The cursor
//! only ever moves forward, one page per consumed page, and is memoized
//! on its criteria so chained iteration calls observe the accumulated
//! position.

use crate::plan::PageRange;

/// A resumable position inside a planned page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    position: u64,
    range: PageRange,
}

impl PageCursor {
    /// Create a cursor at the start of the given range.
    pub(crate) fn new(range: PageRange) -> Self {
        Self {
            position: range.start,
            range,
        }
    }

    /// The page number the cursor currently points at, without advancing.
    ///
    /// `None` once the cursor has moved past a bounded range.
    pub fn peek(&self) -> Option<u64> {
        self.range.contains(self.position).then_some(self.position)
    }

    /// Move to the next page number, returning the page that was left.
    pub fn advance(&mut self) -> Option<u64> {
        let current = self.peek()?;
        self.position = current + 1;
        Some(current)
    }

    /// The planned range this cursor walks.
    pub fn range(&self) -> PageRange {
        self.range
    }
}
