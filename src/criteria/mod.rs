//! Query intent store
//!
//! # Overview
//!
//! [`Criteria`] holds the mutable query intent: a conjunctive filter map,
//! the offset/limit window, an opaque sort spec and the error-strictness
//! flag. It is pure data with fluent mutators; planning and execution
//! hang off it (`plan()`, `results()`, `find_first()`), with the computed
//! [`PagePlan`] cached until a mutator touches the window and the
//! [`PageCursor`] memoized for the lifetime of the instance.

use crate::error::{Error, Result};
use crate::executor::{PageCursor, Results};
use crate::fetch::{PageFetcher, PageRequest};
use crate::plan::PagePlan;
use crate::types::{JsonObject, JsonValue, DEFAULT_MAX_PER_PAGE};

/// The query intent for one paged search.
#[derive(Debug, Clone)]
pub struct Criteria {
    filters: JsonObject,
    limit: u64,
    offset: u64,
    sort: Option<JsonValue>,
    strict: bool,
    max_per_page: u64,
    plan: Option<PagePlan>,
    cursor: Option<PageCursor>,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            filters: JsonObject::new(),
            limit: 0,
            offset: 0,
            sort: None,
            strict: false,
            max_per_page: DEFAULT_MAX_PER_PAGE,
            plan: None,
            cursor: None,
        }
    }
}

impl Criteria {
    /// Create criteria with default settings: no filters, unbounded
    /// window, lenient error handling.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Fluent mutators
    // ========================================================================

    /// Merge a single filter condition into the conjunction set.
    /// An existing condition with the same key is overwritten.
    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Merge the given filters into the conjunction set.
    #[must_use]
    pub fn with_filters(mut self, filters: JsonObject) -> Self {
        for (key, value) in filters {
            self.filters.insert(key, value);
        }
        self
    }

    /// Set the maximum number of elements to fetch. `0` means unbounded.
    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self.invalidate();
        self
    }

    /// Set the number of leading elements to skip.
    #[must_use]
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self.invalidate();
        self
    }

    /// Set the opaque sort spec, passed through to the page fetcher
    /// unchanged.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<JsonValue>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Set the upper bound for the planned page size.
    #[must_use]
    pub fn with_max_per_page(mut self, max_per_page: u64) -> Self {
        self.max_per_page = max_per_page;
        self.invalidate();
        self
    }

    /// Make page fetch failures propagate instead of being treated as
    /// empty pages.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Clear all settings back to their defaults, keeping only the
    /// configured page size bound.
    #[must_use]
    pub fn reset(self) -> Self {
        Self {
            max_per_page: self.max_per_page,
            ..Self::default()
        }
    }

    fn invalidate(&mut self) {
        self.plan = None;
        self.cursor = None;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The current filter conjunction set.
    pub fn filters(&self) -> &JsonObject {
        &self.filters
    }

    /// The current limit (`0` = unbounded).
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// The current offset.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The current sort spec, if any.
    pub fn sort(&self) -> Option<&JsonValue> {
        self.sort.as_ref()
    }

    /// Whether page fetch failures propagate.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// The configured page size bound.
    pub fn max_per_page(&self) -> u64 {
        self.max_per_page
    }

    // ========================================================================
    // Planning and cursor state
    // ========================================================================

    /// The paging layout for the current window, computed once and cached
    /// until `limit`, `offset` or `max_per_page` change.
    pub fn plan(&mut self) -> Result<PagePlan> {
        if let Some(plan) = self.plan {
            return Ok(plan);
        }
        let plan = PagePlan::compute(self.offset, self.limit, self.max_per_page)?;
        self.plan = Some(plan);
        Ok(plan)
    }

    /// The memoized page cursor, created at the start of the planned
    /// range on first use.
    pub(crate) fn cursor_mut(&mut self) -> Result<&mut PageCursor> {
        let range = self.plan()?.page_range();
        Ok(self.cursor.get_or_insert_with(|| PageCursor::new(range)))
    }

    /// The page number the paging execution currently points at, without
    /// advancing. `None` once a bounded range is exhausted.
    pub fn current_page(&mut self) -> Result<Option<u64>> {
        Ok(self.cursor_mut()?.peek())
    }

    /// Whether the paging execution is on the first page of the planned
    /// range.
    pub fn is_first_page(&mut self) -> Result<bool> {
        let range = self.plan()?.page_range();
        Ok(self.current_page()? == Some(range.start))
    }

    /// Whether the paging execution is on the last page of the planned
    /// range. Always `false` for an open-ended range.
    pub fn is_last_page(&mut self) -> Result<bool> {
        let range = self.plan()?.page_range();
        match range.end {
            Some(end) => Ok(self.current_page()? == Some(end)),
            None => Ok(false),
        }
    }

    /// Build the criteria snapshot for one outbound page request.
    pub(crate) fn page_request(&self, page: u64, per_page: u64) -> PageRequest {
        PageRequest {
            filters: self.filters.clone(),
            sort: self.sort.clone(),
            page,
            per_page,
        }
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Plan and execute the search, yielding every found row lazily.
    ///
    /// Each returned iterator pulls from the memoized page cursor, so
    /// chained calls on the same criteria continue where the previous
    /// consumption stopped; a fresh window needs a fresh criteria.
    pub fn results<T, F>(&mut self, fetcher: F) -> Results<'_, T, F>
    where
        F: PageFetcher<T>,
    {
        Results::new(self, fetcher)
    }

    /// Find a single row by the given additional filters.
    ///
    /// Forces the window to `limit = 1, offset = 0` and merges the
    /// filters conjunctively on top of the existing set. In lenient mode
    /// absence (including suppressed fetch failures) is `Ok(None)`; in
    /// strict mode absence is an [`Error::NotFound`] and fetch failures
    /// propagate.
    pub fn find_first<T, F>(&mut self, filters: JsonObject, fetcher: F) -> Result<Option<T>>
    where
        F: PageFetcher<T>,
    {
        let mut scoped = std::mem::take(self)
            .with_limit(1)
            .with_offset(0)
            .with_filters(filters);

        let first = scoped.results(fetcher).next().transpose();
        let strict = scoped.is_strict();
        let query = format!("filters {}", JsonValue::Object(scoped.filters().clone()));
        *self = scoped;

        match first? {
            Some(row) => Ok(Some(row)),
            None if strict => Err(Error::not_found(query)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests;
