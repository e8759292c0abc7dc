//! Tests for the query intent store

use super::*;
use crate::fetch::FetchedPage;
use pretty_assertions::assert_eq;
use serde_json::json;

fn object(pairs: &[(&str, JsonValue)]) -> JsonObject {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), value.clone()))
        .collect()
}

fn canned_fetcher(rows: Vec<u64>) -> impl FnMut(&PageRequest) -> Result<FetchedPage<u64>> {
    let mut rows = Some(rows);
    move |_| Ok(rows.take().map_or_else(FetchedPage::empty, FetchedPage::new))
}

// ============================================================================
// Fluent construction
// ============================================================================

#[test]
fn test_defaults() {
    let criteria = Criteria::new();

    assert!(criteria.filters().is_empty());
    assert_eq!(criteria.limit(), 0);
    assert_eq!(criteria.offset(), 0);
    assert_eq!(criteria.sort(), None);
    assert!(!criteria.is_strict());
    assert_eq!(criteria.max_per_page(), crate::types::DEFAULT_MAX_PER_PAGE);
}

#[test]
fn test_fluent_chaining() {
    let criteria = Criteria::new()
        .with_filter("status", "open")
        .with_limit(50)
        .with_offset(10)
        .with_sort(json!({"created_at": "desc"}))
        .with_max_per_page(100)
        .strict();

    assert_eq!(criteria.filters(), &object(&[("status", json!("open"))]));
    assert_eq!(criteria.limit(), 50);
    assert_eq!(criteria.offset(), 10);
    assert_eq!(criteria.sort(), Some(&json!({"created_at": "desc"})));
    assert!(criteria.is_strict());
    assert_eq!(criteria.max_per_page(), 100);
}

#[test]
fn test_filters_merge_conjunctively() {
    let criteria = Criteria::new()
        .with_filter("status", "open")
        .with_filter("city", "Hamburg")
        .with_filters(object(&[
            ("status", json!("closed")),
            ("zipcode", json!("22085")),
        ]));

    assert_eq!(
        criteria.filters(),
        &object(&[
            ("status", json!("closed")),
            ("city", json!("Hamburg")),
            ("zipcode", json!("22085")),
        ])
    );
}

#[test]
fn test_reset_keeps_only_the_page_size_bound() {
    let criteria = Criteria::new()
        .with_filter("status", "open")
        .with_limit(50)
        .with_offset(10)
        .with_max_per_page(100)
        .strict()
        .reset();

    assert!(criteria.filters().is_empty());
    assert_eq!(criteria.limit(), 0);
    assert_eq!(criteria.offset(), 0);
    assert!(!criteria.is_strict());
    assert_eq!(criteria.max_per_page(), 100);
}

// ============================================================================
// Plan caching
// ============================================================================

#[test]
fn test_plan_is_cached() {
    let mut criteria = Criteria::new().with_offset(5).with_limit(5);

    let first = criteria.plan().unwrap();
    let second = criteria.plan().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_window_mutators_invalidate_the_plan() {
    let mut criteria = Criteria::new().with_limit(5);
    assert_eq!(criteria.plan().unwrap().page_size, 5);

    criteria = criteria.with_limit(7);
    assert_eq!(criteria.plan().unwrap().page_size, 7);

    criteria = criteria.with_max_per_page(3);
    assert_eq!(criteria.plan().unwrap().page_size, 3);
}

#[test]
fn test_plan_surfaces_planning_errors() {
    let mut criteria = Criteria::new().with_max_per_page(0);
    assert!(matches!(
        criteria.plan().unwrap_err(),
        Error::Planning { .. }
    ));
}

// ============================================================================
// Paging diagnostics
// ============================================================================

#[test]
fn test_fresh_criteria_points_at_the_first_page() {
    let mut criteria = Criteria::new().with_max_per_page(2).with_limit(3);

    assert_eq!(criteria.current_page().unwrap(), Some(1));
    assert!(criteria.is_first_page().unwrap());
    assert!(!criteria.is_last_page().unwrap());
}

#[test]
fn test_cursor_moves_past_a_fully_served_window() {
    let mut criteria = Criteria::new().with_max_per_page(2).with_limit(3);
    let data: Vec<u64> = (0..10).collect();
    let fetcher = |request: &PageRequest| -> Result<FetchedPage<u64>> {
        let start = ((request.page - 1) * request.per_page) as usize;
        Ok(FetchedPage::new(data[start..start + 2].to_vec()))
    };

    let rows: Vec<u64> = criteria.results(fetcher).collect::<Result<_>>().unwrap();
    assert_eq!(rows, vec![0, 1, 2]);

    assert_eq!(criteria.current_page().unwrap(), None);
    assert!(!criteria.is_first_page().unwrap());
    assert!(!criteria.is_last_page().unwrap());
}

#[test]
fn test_open_range_is_never_on_the_last_page() {
    let mut criteria = Criteria::new();
    assert!(!criteria.is_last_page().unwrap());
}

#[test]
fn test_page_request_snapshot() {
    let criteria = Criteria::new()
        .with_filter("status", "open")
        .with_sort(json!("-created_at"));

    let request = criteria.page_request(3, 250);
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "filters": {"status": "open"},
            "sort": "-created_at",
            "page": 3,
            "per_page": 250,
        })
    );
}

#[test]
fn test_page_request_omits_absent_sort() {
    let request = Criteria::new().page_request(1, 10);
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({"filters": {}, "page": 1, "per_page": 10})
    );
}

// ============================================================================
// find_first
// ============================================================================

#[test]
fn test_find_first_returns_the_first_match() {
    let mut criteria = Criteria::new().with_filter("status", "open");

    let found = criteria
        .find_first(object(&[("city", json!("Hamburg"))]), canned_fetcher(vec![42, 43]))
        .unwrap();
    assert_eq!(found, Some(42));
}

#[test]
fn test_find_first_merges_filters_into_the_request() {
    let mut criteria = Criteria::new().with_filter("status", "open");
    let mut seen = Vec::new();

    let fetcher = |request: &PageRequest| -> Result<FetchedPage<u64>> {
        seen.push(serde_json::to_value(request).unwrap());
        Ok(FetchedPage::new(vec![7]))
    };
    let found = criteria
        .find_first(object(&[("city", json!("Hamburg"))]), fetcher)
        .unwrap();

    assert_eq!(found, Some(7));
    assert_eq!(
        seen,
        vec![json!({
            "filters": {"status": "open", "city": "Hamburg"},
            "page": 1,
            "per_page": 1,
        })]
    );
}

#[test]
fn test_find_first_absence_is_none_in_lenient_mode() {
    let mut criteria = Criteria::new();

    let found: Option<u64> = criteria
        .find_first(JsonObject::new(), canned_fetcher(Vec::new()))
        .unwrap();
    assert_eq!(found, None);
}

#[test]
fn test_find_first_absence_fails_in_strict_mode() {
    let mut criteria = Criteria::new().with_filter("status", "open").strict();

    let error = criteria
        .find_first::<u64, _>(JsonObject::new(), canned_fetcher(Vec::new()))
        .unwrap_err();
    assert!(error.is_not_found());
    assert!(error.to_string().contains("status"));
}

#[test]
fn test_find_first_swallows_fetch_errors_in_lenient_mode() {
    let mut criteria = Criteria::new();
    let fetcher =
        |_: &PageRequest| -> Result<FetchedPage<u64>> { Err(Error::fetch(anyhow::anyhow!("down"))) };

    let found = criteria.find_first(JsonObject::new(), fetcher).unwrap();
    assert_eq!(found, None::<u64>);
}

#[test]
fn test_find_first_propagates_fetch_errors_in_strict_mode() {
    let mut criteria = Criteria::new().strict();
    let fetcher =
        |_: &PageRequest| -> Result<FetchedPage<u64>> { Err(Error::fetch(anyhow::anyhow!("down"))) };

    let error = criteria
        .find_first::<u64, _>(JsonObject::new(), fetcher)
        .unwrap_err();
    assert!(error.is_fetch());
}
