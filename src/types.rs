//! Common types used throughout pagewise
//!
//! Shared type aliases and crate-wide defaults.

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type, used for opaque filter conjunctions
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Default upper bound for the page size of a single request.
///
/// Remote APIs commonly cap the per-page parameter to protect themselves
/// from oversized responses; 250 is the conventional ceiling the planner
/// respects unless the criteria overrides it.
pub const DEFAULT_MAX_PER_PAGE: u64 = 250;
