//! Structured filter compilation
//!
//! Translates a filter map into WHERE-clause fragments, the session join
//! decision, and a normalized parameter map ready for template binding.

mod builder;
mod types;

pub use builder::{
    REFERRER_EXCLUSION, SESSION_JOIN, build_filter_clauses, columns, needs_session_join,
    normalize_filters,
};
pub use types::{FilterOperator, FilterValue, ParsedFilters, QueryFilters, QueryOptions};
