//! WHERE-clause compiler
//!
//! Builds `and`-chained clause fragments from structured filters, using the
//! fixed filter vocabulary plus any caller-supplied column mappings. Every
//! emitted clause references a `{{name::type}}` placeholder; values travel in
//! the parameter map, never in the SQL text.

use super::types::{FilterOperator, QueryFilters, QueryOptions};
use crate::data::error::QueryError;
use crate::data::types::ParamMap;

/// Session join clause emitted when a filter needs session-table columns
pub const SESSION_JOIN: &str =
    "inner join session on website_event.session_id = session.session_id";

/// NULL-safe clause excluding same-domain referrers, appended alongside any
/// referrer filter
pub const REFERRER_EXCLUSION: &str =
    "and (website_event.referrer_domain != {{website_domain}} or website_event.referrer_domain is null)";

/// Filter vocabulary for website event queries
pub mod columns {
    /// Maps filter names to event/session table columns
    pub const FILTER_COLUMNS: &[(&str, &str)] = &[
        ("browser", "browser"),
        ("city", "city"),
        ("country", "country"),
        ("device", "device"),
        ("event", "event_name"),
        ("language", "language"),
        ("os", "os"),
        ("query", "url_query"),
        ("referrer", "referrer_domain"),
        ("region", "subdivision1"),
        ("title", "page_title"),
        ("url", "url_path"),
    ];

    /// Filter names whose columns live on the session table
    pub const SESSION_COLUMNS: &[&str] = &[
        "browser",
        "os",
        "device",
        "screen",
        "language",
        "country",
        "region",
        "city",
    ];

    /// Resolve a filter name against the built-in vocabulary
    pub fn map_filter_column(name: &str) -> Option<&'static str> {
        FILTER_COLUMNS
            .iter()
            .find(|(filter, _)| *filter == name)
            .map(|(_, column)| *column)
    }

    /// Whether a filter name is session-scoped
    pub fn is_session_column(name: &str) -> bool {
        SESSION_COLUMNS.contains(&name)
    }
}

fn map_filter(column: &str, operator: FilterOperator, name: &str) -> Result<String, QueryError> {
    let op = operator
        .as_sql()
        .ok_or_else(|| QueryError::unresolved_filter(name, operator.as_str()))?;
    Ok(format!("{} {} {{{{{}::varchar}}}}", column, op, name))
}

/// Compile filters into `and`-prefixed WHERE-clause fragments
///
/// Filter names resolve against the built-in vocabulary first, then the
/// caller's `options.columns` mapping. A name neither resolves is skipped —
/// an intentional pass-through: its value still lands in the parameter map,
/// it just contributes no clause. An operator without a SQL mapping is an
/// error; it would otherwise change query semantics silently.
pub fn build_filter_clauses(
    filters: &QueryFilters,
    options: &QueryOptions,
) -> Result<String, QueryError> {
    let mut clauses = Vec::new();

    for (name, filter) in &filters.fields {
        let column = columns::map_filter_column(name)
            .or_else(|| options.columns.get(name).map(String::as_str));

        let Some(column) = column else {
            tracing::debug!(filter = %name, "no column mapping, skipping filter clause");
            continue;
        };

        clauses.push(format!("and {}", map_filter(column, filter.operator(), name)?));

        if name == "referrer" {
            clauses.push(REFERRER_EXCLUSION.to_string());
        }
    }

    Ok(clauses.join("\n"))
}

/// Whether the compiled query must join the session table
pub fn needs_session_join(filters: &QueryFilters, options: &QueryOptions) -> bool {
    options.join_session
        || filters
            .fields
            .keys()
            .any(|name| columns::is_session_column(name))
}

/// Unwrap every filter entry to its bare value, keyed for template binding
pub fn normalize_filters(filters: &QueryFilters) -> ParamMap {
    let mut params = ParamMap::new();
    for (name, filter) in &filters.fields {
        params.insert(name.clone(), filter.value().clone());
    }
    params
}
