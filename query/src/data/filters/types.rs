//! Filter type definitions
//!
//! The structured filter payload callers hand to the compiler: a map of
//! filter names to values, optional date bounds, and per-query options.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::types::ParamMap;

/// Comparison operator attached to a filter value
///
/// Only `Eq` and `Ne` have a raw-SQL mapping in this layer; the substring
/// operators exist in the filter vocabulary but compile to an
/// [`UnresolvedFilter`](crate::QueryError::UnresolvedFilter) error here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum FilterOperator {
    #[default]
    #[serde(rename = "eq")]
    Eq,
    #[serde(rename = "neq")]
    Ne,
    #[serde(rename = "c")]
    Contains,
    #[serde(rename = "dnc")]
    DoesNotContain,
}

impl FilterOperator {
    /// SQL comparison token, if this operator has one
    pub fn as_sql(&self) -> Option<&'static str> {
        match self {
            FilterOperator::Eq => Some("="),
            FilterOperator::Ne => Some("!="),
            FilterOperator::Contains | FilterOperator::DoesNotContain => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Ne => "neq",
            FilterOperator::Contains => "contains",
            FilterOperator::DoesNotContain => "does-not-contain",
        }
    }
}

/// A filter entry: either a bare value or a value qualified with an operator
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Qualified {
        value: Value,
        #[serde(default)]
        operator: FilterOperator,
    },
    Plain(Value),
}

impl FilterValue {
    /// The bare value, unwrapping the qualified shape
    pub fn value(&self) -> &Value {
        match self {
            FilterValue::Qualified { value, .. } => value,
            FilterValue::Plain(value) => value,
        }
    }

    /// The operator, defaulting to equality for bare values
    pub fn operator(&self) -> FilterOperator {
        match self {
            FilterValue::Qualified { operator, .. } => *operator,
            FilterValue::Plain(_) => FilterOperator::Eq,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Plain(Value::String(value.to_string()))
    }
}

/// Structured filters a query is scoped by
///
/// `fields` maps filter names (the fixed vocabulary in
/// [`columns`](crate::data::filters::columns), plus any caller-supplied
/// mappings) to values. The map is ordered by key, so compiled clause order
/// is deterministic.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueryFilters {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FilterValue>,
}

impl QueryFilters {
    /// Insert a field filter, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

/// Per-query compiler options; never mutates the filters themselves
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Extra filter-name → column mappings consulted after the built-in
    /// vocabulary
    pub columns: HashMap<String, String>,
    /// Force the session join even when no session-scoped filter is present
    pub join_session: bool,
}

/// Output of filter compilation
#[derive(Debug, Clone)]
pub struct ParsedFilters {
    /// Session join clause, or empty when no join is needed
    pub join_session: String,
    /// `and`-prefixed WHERE-clause fragments, one per line
    pub filter_query: String,
    /// Normalized values plus the derived scope parameters
    pub params: ParamMap,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_value_defaults_to_equality() {
        let filter = FilterValue::from("example.com");
        assert_eq!(filter.value(), &json!("example.com"));
        assert_eq!(filter.operator(), FilterOperator::Eq);
    }

    #[test]
    fn qualified_value_carries_operator() {
        let filter = FilterValue::Qualified {
            value: json!("example.com"),
            operator: FilterOperator::Ne,
        };
        assert_eq!(filter.value(), &json!("example.com"));
        assert_eq!(filter.operator(), FilterOperator::Ne);
    }

    #[test]
    fn deserializes_both_shapes() {
        let plain: FilterValue = serde_json::from_value(json!("Chrome")).unwrap();
        assert_eq!(plain.operator(), FilterOperator::Eq);

        let qualified: FilterValue =
            serde_json::from_value(json!({"value": "Chrome", "operator": "neq"})).unwrap();
        assert_eq!(qualified.operator(), FilterOperator::Ne);
        assert_eq!(qualified.value(), &json!("Chrome"));

        let bare_object: FilterValue =
            serde_json::from_value(json!({"value": "Chrome"})).unwrap();
        assert_eq!(bare_object.operator(), FilterOperator::Eq);
        assert_eq!(bare_object.value(), &json!("Chrome"));
    }

    #[test]
    fn operator_sql_mapping() {
        assert_eq!(FilterOperator::Eq.as_sql(), Some("="));
        assert_eq!(FilterOperator::Ne.as_sql(), Some("!="));
        assert_eq!(FilterOperator::Contains.as_sql(), None);
        assert_eq!(FilterOperator::DoesNotContain.as_sql(), None);
    }

    #[test]
    fn filters_are_ordered_by_key() {
        let filters = QueryFilters::default()
            .with("url", "/pricing")
            .with("browser", "firefox");
        let keys: Vec<&str> = filters.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["browser", "url"]);
    }
}
