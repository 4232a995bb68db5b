//! SQL dialect trait for multi-database support
//!
//! This trait defines the interface for generating database-specific SQL
//! syntax. Every supported engine implements it, so an unhandled dialect is
//! unrepresentable rather than a silent fallthrough.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::error::QueryError;

/// Granularity for date truncation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minute" => Ok(TimeUnit::Minute),
            "hour" => Ok(TimeUnit::Hour),
            "day" => Ok(TimeUnit::Day),
            "month" => Ok(TimeUnit::Month),
            "year" => Ok(TimeUnit::Year),
            other => Err(QueryError::InvalidTimeUnit {
                unit: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Text match mode for search queries
///
/// Only PostgreSQL needs an explicit mode: its match engine is case-sensitive
/// by default, while the other engines already compare text
/// case-insensitively in this system's usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Insensitive,
}

/// SQL dialect trait for generating database-specific SQL
///
/// Different databases have different syntax for:
/// - Parameter placeholders (? vs $1)
/// - Interval arithmetic
/// - Date truncation and formatting
/// - Type casting
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - MySQL/SQLite: always returns "?"
    /// - PostgreSQL: returns "$1", "$2", etc., with `cast` (the raw `::type`
    ///   suffix captured from a template) appended when present
    fn placeholder(&self, index: usize, cast: Option<&str>) -> String;

    /// Add an interval to a timestamp field; `interval` is "<amount> <unit>"
    ///
    /// - MySQL: `DATE_ADD(field, interval 7 day)`
    /// - PostgreSQL: `field + interval '7 day'`
    /// - SQLite: `datetime(field, '+7 day')`
    fn add_interval(&self, field: &str, interval: &str) -> String;

    /// Difference between two dates in whole days
    ///
    /// - MySQL: `DATEDIFF(a, b)`
    /// - PostgreSQL: `a::date - b::date`
    /// - SQLite: `julianday(a) - julianday(b)`
    fn day_diff(&self, field1: &str, field2: &str) -> String;

    /// Cast a column to the given SQL type
    ///
    /// - MySQL/SQLite: `CAST(field AS type)`
    /// - PostgreSQL: `field::type`
    fn cast_column(&self, field: &str, sql_type: &str) -> String;

    /// Truncate a timestamp to the given granularity, formatted as text
    ///
    /// With a timezone, the value is converted from UTC before formatting
    /// (PostgreSQL `at time zone`, MySQL `convert_tz`; SQLite stores UTC and
    /// performs no conversion). Units an engine cannot express are an error,
    /// never a silent default.
    fn truncate_date(
        &self,
        field: &str,
        unit: TimeUnit,
        timezone: Option<&str>,
    ) -> Result<String, QueryError>;

    /// Difference between two timestamps in seconds
    ///
    /// - MySQL: `TIMESTAMPDIFF(SECOND, a, b)`
    /// - PostgreSQL: `EXTRACT(EPOCH FROM (b - a))`
    /// - SQLite: `strftime('%s', b) - strftime('%s', a)`
    fn timestamp_diff(&self, field1: &str, field2: &str) -> String;

    /// Text match mode the engine needs for case-insensitive search
    fn search_mode(&self) -> Option<SearchMode>;
}
