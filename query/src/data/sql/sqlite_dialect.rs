//! SQLite SQL dialect implementation

use super::dialect::{SearchMode, SqlDialect, TimeUnit};
use crate::data::error::QueryError;

/// `strftime` format string for each truncation unit
///
/// SQLite's supported set stops at hour granularity; minute truncation has no
/// format here and is rejected by `truncate_date`.
fn date_format(unit: TimeUnit) -> Option<&'static str> {
    match unit {
        TimeUnit::Minute => None,
        TimeUnit::Hour => Some("%Y-%m-%d %H"),
        TimeUnit::Day => Some("%Y-%m-%d"),
        TimeUnit::Month => Some("%Y-%m"),
        TimeUnit::Year => Some("%Y"),
    }
}

/// SQLite SQL dialect
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn placeholder(&self, _index: usize, _cast: Option<&str>) -> String {
        "?".to_string()
    }

    fn add_interval(&self, field: &str, interval: &str) -> String {
        format!("datetime({}, '+{}')", field, interval)
    }

    fn day_diff(&self, field1: &str, field2: &str) -> String {
        format!("julianday({}) - julianday({})", field1, field2)
    }

    fn cast_column(&self, field: &str, sql_type: &str) -> String {
        format!("CAST({} AS {})", field, sql_type)
    }

    fn truncate_date(
        &self,
        field: &str,
        unit: TimeUnit,
        _timezone: Option<&str>,
    ) -> Result<String, QueryError> {
        // Timestamps are stored in UTC; SQLite has no zone conversion here.
        let format = date_format(unit)
            .ok_or_else(|| QueryError::unsupported_time_unit(self.name(), unit.as_str()))?;
        Ok(format!("strftime('{}', {})", format, field))
    }

    fn timestamp_diff(&self, field1: &str, field2: &str) -> String {
        format!("strftime('%s', {}) - strftime('%s', {})", field2, field1)
    }

    fn search_mode(&self) -> Option<SearchMode> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let dialect = SqliteDialect;
        assert_eq!(dialect.placeholder(1, None), "?");
        assert_eq!(dialect.placeholder(5, Some("::uuid")), "?");
    }

    #[test]
    fn test_add_interval() {
        let dialect = SqliteDialect;
        assert_eq!(
            dialect.add_interval("created_at", "7 day"),
            "datetime(created_at, '+7 day')"
        );
    }

    #[test]
    fn test_day_diff() {
        let dialect = SqliteDialect;
        assert_eq!(
            dialect.day_diff("max_time", "min_time"),
            "julianday(max_time) - julianday(min_time)"
        );
    }

    #[test]
    fn test_cast_column() {
        let dialect = SqliteDialect;
        assert_eq!(
            dialect.cast_column("event_data", "text"),
            "CAST(event_data AS text)"
        );
    }

    #[test]
    fn test_truncate_date() {
        let dialect = SqliteDialect;
        assert_eq!(
            dialect
                .truncate_date("created_at", TimeUnit::Day, None)
                .unwrap(),
            "strftime('%Y-%m-%d', created_at)"
        );
        assert_eq!(
            dialect
                .truncate_date("created_at", TimeUnit::Year, None)
                .unwrap(),
            "strftime('%Y', created_at)"
        );
    }

    #[test]
    fn test_truncate_date_minute_unsupported() {
        let dialect = SqliteDialect;
        let err = dialect
            .truncate_date("created_at", TimeUnit::Minute, None)
            .unwrap_err();
        assert!(matches!(
            err,
            QueryError::UnsupportedTimeUnit {
                dialect: "sqlite",
                unit: "minute"
            }
        ));
    }

    #[test]
    fn test_timestamp_diff() {
        let dialect = SqliteDialect;
        assert_eq!(
            dialect.timestamp_diff("min_time", "max_time"),
            "strftime('%s', max_time) - strftime('%s', min_time)"
        );
    }

    #[test]
    fn test_search_mode() {
        assert_eq!(SqliteDialect.search_mode(), None);
    }
}
