//! PostgreSQL SQL dialect implementation

use super::dialect::{SearchMode, SqlDialect, TimeUnit};
use crate::data::error::QueryError;

/// `to_char` format string for each truncation unit
fn date_format(unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Minute => "YYYY-MM-DD HH24:MI:00",
        TimeUnit::Hour => "YYYY-MM-DD HH24:00:00",
        TimeUnit::Day => "YYYY-MM-DD",
        TimeUnit::Month => "YYYY-MM-01",
        TimeUnit::Year => "YYYY-01-01",
    }
}

/// PostgreSQL SQL dialect
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize, cast: Option<&str>) -> String {
        format!("${}{}", index, cast.unwrap_or(""))
    }

    fn add_interval(&self, field: &str, interval: &str) -> String {
        format!("{} + interval '{}'", field, interval)
    }

    fn day_diff(&self, field1: &str, field2: &str) -> String {
        format!("{}::date - {}::date", field1, field2)
    }

    fn cast_column(&self, field: &str, sql_type: &str) -> String {
        format!("{}::{}", field, sql_type)
    }

    fn truncate_date(
        &self,
        field: &str,
        unit: TimeUnit,
        timezone: Option<&str>,
    ) -> Result<String, QueryError> {
        let format = date_format(unit);
        Ok(match timezone {
            Some(tz) => format!(
                "to_char(date_trunc('{}', {} at time zone '{}'), '{}')",
                unit, field, tz, format
            ),
            None => format!("to_char(date_trunc('{}', {}), '{}')", unit, field, format),
        })
    }

    fn timestamp_diff(&self, field1: &str, field2: &str) -> String {
        format!("EXTRACT(EPOCH FROM ({} - {}))", field2, field1)
    }

    fn search_mode(&self) -> Option<SearchMode> {
        Some(SearchMode::Insensitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let dialect = PostgresDialect;
        assert_eq!(dialect.placeholder(1, None), "$1");
        assert_eq!(dialect.placeholder(5, None), "$5");
        assert_eq!(dialect.placeholder(2, Some("::uuid")), "$2::uuid");
    }

    #[test]
    fn test_add_interval() {
        let dialect = PostgresDialect;
        assert_eq!(
            dialect.add_interval("created_at", "7 day"),
            "created_at + interval '7 day'"
        );
    }

    #[test]
    fn test_day_diff() {
        let dialect = PostgresDialect;
        assert_eq!(
            dialect.day_diff("max_time", "min_time"),
            "max_time::date - min_time::date"
        );
    }

    #[test]
    fn test_cast_column() {
        let dialect = PostgresDialect;
        assert_eq!(dialect.cast_column("event_data", "text"), "event_data::text");
    }

    #[test]
    fn test_truncate_date() {
        let dialect = PostgresDialect;
        assert_eq!(
            dialect
                .truncate_date("created_at", TimeUnit::Hour, None)
                .unwrap(),
            "to_char(date_trunc('hour', created_at), 'YYYY-MM-DD HH24:00:00')"
        );
        assert_eq!(
            dialect
                .truncate_date("created_at", TimeUnit::Minute, None)
                .unwrap(),
            "to_char(date_trunc('minute', created_at), 'YYYY-MM-DD HH24:MI:00')"
        );
    }

    #[test]
    fn test_truncate_date_with_timezone() {
        let dialect = PostgresDialect;
        assert_eq!(
            dialect
                .truncate_date("created_at", TimeUnit::Day, Some("America/New_York"))
                .unwrap(),
            "to_char(date_trunc('day', created_at at time zone 'America/New_York'), 'YYYY-MM-DD')"
        );
    }

    #[test]
    fn test_timestamp_diff() {
        let dialect = PostgresDialect;
        assert_eq!(
            dialect.timestamp_diff("min_time", "max_time"),
            "EXTRACT(EPOCH FROM (max_time - min_time))"
        );
    }

    #[test]
    fn test_search_mode() {
        assert_eq!(PostgresDialect.search_mode(), Some(SearchMode::Insensitive));
    }
}
