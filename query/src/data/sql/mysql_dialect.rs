//! MySQL SQL dialect implementation

use super::dialect::{SearchMode, SqlDialect, TimeUnit};
use crate::data::error::QueryError;
use crate::utils::time::utc_offset_string;

/// `date_format` format string for each truncation unit
fn date_format(unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Minute => "%Y-%m-%d %H:%i:00",
        TimeUnit::Hour => "%Y-%m-%d %H:00:00",
        TimeUnit::Day => "%Y-%m-%d",
        TimeUnit::Month => "%Y-%m-01",
        TimeUnit::Year => "%Y-01-01",
    }
}

/// MySQL SQL dialect
pub struct MysqlDialect;

impl SqlDialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn placeholder(&self, _index: usize, _cast: Option<&str>) -> String {
        "?".to_string()
    }

    fn add_interval(&self, field: &str, interval: &str) -> String {
        format!("DATE_ADD({}, interval {})", field, interval)
    }

    fn day_diff(&self, field1: &str, field2: &str) -> String {
        format!("DATEDIFF({}, {})", field1, field2)
    }

    fn cast_column(&self, field: &str, sql_type: &str) -> String {
        format!("CAST({} AS {})", field, sql_type)
    }

    fn truncate_date(
        &self,
        field: &str,
        unit: TimeUnit,
        timezone: Option<&str>,
    ) -> Result<String, QueryError> {
        let format = date_format(unit);
        match timezone {
            Some(tz) => {
                // MySQL ships without timezone tables by default, so convert
                // with an explicit UTC offset instead of the zone name.
                let offset = utc_offset_string(tz)?;
                Ok(format!(
                    "date_format(convert_tz({},'+00:00','{}'), '{}')",
                    field, offset, format
                ))
            }
            None => Ok(format!("date_format({}, '{}')", field, format)),
        }
    }

    fn timestamp_diff(&self, field1: &str, field2: &str) -> String {
        format!("TIMESTAMPDIFF(SECOND, {}, {})", field1, field2)
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
        let dialect = MysqlDialect;
        assert_eq!(dialect.placeholder(1, None), "?");
        assert_eq!(dialect.placeholder(3, Some("::uuid")), "?");
    }

    #[test]
    fn test_add_interval() {
        let dialect = MysqlDialect;
        assert_eq!(
            dialect.add_interval("created_at", "7 day"),
            "DATE_ADD(created_at, interval 7 day)"
        );
    }

    #[test]
    fn test_day_diff() {
        let dialect = MysqlDialect;
        assert_eq!(
            dialect.day_diff("max_time", "min_time"),
            "DATEDIFF(max_time, min_time)"
        );
    }

    #[test]
    fn test_cast_column() {
        let dialect = MysqlDialect;
        assert_eq!(
            dialect.cast_column("event_data", "char"),
            "CAST(event_data AS char)"
        );
    }

    #[test]
    fn test_truncate_date() {
        let dialect = MysqlDialect;
        assert_eq!(
            dialect
                .truncate_date("created_at", TimeUnit::Month, None)
                .unwrap(),
            "date_format(created_at, '%Y-%m-01')"
        );
        assert_eq!(
            dialect
                .truncate_date("created_at", TimeUnit::Minute, None)
                .unwrap(),
            "date_format(created_at, '%Y-%m-%d %H:%i:00')"
        );
    }

    #[test]
    fn test_truncate_date_with_timezone() {
        // Asia/Tokyo has a fixed +09:00 offset, no DST
        let dialect = MysqlDialect;
        assert_eq!(
            dialect
                .truncate_date("created_at", TimeUnit::Day, Some("Asia/Tokyo"))
                .unwrap(),
            "date_format(convert_tz(created_at,'+00:00','+09:00'), '%Y-%m-%d')"
        );
    }

    #[test]
    fn test_truncate_date_unknown_timezone() {
        let dialect = MysqlDialect;
        let err = dialect
            .truncate_date("created_at", TimeUnit::Day, Some("Mars/Olympus_Mons"))
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidTimezone { .. }));
    }

    #[test]
    fn test_timestamp_diff() {
        let dialect = MysqlDialect;
        assert_eq!(
            dialect.timestamp_diff("min_time", "max_time"),
            "TIMESTAMPDIFF(SECOND, min_time, max_time)"
        );
    }

    #[test]
    fn test_search_mode() {
        assert_eq!(MysqlDialect.search_mode(), None);
    }
}
