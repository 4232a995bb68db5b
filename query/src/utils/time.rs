//! Time utility functions

use chrono::{DateTime, Offset, Utc};
use chrono_tz::Tz;

use crate::data::error::QueryError;

/// Later of two optional datetimes
///
/// Used to clamp a requested start date to a website's reset timestamp.
pub fn max_date(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

/// Current UTC offset of an IANA timezone, formatted as `+HH:MM` / `-HH:MM`
///
/// MySQL's `convert_tz` needs a literal offset because servers often ship
/// without timezone tables loaded. For zones with DST the offset follows the
/// wall clock at call time.
pub fn utc_offset_string(timezone: &str) -> Result<String, QueryError> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| QueryError::invalid_timezone(timezone))?;
    let seconds = Utc::now().with_timezone(&tz).offset().fix().local_minus_utc();

    let sign = if seconds < 0 { '-' } else { '+' };
    let seconds = seconds.abs();
    Ok(format!(
        "{}{:02}:{:02}",
        sign,
        seconds / 3600,
        (seconds % 3600) / 60
    ))
}
