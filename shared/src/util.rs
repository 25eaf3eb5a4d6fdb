use chrono::{DateTime, NaiveDate, NaiveTime};

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Parse a `YYYY-MM-DD` date or an RFC 3339 datetime into epoch milliseconds.
///
/// A bare date resolves to the start of that day (UTC), or to its last
/// millisecond when `end_of_day` is set, so inclusive upper bounds cover
/// the whole day.
pub fn parse_date_or_datetime(raw: &str, end_of_day: bool) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let time = if end_of_day {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?
    } else {
        NaiveTime::MIN
    };
    Some(date.and_time(time).and_utc().timestamp_millis())
}
