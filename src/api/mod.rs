use chrono::{NaiveDate, NaiveTime};

use crate::error::ApiError;

pub mod attendance;
pub mod reports;

/// Strict `YYYY-MM-DD`. The length check rejects chrono's lenient forms
/// like `2024-3-1`.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// `HH:MM:SS`, with `HH:MM` accepted from older clients.
pub(crate) fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

pub(crate) fn required_date(value: Option<&str>, field: &str) -> Result<NaiveDate, ApiError> {
    let raw = value.ok_or_else(|| ApiError::InvalidInput(format!("{} is required", field)))?;
    parse_date(raw)
        .ok_or_else(|| ApiError::InvalidInput(format!("{} must be in YYYY-MM-DD format", field)))
}

pub(crate) fn required_time(value: Option<&str>, field: &str) -> Result<NaiveTime, ApiError> {
    let raw = value.ok_or_else(|| ApiError::InvalidInput(format!("{} is required", field)))?;
    parse_time(raw).ok_or_else(|| {
        ApiError::InvalidInput(format!("{} must be in HH:MM or HH:MM:SS format", field))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_parsing_is_strict() {
        assert_eq!(
            parse_date("2024-03-01"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert!(parse_date("2024-3-1").is_none());
        assert!(parse_date("01-03-2024").is_none());
        assert!(parse_date("2024-03-01T08:00:00").is_none());
        assert!(parse_date("2024-13-01").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn time_accepts_both_clock_forms() {
        assert_eq!(parse_time("08:15:30"), NaiveTime::from_hms_opt(8, 15, 30));
        assert_eq!(parse_time("08:15"), NaiveTime::from_hms_opt(8, 15, 0));
        assert!(parse_time("25:00").is_none());
        assert!(parse_time("8 o'clock").is_none());
    }

    #[test]
    fn required_field_errors_name_the_field() {
        let err = required_date(None, "date").unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(ref m) if m == "date is required"));

        let err = required_date(Some("01-03-2024"), "date").unwrap_err();
        assert!(
            matches!(err, ApiError::InvalidInput(ref m) if m == "date must be in YYYY-MM-DD format")
        );

        let err = required_time(Some("8 o'clock"), "time").unwrap_err();
        assert!(
            matches!(err, ApiError::InvalidInput(ref m) if m == "time must be in HH:MM or HH:MM:SS format")
        );
    }
}
