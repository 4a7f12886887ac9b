use std::sync::OnceLock;

use chrono::{
    DateTime,
    Datelike,
    Local,
    Months,
    NaiveDate,
    NaiveDateTime,
    SecondsFormat,
    Utc,
};
use regex::Regex;

use super::VocabError;

pub const CALENDAR_CELLS: usize = 42;

pub fn to_date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(value: &str) -> Result<NaiveDate, VocabError> {
    Ok(NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")?)
}

/// Timestamp in the format the backend stores for attempts.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Reduces a backend date value to `YYYY-MM-DD`.
///
/// Plain date keys are returned as-is, full timestamps are converted to the
/// local calendar date, anything else is dropped.
pub fn normalize_date_value(value: &str) -> Option<String> {
    static DATE_KEY: OnceLock<Regex> = OnceLock::new();
    let re = DATE_KEY.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

    let value = value.trim();
    if re.is_match(value) {
        return Some(value.to_string());
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(to_date_key(parsed.with_timezone(&Local).date_naive()));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|parsed| to_date_key(parsed.date()))
}

pub fn normalize_date_values(values: &serde_json::Value) -> Vec<String> {
    values
        .as_array()
        .map(|list| list.iter().filter_map(|v| v.as_str()).filter_map(normalize_date_value).collect())
        .unwrap_or_default()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn shift_months(first: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        first.checked_add_months(Months::new(months as u32))
    } else {
        first.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(first)
}

/// Six Monday-first weeks covering the month of `first`; `None` marks padding.
pub fn month_grid(first: NaiveDate) -> Vec<Option<NaiveDate>> {
    let first = first_of_month(first);
    let leading = first.weekday().num_days_from_monday() as i64;

    (0..CALENDAR_CELLS as i64)
        .map(|i| {
            let offset = i - leading;
            if offset < 0 {
                return None;
            }
            first
                .checked_add_days(chrono::Days::new(offset as u64))
                .filter(|date| date.month() == first.month())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn date_keys_are_kept_and_datetimes_reduced() {
        assert_eq!(normalize_date_value("2024-03-09"), Some("2024-03-09".to_string()));
        assert_eq!(normalize_date_value("2024-03-09T13:45:00"), Some("2024-03-09".to_string()));
        assert_eq!(
            normalize_date_value("2024-03-09T13:45:00.123"),
            Some("2024-03-09".to_string())
        );
        assert_eq!(normalize_date_value("not a date"), None);
        assert_eq!(normalize_date_value(""), None);
    }

    #[test]
    fn non_array_date_payload_is_empty() {
        assert!(normalize_date_values(&json!({ "dates": [] })).is_empty());
        assert_eq!(
            normalize_date_values(&json!(["2024-01-02", 5, "junk", "2024-01-03T08:00:00"])),
            vec!["2024-01-02".to_string(), "2024-01-03".to_string()]
        );
    }

    #[test]
    fn month_grid_starts_on_monday() {
        // 1 March 2024 was a Friday.
        let grid = month_grid(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(grid.len(), CALENDAR_CELLS);
        assert!(grid[..4].iter().all(Option::is_none));
        assert_eq!(grid[4], NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(grid[4 + 30], NaiveDate::from_ymd_opt(2024, 3, 31));
        assert!(grid[4 + 31..].iter().all(Option::is_none));
    }

    #[test]
    fn shifting_months_crosses_years() {
        let jan = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(shift_months(jan, -1), NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(shift_months(jan, 12), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(parse_date_key("2024-01-01").unwrap(), jan);
        assert!(parse_date_key("01/01/2024").is_err());
    }
}
