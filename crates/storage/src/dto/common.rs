use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::error::{Result, StorageError};

/// Uniform `{success, data, count, message}` wrapper for successful responses.
/// Failures are rendered by the web layer with the same `success` flag.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            count: None,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn list(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(data.len()),
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            count: None,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Parse a path id. Anything that is not a UUID cannot exist, so it is
/// reported the same way as a missing document.
pub fn parse_id(raw: &str, entity: &'static str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| StorageError::not_found(entity))
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS[.f]` (taken as UTC) and
/// `YYYY-MM-DD` (UTC midnight).
pub fn parse_datetime(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    let raw = raw.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Ok(datetime.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(format!("invalid date `{raw}`"))
}

pub fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_datetime(&raw).map(Some).map_err(de::Error::custom),
    }
}

/// Query strings like `?category=` should behave as if the key were absent.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => T::from_str(s).map(Some).map_err(de::Error::custom),
    }
}

/// Records a `required` error for `field` when `value` is missing.
pub(crate) fn require<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<T>,
    message: &'static str,
) -> Option<T> {
    if value.is_none() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::Borrowed(message));
        errors.add(field, error);
    }
    value
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_list_counts_items() {
        let response = ApiResponse::list(vec![1, 2, 3]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, serde_json::json!({"success": true, "count": 3, "data": [1, 2, 3]}));
    }

    #[test]
    fn test_message_omits_data() {
        let value = serde_json::to_value(ApiResponse::message("Workout deleted successfully")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"success": true, "message": "Workout deleted successfully"})
        );
    }

    #[test]
    fn test_parse_id_maps_garbage_to_not_found() {
        let err = parse_id("not-a-uuid", "Exercise").unwrap_err();
        assert!(matches!(err, StorageError::NotFound { entity: "Exercise" }));

        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "Exercise").unwrap(), id);
    }

    #[test]
    fn test_parse_plain_date_is_utc_midnight() {
        let parsed = parse_datetime("2024-01-15").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2024, 1, 15));
        assert_eq!((parsed.hour(), parsed.minute()), (0, 0));
    }

    #[test]
    fn test_parse_rfc3339_converts_offset() {
        let parsed = parse_datetime("2024-01-15T10:00:00+02:00").unwrap();
        assert_eq!(parsed.hour(), 8);
    }

    #[test]
    fn test_parse_naive_datetime() {
        let parsed = parse_datetime("2024-01-15T18:30:00").unwrap();
        assert_eq!((parsed.hour(), parsed.minute()), (18, 30));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_datetime("yesterday").is_err());
        assert!(parse_datetime("2024-13-01").is_err());
    }

    #[test]
    fn test_require_records_message() {
        let mut errors = ValidationErrors::new();
        assert_eq!(require(&mut errors, "rating", Some(3), "Rating is required"), Some(3));
        assert!(errors.errors().is_empty());

        assert_eq!(require::<i32>(&mut errors, "rating", None, "Rating is required"), None);
        assert_eq!(
            crate::error::describe_validation_errors(&errors),
            "rating: Rating is required"
        );
    }
}
