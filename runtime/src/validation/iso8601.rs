//! ISO 8601 timestamps

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use validator::ValidationError;

/// Parse an ISO 8601 timestamp.
///
/// Accepts RFC 3339 (`2024-01-01T10:00:00+02:00`), naive date-times taken
/// as UTC (`2024-01-01T10:00:00`, optional fraction) and plain dates
/// (`2024-01-01`, midnight UTC).
pub fn parse_iso8601(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Custom validator for ISO 8601 string fields.
///
/// ```
/// use jsonapi_runtime::validation::validate_iso8601;
/// use validator::Validate;
///
/// #[derive(Validate)]
/// struct Params {
///     #[validate(custom(function = "validate_iso8601"))]
///     since: String,
/// }
///
/// let params = Params { since: "2024-01-01".to_string() };
/// assert!(params.validate().is_ok());
/// ```
pub fn validate_iso8601(value: &str) -> Result<(), ValidationError> {
    match parse_iso8601(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("iso8601")
            .with_message("must be an ISO 8601 timestamp".into())),
    }
}
