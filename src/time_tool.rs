// Module containing request/result data structures for the time tool
mod response;

pub use response::{NOT_AVAILABLE, TimeRequest, TimeResult};

use crate::error::AppError;
use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use genai::chat::Tool;
use serde_json::{Value, json};
use tracing::{debug, info};

/// Name under which the tool is declared to the model
pub const TOOL_NAME: &str = "get_current_time";

/// Zone used when the model calls the tool without arguments
pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";

/// Declaration of the time tool for the model.
pub fn tool() -> Tool {
    Tool::new(TOOL_NAME)
        .with_description("Get the current time in ISO 8601 format for an IANA timezone")
        .with_schema(json!({
            "type": "object",
            "properties": {
                "timezone": {
                    "type": "string",
                    "description": "The timezone to get the current time for, e.g., 'Asia/Seoul' or 'UTC'."
                }
            }
        }))
}

/// Returns the current time in the requested zone.
///
/// An unknown identifier is not an error: the result carries `timestamp = "N/A"`
/// and an `error` message embedding the identifier verbatim.
pub fn get_current_time(request: &TimeRequest) -> TimeResult {
    get_current_time_at(request, Utc::now())
}

/// Same as [`get_current_time`], rendering `now` instead of the system clock.
pub fn get_current_time_at(request: &TimeRequest, now: DateTime<Utc>) -> TimeResult {
    match lookup_zone(&request.timezone) {
        Some(tz) => TimeResult {
            timestamp: now
                .with_timezone(&tz)
                .to_rfc3339_opts(SecondsFormat::Micros, false),
            timezone: request.timezone.clone(),
            error: None,
        },
        None => {
            debug!("Unknown timezone requested: {:?}", request.timezone);
            TimeResult {
                timestamp: NOT_AVAILABLE.to_string(),
                timezone: request.timezone.clone(),
                error: Some(format!("Invalid timezone: '{}'", request.timezone)),
            }
        }
    }
}

// Exact match first, then ignoring case. Surrounding whitespace is never stripped.
fn lookup_zone(name: &str) -> Option<Tz> {
    name.parse::<Tz>()
        .ok()
        .or_else(|| Tz::from_str_insensitive(name).ok())
}

/// Decodes tool-call arguments; a missing or null `timezone` means the default zone.
pub fn parse_arguments(args: &Value) -> Result<TimeRequest, AppError> {
    match args.get("timezone") {
        None | Some(Value::Null) => Ok(TimeRequest::default()),
        Some(Value::String(timezone)) => Ok(TimeRequest::new(timezone.as_str())),
        Some(other) => Err(AppError::InvalidParameter(format!(
            "timezone must be a string, got {}",
            other
        ))),
    }
}

/// Runs the tool for a raw tool call and returns the JSON handed back to the model.
pub fn call(args: &Value) -> Result<Value, AppError> {
    let request = parse_arguments(args)?;
    let result = get_current_time(&request);
    if result.is_error() {
        info!("Time tool: unknown timezone {:?}", result.timezone);
    } else {
        info!(
            "Time tool: timezone={} timestamp={}",
            result.timezone, result.timestamp
        );
    }
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 22, 6, 30, 0).unwrap()
    }

    #[test]
    fn valid_timezone_renders_offset() {
        let result = get_current_time_at(&TimeRequest::new("Asia/Seoul"), fixed_now());

        assert_eq!(result.error, None);
        assert_eq!(result.timezone, "Asia/Seoul");
        assert_eq!(result.timestamp, "2025-05-22T15:30:00.000000+09:00");
    }

    #[test]
    fn utc_uses_numeric_offset() {
        let result = get_current_time_at(&TimeRequest::new("UTC"), fixed_now());

        assert!(!result.is_error());
        assert!(result.timestamp.ends_with("+00:00"));
        let parsed = DateTime::parse_from_rfc3339(&result.timestamp).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), fixed_now());
    }

    #[test]
    fn dst_zone_uses_current_offset() {
        let summer = get_current_time_at(&TimeRequest::new("America/New_York"), fixed_now());
        let winter = get_current_time_at(
            &TimeRequest::new("America/New_York"),
            Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(),
        );

        assert!(summer.timestamp.ends_with("-04:00"));
        assert!(winter.timestamp.ends_with("-05:00"));
    }

    #[test]
    fn lookup_ignores_case() {
        let seoul = get_current_time_at(&TimeRequest::new("asia/seoul"), fixed_now());
        assert_eq!(seoul.error, None);
        assert_eq!(seoul.timezone, "asia/seoul");
        assert_eq!(seoul.timestamp, "2025-05-22T15:30:00.000000+09:00");

        let utc = get_current_time_at(&TimeRequest::new("utc"), fixed_now());
        assert_eq!(utc.error, None);
        assert_eq!(utc.timezone, "utc");
        assert!(utc.timestamp.ends_with("+00:00"));
    }

    #[test]
    fn system_clock_result_parses() {
        let result = get_current_time(&TimeRequest::new("Europe/London"));

        assert_eq!(result.error, None);
        assert!(DateTime::parse_from_rfc3339(&result.timestamp).is_ok());
    }

    #[test]
    fn default_request_uses_seoul() {
        let result = get_current_time(&TimeRequest::default());

        assert_eq!(result.error, None);
        assert_eq!(result.timezone, DEFAULT_TIMEZONE);
        let parsed = DateTime::parse_from_rfc3339(&result.timestamp).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn invalid_timezone_is_reported_as_data() {
        let result = get_current_time(&TimeRequest::new("Invalid/Timezone"));

        assert_eq!(result.timestamp, NOT_AVAILABLE);
        assert_eq!(result.timezone, "Invalid/Timezone");
        assert_eq!(
            result.error.as_deref(),
            Some("Invalid timezone: 'Invalid/Timezone'")
        );
    }

    #[test]
    fn invalid_timezone_is_echoed_unmodified() {
        for raw in ["  Asia/Seoul ", " utc", "", "Mars/Olympus_Mons"] {
            let result = get_current_time(&TimeRequest::new(raw));

            assert_eq!(result.timestamp, NOT_AVAILABLE);
            assert_eq!(result.timezone, raw);
            assert_eq!(result.error, Some(format!("Invalid timezone: '{}'", raw)));
        }
    }

    #[test]
    fn arguments_default_when_missing() {
        assert_eq!(parse_arguments(&Value::Null).unwrap(), TimeRequest::default());
        assert_eq!(parse_arguments(&json!({})).unwrap(), TimeRequest::default());
        assert_eq!(
            parse_arguments(&json!({ "timezone": null })).unwrap(),
            TimeRequest::default()
        );
        assert_eq!(
            parse_arguments(&json!({ "timezone": "UTC" })).unwrap(),
            TimeRequest::new("UTC")
        );
    }

    #[test]
    fn non_string_timezone_is_rejected() {
        let err = parse_arguments(&json!({ "timezone": 9 })).unwrap_err();
        assert!(matches!(err, AppError::InvalidParameter(_)));
        assert_eq!(
            err.to_string(),
            "Invalid parameter: timezone must be a string, got 9"
        );
    }

    #[test]
    fn call_serializes_without_error_field_on_success() {
        let value = call(&json!({ "timezone": "UTC" })).unwrap();

        assert_eq!(value["timezone"], "UTC");
        assert!(value.get("error").is_none());
        assert!(value["timestamp"].as_str().unwrap().ends_with("+00:00"));
    }

    #[test]
    fn call_serializes_error_for_unknown_zone() {
        let value = call(&json!({ "timezone": "Nowhere" })).unwrap();

        assert_eq!(
            value,
            json!({
                "timestamp": "N/A",
                "timezone": "Nowhere",
                "error": "Invalid timezone: 'Nowhere'"
            })
        );
    }
}
