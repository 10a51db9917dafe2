use serde::Serialize;

/// Sentinel timestamp returned when the zone lookup fails
pub const NOT_AVAILABLE: &str = "N/A";

/// Arguments of the `get_current_time` tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRequest {
    /// IANA time-zone identifier (e.g., "Asia/Seoul" or "UTC")
    pub timezone: String,
}

impl Default for TimeRequest {
    fn default() -> Self {
        Self::new(super::DEFAULT_TIMEZONE)
    }
}

impl TimeRequest {
    pub fn new(timezone: impl Into<String>) -> Self {
        Self {
            timezone: timezone.into(),
        }
    }
}

/// Result of the `get_current_time` tool, serialized back to the model as-is
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TimeResult {
    /// Current time in ISO 8601 format with explicit offset, or "N/A"
    pub timestamp: String,
    /// The requested identifier, unmodified
    pub timezone: String,
    /// Set only when the identifier is unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TimeResult {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
