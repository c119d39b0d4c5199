//! Wall-clock time utilities
//!
//! Atrio represents wall-clock instants as milliseconds since the Unix epoch.
//! Server-issued expiry timestamps arrive as ISO-8601 strings and are parsed
//! into [`PhysicalTime`] at the transport boundary, so the application core
//! only ever deals in plain millisecond arithmetic.

use crate::errors::{AtrioError, Result};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A wall-clock instant in milliseconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct PhysicalTime {
    /// Milliseconds since the Unix epoch
    pub ts_ms: u64,
}

impl PhysicalTime {
    /// Create an instant from milliseconds since the Unix epoch.
    pub fn from_ms(ts_ms: u64) -> Self {
        Self { ts_ms }
    }

    /// Parse an ISO-8601 / RFC 3339 timestamp as used by server expiry fields.
    ///
    /// Instants before the Unix epoch are rejected; the verification TTL is
    /// always a future timestamp.
    pub fn from_rfc3339(value: &str) -> Result<Self> {
        let parsed = DateTime::parse_from_rfc3339(value).map_err(|e| {
            AtrioError::invalid(format!("invalid RFC 3339 timestamp {value:?}: {e}"))
        })?;
        let ms = parsed.timestamp_millis();
        if ms < 0 {
            return Err(AtrioError::invalid(format!(
                "timestamp before Unix epoch: {value:?}"
            )));
        }
        Ok(Self { ts_ms: ms as u64 })
    }

    /// Render as an RFC 3339 string with millisecond precision.
    pub fn to_rfc3339(&self) -> String {
        match Utc.timestamp_millis_opt(self.ts_ms as i64).single() {
            Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
            None => self.ts_ms.to_string(),
        }
    }

    /// Milliseconds elapsed since `earlier`, saturating at zero.
    pub fn saturating_since(&self, earlier: PhysicalTime) -> u64 {
        self.ts_ms.saturating_sub(earlier.ts_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_utc() {
        let t = PhysicalTime::from_rfc3339("2024-03-01T12:00:00.500Z").unwrap();
        assert_eq!(t.ts_ms, 1_709_294_400_500);
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let utc = PhysicalTime::from_rfc3339("2024-03-01T12:00:00Z").unwrap();
        let offset = PhysicalTime::from_rfc3339("2024-03-01T14:00:00+02:00").unwrap();
        assert_eq!(utc, offset);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PhysicalTime::from_rfc3339("not a timestamp").is_err());
        assert!(PhysicalTime::from_rfc3339("").is_err());
    }

    #[test]
    fn test_parse_rejects_pre_epoch() {
        assert!(PhysicalTime::from_rfc3339("1969-12-31T23:59:59Z").is_err());
    }

    #[test]
    fn test_rfc3339_round_trip() {
        let t = PhysicalTime::from_ms(1_709_294_400_500);
        let parsed = PhysicalTime::from_rfc3339(&t.to_rfc3339()).unwrap();
        assert_eq!(t, parsed);
    }

    #[test]
    fn test_saturating_since() {
        let earlier = PhysicalTime::from_ms(1_000);
        let later = PhysicalTime::from_ms(6_000);
        assert_eq!(later.saturating_since(earlier), 5_000);
        assert_eq!(earlier.saturating_since(later), 0);
        assert_eq!(earlier.saturating_since(earlier), 0);
    }
}
