//! Telemetry reading types and range validation
//!
//! The ingest payload carries one or both known metrics; each metric has a
//! fixed store key and a fixed valid range. Values that pass validation are
//! stored verbatim, so anything read back later already satisfies the range
//! constraints.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store key for the latest heart rate reading
pub const HEART_RATE_KEY: &str = "heart_rate";

/// Store key for the latest location reading
pub const LOCATION_KEY: &str = "location";

/// A geolocation reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Ingest request body, at least one metric must be present
///
/// Heart rate is kept as a raw JSON number so an integer reading round-trips
/// without gaining a fractional part.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestPayload {
    pub heart_rate: Option<serde_json::Number>,
    pub location: Option<Location>,
}

/// Payload validation failure kinds
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("payload contains no known metric")]
    NoMetrics,

    #[error("heart_rate must be greater than 0 and less than 200")]
    HeartRateRange,

    #[error("location must have lat in [-90, 90] and lng in [-180, 180]")]
    LocationRange,
}

impl IngestPayload {
    /// Checks shape and range constraints for every present metric
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming the violated constraint.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.heart_rate.is_none() && self.location.is_none() {
            return Err(ValidationError::NoMetrics);
        }

        if let Some(rate) = &self.heart_rate {
            let value = rate.as_f64().ok_or(ValidationError::HeartRateRange)?;
            if value <= 0.0 || value >= 200.0 {
                return Err(ValidationError::HeartRateRange);
            }
        }

        if let Some(location) = &self.location {
            if !(-90.0..=90.0).contains(&location.lat)
                || !(-180.0..=180.0).contains(&location.lng)
            {
                return Err(ValidationError::LocationRange);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> IngestPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_heart_rate_in_range() {
        assert!(payload(r#"{"heart_rate": 72}"#).validate().is_ok());
        assert!(payload(r#"{"heart_rate": 0.5}"#).validate().is_ok());
        assert!(payload(r#"{"heart_rate": 199.9}"#).validate().is_ok());
    }

    #[test]
    fn test_heart_rate_out_of_range() {
        for raw in [
            r#"{"heart_rate": 0}"#,
            r#"{"heart_rate": -5}"#,
            r#"{"heart_rate": 200}"#,
            r#"{"heart_rate": 250}"#,
        ] {
            assert_eq!(
                payload(raw).validate(),
                Err(ValidationError::HeartRateRange),
                "expected rejection for {raw}"
            );
        }
    }

    #[test]
    fn test_heart_rate_integer_preserved() {
        let p = payload(r#"{"heart_rate": 72}"#);
        assert_eq!(p.heart_rate.unwrap().to_string(), "72");
    }

    #[test]
    fn test_location_bounds_inclusive() {
        assert!(
            payload(r#"{"location": {"lat": 90, "lng": -180}}"#)
                .validate()
                .is_ok()
        );
        assert!(
            payload(r#"{"location": {"lat": -90, "lng": 180}}"#)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_location_out_of_range() {
        for raw in [
            r#"{"location": {"lat": 91, "lng": 10}}"#,
            r#"{"location": {"lat": -90.1, "lng": 10}}"#,
            r#"{"location": {"lat": 10, "lng": 180.5}}"#,
            r#"{"location": {"lat": 10, "lng": -181}}"#,
        ] {
            assert_eq!(
                payload(raw).validate(),
                Err(ValidationError::LocationRange),
                "expected rejection for {raw}"
            );
        }
    }

    #[test]
    fn test_empty_payload_rejected() {
        assert_eq!(payload("{}").validate(), Err(ValidationError::NoMetrics));
    }

    #[test]
    fn test_combined_payload() {
        let p = payload(r#"{"heart_rate": 65, "location": {"lat": 39.9, "lng": 116.4}}"#);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_one_bad_metric_rejects_whole_payload() {
        let p = payload(r#"{"heart_rate": 65, "location": {"lat": 200, "lng": 10}}"#);
        assert_eq!(p.validate(), Err(ValidationError::LocationRange));
    }

    #[test]
    fn test_non_numeric_heart_rate_fails_deserialization() {
        assert!(serde_json::from_str::<IngestPayload>(r#"{"heart_rate": "fast"}"#).is_err());
        assert!(serde_json::from_str::<IngestPayload>(r#"{"location": {"lat": "a", "lng": 1}}"#).is_err());
        assert!(serde_json::from_str::<IngestPayload>("[1, 2]").is_err());
    }
}
