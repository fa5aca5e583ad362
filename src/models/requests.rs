use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Coordinate;

/// Request for the bus-only intercity travel time between two points
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TravelTimeRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub start_lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub start_lon: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub end_lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub end_lon: f64,
    /// ODsay language code, 0 (Korean) through 5; absent or null means 0.
    /// The range is checked when the code becomes a `Language`.
    #[serde(default)]
    pub lang: Option<u8>,
}

impl TravelTimeRequest {
    pub fn start(&self) -> Coordinate {
        Coordinate::new(self.start_lat, self.start_lon)
    }

    pub fn end(&self) -> Coordinate {
        Coordinate::new(self.end_lat, self.end_lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_defaults_to_korean() {
        let req: TravelTimeRequest = serde_json::from_str(
            r#"{"start_lat": 37.61, "start_lon": 126.92, "end_lat": 37.50, "end_lon": 127.12}"#,
        )
        .unwrap();

        assert_eq!(req.lang, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_null_lang_is_accepted() {
        let req: TravelTimeRequest = serde_json::from_str(
            r#"{"start_lat": 37.61, "start_lon": 126.92, "end_lat": 37.50, "end_lon": 127.12, "lang": null}"#,
        )
        .unwrap();

        assert_eq!(req.lang, None);
    }

    #[test]
    fn test_missing_coordinate_is_rejected() {
        let result = serde_json::from_str::<TravelTimeRequest>(
            r#"{"start_lat": 37.61, "start_lon": 126.92, "end_lat": 37.50, "lang": 1}"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_out_of_range_values_fail_validation() {
        let req = TravelTimeRequest {
            start_lat: 91.0,
            start_lon: 126.92,
            end_lat: 37.50,
            end_lon: 127.12,
            lang: Some(6),
        };

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("start_lat"));
        assert!(!fields.contains_key("end_lon"));
    }
}
