//! Bus Travel Time - intercity bus-only travel time lookup service
//!
//! This library translates a coordinate pair into an ODsay public transit
//! path search restricted to intercity bus routes, and extracts the total
//! travel time from the response.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{extract_total_time, ExtractError, UpstreamQuery};
pub use error::TravelTimeError;
pub use models::{TravelTimeRequest, TravelTimeResponse, TravelTimeResult};
pub use services::{OdsayClient, OdsayError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let payload = serde_json::json!({ "result": { "path": [ { "info": { "totalTime": 45 } } ] } });
        assert_eq!(extract_total_time(&payload).unwrap().total_time, 45);
    }
}
