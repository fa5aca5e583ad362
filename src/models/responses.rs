use serde::{Deserialize, Serialize};

/// Response for the travel time endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelTimeResponse {
    /// Total travel time as reported by ODsay (minutes)
    pub total_time: u32,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
