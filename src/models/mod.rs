// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Coordinate, Language, TravelTimeResult};
pub use requests::TravelTimeRequest;
pub use responses::{TravelTimeResponse, HealthResponse, ErrorResponse};
