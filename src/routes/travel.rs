use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{extract_total_time, UpstreamQuery};
use crate::error::TravelTimeError;
use crate::models::{HealthResponse, TravelTimeRequest, TravelTimeResponse};
use crate::services::OdsayClient;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub odsay: Arc<OdsayClient>,
}

/// Configure all travel-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/travel-time", web::post().to(travel_time));
}

/// Health check endpoint
///
/// Constant; does not call ODsay.
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::ok())
}

/// Travel time endpoint
///
/// POST /travel-time
///
/// Request body:
/// ```json
/// {
///   "start_lat": 37.6134436427887,
///   "start_lon": 126.926493082645,
///   "end_lat": 37.5004198786564,
///   "end_lon": 127.126936754911,
///   "lang": 0
/// }
/// ```
async fn travel_time(
    state: web::Data<AppState>,
    req: web::Json<TravelTimeRequest>,
) -> Result<HttpResponse, TravelTimeError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for travel_time request: field_errors={:?}", errors);
        return Err(TravelTimeError::Validation(errors.to_string()));
    }

    let query = UpstreamQuery::from_request(&req).map_err(|code| {
        TravelTimeError::Validation(format!("lang: unsupported language code {}", code))
    })?;

    let payload = state.odsay.search_path(&query).await.map_err(|e| {
        tracing::error!("ODsay path search failed: {}", e);
        TravelTimeError::from(e)
    })?;

    let result = extract_total_time(&payload).map_err(|e| {
        tracing::info!("No travel time for ({}, {}) -> ({}, {}): {}",
            req.start_lat, req.start_lon, req.end_lat, req.end_lon, e);
        TravelTimeError::from(e)
    })?;

    tracing::info!(
        "Travel time ({}, {}) -> ({}, {}): {} min",
        req.start_lat,
        req.start_lon,
        req.end_lat,
        req.end_lon,
        result.total_time
    );

    Ok(HttpResponse::Ok().json(TravelTimeResponse {
        total_time: result.total_time,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check_response() {
        let app = test::init_service(App::new().route("/health", web::get().to(health_check))).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, serde_json::json!({ "status": "ok" }));
    }
}
