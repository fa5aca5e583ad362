use actix_web::{error::{self, ResponseError}, http::StatusCode, HttpRequest, HttpResponse};
use thiserror::Error;

use crate::core::ExtractError;
use crate::models::ErrorResponse;
use crate::services::OdsayError;

/// Failure of a single travel time request
///
/// Every variant is scoped to the request that raised it and renders as an
/// `ErrorResponse` JSON body.
#[derive(Debug, Error)]
pub enum TravelTimeError {
    #[error("Invalid JSON: {0}")]
    MalformedBody(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Upstream call failed: {0}")]
    UpstreamCall(#[from] OdsayError),

    #[error("Upstream rejected the search ({code}): {message}")]
    UpstreamRejected { code: String, message: String },

    #[error("No bus-only route found: {0}")]
    PathDataNotFound(String),

    #[error("Failed to parse upstream response: {0}")]
    ResponseParse(String),
}

impl TravelTimeError {
    /// Machine-readable error code used in the `error` field
    pub fn kind(&self) -> &'static str {
        match self {
            TravelTimeError::MalformedBody(_) => "invalid_json",
            TravelTimeError::Validation(_) => "validation_failed",
            TravelTimeError::UpstreamCall(_) | TravelTimeError::UpstreamRejected { .. } => {
                "upstream_call_failed"
            }
            TravelTimeError::PathDataNotFound(_) => "path_not_found",
            TravelTimeError::ResponseParse(_) => "response_parse_failed",
        }
    }
}

impl From<ExtractError> for TravelTimeError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::PathDataNotFound(msg) => TravelTimeError::PathDataNotFound(msg),
            ExtractError::ResponseParse(msg) => TravelTimeError::ResponseParse(msg),
            ExtractError::UpstreamRejected { code, message } => {
                TravelTimeError::UpstreamRejected { code, message }
            }
        }
    }
}

impl ResponseError for TravelTimeError {
    fn status_code(&self) -> StatusCode {
        match self {
            TravelTimeError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            TravelTimeError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TravelTimeError::UpstreamCall(OdsayError::MissingApiKey)
            | TravelTimeError::UpstreamCall(OdsayError::ClientInit(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            TravelTimeError::UpstreamCall(_)
            | TravelTimeError::UpstreamRejected { .. }
            | TravelTimeError::ResponseParse(_) => StatusCode::BAD_GATEWAY,
            TravelTimeError::PathDataNotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// Handle JSON payload errors
///
/// Missing or mistyped fields are validation failures (422); anything that
/// is not a JSON body at all is a 400.
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    match err {
        error::JsonPayloadError::Deserialize(e) if e.is_data() => {
            TravelTimeError::Validation(e.to_string()).into()
        }
        other => TravelTimeError::MalformedBody(other.to_string()).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_per_kind() {
        let cases = [
            (TravelTimeError::MalformedBody("x".into()), 400, "invalid_json"),
            (TravelTimeError::Validation("x".into()), 422, "validation_failed"),
            (TravelTimeError::PathDataNotFound("x".into()), 404, "path_not_found"),
            (TravelTimeError::ResponseParse("x".into()), 502, "response_parse_failed"),
            (
                TravelTimeError::UpstreamCall(OdsayError::ApiError("HTTP 503".into())),
                502,
                "upstream_call_failed",
            ),
            (
                TravelTimeError::UpstreamCall(OdsayError::Timeout { timeout_secs: 10 }),
                502,
                "upstream_call_failed",
            ),
            (
                TravelTimeError::UpstreamCall(OdsayError::MissingApiKey),
                500,
                "upstream_call_failed",
            ),
        ];

        for (err, status, kind) in cases {
            assert_eq!(err.status_code().as_u16(), status, "{}", err);
            assert_eq!(err.kind(), kind);
        }
    }

    #[test]
    fn test_extract_errors_keep_their_class() {
        let err: TravelTimeError = ExtractError::PathDataNotFound("none".into()).into();
        assert!(matches!(err, TravelTimeError::PathDataNotFound(_)));

        let err: TravelTimeError = ExtractError::ResponseParse("shape".into()).into();
        assert!(matches!(err, TravelTimeError::ResponseParse(_)));

        let err: TravelTimeError = ExtractError::UpstreamRejected {
            code: "500".into(),
            message: "auth".into(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
