use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::error;

use userhub_core::{PipelineError, ValidationFailure};

/// Map a dispatcher failure onto an HTTP response.
///
/// Internal failures get a generic message; their details only go to the log.
pub fn pipeline_error_to_response(err: PipelineError) -> axum::response::Response {
    match err {
        PipelineError::ValidationFailed(failures) => validation_error(failures),
        PipelineError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        PipelineError::Canceled => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "canceled",
            "request canceled",
        ),
        e @ (PipelineError::Persistence(_)
        | PipelineError::HandlerNotFound(_)
        | PipelineError::AmbiguousHandler { .. }) => {
            if e.is_configuration_defect() {
                error!(error = %e, "request routing misconfigured");
            } else {
                error!(error = %e, "request failed");
            }
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal server error",
            )
        }
    }
}

pub fn validation_error(failures: Vec<ValidationFailure>) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({
            "error": "validation_error",
            "message": format!("{} validation failure(s)", failures.len()),
            "failures": failures,
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
