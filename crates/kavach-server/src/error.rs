use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kavach_core::KavachError;

// ---------------------------------------------------------------------------
// Internal sentinel for explicit 409 Conflict errors
// ---------------------------------------------------------------------------

/// Private sentinel error type used to carry an explicit HTTP 409 through
/// the `anyhow::Error` chain without touching the `KavachError` enum.
#[derive(Debug)]
struct ConflictError(String);

impl std::fmt::Display for ConflictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ConflictError {}

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 409 Conflict error.
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self(ConflictError(msg.into()).into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(c) = self.0.downcast_ref::<ConflictError>() {
            let body = serde_json::json!({ "error": c.0.clone() });
            return (StatusCode::CONFLICT, axum::Json(body)).into_response();
        }

        let status = if let Some(e) = self.0.downcast_ref::<KavachError>() {
            match e {
                KavachError::InvalidConfig(_)
                | KavachError::InvalidInterval
                | KavachError::InvalidDraw(_)
                | KavachError::EmptyScript => StatusCode::BAD_REQUEST,
                KavachError::ConfigNotFound(_) => StatusCode::NOT_FOUND,
                KavachError::RandomSource(_) | KavachError::TimerUnavailable(_) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                KavachError::Scheduler(_)
                | KavachError::Io(_)
                | KavachError::Yaml(_)
                | KavachError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
