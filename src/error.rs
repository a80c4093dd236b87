// HTTP API Error Types
use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::{AuthErrorClassifier, AuthErrorKind, GuardError};
use crate::backend::BackendError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized, no active session
    Unauthenticated(String),

    // 401 Unauthorized, credentials or token rejected
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthenticated(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthenticated(_) => "UNAUTHENTICATED",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.message(),
            "code": self.error_code()
        })
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::Unauthenticated(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }

    /// Map a session guard failure, using `classifier` to recognise
    /// session-missing backend errors
    pub fn from_guard(err: GuardError, classifier: &AuthErrorClassifier) -> Self {
        match err.classify(classifier) {
            GuardError::Unauthenticated => ApiError::unauthenticated("No active session"),
            GuardError::Backend(err) => match classifier.classify(&err.shape()) {
                AuthErrorKind::AuthError { status: Some(403) } => {
                    ApiError::forbidden(err.to_string())
                }
                AuthErrorKind::AuthError { .. } => ApiError::unauthorized(err.to_string()),
                AuthErrorKind::SessionMissing | AuthErrorKind::Unknown => err.into(),
            },
        }
    }
}

// Backend failures keep their message; the stories listing reports it to the client
impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match &err {
            BackendError::ConfigMissing(key) => {
                tracing::error!("Backend is not configured: missing {}", key);
            }
            BackendError::Query { status, message } => {
                tracing::error!("Backend query failed with status {}: {}", status, message);
            }
            other => {
                tracing::error!("Backend error: {}", other);
            }
        }
        ApiError::internal_server_error(err.to_string())
    }
}

// Malformed request bodies answer in the same envelope as every other error
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_message_and_code() {
        let err = ApiError::internal_server_error("relation \"stories\" does not exist");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_json()["error"], "relation \"stories\" does not exist");
        assert_eq!(err.to_json()["code"], "INTERNAL_SERVER_ERROR");
    }

    #[test]
    fn query_error_becomes_500_with_backend_message() {
        let query = BackendError::Query { status: 404, message: "table not found".into() };
        let err: ApiError = query.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "table not found");
    }

    #[test]
    fn guard_errors_map_by_classification() {
        let classifier = AuthErrorClassifier::default();

        let missing =
            ApiError::from_guard(GuardError::Backend(BackendError::session_missing()), &classifier);
        assert_eq!(missing.error_code(), "UNAUTHENTICATED");

        let none = ApiError::from_guard(GuardError::Unauthenticated, &classifier);
        assert_eq!(none.status_code(), StatusCode::UNAUTHORIZED);

        let forbidden = ApiError::from_guard(
            GuardError::Backend(BackendError::auth_api(403, &json!({ "msg": "invalid JWT" }))),
            &classifier,
        );
        assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(forbidden.message(), "invalid JWT");

        let expired = ApiError::from_guard(
            GuardError::Backend(BackendError::auth_api(401, &json!({ "msg": "token expired" }))),
            &classifier,
        );
        assert_eq!(expired.error_code(), "UNAUTHORIZED");

        let down = ApiError::from_guard(
            GuardError::Backend(BackendError::Query { status: 503, message: "unavailable".into() }),
            &classifier,
        );
        assert_eq!(down.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
