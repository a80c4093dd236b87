pub mod rest;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::context::RequestContext;

pub use rest::RestBackend;

/// Message the auth service attaches to a missing-session error
pub const SESSION_MISSING_MESSAGE: &str = "Auth session missing!";

/// Errors from the identity/database backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Error reported by the auth service, with its loosely typed body
    #[error("{message}")]
    Auth { message: String, shape: Value },

    /// Error reported by the table API
    #[error("{message}")]
    Query { status: u16, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl BackendError {
    /// The error the auth client raises when no access token is present
    pub fn session_missing() -> Self {
        BackendError::Auth {
            message: SESSION_MISSING_MESSAGE.to_string(),
            shape: json!({
                "name": "AuthSessionMissingError",
                "message": SESSION_MISSING_MESSAGE,
                "status": 400,
                "__isAuthError": true,
            }),
        }
    }

    /// Error raised by the auth API for a non-success response
    pub fn auth_api(status: u16, body: &Value) -> Self {
        let message = ["msg", "message", "error_description", "error"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| format!("auth request failed with status {}", status));

        BackendError::Auth {
            shape: json!({
                "name": "AuthApiError",
                "message": message,
                "status": status,
                "code": body.get("error_code").cloned().unwrap_or(Value::Null),
                "__isAuthError": true,
            }),
            message,
        }
    }

    /// Loosely typed view of the error, as inspected by the auth error classifier
    pub fn shape(&self) -> Value {
        match self {
            BackendError::Auth { shape, .. } => shape.clone(),
            BackendError::Query { status, message } => json!({
                "name": "QueryError",
                "message": message,
                "status": status,
            }),
            other => json!({ "message": other.to_string() }),
        }
    }
}

/// Opaque user record returned by the auth service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(Value);

impl Identity {
    pub fn new(record: Value) -> Self {
        Self(record)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Sort order for table queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub descending: bool,
}

impl OrderBy {
    pub fn desc(column: impl Into<String>) -> Self {
        Self { column: column.into(), descending: true }
    }

    /// `column.desc` / `column.asc` as understood by the table API
    pub fn to_query_value(&self) -> String {
        let direction = if self.descending { "desc" } else { "asc" };
        format!("{}.{}", self.column, direction)
    }
}

/// Client for the managed identity and table service
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Resolve the user attached to the request's session, if any
    async fn current_user(&self, ctx: &RequestContext) -> Result<Option<Identity>, BackendError>;

    /// All rows of `table`, sorted by `order`
    async fn select_all(&self, table: &str, order: &OrderBy) -> Result<Vec<Value>, BackendError>;

    async fn health_check(&self) -> Result<(), BackendError> {
        Ok(())
    }
}
