use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::auth::admin_cookie;
use crate::context::RequestContext;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// GET /api/admin/check-auth
///
/// `{"authenticated": true}` with 200 when the admin cookie is exactly
/// `"true"`, otherwise `{"authenticated": false}` with 401.
pub async fn check_auth(ctx: RequestContext) -> (StatusCode, Json<Value>) {
    if admin_cookie::is_authenticated(&ctx) {
        (StatusCode::OK, Json(json!({ "authenticated": true })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "authenticated": false })))
    }
}

/// POST /api/admin/logout - always succeeds and expires the admin cookie
pub async fn logout(
    State(state): State<AppState>,
    mut ctx: RequestContext,
) -> (RequestContext, Json<Value>) {
    ctx.set_cookie(admin_cookie::cleared(&state.config.security));
    (ctx, Json(json!({ "success": true })))
}

/// POST /api/admin/login - issue the admin cookie for the configured password
pub async fn login(
    State(state): State<AppState>,
    mut ctx: RequestContext,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(RequestContext, Json<Value>), ApiError> {
    let Some(expected) = state.config.security.admin_password.as_deref() else {
        return Err(ApiError::service_unavailable("Admin login is not configured"));
    };
    let Json(payload) = payload?;

    if payload.password.is_empty() {
        return Err(ApiError::bad_request("Password is required"));
    }

    if !password_matches(&payload.password, expected) {
        tracing::warn!("Rejected admin login attempt");
        return Err(ApiError::unauthorized("Invalid password"));
    }

    ctx.set_cookie(admin_cookie::issued(&state.config.security));
    tracing::info!("Admin login succeeded");
    Ok((ctx, Json(json!({ "success": true }))))
}

// Compared as fixed-length digests
fn password_matches(supplied: &str, expected: &str) -> bool {
    Sha256::digest(supplied.as_bytes()) == Sha256::digest(expected.as_bytes())
}
