use axum::Json;
use serde_json::Value;

use crate::middleware::CurrentUser;

/// GET /api/auth/user - the backend's user record for this session, unchanged
pub async fn current_user(CurrentUser(identity): CurrentUser) -> Json<Value> {
    Json(identity.into_value())
}
