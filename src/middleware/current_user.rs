use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::auth::require_user;
use crate::backend::Identity;
use crate::context::RequestContext;
use crate::error::ApiError;
use crate::state::AppState;

/// Extractor that runs the session guard before the handler body.
///
/// Rejects with `UNAUTHENTICATED` when the backend has no user for the
/// request or reports a session-missing error.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = RequestContext::from_headers(&parts.headers);

        match require_user(state.backend.as_ref(), &ctx).await {
            Ok(identity) => {
                tracing::debug!("session guard admitted user {:?}", identity.id());
                Ok(CurrentUser(identity))
            }
            Err(err) => Err(ApiError::from_guard(err, &state.classifier)),
        }
    }
}
