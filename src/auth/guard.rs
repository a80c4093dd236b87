use thiserror::Error;

use super::classifier::AuthErrorClassifier;
use crate::backend::{BackendError, Identity, IdentityBackend};
use crate::context::RequestContext;

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("UNAUTHENTICATED")]
    Unauthenticated,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl GuardError {
    /// Fold session-missing backend errors into `Unauthenticated`
    pub fn classify(self, classifier: &AuthErrorClassifier) -> Self {
        match self {
            GuardError::Backend(err) if classifier.is_session_missing(&err.shape()) => {
                GuardError::Unauthenticated
            }
            other => other,
        }
    }
}

/// Current identity for the request, or `Unauthenticated` when the backend
/// reports no user. Backend errors pass through unclassified.
pub async fn require_user(
    backend: &dyn IdentityBackend,
    ctx: &RequestContext,
) -> Result<Identity, GuardError> {
    match backend.current_user(ctx).await? {
        Some(identity) => Ok(identity),
        None => {
            tracing::debug!("session guard: backend returned no user");
            Err(GuardError::Unauthenticated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticBackend;
    use serde_json::json;

    #[tokio::test]
    async fn no_user_is_unauthenticated() {
        let backend = StaticBackend::default();

        let result = require_user(&backend, &RequestContext::default()).await;
        assert!(matches!(result, Err(GuardError::Unauthenticated)));
    }

    #[tokio::test]
    async fn returns_identity_unchanged() {
        let user = json!({
            "id": "2f1c",
            "email": "editor@example.com",
            "app_metadata": { "role": "editor" }
        });
        let backend = StaticBackend::with_user(user.clone());

        let identity = require_user(&backend, &RequestContext::default()).await.unwrap();
        assert_eq!(identity.into_value(), user);
    }

    #[tokio::test]
    async fn backend_errors_pass_through_unclassified() {
        let backend = StaticBackend::with_user_error(BackendError::session_missing);

        let result = require_user(&backend, &RequestContext::default()).await;
        assert!(matches!(result, Err(GuardError::Backend(BackendError::Auth { .. }))));
    }

    #[test]
    fn classify_folds_session_missing_into_unauthenticated() {
        let classifier = AuthErrorClassifier::default();

        let err = GuardError::Backend(BackendError::session_missing()).classify(&classifier);
        assert!(matches!(err, GuardError::Unauthenticated));
    }

    #[test]
    fn classify_keeps_other_errors() {
        let classifier = AuthErrorClassifier::default();

        let rejected = BackendError::auth_api(403, &json!({ "msg": "invalid JWT" }));
        let forbidden = GuardError::Backend(rejected);
        assert!(matches!(forbidden.classify(&classifier), GuardError::Backend(_)));

        let down = BackendError::Query { status: 500, message: "down".into() };
        let query = GuardError::Backend(down);
        assert!(matches!(query.classify(&classifier), GuardError::Backend(_)));
    }
}
