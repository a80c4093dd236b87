use std::sync::Arc;

use crate::auth::AuthErrorClassifier;
use crate::backend::{BackendError, IdentityBackend, RestBackend};
use crate::config::AppConfig;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub backend: Arc<dyn IdentityBackend>,
    pub classifier: Arc<AuthErrorClassifier>,
}

impl AppState {
    pub fn new(config: AppConfig, backend: Arc<dyn IdentityBackend>) -> Self {
        let classifier = AuthErrorClassifier::from_config(&config.auth_errors);
        Self {
            config: Arc::new(config),
            backend,
            classifier: Arc::new(classifier),
        }
    }

    /// State backed by the REST client described in `config.backend`
    pub fn from_config(config: AppConfig) -> Result<Self, BackendError> {
        let backend = RestBackend::new(&config.backend)?;
        Ok(Self::new(config, Arc::new(backend)))
    }
}
