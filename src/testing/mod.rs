use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::backend::{BackendError, Identity, IdentityBackend, OrderBy};
use crate::context::RequestContext;

/// Scripted in-memory backend for unit tests
#[derive(Default)]
pub struct StaticBackend {
    user: Option<Value>,
    user_error: Option<fn() -> BackendError>,
    rows: Vec<Value>,
    rows_error: Option<fn() -> BackendError>,
    queries: Mutex<Vec<(String, OrderBy)>>,
}

impl StaticBackend {
    pub fn with_user(user: Value) -> Self {
        Self { user: Some(user), ..Self::default() }
    }

    /// `BackendError` is not `Clone`, so errors are produced on each call
    pub fn with_user_error(make: fn() -> BackendError) -> Self {
        Self { user_error: Some(make), ..Self::default() }
    }

    pub fn with_rows(rows: Vec<Value>) -> Self {
        Self { rows, ..Self::default() }
    }

    pub fn with_rows_error(make: fn() -> BackendError) -> Self {
        Self { rows_error: Some(make), ..Self::default() }
    }

    /// Table queries received so far
    pub fn queries(&self) -> Vec<(String, OrderBy)> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl IdentityBackend for StaticBackend {
    async fn current_user(&self, _ctx: &RequestContext) -> Result<Option<Identity>, BackendError> {
        if let Some(make) = self.user_error {
            return Err(make());
        }
        Ok(self.user.clone().map(Identity::new))
    }

    async fn select_all(&self, table: &str, order: &OrderBy) -> Result<Vec<Value>, BackendError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push((table.to_string(), order.clone()));
        }
        if let Some(make) = self.rows_error {
            return Err(make());
        }
        Ok(self.rows.clone())
    }
}
