// handlers/public/debug.rs - GET /api/_debug/env handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

/// Which backend settings are present. Never carries their values.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvFlags {
    pub has_url: bool,
    pub has_anon: bool,
    pub has_service: bool,
    pub node_env: &'static str,
}

pub async fn debug_env(State(state): State<AppState>) -> Json<EnvFlags> {
    let backend = &state.config.backend;
    let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());

    Json(EnvFlags {
        has_url: present(&backend.url),
        has_anon: present(&backend.anon_key),
        has_service: present(&backend.service_role_key),
        node_env: state.config.environment.as_str(),
    })
}
