// handlers/public/stories.rs - GET /api/stories handler

use axum::{extract::State, Json};
use serde_json::Value;

use crate::backend::OrderBy;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/stories - every story, most recently published first
///
/// Answers a bare JSON array (`[]` when the table is empty). A failed
/// query answers 500 with `{"error": <backend message>}`.
pub async fn stories_get(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let stories = &state.config.stories;
    let order = OrderBy::desc(stories.order_column.as_str());

    let rows = state.backend.select_all(&stories.table, &order).await?;
    tracing::debug!("listed {} rows from '{}'", rows.len(), stories.table);

    Ok(Json(rows))
}
