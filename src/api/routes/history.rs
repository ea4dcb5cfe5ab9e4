//! History Routes
//!
//! - GET /history - Recent change history page
//! - GET /api/v1/history - Recent change history view model

use axum::{extract::State, response::Html, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::render::templates::Page;
use crate::render::{present_history, HistoryView};

async fn load(state: &AppState) -> ApiResult<HistoryView> {
    let changesets = state.history.recent_changes().await?;
    Ok(present_history(&changesets, Utc::now()))
}

/// GET /history
pub async fn history_page(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let view = load(&state).await?;

    let body = state.renderer.history(&view)?;
    let page = state.renderer.page(&Page::history(), &body)?;

    tracing::debug!(rows = view.rows.len(), "Rendered history page");
    Ok(Html(page))
}

/// GET /api/v1/history
///
/// Rows plus the list of values that could not be presented.
pub async fn history_json(State(state): State<Arc<AppState>>) -> ApiResult<Json<HistoryView>> {
    Ok(Json(load(&state).await?))
}
