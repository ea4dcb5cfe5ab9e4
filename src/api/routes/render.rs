//! Render Routes
//!
//! Render caller-supplied data into HTML fragments, for front ends that fetch
//! their own data.
//!
//! - POST /api/v1/render/history - Changesets to changeset rows
//! - POST /api/v1/render/media - User media to gallery tiles

use axum::{extract::State, response::Html, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::RenderMediaRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::model::Changeset;
use crate::render::{present_gallery, present_history};

/// POST /api/v1/render/history
pub async fn render_history(
    State(state): State<Arc<AppState>>,
    Json(changesets): Json<Vec<Changeset>>,
) -> ApiResult<Html<String>> {
    let view = present_history(&changesets, Utc::now());
    Ok(Html(state.renderer.history(&view)?))
}

/// POST /api/v1/render/media
pub async fn render_media(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenderMediaRequest>,
) -> ApiResult<Html<String>> {
    if req.uid.trim().is_empty() {
        return Err(ApiError::Validation("uid must not be empty".to_string()));
    }

    let view = present_gallery(&req.uid, &req.media, req.is_authorized, state.images.as_ref());
    Ok(Html(state.renderer.gallery(&view)?))
}
