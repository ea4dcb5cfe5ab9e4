//! Pulse Routes
//!
//! - GET /pulse - Statistics page
//! - GET /api/v1/pulse - Statistics view model

use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

use crate::api::dto::PulseResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::render::templates::Page;

/// GET /pulse
pub async fn pulse_page(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let snapshot = state.pulse.get().await?;

    let body = state.renderer.pulse(&snapshot.view())?;
    Ok(Html(state.renderer.page(&Page::pulse(), &body)?))
}

/// GET /api/v1/pulse
pub async fn pulse_json(State(state): State<Arc<AppState>>) -> ApiResult<Json<PulseResponse>> {
    let snapshot = state.pulse.get().await?;

    Ok(Json(PulseResponse {
        fetched_at: snapshot.fetched_at,
        revalidate_secs: state.pulse.revalidate_window().as_secs(),
        view: snapshot.view(),
    }))
}
