//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::MediaWithTags;
use crate::render::PulseView;

// ============================================
// RENDER DTOs
// ============================================

/// Media gallery render request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderMediaRequest {
    /// Owner of the media
    pub uid: String,
    /// Whether the viewer may remove untagged media; decided by the caller
    #[serde(default)]
    pub is_authorized: bool,
    /// Media in display order
    #[serde(default)]
    pub media: Vec<MediaWithTags>,
}

// ============================================
// PULSE DTOs
// ============================================

/// Pulse view model with snapshot metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseResponse {
    /// When the upstream reads completed
    pub fetched_at: DateTime<Utc>,
    /// Revalidation window in seconds
    pub revalidate_secs: u64,
    #[serde(flatten)]
    pub view: PulseView,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// "warm" once a pulse snapshot has been fetched, else "cold"
    pub pulse: String,
    pub uptime_seconds: u64,
    pub version: String,
}
