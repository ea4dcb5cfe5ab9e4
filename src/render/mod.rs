//! Presentation
//!
//! Maps the read-only data model into view models, then into HTML.
//!
//! ## Layers
//!
//! - **Dispatch**: closed-enum lookups (`operation`, `change`) choose badges,
//!   icons and links for each changeset and change
//! - **View models**: plain serializable records (`history`, `pulse`, `media`)
//!   that the JSON API returns as-is
//! - **Markup**: handlebars templates (`templates`) turn view models into
//!   escaped HTML
//!
//! Values outside the known enumerations never fail a render. They produce an
//! empty fragment and are recorded once in [`Diagnostics`].

pub mod change;
pub mod history;
pub mod icon;
pub mod links;
pub mod media;
pub mod operation;
pub mod pulse;
pub mod templates;
pub mod time;

pub use change::{present_change, visible_fields, ChangeView, EntityName};
pub use history::{present_changeset, present_history, ChangesetRowView, HistoryView};
pub use icon::{Glyph, Icon};
pub use media::{present_gallery, present_media, GalleryView, ImageLoader, MediaTileView, SquarePreviewLoader};
pub use operation::{lookup_operation, ActionIcon, Badge, OperationPresentation};
pub use pulse::{present_pulse, FinancialReportView, LeaderboardRowView, PulseView, TagsSummaryView};
pub use templates::{RenderError, Renderer};
pub use time::format_distance;

use serde::Serialize;

/// A value the presentation layer could not map to any known case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Unrecognized {
    /// `operation` of a changeset outside the known operation kinds
    #[serde(rename_all = "camelCase")]
    Operation { changeset_id: String, value: String },
    /// `dbOp` of a change outside insert/update/delete
    #[serde(rename_all = "camelCase")]
    DbOp { change_id: String, value: String },
    /// `fullDocument` whose discriminator is not Area, Climb or Organization
    #[serde(rename_all = "camelCase")]
    Document { change_id: String },
}

/// Collector for lookup misses during one render pass
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Unrecognized>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lookup miss and emit it as a warning
    pub fn record(&mut self, entry: Unrecognized) {
        match &entry {
            Unrecognized::Operation { changeset_id, value } => {
                tracing::warn!(changeset_id = %changeset_id, operation = %value, "Unrecognized changeset operation");
            }
            Unrecognized::DbOp { change_id, value } => {
                tracing::warn!(change_id = %change_id, db_op = %value, "Unrecognized change dbOp");
            }
            Unrecognized::Document { change_id } => {
                tracing::warn!(change_id = %change_id, "Unrecognized document type");
            }
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Unrecognized] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
