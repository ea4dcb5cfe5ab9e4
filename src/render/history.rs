//! Recent change history
//!
//! One row per changeset in input order, each with its operation badge, a
//! relative timestamp, the editor's profile link and its change blocks.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::change::{present_change, ChangeView};
use super::icon::{Glyph, Icon};
use super::links;
use super::operation::{lookup_operation, OperationPresentation};
use super::time::format_distance;
use super::Diagnostics;
use crate::model::Changeset;

/// One changeset row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangesetRowView {
    pub id: String,
    pub operation: Option<OperationPresentation>,
    pub created_at: DateTime<Utc>,
    /// e.g. "about 3 hours ago"
    pub created_label: String,
    pub editor: String,
    pub editor_href: String,
    pub editor_icon: Icon,
    pub changes: Vec<ChangeView>,
}

/// The whole history list plus whatever could not be presented
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryView {
    pub rows: Vec<ChangesetRowView>,
    pub diagnostics: Diagnostics,
}

/// Present one changeset relative to `now`
pub fn present_changeset(
    changeset: &Changeset,
    now: DateTime<Utc>,
    diagnostics: &mut Diagnostics,
) -> ChangesetRowView {
    let operation = lookup_operation(&changeset.operation, &changeset.id, diagnostics);

    let changes = changeset
        .changes
        .iter()
        .filter_map(|change| present_change(change, diagnostics))
        .collect();

    ChangesetRowView {
        id: changeset.id.clone(),
        operation,
        created_at: changeset.created_at,
        created_label: format_distance(changeset.created_at, now),
        editor: changeset.edited_by_user.clone(),
        editor_href: links::profile_path(&changeset.edited_by_user),
        editor_icon: Icon::new(Glyph::UserCircle, "w-6 h-6"),
        changes,
    }
}

/// Present an ordered history; rows keep the input order
pub fn present_history(history: &[Changeset], now: DateTime<Utc>) -> HistoryView {
    let mut diagnostics = Diagnostics::new();

    let rows = history
        .iter()
        .map(|changeset| present_changeset(changeset, now, &mut diagnostics))
        .collect();

    if !diagnostics.is_empty() {
        tracing::debug!(
            changesets = history.len(),
            unrecognized = diagnostics.len(),
            "History rendered with unrecognized values"
        );
    }

    HistoryView { rows, diagnostics }
}
