//! HTML templates
//!
//! View models are rendered with handlebars. Every value is HTML-escaped; the
//! only raw insertion is a page layout wrapping an already rendered body.

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

use super::history::HistoryView;
use super::media::GalleryView;
use super::pulse::PulseView;

/// (name, source, is_partial)
const TEMPLATES: &[(&str, &str, bool)] = &[
    ("layout", include_str!("templates/layout.hbs"), false),
    ("history", include_str!("templates/history.hbs"), false),
    ("pulse", include_str!("templates/pulse.hbs"), false),
    ("media_gallery", include_str!("templates/media_gallery.hbs"), false),
    ("icon", include_str!("templates/icon.hbs"), true),
    ("changeset_row", include_str!("templates/changeset_row.hbs"), true),
    ("change_block", include_str!("templates/change_block.hbs"), true),
    ("backer_card", include_str!("templates/backer_card.hbs"), true),
    ("media_tile", include_str!("templates/media_tile.hbs"), true),
    ("image_placeholder", include_str!("templates/image_placeholder.hbs"), true),
];

/// Errors that can occur while registering or rendering templates
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Page chrome around a rendered fragment
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub title: String,
    pub description: String,
    pub container_class: String,
}

impl Page {
    pub fn history() -> Self {
        Self {
            title: "Recent edits".to_string(),
            description: "Latest changes to areas, climbs and organizations".to_string(),
            container_class: "content-default py-6".to_string(),
        }
    }

    pub fn pulse() -> Self {
        Self {
            title: "Pulse".to_string(),
            description: "Stats and activities".to_string(),
            container_class: "content-default bg-gradient-to-br from-cyan-600 to-sky-400 py-6"
                .to_string(),
        }
    }

    pub fn gallery(uid: &str) -> Self {
        Self {
            title: format!("Photos by {}", uid),
            description: "User uploaded photos".to_string(),
            container_class: "content-default py-6".to_string(),
        }
    }
}

#[derive(Serialize)]
struct LayoutContext<'a> {
    #[serde(flatten)]
    page: &'a Page,
    body: &'a str,
}

/// Compiled template registry
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    /// Compile all templates
    pub fn new() -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();

        for (name, source, is_partial) in TEMPLATES {
            if *is_partial {
                registry.register_partial(name, *source)?;
            } else {
                registry.register_template_string(name, *source)?;
            }
        }

        tracing::debug!(templates = TEMPLATES.len(), "Templates compiled");
        Ok(Self { registry })
    }

    /// Changeset list fragment
    pub fn history(&self, view: &HistoryView) -> Result<String, RenderError> {
        Ok(self.registry.render("history", view)?)
    }

    /// The three pulse panels
    pub fn pulse(&self, view: &PulseView) -> Result<String, RenderError> {
        Ok(self.registry.render("pulse", view)?)
    }

    /// Media tiles, or a placeholder when there are none
    pub fn gallery(&self, view: &GalleryView) -> Result<String, RenderError> {
        Ok(self.registry.render("media_gallery", view)?)
    }

    /// Wrap a rendered fragment in the page layout
    pub fn page(&self, page: &Page, body: &str) -> Result<String, RenderError> {
        Ok(self.registry.render("layout", &LayoutContext { page, body })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Changeset, FinancialReport, MediaWithTags, TagsLeaderboard};
    use crate::render::{present_gallery, present_history, present_pulse, SquarePreviewLoader};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn renderer() -> Renderer {
        Renderer::new().unwrap()
    }

    fn history(changesets: serde_json::Value) -> HistoryView {
        let changesets: Vec<Changeset> = serde_json::from_value(changesets).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        present_history(&changesets, now)
    }

    fn changeset(operation: &str, changes: serde_json::Value) -> serde_json::Value {
        json!({
            "id": "cs-1",
            "createdAt": Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap().timestamp_millis(),
            "editedByUser": "climber42",
            "operation": operation,
            "changes": changes
        })
    }

    #[test]
    fn test_recognized_operation_renders_one_badge_and_icon() {
        let html = renderer()
            .history(&history(json!([changeset("addClimb", json!([]))])))
            .unwrap();

        assert_eq!(html.matches("class=\"badge ").count(), 1);
        assert!(html.contains("Add Climb"));
        assert!(html.contains("rounded-full border border-base-300 p-2 bg-success"));
        assert!(html.contains("about 3 hours ago"));
        assert!(html.contains("href=\"/u/climber42\""));
    }

    #[test]
    fn test_unrecognized_operation_renders_no_badge() {
        let html = renderer()
            .history(&history(json!([changeset("teleportArea", json!([]))])))
            .unwrap();

        assert_eq!(html.matches("class=\"badge ").count(), 0);
        assert!(!html.contains("rounded-full border"));
        assert!(html.contains("data-changeset=\"cs-1\""));
    }

    #[test]
    fn test_change_blocks() {
        let html = renderer()
            .history(&history(json!([changeset(
                "updateArea",
                json!([
                    {
                        "changeId": "c-1",
                        "dbOp": "update",
                        "fullDocument": { "__typename": "Area", "uuid": "a-1", "areaName": "Smith Rock" },
                        "updateDescription": { "updatedFields": ["gradeContext", "_change", "updatedAt"] }
                    },
                    {
                        "changeId": "c-2",
                        "dbOp": "delete",
                        "fullDocument": { "__typename": "Climb", "id": "cl-1", "name": "Gone Climb" }
                    },
                    {
                        "changeId": "c-3",
                        "dbOp": "insert",
                        "fullDocument": { "__typename": "Organization", "displayName": "Local Climbers Coalition" }
                    },
                    {
                        "changeId": "c-4",
                        "dbOp": "insert",
                        "fullDocument": { "__typename": "Photo", "id": "p" }
                    }
                ])
            )])))
            .unwrap();

        assert!(html.contains("<a class=\"link link-hover\" href=\"/crag/a-1\">Smith Rock</a>"));
        assert!(html.contains("<span>Gone Climb</span>"));
        assert!(!html.contains("/climbs/cl-1"));
        assert!(html.contains("<span>Local Climbers Coalition</span>"));
        assert!(html.contains("<div>gradeContext</div>"));
        assert!(!html.contains("<div>_change</div>"));
        assert!(!html.contains("<div>updatedAt</div>"));
        assert!(!html.contains("data-change=\"c-4\""));
        assert_eq!(html.matches("class=\"badge badge-sm").count(), 3);
    }

    #[test]
    fn test_values_are_escaped() {
        let html = renderer()
            .history(&history(json!([changeset(
                "addArea",
                json!([{
                    "changeId": "c-1",
                    "dbOp": "insert",
                    "fullDocument": { "__typename": "Area", "uuid": "a-1", "areaName": "<script>alert(1)</script>" }
                }])
            )])))
            .unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    fn pulse_view() -> PulseView {
        let report: FinancialReport = serde_json::from_value(json!({
            "totalRaised": 1000,
            "donors": [{ "account": { "id": "1", "name": "X", "imageUrl": "u" } }]
        }))
        .unwrap();
        let board: TagsLeaderboard = serde_json::from_value(json!({
            "allTime": {
                "totalMediaWithTags": 321,
                "byUsers": [
                    { "userUuid": "1", "username": "a", "total": 5 },
                    { "userUuid": "2", "username": "b", "total": 3 },
                    { "userUuid": "3", "username": "c", "total": 1 },
                    { "userUuid": "4", "username": "d", "total": 0 },
                    { "userUuid": "5", "username": null, "total": 0 }
                ]
            }
        }))
        .unwrap();
        present_pulse(&report, &board)
    }

    #[test]
    fn test_pulse_panels() {
        let html = renderer().pulse(&pulse_view()).unwrap();

        assert!(html.contains("<div class=\"stat-value\">321</div>"));
        assert_eq!(html.matches("bg-pink-500").count(), 3);
        assert!(html.contains("<a href=\"/u/d\">d</a>"));
        assert!(html.contains(">unknown</div>"));
        assert!(html.contains("we've raised $1000."));
        assert_eq!(html.matches("class=\"backer-card").count(), 1);
        assert!(html.contains(">X</span>"));
    }

    #[test]
    fn test_gallery() {
        let media: Vec<MediaWithTags> = serde_json::from_value(json!([
            { "mediaUrl": "/u/u-1/first.jpg", "entityTags": [] },
            { "mediaUrl": "/u/u-1/second.jpg", "entityTags": [{ "id": "t" }] }
        ]))
        .unwrap();
        let loader = SquarePreviewLoader::new("https://cdn.example.org");

        let html = renderer()
            .gallery(&present_gallery("u-1", &media, true, &loader))
            .unwrap();

        assert!(html.contains("href=\"/p/u-1/first.jpg\""));
        assert!(html.contains("href=\"/p/u-1/second.jpg\""));
        assert_eq!(html.matches("fetchpriority=\"high\"").count(), 1);
        assert_eq!(html.matches("aria-label=\"Remove image\"").count(), 1);
        assert!(!html.contains("image-placeholder"));
    }

    #[test]
    fn test_empty_gallery_shows_placeholder() {
        let loader = SquarePreviewLoader::new("https://cdn.example.org");
        let html = renderer()
            .gallery(&present_gallery("u-1", &[], false, &loader))
            .unwrap();

        assert!(html.contains("image-placeholder"));
    }

    #[test]
    fn test_page_layout() {
        let r = renderer();
        let html = r.page(&Page::pulse(), "<p>body</p>").unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Pulse</title>"));
        assert!(html.contains("<p>body</p>"));
    }
}
