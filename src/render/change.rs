//! Change blocks
//!
//! One block per document-level change, chosen by the document discriminator.
//! Area and climb names link to their detail pages unless the change deleted
//! them; organizations have no detail page and are never linked.

use serde::Serialize;

use super::icon::{Glyph, Icon};
use super::links;
use super::operation::Badge;
use super::{Diagnostics, Unrecognized};
use crate::model::{Change, DbOp, Document, DocumentKind, Enumerated};

/// Field name prefixes that are bookkeeping, not user edits
const HIDDEN_FIELD_PREFIXES: [&str; 2] = ["_change", "updatedAt"];

/// Display name of the changed document, optionally linked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityName {
    pub text: String,
    pub href: Option<String>,
}

impl EntityName {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            href: None,
        }
    }

    fn linked(text: &str, href: String) -> Self {
        Self {
            text: text.to_string(),
            href: Some(href),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeView {
    pub change_id: String,
    pub kind: DocumentKind,
    pub badge: Badge,
    pub icon: Option<Icon>,
    pub name: EntityName,
    pub updated_fields: Option<Vec<String>>,
}

/// Mutation icon for a known dbOp
pub fn db_op_icon(op: DbOp) -> Icon {
    match op {
        DbOp::Insert => Icon::new(Glyph::PlusCircle, "w-4 h-4 stroke-base-300"),
        DbOp::Update => Icon::new(Glyph::PencilSquare, "w-4 h-4 stroke-base-300"),
        DbOp::Delete => Icon::new(Glyph::MinusCircle, "w-4 h-4 fill-error"),
    }
}

fn kind_badge(kind: DocumentKind) -> Badge {
    let class = match kind {
        DocumentKind::Climb => "badge-info",
        DocumentKind::Area | DocumentKind::Organization => "badge-warning",
    };
    Badge {
        label: kind.label(),
        class,
    }
}

/// Present one change, or `None` when its document type is unknown
pub fn present_change(change: &Change, diagnostics: &mut Diagnostics) -> Option<ChangeView> {
    let deleted = matches!(change.db_op, Enumerated::Known(DbOp::Delete));

    let (kind, name) = match &change.full_document {
        Document::Area(area) => {
            let name = if deleted {
                EntityName::plain(&area.area_name)
            } else {
                EntityName::linked(&area.area_name, links::area_path(&area.uuid))
            };
            (DocumentKind::Area, name)
        }
        Document::Climb(climb) => {
            let name = if deleted {
                EntityName::plain(&climb.name)
            } else {
                EntityName::linked(&climb.name, links::climb_path(&climb.id))
            };
            (DocumentKind::Climb, name)
        }
        Document::Organization(org) => (
            DocumentKind::Organization,
            EntityName::plain(&org.display_name),
        ),
        Document::Unknown => {
            diagnostics.record(Unrecognized::Document {
                change_id: change.change_id.clone(),
            });
            return None;
        }
    };

    let icon = match &change.db_op {
        Enumerated::Known(op) => Some(db_op_icon(*op)),
        Enumerated::Unrecognized(value) => {
            diagnostics.record(Unrecognized::DbOp {
                change_id: change.change_id.clone(),
                value: value.clone(),
            });
            None
        }
    };

    Some(ChangeView {
        change_id: change.change_id.clone(),
        kind,
        badge: kind_badge(kind),
        icon,
        name,
        updated_fields: visible_fields(change.updated_fields()),
    })
}

/// Updated field names worth showing, in input order
pub fn visible_fields(fields: Option<&[String]>) -> Option<Vec<String>> {
    fields.map(|fields| {
        fields
            .iter()
            .filter(|field| {
                !HIDDEN_FIELD_PREFIXES
                    .iter()
                    .any(|prefix| field.starts_with(prefix))
            })
            .cloned()
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AreaDoc, ClimbDoc, OrganizationDoc, UpdateDescription};

    fn change(db_op: &str, doc: Document) -> Change {
        Change {
            change_id: "c-1".to_string(),
            db_op: serde_json::from_value(serde_json::json!(db_op)).unwrap(),
            full_document: doc,
            update_description: None,
        }
    }

    fn area() -> Document {
        Document::Area(AreaDoc {
            uuid: "a-1".to_string(),
            area_name: "Red River Gorge".to_string(),
        })
    }

    fn climb() -> Document {
        Document::Climb(ClimbDoc {
            id: "cl-7".to_string(),
            name: "Pure Imagination".to_string(),
        })
    }

    fn org() -> Document {
        Document::Organization(OrganizationDoc {
            org_id: None,
            display_name: "Access Fund".to_string(),
        })
    }

    #[test]
    fn test_area_links_unless_deleted() {
        let mut diagnostics = Diagnostics::new();

        for op in ["insert", "update"] {
            let view = present_change(&change(op, area()), &mut diagnostics).unwrap();
            assert_eq!(view.kind, DocumentKind::Area);
            assert_eq!(view.badge.label, "Area");
            assert_eq!(view.name.href.as_deref(), Some("/crag/a-1"));
        }

        let view = present_change(&change("delete", area()), &mut diagnostics).unwrap();
        assert_eq!(view.name.text, "Red River Gorge");
        assert!(view.name.href.is_none());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_climb_links_unless_deleted() {
        let mut diagnostics = Diagnostics::new();

        for op in ["insert", "update"] {
            let view = present_change(&change(op, climb()), &mut diagnostics).unwrap();
            assert_eq!(view.badge, Badge { label: "Climb", class: "badge-info" });
            assert_eq!(view.name.href.as_deref(), Some("/climbs/cl-7"));
        }

        let view = present_change(&change("delete", climb()), &mut diagnostics).unwrap();
        assert!(view.name.href.is_none());
    }

    #[test]
    fn test_organization_never_links() {
        let mut diagnostics = Diagnostics::new();

        for op in ["insert", "update", "delete"] {
            let view = present_change(&change(op, org()), &mut diagnostics).unwrap();
            assert_eq!(view.badge.label, "Organization");
            assert_eq!(view.name, EntityName::plain("Access Fund"));
        }
    }

    #[test]
    fn test_db_op_icons() {
        let mut diagnostics = Diagnostics::new();

        let icon = |op: &str, diagnostics: &mut Diagnostics| {
            present_change(&change(op, area()), diagnostics)
                .unwrap()
                .icon
                .map(|i| i.glyph)
        };

        assert_eq!(icon("insert", &mut diagnostics), Some(Glyph::PlusCircle));
        assert_eq!(icon("update", &mut diagnostics), Some(Glyph::PencilSquare));
        assert_eq!(icon("delete", &mut diagnostics), Some(Glyph::MinusCircle));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unrecognized_db_op_drops_icon_only() {
        let mut diagnostics = Diagnostics::new();

        let view = present_change(&change("upsert", area()), &mut diagnostics).unwrap();

        assert!(view.icon.is_none());
        assert_eq!(view.name.href.as_deref(), Some("/crag/a-1"));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_unknown_document_renders_nothing() {
        let mut diagnostics = Diagnostics::new();

        assert!(present_change(&change("update", Document::Unknown), &mut diagnostics).is_none());
        assert_eq!(
            diagnostics.entries(),
            &[Unrecognized::Document {
                change_id: "c-1".to_string()
            }]
        );
    }

    #[test]
    fn test_updated_fields_are_filtered_in_order() {
        let mut c = change("update", area());
        c.update_description = Some(UpdateDescription {
            updated_fields: Some(vec![
                "content.description".to_string(),
                "_change".to_string(),
                "updatedAt".to_string(),
                "_changeId".to_string(),
                "updatedAtEpoch".to_string(),
                "metadata.lat".to_string(),
                "areaName".to_string(),
            ]),
        });

        let view = present_change(&c, &mut Diagnostics::new()).unwrap();

        assert_eq!(
            view.updated_fields,
            Some(vec![
                "content.description".to_string(),
                "metadata.lat".to_string(),
                "areaName".to_string(),
            ])
        );
    }

    #[test]
    fn test_visible_fields_absent() {
        let empty: Vec<String> = Vec::new();

        assert_eq!(visible_fields(None), None);
        assert_eq!(visible_fields(Some(empty.as_slice())), Some(vec![]));
    }
}
