//! Operation badges
//!
//! Static table from changeset operation to the badge and action icon shown in
//! the changeset header.

use serde::Serialize;

use super::icon::{Glyph, Icon};
use super::{Diagnostics, Unrecognized};
use crate::model::{Enumerated, OperationKind};

/// Small coloured label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: &'static str,
    pub class: &'static str,
}

/// Icon inside a round, optionally tinted, frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionIcon {
    pub icon: Icon,
    pub background: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperationPresentation {
    pub badge: Badge,
    pub icon: ActionIcon,
}

const STROKE: &str = "w-6 h-6 stroke-base-300";
const STROKE_BOLD: &str = "w-6 h-6 stroke-base-300 stroke-2";

fn entry(
    label: &'static str,
    badge_class: &'static str,
    glyph: Glyph,
    icon_class: &'static str,
    background: Option<&'static str>,
) -> OperationPresentation {
    OperationPresentation {
        badge: Badge {
            label,
            class: badge_class,
        },
        icon: ActionIcon {
            icon: Icon::new(glyph, icon_class),
            background,
        },
    }
}

/// Presentation for a known operation kind
pub fn presentation(op: OperationKind) -> OperationPresentation {
    use OperationKind::*;

    match op {
        AddArea => entry("Add Area", "badge-warning", Glyph::Plus, STROKE_BOLD, Some("bg-success")),
        UpdateArea => entry("Update Area", "badge-warning", Glyph::Pencil, STROKE, None),
        AddCountry => entry("Add Country", "badge-primary", Glyph::Plus, STROKE, None),
        DeleteArea => entry("Delete Area", "badge-warning", Glyph::Minus, STROKE, Some("bg-error")),
        UpdateDestination => entry("Area", "badge-warning", Glyph::Pencil, STROKE, None),
        AddClimb => entry("Add Climb", "badge-info", Glyph::Plus, STROKE_BOLD, Some("bg-success")),
        DeleteClimb => entry("Delete Climb", "badge-info", Glyph::Pencil, STROKE, Some("bg-error")),
        UpdateClimb => entry("Update Climb", "badge-info", Glyph::Pencil, STROKE, None),
        AddOrganization => entry(
            "Add Organization",
            "badge-warning",
            Glyph::Plus,
            STROKE_BOLD,
            Some("bg-success"),
        ),
        UpdateOrganization => entry("Update Organization", "badge-warning", Glyph::Pencil, STROKE, None),
        DeleteOrganization => entry(
            "Delete Organization",
            "badge-warning",
            Glyph::Minus,
            STROKE,
            Some("bg-error"),
        ),
    }
}

/// Resolve the header presentation of a changeset
///
/// An unrecognized operation yields `None` and one diagnostic entry.
pub fn lookup_operation(
    op: &Enumerated<OperationKind>,
    changeset_id: &str,
    diagnostics: &mut Diagnostics,
) -> Option<OperationPresentation> {
    match op {
        Enumerated::Known(kind) => Some(presentation(*kind)),
        Enumerated::Unrecognized(value) => {
            diagnostics.record(Unrecognized::Operation {
                changeset_id: changeset_id.to_string(),
                value: value.clone(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_operation_has_a_badge() {
        for op in OperationKind::all() {
            let p = presentation(*op);
            assert!(!p.badge.label.is_empty(), "{} has no label", op);
            assert!(p.badge.class.starts_with("badge-"));
        }
    }

    #[test]
    fn test_table_entries() {
        let add = presentation(OperationKind::AddArea);
        assert_eq!(add.badge.label, "Add Area");
        assert_eq!(add.icon.icon.glyph, Glyph::Plus);
        assert_eq!(add.icon.background, Some("bg-success"));

        let dest = presentation(OperationKind::UpdateDestination);
        assert_eq!(dest.badge.label, "Area");

        let country = presentation(OperationKind::AddCountry);
        assert_eq!(country.badge.class, "badge-primary");
        assert_eq!(country.icon.background, None);

        let del_climb = presentation(OperationKind::DeleteClimb);
        assert_eq!(del_climb.icon.icon.glyph, Glyph::Pencil);
        assert_eq!(del_climb.icon.background, Some("bg-error"));

        let del_org = presentation(OperationKind::DeleteOrganization);
        assert_eq!(del_org.icon.icon.glyph, Glyph::Minus);
    }

    #[test]
    fn test_lookup_known() {
        let mut diagnostics = Diagnostics::new();
        let p = lookup_operation(
            &Enumerated::Known(OperationKind::UpdateClimb),
            "cs-1",
            &mut diagnostics,
        );

        assert_eq!(p.map(|p| p.badge.label), Some("Update Climb"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_lookup_unrecognized() {
        let mut diagnostics = Diagnostics::new();
        let p = lookup_operation(
            &Enumerated::Unrecognized("mergeAreas".to_string()),
            "cs-9",
            &mut diagnostics,
        );

        assert!(p.is_none());
        assert_eq!(
            diagnostics.entries(),
            &[Unrecognized::Operation {
                changeset_id: "cs-9".to_string(),
                value: "mergeAreas".to_string(),
            }]
        );
    }
}
