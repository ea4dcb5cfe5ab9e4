//! Data model
//!
//! Read-only inputs supplied by the upstream GraphQL services:
//! - `Changeset` / `Change` / `Document`: the edit history of areas, climbs and organizations
//! - `FinancialReport` / `TagsLeaderboard`: the pulse page statistics
//! - `MediaWithTags`: user uploaded media
//!
//! Nothing in this layer mutates these values. Enumerated fields that come from
//! the wire (`operation`, `dbOp`) are kept as [`Enumerated`] so unknown values
//! survive deserialization and degrade at presentation time instead.

mod changeset;
mod media;
mod pulse;

pub use changeset::{
    AreaDoc, Change, Changeset, ClimbDoc, DbOp, Document, DocumentKind, Enumerated,
    OperationKind, OrganizationDoc, UpdateDescription,
};
pub use media::{EntityTag, MediaWithTags};
pub use pulse::{
    Account, AllTimeTags, Donor, FinancialReport, TagsByUser, TagsLeaderboard,
};
