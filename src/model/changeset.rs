//! Change history types
//!
//! A `Changeset` is one edit event attributed to one user at one time. It
//! bundles one or more `Change`s, each a document-level mutation of an area,
//! climb or organization.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One edit event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Changeset {
    pub id: String,
    /// Creation time, accepted as epoch milliseconds or RFC 3339
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Identifier of the editor, used to build the profile link
    pub edited_by_user: String,
    pub operation: Enumerated<OperationKind>,
    #[serde(default)]
    pub changes: Vec<Change>,
}

/// One document-level mutation within a changeset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub change_id: String,
    pub db_op: Enumerated<DbOp>,
    pub full_document: Document,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_description: Option<UpdateDescription>,
}

impl Change {
    /// Field names touched by an update, if the upstream reported any
    pub fn updated_fields(&self) -> Option<&[String]> {
        self.update_description
            .as_ref()
            .and_then(|d| d.updated_fields.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_fields: Option<Vec<String>>,
}

/// The document a change applies to, discriminated by `__typename`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "__typename")]
pub enum Document {
    Area(AreaDoc),
    Climb(ClimbDoc),
    Organization(OrganizationDoc),
    /// Any discriminator this layer does not know how to present
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AreaDoc {
    pub uuid: String,
    pub area_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClimbDoc {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    pub display_name: String,
}

/// Known document variants
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Area,
    Climb,
    Organization,
}

impl DocumentKind {
    /// Badge label shown next to the document name
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Area => "Area",
            DocumentKind::Climb => "Climb",
            DocumentKind::Organization => "Organization",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mutation kind applied to a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbOp {
    Insert,
    Update,
    Delete,
}

impl DbOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbOp::Insert => "insert",
            DbOp::Update => "update",
            DbOp::Delete => "delete",
        }
    }
}

impl FromStr for DbOp {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insert" => Ok(DbOp::Insert),
            "update" => Ok(DbOp::Update),
            "delete" => Ok(DbOp::Delete),
            _ => Err(()),
        }
    }
}

impl fmt::Display for DbOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation recorded on a changeset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    AddArea,
    UpdateArea,
    AddCountry,
    DeleteArea,
    UpdateDestination,
    AddClimb,
    DeleteClimb,
    UpdateClimb,
    AddOrganization,
    UpdateOrganization,
    DeleteOrganization,
}

impl OperationKind {
    /// Get all operation kinds for iteration
    pub fn all() -> &'static [OperationKind] {
        &[
            OperationKind::AddArea,
            OperationKind::UpdateArea,
            OperationKind::AddCountry,
            OperationKind::DeleteArea,
            OperationKind::UpdateDestination,
            OperationKind::AddClimb,
            OperationKind::DeleteClimb,
            OperationKind::UpdateClimb,
            OperationKind::AddOrganization,
            OperationKind::UpdateOrganization,
            OperationKind::DeleteOrganization,
        ]
    }

    /// Wire name as sent by the history service
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::AddArea => "addArea",
            OperationKind::UpdateArea => "updateArea",
            OperationKind::AddCountry => "addCountry",
            OperationKind::DeleteArea => "deleteArea",
            OperationKind::UpdateDestination => "updateDestination",
            OperationKind::AddClimb => "addClimb",
            OperationKind::DeleteClimb => "deleteClimb",
            OperationKind::UpdateClimb => "updateClimb",
            OperationKind::AddOrganization => "addOrganization",
            OperationKind::UpdateOrganization => "updateOrganization",
            OperationKind::DeleteOrganization => "deleteOrganization",
        }
    }
}

impl FromStr for OperationKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationKind::all()
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wire enumeration that may carry a value outside the known set
///
/// Deserialization never fails on an unknown string; the raw value is kept
/// so presentation can report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enumerated<K> {
    Known(K),
    Unrecognized(String),
}

impl<K: Copy> Enumerated<K> {
    pub fn known(&self) -> Option<K> {
        match self {
            Enumerated::Known(k) => Some(*k),
            Enumerated::Unrecognized(_) => None,
        }
    }
}

impl<K> From<K> for Enumerated<K> {
    fn from(value: K) -> Self {
        Enumerated::Known(value)
    }
}

impl<K: fmt::Display> fmt::Display for Enumerated<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Enumerated::Known(k) => k.fmt(f),
            Enumerated::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

impl<'de, K: FromStr> Deserialize<'de> for Enumerated<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.parse::<K>() {
            Ok(k) => Enumerated::Known(k),
            Err(_) => Enumerated::Unrecognized(raw),
        })
    }
}

impl<K: fmt::Display> Serialize for Enumerated<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// `createdAt` arrives as epoch milliseconds from the GraphQL date scalar, or as
/// an RFC 3339 string from exported fixtures.
mod timestamp {
    use super::*;
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Float(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.timestamp_millis())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Millis(ms) => Utc
                .timestamp_millis_opt(ms)
                .single()
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", ms))),
            Raw::Float(ms) => Utc
                .timestamp_millis_opt(ms as i64)
                .single()
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", ms))),
            Raw::Text(text) => {
                if let Ok(ms) = text.parse::<i64>() {
                    return Utc
                        .timestamp_millis_opt(ms)
                        .single()
                        .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", ms)));
                }
                DateTime::parse_from_rfc3339(&text)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| D::Error::custom(format!("invalid timestamp '{}': {}", text, e)))
            }
        }
    }
}
