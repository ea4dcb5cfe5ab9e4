//! User media types

use serde::{Deserialize, Serialize};

/// A user uploaded photo together with the entities tagged in it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaWithTags {
    pub media_url: String,
    #[serde(default)]
    pub entity_tags: Vec<EntityTag>,
}

/// A climb or area tagged in a photo
///
/// Only the presence of tags matters for presentation, so the fields are loose.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntityTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climb_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_name: Option<String>,
}
