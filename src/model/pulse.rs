//! Pulse page inputs
//!
//! `FinancialReport` comes from the donation platform, `TagsLeaderboard` from
//! the media tagging statistics of the route database.

use serde::{Deserialize, Serialize};

/// Donation summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    pub total_raised: f64,
    #[serde(default)]
    pub donors: Vec<Donor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Donor {
    pub account: Account,
}

/// Public profile of a backer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Tag contribution statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagsLeaderboard {
    pub all_time: AllTimeTags,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllTimeTags {
    pub total_media_with_tags: u64,
    /// Ranked by the upstream service; order is preserved as-is
    #[serde(default)]
    pub by_users: Vec<TagsByUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagsByUser {
    pub user_uuid: String,
    #[serde(default)]
    pub username: Option<String>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaderboard_deserialization() {
        let board: TagsLeaderboard = serde_json::from_value(json!({
            "allTime": {
                "totalMediaWithTags": 42,
                "byUsers": [
                    { "userUuid": "u1", "username": "alex", "total": 30 },
                    { "userUuid": "u2", "username": null, "total": 12 },
                    { "userUuid": "u3", "total": 0 }
                ]
            }
        }))
        .unwrap();

        assert_eq!(board.all_time.total_media_with_tags, 42);
        assert_eq!(board.all_time.by_users.len(), 3);
        assert_eq!(board.all_time.by_users[0].username.as_deref(), Some("alex"));
        assert!(board.all_time.by_users[1].username.is_none());
        assert!(board.all_time.by_users[2].username.is_none());
    }

    #[test]
    fn test_financial_report_deserialization() {
        let report: FinancialReport = serde_json::from_value(json!({
            "totalRaised": 1000,
            "donors": [{ "account": { "id": "1", "name": "X", "imageUrl": "u" } }]
        }))
        .unwrap();

        assert_eq!(report.total_raised, 1000.0);
        assert_eq!(report.donors[0].account.name, "X");
        assert_eq!(report.donors[0].account.image_url.as_deref(), Some("u"));
    }
}
