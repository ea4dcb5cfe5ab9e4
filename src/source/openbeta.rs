//! Route database API client
//!
//! Fetches the recent change history and the tags leaderboard.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::graphql::{GraphQlClient, GraphQlConfig};
use super::{HistorySource, LeaderboardSource, SourceError};
use crate::model::{Changeset, TagsLeaderboard};

const CHANGE_HISTORY_QUERY: &str = r#"
query RecentChangeHistory($filter: AllHistoryFilter) {
  getChangeHistory(filter: $filter) {
    id
    createdAt
    editedByUser
    operation
    changes {
      changeId
      dbOp
      updateDescription {
        updatedFields
      }
      fullDocument {
        __typename
        ... on Area {
          uuid
          areaName
        }
        ... on Climb {
          id
          name
        }
        ... on Organization {
          orgId
          displayName
        }
      }
    }
  }
}
"#;

const TAGS_LEADERBOARD_QUERY: &str = r#"
query TagsLeaderboard($limit: Int) {
  getTagsLeaderboard(limit: $limit) {
    allTime {
      totalMediaWithTags
      byUsers {
        userUuid
        username
        total
      }
    }
  }
}
"#;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangeHistoryData {
    #[serde(default)]
    get_change_history: Vec<Changeset>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagsLeaderboardData {
    get_tags_leaderboard: TagsLeaderboard,
}

pub struct OpenBetaClient {
    graphql: GraphQlClient,
    leaderboard_limit: u32,
}

impl OpenBetaClient {
    pub fn new(config: GraphQlConfig, leaderboard_limit: u32) -> Result<Self, SourceError> {
        Ok(Self {
            graphql: GraphQlClient::new(config)?,
            leaderboard_limit,
        })
    }
}

#[async_trait]
impl HistorySource for OpenBetaClient {
    async fn recent_changes(&self) -> Result<Vec<Changeset>, SourceError> {
        let data: ChangeHistoryData = self
            .graphql
            .query(CHANGE_HISTORY_QUERY, json!({ "filter": {} }))
            .await?;

        tracing::debug!(changesets = data.get_change_history.len(), "Fetched change history");
        Ok(data.get_change_history)
    }
}

#[async_trait]
impl LeaderboardSource for OpenBetaClient {
    async fn tags_leaderboard(&self) -> Result<TagsLeaderboard, SourceError> {
        let data: TagsLeaderboardData = self
            .graphql
            .query(TAGS_LEADERBOARD_QUERY, json!({ "limit": self.leaderboard_limit }))
            .await?;

        tracing::debug!(
            users = data.get_tags_leaderboard.all_time.by_users.len(),
            "Fetched tags leaderboard"
        );
        Ok(data.get_tags_leaderboard)
    }
}
