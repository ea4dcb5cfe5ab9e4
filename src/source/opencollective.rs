//! Donation platform API client
//!
//! Reads the collective's total received amount and its backers, and reshapes
//! them into a [`FinancialReport`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::graphql::{GraphQlClient, GraphQlConfig};
use super::{FinancialSource, SourceError};
use crate::model::{Account, Donor, FinancialReport};

const SUMMARY_REPORT_QUERY: &str = r#"
query SummaryReport($slug: String) {
  account(slug: $slug) {
    stats {
      totalAmountReceived {
        value
      }
    }
    members(role: BACKER, limit: 200) {
      nodes {
        account {
          id
          name
          imageUrl
        }
      }
    }
  }
}
"#;

#[derive(Deserialize)]
struct SummaryData {
    account: Option<CollectiveAccount>,
}

#[derive(Deserialize)]
struct CollectiveAccount {
    stats: Stats,
    members: Members,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Stats {
    total_amount_received: Amount,
}

#[derive(Deserialize)]
struct Amount {
    value: f64,
}

#[derive(Deserialize)]
struct Members {
    #[serde(default)]
    nodes: Vec<Member>,
}

#[derive(Deserialize)]
struct Member {
    account: Account,
}

impl SummaryData {
    fn into_report(self, slug: &str) -> Result<FinancialReport, SourceError> {
        let account = self
            .account
            .ok_or_else(|| SourceError::Decode(format!("collective '{}' not found", slug)))?;

        Ok(FinancialReport {
            total_raised: account.stats.total_amount_received.value,
            donors: account
                .members
                .nodes
                .into_iter()
                .map(|m| Donor { account: m.account })
                .collect(),
        })
    }
}

pub struct OpenCollectiveClient {
    graphql: GraphQlClient,
    slug: String,
}

impl OpenCollectiveClient {
    pub fn new(config: GraphQlConfig, slug: impl Into<String>) -> Result<Self, SourceError> {
        Ok(Self {
            graphql: GraphQlClient::new(config)?,
            slug: slug.into(),
        })
    }
}

#[async_trait]
impl FinancialSource for OpenCollectiveClient {
    async fn summary_report(&self) -> Result<FinancialReport, SourceError> {
        let data: SummaryData = self
            .graphql
            .query(SUMMARY_REPORT_QUERY, json!({ "slug": self.slug }))
            .await?;

        let report = data.into_report(&self.slug)?;
        tracing::debug!(donors = report.donors.len(), "Fetched financial summary");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_reshaping() {
        let data: SummaryData = serde_json::from_value(json!({
            "account": {
                "stats": { "totalAmountReceived": { "value": 2500.75 } },
                "members": { "nodes": [
                    { "account": { "id": "a1", "name": "Alice", "imageUrl": "https://img/a.png" } },
                    { "account": { "id": "b2", "name": "Bob", "imageUrl": null } }
                ] }
            }
        }))
        .unwrap();

        let report = data.into_report("crags").unwrap();

        assert_eq!(report.total_raised, 2500.75);
        assert_eq!(report.donors.len(), 2);
        assert_eq!(report.donors[1].account.name, "Bob");
        assert!(report.donors[1].account.image_url.is_none());
    }

    #[test]
    fn test_missing_collective() {
        let data: SummaryData = serde_json::from_value(json!({ "account": null })).unwrap();
        assert!(matches!(data.into_report("nope"), Err(SourceError::Decode(_))));
    }
}
