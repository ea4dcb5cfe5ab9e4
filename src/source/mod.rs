//! Upstream data sources
//!
//! The presentation layer only consumes data. These traits are the seams to
//! the services that own it:
//! - [`HistorySource`]: recent changesets (route database API)
//! - [`LeaderboardSource`]: tag contribution statistics (route database API)
//! - [`FinancialSource`]: donation summary (donation platform API)
//!
//! GraphQL implementations live in `openbeta` and `opencollective`;
//! [`StaticSource`] serves fixed values for tests and offline previews.

mod graphql;
mod openbeta;
mod opencollective;

pub use graphql::{GraphQlClient, GraphQlConfig};
pub use openbeta::OpenBetaClient;
pub use opencollective::OpenCollectiveClient;

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::model::{Changeset, FinancialReport, TagsLeaderboard};

#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Most recent changesets, newest first as ordered by the service
    async fn recent_changes(&self) -> Result<Vec<Changeset>, SourceError>;
}

#[async_trait]
pub trait LeaderboardSource: Send + Sync {
    async fn tags_leaderboard(&self) -> Result<TagsLeaderboard, SourceError>;
}

#[async_trait]
pub trait FinancialSource: Send + Sync {
    async fn summary_report(&self) -> Result<FinancialReport, SourceError>;
}

/// Errors that can occur when talking to an upstream service
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Fixture error: {0}")]
    Fixture(String),
}

impl SourceError {
    /// Worth retrying: the request may succeed unchanged
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Unavailable(_) | SourceError::Timeout => true,
            SourceError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// In-memory source returning the same values on every call
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub history: Vec<Changeset>,
    pub leaderboard: Option<TagsLeaderboard>,
    pub report: Option<FinancialReport>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the change history
    pub fn history(mut self, history: Vec<Changeset>) -> Self {
        self.history = history;
        self
    }

    /// Builder method: set the tags leaderboard
    pub fn leaderboard(mut self, leaderboard: TagsLeaderboard) -> Self {
        self.leaderboard = Some(leaderboard);
        self
    }

    /// Builder method: set the financial report
    pub fn report(mut self, report: FinancialReport) -> Self {
        self.report = Some(report);
        self
    }

    /// Load fixtures from a directory holding any of `history.json`,
    /// `leaderboard.json` and `report.json`
    pub fn from_dir(dir: &Path) -> Result<Self, SourceError> {
        fn read<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, SourceError> {
            if !path.exists() {
                return Ok(None);
            }
            let content = std::fs::read_to_string(path)
                .map_err(|e| SourceError::Fixture(format!("{:?}: {}", path, e)))?;
            serde_json::from_str(&content)
                .map(Some)
                .map_err(|e| SourceError::Fixture(format!("{:?}: {}", path, e)))
        }

        Ok(Self {
            history: read(&dir.join("history.json"))?.unwrap_or_default(),
            leaderboard: read(&dir.join("leaderboard.json"))?,
            report: read(&dir.join("report.json"))?,
        })
    }
}

#[async_trait]
impl HistorySource for StaticSource {
    async fn recent_changes(&self) -> Result<Vec<Changeset>, SourceError> {
        Ok(self.history.clone())
    }
}

#[async_trait]
impl LeaderboardSource for StaticSource {
    async fn tags_leaderboard(&self) -> Result<TagsLeaderboard, SourceError> {
        self.leaderboard
            .clone()
            .ok_or_else(|| SourceError::Fixture("no leaderboard fixture".to_string()))
    }
}

#[async_trait]
impl FinancialSource for StaticSource {
    async fn summary_report(&self) -> Result<FinancialReport, SourceError> {
        self.report
            .clone()
            .ok_or_else(|| SourceError::Fixture("no financial report fixture".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_transient_errors() {
        assert!(SourceError::Timeout.is_transient());
        assert!(SourceError::Http { status: 503, message: String::new() }.is_transient());
        assert!(SourceError::Http { status: 429, message: String::new() }.is_transient());
        assert!(!SourceError::Http { status: 400, message: String::new() }.is_transient());
        assert!(!SourceError::GraphQl("bad".to_string()).is_transient());
    }

    #[tokio::test]
    async fn test_static_source_missing_fixture() {
        let source = StaticSource::new();

        assert!(source.recent_changes().await.unwrap().is_empty());
        assert!(matches!(source.tags_leaderboard().await, Err(SourceError::Fixture(_))));
        assert!(matches!(source.summary_report().await, Err(SourceError::Fixture(_))));
    }

    #[tokio::test]
    async fn test_static_source_from_dir() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("report.json"),
            r#"{"totalRaised": 12.5, "donors": []}"#,
        )
        .unwrap();

        let source = StaticSource::from_dir(dir.path()).unwrap();

        assert_eq!(source.summary_report().await.unwrap().total_raised, 12.5);
        assert!(source.leaderboard.is_none());
        assert!(source.history.is_empty());
    }

    #[test]
    fn test_static_source_bad_fixture() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("history.json"), "not json").unwrap();

        assert!(matches!(StaticSource::from_dir(dir.path()), Err(SourceError::Fixture(_))));
    }
}
