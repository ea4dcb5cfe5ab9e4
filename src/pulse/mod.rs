//! Pulse snapshot cache
//!
//! The pulse page is regenerated from a snapshot of two upstream reads: the
//! donation summary and the tags leaderboard. Both are fetched concurrently
//! and must both succeed before a snapshot is stored.
//!
//! ## Revalidation
//!
//! Stale-while-revalidate with a fixed window (60 seconds by default):
//! - no snapshot yet: fetch inline and wait; concurrent first requests share
//!   one fetch
//! - snapshot younger than the window: serve it
//! - snapshot older than the window: serve it and start one background refresh
//!
//! A failed background refresh keeps the previous snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

use crate::model::{FinancialReport, TagsLeaderboard};
use crate::render::{present_pulse, PulseView};
use crate::source::{FinancialSource, LeaderboardSource, SourceError};

/// Default revalidation window
pub const DEFAULT_REVALIDATE: Duration = Duration::from_secs(60);

/// One consistent pair of upstream reads
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseSnapshot {
    pub report: FinancialReport,
    pub leaderboard: TagsLeaderboard,
    pub fetched_at: DateTime<Utc>,
    #[serde(skip)]
    fetched: Instant,
}

impl PulseSnapshot {
    pub fn new(report: FinancialReport, leaderboard: TagsLeaderboard) -> Self {
        Self {
            report,
            leaderboard,
            fetched_at: Utc::now(),
            fetched: Instant::now(),
        }
    }

    /// Age since the upstream reads completed
    pub fn age(&self) -> Duration {
        self.fetched.elapsed()
    }

    pub fn is_stale(&self, window: Duration) -> bool {
        self.age() >= window
    }

    pub fn view(&self) -> PulseView {
        present_pulse(&self.report, &self.leaderboard)
    }
}

pub struct PulseCache {
    financial: Arc<dyn FinancialSource>,
    leaderboard: Arc<dyn LeaderboardSource>,
    revalidate: Duration,
    snapshot: RwLock<Option<Arc<PulseSnapshot>>>,
    refreshing: AtomicBool,
    /// Held while the first snapshot is fetched
    filling: Mutex<()>,
}

impl PulseCache {
    pub fn new(
        financial: Arc<dyn FinancialSource>,
        leaderboard: Arc<dyn LeaderboardSource>,
        revalidate: Duration,
    ) -> Self {
        Self {
            financial,
            leaderboard,
            revalidate,
            snapshot: RwLock::new(None),
            refreshing: AtomicBool::new(false),
            filling: Mutex::new(()),
        }
    }

    pub fn revalidate_window(&self) -> Duration {
        self.revalidate
    }

    /// Whether a snapshot has been stored yet
    pub async fn is_warm(&self) -> bool {
        self.snapshot.read().await.is_some()
    }

    /// Fetch both inputs concurrently; fails if either fails
    pub async fn fetch_snapshot(&self) -> Result<PulseSnapshot, SourceError> {
        let (report, leaderboard) = tokio::try_join!(
            self.financial.summary_report(),
            self.leaderboard.tags_leaderboard()
        )?;

        Ok(PulseSnapshot::new(report, leaderboard))
    }

    /// Current snapshot, revalidating as described in the module docs
    pub async fn get(self: &Arc<Self>) -> Result<Arc<PulseSnapshot>, SourceError> {
        let current = self.snapshot.read().await.clone();

        match current {
            Some(snapshot) => {
                if snapshot.is_stale(self.revalidate) {
                    self.spawn_refresh();
                }
                Ok(snapshot)
            }
            None => self.fill().await,
        }
    }

    /// First fill: one caller fetches, the others wait and reuse its snapshot
    async fn fill(&self) -> Result<Arc<PulseSnapshot>, SourceError> {
        let _guard = self.filling.lock().await;

        if let Some(snapshot) = self.snapshot.read().await.clone() {
            return Ok(snapshot);
        }
        self.refresh().await
    }

    /// Fetch now and replace the stored snapshot
    pub async fn refresh(&self) -> Result<Arc<PulseSnapshot>, SourceError> {
        let snapshot = Arc::new(self.fetch_snapshot().await?);
        *self.snapshot.write().await = Some(Arc::clone(&snapshot));

        tracing::info!(
            donors = snapshot.report.donors.len(),
            leaderboard_users = snapshot.leaderboard.all_time.by_users.len(),
            "Pulse snapshot refreshed"
        );
        Ok(snapshot)
    }

    fn spawn_refresh(self: &Arc<Self>) {
        if self.refreshing.swap(true, Ordering::AcqRel) {
            return;
        }

        let cache = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = cache.refresh().await {
                tracing::warn!(error = %e, "Pulse revalidation failed, serving stale snapshot");
            }
            cache.refreshing.store(false, Ordering::Release);
        });
    }
}
