//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ApiConfig;
use crate::pulse::PulseCache;
use crate::render::{ImageLoader, Renderer};
use crate::source::HistorySource;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Recent change history
    pub history: Arc<dyn HistorySource>,
    /// Pulse snapshot with stale-while-revalidate
    pub pulse: Arc<PulseCache>,
    /// Compiled templates
    pub renderer: Arc<Renderer>,
    /// Preview URL builder for media tiles
    pub images: Arc<dyn ImageLoader>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        history: Arc<dyn HistorySource>,
        pulse: Arc<PulseCache>,
        renderer: Arc<Renderer>,
        images: Arc<dyn ImageLoader>,
        config: ApiConfig,
    ) -> Self {
        Self {
            history,
            pulse,
            renderer,
            images,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
