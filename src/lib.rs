//! # Cragpulse
//!
//! Server-rendered community pages for a climbing route database: recent edit
//! history, a "pulse" of tagging and donation statistics, and user media
//! galleries.
//!
//! ## Modules
//!
//! - [`model`]: Read-only records received from upstream services
//! - [`render`]: View models and HTML templates
//! - [`source`]: Upstream GraphQL clients and static fixtures
//! - [`pulse`]: Stale-while-revalidate snapshot of the pulse inputs
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cragpulse::model::Changeset;
//! use cragpulse::render::{present_history, Renderer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let changesets: Vec<Changeset> = serde_json::from_str(&std::fs::read_to_string("history.json")?)?;
//!
//!     let view = present_history(&changesets, chrono::Utc::now());
//!     let html = Renderer::new()?.history(&view)?;
//!
//!     println!("{}", html);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod model;
pub mod pulse;
pub mod render;
pub mod source;

// Re-export top-level types for convenience
pub use model::{Changeset, FinancialReport, MediaWithTags, TagsLeaderboard};

pub use render::{HistoryView, PulseView, RenderError, Renderer};

pub use source::{
    FinancialSource, HistorySource, LeaderboardSource, SourceError, StaticSource,
};

pub use pulse::{PulseCache, PulseSnapshot};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::Config;
