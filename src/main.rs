//! Cragpulse server
//!
//! Run with: cargo run --bin cragpulse
//!
//! # Configuration
//!
//! Read from `CRAGPULSE_CONFIG` if set, otherwise the first of
//! `~/.config/cragpulse/config.toml`, `/etc/cragpulse/config.toml` and
//! `./config.toml` that exists. `CRAGPULSE_*` environment variables override
//! file values (see `cragpulse-cli init-config` for the full list).
//!
//! With `sources.fixtures_dir` set, pages are served from JSON fixtures instead
//! of the upstream GraphQL services.

use anyhow::Context;
use cragpulse::api::{serve, AppState};
use cragpulse::config::{Config, LoggingConfig};
use cragpulse::pulse::PulseCache;
use cragpulse::render::{Renderer, SquarePreviewLoader};
use cragpulse::source::{
    FinancialSource, HistorySource, LeaderboardSource, OpenBetaClient, OpenCollectiveClient,
    StaticSource,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var_os("CRAGPULSE_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            Config::load_with_env(&path)
                .with_context(|| format!("loading config from {}", path.display()))?
        }
        None => Config::load_default(),
    };

    init_tracing(&config.logging);

    tracing::info!("Starting Cragpulse v{}", env!("CARGO_PKG_VERSION"));

    let state = build_state(&config)?;
    serve(state, &config.api).await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("cragpulse={},tower_http=info", logging.level).into()
    });
    let json = logging.format == "json";

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let (history, leaderboard, financial): (
        Arc<dyn HistorySource>,
        Arc<dyn LeaderboardSource>,
        Arc<dyn FinancialSource>,
    ) = match &config.sources.fixtures_dir {
        Some(dir) => {
            tracing::info!("Serving fixtures from {}", dir);
            let fixtures = Arc::new(
                StaticSource::from_dir(Path::new(dir))
                    .with_context(|| format!("loading fixtures from {}", dir))?,
            );
            (fixtures.clone(), fixtures.clone(), fixtures)
        }
        None => {
            tracing::info!("Route database API: {}", config.sources.openbeta_url);
            tracing::info!("Donation API: {}", config.sources.opencollective_url);

            let openbeta = Arc::new(OpenBetaClient::new(
                config.sources.openbeta(),
                config.sources.leaderboard_limit,
            )?);
            let opencollective = Arc::new(OpenCollectiveClient::new(
                config.sources.opencollective(),
                config.sources.opencollective_slug.clone(),
            )?);
            (openbeta.clone(), openbeta, opencollective)
        }
    };

    let pulse = Arc::new(PulseCache::new(
        financial,
        leaderboard,
        config.pulse.revalidate(),
    ));
    let renderer = Arc::new(Renderer::new()?);
    let images = Arc::new(
        SquarePreviewLoader::new(config.media.base_url.clone()).quality(config.media.quality),
    );

    Ok(AppState::new(
        history,
        pulse,
        renderer,
        images,
        config.api.clone(),
    ))
}
