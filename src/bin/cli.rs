//! Cragpulse CLI
//!
//! Command-line interface for offline rendering and server checks:
//! - Render change history, pulse statistics or a media gallery from JSON files
//! - Check a running server
//! - Generate a default config file

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use cragpulse::model::{Changeset, FinancialReport, MediaWithTags, TagsLeaderboard};
use cragpulse::render::templates::Page;
use cragpulse::render::{present_gallery, present_history, present_pulse, Renderer, SquarePreviewLoader};

#[derive(Parser)]
#[command(name = "cragpulse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render climbing community pages from JSON")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server URL
    #[arg(long, default_value = "http://localhost:8090", global = true)]
    pub api_url: String,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a change history file (JSON array of changesets)
    RenderHistory {
        /// Path to the changesets file
        path: PathBuf,
        /// Wrap the fragment in the page layout
        #[arg(long)]
        page: bool,
        /// Print the view model as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Render the pulse panels from a financial report and a tags leaderboard
    RenderPulse {
        /// Path to the financial report file
        #[arg(long)]
        report: PathBuf,
        /// Path to the tags leaderboard file
        #[arg(long)]
        leaderboard: PathBuf,
        /// Wrap the fragment in the page layout
        #[arg(long)]
        page: bool,
    },

    /// Render a user's media gallery (JSON array of media with tags)
    RenderMedia {
        /// Path to the media file
        path: PathBuf,
        /// Owner of the media
        #[arg(long)]
        uid: String,
        /// Show remove buttons on untagged media
        #[arg(long)]
        authorized: bool,
        /// Media CDN base URL
        #[arg(long, default_value = "https://media.openbeta.io")]
        media_base_url: String,
    },

    /// Show server health
    Status,

    /// Generate default config file
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::RenderHistory { path, page, json } => {
            let changesets: Vec<Changeset> = read_json(&path)?;
            let view = present_history(&changesets, Utc::now());

            if !view.diagnostics.is_empty() {
                eprintln!("{} unrecognized value(s) skipped", view.diagnostics.len());
            }

            if json {
                return emit(cli.output.as_deref(), &serde_json::to_string_pretty(&view)?);
            }

            let renderer = Renderer::new()?;
            let mut html = renderer.history(&view)?;
            if page {
                html = renderer.page(&Page::history(), &html)?;
            }
            emit(cli.output.as_deref(), &html)?;
        }

        Commands::RenderPulse {
            report,
            leaderboard,
            page,
        } => {
            let report: FinancialReport = read_json(&report)?;
            let leaderboard: TagsLeaderboard = read_json(&leaderboard)?;

            let renderer = Renderer::new()?;
            let mut html = renderer.pulse(&present_pulse(&report, &leaderboard))?;
            if page {
                html = renderer.page(&Page::pulse(), &html)?;
            }
            emit(cli.output.as_deref(), &html)?;
        }

        Commands::RenderMedia {
            path,
            uid,
            authorized,
            media_base_url,
        } => {
            let media: Vec<MediaWithTags> = read_json(&path)?;
            let loader = SquarePreviewLoader::new(media_base_url);

            let view = present_gallery(&uid, &media, authorized, &loader);
            let html = Renderer::new()?.gallery(&view)?;
            emit(cli.output.as_deref(), &html)?;
        }

        Commands::Status => {
            let response = reqwest::get(format!("{}/health", cli.api_url))
                .await
                .with_context(|| format!("connecting to {}", cli.api_url))?;

            if !response.status().is_success() {
                eprintln!("Server unhealthy: {}", response.status());
                std::process::exit(1);
            }

            let health: serde_json::Value = response.json().await?;
            println!("Cragpulse Status");
            println!("================");
            println!("Status:  {}", health["status"].as_str().unwrap_or("unknown"));
            println!("Pulse:   {}", health["pulse"].as_str().unwrap_or("unknown"));
            println!("Version: {}", health["version"].as_str().unwrap_or("unknown"));
            println!("Uptime:  {}s", health["uptime_seconds"].as_u64().unwrap_or(0));
        }

        Commands::InitConfig => {
            let config = cragpulse::config::generate_default_config();

            match cli.output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", config),
            }
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn emit(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Written to {:?}", path);
        }
        None => println!("{}", content),
    }
    Ok(())
}
