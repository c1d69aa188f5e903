// SPDX-License-Identifier: MIT OR Apache-2.0
//! Folio - headless portfolio page runner
//!
//! Plays the portfolio page's motion without a browser:
//! - Masked intro that reveals the content
//! - Landing reveal and pointer parallax
//! - One-shot scroll reveal of the about panel
//! - Scroll-down button to the contact section
//!
//! ## Architecture
//!
//! Input comes from a RON script (or a built-in demo), frames run at the
//! configured rate, and the final page state can be written as JSON.

mod config;
mod content;
mod page;
mod script;
mod session;

use clap::Parser;
use config::{ConfigError, PortfolioConfig, CONFIG_FILE_NAME};
use script::{Script, ScriptError};
use session::{PortfolioSession, SessionError};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Headless portfolio page runner
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Play the portfolio page's animations headlessly", long_about = None)]
struct Cli {
    /// Page configuration (defaults to ./folio.ron if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input script to replay instead of the demo
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Write the final page state as JSON
    #[arg(long)]
    dump_json: Option<PathBuf>,

    /// Write the default configuration and exit
    #[arg(long)]
    write_default_config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Errors surfaced by the runner
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("folio_app={level},folio_sequencer={level}"))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting folio v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        tracing::error!("folio failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    if let Some(path) = &cli.write_default_config {
        PortfolioConfig::default().save(path)?;
        return Ok(());
    }

    let config = load_config(cli.config.as_deref())?;
    let script = match &cli.script {
        Some(path) => Script::load(path)?,
        None => {
            tracing::info!("No script given, running the demo");
            Script::demo(config.viewport.width, config.viewport.height)
        }
    };

    tracing::info!(
        "Replaying {} input events over {:.2}s",
        script.events.len(),
        script.duration()
    );
    let mut session = PortfolioSession::new(config);
    session.run(&script)?;

    let snapshot = session.snapshot();
    let stats = session.stats();
    tracing::info!(
        "Finished at {:.2}s after {} frames: content visible {}, scroll reveal {}, scrolled to {}",
        snapshot.time,
        stats.frames,
        snapshot.content_visible,
        snapshot.scroll_reveal,
        session.viewport().scroll_y
    );

    if let Some(path) = &cli.dump_json {
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json).map_err(|source| AppError::Output {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Wrote page state to {}", path.display());
    }
    Ok(())
}

/// An explicit path must load; otherwise the working directory's config
/// is used when present and defaults when not
fn load_config(path: Option<&Path>) -> Result<PortfolioConfig, ConfigError> {
    if let Some(path) = path {
        return PortfolioConfig::load(path);
    }
    let local = Path::new(CONFIG_FILE_NAME);
    if local.exists() {
        PortfolioConfig::load(local)
    } else {
        tracing::debug!("No {CONFIG_FILE_NAME} found, using defaults");
        Ok(PortfolioConfig::default())
    }
}
