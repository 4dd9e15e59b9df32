// SPDX-License-Identifier: MIT OR Apache-2.0
//! `framedeck` - headless player for keyframed SVG decks.
//!
//! Loads a change log and an optional viewer configuration, then drives the
//! deck from line commands on stdin:
//! - `next`, `prev`, `seek N` for navigation
//! - `play` to toggle autoplay, `slower` / `faster` to adjust its interval
//! - `zoom X Y DELTA` and `pan DX DY` for the viewport
//! - `state` to print the rendered document, `quit` to exit
//!
//! Browser key codes (`ArrowRight`, `Space`, ...) are accepted as well.

mod app;
mod cli;
mod host;

use app::{AppError, ViewerApp};
use clap::Parser;
use cli::Cli;
use framedeck_core::{ChangeLog, Command, SlideViewer, ViewerConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("framedeck_viewer=info,framedeck_core=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::info!("Starting framedeck v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        tracing::error!("framedeck failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };

    if let Some(path) = &cli.write_config {
        config.save(path)?;
        tracing::info!("Wrote configuration to {:?}", path);
        return Ok(());
    }

    let log = ChangeLog::load(&cli.deck)?;
    let viewer = SlideViewer::new(log, &config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .enable_time()
        .build()?;

    runtime.block_on(async move {
        let mut app = ViewerApp::new(viewer, &config);
        if cli.autoplay {
            app.handle(Command::ToggleAutoplay);
        }
        app.run().await
    })
}
