// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Headless player for keyframed SVG decks
#[derive(Debug, Parser)]
#[command(name = "framedeck", version, about)]
pub struct Cli {
    /// Change log to play (`.json`, or `.ron`)
    pub deck: PathBuf,

    /// Viewer configuration (RON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Start autoplay immediately
    #[arg(short, long)]
    pub autoplay: bool,

    /// Write the effective configuration to this path and exit
    #[arg(long, value_name = "PATH")]
    pub write_config: Option<PathBuf>,
}
