//! Command-line interface for GridDuel
//!
//! The binary only runs headless scripted matches; graphical play lives in
//! external presentation adapters built on the library.

use clap::Parser;
use std::path::PathBuf;

/// Turn-based tactical grid duel engine
#[derive(Parser, Debug)]
#[command(name = "gridduel")]
#[command(about = "Turn-based tactical grid duel engine")]
#[command(version)]
pub struct Args {
    /// Replay a scripted match from the specified JSON config file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub headless: Option<PathBuf>,

    /// Output path for the match log (headless mode only)
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Override the config's turn cap (headless mode only)
    #[arg(long, value_name = "TURNS")]
    pub max_turns: Option<u32>,
}

pub fn parse_args() -> Args {
    Args::parse()
}
