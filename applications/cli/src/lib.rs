//! Spendwise command-line client
//!
//! Configuration loading, command implementations and terminal output for
//! the `spendwise` binary.

pub mod commands;
pub mod config;
pub mod output;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spendwise")]
#[command(about = "Track expenses against a monthly budget", long_about = None)]
pub struct Cli {
    /// Configuration file path (default: ./spendwise.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Account email (overrides auth.email from the config)
    #[arg(long, global = true)]
    pub email: Option<String>,

    /// Account password (overrides auth.password from the config)
    #[arg(long, global = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: commands::Commands,
}
