//! Command-line argument definitions for the graph editor CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the output path, the size of the sample
//! graph, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the graph editor snapshot tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the output SVG file
    #[arg(help = "Path to the output SVG file")]
    pub output: String,

    /// Number of nodes in the sample chain graph
    #[arg(short, long, default_value_t = 3)]
    pub nodes: usize,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
