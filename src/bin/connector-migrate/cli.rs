//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

/// Migrate a connector project to the declarative connector.yaml generation
#[derive(Parser)]
#[command(name = "connector-migrate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Connector project to migrate
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Run a single step by name instead of the full pipeline
    #[arg(long, value_name = "NAME")]
    pub step: Option<String>,

    /// List the available steps and exit
    #[arg(long)]
    pub list: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
