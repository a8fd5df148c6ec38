//! connector-migrate CLI.

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use connector_migrate::pipeline::Pipeline;
use connector_migrate::steps;

mod cli;

use cli::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("connector_migrate=debug")
    } else {
        EnvFilter::new("connector_migrate=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    if cli.list {
        for name in steps::step_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut pipeline = match &cli.step {
        Some(name) => {
            let step = steps::step_named(name)
                .ok_or_else(|| anyhow!("unknown step `{name}` (use --list to see them)"))?;
            Pipeline::new(vec![step])
        }
        None => steps::default_pipeline(),
    };

    tracing::info!(dir = %cli.dir.display(), "migrating");
    pipeline.run(&cli.dir)?;
    tracing::info!("migration complete");

    Ok(())
}
