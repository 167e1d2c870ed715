use crate::config::Config;
use crate::install::{self, place::Outcome};
use crate::models::{Args, Commands};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Main CLI entry point
pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = Config::load(args.config.as_deref())?;

    match args.command {
        Commands::Install { target, prefix } => {
            if target.is_empty() {
                anyhow::bail!("Specify install name");
            }

            let opts = config.install_options(prefix);
            let placements =
                install::install_plugin(&target, &opts).context("failed to install plugin")?;

            if placements.is_empty() {
                println!("Warning: no plugin executables found in archive");
            }
            for placement in &placements {
                match placement.outcome {
                    Outcome::Installed => println!("Installed: {}", placement.path.display()),
                    Outcome::Skipped => println!(
                        "Skipped: {} (already exists)",
                        placement.path.display()
                    ),
                }
            }
            println!("Successfully installed {target}");
        }
    }

    Ok(())
}

/// Log to stderr; RUST_LOG takes precedence over --verbose
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "mkr_plugin=debug"
    } else {
        "mkr_plugin=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
