use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version = env!("MKR_PLUGIN_VERSION"), about, long_about = None)]
pub struct Args {
    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Config file (defaults to <config dir>/mkr-plugin/config.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a mackerel plugin from a GitHub release
    Install {
        /// Install target: "owner/repo@tag" (or a plugin name, not resolvable yet)
        target: String,
        /// Plugin install location (executables go to <prefix>/bin)
        #[arg(long)]
        prefix: Option<PathBuf>,
    },
}
