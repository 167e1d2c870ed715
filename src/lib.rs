// Public modules
pub mod models;
pub mod cli;
pub mod config;
pub mod error;
pub mod target;
pub mod utils;
pub mod download;
pub mod archive;
pub mod install;

// Re-export commonly used types
pub use config::Config;
pub use error::InstallError;
pub use install::{InstallOptions, install_plugin, setup_plugin_dir};
pub use target::InstallTarget;
