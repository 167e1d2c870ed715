pub mod executable;
pub mod place;

use crate::archive::zip::extract_zip;
use crate::download::http;
use crate::error::{DirSetupError, InstallError};
use crate::target::InstallTarget;
use crate::utils::{Platform, get_filename_from_url};
use executable::find_plugin_executables;
use place::{Placement, place};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything the install pipeline needs besides the target itself
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Plugin root; executables land in `<prefix>/bin`
    pub prefix: PathBuf,
    /// Host serving release archives
    pub download_base: String,
    pub platform: Platform,
}

/// Make sure `<prefix>/bin` exists, returns the bin directory
pub fn setup_plugin_dir(prefix: &Path) -> Result<PathBuf, DirSetupError> {
    let bin_dir = prefix.join("bin");
    fs::create_dir_all(&bin_dir).map_err(|source| DirSetupError {
        path: bin_dir.clone(),
        source,
    })?;
    Ok(bin_dir)
}

/// Parse `target`, resolve it and install its executables
pub fn install_plugin(
    target: &str,
    opts: &InstallOptions,
) -> Result<Vec<Placement>, InstallError> {
    let target = InstallTarget::parse(target)?;
    let bin_dir = setup_plugin_dir(&opts.prefix)?;
    let url = target.download_url(&opts.download_base, &opts.platform)?;
    install(&url, &bin_dir)
}

/// Download the archive at `url`, extract it and place its plugin
/// executables into `bin_dir`.
///
/// The scratch directory is gone when this returns, whatever the outcome.
/// The first placement failure aborts the remaining ones.
pub fn install(url: &str, bin_dir: &Path) -> Result<Vec<Placement>, InstallError> {
    info!("download {url}");
    let download = http::fetch(url)?;

    let work_dir = download.work_dir();
    info!("extract {}", get_filename_from_url(url));
    extract_zip(&download.archive_path, &work_dir)?;

    let executables = find_plugin_executables(&work_dir)?;
    debug!("found {} plugin executables", executables.len());

    let mut placements = Vec::with_capacity(executables.len());
    for exe in &executables {
        placements.push(place(exe, bin_dir)?);
    }

    Ok(placements)
}
