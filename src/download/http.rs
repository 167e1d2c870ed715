use crate::error::FetchError;
use crate::utils::get_filename_from_url;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tracing::debug;

/// User-Agent sent with every download request
pub const USER_AGENT: &str = concat!("mkr-plugin-installer/", env!("MKR_PLUGIN_VERSION"));

const SCRATCH_PREFIX: &str = "mkr-plugin-installer-";

/// A downloaded archive and the scratch directory that holds it.
///
/// Dropping the value removes the scratch directory with everything in it.
#[derive(Debug)]
pub struct Download {
    pub archive_path: PathBuf,
    pub scratch: TempDir,
}

impl Download {
    /// Directory under the scratch area for extracted contents
    pub fn work_dir(&self) -> PathBuf {
        self.scratch.path().join("work")
    }
}

/// Download `url` into a fresh scratch directory
pub fn fetch(url: &str) -> Result<Download, FetchError> {
    let response = match ureq::get(url).set("User-Agent", USER_AGENT).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(status, _)) => {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }
        Err(e) => {
            return Err(FetchError::Request {
                url: url.to_string(),
                source: Box::new(e),
            });
        }
    };

    if response.status() != 200 {
        return Err(FetchError::Status {
            status: response.status(),
            url: url.to_string(),
        });
    }

    let scratch = tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .tempdir()
        .map_err(FetchError::TempDir)?;

    // From here on an early return drops `scratch`, which deletes it
    let archive_path = scratch.path().join(get_filename_from_url(url));
    let mut file = fs::File::create(&archive_path).map_err(|source| FetchError::CreateFile {
        path: archive_path.clone(),
        source,
    })?;

    let written = std::io::copy(&mut response.into_reader(), &mut file).map_err(|source| {
        FetchError::Write {
            path: archive_path.clone(),
            source,
        }
    })?;

    debug!(
        "downloaded {} ({written} bytes) into {}",
        url,
        scratch.path().display()
    );

    Ok(Download {
        archive_path,
        scratch,
    })
}
