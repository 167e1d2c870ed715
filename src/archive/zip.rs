use crate::error::ExtractError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ExtractError + '_ {
    move |source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Permission bits to apply to an extracted entry; setuid, setgid and sticky are dropped
#[cfg(unix)]
fn extracted_mode(archive_mode: u32) -> u32 {
    archive_mode & 0o777
}

/// Extract ZIP archive into `extract_to`, returns list of extracted file paths
pub fn extract_zip(zip_path: &Path, extract_to: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let file = fs::File::open(zip_path).map_err(|source| ExtractError::Open {
        path: zip_path.to_path_buf(),
        source,
    })?;

    let archive_error = |source| ExtractError::Archive {
        path: zip_path.to_path_buf(),
        source,
    };
    let mut archive = ZipArchive::new(file).map_err(archive_error)?;

    fs::create_dir_all(extract_to).map_err(io_error(extract_to))?;

    let mut extracted = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(archive_error)?;

        let relative = entry
            .enclosed_name()
            .map(Path::to_path_buf)
            .ok_or_else(|| ExtractError::UnsafeEntry(entry.name().to_string()))?;
        let outpath = extract_to.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&outpath).map_err(io_error(&outpath))?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::create_dir_all(parent).map_err(io_error(parent))?;
            }

            let mut outfile = fs::File::create(&outpath).map_err(io_error(&outpath))?;
            std::io::copy(&mut entry, &mut outfile).map_err(io_error(&outpath))?;
            extracted.push(outpath.clone());
        }

        // Executable bits live in the archive's unix mode
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                let permissions = fs::Permissions::from_mode(extracted_mode(mode));
                fs::set_permissions(&outpath, permissions).map_err(io_error(&outpath))?;
            }
        }
    }

    debug!(
        "extracted {} files into {}",
        extracted.len(),
        extract_to.display()
    );
    Ok(extracted)
}
