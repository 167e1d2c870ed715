use crate::error::LocateError;
use std::fs;
use std::path::{Path, PathBuf};

/// Filename prefixes that mark a file as a plugin executable
pub const PLUGIN_PREFIXES: &[&str] = &["check-", "mackerel-plugin-"];

/// Check if a file's permission bits allow anyone to execute it
pub fn is_executable(metadata: &fs::Metadata) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        // No mode bits here; the name prefix alone decides
        metadata.is_file()
    }
}

/// Check if a filename follows the plugin naming convention
pub fn is_plugin_name(name: &str) -> bool {
    PLUGIN_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

/// Find plugin executables under `dir`, recursively.
///
/// The first I/O error aborts the walk. Results come back in traversal
/// order, which depends on the filesystem.
pub fn find_plugin_executables(dir: &Path) -> Result<Vec<PathBuf>, LocateError> {
    let mut executables = Vec::new();

    fn visit_dir(dir: &Path, executables: &mut Vec<PathBuf>) -> Result<(), LocateError> {
        let walk_error = |source| LocateError {
            path: dir.to_path_buf(),
            source,
        };

        for entry in fs::read_dir(dir).map_err(walk_error)? {
            let entry = entry.map_err(walk_error)?;
            let path = entry.path();
            let metadata = fs::symlink_metadata(&path).map_err(|source| LocateError {
                path: path.clone(),
                source,
            })?;

            if metadata.is_dir() {
                visit_dir(&path, executables)?;
            } else if metadata.is_file()
                && is_executable(&metadata)
                && entry.file_name().to_str().is_some_and(is_plugin_name)
            {
                executables.push(path);
            }
        }
        Ok(())
    }

    visit_dir(dir, &mut executables)?;
    Ok(executables)
}
