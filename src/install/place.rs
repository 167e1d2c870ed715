use crate::error::PlaceError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What happened to one located executable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Installed,
    /// A file with the same name was already in the destination
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub path: PathBuf,
    pub outcome: Outcome,
}

fn place_error<'a>(
    action: &'static str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> PlaceError + 'a {
    move |source| PlaceError {
        action,
        path: path.to_path_buf(),
        source,
    }
}

/// Move `src` into `dest_dir`, keeping its file name.
///
/// An existing destination file is never overwritten. When the rename fails
/// (typically across filesystems) the bytes are copied and the source mode
/// is applied to the copy.
pub fn place(src: &Path, dest_dir: &Path) -> Result<Placement, PlaceError> {
    place_with(src, dest_dir, |from, to| fs::rename(from, to))
}

/// `place` with the move step supplied by the caller
pub(crate) fn place_with<F>(src: &Path, dest_dir: &Path, rename: F) -> Result<Placement, PlaceError>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    let file_name = src.file_name().ok_or_else(|| PlaceError {
        action: "determine file name of",
        path: src.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
    })?;
    let dest = dest_dir.join(file_name);

    if dest.exists() {
        info!("{} already exists, skipping", dest.display());
        return Ok(Placement {
            path: dest,
            outcome: Outcome::Skipped,
        });
    }

    if let Err(e) = rename(src, &dest) {
        debug!(
            "rename {} -> {} failed ({e}), copying instead",
            src.display(),
            dest.display()
        );
        copy_with_permissions(src, &dest)?;
    }

    Ok(Placement {
        path: dest,
        outcome: Outcome::Installed,
    })
}

/// Copy `src` to `dest` byte for byte, then give `dest` the mode of `src`.
///
/// A partially written `dest` is left in place on failure.
pub(crate) fn copy_with_permissions(src: &Path, dest: &Path) -> Result<(), PlaceError> {
    let permissions = fs::metadata(src)
        .map_err(place_error("stat", src))?
        .permissions();

    let mut reader = fs::File::open(src).map_err(place_error("open", src))?;
    let mut writer = fs::File::create(dest).map_err(place_error("create", dest))?;
    io::copy(&mut reader, &mut writer).map_err(place_error("copy to", dest))?;

    fs::set_permissions(dest, permissions).map_err(place_error("set permissions on", dest))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_place_moves_file() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("check-sample");
        fs::write(&src, "plugin").unwrap();
        let bin = temp.path().join("bin");
        fs::create_dir(&bin).unwrap();

        let placement = place(&src, &bin).unwrap();

        assert_eq!(
            placement,
            Placement {
                path: bin.join("check-sample"),
                outcome: Outcome::Installed,
            }
        );
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(bin.join("check-sample")).unwrap(), "plugin");
    }

    #[test]
    fn test_place_skips_existing() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("check-sample");
        fs::write(&src, "new").unwrap();
        let bin = temp.path().join("bin");
        fs::create_dir(&bin).unwrap();
        fs::write(bin.join("check-sample"), "old").unwrap();

        let placement = place(&src, &bin).unwrap();

        assert_eq!(placement.outcome, Outcome::Skipped);
        assert_eq!(fs::read_to_string(&src).unwrap(), "new");
        assert_eq!(fs::read_to_string(bin.join("check-sample")).unwrap(), "old");
    }

    #[test]
    fn test_place_missing_destination_dir_fails() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("check-sample");
        fs::write(&src, "plugin").unwrap();

        let err = place(&src, &temp.path().join("no-such-dir")).unwrap_err();
        assert_eq!(err.action, "create");
        assert!(src.exists());
    }

    #[test]
    fn test_copy_with_permissions_copies_bytes() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("mackerel-plugin-sample");
        fs::write(&src, b"\x7fELF binary").unwrap();
        let dest = temp.path().join("copy");

        copy_with_permissions(&src, &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), fs::read(&src).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_with_permissions_preserves_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let src = temp.path().join("mackerel-plugin-sample");
        fs::write(&src, "plugin").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o750)).unwrap();
        let dest = temp.path().join("copy");

        copy_with_permissions(&src, &dest).unwrap();

        let mode = fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
    }

    #[cfg(unix)]
    #[test]
    fn test_place_preserves_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let src = temp.path().join("check-sample");
        fs::write(&src, "plugin").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o755)).unwrap();
        let bin = temp.path().join("bin");
        fs::create_dir(&bin).unwrap();

        place(&src, &bin).unwrap();

        let mode = fs::metadata(bin.join("check-sample"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn test_place_falls_back_to_copy_when_rename_fails() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let src = temp.path().join("mackerel-plugin-sample");
        fs::write(&src, "plugin").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o755)).unwrap();
        let bin = temp.path().join("bin");
        fs::create_dir(&bin).unwrap();

        let placement = place_with(&src, &bin, |_, _| {
            Err(io::Error::other("Invalid cross-device link"))
        })
        .unwrap();

        let dest = bin.join("mackerel-plugin-sample");
        assert_eq!(placement.path, dest);
        assert_eq!(placement.outcome, Outcome::Installed);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "plugin");
        let mode = fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        // Copying leaves the source behind; the scratch dir takes care of it
        assert!(src.exists());
    }

    #[test]
    fn test_place_fallback_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("check-gone");
        let bin = temp.path().join("bin");
        fs::create_dir(&bin).unwrap();

        let err = place_with(&src, &bin, |_, _| Err(io::Error::other("rename failed")))
            .unwrap_err();
        assert_eq!(err.action, "stat");
        assert_eq!(err.path, src);
    }

    #[test]
    fn test_copy_with_permissions_missing_source() {
        let temp = TempDir::new().unwrap();
        let err = copy_with_permissions(&temp.path().join("nope"), &temp.path().join("dest"))
            .unwrap_err();
        assert_eq!(err.action, "stat");
        assert!(!temp.path().join("dest").exists());
    }
}
