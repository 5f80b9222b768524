use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{SpliceError, SpliceResult};

/// Read a whole file as UTF-8 text
pub fn read_text(path: impl AsRef<Path>) -> SpliceResult<String> {
    let path = path.as_ref();
    debug!("Reading file: {}", path.display());

    let bytes = fs::read(path).map_err(|e| SpliceError::io_error(e, Some(path)))?;
    String::from_utf8(bytes).map_err(|_| SpliceError::invalid_encoding(path))
}

/// Replace a file's contents atomically.
///
/// The new content goes to a temporary file in the same directory which is
/// then renamed over the target, so readers see either the old or the new text.
/// A symlinked target is resolved first so the file it points to gets the
/// new content and the link itself stays in place.
pub fn write_text_atomic(path: impl AsRef<Path>, content: &str) -> SpliceResult<()> {
    let requested = path.as_ref();
    let resolved = resolve_target(requested)?;
    let path = resolved.as_path();
    debug!("Writing file atomically: {}", path.display());

    let dir = parent_dir(path);
    let mut temp = NamedTempFile::new_in(&dir)
        .map_err(|e| SpliceError::write_failed(format!("cannot create temp file: {}", e), path))?;

    temp.write_all(content.as_bytes())
        .map_err(|e| SpliceError::write_failed(e.to_string(), path))?;
    temp.flush()
        .map_err(|e| SpliceError::write_failed(e.to_string(), path))?;

    // Keep the original file's permissions
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions())
            .map_err(|e| SpliceError::write_failed(e.to_string(), path))?;
    }

    temp.persist(path)
        .map_err(|e| SpliceError::write_failed(e.error.to_string(), path))?;

    debug!("File written: {}", path.display());
    Ok(())
}

/// Follow symlinks for an existing target; a missing target is written as given
fn resolve_target(path: &Path) -> SpliceResult<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            let target = fs::canonicalize(path).map_err(|e| SpliceError::io_error(e, Some(path)))?;
            debug!("Resolved symlink {} -> {}", path.display(), target.display());
            Ok(target)
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.ts");
        fs::write(&path, "old\n").unwrap();

        write_text_atomic(&path, "new\ncontent").unwrap();
        assert_eq!(read_text(&path).unwrap(), "new\ncontent");

        // No temp files left behind
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_through_symlink() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real.ts");
        let link = dir.path().join("link.ts");
        fs::write(&real, "old\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        write_text_atomic(&link, "new\n").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "new\n");
        assert_eq!(read_text(&link).unwrap(), "new\n");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_text(dir.path().join("missing.ts")).unwrap_err();
        assert!(matches!(err, SpliceError::Io { .. }));
    }

    #[test]
    fn test_read_non_utf8_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bin.dat");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = read_text(&path).unwrap_err();
        assert!(matches!(err, SpliceError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let err = write_text_atomic(dir.path().join("nope").join("a.ts"), "x").unwrap_err();
        assert!(matches!(err, SpliceError::WriteFailed { .. }));
    }
}
