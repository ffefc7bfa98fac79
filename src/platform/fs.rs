// Mycolog - platform/fs.rs
//
// Filesystem helpers for saving exported reports.

use std::io;
use std::path::Path;

/// Save `bytes` to `path` atomically (write temp, then rename).
///
/// Creates parent directories as needed. A crash between write and rename
/// leaves any previous file at `path` intact.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = Path::new(&tmp_name);

    std::fs::write(tmp, bytes)?;
    if let Err(e) = std::fs::rename(tmp, path) {
        // Clean up the temp file on failure; ignore any secondary error.
        let _ = std::fs::remove_file(tmp);
        return Err(e);
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "File written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports").join("log.csv");
        write_atomic(&path, b"Date\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Date\n");
        assert!(!dir.path().join("reports").join("log.csv.tmp").exists());
    }

    #[test]
    fn test_write_atomic_replaces_existing_and_stale_temp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        write_atomic(&path, b"old").unwrap();

        // Leftover temp file from an earlier crash.
        std::fs::write(dir.path().join("log.csv.tmp"), b"garbage").unwrap();

        write_atomic(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }
}
