//! Size and lock-state queries

use crate::path;
use filekit_types::{LockError, SizeError};
use std::io::ErrorKind;
use tracing::debug;

/// Size in bytes of the file at `path`.
pub async fn file_size(path: &str) -> Result<u64, SizeError> {
    let full = path::resolve_path(path)?;
    match tokio::fs::metadata(&full).await {
        Ok(meta) if meta.is_file() => Ok(meta.len()),
        Ok(_) => Err(SizeError::NotFound { path: full }),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(SizeError::NotFound { path: full }),
        Err(source) => Err(SizeError::Failed { path: full, source }),
    }
}

/// Blocking variant of [`file_size`].
pub fn file_size_sync(path: &str) -> Result<u64, SizeError> {
    let full = path::resolve_path(path)?;
    match std::fs::metadata(&full) {
        Ok(meta) if meta.is_file() => Ok(meta.len()),
        Ok(_) => Err(SizeError::NotFound { path: full }),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(SizeError::NotFound { path: full }),
        Err(source) => Err(SizeError::Failed { path: full, source }),
    }
}

/// Probe whether the file at `path` is locked against writing.
///
/// Attempts to open the file for write access; a refusal to grant the write
/// handle reports `true`, while faults that are not lock refusals surface as
/// [`LockError::Failed`]. The probe handle is released before returning.
pub async fn is_locked(path: &str) -> Result<bool, LockError> {
    let full = path::resolve_path(path)?;
    match tokio::fs::OpenOptions::new().write(true).open(&full).await {
        Ok(_) => Ok(false),
        Err(e) if lock_refused(&e) => {
            debug!("write handle refused for {}: {e}", full.display());
            Ok(true)
        }
        Err(source) => Err(LockError::Failed { path: full, source }),
    }
}

/// Blocking variant of [`is_locked`].
pub fn is_locked_sync(path: &str) -> Result<bool, LockError> {
    let full = path::resolve_path(path)?;
    match std::fs::OpenOptions::new().write(true).open(&full) {
        Ok(_) => Ok(false),
        Err(e) if lock_refused(&e) => {
            debug!("write handle refused for {}: {e}", full.display());
            Ok(true)
        }
        Err(source) => Err(LockError::Failed { path: full, source }),
    }
}

// Sharing violations surface as PermissionDenied on Windows and as
// WouldBlock where mandatory locking exists.
fn lock_refused(e: &std::io::Error) -> bool {
    matches!(e.kind(), ErrorKind::PermissionDenied | ErrorKind::WouldBlock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filekit_types::PathError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn size_of_an_existing_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("sized.bin");
        std::fs::write(&file, vec![0u8; 1234]).unwrap();

        assert_eq!(file_size(file.to_str().unwrap()).await.unwrap(), 1234);
    }

    #[tokio::test]
    async fn size_of_a_missing_file_fails_typed() {
        let dir = TempDir::new().unwrap();
        let ghost = dir.path().join("ghost.bin");

        let err = file_size(ghost.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, SizeError::NotFound { .. }));
    }

    #[tokio::test]
    async fn size_of_a_directory_fails_typed() {
        let dir = TempDir::new().unwrap();
        let err = file_size(dir.path().to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, SizeError::NotFound { .. }));
    }

    #[tokio::test]
    async fn size_rejects_bad_paths() {
        let err = file_size("  ").await.unwrap_err();
        assert!(matches!(err, SizeError::Path(PathError::Empty)));
    }

    #[tokio::test]
    async fn writable_file_is_not_locked() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("free.bin");
        std::fs::write(&file, b"content").unwrap();

        assert!(!is_locked(file.to_str().unwrap()).await.unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn write_protected_file_reports_locked() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("sealed.bin");
        std::fs::write(&file, b"content").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o444)).unwrap();

        // Root ignores file permissions; nothing to observe then.
        if std::fs::OpenOptions::new().write(true).open(&file).is_ok() {
            return;
        }

        assert!(is_locked(file.to_str().unwrap()).await.unwrap());
    }

    #[test]
    fn sync_variants_agree() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("sized.bin");
        std::fs::write(&file, vec![0u8; 42]).unwrap();

        assert_eq!(file_size_sync(file.to_str().unwrap()).unwrap(), 42);
        assert!(!is_locked_sync(file.to_str().unwrap()).unwrap());
    }
}
