//! Parent-directory bootstrapping for destination paths

use filekit_types::DirectoryError;
use std::path::Path;
use tracing::debug;

/// Create every missing ancestor directory of the file at `path`.
///
/// A no-op when the ancestors already exist. Fails with
/// [`DirectoryError::Unresolvable`] when `path` has no usable directory
/// component, and with [`DirectoryError::CreationFailed`] on any creation
/// fault. The creation itself runs on the blocking pool as its own unit of
/// work.
pub async fn ensure_parent_dir(path: &Path) -> Result<(), DirectoryError> {
    let parent = parent_of(path)?;
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|source| DirectoryError::CreationFailed {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("ensured parent directory of {}", path.display());
    Ok(())
}

/// Blocking variant of [`ensure_parent_dir`].
pub fn ensure_parent_dir_sync(path: &Path) -> Result<(), DirectoryError> {
    let parent = parent_of(path)?;
    std::fs::create_dir_all(parent).map_err(|source| DirectoryError::CreationFailed {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("ensured parent directory of {}", path.display());
    Ok(())
}

fn parent_of(path: &Path) -> Result<&Path, DirectoryError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent),
        _ => Err(DirectoryError::Unresolvable {
            path: path.to_path_buf(),
        }),
    }
}
