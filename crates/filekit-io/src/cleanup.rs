//! Best-effort removal of partially written destination files

use std::path::Path;
use tracing::{debug, warn};

/// Delete the file at `path` if it exists.
///
/// Cleanup is advisory, not a correctness guarantee: a missing file is a
/// no-op and deletion faults (file locked, permission denied, already gone)
/// are logged and swallowed. This never fails.
pub async fn discard_partial(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("removed partial file {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("failed to remove partial file {}: {e}", path.display()),
    }
}

/// Blocking variant of [`discard_partial`].
pub fn discard_partial_sync(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("removed partial file {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("failed to remove partial file {}: {e}", path.display()),
    }
}
