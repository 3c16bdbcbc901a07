//! Path validation for transfer and comparison operations

use filekit_types::PathError;
use std::path::{Path, PathBuf};

/// Longest absolute path accepted by the validator.
///
/// Mirrors the most restrictive platform ceiling (Windows `MAX_PATH`) so the
/// same inputs are rejected on every host.
pub const MAX_PATH_LEN: usize = 260;

#[cfg(windows)]
const FORBIDDEN_CHARS: &[char] = &['\0', '<', '>', '"', '|', '?', '*'];
#[cfg(not(windows))]
const FORBIDDEN_CHARS: &[char] = &['\0'];

/// Validate a path string and resolve it to its absolute form.
///
/// Fails with [`PathError::Empty`] for empty or whitespace-only input, and
/// with [`PathError::Invalid`] when the path contains characters the platform
/// forbids or its resolved absolute form reaches [`MAX_PATH_LEN`]. Pure
/// validation: nothing is touched on disk.
pub fn resolve_path(path: &str) -> Result<PathBuf, PathError> {
    if path.trim().is_empty() {
        return Err(PathError::Empty);
    }

    let absolute = std::path::absolute(Path::new(path)).map_err(|_| PathError::Invalid {
        path: PathBuf::from(path),
    })?;

    if path.contains(FORBIDDEN_CHARS) || absolute.as_os_str().len() >= MAX_PATH_LEN {
        return Err(PathError::Invalid { path: absolute });
    }

    Ok(absolute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_paths_are_rejected() {
        assert!(matches!(resolve_path(""), Err(PathError::Empty)));
        assert!(matches!(resolve_path("   "), Err(PathError::Empty)));
        assert!(matches!(resolve_path("\t\n"), Err(PathError::Empty)));
    }

    #[test]
    fn relative_paths_resolve_to_absolute_form() {
        let resolved = resolve_path("some/file.bin").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/file.bin"));
    }

    #[test]
    fn absolute_paths_pass_through() {
        let resolved = resolve_path("/tmp/file.bin").unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/file.bin"));
    }

    #[test]
    fn overlong_paths_are_invalid() {
        let long = "*".repeat(300);
        assert!(matches!(
            resolve_path(&long),
            Err(PathError::Invalid { .. })
        ));
    }

    #[test]
    fn path_at_the_ceiling_is_invalid() {
        // The resolved form must stay strictly below MAX_PATH_LEN.
        let name = "a".repeat(MAX_PATH_LEN);
        let path = format!("/{name}");
        assert!(matches!(resolve_path(&path), Err(PathError::Invalid { .. })));
    }

    #[test]
    fn nul_bytes_are_invalid() {
        assert!(matches!(
            resolve_path("/tmp/bad\0name"),
            Err(PathError::Invalid { .. })
        ));
    }
}
