//! Error types for filekit operations
//!
//! Each public operation carries its own error enum. Path and directory
//! errors are transparent `#[from]` variants of the operation errors so that
//! callers can always tell bad input apart from an operation that failed
//! mid-flight. Cancellation is a first-class variant, never an unwinding
//! escape.

use std::path::PathBuf;

/// Path validation failure.
#[derive(thiserror::Error, Debug)]
pub enum PathError {
    /// The path string was empty or whitespace-only.
    #[error("path is empty or whitespace-only")]
    Empty,

    /// The resolved absolute form contains characters the platform forbids
    /// or reaches the maximum path length.
    #[error("invalid file path: {path}")]
    Invalid {
        /// The offending path, resolved where resolution succeeded
        path: PathBuf,
    },
}

/// Parent-directory resolution or creation failure.
#[derive(thiserror::Error, Debug)]
pub enum DirectoryError {
    /// The parent directory of the target path cannot be determined.
    #[error("cannot determine parent directory of: {path}")]
    Unresolvable {
        /// The file path with no usable directory component
        path: PathBuf,
    },

    /// Creating the parent directory tree failed.
    #[error("failed to create directory tree for: {path}")]
    CreationFailed {
        /// The file path whose ancestors could not be created
        path: PathBuf,
        /// Underlying cause (permission denial, disk full, ...)
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a write operation.
#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    /// Bad input path, surfaced verbatim.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Parent-directory failure, surfaced verbatim.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The operation was aborted by its cancellation signal. The destination
    /// file has been removed (best effort).
    #[error("file write cancelled: {path}")]
    Cancelled {
        /// The destination path
        path: PathBuf,
    },

    /// The write failed mid-flight. The destination file has been removed
    /// (best effort).
    #[error("file write failed: {path}")]
    Failed {
        /// The destination path
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a copy operation.
#[derive(thiserror::Error, Debug)]
pub enum CopyError {
    /// Bad input path, surfaced verbatim.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Parent-directory failure, surfaced verbatim.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The source file does not exist.
    #[error("source file not found: {path}")]
    SourceMissing {
        /// The resolved source path
        path: PathBuf,
    },

    /// The destination file already exists and overwriting was not requested.
    #[error("destination file already exists: {path}")]
    DestinationExists {
        /// The resolved destination path
        path: PathBuf,
    },

    /// The operation was aborted by its cancellation signal. The destination
    /// file has been removed (best effort); the source is untouched.
    #[error("file copy cancelled: {from} -> {to}")]
    Cancelled {
        /// The source path
        from: PathBuf,
        /// The destination path
        to: PathBuf,
    },

    /// The copy failed mid-flight. The destination file has been removed
    /// (best effort); the source is untouched.
    #[error("file copy failed: {from} -> {to}")]
    Failed {
        /// The source path
        from: PathBuf,
        /// The destination path
        to: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a file comparison.
#[derive(thiserror::Error, Debug)]
pub enum CompareError {
    /// Bad input path, surfaced verbatim.
    #[error(transparent)]
    Path(#[from] PathError),

    /// One of the compared files does not exist.
    #[error("file not found: {path}")]
    NotFound {
        /// The missing path
        path: PathBuf,
    },

    /// The comparison was aborted by its cancellation signal.
    #[error("file comparison cancelled: {left} / {right}")]
    Cancelled {
        /// First compared path
        left: PathBuf,
        /// Second compared path
        right: PathBuf,
    },

    /// The comparison failed mid-flight. An error never stands in for a
    /// verdict: callers get `Failed`, not a false equality.
    #[error("file comparison failed: {left} / {right}")]
    Failed {
        /// First compared path
        left: PathBuf,
        /// Second compared path
        right: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a file-size query.
#[derive(thiserror::Error, Debug)]
pub enum SizeError {
    /// Bad input path, surfaced verbatim.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The queried file does not exist.
    #[error("file not found: {path}")]
    NotFound {
        /// The missing path
        path: PathBuf,
    },

    /// The file exists but could not be queried.
    #[error("failed to query file size: {path}")]
    Failed {
        /// The queried path
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a file-lock probe.
#[derive(thiserror::Error, Debug)]
pub enum LockError {
    /// Bad input path, surfaced verbatim.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The file exists but its lock state could not be probed.
    #[error("failed to probe lock state of: {path}")]
    Failed {
        /// The probed path
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn path_error_passes_through_write_error_unwrapped() {
        let err = WriteError::from(PathError::Empty);
        assert!(matches!(err, WriteError::Path(PathError::Empty)));
        // transparent: the message is the inner error's message
        assert_eq!(err.to_string(), PathError::Empty.to_string());
    }

    #[test]
    fn directory_error_passes_through_copy_error_unwrapped() {
        let inner = DirectoryError::Unresolvable {
            path: PathBuf::from("out.bin"),
        };
        let message = inner.to_string();
        let err = CopyError::from(inner);
        assert!(matches!(err, CopyError::Directory(_)));
        assert_eq!(err.to_string(), message);
    }

    #[test]
    fn failed_variants_expose_their_cause() {
        use std::error::Error as _;

        let cause = std::io::Error::other("disk full");
        let err = WriteError::Failed {
            path: PathBuf::from("/tmp/out.bin"),
            source: cause,
        };
        assert!(err.source().is_some());
        assert!(err.source().unwrap().to_string().contains("disk full"));
    }

    #[test]
    fn error_messages_name_the_offending_paths() {
        let err = CopyError::DestinationExists {
            path: PathBuf::from("/tmp/dest.bin"),
        };
        assert!(err.to_string().contains("/tmp/dest.bin"));

        let err = CompareError::Cancelled {
            left: PathBuf::from("/tmp/a"),
            right: PathBuf::from("/tmp/b"),
        };
        assert!(err.to_string().contains("/tmp/a"));
        assert!(err.to_string().contains("/tmp/b"));
    }

    proptest::proptest! {
        #[test]
        fn failed_messages_always_name_the_path(name in "[a-z]{1,12}") {
            let path = PathBuf::from(format!("/tmp/{name}"));
            let err = WriteError::Failed {
                path: path.clone(),
                source: std::io::Error::other("fault"),
            };
            proptest::prop_assert!(err.to_string().contains(path.to_str().unwrap()));

            let err = SizeError::NotFound { path: path.clone() };
            proptest::prop_assert!(err.to_string().contains(path.to_str().unwrap()));
        }
    }
}
