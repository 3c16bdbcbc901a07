//! Task identity, requests, and lifecycle states

use filekit_io::ChunkSize;
use filekit_types::{CompareError, CopyError, WriteError};
use uuid::Uuid;

/// Unique identifier for a managed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a managed task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Submitted but not yet running on a worker
    Pending,
    /// Running on a worker
    Running,
    /// Finished successfully
    Completed,
    /// Finished with an error
    Failed(String),
    /// Aborted by its cancellation signal
    Cancelled,
}

impl TaskStatus {
    /// Check if the task has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed(_) | Self::Cancelled)
    }
}

/// A file operation to run under the engine.
#[derive(Debug, Clone)]
pub enum TransferRequest {
    /// Write a payload to a destination path.
    Write {
        /// Destination path
        destination: String,
        /// Bytes to write
        payload: Vec<u8>,
        /// I/O granularity
        chunk_size: ChunkSize,
    },
    /// Copy a source file to a destination path.
    Copy {
        /// Source path
        source: String,
        /// Destination path
        destination: String,
        /// Replace an existing destination instead of failing
        overwrite: bool,
        /// I/O granularity
        chunk_size: ChunkSize,
    },
    /// Compare two files for byte equality.
    Compare {
        /// First path
        left: String,
        /// Second path
        right: String,
        /// Read content after the size prefilter passes
        compare_content: bool,
    },
}

impl TransferRequest {
    /// Create a write request with automatic chunk sizing.
    pub fn write<D: Into<String>>(destination: D, payload: Vec<u8>) -> Self {
        Self::Write {
            destination: destination.into(),
            payload,
            chunk_size: ChunkSize::Auto,
        }
    }

    /// Create a copy request with the default copy chunk size and no
    /// overwriting.
    pub fn copy<S: Into<String>, D: Into<String>>(source: S, destination: D) -> Self {
        Self::Copy {
            source: source.into(),
            destination: destination.into(),
            overwrite: false,
            chunk_size: ChunkSize::Fixed(filekit_io::DEFAULT_COPY_CHUNK_SIZE),
        }
    }

    /// Create a content comparison request.
    pub fn compare<L: Into<String>, R: Into<String>>(left: L, right: R) -> Self {
        Self::Compare {
            left: left.into(),
            right: right.into(),
            compare_content: true,
        }
    }

    /// Set the I/O granularity. No effect on comparison requests, which
    /// always size their buffers off the compared files.
    pub fn with_chunk_size(mut self, chunk: ChunkSize) -> Self {
        match &mut self {
            Self::Write { chunk_size, .. } | Self::Copy { chunk_size, .. } => *chunk_size = chunk,
            Self::Compare { .. } => {}
        }
        self
    }

    /// Allow a copy to replace an existing destination. No effect on other
    /// requests.
    pub fn with_overwrite(mut self, value: bool) -> Self {
        if let Self::Copy { overwrite, .. } = &mut self {
            *overwrite = value;
        }
        self
    }

    /// Degrade a comparison to the existence-and-size check. No effect on
    /// other requests.
    pub fn with_compare_content(mut self, value: bool) -> Self {
        if let Self::Compare {
            compare_content, ..
        } = &mut self
        {
            *compare_content = value;
        }
        self
    }
}

/// Successful result of a managed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The payload was written to its destination
    Written,
    /// The source was copied to its destination
    Copied,
    /// The comparison verdict
    Compared(bool),
}

/// Failure of a managed task.
#[derive(thiserror::Error, Debug)]
pub enum TaskError {
    /// A write operation failed
    #[error(transparent)]
    Write(#[from] WriteError),

    /// A copy operation failed
    #[error(transparent)]
    Copy(#[from] CopyError),

    /// A comparison failed
    #[error(transparent)]
    Compare(#[from] CompareError),

    /// The worker running the task panicked or was aborted
    #[error("task worker terminated abnormally: {0}")]
    Worker(String),
}

impl TaskError {
    /// Check whether this failure is the operation's cancellation outcome.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Write(WriteError::Cancelled { .. })
                | Self::Copy(CopyError::Cancelled { .. })
                | Self::Compare(CompareError::Cancelled { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;
    use std::path::PathBuf;

    #[test]
    fn task_ids_are_unique() {
        assert_ne!(TaskId::new(), TaskId::new());
    }

    #[test]
    fn terminal_states() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed("boom".into()).is_terminal());
        assert!(TaskStatus::Cancelled.is_terminal());
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::Running.is_terminal());
    }

    #[test]
    fn request_builders_apply_where_meaningful() {
        let chunk = ChunkSize::Fixed(NonZeroUsize::new(1024).unwrap());

        let request = TransferRequest::copy("a.bin", "b.bin")
            .with_overwrite(true)
            .with_chunk_size(chunk);
        match request {
            TransferRequest::Copy {
                overwrite,
                chunk_size,
                ..
            } => {
                assert!(overwrite);
                assert_eq!(chunk_size, chunk);
            }
            _ => panic!("expected a copy request"),
        }

        let request = TransferRequest::compare("a.bin", "b.bin").with_compare_content(false);
        match request {
            TransferRequest::Compare {
                compare_content, ..
            } => assert!(!compare_content),
            _ => panic!("expected a comparison request"),
        }
    }

    #[test]
    fn cancellation_is_recognizable_across_operations() {
        let err = TaskError::from(WriteError::Cancelled {
            path: PathBuf::from("/tmp/x"),
        });
        assert!(err.is_cancelled());

        let err = TaskError::from(CopyError::SourceMissing {
            path: PathBuf::from("/tmp/x"),
        });
        assert!(!err.is_cancelled());
    }
}
