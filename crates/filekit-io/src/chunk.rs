//! Chunk sizing policy shared by write, copy, and compare

use std::num::NonZeroUsize;

/// Baseline chunk size for buffered transfers (80 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 81_920;

/// Payload size above which chunk sizing switches from the baseline to the
/// scaled formula (50 MiB).
pub const LARGE_FILE_THRESHOLD: u64 = 52_428_800;

/// Upper bound for scaled chunk sizes (256 KiB).
pub const MAX_CHUNK_SIZE: usize = 262_144;

/// Default chunk size for copy operations (4 KiB).
pub const DEFAULT_COPY_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(4096) {
    Some(size) => size,
    None => unreachable!(),
};

/// Requested I/O granularity for a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChunkSize {
    /// Defer to [`optimal_chunk_size`] for the payload at hand.
    #[default]
    Auto,
    /// Use the given size for every chunk.
    Fixed(NonZeroUsize),
}

impl ChunkSize {
    /// Resolve the effective chunk size for a payload of `len` bytes.
    pub fn resolve(self, len: u64) -> usize {
        match self {
            Self::Auto => optimal_chunk_size(len),
            Self::Fixed(size) => size.get(),
        }
    }
}

/// Map a payload size to an I/O chunk size.
///
/// Payloads above [`LARGE_FILE_THRESHOLD`] scale the chunk to one hundredth
/// of the payload, clamped to `[DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE]`. Every
/// other payload, including an empty one, gets the baseline. This keeps
/// small-file I/O at one syscall-friendly size while capping per-chunk memory
/// for huge transfers at 256 KiB.
pub fn optimal_chunk_size(len: u64) -> usize {
    if len > LARGE_FILE_THRESHOLD {
        ((len / 100) as usize).clamp(DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE)
    } else {
        DEFAULT_CHUNK_SIZE
    }
}
