//! Chunked, cancellable file transfer and comparison engine
//!
//! This crate moves and compares file contents in bounded chunks so that
//! large payloads never force unbounded memory growth and long transfers
//! never monopolize a cooperative scheduler:
//!
//! - **Bounded chunking**: one shared sizing policy maps payload size to I/O
//!   granularity, capping per-chunk memory at 256 KiB for huge transfers
//! - **Polled cancellation**: operations consult a [`CancelToken`] between
//!   chunks and surface a distinct `Cancelled` error, never partial success
//! - **No stray artifacts**: a cancelled or failed write/copy removes its
//!   partially written destination before returning (best effort)
//! - **Two scheduling regimes per operation**: a cooperative async form that
//!   yields after each full-size chunk, and a blocking `_sync` twin
//!
//! # Examples
//!
//! ```rust
//! use filekit_io::{write_file, compare_files, WriteOptions};
//! use filekit_types::CancelToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cancel = CancelToken::new();
//! write_file("data/out.bin", b"payload", WriteOptions::default(), &cancel).await?;
//! let equal = compare_files("data/out.bin", "data/other.bin", true, &cancel).await?;
//! println!("equal: {equal}");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod chunk;
pub mod cleanup;
pub mod compare;
pub mod dir;
pub mod path;
pub mod query;
pub mod transfer;

pub use chunk::{
    optimal_chunk_size, ChunkSize, DEFAULT_CHUNK_SIZE, DEFAULT_COPY_CHUNK_SIZE,
    LARGE_FILE_THRESHOLD, MAX_CHUNK_SIZE,
};
pub use cleanup::{discard_partial, discard_partial_sync};
pub use compare::{compare_files, compare_files_sync};
pub use dir::{ensure_parent_dir, ensure_parent_dir_sync};
pub use path::{resolve_path, MAX_PATH_LEN};
pub use query::{file_size, file_size_sync, is_locked, is_locked_sync};
pub use transfer::{
    copy_file, copy_file_sync, write_file, write_file_sync, CopyOptions, WriteOptions,
};
