//! Byte-equality comparison of two files

use crate::chunk::optimal_chunk_size;
use crate::path;
use crate::transfer::Interrupt;
use filekit_types::{CancelToken, CompareError};
use std::io::Read;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Compare the files at `left` and `right` for equality.
///
/// Size comparison is a strict prefilter: when the lengths differ the result
/// is `false` and no content is read, regardless of `compare_content`. With
/// `compare_content` off, equal sizes already count as equal. Otherwise both
/// files stream through twin buffers in lockstep; the first differing byte
/// decides. `cancel` is polled once per chunk pair, and the loop yields to
/// the scheduler after full-size chunks. An error is never a verdict: any
/// failure surfaces as [`CompareError`], not as `false`.
pub async fn compare_files(
    left: &str,
    right: &str,
    compare_content: bool,
    cancel: &CancelToken,
) -> Result<bool, CompareError> {
    let a = path::resolve_path(left)?;
    let b = path::resolve_path(right)?;

    let len_a = length_of(&a, &b).await?;
    let len_b = length_of(&b, &a).await?;

    if len_a != len_b {
        debug!(
            "size mismatch ({len_a} vs {len_b}): {} / {}",
            a.display(),
            b.display()
        );
        return Ok(false);
    }
    if !compare_content {
        return Ok(true);
    }

    let chunk_size = optimal_chunk_size(len_a);
    match compare_contents(&a, &b, chunk_size, cancel).await {
        Ok(equal) => Ok(equal),
        Err(Interrupt::Cancelled) => Err(CompareError::Cancelled { left: a, right: b }),
        Err(Interrupt::Io(source)) => Err(CompareError::Failed {
            left: a,
            right: b,
            source,
        }),
    }
}

/// Blocking variant of [`compare_files`]. No cancellation input.
pub fn compare_files_sync(
    left: &str,
    right: &str,
    compare_content: bool,
) -> Result<bool, CompareError> {
    let a = path::resolve_path(left)?;
    let b = path::resolve_path(right)?;

    let len_a = length_of_sync(&a, &b)?;
    let len_b = length_of_sync(&b, &a)?;

    if len_a != len_b {
        return Ok(false);
    }
    if !compare_content {
        return Ok(true);
    }

    let chunk_size = optimal_chunk_size(len_a);
    compare_contents_sync(&a, &b, chunk_size).map_err(|source| CompareError::Failed {
        left: a,
        right: b,
        source,
    })
}

/// File length of `path`, with `other` on hand for the failure message.
async fn length_of(path: &Path, other: &Path) -> Result<u64, CompareError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(meta.len()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(CompareError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CompareError::Failed {
            left: path.to_path_buf(),
            right: other.to_path_buf(),
            source,
        }),
    }
}

fn length_of_sync(path: &Path, other: &Path) -> Result<u64, CompareError> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(meta.len()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(CompareError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CompareError::Failed {
            left: path.to_path_buf(),
            right: other.to_path_buf(),
            source,
        }),
    }
}

async fn compare_contents(
    a: &Path,
    b: &Path,
    chunk_size: usize,
    cancel: &CancelToken,
) -> Result<bool, Interrupt> {
    let mut file_a = tokio::fs::File::open(a).await?;
    let mut file_b = tokio::fs::File::open(b).await?;

    let mut buf_a = vec![0u8; chunk_size];
    let mut buf_b = vec![0u8; chunk_size];

    loop {
        if cancel.is_cancelled() {
            return Err(Interrupt::Cancelled);
        }

        let n_a = file_a.read(&mut buf_a).await?;
        let n_b = file_b.read(&mut buf_b).await?;

        // Unequal counts mean one file shrank under us.
        if n_a != n_b {
            return Ok(false);
        }
        if n_a == 0 {
            return Ok(true);
        }
        if buf_a[..n_a] != buf_b[..n_a] {
            return Ok(false);
        }

        if n_a == chunk_size {
            tokio::task::yield_now().await;
        }
    }
}

fn compare_contents_sync(a: &Path, b: &Path, chunk_size: usize) -> std::io::Result<bool> {
    let mut file_a = std::fs::File::open(a)?;
    let mut file_b = std::fs::File::open(b)?;

    let mut buf_a = vec![0u8; chunk_size];
    let mut buf_b = vec![0u8; chunk_size];

    loop {
        let n_a = file_a.read(&mut buf_a)?;
        let n_b = file_b.read(&mut buf_b)?;

        if n_a != n_b {
            return Ok(false);
        }
        if n_a == 0 {
            return Ok(true);
        }
        if buf_a[..n_a] != buf_b[..n_a] {
            return Ok(false);
        }
    }
}
