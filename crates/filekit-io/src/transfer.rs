//! Write and copy operations with bounded chunking and polled cancellation

use crate::chunk::{ChunkSize, DEFAULT_COPY_CHUNK_SIZE, LARGE_FILE_THRESHOLD};
use crate::{cleanup, dir, path};
use filekit_types::{CancelToken, CopyError, WriteError};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Options for [`write_file`] and [`write_file_sync`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// I/O granularity. `Auto` keys off the payload length.
    pub chunk_size: ChunkSize,
}

/// Options for [`copy_file`] and [`copy_file_sync`].
#[derive(Debug, Clone, Copy)]
pub struct CopyOptions {
    /// Replace an existing destination instead of failing.
    pub overwrite: bool,
    /// I/O granularity. `Auto` keys off the source file length.
    pub chunk_size: ChunkSize,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            chunk_size: ChunkSize::Fixed(DEFAULT_COPY_CHUNK_SIZE),
        }
    }
}

/// Why a chunk loop stopped early.
pub(crate) enum Interrupt {
    Cancelled,
    Io(std::io::Error),
}

impl From<std::io::Error> for Interrupt {
    fn from(source: std::io::Error) -> Self {
        Self::Io(source)
    }
}

/// Write `payload` to `path`, creating missing parent directories.
///
/// An already-set `cancel` token fails the operation before any filesystem
/// mutation. Payloads above the large-file threshold are written in bounded
/// chunks, polling `cancel` before each chunk and yielding to the scheduler
/// after each full-size chunk; smaller payloads go out in a single call. On
/// cancellation or I/O failure the destination is removed (best effort)
/// before the typed error is returned; path and directory errors pass
/// through unwrapped.
pub async fn write_file(
    path: &str,
    payload: &[u8],
    options: WriteOptions,
    cancel: &CancelToken,
) -> Result<(), WriteError> {
    if cancel.is_cancelled() {
        return Err(WriteError::Cancelled {
            path: PathBuf::from(path),
        });
    }

    let dest = path::resolve_path(path)?;
    dir::ensure_parent_dir(&dest).await?;
    let chunk_size = options.chunk_size.resolve(payload.len() as u64);

    match write_payload(&dest, payload, chunk_size, cancel).await {
        Ok(()) => {
            debug!("wrote {} bytes to {}", payload.len(), dest.display());
            Ok(())
        }
        Err(Interrupt::Cancelled) => {
            cleanup::discard_partial(&dest).await;
            Err(WriteError::Cancelled { path: dest })
        }
        Err(Interrupt::Io(source)) => {
            cleanup::discard_partial(&dest).await;
            Err(WriteError::Failed { path: dest, source })
        }
    }
}

/// Blocking variant of [`write_file`]. No cancellation input.
pub fn write_file_sync(
    path: &str,
    payload: &[u8],
    options: WriteOptions,
) -> Result<(), WriteError> {
    let dest = path::resolve_path(path)?;
    dir::ensure_parent_dir_sync(&dest)?;
    let chunk_size = options.chunk_size.resolve(payload.len() as u64);

    match write_payload_sync(&dest, payload, chunk_size) {
        Ok(()) => {
            debug!("wrote {} bytes to {}", payload.len(), dest.display());
            Ok(())
        }
        Err(source) => {
            cleanup::discard_partial_sync(&dest);
            Err(WriteError::Failed { path: dest, source })
        }
    }
}

async fn write_payload(
    dest: &Path,
    payload: &[u8],
    chunk_size: usize,
    cancel: &CancelToken,
) -> Result<(), Interrupt> {
    let mut file = open_destination(dest).await?;

    if payload.len() as u64 > LARGE_FILE_THRESHOLD {
        write_chunks(&mut file, payload, chunk_size, cancel).await?;
    } else {
        if cancel.is_cancelled() {
            return Err(Interrupt::Cancelled);
        }
        file.write_all(payload).await?;
    }
    file.flush().await?;
    Ok(())
}

fn write_payload_sync(dest: &Path, payload: &[u8], chunk_size: usize) -> std::io::Result<()> {
    let mut file = open_destination_sync(dest)?;

    if payload.len() as u64 > LARGE_FILE_THRESHOLD {
        for chunk in payload.chunks(chunk_size) {
            file.write_all(chunk)?;
        }
    } else {
        file.write_all(payload)?;
    }
    file.flush()
}

/// Write a slice in chunks of at most `chunk_size` bytes, in strict offset
/// order, polling `cancel` before each chunk.
async fn write_chunks<W>(
    writer: &mut W,
    payload: &[u8],
    chunk_size: usize,
    cancel: &CancelToken,
) -> Result<(), Interrupt>
where
    W: AsyncWrite + Unpin,
{
    for chunk in payload.chunks(chunk_size) {
        if cancel.is_cancelled() {
            return Err(Interrupt::Cancelled);
        }
        writer.write_all(chunk).await?;
        if chunk.len() == chunk_size {
            tokio::task::yield_now().await;
        }
    }
    Ok(())
}

/// Copy the file at `source` to `destination`.
///
/// Fails with `SourceMissing` when the source does not exist and with
/// `DestinationExists` when the destination exists and `overwrite` is off.
/// The stream moves in chunks of the configured size, polling `cancel`
/// before each chunk and yielding after full-size chunks. On cancellation or
/// failure the destination is removed (best effort, never the source) before
/// the typed error is returned.
pub async fn copy_file(
    source: &str,
    destination: &str,
    options: CopyOptions,
    cancel: &CancelToken,
) -> Result<(), CopyError> {
    if cancel.is_cancelled() {
        return Err(CopyError::Cancelled {
            from: PathBuf::from(source),
            to: PathBuf::from(destination),
        });
    }

    let src = path::resolve_path(source)?;
    let dest = path::resolve_path(destination)?;

    if !tokio::fs::try_exists(&src).await.unwrap_or(false) {
        return Err(CopyError::SourceMissing { path: src });
    }
    if !options.overwrite && tokio::fs::try_exists(&dest).await.unwrap_or(false) {
        return Err(CopyError::DestinationExists { path: dest });
    }
    dir::ensure_parent_dir(&dest).await?;

    match copy_streams(&src, &dest, options.chunk_size, cancel).await {
        Ok(bytes) => {
            debug!("copied {bytes} bytes: {} -> {}", src.display(), dest.display());
            Ok(())
        }
        Err(Interrupt::Cancelled) => {
            cleanup::discard_partial(&dest).await;
            Err(CopyError::Cancelled {
                from: src,
                to: dest,
            })
        }
        Err(Interrupt::Io(source)) => {
            cleanup::discard_partial(&dest).await;
            Err(CopyError::Failed {
                from: src,
                to: dest,
                source,
            })
        }
    }
}

/// Blocking variant of [`copy_file`]. No cancellation input.
pub fn copy_file_sync(
    source: &str,
    destination: &str,
    options: CopyOptions,
) -> Result<(), CopyError> {
    let src = path::resolve_path(source)?;
    let dest = path::resolve_path(destination)?;

    if !src.exists() {
        return Err(CopyError::SourceMissing { path: src });
    }
    if !options.overwrite && dest.exists() {
        return Err(CopyError::DestinationExists { path: dest });
    }
    dir::ensure_parent_dir_sync(&dest)?;

    match copy_streams_sync(&src, &dest, options.chunk_size) {
        Ok(bytes) => {
            debug!("copied {bytes} bytes: {} -> {}", src.display(), dest.display());
            Ok(())
        }
        Err(source) => {
            cleanup::discard_partial_sync(&dest);
            Err(CopyError::Failed {
                from: src,
                to: dest,
                source,
            })
        }
    }
}

async fn copy_streams(
    src: &Path,
    dest: &Path,
    chunk: ChunkSize,
    cancel: &CancelToken,
) -> Result<u64, Interrupt> {
    let mut reader = tokio::fs::File::open(src).await?;
    let len = reader.metadata().await?.len();
    let chunk_size = chunk.resolve(len);

    let mut writer = open_destination(dest).await?;
    let total = stream_chunks(&mut reader, &mut writer, chunk_size, cancel).await?;
    writer.flush().await?;
    Ok(total)
}

fn copy_streams_sync(src: &Path, dest: &Path, chunk: ChunkSize) -> std::io::Result<u64> {
    let mut reader = std::fs::File::open(src)?;
    let len = reader.metadata()?.len();
    let chunk_size = chunk.resolve(len);

    let mut writer = open_destination_sync(dest)?;
    let mut buf = vec![0u8; chunk_size];
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n])?;
        total += n as u64;
    }
    writer.flush()?;
    Ok(total)
}

/// Stream `reader` into `writer` in chunks of `chunk_size` bytes, in strict
/// offset order, polling `cancel` before each chunk and yielding after each
/// full-size chunk.
async fn stream_chunks<R, W>(
    reader: &mut R,
    writer: &mut W,
    chunk_size: usize,
    cancel: &CancelToken,
) -> Result<u64, Interrupt>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; chunk_size];
    let mut total = 0u64;

    loop {
        if cancel.is_cancelled() {
            return Err(Interrupt::Cancelled);
        }
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            return Ok(total);
        }
        writer.write_all(&buf[..n]).await?;
        total += n as u64;
        if n == chunk_size {
            tokio::task::yield_now().await;
        }
    }
}

async fn open_destination(dest: &Path) -> std::io::Result<tokio::fs::File> {
    tokio::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dest)
        .await
}

fn open_destination_sync(dest: &Path) -> std::io::Result<std::fs::File> {
    std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dest)
}
