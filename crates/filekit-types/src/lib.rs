//! Core type system for filekit
//!
//! This crate provides the shared vocabulary used throughout the filekit
//! workspace:
//!
//! - **Error taxonomy**: one typed error enum per file operation, with
//!   bad-input errors kept distinguishable from mid-flight failures
//! - **Cancellation**: an externally settable flag polled by long-running
//!   operations at chunk boundaries
//!
//! # Examples
//!
//! ```rust
//! use filekit_types::{CancelToken, WriteError};
//!
//! let cancel = CancelToken::new();
//! assert!(!cancel.is_cancelled());
//! cancel.cancel();
//! assert!(cancel.is_cancelled());
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cancel;
pub mod error;

pub use cancel::{CancelToken, Cancellable};
pub use error::{
    CompareError, CopyError, DirectoryError, LockError, PathError, SizeError, WriteError,
};
