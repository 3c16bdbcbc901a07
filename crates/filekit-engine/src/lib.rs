//! Task-based scheduling over the filekit transfer operations
//!
//! This crate runs write, copy, and compare operations as managed tasks on
//! the tokio runtime:
//!
//! - **Submission**: each request runs on its own worker with its own
//!   cancellation token
//! - **Lifecycle tracking**: per-task status from `Pending` through a
//!   terminal `Completed`/`Failed`/`Cancelled`
//! - **Cancellation**: by handle or by task ID; the operation observes the
//!   signal at its next chunk boundary and cleans up its destination
//!
//! # Examples
//!
//! ```rust
//! use filekit_engine::{TransferEngine, TransferRequest, TaskOutcome};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = TransferEngine::new();
//! let outcome = engine
//!     .execute(TransferRequest::write("data/out.bin", b"payload".to_vec()))
//!     .await?;
//! assert_eq!(outcome, TaskOutcome::Written);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod engine;
pub mod task;

pub use engine::{TaskHandle, TransferEngine};
pub use task::{TaskError, TaskId, TaskOutcome, TaskStatus, TransferRequest};
