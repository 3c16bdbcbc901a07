//! Engine dispatching transfer requests onto runtime workers

use crate::task::{TaskError, TaskId, TaskOutcome, TaskStatus, TransferRequest};
use filekit_io::{compare_files, copy_file, write_file, CopyOptions, WriteOptions};
use filekit_types::CancelToken;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

/// Handle to a submitted task.
///
/// Dropping the handle does not stop the task; it keeps running to
/// completion under the engine. Await [`TaskHandle::wait`] to join it.
#[derive(Debug)]
pub struct TaskHandle {
    id: TaskId,
    cancel: CancelToken,
    join: JoinHandle<Result<TaskOutcome, TaskError>>,
}

impl TaskHandle {
    /// Identifier of the underlying task.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Signal cancellation. The operation observes the signal at its next
    /// chunk boundary and finishes with its `Cancelled` outcome.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the task to finish and return its result.
    pub async fn wait(self) -> Result<TaskOutcome, TaskError> {
        match self.join.await {
            Ok(result) => result,
            Err(e) => Err(TaskError::Worker(e.to_string())),
        }
    }
}

/// Runs transfer requests as managed tasks on the tokio runtime.
///
/// Every submission gets its own [`CancelToken`] and worker; the engine
/// tracks lifecycle state per task. The byte-moving loop runs on the worker,
/// and directory creation inside the operations reaches the blocking pool as
/// its own unit of work before any destination stream opens.
#[derive(Debug, Clone, Default)]
pub struct TransferEngine {
    tasks: Arc<Mutex<HashMap<TaskId, TaskState>>>,
}

#[derive(Debug)]
struct TaskState {
    status: TaskStatus,
    cancel: CancelToken,
}

impl TransferEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a request to completion on a worker.
    pub async fn execute(&self, request: TransferRequest) -> Result<TaskOutcome, TaskError> {
        self.submit(request).wait().await
    }

    /// Submit a request with a fresh cancellation token.
    ///
    /// Must be called within a tokio runtime.
    pub fn submit(&self, request: TransferRequest) -> TaskHandle {
        self.submit_with_cancel(request, CancelToken::new())
    }

    /// Submit a request observing a caller-supplied cancellation token, so
    /// one signal can cover several operations or race an external timer.
    pub fn submit_with_cancel(&self, request: TransferRequest, cancel: CancelToken) -> TaskHandle {
        let id = TaskId::new();
        self.tasks.lock().unwrap().insert(
            id,
            TaskState {
                status: TaskStatus::Pending,
                cancel: cancel.clone(),
            },
        );
        debug!("submitted task {id}");

        let tasks = Arc::clone(&self.tasks);
        let worker_cancel = cancel.clone();
        let join = tokio::spawn(async move {
            set_status(&tasks, id, TaskStatus::Running);
            let result = run(request, &worker_cancel).await;
            let status = match &result {
                Ok(_) => TaskStatus::Completed,
                Err(e) if e.is_cancelled() => TaskStatus::Cancelled,
                Err(e) => TaskStatus::Failed(e.to_string()),
            };
            debug!("task {id} finished: {status:?}");
            set_status(&tasks, id, status);
            result
        });

        TaskHandle { id, cancel, join }
    }

    /// Current status of a task, or `None` for an unknown ID.
    pub fn status(&self, id: TaskId) -> Option<TaskStatus> {
        self.tasks
            .lock()
            .unwrap()
            .get(&id)
            .map(|state| state.status.clone())
    }

    /// Signal cancellation of a task by ID. Returns `false` for an unknown
    /// ID; a task that already finished keeps its terminal state.
    pub fn cancel(&self, id: TaskId) -> bool {
        match self.tasks.lock().unwrap().get(&id) {
            Some(state) => {
                state.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// IDs of every task that has not reached a terminal state.
    pub fn active_tasks(&self) -> Vec<TaskId> {
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, state)| !state.status.is_terminal())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Drop bookkeeping for finished tasks. Returns how many were removed.
    pub fn prune_finished(&self) -> usize {
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|_, state| !state.status.is_terminal());
        before - tasks.len()
    }
}

fn set_status(tasks: &Mutex<HashMap<TaskId, TaskState>>, id: TaskId, status: TaskStatus) {
    if let Some(state) = tasks.lock().unwrap().get_mut(&id) {
        state.status = status;
    }
}

async fn run(request: TransferRequest, cancel: &CancelToken) -> Result<TaskOutcome, TaskError> {
    match request {
        TransferRequest::Write {
            destination,
            payload,
            chunk_size,
        } => {
            write_file(&destination, &payload, WriteOptions { chunk_size }, cancel).await?;
            Ok(TaskOutcome::Written)
        }
        TransferRequest::Copy {
            source,
            destination,
            overwrite,
            chunk_size,
        } => {
            copy_file(
                &source,
                &destination,
                CopyOptions {
                    overwrite,
                    chunk_size,
                },
                cancel,
            )
            .await?;
            Ok(TaskOutcome::Copied)
        }
        TransferRequest::Compare {
            left,
            right,
            compare_content,
        } => {
            let equal = compare_files(&left, &right, compare_content, cancel).await?;
            Ok(TaskOutcome::Compared(equal))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filekit_types::CopyError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn execute_write_produces_the_file() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("managed/out.bin");
        let engine = TransferEngine::new();

        let outcome = engine
            .execute(TransferRequest::write(
                dest.to_str().unwrap(),
                vec![1, 2, 3],
            ))
            .await
            .unwrap();

        assert_eq!(outcome, TaskOutcome::Written);
        assert_eq!(std::fs::read(&dest).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn execute_copy_and_compare_chain() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.bin");
        let dest = dir.path().join("dest.bin");
        std::fs::write(&src, b"engine payload").unwrap();

        let engine = TransferEngine::new();
        let outcome = engine
            .execute(TransferRequest::copy(
                src.to_str().unwrap(),
                dest.to_str().unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(outcome, TaskOutcome::Copied);

        let outcome = engine
            .execute(TransferRequest::compare(
                src.to_str().unwrap(),
                dest.to_str().unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(outcome, TaskOutcome::Compared(true));
    }

    #[tokio::test]
    async fn submitted_task_reaches_completed_status() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("status.bin");
        let engine = TransferEngine::new();

        let handle = engine.submit(TransferRequest::write(
            dest.to_str().unwrap(),
            b"status".to_vec(),
        ));
        let id = handle.id();
        handle.wait().await.unwrap();

        assert_eq!(engine.status(id), Some(TaskStatus::Completed));
        assert!(engine.active_tasks().is_empty());
        assert_eq!(engine.prune_finished(), 1);
        assert_eq!(engine.status(id), None);
    }

    #[tokio::test]
    async fn pre_cancelled_submission_leaves_no_artifact() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("never.bin");
        let engine = TransferEngine::new();

        let cancel = CancelToken::new();
        cancel.cancel();

        let handle = engine.submit_with_cancel(
            TransferRequest::write(dest.to_str().unwrap(), b"payload".to_vec()),
            cancel,
        );
        let id = handle.id();
        let err = handle.wait().await.unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(engine.status(id), Some(TaskStatus::Cancelled));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn failed_task_keeps_its_typed_error() {
        let dir = TempDir::new().unwrap();
        let engine = TransferEngine::new();

        let err = engine
            .execute(TransferRequest::copy(
                dir.path().join("ghost.bin").to_str().unwrap(),
                dir.path().join("dest.bin").to_str().unwrap(),
            ))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TaskError::Copy(CopyError::SourceMissing { .. })
        ));
    }

    #[tokio::test]
    async fn cancel_by_id_signals_the_token() {
        let dir = TempDir::new().unwrap();
        let engine = TransferEngine::new();

        let handle = engine.submit(TransferRequest::write(
            dir.path().join("x.bin").to_str().unwrap(),
            b"x".to_vec(),
        ));
        let id = handle.id();

        assert!(engine.cancel(id));
        assert!(!engine.cancel(TaskId::new()));

        // Either outcome is fine; the task must reach a terminal state.
        let _ = handle.wait().await;
        assert!(engine.status(id).unwrap().is_terminal());
    }
}
