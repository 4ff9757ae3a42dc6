//! In-memory task storage for taskdesk.
//!
//! [`TaskStore`] owns the task collection and the id allocator. Every operation
//! waits for the configured [`LatencyPolicy`] delay and then runs to completion
//! on the runtime, even if the caller stops waiting for it.

/// Read-only contact reference collection.
pub mod contacts;
/// Error types.
pub mod error;
/// Latency policies.
pub mod latency;
/// Seed datasets.
pub mod seed;

pub use contacts::ContactDirectory;
pub use error::StoreError;
pub use latency::{LatencyPolicy, NoLatency, SimulatedLatency, StoreOp};

use std::sync::Arc;

use taskdesk_core::{ContactId, NewTask, RawId, Task, TaskId, TaskUpdate};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Process-local task collection with simulated remote-call latency.
///
/// Cloning yields another handle onto the same collection.
#[derive(Clone, Debug)]
pub struct TaskStore {
    state: Arc<Mutex<StoreState>>,
    latency: Arc<dyn LatencyPolicy>,
}

#[derive(Debug)]
struct StoreState {
    tasks: Vec<Task>,
    /// `None` once `u64::MAX` has been used.
    next_id: Option<TaskId>,
}

impl StoreState {
    fn seeded(tasks: Vec<Task>) -> Self {
        let next_id = tasks
            .iter()
            .map(|task| task.id)
            .max()
            .map_or(Some(TaskId(1)), TaskId::next);
        Self { tasks, next_id }
    }

    fn allocate_id(&mut self) -> StoreResult<TaskId> {
        let id = self.next_id.ok_or(StoreError::IdsExhausted)?;
        self.next_id = id.next();
        Ok(id)
    }

    fn position(&self, id: TaskId) -> StoreResult<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}

impl TaskStore {
    /// Create a store over `seed`. The allocator starts one past the largest seeded id.
    pub fn new(seed: Vec<Task>, latency: Arc<dyn LatencyPolicy>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::seeded(seed))),
            latency,
        }
    }

    /// Create a store whose operations resolve without delay.
    pub fn without_latency(seed: Vec<Task>) -> Self {
        Self::new(seed, Arc::new(NoLatency))
    }

    /// Create a store over the bundled seed dataset.
    ///
    /// # Errors
    /// Returns an error if the bundled dataset does not decode.
    pub fn with_bundled_seed(latency: Arc<dyn LatencyPolicy>) -> StoreResult<Self> {
        Ok(Self::new(seed::bundled_tasks()?, latency))
    }

    /// Snapshot of every task in insertion order.
    ///
    /// # Errors
    /// Only fails with [`StoreError::Interrupted`].
    pub async fn get_all(&self) -> StoreResult<Vec<Task>> {
        self.dispatch(StoreOp::GetAll, |state| Ok(state.tasks.clone()))
            .await
    }

    /// Copy of the task with the given id.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidId`] for non-numeric ids and
    /// [`StoreError::NotFound`] when no task matches.
    pub async fn get_by_id(&self, id: impl Into<RawId>) -> StoreResult<Task> {
        let id = id.into().into_task_id()?;
        self.dispatch(StoreOp::GetById, move |state| {
            let index = state.position(id)?;
            Ok(state.tasks[index].clone())
        })
        .await
    }

    /// Allocate an id, fill defaults, stamp timestamps and append the task.
    ///
    /// # Errors
    /// Returns [`StoreError::IdsExhausted`] once `u64::MAX` has been allocated.
    pub async fn create(&self, input: NewTask) -> StoreResult<Task> {
        self.dispatch(StoreOp::Create, move |state| {
            let id = state.allocate_id()?;
            let task = Task::from_new(id, input, OffsetDateTime::now_utc());
            state.tasks.push(task.clone());
            info!(task = %id, "Created task");
            Ok(task)
        })
        .await
    }

    /// Merge the supplied fields into an existing task.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidId`] for non-numeric ids and
    /// [`StoreError::NotFound`] when no task matches.
    pub async fn update(&self, id: impl Into<RawId>, update: TaskUpdate) -> StoreResult<Task> {
        let id = id.into().into_task_id()?;
        self.dispatch(StoreOp::Update, move |state| {
            let index = state.position(id)?;
            let task = &mut state.tasks[index];
            update.apply_to(task, OffsetDateTime::now_utc());
            info!(task = %id, "Updated task");
            Ok(task.clone())
        })
        .await
    }

    /// Remove a task and return the removed record.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidId`] for non-numeric ids and
    /// [`StoreError::NotFound`] when no task matches.
    pub async fn delete(&self, id: impl Into<RawId>) -> StoreResult<Task> {
        let id = id.into().into_task_id()?;
        self.dispatch(StoreOp::Delete, move |state| {
            let index = state.position(id)?;
            let removed = state.tasks.remove(index);
            info!(task = %id, "Deleted task");
            Ok(removed)
        })
        .await
    }

    /// Copies of every task linked to the given contact.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidId`] for non-numeric ids.
    pub async fn get_by_contact_id(&self, contact: impl Into<RawId>) -> StoreResult<Vec<Task>> {
        let contact: ContactId = contact.into().into_contact_id()?;
        self.dispatch(StoreOp::GetByContactId, move |state| {
            Ok(state
                .tasks
                .iter()
                .filter(|task| task.contact_id == Some(contact))
                .cloned()
                .collect())
        })
        .await
    }

    /// Run `apply` against the shared state after the operation's delay.
    ///
    /// The work is spawned so that dropping the returned future does not cancel it.
    async fn dispatch<T, F>(&self, op: StoreOp, apply: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut StoreState) -> StoreResult<T> + Send + 'static,
    {
        let delay = self.latency.delay(op);
        let state = Arc::clone(&self.state);
        debug!(%op, delay = ?delay, "Dispatching store operation");

        let handle = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let mut guard = state.lock().await;
            apply(&mut guard)
        });

        handle
            .await
            .map_err(|err| StoreError::Interrupted(format!("{op}: {err}")))?
    }
}
