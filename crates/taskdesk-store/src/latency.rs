//! Simulated network latency applied before every store operation.

use std::fmt;
use std::time::Duration;

/// Store operation kinds, used to pick a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    /// `TaskStore::get_all`.
    GetAll,
    /// `TaskStore::get_by_id`.
    GetById,
    /// `TaskStore::create`.
    Create,
    /// `TaskStore::update`.
    Update,
    /// `TaskStore::delete`.
    Delete,
    /// `TaskStore::get_by_contact_id`.
    GetByContactId,
    /// `ContactDirectory::get_all`.
    ContactsGetAll,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GetAll => "get_all",
            Self::GetById => "get_by_id",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::GetByContactId => "get_by_contact_id",
            Self::ContactsGetAll => "contacts_get_all",
        })
    }
}

/// Strategy deciding how long an operation waits before it resolves.
pub trait LatencyPolicy: Send + Sync + fmt::Debug {
    /// Delay to apply before `op` touches the store.
    fn delay(&self, op: StoreOp) -> Duration;
}

/// Resolve every operation immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

impl LatencyPolicy for NoLatency {
    fn delay(&self, _op: StoreOp) -> Duration {
        Duration::ZERO
    }
}

/// Fixed per-operation delays modelling a remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedLatency {
    /// Delay for listing all tasks.
    pub get_all: Duration,
    /// Delay for a single lookup.
    pub get_by_id: Duration,
    /// Delay for creating a task.
    pub create: Duration,
    /// Delay for updating a task.
    pub update: Duration,
    /// Delay for deleting a task.
    pub delete: Duration,
    /// Delay for the contact lookup.
    pub get_by_contact_id: Duration,
    /// Delay for listing contacts.
    pub contacts_get_all: Duration,
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            get_all: Duration::from_millis(400),
            get_by_id: Duration::from_millis(300),
            create: Duration::from_millis(500),
            update: Duration::from_millis(500),
            delete: Duration::from_millis(400),
            get_by_contact_id: Duration::from_millis(300),
            contacts_get_all: Duration::from_millis(300),
        }
    }
}

impl LatencyPolicy for SimulatedLatency {
    fn delay(&self, op: StoreOp) -> Duration {
        match op {
            StoreOp::GetAll => self.get_all,
            StoreOp::GetById => self.get_by_id,
            StoreOp::Create => self.create,
            StoreOp::Update => self.update,
            StoreOp::Delete => self.delete,
            StoreOp::GetByContactId => self.get_by_contact_id,
            StoreOp::ContactsGetAll => self.contacts_get_all,
        }
    }
}
