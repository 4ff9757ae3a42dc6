//! Domain types for taskdesk: task records, contacts, identifiers and update patches.

/// Reference contacts used for display-name lookup.
pub mod contact;
/// Identifier types and caller-side id coercion.
pub mod id;
/// Status and priority enumerations.
pub mod state;
/// Case-insensitive search over task text.
pub mod text_matcher;
/// Partial update payloads.
pub mod update;

pub use crate::contact::Contact;
pub use crate::id::{ContactId, InvalidId, RawId, TaskId};
pub use crate::state::{TaskPriority, TaskStatus, UnknownVariant};
pub use crate::text_matcher::TextMatcher;
pub use crate::update::{ContactPatch, DueDatePatch, TaskUpdate};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A stored task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-allocated identifier.
    #[serde(rename = "Id")]
    pub id: TaskId,
    /// Short summary; the form layer keeps it non-empty.
    pub title: String,
    /// Free-form details.
    #[serde(default)]
    pub description: String,
    /// Progress state.
    #[serde(default)]
    pub status: TaskStatus,
    /// Urgency.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Optional deadline.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub due_date: Option<OffsetDateTime>,
    /// Free-text assignee name.
    #[serde(default)]
    pub assigned_to: String,
    /// Advisory link to a contact; never checked for existence.
    #[serde(default)]
    pub contact_id: Option<ContactId>,
    /// Creation time, immutable.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last modification time.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Task {
    /// Build a record from creation input, filling defaults for omitted fields.
    #[must_use]
    pub fn from_new(id: TaskId, input: NewTask, now: OffsetDateTime) -> Self {
        let NewTask {
            title,
            description,
            status,
            priority,
            due_date,
            assigned_to,
            contact_id,
        } = input;

        Self {
            id,
            title,
            description: description.unwrap_or_default(),
            status: status.unwrap_or_default(),
            priority: priority.unwrap_or_default(),
            due_date,
            assigned_to: assigned_to.unwrap_or_default(),
            contact_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the task is past its due date and still open at `now`.
    #[must_use]
    pub fn is_overdue(&self, now: OffsetDateTime) -> bool {
        self.status != TaskStatus::Completed && self.due_date.is_some_and(|due| due < now)
    }
}

/// Creation input; `None` fields take the record defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    /// Task title (not validated here).
    pub title: String,
    /// Defaults to empty.
    pub description: Option<String>,
    /// Defaults to [`TaskStatus::Pending`].
    pub status: Option<TaskStatus>,
    /// Defaults to [`TaskPriority::Medium`].
    pub priority: Option<TaskPriority>,
    /// Defaults to no deadline.
    pub due_date: Option<OffsetDateTime>,
    /// Defaults to empty.
    pub assigned_to: Option<String>,
    /// Defaults to no contact.
    pub contact_id: Option<ContactId>,
}

impl NewTask {
    /// Creation input with only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}
