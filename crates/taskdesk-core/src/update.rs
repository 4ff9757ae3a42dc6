use time::OffsetDateTime;

use crate::id::ContactId;
use crate::state::{TaskPriority, TaskStatus};
use crate::Task;

/// Patch for the nullable due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueDatePatch {
    /// Set the deadline.
    Set {
        /// New deadline.
        due: OffsetDateTime,
    },
    /// Remove the deadline.
    Clear,
}

/// Patch for the nullable contact link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPatch {
    /// Link to the given contact.
    Set {
        /// Referenced contact.
        contact: ContactId,
    },
    /// Drop the link.
    Clear,
}

/// Field-level partial update. `None` keeps the stored value, `Some` replaces it
/// (including with an empty string or a `Clear` patch).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    /// Overwrite the title.
    pub title: Option<String>,
    /// Overwrite the description.
    pub description: Option<String>,
    /// Overwrite the status.
    pub status: Option<TaskStatus>,
    /// Overwrite the priority.
    pub priority: Option<TaskPriority>,
    /// Patch applied to the due date.
    pub due_date: Option<DueDatePatch>,
    /// Overwrite the assignee.
    pub assigned_to: Option<String>,
    /// Patch applied to the contact link.
    pub contact_id: Option<ContactPatch>,
}

impl TaskUpdate {
    /// Returns true when no field is supplied. Applying it still refreshes `updated_at`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.assigned_to.is_none()
            && self.contact_id.is_none()
    }

    /// Update that only changes the status.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Merge the supplied fields into `task` and stamp `updated_at`.
    ///
    /// `id` and `created_at` are never touched; `updated_at` never moves before `created_at`.
    pub fn apply_to(self, task: &mut Task, now: OffsetDateTime) {
        let Self {
            title,
            description,
            status,
            priority,
            due_date,
            assigned_to,
            contact_id,
        } = self;

        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = description {
            task.description = description;
        }
        if let Some(status) = status {
            task.status = status;
        }
        if let Some(priority) = priority {
            task.priority = priority;
        }
        if let Some(patch) = due_date {
            task.due_date = match patch {
                DueDatePatch::Set { due } => Some(due),
                DueDatePatch::Clear => None,
            };
        }
        if let Some(assigned_to) = assigned_to {
            task.assigned_to = assigned_to;
        }
        if let Some(patch) = contact_id {
            task.contact_id = match patch {
                ContactPatch::Set { contact } => Some(contact),
                ContactPatch::Clear => None,
            };
        }

        task.updated_at = now.max(task.created_at);
    }
}
