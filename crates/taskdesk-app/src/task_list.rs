//! Task list view logic: filtering, derived display state and page actions.

use taskdesk_core::{Contact, ContactId, Task, TaskId};
use taskdesk_store::TaskStore;
use time::OffsetDateTime;
use tracing::warn;

use crate::contact_source::ContactSource;
use crate::filter_util::TaskListFilter;
use crate::notice::Notice;

/// A task selected for display plus attributes derived at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow<'a> {
    /// The underlying record.
    pub task: &'a Task,
    /// Name of the linked contact, when the link resolves.
    pub contact_name: Option<&'a str>,
    /// Due date has passed and the task is not completed.
    pub overdue: bool,
}

/// Filter `tasks` and annotate each survivor, preserving input order.
#[must_use]
pub fn project_rows<'a>(
    tasks: &'a [Task],
    contacts: &'a [Contact],
    filter: &TaskListFilter,
    now: OffsetDateTime,
) -> Vec<TaskRow<'a>> {
    tasks
        .iter()
        .filter(|task| filter.matches(task))
        .map(|task| TaskRow {
            task,
            contact_name: task.contact_id.and_then(|id| contact_name(contacts, id)),
            overdue: task.is_overdue(now),
        })
        .collect()
}

fn contact_name(contacts: &[Contact], id: ContactId) -> Option<&str> {
    contacts
        .iter()
        .find(|contact| contact.id == id)
        .map(|contact| contact.name.as_str())
}

/// Load status of the list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    /// Nothing loaded yet.
    Loading,
    /// Tasks and contacts are available.
    Loaded,
    /// The last load failed; calling [`TaskListPage::load`] again retries.
    Failed {
        /// Error text of the failed load.
        message: String,
    },
}

/// Placeholder shown when no task survives filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Headline.
    pub title: &'static str,
    /// Hint depending on whether filters are active.
    pub description: &'static str,
}

/// Task list page: owns the loaded data and the caller-controlled filter.
pub struct TaskListPage<C> {
    store: TaskStore,
    contact_source: C,
    tasks: Vec<Task>,
    contacts: Vec<Contact>,
    filter: TaskListFilter,
    state: ListState,
}

impl<C> TaskListPage<C> {
    /// Create a page that has not loaded yet.
    pub fn new(store: TaskStore, contact_source: C) -> Self {
        Self {
            store,
            contact_source,
            tasks: Vec::new(),
            contacts: Vec::new(),
            filter: TaskListFilter::default(),
            state: ListState::Loading,
        }
    }

    /// Current load status.
    pub const fn state(&self) -> &ListState {
        &self.state
    }

    /// Loaded tasks, unfiltered.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Loaded contacts.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Active filter.
    pub const fn filter(&self) -> &TaskListFilter {
        &self.filter
    }

    /// Mutable access to the filter (search box and facet selectors).
    pub const fn filter_mut(&mut self) -> &mut TaskListFilter {
        &mut self.filter
    }

    /// Rows to render at `now`.
    #[must_use]
    pub fn rows(&self, now: OffsetDateTime) -> Vec<TaskRow<'_>> {
        project_rows(&self.tasks, &self.contacts, &self.filter, now)
    }

    /// Placeholder to show when nothing matches, or `None` when rows exist.
    #[must_use]
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.tasks.iter().any(|task| self.filter.matches(task)) {
            return None;
        }
        let description = if self.filter.is_narrowed() {
            "Try adjusting your search or filters"
        } else {
            "Get started by creating your first task"
        };
        Some(EmptyState {
            title: "No tasks found",
            description,
        })
    }
}

impl<C: ContactSource> TaskListPage<C> {
    /// Fetch tasks and contacts concurrently. Returns an error notice on failure.
    pub async fn load(&mut self) -> Option<Notice> {
        self.state = ListState::Loading;
        let (tasks, contacts) = tokio::join!(self.store.get_all(), self.contact_source.get_all());

        let loaded: anyhow::Result<(Vec<Task>, Vec<Contact>)> = match (tasks, contacts) {
            (Ok(tasks), Ok(contacts)) => Ok((tasks, contacts)),
            (Err(err), _) => Err(err.into()),
            (_, Err(err)) => Err(err.into()),
        };

        match loaded {
            Ok((tasks, contacts)) => {
                self.tasks = tasks;
                self.contacts = contacts;
                self.state = ListState::Loaded;
                None
            }
            Err(err) => {
                warn!(error = %err, "Failed to load tasks");
                self.state = ListState::Failed {
                    message: err.to_string(),
                };
                Some(Notice::error("Failed to load tasks"))
            }
        }
    }

    /// Delete a task through the store and drop it from the local list.
    pub async fn delete(&mut self, id: TaskId) -> Notice {
        match self.store.delete(id).await {
            Ok(removed) => {
                self.tasks.retain(|task| task.id != removed.id);
                Notice::success("Task deleted successfully")
            }
            Err(err) => {
                warn!(task = %id, error = %err, "Failed to delete task");
                Notice::error("Failed to delete task")
            }
        }
    }
}
