//! Task form logic: field state, validation and dispatch to the store.

use taskdesk_core::{
    Contact, ContactId, ContactPatch, DueDatePatch, InvalidId, NewTask, RawId, Task, TaskId,
    TaskPriority, TaskStatus, TaskUpdate,
};
use taskdesk_store::{StoreError, TaskStore};
use thiserror::Error;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};
use tracing::warn;

use crate::contact_source::ContactSource;
use crate::notice::Notice;

/// Whether the form creates a new task or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// New-record mode.
    Create,
    /// Edit mode for the given task.
    Edit(TaskId),
}

impl FormMode {
    /// Derive the mode from an optional route parameter (`/tasks/edit/:id`).
    ///
    /// # Errors
    /// Returns an error if the parameter is present but not numeric.
    pub fn from_route(param: Option<&str>) -> Result<Self, InvalidId> {
        param.map_or(Ok(Self::Create), |raw| {
            RawId::from(raw).into_task_id().map(Self::Edit)
        })
    }

    /// Returns true in edit mode.
    #[must_use]
    pub const fn is_edit(self) -> bool {
        matches!(self, Self::Edit(_))
    }
}

/// Editable fields, held as the raw strings bound to the input widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFormFields {
    /// Required title.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Status select value.
    pub status: String,
    /// Priority select value.
    pub priority: String,
    /// Date-only `YYYY-MM-DD`, or empty.
    pub due_date: String,
    /// Assignee text.
    pub assigned_to: String,
    /// Contact select value, or empty.
    pub contact_id: String,
}

impl Default for TaskFormFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: TaskStatus::Pending.as_str().to_owned(),
            priority: TaskPriority::Medium.as_str().to_owned(),
            due_date: String::new(),
            assigned_to: String::new(),
            contact_id: String::new(),
        }
    }
}

/// Field selector for [`TaskForm::set_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// `title`.
    Title,
    /// `description`.
    Description,
    /// `status`.
    Status,
    /// `priority`.
    Priority,
    /// `due_date`.
    DueDate,
    /// `assigned_to`.
    AssignedTo,
    /// `contact_id`.
    ContactId,
}

/// Input rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Title is empty after trimming.
    #[error("Please enter a task title")]
    MissingTitle,
    /// Status select holds an unknown token.
    #[error("Please choose a valid status")]
    InvalidStatus(String),
    /// Priority select holds an unknown token.
    #[error("Please choose a valid priority")]
    InvalidPriority(String),
    /// Due date is neither empty nor `YYYY-MM-DD`.
    #[error("Please enter a valid due date")]
    InvalidDueDate(String),
    /// Contact select is neither empty nor numeric.
    #[error("Please choose a valid contact")]
    InvalidContact(String),
}

struct ValidatedFields {
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<OffsetDateTime>,
    assigned_to: String,
    contact_id: Option<ContactId>,
}

impl TaskFormFields {
    /// Project a stored task into editable fields.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.as_str().to_owned(),
            priority: task.priority.as_str().to_owned(),
            due_date: task.due_date.map(format_due_date).unwrap_or_default(),
            assigned_to: task.assigned_to.clone(),
            contact_id: task.contact_id.map(|id| id.to_string()).unwrap_or_default(),
        }
    }

    /// Mutable access to a single field.
    pub const fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::Status => &mut self.status,
            FormField::Priority => &mut self.priority,
            FormField::DueDate => &mut self.due_date,
            FormField::AssignedTo => &mut self.assigned_to,
            FormField::ContactId => &mut self.contact_id,
        }
    }

    fn validate(&self) -> Result<ValidatedFields, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::MissingTitle);
        }
        let status = self
            .status
            .parse()
            .map_err(|_| FormError::InvalidStatus(self.status.clone()))?;
        let priority = self
            .priority
            .parse()
            .map_err(|_| FormError::InvalidPriority(self.priority.clone()))?;
        let due_date = parse_due_date(&self.due_date)?;
        let contact_id = if self.contact_id.is_empty() {
            None
        } else {
            let id = RawId::from(&self.contact_id)
                .into_contact_id()
                .map_err(|_| FormError::InvalidContact(self.contact_id.clone()))?;
            Some(id)
        };

        Ok(ValidatedFields {
            title: self.title.clone(),
            description: self.description.clone(),
            status,
            priority,
            due_date,
            assigned_to: self.assigned_to.clone(),
            contact_id,
        })
    }
}

impl ValidatedFields {
    fn into_new_task(self) -> NewTask {
        NewTask {
            title: self.title,
            description: Some(self.description),
            status: Some(self.status),
            priority: Some(self.priority),
            due_date: self.due_date,
            assigned_to: Some(self.assigned_to),
            contact_id: self.contact_id,
        }
    }

    fn into_update(self) -> TaskUpdate {
        TaskUpdate {
            title: Some(self.title),
            description: Some(self.description),
            status: Some(self.status),
            priority: Some(self.priority),
            due_date: Some(
                self.due_date
                    .map_or(DueDatePatch::Clear, |due| DueDatePatch::Set { due }),
            ),
            assigned_to: Some(self.assigned_to),
            contact_id: Some(
                self.contact_id
                    .map_or(ContactPatch::Clear, |contact| ContactPatch::Set { contact }),
            ),
        }
    }
}

/// Render a stored due date as the date-only string the input widget binds to.
#[must_use]
pub fn format_due_date(due: OffsetDateTime) -> String {
    let date = due.to_offset(UtcOffset::UTC).date();
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

/// Parse a date-only input into a midnight-UTC timestamp; empty input means no due date.
///
/// # Errors
/// Returns [`FormError::InvalidDueDate`] when the text is not `YYYY-MM-DD`.
pub fn parse_due_date(raw: &str) -> Result<Option<OffsetDateTime>, FormError> {
    if raw.is_empty() {
        return Ok(None);
    }
    let date = Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|_| FormError::InvalidDueDate(raw.to_owned()))?;
    Ok(Some(date.midnight().assume_utc()))
}

/// Lifecycle of the form view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// Initial data not loaded yet.
    Loading,
    /// Fields are editable.
    Ready,
    /// A submit reached the store and has not completed; further submits are rejected.
    Saving,
    /// Loading failed; calling [`TaskForm::open`] again retries.
    Failed {
        /// Error text of the failed load.
        message: String,
    },
    /// Submission succeeded; the caller navigates back to the task list.
    Closed,
}

/// Result of [`TaskForm::submit`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Rejected locally; nothing was sent to the store.
    Invalid {
        /// Validation failure.
        error: FormError,
        /// Message to show.
        notice: Notice,
    },
    /// An earlier submit is still being saved; nothing was sent to the store.
    InFlight {
        /// Message to show.
        notice: Notice,
    },
    /// Stored successfully.
    Saved {
        /// Record as returned by the store.
        task: Task,
        /// Success message to show.
        notice: Notice,
    },
    /// The store rejected the request; fields are left intact.
    Failed {
        /// Store error, unchanged.
        error: StoreError,
        /// Failure message to show.
        notice: Notice,
    },
}

/// Create/edit form bound to a store and a contact source.
pub struct TaskForm<C> {
    store: TaskStore,
    contact_source: C,
    mode: FormMode,
    fields: TaskFormFields,
    contacts: Vec<Contact>,
    state: FormState,
}

impl<C> TaskForm<C> {
    /// Create a form in `mode`; call [`open`](Self::open) to load its data.
    pub fn new(store: TaskStore, contact_source: C, mode: FormMode) -> Self {
        Self {
            store,
            contact_source,
            mode,
            fields: TaskFormFields::default(),
            contacts: Vec::new(),
            state: FormState::Loading,
        }
    }

    /// Mode the form was opened in.
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Current field values.
    pub const fn fields(&self) -> &TaskFormFields {
        &self.fields
    }

    /// Replace a field value (input change handler).
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        *self.fields.field_mut(field) = value.into();
    }

    /// Contact picker entries: a leading "none" entry, then `(id, "name - company")`.
    #[must_use]
    pub fn contact_options(&self) -> Vec<(String, String)> {
        std::iter::once((String::new(), "Select a contact (optional)".to_owned()))
            .chain(
                self.contacts
                    .iter()
                    .map(|contact| (contact.id.to_string(), contact.option_label())),
            )
            .collect()
    }
}

impl<C: ContactSource> TaskForm<C> {
    /// Load contacts and, in edit mode, the task being edited.
    pub async fn open(&mut self) -> Option<Notice> {
        self.state = FormState::Loading;
        match self.load_initial().await {
            Ok(()) => {
                self.state = FormState::Ready;
                None
            }
            Err(err) => {
                warn!(mode = ?self.mode, error = %err, "Failed to load task form");
                self.state = FormState::Failed {
                    message: err.to_string(),
                };
                Some(Notice::error(if self.mode.is_edit() {
                    "Failed to load task"
                } else {
                    "Failed to load contacts"
                }))
            }
        }
    }

    async fn load_initial(&mut self) -> anyhow::Result<()> {
        self.contacts = self
            .contact_source
            .get_all()
            .await
            .map_err(Into::<anyhow::Error>::into)?;
        if let FormMode::Edit(id) = self.mode {
            let task = self.store.get_by_id(id).await?;
            self.fields = TaskFormFields::from_task(&task);
        }
        Ok(())
    }
}

impl<C> TaskForm<C> {
    /// Validate the fields and dispatch to `create` or `update`.
    ///
    /// The form stays in [`FormState::Saving`] until the store answers. If the
    /// returned future is dropped early the store still applies the write, so
    /// the form keeps rejecting submits.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.state == FormState::Saving {
            return SubmitOutcome::InFlight {
                notice: Notice::error("Task is still being saved"),
            };
        }
        let validated = match self.fields.validate() {
            Ok(validated) => validated,
            Err(error) => {
                let notice = Notice::error(error.to_string());
                return SubmitOutcome::Invalid { error, notice };
            }
        };

        self.state = FormState::Saving;
        let result = match self.mode {
            FormMode::Create => self.store.create(validated.into_new_task()).await,
            FormMode::Edit(id) => self.store.update(id, validated.into_update()).await,
        };

        match result {
            Ok(task) => {
                self.state = FormState::Closed;
                let message = if self.mode.is_edit() {
                    "Task updated successfully"
                } else {
                    "Task created successfully"
                };
                SubmitOutcome::Saved {
                    task,
                    notice: Notice::success(message),
                }
            }
            Err(error) => {
                self.state = FormState::Ready;
                warn!(mode = ?self.mode, error = %error, "Failed to save task");
                let message = if self.mode.is_edit() {
                    "Failed to update task"
                } else {
                    "Failed to create task"
                };
                SubmitOutcome::Failed {
                    error,
                    notice: Notice::error(message),
                }
            }
        }
    }
}
