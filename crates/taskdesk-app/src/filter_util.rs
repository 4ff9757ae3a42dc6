use std::fmt::{self, Display};

use taskdesk_core::{Task, TaskPriority, TaskStatus, TextMatcher};
use thiserror::Error;

/// Error type returned while constructing list filters from user-facing inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterBuildError {
    #[error("invalid status: {token}")]
    InvalidStatus { token: String },
    #[error("invalid priority: {token}")]
    InvalidPriority { token: String },
}

/// Result alias for filter construction helpers.
pub type FilterBuildResult<T> = Result<T, FilterBuildError>;

/// Categorical facets the list can be narrowed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    /// Status facet.
    Status,
    /// Priority facet.
    Priority,
}

impl FilterKey {
    /// Label shown next to the facet selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::Priority => "Priority",
        }
    }

    /// Selectable `(value, label)` pairs; the leading empty value means "no constraint".
    #[must_use]
    pub fn options(self) -> Vec<(&'static str, &'static str)> {
        match self {
            Self::Status => std::iter::once(("", "All Statuses"))
                .chain(TaskStatus::ALL.iter().map(|status| (status.as_str(), status.label())))
                .collect(),
            Self::Priority => std::iter::once(("", "All Priorities"))
                .chain(
                    TaskPriority::ALL
                        .iter()
                        .map(|priority| (priority.as_str(), priority.label())),
                )
                .collect(),
        }
    }
}

/// Search text plus the two independent facets applied to the task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListFilter {
    /// Free-text query over title and description; empty matches everything.
    pub search: String,
    /// Required status, if any.
    pub status: Option<TaskStatus>,
    /// Required priority, if any.
    pub priority: Option<TaskPriority>,
}

impl TaskListFilter {
    /// Number of active facets. Search text is not counted.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        usize::from(self.status.is_some()) + usize::from(self.priority.is_some())
    }

    /// Returns true when search text or any facet is set.
    #[must_use]
    pub fn is_narrowed(&self) -> bool {
        !self.search.is_empty() || self.active_filter_count() > 0
    }

    /// Update a single facet from its select value (`""` clears it).
    ///
    /// # Errors
    /// Returns an error if the value is not a known status or priority.
    pub fn set_filter(&mut self, key: FilterKey, value: &str) -> FilterBuildResult<()> {
        match key {
            FilterKey::Status => self.status = parse_status(value)?,
            FilterKey::Priority => self.priority = parse_priority(value)?,
        }
        Ok(())
    }

    /// Reset both facets and the search text.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether `task` passes search, status and priority constraints.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let matches_search = TextMatcher::new(&self.search).is_none_or(|matcher| matcher.matches(task));
        let matches_status = self.status.is_none_or(|status| task.status == status);
        let matches_priority = self.priority.is_none_or(|priority| task.priority == priority);
        matches_search && matches_status && matches_priority
    }
}

/// Builder that accepts user-facing strings and normalizes them into [`TaskListFilter`] values.
#[derive(Debug, Clone, Default)]
pub struct TaskListFilterBuilder {
    search: String,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
}

impl TaskListFilterBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the search text (kept verbatim; `None` means no search).
    #[must_use]
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.unwrap_or_default();
        self
    }

    /// Configure the status facet from a select value.
    ///
    /// # Errors
    /// Returns an error if the value is not a known status.
    pub fn with_status(mut self, status: Option<&str>) -> FilterBuildResult<Self> {
        self.status = parse_status(status.unwrap_or_default())?;
        Ok(self)
    }

    /// Configure the priority facet from a select value.
    ///
    /// # Errors
    /// Returns an error if the value is not a known priority.
    pub fn with_priority(mut self, priority: Option<&str>) -> FilterBuildResult<Self> {
        self.priority = parse_priority(priority.unwrap_or_default())?;
        Ok(self)
    }

    /// Build the final [`TaskListFilter`].
    #[must_use]
    pub fn build(self) -> TaskListFilter {
        TaskListFilter {
            search: self.search,
            status: self.status,
            priority: self.priority,
        }
    }
}

fn parse_status(value: &str) -> FilterBuildResult<Option<TaskStatus>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| FilterBuildError::InvalidStatus {
            token: value.to_owned(),
        })
}

fn parse_priority(value: &str) -> FilterBuildResult<Option<TaskPriority>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| FilterBuildError::InvalidPriority {
            token: value.to_owned(),
        })
}

impl FilterBuildError {
    /// Convert the error into a message that is friendly for end-users.
    #[must_use]
    pub fn describe_user_facing(&self) -> String {
        match self {
            Self::InvalidStatus { token } => {
                format!("Unknown status \"{token}\" (expected pending, in-progress or completed)")
            }
            Self::InvalidPriority { token } => {
                format!("Unknown priority \"{token}\" (expected low, medium or high)")
            }
        }
    }
}

impl Display for TaskListFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskListFilter")
            .field("search", &self.search)
            .field("status", &self.status.map(TaskStatus::as_str))
            .field("priority", &self.priority.map(TaskPriority::as_str))
            .finish()
    }
}
