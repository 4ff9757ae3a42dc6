//! Application layer logic for taskdesk.
//!
//! This crate provides the task list and task form logic shared by every
//! frontend, the contact read contract, notices and configuration.

pub mod config;
pub mod contact_source;
pub mod filter_util;
pub mod notice;
pub mod task_form;
pub mod task_list;

// Re-exports for convenience
pub use config::{AppConfig, LatencyConfig, SeedConfig};
pub use contact_source::ContactSource;
pub use filter_util::{FilterBuildError, FilterKey, TaskListFilter, TaskListFilterBuilder};
pub use notice::Notice;
pub use task_form::{FormError, FormField, FormMode, FormState, SubmitOutcome, TaskForm, TaskFormFields};
pub use task_list::{EmptyState, ListState, TaskListPage, TaskRow, project_rows};
