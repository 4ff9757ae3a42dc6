//! Seed datasets for the in-memory stores.

use std::fs;
use std::path::Path;

use taskdesk_core::{Contact, Task};

use crate::error::StoreError;

const BUNDLED_TASKS: &str = include_str!("../data/tasks.json");
const BUNDLED_CONTACTS: &str = include_str!("../data/contacts.json");

/// Tasks shipped with the crate.
///
/// # Errors
/// Returns an error if the bundled JSON does not decode.
pub fn bundled_tasks() -> Result<Vec<Task>, StoreError> {
    Ok(serde_json::from_str(BUNDLED_TASKS)?)
}

/// Contacts shipped with the crate.
///
/// # Errors
/// Returns an error if the bundled JSON does not decode.
pub fn bundled_contacts() -> Result<Vec<Contact>, StoreError> {
    Ok(serde_json::from_str(BUNDLED_CONTACTS)?)
}

/// Load a task seed from a JSON array on disk.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
pub fn load_tasks(path: impl AsRef<Path>) -> Result<Vec<Task>, StoreError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Load a contact seed from a JSON array on disk.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
pub fn load_contacts(path: impl AsRef<Path>) -> Result<Vec<Contact>, StoreError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn bundled_tasks_decode_with_unique_ids() {
        let tasks = bundled_tasks().unwrap_or_else(|err| panic!("bundled tasks: {err}"));
        assert!(!tasks.is_empty());
        let ids: HashSet<_> = tasks.iter().map(|task| task.id).collect();
        assert_eq!(ids.len(), tasks.len());
        assert!(tasks.iter().all(|task| task.created_at <= task.updated_at));
    }

    #[test]
    fn bundled_contacts_cover_task_references() {
        let tasks = bundled_tasks().unwrap_or_else(|err| panic!("bundled tasks: {err}"));
        let contacts = bundled_contacts().unwrap_or_else(|err| panic!("bundled contacts: {err}"));
        let known: HashSet<_> = contacts.iter().map(|contact| contact.id).collect();
        assert!(tasks.iter().filter_map(|task| task.contact_id).all(|id| known.contains(&id)));
    }

    #[test]
    fn load_tasks_reports_decode_errors() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{ not json").unwrap_or_else(|err| panic!("write seed: {err}"));

        let Err(err) = load_tasks(&path) else {
            panic!("expected decode failure");
        };
        assert!(matches!(err, StoreError::SeedParse(_)));
    }

    #[test]
    fn load_tasks_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let Err(err) = load_tasks(dir.path().join("absent.json")) else {
            panic!("expected io failure");
        };
        assert!(matches!(err, StoreError::SeedIo(_)));
    }
}
