use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseIntError, str::FromStr};
use thiserror::Error;

/// Identifier of a task record, allocated by the store.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Identifier following this one in allocation order, or `None` past `u64::MAX`.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TaskId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Identifier of a contact in the reference collection.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub u64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ContactId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<u64> for ContactId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Identifier that failed to parse as a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identifier {raw:?}: expected a non-negative integer")]
pub struct InvalidId {
    /// The rejected input, verbatim.
    pub raw: String,
}

/// Identifier as received from a caller: either already numeric or textual
/// (route parameters, CLI arguments, form fields).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawId {
    /// Numeric identifier.
    Int(u64),
    /// Textual identifier that still needs parsing.
    Text(String),
}

impl RawId {
    /// Resolve into a numeric value, rejecting non-numeric text.
    ///
    /// # Errors
    /// Returns [`InvalidId`] when the text is not a non-negative integer.
    pub fn resolve(self) -> Result<u64, InvalidId> {
        match self {
            Self::Int(value) => Ok(value),
            Self::Text(raw) => raw.trim().parse().map_err(|_| InvalidId { raw }),
        }
    }

    /// Resolve into a [`TaskId`].
    ///
    /// # Errors
    /// Returns [`InvalidId`] when the text is not a non-negative integer.
    pub fn into_task_id(self) -> Result<TaskId, InvalidId> {
        self.resolve().map(TaskId)
    }

    /// Resolve into a [`ContactId`].
    ///
    /// # Errors
    /// Returns [`InvalidId`] when the text is not a non-negative integer.
    pub fn into_contact_id(self) -> Result<ContactId, InvalidId> {
        self.resolve().map(ContactId)
    }
}

impl From<u64> for RawId {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

impl From<TaskId> for RawId {
    fn from(value: TaskId) -> Self {
        Self::Int(value.0)
    }
}

impl From<ContactId> for RawId {
    fn from(value: ContactId) -> Self {
        Self::Int(value.0)
    }
}

impl From<&str> for RawId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for RawId {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}
