//! User-visible notifications raised by list and form logic.

use std::fmt;

/// Toast-style message handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Operation succeeded.
    Success(String),
    /// Operation failed or input was rejected.
    Error(String),
}

impl Notice {
    pub(crate) fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    /// Message text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }

    /// Returns true for [`Notice::Error`].
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
