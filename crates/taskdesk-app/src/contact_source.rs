//! Read contract for the contact reference collection.

use anyhow::Error;
use taskdesk_core::Contact;
use taskdesk_store::{ContactDirectory, StoreError};

/// Anything that can list contacts for display-name lookup.
#[allow(async_fn_in_trait)]
pub trait ContactSource: Send + Sync {
    /// Error type bubbled up from the backing collection.
    type Error: Into<Error> + Send;

    /// List every contact.
    ///
    /// # Errors
    /// Returns a source-specific error when listing fails.
    async fn get_all(&self) -> Result<Vec<Contact>, Self::Error>;
}

impl ContactSource for ContactDirectory {
    type Error = StoreError;

    async fn get_all(&self) -> Result<Vec<Contact>, Self::Error> {
        Self::get_all(self).await
    }
}
