//! Contact reference collection consumed for display-name lookup.

use std::sync::Arc;

use taskdesk_core::Contact;
use tracing::debug;

use crate::error::StoreError;
use crate::latency::{LatencyPolicy, NoLatency, StoreOp};
use crate::seed;

/// Read-only in-memory contact collection.
#[derive(Clone, Debug)]
pub struct ContactDirectory {
    contacts: Arc<[Contact]>,
    latency: Arc<dyn LatencyPolicy>,
}

impl ContactDirectory {
    /// Build a directory over explicit contacts.
    pub fn new(contacts: Vec<Contact>, latency: Arc<dyn LatencyPolicy>) -> Self {
        Self {
            contacts: contacts.into(),
            latency,
        }
    }

    /// Build a directory that answers without delay.
    pub fn without_latency(contacts: Vec<Contact>) -> Self {
        Self::new(contacts, Arc::new(NoLatency))
    }

    /// Build a directory over the bundled contacts.
    ///
    /// # Errors
    /// Returns an error if the bundled dataset does not decode.
    pub fn with_bundled_seed(latency: Arc<dyn LatencyPolicy>) -> Result<Self, StoreError> {
        Ok(Self::new(seed::bundled_contacts()?, latency))
    }

    /// Every contact, in seed order.
    ///
    /// # Errors
    /// Never fails today; the signature matches the remote contract.
    pub async fn get_all(&self) -> Result<Vec<Contact>, StoreError> {
        let delay = self.latency.delay(StoreOp::ContactsGetAll);
        debug!(op = %StoreOp::ContactsGetAll, delay = ?delay, "Listing contacts");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(self.contacts.to_vec())
    }
}
