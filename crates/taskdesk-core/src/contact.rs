use serde::{Deserialize, Serialize};

use crate::id::ContactId;

/// Read-only contact record consumed for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Identifier referenced by [`Task::contact_id`](crate::Task::contact_id).
    #[serde(rename = "Id")]
    pub id: ContactId,
    /// Display name.
    pub name: String,
    /// Company the contact works for.
    #[serde(default)]
    pub company: String,
    /// Email address, when known.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number, when known.
    #[serde(default)]
    pub phone: Option<String>,
}

impl Contact {
    /// Label used for contact pickers: `"{name} - {company}"`.
    #[must_use]
    pub fn option_label(&self) -> String {
        format!("{} - {}", self.name, self.company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_label_joins_name_and_company() {
        let contact = Contact {
            id: ContactId(1),
            name: "Ada Lovelace".into(),
            company: "Analytical Engines".into(),
            email: None,
            phone: None,
        };
        assert_eq!(contact.option_label(), "Ada Lovelace - Analytical Engines");
    }
}
