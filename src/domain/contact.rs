use std::fmt;

pub use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::validation::Validated;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,

    #[serde(default)]
    pub additional_info: Option<String>,

    #[serde(default)]
    pub verified: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a caller may submit. Every other attribute of [`Contact`] is owned by the store.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    AdditionalInfo,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::AdditionalInfo => "additionalInfo",
        }
    }

    /// Human readable label used in violation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::Email => "Email",
            Field::Phone => "Phone number",
            Field::AdditionalInfo => "Additional information",
        }
    }

    pub fn taken_message(&self) -> String {
        format!("This {} is already registered", self.label().to_lowercase())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field set submitted on create. Absent fields stay `None` so the validator
/// can tell "missing" apart from "empty".
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub additional_info: Option<String>,
    pub verified: Option<bool>,
}

impl ContactDraft {
    pub fn new(first_name: &str, last_name: &str, email: &str, phone: &str) -> Self {
        ContactDraft {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
            additional_info: None,
            verified: None,
        }
    }

    pub fn value_of(&self, field: Field) -> Option<&str> {
        match field {
            Field::FirstName => self.first_name.as_deref(),
            Field::LastName => self.last_name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Phone => self.phone.as_deref(),
            Field::AdditionalInfo => self.additional_info.as_deref(),
        }
    }
}

impl Validated<ContactDraft> {
    /// Builds the stored record. A validated draft carries every required field.
    pub(crate) fn into_contact(self, id: Uuid, now: DateTime<Utc>) -> Contact {
        let draft = self.into_inner();
        Contact {
            id,
            first_name: draft.first_name.unwrap_or_default(),
            last_name: draft.last_name.unwrap_or_default(),
            email: draft.email.unwrap_or_default(),
            phone: draft.phone.unwrap_or_default(),
            additional_info: draft.additional_info,
            verified: draft.verified.unwrap_or(false),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. `additional_info` is doubly optional:
/// `None` leaves it alone, `Some(None)` clears it (JSON `null`).
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_present_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_info: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

impl ContactPatch {
    /// `None` when the field was not supplied. A cleared `additionalInfo`
    /// is checked as an empty string.
    pub fn value_of(&self, field: Field) -> Option<&str> {
        match field {
            Field::FirstName => self.first_name.as_deref(),
            Field::LastName => self.last_name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Phone => self.phone.as_deref(),
            Field::AdditionalInfo => self
                .additional_info
                .as_ref()
                .map(|info| info.as_deref().unwrap_or_default()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &ContactPatch::default()
    }

    /// Merges supplied fields onto `contact`. Identity and `created_at` are never touched.
    pub(crate) fn apply_to(self, contact: &mut Contact) {
        if let Some(first_name) = self.first_name {
            contact.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            contact.last_name = last_name;
        }
        if let Some(email) = self.email {
            contact.email = email;
        }
        if let Some(phone) = self.phone {
            contact.phone = phone;
        }
        if let Some(additional_info) = self.additional_info {
            contact.additional_info = additional_info;
        }
        if let Some(verified) = self.verified {
            contact.verified = verified;
        }
    }
}

// A field that is present in the payload always lands here, even when it is `null`.
fn deserialize_present_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
