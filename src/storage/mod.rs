pub mod json;
pub mod memory;

use std::fs;
use std::path::Path;

use uuid::Uuid;

use crate::domain::contact::{Contact, Field};
use crate::errors::AppError;

pub use json::JsonStorage;
pub use memory::MemStore;

/// Storage primitive the contact manager writes through. Each call is atomic
/// on its own; the manager serialises multi-call sequences.
pub trait ContactStore: Send + Sync {
    fn get(&self, id: &Uuid) -> Result<Option<Contact>, AppError>;

    /// All contacts in insertion order.
    fn get_all(&self) -> Result<Vec<Contact>, AppError>;

    /// Exact, case-sensitive match on a single field.
    fn find_by_field(&self, field: Field, value: &str) -> Result<Vec<Contact>, AppError>;

    fn insert(&mut self, contact: Contact) -> Result<(), AppError>;

    fn replace(&mut self, id: &Uuid, contact: Contact) -> Result<(), AppError>;

    fn remove(&mut self, id: &Uuid) -> Result<(), AppError>;

    fn get_medium(&self) -> &str;
}

pub(crate) fn field_matches(contact: &Contact, field: Field, value: &str) -> bool {
    match field {
        Field::FirstName => contact.first_name == value,
        Field::LastName => contact.last_name == value,
        Field::Email => contact.email == value,
        Field::Phone => contact.phone == value,
        Field::AdditionalInfo => contact.additional_info.as_deref() == Some(value),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMediums {
    Mem,
    Json,
}

impl StorageMediums {
    pub fn is_json(&self) -> bool {
        matches!(self, StorageMediums::Json)
    }

    pub fn is_which(&self) -> &str {
        if self.is_json() { "json" } else { "mem" }
    }

    pub fn from(str: &str) -> Result<Self, AppError> {
        match str.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StorageMediums::Json),
            "mem" => Ok(StorageMediums::Mem),
            other => Err(AppError::Config(format!(
                "Not a recognized storage medium: '{other}' (expected mem or json)"
            ))),
        }
    }
}

pub fn parse_storage_type(
    medium: StorageMediums,
    json_path: &str,
) -> Result<Box<dyn ContactStore>, AppError> {
    match medium {
        StorageMediums::Json => Ok(Box::new(JsonStorage::open(json_path)?)),
        StorageMediums::Mem => Ok(Box::new(MemStore::new())),
    }
}

pub fn create_file_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(AppError::unavailable)?;
    }
    Ok(())
}
