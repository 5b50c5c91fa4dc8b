pub mod contact;
pub mod manager;

pub use crate::errors::AppError;
pub use crate::storage::{ContactStore, MemStore};
pub use crate::validation::Validator;
pub use contact::{Contact, ContactDraft, ContactPatch, Field, Utc};
pub use manager::ContactManager;
pub use uuid::Uuid;
