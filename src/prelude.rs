pub use crate::api::{SharedManager, router};
pub use crate::cli::{Cli, log_filter, run_app};
pub use crate::domain::{
    contact::{self, Contact, ContactDraft, ContactPatch, Field},
    manager::ContactManager,
};
pub use crate::errors::AppError;
pub use crate::storage::{self, ContactStore, JsonStorage, MemStore, StorageMediums};
pub use crate::validation::{RuleKind, Validated, ValidationErrors, Validator, Violation};
pub use uuid::{self, Uuid};
