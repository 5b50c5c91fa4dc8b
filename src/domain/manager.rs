use super::*;

use std::sync::RwLock;

/// Contact CRUD over a storage backend.
///
/// Writers hold the write lock for the whole check-then-act sequence, so a
/// uniqueness check and the write it guards can never interleave with
/// another write. Readers share the read lock and see a consistent snapshot.
pub struct ContactManager {
    storage: RwLock<Box<dyn ContactStore>>,
    validator: Validator,
}

impl ContactManager {
    pub fn new(storage: Box<dyn ContactStore>) -> Result<Self, AppError> {
        Ok(Self {
            storage: RwLock::new(storage),
            validator: Validator::new()?,
        })
    }

    /// Manager over a fresh [`MemStore`].
    pub fn in_memory() -> Result<Self, AppError> {
        Self::new(Box::new(MemStore::new()))
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn medium(&self) -> Result<String, AppError> {
        Ok(self.storage.read()?.get_medium().to_string())
    }

    pub fn create(&self, draft: ContactDraft) -> Result<Contact, AppError> {
        let draft = self.validator.validate_draft(draft)?;

        let mut storage = self.storage.write()?;
        let fields = draft.get();
        ensure_unique(&**storage, fields.email.as_deref(), fields.phone.as_deref(), None)?;

        let contact = draft.into_contact(Uuid::new_v4(), Utc::now());
        storage.insert(contact.clone())?;

        tracing::debug!(id = %contact.id, "contact created");
        Ok(contact)
    }

    pub fn list(&self) -> Result<Vec<Contact>, AppError> {
        self.storage.read()?.get_all()
    }

    pub fn get(&self, id: &Uuid) -> Result<Contact, AppError> {
        self.storage
            .read()?
            .get(id)?
            .ok_or_else(AppError::contact_not_found)
    }

    pub fn update(&self, id: &Uuid, patch: ContactPatch) -> Result<Contact, AppError> {
        let mut storage = self.storage.write()?;
        let mut contact = storage.get(id)?.ok_or_else(AppError::contact_not_found)?;

        let patch = self.validator.validate_patch(patch)?;
        if patch.get().is_empty() {
            return Ok(contact);
        }

        let patch = patch.into_inner();
        let email = patch.email.clone();
        let phone = patch.phone.clone();
        ensure_unique(&**storage, email.as_deref(), phone.as_deref(), Some(id))?;

        patch.apply_to(&mut contact);
        contact.updated_at = Utc::now();
        storage.replace(id, contact.clone())?;

        tracing::debug!(id = %id, "contact updated");
        Ok(contact)
    }

    pub fn delete(&self, id: &Uuid) -> Result<(), AppError> {
        let mut storage = self.storage.write()?;
        if storage.get(id)?.is_none() {
            return Err(AppError::contact_not_found());
        }
        storage.remove(id)?;

        tracing::debug!(id = %id, "contact deleted");
        Ok(())
    }
}

// Email is checked before phone. `exclude` skips the record being updated.
fn ensure_unique(
    storage: &dyn ContactStore,
    email: Option<&str>,
    phone: Option<&str>,
    exclude: Option<&Uuid>,
) -> Result<(), AppError> {
    for (field, value) in [(Field::Email, email), (Field::Phone, phone)] {
        let Some(value) = value else {
            continue;
        };

        let taken = storage
            .find_by_field(field, value)?
            .iter()
            .any(|other| Some(&other.id) != exclude);

        if taken {
            tracing::warn!(field = %field, "rejected write: value already registered");
            return Err(AppError::Uniqueness(field));
        }
    }
    Ok(())
}
