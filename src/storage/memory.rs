use super::*;

/// Volatile backend. A `Vec` keeps insertion order for listing.
#[derive(Debug, Default)]
pub struct MemStore {
    pub data: Vec<Contact>,
}

impl MemStore {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_contacts(data: Vec<Contact>) -> Self {
        Self { data }
    }

    fn position(&self, id: &Uuid) -> Option<usize> {
        self.data.iter().position(|c| &c.id == id)
    }
}

impl ContactStore for MemStore {
    fn get(&self, id: &Uuid) -> Result<Option<Contact>, AppError> {
        Ok(self.data.iter().find(|c| &c.id == id).cloned())
    }

    fn get_all(&self) -> Result<Vec<Contact>, AppError> {
        Ok(self.data.clone())
    }

    fn find_by_field(&self, field: Field, value: &str) -> Result<Vec<Contact>, AppError> {
        Ok(self
            .data
            .iter()
            .filter(|c| field_matches(c, field, value))
            .cloned()
            .collect())
    }

    fn insert(&mut self, contact: Contact) -> Result<(), AppError> {
        if self.position(&contact.id).is_some() {
            return Err(AppError::StoreUnavailable(format!(
                "duplicate contact id {}",
                contact.id
            )));
        }
        self.data.push(contact);
        Ok(())
    }

    fn replace(&mut self, id: &Uuid, contact: Contact) -> Result<(), AppError> {
        match self.position(id) {
            Some(index) => {
                self.data[index] = contact;
                Ok(())
            }
            None => Err(AppError::contact_not_found()),
        }
    }

    fn remove(&mut self, id: &Uuid) -> Result<(), AppError> {
        match self.position(id) {
            Some(index) => {
                self.data.remove(index);
                Ok(())
            }
            None => Err(AppError::contact_not_found()),
        }
    }

    fn get_medium(&self) -> &str {
        "mem"
    }
}
