use super::*;

use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::PathBuf;

pub const DEFAULT_JSON_PATH: &str = "./.instance/contacts.json";

/// File-backed backend. The whole collection is held in memory and the file
/// is rewritten after every mutation.
pub struct JsonStorage {
    pub path: PathBuf,
    mem: MemStore,
}

impl JsonStorage {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let data = Self::load(&path)?;
        tracing::debug!(path = %path.display(), contacts = data.len(), "opened json contact store");

        Ok(Self {
            path,
            mem: MemStore::with_contacts(data),
        })
    }

    fn load(path: &Path) -> Result<Vec<Contact>, AppError> {
        if !fs::exists(path).map_err(AppError::unavailable)? {
            return Ok(Vec::new());
        }

        let mut file = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(AppError::unavailable)?;

        let mut data = String::new();
        file.read_to_string(&mut data)
            .map_err(AppError::unavailable)?;

        // serde_json will give an error if data is empty
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&data).map_err(|e| {
            AppError::StoreUnavailable(format!("corrupt contact file {}: {e}", path.display()))
        })
    }

    fn save(&self) -> Result<(), AppError> {
        create_file_parent(&self.path)?;

        // Sibling temp file, then rename over the target.
        let tmp_path = self.path.with_extension("json.tmp");
        let json_contacts =
            serde_json::to_string_pretty(&self.mem.data).map_err(AppError::unavailable)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)
            .map_err(AppError::unavailable)?;
        file.write_all(json_contacts.as_bytes())
            .map_err(AppError::unavailable)?;
        file.sync_all().map_err(AppError::unavailable)?;

        fs::rename(&tmp_path, &self.path).map_err(AppError::unavailable)?;
        Ok(())
    }

    // In-memory copy is rolled back when the file write fails.
    fn mutate<F>(&mut self, op: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut MemStore) -> Result<(), AppError>,
    {
        let snapshot = self.mem.data.clone();
        op(&mut self.mem)?;

        if let Err(err) = self.save() {
            tracing::error!(
                path = %self.path.display(),
                error = %err,
                "failed to persist contacts"
            );
            self.mem.data = snapshot;
            return Err(err);
        }
        Ok(())
    }
}

impl ContactStore for JsonStorage {
    fn get(&self, id: &Uuid) -> Result<Option<Contact>, AppError> {
        self.mem.get(id)
    }

    fn get_all(&self) -> Result<Vec<Contact>, AppError> {
        self.mem.get_all()
    }

    fn find_by_field(&self, field: Field, value: &str) -> Result<Vec<Contact>, AppError> {
        self.mem.find_by_field(field, value)
    }

    fn insert(&mut self, contact: Contact) -> Result<(), AppError> {
        self.mutate(|mem| mem.insert(contact))
    }

    fn replace(&mut self, id: &Uuid, contact: Contact) -> Result<(), AppError> {
        self.mutate(|mem| mem.replace(id, contact))
    }

    fn remove(&mut self, id: &Uuid) -> Result<(), AppError> {
        self.mutate(|mem| mem.remove(id))
    }

    fn get_medium(&self) -> &str {
        "json"
    }
}
