use rolodex_api::prelude::*;
use tempfile::tempdir;

#[test]
fn json_store_is_persistent() -> Result<(), AppError> {
    let dir = tempdir()?;
    let path = dir.path().join(".instance").join("contacts.json");

    let (ann, bo) = {
        let manager = ContactManager::new(Box::new(JsonStorage::open(&path)?))?;
        let ann = manager.create(ContactDraft::new("Ann", "Lee", "a@x.com", "123456789"))?;
        let bo = manager.create(ContactDraft::new("Bo", "Kim", "b@x.com", "987654321"))?;
        let bo = manager.update(
            &bo.id,
            ContactPatch {
                verified: Some(true),
                ..ContactPatch::default()
            },
        )?;
        (ann, bo)
    };

    let reopened = ContactManager::new(Box::new(JsonStorage::open(&path)?))?;
    assert_eq!(reopened.medium()?, "json");
    assert_eq!(reopened.list()?, vec![ann.clone(), bo]);

    // Uniqueness holds against records loaded from disk
    let duplicate = reopened.create(ContactDraft::new("Cy", "Ng", "a@x.com", "555555555"));
    assert!(matches!(duplicate, Err(AppError::Uniqueness(Field::Email))));

    reopened.delete(&ann.id)?;
    let reopened_again = ContactManager::new(Box::new(JsonStorage::open(&path)?))?;
    assert_eq!(reopened_again.list()?.len(), 1);
    Ok(())
}

#[test]
fn json_file_uses_camel_case_records() -> Result<(), AppError> {
    let dir = tempdir()?;
    let path = dir.path().join("contacts.json");

    let manager = ContactManager::new(Box::new(JsonStorage::open(&path)?))?;
    manager.create(ContactDraft::new("Ann", "Lee", "a@x.com", "123456789"))?;

    let raw = std::fs::read_to_string(&path)?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

    assert!(value.is_array());
    assert_eq!(value[0]["firstName"], "Ann");
    assert_eq!(value[0]["verified"], false);
    Ok(())
}
