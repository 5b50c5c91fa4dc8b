use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use rolodex_api::prelude::{ContactDraft, ContactManager, ContactPatch, JsonStorage};

const SIZE: usize = 5_000;

fn draft(i: usize) -> ContactDraft {
    ContactDraft::new("User", "Bench", &format!("user{i}@yahoo.com"), &format!("0888{i:07}"))
}

// Manager prepopulated with `n` contacts in memory.
fn make_manager_with_n(n: usize) -> ContactManager {
    let manager = ContactManager::in_memory().expect("manager not created");
    for i in 0..n {
        manager.create(draft(i)).expect("seed contact");
    }
    manager
}

// Every create scans for email and phone collisions, so cost grows with the store.
fn bench_create(c: &mut Criterion) {
    c.bench_function("Creating into 5k contacts (uniqueness scan)", |b| {
        b.iter_batched(
            || make_manager_with_n(SIZE),
            |manager| {
                let contact = manager.create(draft(SIZE + 1)).expect("create failed");
                black_box(contact);
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_validate(c: &mut Criterion) {
    let manager = ContactManager::in_memory().expect("manager not created");
    c.bench_function("Validating a full draft", |b| {
        b.iter(|| {
            let validated = manager.validator().validate_draft(black_box(draft(42)));
            black_box(validated.is_ok());
        });
    });
}

fn bench_list(c: &mut Criterion) {
    c.bench_function("Listing 5k contacts", |b| {
        let manager = make_manager_with_n(SIZE);
        b.iter(|| black_box(manager.list().expect("list failed")));
    });
}

fn bench_update(c: &mut Criterion) {
    c.bench_function("Updating one of 5k contacts", |b| {
        let manager = make_manager_with_n(SIZE);
        let id = manager.list().expect("list failed")[SIZE / 2].id;
        b.iter(|| {
            let patch = ContactPatch {
                first_name: Some("Edited".to_string()),
                ..ContactPatch::default()
            };
            black_box(manager.update(&id, patch).expect("update failed"));
        });
    });
}

// Each write rewrites the whole file, so this measures serialisation of 5k records.
fn bench_json_insert(c: &mut Criterion) {
    c.bench_function("Inserting into 5k json contacts", |b| {
        b.iter_batched(
            || {
                let dir = tempfile::tempdir().expect("create temp dir");
                let path = dir.path().join("contacts.json");
                let seeded = make_manager_with_n(SIZE).list().expect("list failed");
                std::fs::write(&path, serde_json::to_string(&seeded).expect("serialize"))
                    .expect("seed file");

                let store = JsonStorage::open(&path).expect("open store");
                let manager = ContactManager::new(Box::new(store)).expect("manager not created");
                (manager, dir)
            },
            |(manager, dir)| {
                black_box(manager.create(draft(SIZE + 1)).expect("create failed"));
                drop(dir);
            },
            BatchSize::PerIteration,
        );
    });
}

criterion_group!(
    benches,
    bench_create,
    bench_validate,
    bench_list,
    bench_update,
    bench_json_insert
);
criterion_main!(benches);
