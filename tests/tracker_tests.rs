use health_uploads::{
    config::Config,
    data::{
        memory_storage::MemoryStorage,
        model::{Patient, UploadStatus, UploadedFileRecord},
        sqlite_storage::SqliteStorage,
        Storage,
    },
    tracker::{UploadTracker, UPLOADED_FILES_KEY},
    AppContext,
};

fn record(id: &str, name: &str, status: UploadStatus) -> UploadedFileRecord {
    UploadedFileRecord::with_id(id, name, format!("2024-01-0{id}"), status)
}

#[test]
fn first_write_wins_for_duplicate_names() {
    let mut tracker = UploadTracker::new(MemoryStorage::new());

    tracker
        .add_uploaded_file(UploadedFileRecord::with_id(
            "1",
            "a.pdf",
            "2024-01-01",
            UploadStatus::Success,
        ))
        .unwrap();
    tracker
        .add_uploaded_file(UploadedFileRecord::with_id(
            "2",
            "a.pdf",
            "2024-01-02",
            UploadStatus::Error,
        ))
        .unwrap();

    let matching: Vec<_> = tracker
        .uploaded_files()
        .iter()
        .filter(|r| r.name == "a.pdf")
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].id, "1");
    assert_eq!(matching[0].status, UploadStatus::Success);
}

#[test]
fn repeated_adds_keep_one_record_per_name() {
    let mut tracker = UploadTracker::new(MemoryStorage::new());
    let names = ["a.pdf", "b.pdf", "a.pdf", "c.pdf", "b.pdf", "a.pdf"];

    for (i, name) in names.iter().enumerate() {
        tracker
            .add_uploaded_file(record(&i.to_string(), name, UploadStatus::Success))
            .unwrap();
    }

    let stored: Vec<&str> = tracker
        .uploaded_files()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(stored, ["a.pdf", "b.pdf", "c.pdf"]);
}

#[test]
fn clear_forgets_everything_and_drops_the_entry() {
    let mut tracker = UploadTracker::new(MemoryStorage::new());
    tracker
        .add_uploaded_file(record("1", "a.pdf", UploadStatus::Success))
        .unwrap();
    tracker
        .add_uploaded_file(record("2", "b.pdf", UploadStatus::Error))
        .unwrap();

    tracker.clear_uploaded_files().unwrap();

    assert!(!tracker.is_file_uploaded("a.pdf"));
    assert!(!tracker.is_file_uploaded("b.pdf"));
    assert_eq!(tracker.storage().read(UPLOADED_FILES_KEY).unwrap(), None);

    tracker
        .add_uploaded_file(record("3", "a.pdf", UploadStatus::Success))
        .unwrap();
    assert!(tracker.is_file_uploaded("a.pdf"));
}

#[test]
fn reopening_memory_storage_restores_same_sequence() {
    let mut tracker = UploadTracker::new(MemoryStorage::new());
    for (id, name) in [("1", "z.pdf"), ("2", "a.pdf"), ("3", "m.pdf")] {
        tracker
            .add_uploaded_file(record(id, name, UploadStatus::Success))
            .unwrap();
    }
    let before = tracker.uploaded_files().to_vec();

    let reopened = UploadTracker::new(tracker.into_storage());
    assert_eq!(reopened.uploaded_files(), before.as_slice());
}

#[test]
fn reopening_sqlite_file_restores_same_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("uploads.sqlite");

    let before = {
        let mut tracker = UploadTracker::new(SqliteStorage::open(&db_path).unwrap());
        tracker
            .add_uploaded_file(record("1", "labs.pdf", UploadStatus::Success))
            .unwrap();
        tracker
            .add_uploaded_file(record("2", "scan.pdf", UploadStatus::Error))
            .unwrap();
        tracker.uploaded_files().to_vec()
    };

    let reopened = UploadTracker::new(SqliteStorage::open(&db_path).unwrap());
    assert_eq!(reopened.uploaded_files(), before.as_slice());
    assert!(reopened.is_file_uploaded("scan.pdf"));
}

#[test]
fn corrupted_entry_starts_empty() {
    let mut storage = MemoryStorage::new();
    storage.write(UPLOADED_FILES_KEY, "[{\"id\":").unwrap();

    let tracker = UploadTracker::new(storage);
    assert!(tracker.is_empty());
    assert!(!tracker.is_file_uploaded("a.pdf"));
}

#[test]
fn persisted_value_is_a_plain_json_array() {
    let mut tracker = UploadTracker::new(MemoryStorage::new());
    tracker
        .add_uploaded_file(UploadedFileRecord::with_id(
            "1",
            "a.pdf",
            "2024-01-01",
            UploadStatus::Error,
        ))
        .unwrap();

    let raw = tracker.storage().read(UPLOADED_FILES_KEY).unwrap().unwrap();
    assert_eq!(
        raw,
        r#"[{"id":"1","name":"a.pdf","uploadDate":"2024-01-01","status":"error"}]"#
    );
}

#[test]
fn app_context_from_config_shares_one_tracker() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    let db_path = dir.path().join("app.sqlite");
    std::fs::write(
        &config_path,
        serde_json::json!({
            "storageKey": "dashboardUploads",
            "databasePath": &db_path,
        })
        .to_string(),
    )
    .unwrap();

    let config = Config::from_file(&config_path).unwrap();
    let mut ctx = AppContext::from_config(&config).unwrap();

    ctx.tracker_mut()
        .add_uploaded_file(record("1", "a.pdf", UploadStatus::Success))
        .unwrap();
    ctx.patient_mut().set_patient(Patient {
        id: "p1".into(),
        name: "Jane Doe".into(),
        date_of_birth: None,
        gender: Some("female".into()),
    });

    assert!(ctx.tracker().is_file_uploaded("a.pdf"));
    assert_eq!(ctx.tracker().storage_key(), "dashboardUploads");
    assert!(ctx.patient().has_patient());

    let storage = SqliteStorage::open(&db_path).unwrap();
    assert!(storage.read("dashboardUploads").unwrap().is_some());
    assert_eq!(storage.read(UPLOADED_FILES_KEY).unwrap(), None);
}
