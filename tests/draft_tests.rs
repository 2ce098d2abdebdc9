use scireport::core::draft::{DRAFT_KEY, DraftSnapshot, DraftStore, TablesSnapshot};
use scireport::core::submit::{SubmitPolicy, validate};
use scireport::errors::AppError;
use scireport::models::form::{FormDefaults, FormSession, ScalarField};
use scireport::models::schema::TableKind;
use scireport::storage::log::ActivityLog;
use scireport::storage::{FileStorage, MemoryStorage, Storage};

mod common;
use common::{filled_session, temp_dir, tiny_png};

fn fresh() -> FormSession {
    FormSession::new(FormDefaults::default())
}

fn session_with_figures() -> FormSession {
    let mut s = filled_session();
    s.table_mut(TableKind::Programs).set_field(1, 1, "OTHER").unwrap();
    s.table_mut(TableKind::Programs)
        .set_detail(1, 1, "Field day")
        .unwrap();
    s.insert_figure(tiny_png(), "image/png", "roots.png", "Root depth", None)
        .unwrap();
    s.insert_figure(tiny_png(), "image/png", "yield.png", "Yield", None)
        .unwrap();
    s
}

#[test]
fn save_then_restore_reproduces_the_form() {
    let store = DraftStore::new(MemoryStorage::new());
    let original = session_with_figures();
    store.save(&original).unwrap();

    let mut restored = fresh();
    assert!(store.restore(&mut restored).unwrap());

    assert_eq!(restored.fields, original.fields);
    assert_eq!(
        TablesSnapshot::capture(&restored),
        TablesSnapshot::capture(&original)
    );
    assert_eq!(restored.figures().figures(), original.figures().figures());
    assert_eq!(restored.figures().counter(), 2);
}

#[test]
fn file_storage_round_trip() {
    let dir = temp_dir("draft_file_round_trip");
    let store = DraftStore::new(FileStorage::new(&dir));
    let original = session_with_figures();
    store.save(&original).unwrap();
    assert!(dir.join(format!("{DRAFT_KEY}.json")).exists());

    let mut restored = fresh();
    assert!(store.restore(&mut restored).unwrap());
    assert_eq!(restored.fields.scientist_name, "Dr Asha Rao");
    assert_eq!(restored.figures().len(), 2);
    assert_eq!(
        restored.table(TableKind::Programs).row(1).unwrap().value(1),
        "Field day"
    );
}

#[test]
fn stored_draft_uses_the_documented_shape() {
    let store = DraftStore::new(MemoryStorage::new());
    store.save(&session_with_figures()).unwrap();

    let raw = store.storage().get_item(DRAFT_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["scientist_name"], "Dr Asha Rao");
    assert_eq!(json["tables"]["projects"][0]["col_1"], "Root architecture");
    assert_eq!(json["tables"]["publications"][0]["col_3"], "8.50");
    assert_eq!(json["figures"][1]["localIndex"], 2);
    assert_eq!(json["figures"][0]["fileName"], "roots.png");
    assert_eq!(json["figures"][0]["mimeType"], "image/png");
    assert!(json["figures"][0]["base64"].as_str().unwrap().len() > 10);
    assert!(json["saved_at"].is_string());
}

#[test]
fn save_overwrites_previous_draft() {
    let store = DraftStore::new(MemoryStorage::new());
    let mut s = filled_session();
    store.save(&s).unwrap();
    s.set_scalar(ScalarField::ScientistName, "Meera").unwrap();
    store.save(&s).unwrap();

    let snapshot = store.load().unwrap().unwrap();
    assert_eq!(snapshot.fields.scientist_name, "Meera");
}

#[test]
fn missing_draft_leaves_fresh_form() {
    let store = DraftStore::new(MemoryStorage::new());
    let mut s = fresh();
    assert!(!store.restore(&mut s).unwrap());
    assert_eq!(s, fresh());
}

#[test]
fn malformed_draft_is_logged_and_ignored() {
    let dir = temp_dir("draft_malformed");
    let log = ActivityLog::in_dir(&dir);
    let store = DraftStore::new(MemoryStorage::new()).with_log(log.clone());
    store.storage().set_item(DRAFT_KEY, "{not json").unwrap();

    let mut s = filled_session();
    assert!(!store.restore(&mut s).unwrap());
    assert_eq!(s, fresh());

    let entries = log.entries().unwrap();
    assert!(entries.iter().any(|e| e.operation == "restore_failed"));
}

#[test]
fn missing_defaults_fall_back() {
    let store = DraftStore::new(MemoryStorage::new());
    store
        .storage()
        .set_item(DRAFT_KEY, r#"{"scientist_name":"Ravi","month":"May","year":"2024"}"#)
        .unwrap();

    let mut s = fresh();
    assert!(store.restore(&mut s).unwrap());
    assert_eq!(s.fields.smd_name, "CROP SCIENCE");
    assert_eq!(s.fields.institute_name, "IIAB");
    assert_eq!(s.fields.scientist_name, "Ravi");
    for kind in TableKind::ALL {
        assert_eq!(s.table(kind).len(), 1, "{kind} keeps one blank row");
    }
}

#[test]
fn figure_counter_resumes_after_highest_index() {
    let store = DraftStore::new(MemoryStorage::new());
    let mut snapshot = DraftSnapshot::capture(&session_with_figures());
    snapshot.figures[1].local_index = 3;
    store
        .storage()
        .set_item(DRAFT_KEY, &serde_json::to_string(&snapshot).unwrap())
        .unwrap();

    let mut s = fresh();
    store.restore(&mut s).unwrap();
    assert_eq!(s.figures().counter(), 3);

    let token = s
        .insert_figure(tiny_png(), "image/png", "new.png", "New", None)
        .unwrap();
    assert_eq!(token, "[FIG-4]");
}

#[test]
fn quota_failure_is_recoverable() {
    let store = DraftStore::new(MemoryStorage::with_quota(64));
    let s = session_with_figures();

    let err = store.save(&s).unwrap_err();
    assert!(matches!(err, AppError::QuotaExceeded { .. }));
    assert!(!store.storage().contains(DRAFT_KEY));
    assert_eq!(s.fields.scientist_name, "Dr Asha Rao");
}

#[test]
fn file_quota_counts_other_keys() {
    let dir = temp_dir("draft_file_quota");
    let storage = FileStorage::new(&dir).with_quota(40);
    storage.set_item("other", &"x".repeat(30)).unwrap();

    assert!(matches!(
        storage.set_item(DRAFT_KEY, &"y".repeat(20)),
        Err(AppError::QuotaExceeded { .. })
    ));
    storage.set_item(DRAFT_KEY, &"y".repeat(10)).unwrap();
}

#[test]
fn clear_needs_confirmation() {
    let store = DraftStore::new(MemoryStorage::new());
    let mut s = filled_session();
    store.save(&s).unwrap();

    assert!(!store.clear(&mut s, false).unwrap());
    assert!(store.storage().contains(DRAFT_KEY));
    assert_eq!(s.fields.scientist_name, "Dr Asha Rao");

    assert!(store.clear(&mut s, true).unwrap());
    assert!(!store.storage().contains(DRAFT_KEY));
    assert_eq!(s, fresh());
}

#[test]
fn pending_other_survives_save_and_restore() {
    let store = DraftStore::new(MemoryStorage::new());
    let mut s = filled_session();
    let programs = s.table_mut(TableKind::Programs);
    programs.set_field(1, 1, "OTHER").unwrap();
    programs.set_field(1, 5, "Pune").unwrap();
    assert!(validate(&s, &SubmitPolicy::default()).is_err());

    let saved = store.save(&s).unwrap();
    assert_eq!(saved.tables.programs[0].get(1), "OTHER");

    let mut restored = fresh();
    assert!(store.restore(&mut restored).unwrap());
    let cell = restored
        .table(TableKind::Programs)
        .row(1)
        .unwrap()
        .cell(1)
        .unwrap()
        .clone();
    assert_eq!(cell.value, "OTHER");
    assert!(cell.is_revealed());

    let err = validate(&restored, &SubmitPolicy::default()).unwrap_err();
    assert!(err.to_string().contains("Program type"));
}

#[test]
fn pending_other_alone_keeps_its_row() {
    let store = DraftStore::new(MemoryStorage::new());
    let mut s = filled_session();
    s.table_mut(TableKind::Training)
        .set_field(1, 1, "OTHER")
        .unwrap();

    let saved = store.save(&s).unwrap();
    assert_eq!(saved.tables.training.len(), 1);
    assert!(s.table(TableKind::Training).persisted().is_empty());
}
