use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use todo::model::Priority;
use todo::ops::store::TaskStore;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Copy a fixture into a temp dir and open a store on the copy
fn load_fixture(tmp: &TempDir, name: &str) -> (TaskStore, String) {
    let source = fs::read_to_string(fixture(name))
        .unwrap_or_else(|e| panic!("Could not read fixture {}: {}", name, e));
    let path = tmp.path().join("tasks.json");
    fs::write(&path, &source).unwrap();
    let mut store = TaskStore::new(path);
    store.load().unwrap();
    (store, source)
}

#[test]
fn canonical_file_saves_byte_for_byte() {
    let tmp = TempDir::new().unwrap();
    let (store, source) = load_fixture(&tmp, "canonical_tasks.json");
    assert_eq!(store.len(), 3);

    store.save().unwrap();
    let output = fs::read_to_string(store.path()).unwrap();
    assert_eq!(output, source, "Round-trip failed for canonical_tasks.json");
}

#[test]
fn save_then_load_preserves_every_field() {
    let tmp = TempDir::new().unwrap();
    let (store, _) = load_fixture(&tmp, "canonical_tasks.json");
    let before = store.tasks();

    let mut reloaded = TaskStore::new(store.path());
    reloaded.load().unwrap();
    assert_eq!(reloaded.tasks(), before);
    assert_eq!(reloaded.tasks()[2].title, "Call \"the\" dentist");
}

#[test]
fn localized_file_loads() {
    let tmp = TempDir::new().unwrap();
    let (store, _) = load_fixture(&tmp, "localized_tasks.json");

    let tasks = store.tasks();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].priority, Priority::High);
    assert_eq!(tasks[1].priority, Priority::Low);
    assert_eq!(tasks[2].priority, Priority::Medium);
    assert!(tasks[1].completed);
    // ids have a gap; the next id follows the largest
    assert_eq!(store.next_id(), 6);

    let listed = store.list(None);
    let titles: Vec<&str> = listed.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["買牛奶", "打電話給牙醫", "寫報告"]);
}

#[test]
fn localized_file_is_rewritten_with_canonical_names() {
    let tmp = TempDir::new().unwrap();
    let (mut store, _) = load_fixture(&tmp, "localized_tasks.json");
    store.complete(5).unwrap();

    let output = fs::read_to_string(store.path()).unwrap();
    assert!(output.contains("\"priority\": \"High\""));
    assert!(output.contains("\"priority\": \"Medium\""));
    assert!(!output.contains("\"高\""));
    // text stays readable rather than \u-escaped
    assert!(output.contains("打電話給牙醫"));
    assert!(output.contains("\"created_at\": \"2024-11-03 07:45:12\""));
}

#[test]
fn added_tasks_survive_reload_in_order() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("tasks.json");
    let mut store = TaskStore::new(&path);
    store.add("Buy milk", Priority::High).unwrap();
    store.add("Write report", Priority::Low).unwrap();
    store.add("Call dentist", Priority::Medium).unwrap();
    store.complete(2).unwrap();
    store.delete(1).unwrap();
    let before = store.tasks();

    let mut reloaded = TaskStore::new(&path);
    assert_eq!(reloaded.load().unwrap(), 2);
    assert_eq!(reloaded.tasks(), before);
    assert_eq!(reloaded.next_id(), 4);
}
