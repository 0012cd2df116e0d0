use super::*;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("staffdesk-store-{}-{name}", std::process::id()))
        .join("session.json")
}

// =============================================================================
// MemoryStore
// =============================================================================

#[test]
fn memory_store_set_get_remove() {
    let store = MemoryStore::new();
    assert_eq!(store.get("token").unwrap(), None);

    store.set("token", "t1").unwrap();
    assert_eq!(store.get("token").unwrap().as_deref(), Some("t1"));

    store.remove("token").unwrap();
    assert_eq!(store.get("token").unwrap(), None);
}

#[test]
fn memory_store_remove_missing_is_ok() {
    let store = MemoryStore::new();
    store.remove("refresh_token").unwrap();
    store.remove("refresh_token").unwrap();
}

#[test]
fn memory_store_set_replaces() {
    let store = MemoryStore::new();
    store.set("token", "old").unwrap();
    store.set("token", "new").unwrap();
    assert_eq!(store.get("token").unwrap().as_deref(), Some("new"));
}

// =============================================================================
// FileStore
// =============================================================================

#[test]
fn file_store_missing_file_is_empty() {
    let path = temp_path("missing");
    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.get("auth_token").unwrap(), None);
    assert!(!path.exists());
}

#[test]
fn file_store_persists_across_instances() {
    let path = temp_path("persist");
    {
        let store = FileStore::open(&path).unwrap();
        store.set("auth_token", "abc").unwrap();
        store.set("refresh_token", "def").unwrap();
    }

    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get("auth_token").unwrap().as_deref(), Some("abc"));
    assert_eq!(reopened.get("refresh_token").unwrap().as_deref(), Some("def"));

    reopened.remove("auth_token").unwrap();
    let again = FileStore::open(&path).unwrap();
    assert_eq!(again.get("auth_token").unwrap(), None);
    assert_eq!(again.get("refresh_token").unwrap().as_deref(), Some("def"));

    fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn file_store_corrupt_file_errors() {
    let path = temp_path("corrupt");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "not json").unwrap();

    let err = FileStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Corrupt(_)));

    fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn file_store_failed_write_leaves_memory_unchanged() {
    let path = temp_path("unwritable");
    let store = FileStore::open(&path).unwrap();
    store.set("token", "t1").unwrap();

    // A directory where the file should be makes every later write fail.
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    assert!(matches!(store.set("token", "t2"), Err(StoreError::Io(_))));
    assert_eq!(store.get("token").unwrap().as_deref(), Some("t1"));
    assert!(matches!(store.remove("token"), Err(StoreError::Io(_))));
    assert_eq!(store.get("token").unwrap().as_deref(), Some("t1"));

    fs::remove_dir_all(path.parent().unwrap()).unwrap();
}
