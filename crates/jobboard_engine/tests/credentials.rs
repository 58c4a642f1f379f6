use std::fs;

use jobboard_engine::{FileTokenStore, MemoryTokenStore, TokenStore};
use tempfile::TempDir;

#[test]
fn missing_file_means_no_token() {
    let temp = TempDir::new().unwrap();
    let store = FileTokenStore::new(temp.path().join("token"));
    assert_eq!(store.load(), None);
    store.clear().expect("clearing a missing token is fine");
}

#[test]
fn save_load_clear_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("token");
    let store = FileTokenStore::new(path.clone());

    store.save(" first \n").unwrap();
    assert_eq!(store.load().as_deref(), Some("first"));

    store.save("second").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "second");

    store.clear().unwrap();
    assert!(!path.exists());
    assert_eq!(store.load(), None);
}

#[test]
fn blank_file_means_no_token() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("token");
    fs::write(&path, "  \n").unwrap();
    assert_eq!(FileTokenStore::new(path).load(), None);
}

#[test]
fn memory_store_behaves_like_file_store() {
    let store = MemoryTokenStore::new(Some("abc".to_string()));
    assert_eq!(store.load().as_deref(), Some("abc"));
    store.clear().unwrap();
    assert_eq!(store.load(), None);
    store.save("def").unwrap();
    assert_eq!(store.load().as_deref(), Some("def"));
}
