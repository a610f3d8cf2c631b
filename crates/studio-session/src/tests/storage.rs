use crate::{DurableStorage, FileStorage, MemoryStorage, StorageError, TOKEN_KEY};

use std::path::PathBuf;

use tempfile::TempDir;

// =============================================================================
// MemoryStorage
// =============================================================================

#[test]
fn given_memory_storage_when_set_get_remove_then_behaves_like_a_map() {
    let storage = MemoryStorage::new();

    storage.set(TOKEN_KEY, "abc").unwrap();
    assert_eq!(storage.get(TOKEN_KEY), Some("abc".to_string()));

    storage.remove(TOKEN_KEY).unwrap();
    assert!(storage.get(TOKEN_KEY).is_none());
    assert!(storage.is_empty());
}

#[test]
fn given_missing_key_when_remove_then_ok() {
    let storage = MemoryStorage::new();

    assert!(storage.remove("nope").is_ok());
}

// =============================================================================
// FileStorage
// =============================================================================

#[test]
fn given_fresh_directory_when_open_then_empty_and_no_file_yet() {
    let temp = TempDir::new().unwrap();

    let storage = FileStorage::open(&temp.path().join("session")).unwrap();

    assert!(storage.get(TOKEN_KEY).is_none());
    assert!(!storage.path().exists());
}

#[test]
fn given_value_when_set_then_survives_reopen() {
    let temp = TempDir::new().unwrap();
    {
        let storage = FileStorage::open(temp.path()).unwrap();
        storage.set(TOKEN_KEY, "token-123").unwrap();
    }

    let reopened = FileStorage::open(temp.path()).unwrap();

    assert_eq!(reopened.get(TOKEN_KEY), Some("token-123".to_string()));
}

#[test]
fn given_value_when_removed_then_gone_after_reopen() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::open(temp.path()).unwrap();
    storage.set(TOKEN_KEY, "token-123").unwrap();

    storage.remove(TOKEN_KEY).unwrap();
    let reopened = FileStorage::open(temp.path()).unwrap();

    assert!(reopened.get(TOKEN_KEY).is_none());
}

#[test]
fn given_set_when_written_then_no_temp_file_left() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::open(temp.path()).unwrap();

    storage.set(TOKEN_KEY, "token-123").unwrap();

    let leftovers: Vec<PathBuf> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.to_string_lossy().contains(".tmp."))
        .collect();
    assert!(leftovers.is_empty(), "temp files left: {leftovers:?}");
}

#[test]
fn given_corrupted_file_when_open_then_empty_and_backup_created() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("storage.json"), "{ not json").unwrap();

    let storage = FileStorage::open(temp.path()).unwrap();

    assert!(storage.get(TOKEN_KEY).is_none());
    let backups = std::fs::read_dir(temp.path())
        .unwrap()
        .filter(|entry| {
            entry
                .as_ref()
                .unwrap()
                .file_name()
                .to_string_lossy()
                .starts_with("storage.json.corrupted.")
        })
        .count();
    assert_eq!(backups, 1);
}

#[test]
fn given_file_write_error_when_is_transient_then_true() {
    let err = StorageError::file_write(
        PathBuf::from("/test"),
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    );

    assert!(err.is_transient());
}

#[test]
fn given_dir_creation_error_when_is_transient_then_false() {
    let err = StorageError::dir_creation(
        PathBuf::from("/test"),
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    );

    assert!(!err.is_transient());
}

#[cfg(unix)]
#[test]
fn given_set_when_written_then_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let storage = FileStorage::open(temp.path()).unwrap();

    storage.set(TOKEN_KEY, "token-123").unwrap();

    let mode = std::fs::metadata(storage.path())
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

/// Occupies the temp file path with a directory so every write fails.
fn block_writes(dir: &std::path::Path) {
    std::fs::create_dir(dir.join(format!("storage.json.tmp.{}", std::process::id()))).unwrap();
}

#[test]
fn given_failed_write_when_set_then_memory_unchanged() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::open(temp.path()).unwrap();
    storage.set(TOKEN_KEY, "token-old").unwrap();
    block_writes(temp.path());

    let result = storage.set(TOKEN_KEY, "token-new");

    assert!(matches!(result, Err(StorageError::FileWrite { .. })));
    assert_eq!(storage.get(TOKEN_KEY), Some("token-old".to_string()));
    let reopened = FileStorage::open(temp.path()).unwrap();
    assert_eq!(reopened.get(TOKEN_KEY), Some("token-old".to_string()));
}

#[test]
fn given_failed_write_when_remove_then_entry_kept() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::open(temp.path()).unwrap();
    storage.set(TOKEN_KEY, "token-123").unwrap();
    block_writes(temp.path());

    assert!(storage.remove(TOKEN_KEY).is_err());
    assert_eq!(storage.get(TOKEN_KEY), Some("token-123".to_string()));
}
