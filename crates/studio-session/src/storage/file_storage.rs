use crate::storage::DurableStorage;
use crate::storage::error::{Result as StorageResult, StorageError};

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use log::{debug, info, warn};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

const STORAGE_FILENAME: &str = "storage.json";
#[cfg(unix)]
const STORAGE_FILE_MODE: u32 = 0o600; // Owner read/write only
const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Durable storage backed by a single JSON object file.
///
/// The file is read once when opened and rewritten on every mutation using
/// the temp file + fsync + atomic rename pattern, so a crash mid-write never
/// leaves a half-written file behind. A mutation only takes effect in memory
/// once it is on disk. On unix the file is readable by its owner only.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open (creating the directory if needed) the storage file in `dir`.
    ///
    /// A missing file starts empty. An unreadable or corrupted file is
    /// backed up alongside and storage starts empty.
    pub fn open(dir: &Path) -> StorageResult<Self> {
        fs::create_dir_all(dir).map_err(|e| StorageError::dir_creation(dir.to_path_buf(), e))?;

        let path = dir.join(STORAGE_FILENAME);
        let entries = Self::load(&path);

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> BTreeMap<String, String> {
        if !path.exists() {
            info!("No session storage at {path:?} (first launch)");
            return BTreeMap::new();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Unable to read session storage at {path:?}: {e}");
                return BTreeMap::new();
            }
        };

        match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
            Ok(entries) => {
                debug!("Loaded {} session storage entries", entries.len());
                entries
            }
            Err(e) => {
                warn!("Session storage corrupted at {path:?}: {e}");
                Self::backup_corrupted(path);
                BTreeMap::new()
            }
        }
    }

    /// Renames `storage.json` to `storage.json.corrupted.{timestamp}`.
    fn backup_corrupted(path: &Path) {
        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let backup_path = path.with_file_name(format!("{STORAGE_FILENAME}.corrupted.{timestamp}"));

        match fs::rename(path, &backup_path) {
            Ok(()) => warn!("Backed up corrupted session storage to {backup_path:?}"),
            Err(e) => warn!("Unable to back up corrupted session storage: {e}"),
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        let temp_path = self
            .path
            .with_file_name(format!("{STORAGE_FILENAME}.tmp.{}", std::process::id()));

        let json = serde_json::to_string_pretty(entries)?;

        // A leftover temp file would keep its old permissions
        let _ = fs::remove_file(&temp_path);

        {
            let mut options = fs::OpenOptions::new();
            options.write(true).create(true).truncate(true);
            #[cfg(unix)]
            options.mode(STORAGE_FILE_MODE);

            let mut file = options
                .open(&temp_path)
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StorageError::atomic_rename(temp_path, self.path.clone(), e)
        })
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DurableStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.lock();
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.lock();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}
