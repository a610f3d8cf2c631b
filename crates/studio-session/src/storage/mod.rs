pub(crate) mod error;
pub(crate) mod file_storage;
pub(crate) mod memory_storage;

use crate::storage::error::Result as StorageResult;

/// Key holding the raw credential string.
pub const TOKEN_KEY: &str = "studio_token";
/// Key holding the JSON-serialized identity.
pub const IDENTITY_KEY: &str = "studio_user";

/// Synchronous string key-value store that survives restarts.
pub trait DurableStorage: Send + Sync {
    /// Missing keys and unreadable state both read as None.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
