use studio_client::CredentialProvider;

use std::fmt;
use std::sync::{Arc, RwLock};

/// The session's bearer credential, shared with the transport it
/// authorizes. Cloning shares the same cell.
#[derive(Clone, Default)]
pub struct CredentialCell(Arc<RwLock<Option<String>>>);

impl CredentialCell {
    pub fn new(credential: Option<String>) -> Self {
        Self(Arc::new(RwLock::new(credential.filter(|c| !c.is_empty()))))
    }

    pub fn get(&self) -> Option<String> {
        self.0.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Empty strings are stored as None.
    pub fn set(&self, credential: Option<String>) {
        *self.0.write().unwrap_or_else(|e| e.into_inner()) = credential.filter(|c| !c.is_empty());
    }

    pub fn take(&self) -> Option<String> {
        self.0.write().unwrap_or_else(|e| e.into_inner()).take()
    }

    pub fn is_present(&self) -> bool {
        self.0.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}

impl CredentialProvider for CredentialCell {
    fn credential(&self) -> Option<String> {
        self.get()
    }
}

impl fmt::Debug for CredentialCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_present() { "<set>" } else { "<empty>" };
        f.debug_tuple("CredentialCell").field(&state).finish()
    }
}
