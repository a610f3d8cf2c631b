mod inactivity;
mod storage;

use crate::{IDENTITY_KEY, MemoryStorage, SessionManager, SessionSettings, TOKEN_KEY};

use studio_auth::{Identity, Roles};
use studio_client::Client;

use std::sync::Arc;
use std::time::Duration;

/// Nothing listens here; tests using it must never reach the network.
pub(crate) const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

pub(crate) fn sample_identity(role: &str) -> Identity {
    Identity {
        id: "u-1".into(),
        email: "ada@example.com".into(),
        full_name: "Ada Lovelace".into(),
        roles: Roles::new([role]),
    }
}

/// Storage left behind by an earlier session with a cached identity.
pub(crate) fn seeded_storage(identity: &Identity) -> Arc<MemoryStorage> {
    Arc::new(MemoryStorage::with_entries([
        (TOKEN_KEY, "token-123".to_string()),
        (IDENTITY_KEY, serde_json::to_string(identity).unwrap()),
    ]))
}

pub(crate) fn manager_with(storage: Arc<MemoryStorage>, timeout: Duration) -> SessionManager {
    SessionManager::new(
        Client::new(UNREACHABLE_URL),
        storage,
        SessionSettings {
            inactivity_timeout: timeout,
            claims_secret: None,
        },
    )
}

/// Let spawned tasks observe clock changes.
pub(crate) async fn settle() {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}
