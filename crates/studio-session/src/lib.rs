//! Client-side session lifecycle for the studio admin client.
//!
//! [`SessionManager`] holds the credential and identity, persists them to
//! [`DurableStorage`], restores them at startup and logs out after a period
//! of inactivity. [`RouteGuard`] gates navigation on the session.

mod activity;
mod credential_cell;
mod error;
mod inactivity_timer;
mod route;
mod route_guard;
mod session_event;
mod session_manager;
mod session_phase;
mod session_settings;
mod session_snapshot;
mod storage;

#[cfg(test)]
mod tests;

pub use activity::ActivityEvent;
pub use credential_cell::CredentialCell;
pub use error::{Result as SessionResult, SessionError};
pub use route::Route;
pub use route_guard::{LOGIN_ROUTE, Navigation, RedirectReason, RouteGuard, decide};
pub use session_event::SessionEvent;
pub use session_manager::SessionManager;
pub use session_phase::SessionPhase;
pub use session_settings::SessionSettings;
pub use session_snapshot::SessionSnapshot;
pub use storage::error::{Result as StorageResult, StorageError};
pub use storage::file_storage::FileStorage;
pub use storage::memory_storage::MemoryStorage;
pub use storage::{DurableStorage, IDENTITY_KEY, TOKEN_KEY};
