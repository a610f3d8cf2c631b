use crate::inactivity_timer::InactivityTimer;
use crate::storage::{DurableStorage, IDENTITY_KEY, TOKEN_KEY};
use crate::{
    ActivityEvent, CredentialCell, SessionError, SessionEvent, SessionPhase, SessionResult,
    SessionSettings, SessionSnapshot,
};

use studio_auth::{ClaimsDecoder, Identity, IdentitySource, LoginCredentials};
use studio_client::Client;

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Owns authentication state for one client process.
///
/// Cloning is cheap and every clone shares the same session. The manager
/// is the credential provider of its transport, so `client()` requests
/// always carry the current credential.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

struct Inner {
    client: Client,
    storage: Arc<dyn DurableStorage>,
    decoder: ClaimsDecoder,
    inactivity_timeout: Duration,
    credential: CredentialCell,
    state: Mutex<SessionState>,
    /// Serializes restoration so overlapping callers share one run
    restore_gate: tokio::sync::Mutex<()>,
    events: broadcast::Sender<SessionEvent>,
}

struct SessionState {
    phase: SessionPhase,
    identity: Option<Identity>,
    identity_source: Option<IdentitySource>,
    loading: bool,
    last_error: Option<String>,
    restored: bool,
    expired: bool,
    timer: Option<InactivityTimer>,
    timer_generation: u64,
    /// Bumped whenever the credential is replaced or cleared
    epoch: u64,
}

impl SessionManager {
    /// Build the session from whatever durable storage holds right now.
    ///
    /// No network call is made and no timer is armed until
    /// `restore_session` or `login` runs.
    pub fn new(client: Client, storage: Arc<dyn DurableStorage>, settings: SessionSettings) -> Self {
        let credential = CredentialCell::new(storage.get(TOKEN_KEY));
        let identity = if credential.is_present() {
            read_cached_identity(storage.as_ref())
        } else {
            None
        };

        let state = SessionState {
            phase: if credential.is_present() {
                SessionPhase::Authenticated
            } else {
                SessionPhase::Unauthenticated
            },
            identity_source: identity.as_ref().map(|_| IdentitySource::Cache),
            identity,
            loading: false,
            last_error: None,
            restored: false,
            expired: false,
            timer: None,
            timer_generation: 0,
            epoch: 0,
        };

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            inner: Arc::new(Inner {
                client: client.with_credentials(Arc::new(credential.clone())),
                storage,
                decoder: ClaimsDecoder::from_secret(settings.claims_secret.as_deref()),
                inactivity_timeout: settings.inactivity_timeout,
                credential,
                state: Mutex::new(state),
                restore_gate: tokio::sync::Mutex::new(()),
                events,
            }),
        }
    }

    /// Transport authorized by this session's credential.
    pub fn client(&self) -> &Client {
        &self.inner.client
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Log in with email and password.
    ///
    /// On failure the backend's message is kept in `last_error` and the
    /// session stays unauthenticated.
    pub async fn login(&self, credentials: &LoginCredentials) -> SessionResult<Identity> {
        {
            let mut state = self.inner.lock_state();
            state.phase = SessionPhase::Authenticating;
            state.loading = true;
            state.last_error = None;
        }

        info!("Logging in as {}", credentials.email);

        match self.inner.client.login(credentials).await {
            Ok(response) => {
                let (token, identity) = response.into_parts();
                self.inner.establish(
                    Some(token),
                    Some((identity.clone(), IdentitySource::Login)),
                );
                info!("Logged in as {}", identity.display_name());
                self.inner.publish(SessionEvent::LoggedIn {
                    identity: identity.clone(),
                });
                Ok(identity)
            }
            Err(e) => {
                let message = e.user_message();
                warn!("Login failed: {message}");

                let mut state = self.inner.lock_state();
                state.loading = false;
                state.last_error = Some(message.clone());
                state.phase = if self.inner.credential.is_present() {
                    SessionPhase::Authenticated
                } else {
                    SessionPhase::Unauthenticated
                };

                Err(SessionError::authentication_failed(message, e))
            }
        }
    }

    /// Clear the credential, identity and durable storage and stop the
    /// inactivity timer. Safe to call any number of times.
    pub fn logout(&self) {
        if self.inner.clear() {
            info!("Logged out");
            self.inner.publish(SessionEvent::LoggedOut);
        }
    }

    /// Re-derive the session from durable storage, first success wins:
    /// cached identity, then who-am-I, then credential claims, then
    /// credential only.
    ///
    /// Runs at most once. Callers arriving while it runs wait for it;
    /// later callers get the current snapshot straight away.
    pub async fn restore_session(&self) -> SessionSnapshot {
        let _gate = self.inner.restore_gate.lock().await;

        if self.inner.lock_state().restored {
            return self.snapshot();
        }

        {
            let mut state = self.inner.lock_state();
            state.phase = SessionPhase::Restoring;
            state.loading = true;
        }

        self.inner.restore().await;

        {
            let mut state = self.inner.lock_state();
            if state.phase != SessionPhase::Authenticating {
                state.loading = false;
            }
            state.restored = true;
        }

        self.snapshot()
    }

    /// Push the inactivity deadline forward. Ignored when no session is
    /// active.
    pub fn record_activity(&self, event: ActivityEvent) {
        let state = self.inner.lock_state();
        if let Some(timer) = &state.timer {
            timer.touch();
            debug!("Activity ({event:?}) reset inactivity deadline");
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.inner.lock_state();
        let is_authenticated = self.inner.credential.is_present();
        let identity = state.identity.clone();

        SessionSnapshot {
            phase: state.phase,
            is_authenticated,
            is_admin: is_authenticated && identity.as_ref().is_some_and(Identity::is_admin),
            is_user: is_authenticated && identity.as_ref().is_some_and(Identity::is_user),
            identity,
            identity_source: state.identity_source,
            loading: state.loading,
            last_error: state.last_error.clone(),
            restored: state.restored,
            expired: state.expired,
        }
    }

    /// True iff a non-empty credential is held.
    pub fn is_authenticated(&self) -> bool {
        self.inner.credential.is_present()
    }

    pub fn is_admin(&self) -> bool {
        self.snapshot().is_admin
    }

    pub fn is_user(&self) -> bool {
        self.snapshot().is_user
    }

    pub fn identity(&self) -> Option<Identity> {
        self.inner.lock_state().identity.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.lock_state().last_error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.lock_state().loading
    }

    pub fn is_restored(&self) -> bool {
        self.inner.lock_state().restored
    }

    /// Time left before inactivity expiry, None when no timer is armed.
    pub fn inactivity_remaining(&self) -> Option<Duration> {
        self.inner.lock_state().timer.as_ref().map(|t| t.remaining())
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    async fn restore(self: &Arc<Self>) {
        // 1. No credential: nothing to restore
        let Some(token) = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty()) else {
            debug!("No stored credential; starting unauthenticated");
            self.credential.set(None);
            let mut state = self.lock_state();
            state.identity = None;
            state.identity_source = None;
            state.phase = SessionPhase::Unauthenticated;
            return;
        };
        self.credential.set(Some(token.clone()));
        let epoch = self.lock_state().epoch;

        // 2. Cached identity
        if let Some(identity) = read_cached_identity(self.storage.as_ref()) {
            info!("Restored session for {} from cache", identity.display_name());
            self.establish(None, Some((identity, IdentitySource::Cache)));
            self.publish(SessionEvent::Restored {
                source: Some(IdentitySource::Cache),
            });
            return;
        }

        // 3. Ask the backend
        match self.client.me().await {
            Ok(identity) if self.is_current(epoch, &token) => {
                info!("Restored session for {} from backend", identity.display_name());
                self.establish(None, Some((identity, IdentitySource::Backend)));
                self.publish(SessionEvent::Restored {
                    source: Some(IdentitySource::Backend),
                });
                return;
            }
            Ok(_) => {}
            Err(e) => debug!("who-am-I failed, falling back to credential claims: {e}"),
        }

        // Logout or login may have run while who-am-I was in flight
        if !self.is_current(epoch, &token) {
            info!("Session changed during restoration; abandoning it");
            return;
        }

        // 4. Credential claims
        if let Some(token) = self.credential.get() {
            match self.decoder.decode(&token) {
                Ok(decoded) => {
                    let source = decoded.identity_source();
                    if let Some(identity) = decoded.claims.to_identity() {
                        if !source.is_trusted() {
                            warn!(
                                "Identity for {} rebuilt from unverified credential claims",
                                identity.display_name()
                            );
                        }
                        self.establish(None, Some((identity, source)));
                        self.publish(SessionEvent::Restored {
                            source: Some(source),
                        });
                        return;
                    }
                    debug!("Credential claims carry no identity");
                }
                Err(e) => debug!("Credential claims could not be decoded: {e}"),
            }
        }

        // 5. Credential only
        warn!("Session restored without an identity");
        self.establish(None, None);
        self.publish(SessionEvent::Restored { source: None });
    }

    /// Enter the authenticated state and (re)arm the inactivity timer.
    ///
    /// `token` replaces the current credential when given. Identities from
    /// login, who-am-I and verified claims are cached; cached and
    /// unverified identities are not written back.
    fn establish(
        self: &Arc<Self>,
        token: Option<String>,
        identity: Option<(Identity, IdentitySource)>,
    ) {
        if let Some(token) = token {
            self.lock_state().epoch += 1;
            if let Err(e) = self.storage.set(TOKEN_KEY, &token) {
                warn!("Unable to persist credential: {e}");
            }
            self.credential.set(Some(token));
        }

        if let Some((ref identity, source)) = identity
            && matches!(
                source,
                IdentitySource::Login | IdentitySource::Backend | IdentitySource::VerifiedClaims
            )
        {
            match serde_json::to_string(identity) {
                Ok(json) => {
                    if let Err(e) = self.storage.set(IDENTITY_KEY, &json) {
                        warn!("Unable to persist identity: {e}");
                    }
                }
                Err(e) => warn!("Unable to serialize identity: {e}"),
            }
        }

        let mut state = self.lock_state();
        let (identity, source) = identity.unzip();
        state.identity = identity;
        state.identity_source = source;
        state.phase = SessionPhase::Authenticated;
        state.loading = false;
        state.last_error = None;
        state.restored = true;
        state.expired = false;
        self.arm_timer(&mut state);
    }

    fn arm_timer(self: &Arc<Self>, state: &mut SessionState) {
        // Drop (and so cancel) any previous timer first
        state.timer = None;
        state.timer_generation += 1;

        let weak: Weak<Inner> = Arc::downgrade(self);
        state.timer = Some(InactivityTimer::start(
            state.timer_generation,
            self.inactivity_timeout,
            move |generation| {
                if let Some(inner) = weak.upgrade() {
                    inner.expire(generation);
                }
            },
        ));
    }

    fn expire(&self, generation: u64) {
        {
            let state = self.lock_state();
            if state.timer.as_ref().map(InactivityTimer::generation) != Some(generation) {
                return;
            }
        }

        info!(
            "Session expired after {}s of inactivity",
            self.inactivity_timeout.as_secs()
        );
        self.clear();
        self.lock_state().expired = true;
        self.publish(SessionEvent::Expired);
    }

    /// Whether the session a suspended restoration started from is still
    /// in place.
    fn is_current(&self, epoch: u64, token: &str) -> bool {
        self.lock_state().epoch == epoch && self.credential.get().as_deref() == Some(token)
    }

    /// Returns whether anything was cleared.
    fn clear(&self) -> bool {
        let had_credential = self.credential.take().is_some();

        for key in [TOKEN_KEY, IDENTITY_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!("Unable to clear {key} from storage: {e}");
            }
        }

        let mut state = self.lock_state();
        state.epoch += 1;
        let had_identity = state.identity.take().is_some();
        state.identity_source = None;
        state.timer = None;
        state.phase = SessionPhase::Unauthenticated;
        state.loading = false;
        state.last_error = None;
        state.expired = false;

        had_credential || had_identity
    }
}

/// Malformed JSON is treated as absent.
fn read_cached_identity(storage: &dyn DurableStorage) -> Option<Identity> {
    let json = storage.get(IDENTITY_KEY)?;
    match serde_json::from_str::<Identity>(&json) {
        Ok(identity) => Some(identity),
        Err(e) => {
            warn!("Ignoring malformed cached identity: {e}");
            None
        }
    }
}
