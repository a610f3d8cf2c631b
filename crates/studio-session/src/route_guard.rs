use crate::{Route, SessionManager, SessionSnapshot};

use studio_auth::ROLE_ADMIN;

use log::debug;

pub const LOGIN_ROUTE: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectReason {
    NotAuthenticated,
    MissingRole(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect { to: String, reason: RedirectReason },
}

impl Navigation {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Navigation::Allow)
    }
}

/// Gatekeeper consulted before every navigation.
#[derive(Clone)]
pub struct RouteGuard {
    session: SessionManager,
    login_route: String,
}

impl RouteGuard {
    pub fn new(session: SessionManager) -> Self {
        Self {
            session,
            login_route: LOGIN_ROUTE.to_string(),
        }
    }

    pub fn with_login_route(mut self, login_route: impl Into<String>) -> Self {
        self.login_route = login_route.into();
        self
    }

    /// Waits for (or triggers) session restoration before deciding, so no
    /// route is judged against an indeterminate session.
    pub async fn check(&self, route: &Route) -> Navigation {
        let snapshot = if self.session.is_restored() {
            self.session.snapshot()
        } else {
            self.session.restore_session().await
        };

        let navigation = decide(route, &snapshot, &self.login_route);
        debug!("Navigation to {}: {navigation:?}", route.name);
        navigation
    }
}

/// Pure navigation rule: authentication first, then role.
pub fn decide(route: &Route, session: &SessionSnapshot, login_route: &str) -> Navigation {
    if route.requires_auth && !session.is_authenticated {
        return Navigation::Redirect {
            to: login_route.to_string(),
            reason: RedirectReason::NotAuthenticated,
        };
    }

    if let Some(ref role) = route.role {
        let satisfied = if role.eq_ignore_ascii_case(ROLE_ADMIN) {
            session.is_admin
        } else {
            session.is_authenticated && session.has_role(role)
        };

        if !satisfied {
            return Navigation::Redirect {
                to: login_route.to_string(),
                reason: RedirectReason::MissingRole(role.clone()),
            };
        }
    }

    Navigation::Allow
}
