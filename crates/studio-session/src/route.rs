use studio_auth::ROLE_ADMIN;

/// A navigation target and what it takes to enter it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: String,
    pub requires_auth: bool,
    pub role: Option<String>,
}

impl Route {
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requires_auth: false,
            role: None,
        }
    }

    pub fn authenticated(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requires_auth: true,
            role: None,
        }
    }

    /// Authenticated and restricted to admins.
    pub fn admin(name: impl Into<String>) -> Self {
        Self::authenticated(name).with_role(ROLE_ADMIN)
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}
