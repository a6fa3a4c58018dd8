use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Account role, ordered by privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    #[default]
    Customer,
    Seller,
    Admin,
}

impl Role {
    fn rank(self) -> u8 {
        match self {
            Role::Customer => 0,
            Role::Seller => 1,
            Role::Admin => 2,
        }
    }

    /// Whether this role may enter a route that requires `required`.
    ///
    /// Admins pass every check; sellers pass seller and customer checks.
    pub fn satisfies(self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    /// Parses a role name from the backend. Unknown names become `Customer`.
    pub fn parse_lossy(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "seller" => Role::Seller,
            _ => Role::Customer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Seller => "seller",
            Role::Admin => "admin",
        }
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self::parse_lossy(&name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials issued by the backend.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &mask_token(&self.token))
            .field("role", &self.role)
            .finish()
    }
}

fn mask_token(token: &str) -> String {
    if token.len() <= 8 || !token.is_char_boundary(4) {
        return "****".to_string();
    }
    format!("{}****", &token[..4])
}

/// Shared handle to the current session.
///
/// The readiness gate reads it through its predicate; refreshers write it.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        let store = Self::new();
        store.set(session);
        store
    }

    pub fn set(&self, session: Session) {
        tracing::debug!(role = %session.role, "Session stored");
        *self.inner.write() = Some(session);
    }

    pub fn clear(&self) {
        if self.inner.write().take().is_some() {
            tracing::debug!("Session cleared");
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.read().clone()
    }

    /// True when a non-empty token is present.
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .as_ref()
            .is_some_and(|s| !s.token.is_empty())
    }

    pub fn role(&self) -> Option<Role> {
        self.inner.read().as_ref().map(|s| s.role)
    }

    /// True when authenticated with a role that satisfies `required`.
    pub fn has_role(&self, required: Role) -> bool {
        self.inner
            .read()
            .as_ref()
            .is_some_and(|s| !s.token.is_empty() && s.role.satisfies(required))
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &*self.inner.read())
            .finish()
    }
}
