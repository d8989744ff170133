//! Device credentials and the guarded cell that holds them.

use std::fmt;

use parking_lot::RwLock;

/// Username/password pair used to sign requests.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// No username set; requests go out unsigned.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.username.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Read-mostly credential cell shared by all calls on a client.
///
/// Calls take a [`snapshot`](Self::snapshot) at start; a concurrent
/// [`set`](Self::set) never affects a request already being signed.
#[derive(Debug, Default)]
pub struct CredentialStore {
    inner: RwLock<Credentials>,
}

impl CredentialStore {
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            inner: RwLock::new(credentials),
        }
    }

    /// Returns a copy of the current credentials.
    #[must_use]
    pub fn snapshot(&self) -> Credentials {
        self.inner.read().clone()
    }

    /// Replaces the credentials for subsequent calls.
    pub fn set(&self, credentials: Credentials) {
        *self.inner.write() = credentials;
    }
}
