//! In-memory credential store, populated once at startup and read-only afterwards.

use std::collections::HashMap;
use std::fmt;

use crate::models::credential::Credential;

/// Opaque numeric user identifier. Only stable for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl UserId {
    /// Returned by [`CredentialStore::lookup`] when no entry matches.
    pub const ANONYMOUS: UserId = UserId(0);

    pub fn is_anonymous(self) -> bool {
        self == Self::ANONYMOUS
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed mapping from (email, password) to user id.
#[derive(Debug, Default)]
pub struct CredentialStore {
    users: HashMap<Credential, UserId>,
}

impl CredentialStore {
    /// Build the store. A repeated credential keeps the first id it was given.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Credential, UserId)>,
    {
        let mut users = HashMap::new();
        for (credential, id) in entries {
            users.entry(credential).or_insert(id);
        }
        Self { users }
    }

    /// The two demo accounts used by the bundled chat client.
    pub fn demo() -> Self {
        Self::from_entries([
            (Credential::new("john.doe@mail.com", "12345678"), UserId(1)),
            (Credential::new("alice@mail.com", "12345678"), UserId(2)),
        ])
    }

    /// Exact match on email and password; [`UserId::ANONYMOUS`] when absent.
    pub fn lookup(&self, credential: &Credential) -> UserId {
        self.users
            .get(credential)
            .copied()
            .unwrap_or(UserId::ANONYMOUS)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}
