//! Account data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account ID type
pub type AccountId = i64;

/// Authorization role attached to an account. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Persisted identity record.
///
/// `id` is assigned by the store on creation and is zero until then.
/// `email` is the unique external identifier, case-sensitive as stored.
/// `password_hash` is an opaque argon2 PHC string; the plaintext password
/// never appears on this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

impl Account {
    /// Build a fresh, not-yet-persisted account. Creation and last-login
    /// timestamps both start at `now`; the store assigns the id.
    pub fn new(email: String, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            email,
            password_hash,
            role: Role::default(),
            created_at: now,
            last_login: now,
        }
    }
}
