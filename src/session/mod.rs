//! Session records: ephemeral proof-of-authentication entries.
//!
//! A successful login writes one key-value entry per account mapping a
//! deterministic session key to the issued token, bounded by a ttl. The
//! store is a system separate from the relational database; the login
//! workflow in [`crate::auth::AuthManager`] compensates for that split.

use async_trait::async_trait;
use std::time::Duration;

use crate::auth::errors::AuthResult;

pub mod config;
pub mod memory;
pub mod redis;

pub use config::SessionConfig;
pub use memory::MemorySessionStore;
pub use self::redis::RedisSessionStore;

/// Fixed lifetime of a session record from issuance.
pub const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Namespace prefix for session keys.
const SESSION_KEY_PREFIX: &str = "session:";

/// Derive the session key for an account email.
///
/// Plain prefix concatenation, not a hash. Existing deployments address
/// their session data with exactly this shape, so it must not change.
pub fn session_key(email: &str) -> String {
    format!("{SESSION_KEY_PREFIX}{email}")
}

/// Key-value store holding the live session record per account.
///
/// At most one live value exists per key: `save` is an upsert and the last
/// writer wins. `delete` of an absent key is not an error, which keeps
/// revocation and compensation idempotent.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Upsert `value` under `key` with the given time-to-live.
    async fn save(&self, key: &str, value: &str, ttl: Duration) -> AuthResult<()>;

    /// Remove `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> AuthResult<()>;

    /// Fetch the live value under `key`, if any. Not used by the login
    /// workflow itself; provided for revocation checks.
    async fn get(&self, key: &str) -> AuthResult<Option<String>>;
}
