//! Redis-backed session store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;

use super::SessionStore;
use crate::auth::errors::AuthResult;

/// Sessions held in Redis, one key per account. Expiry is enforced
/// server-side via `SET .. EX`, so no sweeper task is needed.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    /// Connect to Redis and build a store.
    ///
    /// # Arguments
    ///
    /// * `url` - Connection string, e.g. `redis://127.0.0.1:6379/0`
    ///
    /// # Errors
    ///
    /// * `AuthError::Session` - URL invalid or the server is unreachable
    pub async fn connect(url: &str) -> AuthResult<Self> {
        let client = Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn save(&self, key: &str, value: &str, ttl: Duration) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(key, value, ttl.as_secs()).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        // DEL of a missing key is a no-op in Redis, which is exactly the
        // idempotence the revocation and compensation paths rely on.
        let _: () = conn.del(key).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> AuthResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }
}
