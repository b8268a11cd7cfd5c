//! In-process session store for development and tests.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::SessionStore;
use crate::auth::errors::{AuthError, AuthResult};
use crate::clock::{Clock, SystemClock};

/// Sessions held in a process-local map with lazy expiry.
///
/// Suitable for single-node development setups and tests; anything
/// multi-node needs [`super::RedisSessionStore`].
#[derive(Clone)]
pub struct MemorySessionStore {
    entries: Arc<Mutex<HashMap<String, (String, DateTime<Utc>)>>>,
    clock: Arc<dyn Clock>,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock (deterministic expiry in tests).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn lock(&self) -> AuthResult<std::sync::MutexGuard<'_, HashMap<String, (String, DateTime<Utc>)>>> {
        self.entries
            .lock()
            .map_err(|_| AuthError::SessionUnavailable("session map lock poisoned".to_string()))
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(&self, key: &str, value: &str, ttl: Duration) -> AuthResult<()> {
        let expires_at =
            self.clock.now() + TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        self.lock()?
            .insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }

    async fn delete(&self, key: &str) -> AuthResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    async fn get(&self, key: &str) -> AuthResult<Option<String>> {
        let now = self.clock.now();
        let mut entries = self.lock()?;

        match entries.get(key) {
            Some((_, expires_at)) if *expires_at <= now => {
                entries.remove(key);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }
}
