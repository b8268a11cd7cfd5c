//! Session store configuration.

use std::env;

/// Session store configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Redis connection URL
    pub redis_url: String,
}

impl SessionConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `REDIS_URL`: Redis connection string (default: `redis://127.0.0.1:6379/0`)
    ///
    /// # Returns
    ///
    /// * `SessionConfig` - Configuration from environment
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379/0".to_string()),
        }
    }

    /// Create a default configuration for development
    pub fn development() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379/0".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::development()
    }
}
