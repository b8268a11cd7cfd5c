//! # Authkit
//!
//! A credential-issuance core: account registration, login with bearer
//! token issuance, and revocable session records.
//!
//! The interesting part is the login workflow in [`auth::AuthManager`].
//! Accounts live in PostgreSQL and session records live in a separate
//! key-value store, so the two cannot share a transaction; the workflow
//! orders its effects (session write, then relational commit, then
//! compensation on commit failure) so that failures land on the safe side:
//! a forced re-login rather than a live session with no durable record.
//!
//! ## Core Modules
//!
//! - [`auth`]: the orchestrator, password hashing, and token issuance
//! - [`db`]: PostgreSQL pool and the account store's transactional contract
//! - [`session`]: session key derivation and the key-value session stores
//! - [`clock`]: injectable time source for deterministic tests
//!
//! ## Example
//!
//! ```no_run
//! use authkit::auth::{AuthManager, TokenConfig, TokenIssuer};
//! use authkit::db::{Database, DatabaseConfig, PgUserStore};
//! use authkit::session::RedisSessionStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     let issuer = TokenIssuer::new(TokenConfig::new(
//!         "authkit".to_string(),
//!         std::fs::read("keys/private.pem")?,
//!         std::fs::read("keys/public.pem")?,
//!     ))?;
//!     let auth = AuthManager::new(
//!         Arc::new(PgUserStore::new(db.pool().clone())),
//!         Arc::new(RedisSessionStore::connect("redis://127.0.0.1:6379/0").await?),
//!         issuer,
//!     );
//!
//!     let token = auth.login("alice@example.com", "correct-horse").await?;
//!     println!("{token}");
//!     Ok(())
//! }
//! ```

/// Orchestrator, password hashing, token issuance, and error taxonomy.
pub mod auth;
pub use auth::{Account, AuthError, AuthManager, AuthResult, TokenClaims, TokenIssuer};

/// Injectable time source.
pub mod clock;
pub use clock::{Clock, SystemClock};

/// PostgreSQL connection pooling and account persistence.
pub mod db;

/// Session key derivation and key-value session stores.
pub mod session;
