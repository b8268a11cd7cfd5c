//! Authentication module providing account registration, login, token
//! issuance, and session revocation.
//!
//! This module implements the credential-issuance workflow:
//! - Argon2id password hashing with per-hash random salts
//! - EdDSA-signed bearer tokens (24-hour expiry, fresh `jti` per issuance)
//! - A revocable session record per account (24-hour ttl)
//! - A login that couples the last-login update and the session write into
//!   one logically atomic step, with compensation when the two stores
//!   disagree (see [`manager`])
//!
//! ## Example
//!
//! ```no_run
//! use authkit::auth::{AuthManager, TokenConfig, TokenIssuer};
//! use authkit::db::{Database, DatabaseConfig, PgUserStore};
//! use authkit::session::{RedisSessionStore, SessionConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     let sessions = RedisSessionStore::connect(&SessionConfig::from_env().redis_url).await?;
//!     let issuer = TokenIssuer::new(TokenConfig::new(
//!         "authkit".to_string(),
//!         std::fs::read("keys/private.pem")?,
//!         std::fs::read("keys/public.pem")?,
//!     ))?;
//!
//!     let auth = AuthManager::new(
//!         Arc::new(PgUserStore::new(db.pool().clone())),
//!         Arc::new(sessions),
//!         issuer,
//!     );
//!
//!     auth.register("alice@example.com", "correct-horse").await?;
//!     let token = auth.login("alice@example.com", "correct-horse").await?;
//!     let claims = auth.verify_token(&token)?;
//!     println!("logged in: {}", claims.sub);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod hasher;
pub mod manager;
pub mod models;
pub mod token;

pub use errors::{AuthError, AuthResult};
pub use hasher::PasswordHasher;
pub use manager::{AuthManager, DEFAULT_AUTH_DEADLINE, with_deadline};
pub use models::{Account, AccountId, Role};
pub use token::{TokenClaims, TokenConfig, TokenIssuer};
