//! Account persistence and its transactional contract.
//!
//! The store traits keep the orchestrator decoupled from Postgres so tests
//! can substitute in-memory fakes. On the Postgres side every query helper
//! is generic over [`sqlx::PgExecutor`], so each statement runs standalone
//! on the pool or inside a caller-supplied transaction unchanged.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, PgPool, Postgres, Row, Transaction};

use crate::auth::errors::{AuthError, AuthResult};
use crate::auth::models::{Account, Role};

/// Persistent account records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the account for an email, if one exists.
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>>;

    /// Persist a new account and assign `account.id`.
    ///
    /// A uniqueness violation on the email (including one lost to a
    /// concurrent create) maps to `AuthError::AlreadyExists`.
    async fn create(&self, account: &mut Account) -> AuthResult<()>;

    /// Open an all-or-nothing unit over the store.
    async fn begin(&self) -> AuthResult<Box<dyn UserStoreTx>>;
}

/// An open transaction over the user store.
///
/// Dropping the handle without calling [`commit`](UserStoreTx::commit)
/// rolls the transaction back, so an aborted caller never leaves one open.
#[async_trait]
pub trait UserStoreTx: Send {
    /// Write `account.last_login` inside this transaction.
    async fn update_last_login(&mut self, account: &Account) -> AuthResult<()>;

    /// Make the transaction's writes durable.
    ///
    /// # Errors
    ///
    /// * `AuthError::Commit` - The commit itself failed; nothing was made
    ///   durable
    async fn commit(self: Box<Self>) -> AuthResult<()>;

    /// Discard the transaction's writes.
    async fn rollback(self: Box<Self>) -> AuthResult<()>;
}

/// PostgreSQL-backed user store
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch by email on any executor.
    pub async fn find_by_email_on<'e>(
        exec: impl PgExecutor<'e>,
        email: &str,
    ) -> AuthResult<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, role, created_at, last_login
             FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(exec)
        .await?;

        row.map(|r| Self::map_account(&r)).transpose()
    }

    /// Insert a new account on any executor, assigning its id.
    pub async fn create_on<'e>(
        exec: impl PgExecutor<'e>,
        account: &mut Account,
    ) -> AuthResult<()> {
        let row = sqlx::query(
            "INSERT INTO accounts (email, password_hash, role, created_at, last_login)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role.to_string())
        .bind(account.created_at.naive_utc())
        .bind(account.last_login.naive_utc())
        .fetch_one(exec)
        .await
        .map_err(map_unique_violation)?;

        account.id = row.get("id");
        Ok(())
    }

    /// Write the account's last-login timestamp on any executor.
    pub async fn update_last_login_on<'e>(
        exec: impl PgExecutor<'e>,
        account: &Account,
    ) -> AuthResult<()> {
        sqlx::query("UPDATE accounts SET last_login = $1 WHERE id = $2")
            .bind(account.last_login.naive_utc())
            .bind(account.id)
            .execute(exec)
            .await?;
        Ok(())
    }

    fn map_account(row: &PgRow) -> AuthResult<Account> {
        let role = row
            .get::<String, _>("role")
            .parse::<Role>()
            .map_err(|e| AuthError::Database(sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: e.into(),
            }))?;

        Ok(Account {
            id: row.get("id"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            role,
            created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
            last_login: row.get::<chrono::NaiveDateTime, _>("last_login").and_utc(),
        })
    }
}

/// Map a unique-constraint violation (SQLSTATE 23505) to `AlreadyExists`.
fn map_unique_violation(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            return AuthError::AlreadyExists;
        }
    }
    AuthError::Database(err)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>> {
        Self::find_by_email_on(&self.pool, email).await
    }

    async fn create(&self, account: &mut Account) -> AuthResult<()> {
        Self::create_on(&self.pool, account).await
    }

    async fn begin(&self) -> AuthResult<Box<dyn UserStoreTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgUserTx { tx }))
    }
}

/// Open Postgres transaction. sqlx rolls the inner transaction back on
/// drop, so abandoning this handle is safe.
pub struct PgUserTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UserStoreTx for PgUserTx {
    async fn update_last_login(&mut self, account: &Account) -> AuthResult<()> {
        PgUserStore::update_last_login_on(&mut *self.tx, account).await
    }

    async fn commit(self: Box<Self>) -> AuthResult<()> {
        self.tx.commit().await.map_err(AuthError::Commit)
    }

    async fn rollback(self: Box<Self>) -> AuthResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}

/// Mock implementation for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MockState {
        accounts: HashMap<String, Account>,
        next_id: i64,
        fail_begin: bool,
        fail_update: bool,
        fail_commit: bool,
    }

    /// In-memory user store whose transactions stage the last-login write
    /// and apply it only on commit, with injectable failures.
    #[derive(Clone)]
    pub struct MockUserStore {
        state: Arc<Mutex<MockState>>,
    }

    impl Default for MockUserStore {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockUserStore {
        pub fn new() -> Self {
            Self {
                state: Arc::new(Mutex::new(MockState {
                    next_id: 1,
                    ..MockState::default()
                })),
            }
        }

        pub fn fail_begin(&self, fail: bool) {
            self.state.lock().unwrap().fail_begin = fail;
        }

        pub fn fail_update(&self, fail: bool) {
            self.state.lock().unwrap().fail_update = fail;
        }

        pub fn fail_commit(&self, fail: bool) {
            self.state.lock().unwrap().fail_commit = fail;
        }

        /// Inspect the stored account for an email.
        pub fn stored(&self, email: &str) -> Option<Account> {
            self.state.lock().unwrap().accounts.get(email).cloned()
        }
    }

    #[async_trait]
    impl UserStore for MockUserStore {
        async fn find_by_email(&self, email: &str) -> AuthResult<Option<Account>> {
            Ok(self.state.lock().unwrap().accounts.get(email).cloned())
        }

        async fn create(&self, account: &mut Account) -> AuthResult<()> {
            let mut state = self.state.lock().unwrap();
            if state.accounts.contains_key(&account.email) {
                // Same mapping the unique constraint produces.
                return Err(AuthError::AlreadyExists);
            }

            account.id = state.next_id;
            state.next_id += 1;
            state.accounts.insert(account.email.clone(), account.clone());
            Ok(())
        }

        async fn begin(&self) -> AuthResult<Box<dyn UserStoreTx>> {
            if self.state.lock().unwrap().fail_begin {
                return Err(AuthError::Database(sqlx::Error::Protocol(
                    "injected begin failure".to_string(),
                )));
            }
            Ok(Box::new(MockUserTx {
                store: self.clone(),
                staged_last_login: None,
            }))
        }
    }

    pub struct MockUserTx {
        store: MockUserStore,
        staged_last_login: Option<(String, DateTime<Utc>)>,
    }

    #[async_trait]
    impl UserStoreTx for MockUserTx {
        async fn update_last_login(&mut self, account: &Account) -> AuthResult<()> {
            if self.store.state.lock().unwrap().fail_update {
                return Err(AuthError::Database(sqlx::Error::Protocol(
                    "injected update failure".to_string(),
                )));
            }
            self.staged_last_login = Some((account.email.clone(), account.last_login));
            Ok(())
        }

        async fn commit(self: Box<Self>) -> AuthResult<()> {
            let mut state = self.store.state.lock().unwrap();
            if state.fail_commit {
                return Err(AuthError::Commit(sqlx::Error::Protocol(
                    "injected commit failure".to_string(),
                )));
            }

            if let Some((email, at)) = self.staged_last_login {
                if let Some(account) = state.accounts.get_mut(&email) {
                    account.last_login = at;
                }
            }
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> AuthResult<()> {
            // Staged writes are simply discarded.
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::TimeZone;

        fn account(email: &str) -> Account {
            Account::new(
                email.to_string(),
                "$argon2id$hash".to_string(),
                Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            )
        }

        #[tokio::test]
        async fn test_mock_create_assigns_ids() {
            let store = MockUserStore::new();

            let mut a = account("a@example.com");
            store.create(&mut a).await.unwrap();
            assert_eq!(a.id, 1);

            let mut b = account("b@example.com");
            store.create(&mut b).await.unwrap();
            assert_eq!(b.id, 2);
        }

        #[tokio::test]
        async fn test_mock_create_duplicate_email() {
            let store = MockUserStore::new();

            let mut a = account("a@example.com");
            store.create(&mut a).await.unwrap();

            let mut dup = account("a@example.com");
            let err = store.create(&mut dup).await.unwrap_err();
            assert!(matches!(err, AuthError::AlreadyExists));
        }

        #[tokio::test]
        async fn test_mock_tx_applies_staged_write_on_commit() {
            let store = MockUserStore::new();
            let mut a = account("a@example.com");
            store.create(&mut a).await.unwrap();

            let later = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();
            a.last_login = later;

            let mut tx = store.begin().await.unwrap();
            tx.update_last_login(&a).await.unwrap();

            // Not visible before commit.
            assert_ne!(store.stored("a@example.com").unwrap().last_login, later);

            tx.commit().await.unwrap();
            assert_eq!(store.stored("a@example.com").unwrap().last_login, later);
        }

        #[tokio::test]
        async fn test_mock_tx_rollback_discards_staged_write() {
            let store = MockUserStore::new();
            let mut a = account("a@example.com");
            store.create(&mut a).await.unwrap();
            let original = a.last_login;

            a.last_login = original + chrono::TimeDelta::hours(1);
            let mut tx = store.begin().await.unwrap();
            tx.update_last_login(&a).await.unwrap();
            tx.rollback().await.unwrap();

            assert_eq!(store.stored("a@example.com").unwrap().last_login, original);
        }

        #[tokio::test]
        async fn test_mock_tx_commit_failure_keeps_store_unchanged() {
            let store = MockUserStore::new();
            let mut a = account("a@example.com");
            store.create(&mut a).await.unwrap();
            let original = a.last_login;

            store.fail_commit(true);
            a.last_login = original + chrono::TimeDelta::hours(1);

            let mut tx = store.begin().await.unwrap();
            tx.update_last_login(&a).await.unwrap();
            let err = tx.commit().await.unwrap_err();

            assert!(matches!(err, AuthError::Commit(_)));
            assert_eq!(store.stored("a@example.com").unwrap().last_login, original);
        }
    }
}
