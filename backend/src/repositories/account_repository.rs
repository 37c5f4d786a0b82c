//! Database repository for account operations.
//!
//! SQLite-backed `AccountStore`. Accounts are listed in id order, which is
//! insertion order because ids are assigned by AUTOINCREMENT.

use crate::api::common::PaginationFilter;
use crate::database::models::{Account, NewAccount};
use crate::repositories::AccountStore;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Repository for account database operations.
///
/// Handles all persistence operations for the Account entity.
#[derive(Clone)]
pub struct AccountRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn insert(&self, account: NewAccount) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, secret, role)
            VALUES (?, ?, ?)
            RETURNING id, email, secret, role
            "#,
        )
        .bind(account.email)
        .bind(account.secret)
        .bind(account.role)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    /// Retrieves an account by its ID.
    ///
    /// # Returns
    /// `Some(Account)` if found, `None` otherwise
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, email, secret, role FROM accounts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Plain equality on both columns; the first match by id wins.
    async fn find_by_credentials(&self, email: &str, secret: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, secret, role FROM accounts
            WHERE email = ? AND secret = ?
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(secret)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn list_page(&self, pagination: &PaginationFilter) -> Result<Vec<Account>> {
        let accounts = match (pagination.limit(), pagination.offset()) {
            (Some(limit), Some(offset)) => {
                sqlx::query_as::<_, Account>(
                    "SELECT id, email, secret, role FROM accounts ORDER BY id LIMIT ? OFFSET ?",
                )
                .bind(limit as i64)
                .bind(offset as i64)
                .fetch_all(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as::<_, Account>(
                    "SELECT id, email, secret, role FROM accounts ORDER BY id",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(accounts)
    }
}
