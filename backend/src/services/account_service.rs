//! Account business logic service.
//!
//! Owns account records through the `AccountStore` capability: credential
//! lookup for login, creation with validation, lookup by id and paginated
//! listing.

use crate::api::common::PaginationFilter;
use crate::database::models::{Account, AccountDto, NewAccount, Role};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::AccountStore;
use crate::services::validation;

/// Service layer for account operations.
pub struct AccountService<'a> {
    store: &'a dyn AccountStore,
}

impl<'a> AccountService<'a> {
    /// Creates a new AccountService instance.
    ///
    /// # Arguments
    /// * `store` - Account storage shared by every request
    pub fn new(store: &'a dyn AccountStore) -> Self {
        Self { store }
    }

    /// Looks up the account matching both credentials exactly.
    ///
    /// The secret is compared as a plain string. Stored fixtures rely on it,
    /// so no hashing is applied here.
    pub async fn login(&self, email: &str, secret: &str) -> ServiceResult<Option<Account>> {
        Ok(self.store.find_by_credentials(email, secret).await?)
    }

    /// Creates a new account with full validation.
    ///
    /// # Arguments
    /// * `dto` - Account creation data transfer object
    ///
    /// # Returns
    /// The stored Account with its assigned id
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` listing every violated rule
    pub async fn create(&self, dto: AccountDto) -> ServiceResult<Account> {
        validation::check(&dto)?;

        let role = dto
            .role
            .parse::<Role>()
            .map_err(ServiceError::validation)?;

        let account = self
            .store
            .insert(NewAccount {
                email: dto.email,
                secret: dto.secret,
                role,
            })
            .await?;

        tracing::info!("Account {} created with role {}", account.id, account.role);
        Ok(account)
    }

    pub async fn find_by_id(&self, id: i64) -> ServiceResult<Option<Account>> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Retrieves an account by ID, returning error if not found.
    pub async fn get_required(&self, id: i64) -> ServiceResult<Account> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", id))
    }

    /// Lists accounts in insertion order, ten per page when a page is given.
    pub async fn list_page(&self, pagination: &PaginationFilter) -> ServiceResult<Vec<Account>> {
        Ok(self.store.list_page(pagination).await?)
    }
}
