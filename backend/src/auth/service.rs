//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::errors::{ServiceError, ServiceResult};
use crate::services::AppState;
use crate::services::account_service::AccountService;
use crate::utils::jwt::JwtUtils;

/// Authentication service for handling login and token generation
pub struct AuthService<'a> {
    account_service: AccountService<'a>,
    jwt_utils: &'a JwtUtils,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(state: &'a AppState) -> Self {
        AuthService {
            account_service: AccountService::new(state.accounts.as_ref()),
            jwt_utils: state.jwt.as_ref(),
        }
    }

    /// Authenticate the account and issue a token carrying its role
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<LoginResponse> {
        let account = self
            .account_service
            .login(&login_request.email, &login_request.secret)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Failed login attempt for {}", login_request.email);
                ServiceError::unauthenticated("Invalid email or secret")
            })?;

        let token = self.jwt_utils.generate_token(Some(&account))?;

        tracing::info!("Account {} logged in", account.id);
        Ok(LoginResponse {
            email: account.email,
            role: account.role,
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Role;
    use crate::repositories::MemoryStore;
    use std::sync::Arc;

    fn state() -> AppState {
        let store = Arc::new(MemoryStore::seeded());
        AppState::new(
            store.clone(),
            store,
            JwtUtils::new("auth-service-test-key", 86400),
        )
    }

    fn request(email: &str, secret: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            secret: secret.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_token_for_role() {
        let state = state();
        let service = AuthService::new(&state);

        let response = service
            .login(request("editor@test.com", "123456"))
            .await
            .unwrap();
        assert_eq!(response.role, Role::Editor);
        assert_eq!(response.email, "editor@test.com");

        let claims = state.jwt.validate_token(&response.token).unwrap();
        assert_eq!(claims.role, Role::Editor);
        assert_eq!(claims.email, "editor@test.com");
    }

    #[tokio::test]
    async fn test_wrong_secret_is_unauthenticated() {
        let state = state();
        let service = AuthService::new(&state);

        assert!(matches!(
            service.login(request("adm@test.com", "wrong")).await,
            Err(ServiceError::Unauthenticated { .. })
        ));
        assert!(matches!(
            service.login(request("", "")).await,
            Err(ServiceError::Unauthenticated { .. })
        ));
    }
}
