//! JWT token utilities for authentication and authorization.
//!
//! Provides token creation, validation, and claims management. Tokens are
//! HS256-signed with the configured symmetric key and carry the account's
//! email and role; they are never refreshed or revoked and simply stop
//! validating once `exp` has passed.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::database::models::{Account, Role};
use crate::errors::{ServiceError, ServiceResult};

/// JWT Claims structure containing the account identity and role
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Account email
    pub email: String,
    /// Account role
    pub role: Role,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from a signing secret and token lifetime
    pub fn new(secret: &str, expires_in_seconds: u64) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Expiry is a plain clock comparison
        validation.leeway = 0;

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expires_in_seconds)
    }

    /// Generate a signed token for `account`, or an empty string when there is none
    pub fn generate_token(&self, account: Option<&Account>) -> ServiceResult<String> {
        self.generate_token_at(account, Utc::now())
    }

    /// Same as `generate_token`, with an explicit issue time
    pub fn generate_token_at(
        &self,
        account: Option<&Account>,
        issued_at: DateTime<Utc>,
    ) -> ServiceResult<String> {
        let Some(account) = account else {
            return Ok(String::new());
        };

        let exp = issued_at + Duration::seconds(self.expires_in_seconds as i64);

        let claims = Claims {
            email: account.email.clone(),
            role: account.role,
            exp: exp.timestamp().max(0) as usize,
            iat: issued_at.timestamp().max(0) as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                ServiceError::unauthenticated("Invalid or expired token")
            })
    }

    /// Validate the token carried by an `Authorization: Bearer <token>` header value
    pub fn authenticate(&self, authorization: Option<&str>) -> ServiceResult<Claims> {
        let header = authorization
            .ok_or_else(|| ServiceError::unauthenticated("Missing authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ServiceError::unauthenticated("Malformed authorization header"))?;

        self.validate_token(token)
    }
}

impl Claims {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Check if user has any of the given roles
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    /// Role check against a route's allowed set
    pub fn authorize(&self, roles: &[Role]) -> ServiceResult<()> {
        if self.has_any_role(roles) {
            Ok(())
        } else {
            Err(ServiceError::forbidden(format!(
                "Role '{}' is not allowed to access this resource",
                self.role
            )))
        }
    }
}
