//! Identity store: registration, login and bearer tokens

use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::jwt::{create_token, verify_token};
use crate::auth::password::{hash_password, verify_password};
use crate::config::AuthConfig;
use crate::domain::repositories::UserRepository;
use crate::domain::user::{MobileNumber, NewUser, User, Username};
use crate::domain::{DomainError, DomainResult};

pub struct IdentityService {
    users: Arc<dyn UserRepository>,
    config: AuthConfig,
}

impl IdentityService {
    pub fn new(users: Arc<dyn UserRepository>, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Registers a new account
    ///
    /// Fails with `Conflict` when the username or mobile number is taken.
    /// The uniqueness checks up front give a precise message; the storage
    /// constraint still catches a concurrent duplicate.
    pub async fn register(&self, new_user: NewUser) -> DomainResult<User> {
        if self
            .users
            .find_by_mobile_number(&new_user.mobile_number)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(
                "User with this mobile number already exists".to_string(),
            ));
        }
        if self
            .users
            .find_by_username(&new_user.username)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(
                "User with this username already exists".to_string(),
            ));
        }

        let password = new_user.password.clone();
        let cost = self.config.bcrypt_cost;
        let password_hash =
            run_blocking(move || hash_password(&password, cost)).await?;

        let user = User::register(new_user, password_hash);
        self.users.create(user.clone()).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }

    /// Checks a username-or-mobile plus password pair
    ///
    /// A login that parses as a mobile number is matched in its normalised
    /// form; anything else is a username. Unknown account and wrong password
    /// produce the same error.
    pub async fn authenticate(&self, login: &str, password: &str) -> DomainResult<User> {
        let user = if let Ok(mobile) = MobileNumber::new(login) {
            self.users.find_by_mobile_number(&mobile).await?
        } else if let Ok(username) = Username::new(login) {
            self.users.find_by_username(&username).await?
        } else {
            None
        };
        let user = user.ok_or(DomainError::InvalidCredentials)?;

        let candidate = password.to_string();
        let stored = user.password_hash.clone();
        let valid = run_blocking(move || verify_password(&candidate, &stored)).await?;

        if !valid {
            tracing::debug!(user_id = %user.id, "password mismatch");
            return Err(DomainError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Issues a signed token for `user_id`, valid for the configured TTL
    pub fn issue_token(&self, user_id: Uuid) -> DomainResult<String> {
        create_token(
            user_id,
            &self.config.jwt_secret,
            Duration::seconds(self.config.token_ttl_secs),
        )
        .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Returns the user ID carried by a valid, unexpired token
    pub fn validate_token(&self, token: &str) -> DomainResult<Uuid> {
        verify_token(token, &self.config.jwt_secret)
            .map(|claims| claims.sub)
            .map_err(|e| {
                tracing::debug!(error = %e, "rejected token");
                DomainError::Unauthorized("Token is not valid".to_string())
            })
    }
}

/// Runs a bcrypt operation on the blocking pool
async fn run_blocking<T, F>(f: F) -> DomainResult<T>
where
    F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DomainError::Internal(format!("Password worker failed: {}", e)))?
        .map_err(|e| DomainError::Internal(format!("Password hashing failed: {}", e)))
}
