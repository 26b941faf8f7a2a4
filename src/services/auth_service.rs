//! Domain service for accounts and authentication.
//!
//! Handles registration, credential checks, email confirmation and profile
//! updates. Session bookkeeping stays in the HTTP layer.

use serde::Serialize;
use thiserror::Error;

use crate::db::{StoreError, User};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid or already used confirmation token")]
    InvalidToken,

    #[error("An account with this email address already exists")]
    EmailTaken,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => Self::Validation(msg),
            StoreError::Duplicate(_) => Self::EmailTaken,
            StoreError::NotFound(_) => Self::UserNotFound,
            StoreError::Internal(msg) => Self::Internal(msg),
            other => Self::Database(other.to_string()),
        }
    }
}

/// A freshly created account and the token that confirms its address.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub user: User,
    #[serde(skip)]
    pub confirm_token: Option<String>,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a password account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailTaken`] if the address is already registered
    /// and [`AuthError::Validation`] for malformed fields.
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Registration, AuthError>;

    /// Verifies credentials and returns the user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Consumes a confirmation token.
    async fn confirm_email(&self, token: &str) -> Result<User, AuthError>;

    async fn get_user(&self, id: i32) -> Result<User, AuthError>;

    async fn update_name(&self, id: i32, name: &str) -> Result<User, AuthError>;
}
