//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::{NewUser, Store, User};
use crate::services::auth_service::{AuthError, AuthService, Registration};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Registration, AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::Validation("Email is required".to_string()));
        }

        if password.chars().count() < self.security.min_password_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                self.security.min_password_length
            )));
        }

        let user = self
            .store
            .create_user(
                NewUser {
                    name,
                    email: Some(email),
                    password: Some(password),
                },
                &self.security,
            )
            .await?;

        let confirm_token = self.store.get_confirm_token(user.id).await?;

        info!(user_id = user.id, "Registered new user");
        Ok(Registration {
            user,
            confirm_token,
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.store
            .verify_user_password(email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn confirm_email(&self, token: &str) -> Result<User, AuthError> {
        let user = self
            .store
            .confirm_email(token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        info!(user_id = user.id, "Email address confirmed");
        Ok(user)
    }

    async fn get_user(&self, id: i32) -> Result<User, AuthError> {
        self.store
            .get_user(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    async fn update_name(&self, id: i32, name: &str) -> Result<User, AuthError> {
        Ok(self.store.update_user_name(id, name).await?)
    }
}
