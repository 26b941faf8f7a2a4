use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use tokio::task;

use crate::config::SecurityConfig;
use crate::db::error::{StoreError, StoreResult};
use crate::db::validation::{USER_NAME_LEN, validate_email, validate_len};
use crate::entities::{prelude::*, users};

/// User data returned from repository (without sensitive password hash)
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub email_confirmed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            email_confirmed: model.email_confirmed,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Identity providers whose account ids are stored on the user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalProvider {
    Facebook,
    Google,
}

impl ExternalProvider {
    const fn column(self) -> users::Column {
        match self {
            Self::Facebook => users::Column::FacebookId,
            Self::Google => users::Column::GoogleId,
        }
    }
}

/// Fields for a new account. At least one of `password` or an external id
/// is expected from the caller; the store itself only enforces the field rules.
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Validates and inserts a user. Addresses are stored lowercased and get a
    /// fresh confirmation token.
    pub async fn create(&self, new: NewUser<'_>, security: &SecurityConfig) -> StoreResult<User> {
        let name = new.name.trim();
        validate_len("Name", name, &USER_NAME_LEN)?;

        let email = new.email.map(|e| e.trim().to_lowercase());
        if let Some(email) = &email {
            validate_email(email)?;
        }

        let password_hash = match new.password {
            Some(password) => {
                let password = password.to_string();
                let config = security.clone();
                Some(
                    task::spawn_blocking(move || hash_password(&password, Some(&config)))
                        .await
                        .map_err(|e| {
                            StoreError::Internal(format!("Password hashing task panicked: {e}"))
                        })??,
                )
            }
            None => None,
        };

        let confirm_token = email
            .as_ref()
            .map(|_| uuid::Uuid::new_v4().to_string());
        let now = chrono::Utc::now().to_rfc3339();

        let model = users::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email),
            password_hash: Set(password_hash),
            facebook_id: Set(None),
            google_id: Set(None),
            email_confirmed: Set(false),
            email_confirm_token: Set(confirm_token),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .map_err(|e| match StoreError::from(e) {
            StoreError::Duplicate(_) => StoreError::Duplicate("email address".to_string()),
            other => other,
        })?;

        Ok(User::from(model))
    }

    pub async fn get_by_id(&self, id: i32) -> StoreResult<Option<User>> {
        let user = Users::find_by_id(id).one(&self.conn).await?;
        Ok(user.map(User::from))
    }

    pub async fn get_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = Users::find()
            .filter(users::Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.conn)
            .await?;

        Ok(user.map(User::from))
    }

    pub async fn list_all(&self) -> StoreResult<Vec<User>> {
        let users = Users::find()
            .order_by_asc(users::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(users.into_iter().map(User::from).collect())
    }

    /// Verify password for the account registered under `email`.
    /// Note: This uses `spawn_blocking` because Argon2 hashing is CPU-intensive
    /// and would block the async runtime if run directly.
    pub async fn verify_password(&self, email: &str, password: &str) -> StoreResult<Option<User>> {
        let user = Users::find()
            .filter(users::Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.conn)
            .await?;

        let Some(user) = user else {
            return Ok(None);
        };
        let Some(password_hash) = user.password_hash.clone() else {
            return Ok(None);
        };

        let password = password.to_string();
        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| StoreError::Internal(format!("Invalid password hash format: {e}")))?;

            Ok::<bool, StoreError>(
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .map_err(|e| StoreError::Internal(format!("Password verification task panicked: {e}")))??;

        Ok(is_valid.then(|| User::from(user)))
    }

    pub async fn update_name(&self, id: i32, name: &str) -> StoreResult<User> {
        let name = name.trim();
        validate_len("Name", name, &USER_NAME_LEN)?;

        let user = Users::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| StoreError::not_found("User", id))?;

        let mut active: users::ActiveModel = user.into();
        active.name = Set(name.to_string());
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        let updated = active.update(&self.conn).await?;

        Ok(User::from(updated))
    }

    /// Marks the address behind `token` as confirmed and burns the token.
    /// Returns `None` for unknown or already used tokens.
    pub async fn confirm_email(&self, token: &str) -> StoreResult<Option<User>> {
        let Some(user) = Users::find()
            .filter(users::Column::EmailConfirmToken.eq(token))
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = user.into();
        active.email_confirmed = Set(true);
        active.email_confirm_token = Set(None);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        let updated = active.update(&self.conn).await?;

        Ok(Some(User::from(updated)))
    }

    /// Pending confirmation token, handed to whatever delivers the mail.
    pub async fn get_confirm_token(&self, id: i32) -> StoreResult<Option<String>> {
        let user = Users::find_by_id(id).one(&self.conn).await?;
        Ok(user.and_then(|u| u.email_confirm_token))
    }

    pub async fn link_external(
        &self,
        id: i32,
        provider: ExternalProvider,
        external_id: &str,
    ) -> StoreResult<User> {
        if external_id.trim().is_empty() {
            return Err(StoreError::validation("External id cannot be empty"));
        }

        let user = Users::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| StoreError::not_found("User", id))?;

        let mut active: users::ActiveModel = user.into();
        match provider {
            ExternalProvider::Facebook => active.facebook_id = Set(Some(external_id.to_string())),
            ExternalProvider::Google => active.google_id = Set(Some(external_id.to_string())),
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active.update(&self.conn).await.map_err(|e| match StoreError::from(e) {
            StoreError::Duplicate(_) => {
                StoreError::Duplicate(format!("{provider:?} account"))
            }
            other => other,
        })?;

        Ok(User::from(updated))
    }

    pub async fn find_by_external(
        &self,
        provider: ExternalProvider,
        external_id: &str,
    ) -> StoreResult<Option<User>> {
        let user = Users::find()
            .filter(provider.column().eq(external_id))
            .one(&self.conn)
            .await?;

        Ok(user.map(User::from))
    }
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, uses the argon2 crate defaults.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> StoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None, // output length (use default)
        )
        .map_err(|e| StoreError::Internal(format!("Invalid Argon2 params: {e}")))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StoreError::Internal(format!("Failed to hash password: {e}")))?;

    Ok(hash.to_string())
}
