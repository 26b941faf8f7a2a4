//! Errors raised by the persistence layer.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A field failed its validation rule before anything was written.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A unique column or index rejected the write.
    #[error("Duplicate {0}")]
    Duplicate(String),

    /// A foreign key pointed at a row that does not exist.
    #[error("Referenced row does not exist: {0}")]
    MissingReference(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[source] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{resource} {id}"))
    }

    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Duplicate(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::MissingReference(msg),
            _ => Self::Database(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
