use thiserror::Error;

/// Errors raised by the local persistence store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record is missing a required field; nothing was written.
    #[error("invalid roadmap record: {field} is required")]
    InvalidRecord { field: &'static str },

    /// The opportunity id is blank; nothing was written.
    #[error("opportunity id must not be empty")]
    EmptyOpportunityId,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
