use thiserror::Error;

use crate::server::error::internal::InternalError;

/// Failure of an economy store operation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A state being written no longer matches the stored version, or a row for a
    /// state assumed new already exists. Nothing from the batch was persisted.
    #[error("Economy state was modified concurrently")]
    Conflict,

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),

    /// Stored data could not be converted to domain types.
    #[error(transparent)]
    Corrupt(#[from] InternalError),
}
