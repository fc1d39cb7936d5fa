// Repository ports
// Infrastructure adapters implement these traits

pub mod pickup_repository;
pub mod user_repository;

pub use pickup_repository::PickupRepository;
pub use user_repository::UserRepository;

use thiserror::Error;

/// Failures reported by repository implementations
#[derive(Debug, Error, PartialEq)]
pub enum RepositoryError {
    /// A unique column already holds this value
    #[error("duplicate {field}")]
    Duplicate { field: &'static str },

    /// Anything the storage backend reports that the domain cannot act on
    #[error("storage error: {0}")]
    Backend(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
