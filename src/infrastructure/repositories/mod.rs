// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory;
pub mod postgres_pickup_repository;
pub mod postgres_user_repository;

pub use in_memory::{InMemoryPickupRepository, InMemoryUserRepository};
pub use postgres_pickup_repository::PostgresPickupRepository;
pub use postgres_user_repository::PostgresUserRepository;

use crate::domain::repositories::RepositoryError;

/// Maps a sqlx failure to a repository error, recognising unique violations
pub(crate) fn map_sqlx_error(context: &str, err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some(c) if c.contains("mobile") => "mobile number",
                Some(c) if c.contains("username") => "username",
                _ => "identifier",
            };
            return RepositoryError::Duplicate { field };
        }
    }
    RepositoryError::Backend(format!("{}: {}", context, err))
}
