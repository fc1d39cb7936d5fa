use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::user::{MobileNumber, User, Username};

/// Repository trait for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    ///
    /// Fails with `RepositoryError::Duplicate` when the username or mobile
    /// number is already taken.
    async fn create(&self, user: User) -> RepositoryResult<Uuid>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;

    /// Find several users at once; unknown IDs are skipped
    async fn find_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<User>>;

    async fn find_by_username(&self, username: &Username) -> RepositoryResult<Option<User>>;

    async fn find_by_mobile_number(&self, mobile: &MobileNumber) -> RepositoryResult<Option<User>>;
}
