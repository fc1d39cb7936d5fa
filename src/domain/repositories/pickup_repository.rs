use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::pickup::{PickupRequest, PickupStatus};

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first
    Ascending,
    /// Newest first
    Descending,
}

/// Timestamp a list query is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    UpdatedAt,
}

/// Ordering of a list query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Sort {
    pub const NEWEST_FIRST: Sort = Sort {
        key: SortKey::CreatedAt,
        order: SortOrder::Descending,
    };
    pub const OLDEST_FIRST: Sort = Sort {
        key: SortKey::CreatedAt,
        order: SortOrder::Ascending,
    };
    pub const RECENTLY_UPDATED_FIRST: Sort = Sort {
        key: SortKey::UpdatedAt,
        order: SortOrder::Descending,
    };
}

/// Repository trait for PickupRequest aggregates
///
/// Plain persistence, no business rules. Every mutation after creation goes
/// through [`PickupRepository::update_if_status`] so that two writers racing
/// on the same record cannot both succeed.
#[async_trait]
pub trait PickupRepository: Send + Sync {
    /// Insert a newly submitted pickup
    async fn create(&self, pickup: &PickupRequest) -> RepositoryResult<()>;

    /// Find a pickup by its ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<PickupRequest>>;

    /// All pickups submitted by a customer
    async fn find_by_customer(
        &self,
        customer_id: Uuid,
        sort: Sort,
    ) -> RepositoryResult<Vec<PickupRequest>>;

    /// Pickups assigned to a collector whose status is in `statuses`
    async fn find_by_collector_and_status(
        &self,
        collector_id: Uuid,
        statuses: &[PickupStatus],
        sort: Sort,
    ) -> RepositoryResult<Vec<PickupRequest>>;

    async fn find_by_status(
        &self,
        status: PickupStatus,
        sort: Sort,
    ) -> RepositoryResult<Vec<PickupRequest>>;

    /// Save `pickup` only if the stored status still equals `expected`
    ///
    /// Returns `Ok(false)` when the record is missing or another writer moved
    /// it on first; nothing is written in that case.
    async fn update_if_status(
        &self,
        pickup: &PickupRequest,
        expected: PickupStatus,
    ) -> RepositoryResult<bool>;
}
