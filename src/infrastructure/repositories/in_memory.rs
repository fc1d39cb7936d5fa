//! In-memory repository adapters
//!
//! Back the service with process-local maps when `STORAGE_BACKEND=memory`;
//! the API tests run against these. A single write lock per map makes the
//! status check and the write in `update_if_status` atomic.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::pickup::{PickupRequest, PickupStatus};
use crate::domain::repositories::pickup_repository::{Sort, SortKey, SortOrder};
use crate::domain::repositories::{
    PickupRepository, RepositoryError, RepositoryResult, UserRepository,
};
use crate::domain::user::{MobileNumber, User, Username};

/// In-memory user store
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> RepositoryResult<Uuid> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == user.username) {
            return Err(RepositoryError::Duplicate { field: "username" });
        }
        if users.values().any(|u| u.mobile_number == user.mobile_number) {
            return Err(RepositoryError::Duplicate {
                field: "mobile number",
            });
        }

        let id = user.id;
        users.insert(id, user);
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn find_by_username(&self, username: &Username) -> RepositoryResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.username == username).cloned())
    }

    async fn find_by_mobile_number(&self, mobile: &MobileNumber) -> RepositoryResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.mobile_number == mobile).cloned())
    }
}

/// Pickup plus its insertion sequence, used to break timestamp ties
struct Stored {
    seq: u64,
    pickup: PickupRequest,
}

#[derive(Default)]
struct PickupTable {
    next_seq: u64,
    rows: HashMap<Uuid, Stored>,
}

/// In-memory pickup store
#[derive(Default)]
pub struct InMemoryPickupRepository {
    table: RwLock<PickupTable>,
}

impl InMemoryPickupRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select<F>(&self, filter: F, sort: Sort) -> Vec<PickupRequest>
    where
        F: Fn(&PickupRequest) -> bool,
    {
        let table = self.table.read().await;
        let mut rows: Vec<&Stored> = table.rows.values().filter(|s| filter(&s.pickup)).collect();
        rows.sort_by(|a, b| compare(a, b, sort));
        rows.into_iter().map(|s| s.pickup.clone()).collect()
    }
}

fn compare(a: &Stored, b: &Stored, sort: Sort) -> Ordering {
    let key = |s: &Stored| match sort.key {
        SortKey::CreatedAt => s.pickup.created_at(),
        SortKey::UpdatedAt => s.pickup.updated_at(),
    };
    let ascending = key(a).cmp(&key(b)).then(a.seq.cmp(&b.seq));
    match sort.order {
        SortOrder::Ascending => ascending,
        SortOrder::Descending => ascending.reverse(),
    }
}

#[async_trait]
impl PickupRepository for InMemoryPickupRepository {
    async fn create(&self, pickup: &PickupRequest) -> RepositoryResult<()> {
        let mut table = self.table.write().await;
        if table.rows.contains_key(&pickup.id()) {
            return Err(RepositoryError::Duplicate { field: "id" });
        }

        let seq = table.next_seq;
        table.next_seq += 1;
        table.rows.insert(
            pickup.id(),
            Stored {
                seq,
                pickup: pickup.clone(),
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<PickupRequest>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).map(|s| s.pickup.clone()))
    }

    async fn find_by_customer(
        &self,
        customer_id: Uuid,
        sort: Sort,
    ) -> RepositoryResult<Vec<PickupRequest>> {
        Ok(self.select(|p| p.customer() == customer_id, sort).await)
    }

    async fn find_by_collector_and_status(
        &self,
        collector_id: Uuid,
        statuses: &[PickupStatus],
        sort: Sort,
    ) -> RepositoryResult<Vec<PickupRequest>> {
        Ok(self
            .select(
                |p| p.collector() == Some(collector_id) && statuses.contains(&p.status()),
                sort,
            )
            .await)
    }

    async fn find_by_status(
        &self,
        status: PickupStatus,
        sort: Sort,
    ) -> RepositoryResult<Vec<PickupRequest>> {
        Ok(self.select(|p| p.status() == status, sort).await)
    }

    async fn update_if_status(
        &self,
        pickup: &PickupRequest,
        expected: PickupStatus,
    ) -> RepositoryResult<bool> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&pickup.id()) {
            Some(stored) if stored.pickup.status() == expected => {
                stored.pickup = pickup.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
