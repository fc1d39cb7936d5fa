use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::map_sqlx_error;
use crate::domain::pickup::{PickupRequest, PickupStatus, WasteItem};
use crate::domain::repositories::pickup_repository::{Sort, SortKey, SortOrder};
use crate::domain::repositories::{PickupRepository, RepositoryError, RepositoryResult};

const PICKUP_COLUMNS: &str = r#"
    id, customer_id, collector_id, waste_items, total_value, pickup_address,
    status, completion_time, created_at, updated_at
"#;

/// PostgreSQL implementation of PickupRepository
///
/// Status changes are conditional updates (`WHERE id = $1 AND status = $2`),
/// so exactly one of several concurrent writers on a record succeeds.
pub struct PostgresPickupRepository {
    pool: PgPool,
}

impl PostgresPickupRepository {
    /// Creates a new PostgresPickupRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn order_by(sort: Sort) -> &'static str {
    match (sort.key, sort.order) {
        (SortKey::CreatedAt, SortOrder::Ascending) => "ORDER BY created_at ASC, id ASC",
        (SortKey::CreatedAt, SortOrder::Descending) => "ORDER BY created_at DESC, id DESC",
        (SortKey::UpdatedAt, SortOrder::Ascending) => "ORDER BY updated_at ASC, id ASC",
        (SortKey::UpdatedAt, SortOrder::Descending) => "ORDER BY updated_at DESC, id DESC",
    }
}

fn pickup_from_row(row: &PgRow) -> RepositoryResult<PickupRequest> {
    let corrupt = |e: String| RepositoryError::Backend(format!("Invalid pickup row: {}", e));

    let items: Json<Vec<WasteItem>> = row
        .try_get("waste_items")
        .map_err(|e| corrupt(e.to_string()))?;
    let status: String = row.try_get("status").map_err(|e| corrupt(e.to_string()))?;

    Ok(PickupRequest::from_persistence(
        row.try_get("id").map_err(|e| corrupt(e.to_string()))?,
        row.try_get("customer_id").map_err(|e| corrupt(e.to_string()))?,
        row.try_get("collector_id").map_err(|e| corrupt(e.to_string()))?,
        items.0,
        row.try_get("total_value").map_err(|e| corrupt(e.to_string()))?,
        row.try_get("pickup_address")
            .map_err(|e| corrupt(e.to_string()))?,
        status.parse::<PickupStatus>().map_err(corrupt)?,
        row.try_get("completion_time")
            .map_err(|e| corrupt(e.to_string()))?,
        row.try_get("created_at").map_err(|e| corrupt(e.to_string()))?,
        row.try_get("updated_at").map_err(|e| corrupt(e.to_string()))?,
    ))
}

#[async_trait]
impl PickupRepository for PostgresPickupRepository {
    async fn create(&self, pickup: &PickupRequest) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO pickup_requests (
                id, customer_id, collector_id, waste_items, total_value, pickup_address,
                status, completion_time, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(pickup.id())
        .bind(pickup.customer())
        .bind(pickup.collector())
        .bind(Json(pickup.waste_items().to_vec()))
        .bind(pickup.total_value())
        .bind(pickup.pickup_address())
        .bind(pickup.status().as_str())
        .bind(pickup.completion_time())
        .bind(pickup.created_at())
        .bind(pickup.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create pickup", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<PickupRequest>> {
        let sql = format!("SELECT {} FROM pickup_requests WHERE id = $1", PICKUP_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find pickup by id", e))?;

        row.as_ref().map(pickup_from_row).transpose()
    }

    async fn find_by_customer(
        &self,
        customer_id: Uuid,
        sort: Sort,
    ) -> RepositoryResult<Vec<PickupRequest>> {
        let sql = format!(
            "SELECT {} FROM pickup_requests WHERE customer_id = $1 {}",
            PICKUP_COLUMNS,
            order_by(sort)
        );
        let rows = sqlx::query(&sql)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find pickups by customer", e))?;

        rows.iter().map(pickup_from_row).collect()
    }

    async fn find_by_collector_and_status(
        &self,
        collector_id: Uuid,
        statuses: &[PickupStatus],
        sort: Sort,
    ) -> RepositoryResult<Vec<PickupRequest>> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();
        let sql = format!(
            "SELECT {} FROM pickup_requests WHERE collector_id = $1 AND status = ANY($2) {}",
            PICKUP_COLUMNS,
            order_by(sort)
        );
        let rows = sqlx::query(&sql)
            .bind(collector_id)
            .bind(statuses)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find pickups by collector", e))?;

        rows.iter().map(pickup_from_row).collect()
    }

    async fn find_by_status(
        &self,
        status: PickupStatus,
        sort: Sort,
    ) -> RepositoryResult<Vec<PickupRequest>> {
        let sql = format!(
            "SELECT {} FROM pickup_requests WHERE status = $1 {}",
            PICKUP_COLUMNS,
            order_by(sort)
        );
        let rows = sqlx::query(&sql)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find pickups by status", e))?;

        rows.iter().map(pickup_from_row).collect()
    }

    async fn update_if_status(
        &self,
        pickup: &PickupRequest,
        expected: PickupStatus,
    ) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE pickup_requests
            SET collector_id = $3,
                status = $4,
                completion_time = $5,
                updated_at = $6
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(pickup.id())
        .bind(expected.as_str())
        .bind(pickup.collector())
        .bind(pickup.status().as_str())
        .bind(pickup.completion_time())
        .bind(pickup.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update pickup", e))?;

        Ok(result.rows_affected() == 1)
    }
}
