use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::map_sqlx_error;
use crate::domain::repositories::{RepositoryError, RepositoryResult, UserRepository};
use crate::domain::user::{Address, MobileNumber, Role, User, Username};

const USER_COLUMNS: &str = r#"
    id, username, mobile_number, password_hash, role,
    street, city, state, zip_code, vehicle_details, service_area,
    created_at, updated_at
"#;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, value: &str) -> RepositoryResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE {}", USER_COLUMNS, filter);
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find user", e))?;

        row.as_ref().map(user_from_row).transpose()
    }
}

fn user_from_row(row: &PgRow) -> RepositoryResult<User> {
    let corrupt = |e: String| RepositoryError::Backend(format!("Invalid user row: {}", e));

    let username: String = row.try_get("username").map_err(|e| corrupt(e.to_string()))?;
    let mobile: String = row
        .try_get("mobile_number")
        .map_err(|e| corrupt(e.to_string()))?;
    let role: String = row.try_get("role").map_err(|e| corrupt(e.to_string()))?;

    let address = Address {
        street: row.try_get("street").map_err(|e| corrupt(e.to_string()))?,
        city: row.try_get("city").map_err(|e| corrupt(e.to_string()))?,
        state: row.try_get("state").map_err(|e| corrupt(e.to_string()))?,
        zip_code: row.try_get("zip_code").map_err(|e| corrupt(e.to_string()))?,
    };

    Ok(User {
        id: row.try_get("id").map_err(|e| corrupt(e.to_string()))?,
        username: Username::new(username).map_err(corrupt)?,
        mobile_number: MobileNumber::new(mobile).map_err(corrupt)?,
        password_hash: row
            .try_get("password_hash")
            .map_err(|e| corrupt(e.to_string()))?,
        role: role.parse::<Role>().map_err(corrupt)?,
        address: (!address.is_empty()).then_some(address),
        vehicle_details: row
            .try_get("vehicle_details")
            .map_err(|e| corrupt(e.to_string()))?,
        service_area: row
            .try_get("service_area")
            .map_err(|e| corrupt(e.to_string()))?,
        created_at: row.try_get("created_at").map_err(|e| corrupt(e.to_string()))?,
        updated_at: row.try_get("updated_at").map_err(|e| corrupt(e.to_string()))?,
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> RepositoryResult<Uuid> {
        let address = user.address.clone().unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO users (
                id, username, mobile_number, password_hash, role,
                street, city, state, zip_code, vehicle_details, service_area,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(user.id)
        .bind(user.username.as_str())
        .bind(user.mobile_number.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(address.street)
        .bind(address.city)
        .bind(address.state)
        .bind(address.zip_code)
        .bind(&user.vehicle_details)
        .bind(&user.service_area)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create user", e))?;

        Ok(user.id)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find user by id", e))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!("SELECT {} FROM users WHERE id = ANY($1)", USER_COLUMNS);
        let rows = sqlx::query(&sql)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find users by id", e))?;

        rows.iter().map(user_from_row).collect()
    }

    async fn find_by_username(&self, username: &Username) -> RepositoryResult<Option<User>> {
        self.find_one("username = $1", username.as_str()).await
    }

    async fn find_by_mobile_number(&self, mobile: &MobileNumber) -> RepositoryResult<Option<User>> {
        self.find_one("mobile_number = $1", mobile.as_str()).await
    }
}
