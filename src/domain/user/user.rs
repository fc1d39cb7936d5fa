use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::{Address, MobileNumber, Role, Username};

/// Account of a customer or a collector
///
/// `role` never changes after registration. Collector-only profile fields
/// are simply left empty for customers.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: Username,
    pub mobile_number: MobileNumber,
    pub password_hash: String,
    pub role: Role,
    pub address: Option<Address>,
    pub vehicle_details: Option<String>,
    pub service_area: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated registration data, before the password is hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub mobile_number: MobileNumber,
    pub password: String,
    pub role: Role,
    pub address: Option<Address>,
    pub vehicle_details: Option<String>,
    pub service_area: Option<String>,
}

impl User {
    /// Builds the persistent record for a registration
    pub fn register(new_user: NewUser, password_hash: String) -> Self {
        let now = Utc::now();
        // Vehicle and service area only mean something for collectors
        let (vehicle_details, service_area) = match new_user.role {
            Role::Collector => (new_user.vehicle_details, new_user.service_area),
            Role::Customer => (None, None),
        };

        Self {
            id: Uuid::new_v4(),
            username: new_user.username,
            mobile_number: new_user.mobile_number,
            password_hash,
            role: new_user.role,
            address: new_user.address.filter(|a| !a.is_empty()),
            vehicle_details,
            service_area,
            created_at: now,
            updated_at: now,
        }
    }
}
