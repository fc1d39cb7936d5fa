use uuid::Uuid;

use super::pickup::PickupRequest;
use crate::domain::user::User;

/// Displayable identity of a user attached to a pickup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    pub id: Uuid,
    pub username: String,
    /// Only resolved where the caller needs to contact the other side
    pub mobile_number: Option<String>,
}

impl Party {
    pub fn name_only(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.as_str().to_string(),
            mobile_number: None,
        }
    }

    pub fn with_contact(user: &User) -> Self {
        Self {
            mobile_number: Some(user.mobile_number.as_str().to_string()),
            ..Self::name_only(user)
        }
    }

    /// Placeholder for a referenced account that no longer resolves
    pub fn unresolved(id: Uuid) -> Self {
        Self {
            id,
            username: String::new(),
            mobile_number: None,
        }
    }
}

/// Read model returned by the lifecycle service: a pickup with its
/// customer and collector references resolved to displayable fields
#[derive(Debug, Clone)]
pub struct PickupView {
    pub pickup: PickupRequest,
    pub customer: Party,
    pub collector: Option<Party>,
}
