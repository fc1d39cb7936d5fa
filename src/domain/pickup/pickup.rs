use super::events::PickupEvent;
use super::value_objects::{PickupStatus, WasteItem};
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// PickupRequest aggregate root
///
/// One scheduled waste collection, owned by the customer who submitted it
/// and, once accepted, by exactly one collector.
///
/// # Invariants
/// - `collector` is `None` iff status is Pending
/// - `completion_time` is set iff status is Completed
/// - Waste items are non-empty and the total value is positive
/// - Status only moves forward (see [`PickupStatus::can_transition_to`])
///
/// # Example
/// ```
/// use ecocycle_api::domain::pickup::{PickupRequest, PickupStatus, WasteItem};
/// use uuid::Uuid;
///
/// let (pickup, _event) = PickupRequest::submit(
///     Uuid::new_v4(),
///     vec![WasteItem::new("Plastic", 5.0).unwrap()],
///     125.0,
///     "12 Elm St".to_string(),
/// ).expect("valid pickup");
///
/// assert_eq!(pickup.status(), PickupStatus::Pending);
/// assert!(pickup.collector().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PickupRequest {
    id: Uuid,
    customer: Uuid,
    collector: Option<Uuid>,
    waste_items: Vec<WasteItem>,
    total_value: f64,
    pickup_address: String,
    status: PickupStatus,
    completion_time: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PickupRequest {
    /// Creates a new pending pickup request
    ///
    /// # Business Rules Enforced
    /// - At least one waste item
    /// - Total value finite and greater than zero; taken as submitted by the client
    /// - Pickup address not blank
    /// - Initial status is always Pending with no collector
    pub fn submit(
        customer: Uuid,
        waste_items: Vec<WasteItem>,
        total_value: f64,
        pickup_address: String,
    ) -> DomainResult<(Self, PickupEvent)> {
        if waste_items.is_empty() {
            return Err(DomainError::Validation(
                "At least one waste item is required".to_string(),
            ));
        }

        if !total_value.is_finite() || total_value <= 0.0 {
            return Err(DomainError::Validation(
                "Total value must be a positive number".to_string(),
            ));
        }

        let pickup_address = pickup_address.trim().to_string();
        if pickup_address.is_empty() {
            return Err(DomainError::Validation(
                "Pickup address cannot be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let pickup = Self {
            id: Uuid::new_v4(),
            customer,
            collector: None,
            waste_items,
            total_value,
            pickup_address,
            status: PickupStatus::Pending,
            completion_time: None,
            created_at: now,
            updated_at: now,
        };

        let event = PickupEvent::Submitted {
            pickup_id: pickup.id,
            customer_id: pickup.customer,
            total_value: pickup.total_value,
        };

        Ok((pickup, event))
    }

    /// Claims a pending pickup for `collector_id`
    ///
    /// Pending implies no collector, so the first acceptance wins. A racing
    /// second acceptance is rejected when the conditional write is committed.
    pub fn accept(&mut self, collector_id: Uuid) -> DomainResult<PickupEvent> {
        if !self.status.can_transition_to(PickupStatus::Accepted) {
            return Err(DomainError::InvalidState(
                "Pickup is no longer available".to_string(),
            ));
        }

        self.status = PickupStatus::Accepted;
        self.collector = Some(collector_id);
        self.touch();

        Ok(PickupEvent::Accepted {
            pickup_id: self.id,
            collector_id,
        })
    }

    /// Marks the pickup as collected
    ///
    /// # Business Rules
    /// - Caller must be the assigned collector (checked first)
    /// - Pickup must be Accepted
    /// - Records the completion timestamp
    pub fn complete(&mut self, caller: Uuid) -> DomainResult<PickupEvent> {
        self.ensure_assigned_collector(caller, "complete")?;

        if !self.status.can_transition_to(PickupStatus::Completed) {
            return Err(DomainError::InvalidState(
                "Pickup must be in accepted state to be completed".to_string(),
            ));
        }

        self.status = PickupStatus::Completed;
        self.touch();
        self.completion_time = Some(self.updated_at);

        Ok(PickupEvent::Completed {
            pickup_id: self.id,
            collector_id: caller,
        })
    }

    /// Drops an accepted pickup. Only the assigned collector may cancel.
    pub fn cancel(&mut self, caller: Uuid) -> DomainResult<PickupEvent> {
        self.ensure_assigned_collector(caller, "cancel")?;

        if !self.status.can_transition_to(PickupStatus::Cancelled) {
            return Err(DomainError::InvalidState(
                "Cannot cancel a pickup that is not in an accepted state".to_string(),
            ));
        }

        self.status = PickupStatus::Cancelled;
        self.touch();

        Ok(PickupEvent::Cancelled {
            pickup_id: self.id,
            collector_id: caller,
        })
    }

    /// Only the customer or the assigned collector may see a pickup
    pub fn ensure_visible_to(&self, caller: Uuid) -> DomainResult<()> {
        if self.customer == caller || self.collector == Some(caller) {
            Ok(())
        } else {
            Err(DomainError::Forbidden(
                "User not authorized to view this pickup".to_string(),
            ))
        }
    }

    fn ensure_assigned_collector(&self, caller: Uuid, action: &str) -> DomainResult<()> {
        if self.collector == Some(caller) {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "User not authorized to {} this pickup",
                action
            )))
        }
    }

    // updated_at never goes below created_at, even if the clock steps back
    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn customer(&self) -> Uuid {
        self.customer
    }

    pub fn collector(&self) -> Option<Uuid> {
        self.collector
    }

    pub fn waste_items(&self) -> &[WasteItem] {
        &self.waste_items
    }

    pub fn total_value(&self) -> f64 {
        self.total_value
    }

    pub fn pickup_address(&self) -> &str {
        &self.pickup_address
    }

    pub fn status(&self) -> PickupStatus {
        self.status
    }

    pub fn completion_time(&self) -> Option<DateTime<Utc>> {
        self.completion_time
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Reconstructs a PickupRequest from persistence layer data
    ///
    /// Bypasses validation; only repository implementations should call this.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        id: Uuid,
        customer: Uuid,
        collector: Option<Uuid>,
        waste_items: Vec<WasteItem>,
        total_value: f64,
        pickup_address: String,
        status: PickupStatus,
        completion_time: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer,
            collector,
            waste_items,
            total_value,
            pickup_address,
            status,
            completion_time,
            created_at,
            updated_at,
        }
    }
}
