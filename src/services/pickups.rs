//! Pickup lifecycle engine
//!
//! Loads the target pickup, applies the transition on the aggregate, then
//! commits with a conditional write keyed on the status it started from.
//! Losing a race therefore surfaces as `InvalidState`, never as a silent
//! overwrite.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::pickup::{Party, PickupEvent, PickupRequest, PickupStatus, PickupView, WasteItem};
use crate::domain::repositories::pickup_repository::Sort;
use crate::domain::repositories::{PickupRepository, UserRepository};
use crate::domain::user::{Role, User};
use crate::domain::{DomainError, DomainResult};

/// Typed submission, built at the API boundary
#[derive(Debug, Clone)]
pub struct SubmitPickup {
    pub waste_items: Vec<WasteItem>,
    pub total_value: f64,
    pub pickup_address: String,
}

/// How much of each party to attach to a listed pickup
#[derive(Debug, Clone, Copy)]
struct Detail {
    customer_contact: bool,
    collector_contact: bool,
}

impl Detail {
    const NAMES: Detail = Detail {
        customer_contact: false,
        collector_contact: false,
    };
    const CUSTOMER_CONTACT: Detail = Detail {
        customer_contact: true,
        collector_contact: false,
    };
    const FULL: Detail = Detail {
        customer_contact: true,
        collector_contact: true,
    };
}

pub struct PickupService {
    pickups: Arc<dyn PickupRepository>,
    users: Arc<dyn UserRepository>,
}

impl PickupService {
    pub fn new(pickups: Arc<dyn PickupRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { pickups, users }
    }

    /// Creates a pending pickup owned by `customer_id`
    pub async fn submit(&self, customer_id: Uuid, request: SubmitPickup) -> DomainResult<PickupView> {
        let customer = self.caller_with_role(customer_id, Role::Customer).await?;

        let (pickup, event) = PickupRequest::submit(
            customer.id,
            request.waste_items,
            request.total_value,
            request.pickup_address,
        )?;

        self.pickups.create(&pickup).await?;
        log_event(&event);

        Ok(PickupView {
            customer: Party::with_contact(&customer),
            collector: None,
            pickup,
        })
    }

    /// First collector to accept a pending pickup gets it
    pub async fn accept(&self, collector_id: Uuid, pickup_id: Uuid) -> DomainResult<PickupView> {
        let mut pickup = self.load(pickup_id).await?;
        self.caller_with_role(collector_id, Role::Collector).await?;

        let event = pickup.accept(collector_id)?;
        self.commit(&pickup, PickupStatus::Pending, &event).await?;

        self.single_view(pickup, Detail::FULL).await
    }

    /// Assigned collector marks an accepted pickup as collected
    pub async fn complete(&self, caller_id: Uuid, pickup_id: Uuid) -> DomainResult<PickupView> {
        let mut pickup = self.load(pickup_id).await?;

        let event = pickup.complete(caller_id)?;
        self.commit(&pickup, PickupStatus::Accepted, &event).await?;

        self.single_view(pickup, Detail::FULL).await
    }

    /// Assigned collector drops an accepted pickup
    pub async fn cancel(&self, caller_id: Uuid, pickup_id: Uuid) -> DomainResult<PickupView> {
        let mut pickup = self.load(pickup_id).await?;

        let event = pickup.cancel(caller_id)?;
        self.commit(&pickup, PickupStatus::Accepted, &event).await?;

        self.single_view(pickup, Detail::FULL).await
    }

    /// Full record, visible to its customer and its assigned collector only
    pub async fn view(&self, caller_id: Uuid, pickup_id: Uuid) -> DomainResult<PickupView> {
        let pickup = self.load(pickup_id).await?;
        pickup.ensure_visible_to(caller_id)?;

        self.single_view(pickup, Detail::FULL).await
    }

    /// Every pending pickup, newest first
    pub async fn list_available(&self, collector_id: Uuid) -> DomainResult<Vec<PickupView>> {
        self.caller_with_role(collector_id, Role::Collector).await?;

        let pickups = self
            .pickups
            .find_by_status(PickupStatus::Pending, Sort::NEWEST_FIRST)
            .await?;
        self.resolve(pickups, Detail::NAMES).await
    }

    /// Accepted pickups assigned to the collector, oldest first
    pub async fn list_active_for_collector(&self, collector_id: Uuid) -> DomainResult<Vec<PickupView>> {
        self.caller_with_role(collector_id, Role::Collector).await?;

        let pickups = self
            .pickups
            .find_by_collector_and_status(collector_id, &[PickupStatus::Accepted], Sort::OLDEST_FIRST)
            .await?;
        self.resolve(pickups, Detail::CUSTOMER_CONTACT).await
    }

    /// Completed and cancelled pickups of the collector, most recently updated first
    pub async fn list_history_for_collector(&self, collector_id: Uuid) -> DomainResult<Vec<PickupView>> {
        self.caller_with_role(collector_id, Role::Collector).await?;

        let pickups = self
            .pickups
            .find_by_collector_and_status(
                collector_id,
                &[PickupStatus::Completed, PickupStatus::Cancelled],
                Sort::RECENTLY_UPDATED_FIRST,
            )
            .await?;
        self.resolve(pickups, Detail::NAMES).await
    }

    /// Everything the customer has submitted, newest first
    pub async fn list_for_customer(&self, customer_id: Uuid) -> DomainResult<Vec<PickupView>> {
        let pickups = self
            .pickups
            .find_by_customer(customer_id, Sort::NEWEST_FIRST)
            .await?;
        self.resolve(pickups, Detail::NAMES).await
    }

    async fn load(&self, pickup_id: Uuid) -> DomainResult<PickupRequest> {
        self.pickups
            .find_by_id(pickup_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Pickup request not found".to_string()))
    }

    async fn caller_with_role(&self, user_id: Uuid, role: Role) -> DomainResult<User> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("User no longer exists".to_string()))?;

        if user.role != role {
            return Err(DomainError::Forbidden(format!(
                "Only a {} can perform this action",
                role
            )));
        }
        Ok(user)
    }

    async fn commit(
        &self,
        pickup: &PickupRequest,
        expected: PickupStatus,
        event: &PickupEvent,
    ) -> DomainResult<()> {
        if !self.pickups.update_if_status(pickup, expected).await? {
            tracing::info!(
                pickup_id = %pickup.id(),
                expected = %expected,
                "lost race on pickup transition"
            );
            let message = match expected {
                PickupStatus::Pending => "Pickup is no longer available",
                _ => "Pickup was modified by another request",
            };
            return Err(DomainError::InvalidState(message.to_string()));
        }

        log_event(event);
        Ok(())
    }

    async fn single_view(&self, pickup: PickupRequest, detail: Detail) -> DomainResult<PickupView> {
        let mut views = self.resolve(vec![pickup], detail).await?;
        views
            .pop()
            .ok_or_else(|| DomainError::Internal("pickup vanished while resolving".to_string()))
    }

    /// Attaches customer and collector identities, one user lookup per batch
    async fn resolve(&self, pickups: Vec<PickupRequest>, detail: Detail) -> DomainResult<Vec<PickupView>> {
        let ids: Vec<Uuid> = pickups
            .iter()
            .flat_map(|p| std::iter::once(p.customer()).chain(p.collector()))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let users: HashMap<Uuid, User> = self
            .users
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let party = |id: Uuid, contact: bool| match users.get(&id) {
            Some(user) if contact => Party::with_contact(user),
            Some(user) => Party::name_only(user),
            None => {
                tracing::warn!(user_id = %id, "pickup references unknown user");
                Party::unresolved(id)
            }
        };

        Ok(pickups
            .into_iter()
            .map(|pickup| PickupView {
                customer: party(pickup.customer(), detail.customer_contact),
                collector: pickup
                    .collector()
                    .map(|id| party(id, detail.collector_contact)),
                pickup,
            })
            .collect())
    }
}

fn log_event(event: &PickupEvent) {
    tracing::info!(event = event.name(), pickup_id = %event.pickup_id(), ?event, "pickup event");
}
