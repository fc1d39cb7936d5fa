use uuid::Uuid;

/// Domain events emitted by the PickupRequest aggregate
///
/// Every lifecycle transition produces exactly one event; the lifecycle
/// service logs them once the transition is committed.
#[derive(Debug, Clone, PartialEq)]
pub enum PickupEvent {
    /// A customer scheduled a new pickup
    Submitted {
        pickup_id: Uuid,
        customer_id: Uuid,
        total_value: f64,
    },
    /// A collector claimed a pending pickup
    Accepted { pickup_id: Uuid, collector_id: Uuid },
    /// The assigned collector finished the pickup
    Completed { pickup_id: Uuid, collector_id: Uuid },
    /// The assigned collector dropped the pickup
    Cancelled { pickup_id: Uuid, collector_id: Uuid },
}

impl PickupEvent {
    /// Returns the pickup_id for this event
    pub fn pickup_id(&self) -> Uuid {
        match self {
            PickupEvent::Submitted { pickup_id, .. }
            | PickupEvent::Accepted { pickup_id, .. }
            | PickupEvent::Completed { pickup_id, .. }
            | PickupEvent::Cancelled { pickup_id, .. } => *pickup_id,
        }
    }

    /// Short name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            PickupEvent::Submitted { .. } => "pickup.submitted",
            PickupEvent::Accepted { .. } => "pickup.accepted",
            PickupEvent::Completed { .. } => "pickup.completed",
            PickupEvent::Cancelled { .. } => "pickup.cancelled",
        }
    }
}
