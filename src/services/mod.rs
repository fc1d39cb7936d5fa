// Application services
// Orchestrate domain aggregates and repository ports for the API layer

pub mod identity;
pub mod pickups;

pub use identity::IdentityService;
pub use pickups::{PickupService, SubmitPickup};
