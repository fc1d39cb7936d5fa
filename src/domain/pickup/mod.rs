// Pickup domain module
// Contains the pickup request aggregate, its value objects and lifecycle events

#![allow(clippy::module_inception)]

pub mod events;
pub mod pickup;
pub mod value_objects;
pub mod view;

// Re-export main types for convenience
pub use events::PickupEvent;
pub use pickup::PickupRequest;
pub use value_objects::{PickupStatus, WasteItem};
pub use view::{Party, PickupView};
