// HTTP handlers, one module per resource

pub mod auth;
pub mod pickups;
pub mod waste;
