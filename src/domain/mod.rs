// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod errors;
pub mod pickup;
pub mod repositories;
pub mod user;

pub use errors::{DomainError, DomainResult};
