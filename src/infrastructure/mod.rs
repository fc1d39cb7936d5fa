// Infrastructure layer module
// Contains database adapters and external service integrations
// Follows Hexagonal Architecture

pub mod classifier;
pub mod database;
pub mod repositories;
