//! EcoCycle API Library
//!
//! Backend for a two-sided recycling marketplace: customers schedule pickups
//! of sorted waste, collectors claim and fulfil them. Contains the domain
//! model, the pickup lifecycle engine, repositories and the HTTP layer.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;
