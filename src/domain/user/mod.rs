// User domain module
// Contains the account entity and its value objects

#![allow(clippy::module_inception)]

pub mod user;
pub mod value_objects;

pub use user::{NewUser, User};
pub use value_objects::{Address, MobileNumber, Role, Username};
