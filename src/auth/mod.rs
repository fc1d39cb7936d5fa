// Credential primitives: bcrypt password hashing and HS256 bearer tokens

pub mod jwt;
pub mod password;
