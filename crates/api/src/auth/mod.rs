//! Authentication building blocks (JWT tokens, password hashing).

pub mod jwt;
pub mod password;
