//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Credential login and the mobile login flow
//! - JWT access-token generation and validation
//! - Opaque refresh-token issuance, verification, and rotation
//! - AuthedUser extractor for protected routes

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;

#[cfg(test)]
mod tests;

pub use extractors::AuthedUser;
pub use models::User;
pub use routes::auth_routes;
