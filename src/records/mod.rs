//! # Records Module
//!
//! This module handles the record entity exposed by the CRUD endpoints:
//! - Create, update, bulk remove (admin only)
//! - Paginated listing and keyword search

pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod validators;


pub use routes::records_routes;
