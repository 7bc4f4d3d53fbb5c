//! # Record API client
//!
//! Client-side dispatch layer for the record API:
//! - [`Operation`] is the closed set of record endpoints, each described by
//!   an [`Endpoint`] (HTTP verb, path template, required parameter keys)
//! - [`ApiClient`] renders URLs, attaches the bearer token and user-agent
//!   headers to every request, and sends JSON bodies for POST/PUT
//! - [`state`] provides the observable-value and command plumbing a desktop
//!   front end binds to
//!
//! A missing required parameter is a [`ClientError::MissingParameter`]
//! returned to the caller, never a panic.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod state;

pub use config::ClientConfig;
pub use dispatch::{ApiClient, Endpoint, Operation};
pub use error::ClientError;
