//! Outreach API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! the send pipeline) so integration tests and the binary entrypoint can
//! both access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod send;
pub mod state;
