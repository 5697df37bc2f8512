//! Raffle admin API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! upstream client) so integration tests and the binary entrypoint can
//! both access them.

pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
