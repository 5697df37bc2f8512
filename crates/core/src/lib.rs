//! Pure domain logic for the raffle admin service.
//!
//! Everything in this crate is synchronous and I/O-free so it can be
//! exercised from the API layer, CLI tooling, and tests without setup.

pub mod datetime;
pub mod error;
pub mod prize;
pub mod prize_rules;
pub mod raffle;
pub mod types;
