//! Outbound adapters: persistence and token signing.

pub mod persistence;
pub mod token;
