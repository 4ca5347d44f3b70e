//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementation of the city repository port backed by PostgreSQL
//! via `diesel-async` with `bb8` connection pooling.
//!
//! Principles:
//!
//! - **Thin adapter**: the repository only translates between Diesel rows
//!   and domain types; no business logic lives here.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) never leak to the domain.
//! - **Strongly typed errors**: database failures map onto the repository
//!   port's error variants.

mod diesel_city_repository;
mod models;
mod pool;
mod schema;

pub use diesel_city_repository::DieselCityRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
