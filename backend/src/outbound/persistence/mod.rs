//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between row structs (`models.rs`, `schema.rs`)
//! and domain types and contain no business rules. Connections come from a
//! shared `bb8` pool over `diesel-async`; pool and Diesel failures are
//! mapped into each port's typed error.
//!
//! # Example
//!
//! ```ignore
//! use rideease::outbound::persistence::{DbPool, DieselBookingRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/rideease")).await?;
//! let bookings = DieselBookingRepository::new(pool);
//! ```

mod diesel_booking_repository;
mod diesel_user_repository;
mod diesel_vehicle_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_vehicle_repository::DieselVehicleRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_blocking,
};
pub use pool::{DbPool, PoolConfig, PoolError};
