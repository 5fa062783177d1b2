//! Driven port for the read-only vehicle catalogue.

use async_trait::async_trait;

use crate::domain::{Vehicle, VehicleType};

use super::define_port_error;

define_port_error! {
    /// Errors raised by vehicle catalogue adapters.
    pub enum VehicleRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "vehicle repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "vehicle repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Catalogue entries ordered by name, optionally restricted to one type.
    async fn list(
        &self,
        vehicle_type: Option<VehicleType>,
    ) -> Result<Vec<Vehicle>, VehicleRepositoryError>;
}
