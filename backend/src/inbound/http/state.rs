//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on domain ports,
//! so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccessTokenCodec, AccountCommand, AccountQuery, BookingCommand, BookingQuery,
    VehicleRepository,
};

/// Parameter object bundling the port implementations.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub bookings: Arc<dyn BookingCommand>,
    pub bookings_query: Arc<dyn BookingQuery>,
    pub accounts: Arc<dyn AccountCommand>,
    pub accounts_query: Arc<dyn AccountQuery>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub tokens: Arc<dyn AccessTokenCodec>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub bookings: Arc<dyn BookingCommand>,
    pub bookings_query: Arc<dyn BookingQuery>,
    pub accounts: Arc<dyn AccountCommand>,
    pub accounts_query: Arc<dyn AccountQuery>,
    pub vehicles: Arc<dyn VehicleRepository>,
    /// Verifies bearer tokens for the [`Caller`](crate::domain::Caller)
    /// extractor.
    pub tokens: Arc<dyn AccessTokenCodec>,
}

impl HttpState {
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            bookings,
            bookings_query,
            accounts,
            accounts_query,
            vehicles,
            tokens,
        } = ports;
        Self {
            bookings,
            bookings_query,
            accounts,
            accounts_query,
            vehicles,
            tokens,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
