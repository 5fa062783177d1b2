//! Driving port for booking state changes.
//!
//! Inbound adapters call this port with the caller resolved from the bearer
//! token; authorisation and the lifecycle rules live behind it.

use async_trait::async_trait;

use crate::domain::{Booking, BookingId, Caller, Error, RideRequest};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Record a new pending booking owned by the caller.
    async fn create(&self, caller: &Caller, request: RideRequest) -> Result<Booking, Error>;

    /// Cancel one of the caller's own pending bookings.
    async fn cancel(&self, caller: &Caller, booking: BookingId) -> Result<Booking, Error>;

    /// Claim a pending, unassigned booking for the calling driver.
    async fn accept(&self, caller: &Caller, booking: BookingId) -> Result<Booking, Error>;

    /// Mark the calling driver's confirmed booking as completed.
    async fn complete(&self, caller: &Caller, booking: BookingId) -> Result<Booking, Error>;
}
