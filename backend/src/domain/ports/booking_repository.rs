//! Driven port for the booking ledger.

use async_trait::async_trait;

use crate::domain::{Booking, BookingStatus, BookingTransition, RideListing, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "booking repository query failed: {message}",
    }
}

/// Storage for bookings.
///
/// All list methods return newest bookings first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking.
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError>;

    /// Apply a guarded status change as one atomic conditional write.
    ///
    /// Returns the updated booking, or `None` when no booking matched the
    /// transition's predicate (missing, already claimed, wrong owner or
    /// wrong status). Concurrent callers racing on the same booking must see
    /// at most one `Some`.
    async fn transition(
        &self,
        transition: &BookingTransition,
    ) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Bookings owned by a passenger.
    async fn list_for_passenger(
        &self,
        passenger: &UserId,
    ) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Pending bookings that no driver has claimed, with passenger contact.
    async fn list_claimable(&self) -> Result<Vec<RideListing>, BookingRepositoryError>;

    /// Bookings assigned to a driver whose status is in `statuses`.
    async fn list_for_driver(
        &self,
        driver: &UserId,
        statuses: &[BookingStatus],
    ) -> Result<Vec<RideListing>, BookingRepositoryError>;
}
