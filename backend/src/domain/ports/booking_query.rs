//! Driving port for booking reads.

use async_trait::async_trait;

use crate::domain::{Booking, Caller, EarningsSummary, Error, RideListing};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// The caller's own bookings, newest first.
    async fn list_mine(&self, caller: &Caller) -> Result<Vec<Booking>, Error>;

    /// Unclaimed pending bookings. Drivers only.
    async fn list_pending(&self, caller: &Caller) -> Result<Vec<RideListing>, Error>;

    /// Bookings the calling driver has accepted or completed.
    async fn list_accepted(&self, caller: &Caller) -> Result<Vec<RideListing>, Error>;

    /// Completed-ride totals for the calling driver.
    async fn earnings(&self, caller: &Caller) -> Result<EarningsSummary, Error>;
}
