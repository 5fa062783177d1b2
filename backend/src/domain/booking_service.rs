//! Booking lifecycle service.
//!
//! Implements [`BookingCommand`] and [`BookingQuery`] on top of a
//! [`BookingRepository`]. Role guards run before any storage access, and
//! every status change is handed to the repository as one
//! [`BookingTransition`] so the store arbitrates races.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    BookingCommand, BookingQuery, BookingRepository, BookingRepositoryError,
};
use crate::domain::{
    Booking, BookingId, BookingStatus, BookingTransition, BookingValidationError, Caller,
    EarningsSummary, Error, RideDetails, RideListing, RideRequest, Role,
};

pub const PENDING_FORBIDDEN_MESSAGE: &str = "Only drivers can access pending bookings";
pub const ACCEPT_FORBIDDEN_MESSAGE: &str = "Only drivers can accept rides";
pub const COMPLETE_FORBIDDEN_MESSAGE: &str = "Only drivers can complete rides";
pub const ACCEPTED_FORBIDDEN_MESSAGE: &str = "Only drivers can access their rides";
pub const EARNINGS_FORBIDDEN_MESSAGE: &str = "Only drivers can view earnings";
pub const BOOK_FORBIDDEN_MESSAGE: &str = "Only passengers can book rides";
pub const RIDE_UNAVAILABLE_MESSAGE: &str = "Ride request is no longer available";
pub const RIDE_NOT_IN_PROGRESS_MESSAGE: &str = "Ride is not in progress for this driver";
pub const NOT_CANCELLABLE_MESSAGE: &str = "Booking cannot be cancelled";

/// Who may create bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    /// When `false`, only passengers may book.
    pub allow_any_role_to_book: bool,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            allow_any_role_to_book: true,
        }
    }
}

/// Booking service implementing the booking driving ports.
#[derive(Clone)]
pub struct BookingService<R> {
    bookings: Arc<R>,
    clock: Arc<dyn Clock>,
    policy: BookingPolicy,
}

impl<R> BookingService<R> {
    pub fn new(bookings: Arc<R>, clock: Arc<dyn Clock>, policy: BookingPolicy) -> Self {
        Self {
            bookings,
            clock,
            policy,
        }
    }
}

fn map_repository_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking repository error: {message}"))
        }
    }
}

fn map_validation_error(error: BookingValidationError) -> Error {
    let (field, code) = match &error {
        BookingValidationError::EmptyPickupLocation => ("pickupLocation", "missing_field"),
        BookingValidationError::EmptyDropoffLocation => ("dropoffLocation", "missing_field"),
        BookingValidationError::EmptyVehicleType => ("vehicleType", "missing_field"),
        BookingValidationError::EmptyVehicleName => ("vehicleName", "missing_field"),
        BookingValidationError::InvalidPrice => ("price", "invalid_price"),
        BookingValidationError::InvalidPassengers => ("passengers", "invalid_passengers"),
        BookingValidationError::InvalidId => ("bookingId", "invalid_booking_id"),
        BookingValidationError::DriverOnPendingBooking
        | BookingValidationError::MissingDriver { .. } => {
            return Error::internal(format!("inconsistent booking: {error}"));
        }
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "code": code,
    }))
}

impl<R> BookingService<R>
where
    R: BookingRepository,
{
    async fn run_transition(
        &self,
        transition: BookingTransition,
        missing_message: &str,
    ) -> Result<Booking, Error> {
        self.bookings
            .transition(&transition)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(missing_message))
    }

    async fn driver_rides(&self, caller: &Caller, forbidden: &str) -> Result<Vec<RideListing>, Error> {
        let identity = caller.require_role(Role::Driver, forbidden)?;
        self.bookings
            .list_for_driver(&identity.user_id, &BookingStatus::ACCEPTED)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> BookingCommand for BookingService<R>
where
    R: BookingRepository,
{
    async fn create(&self, caller: &Caller, request: RideRequest) -> Result<Booking, Error> {
        let identity = caller.require_authenticated()?;
        if !self.policy.allow_any_role_to_book && !identity.has_role(Role::Passenger) {
            return Err(Error::forbidden(BOOK_FORBIDDEN_MESSAGE));
        }
        let details = RideDetails::try_new(request).map_err(map_validation_error)?;
        let booking = Booking::new_pending(
            BookingId::random(),
            identity.user_id.clone(),
            details,
            self.clock.utc(),
        );
        self.bookings
            .insert(&booking)
            .await
            .map_err(map_repository_error)?;
        Ok(booking)
    }

    async fn cancel(&self, caller: &Caller, booking: BookingId) -> Result<Booking, Error> {
        let identity = caller.require_authenticated()?;
        let transition = BookingTransition::Cancel {
            booking,
            passenger: identity.user_id.clone(),
        };
        self.run_transition(transition, NOT_CANCELLABLE_MESSAGE).await
    }

    async fn accept(&self, caller: &Caller, booking: BookingId) -> Result<Booking, Error> {
        let identity = caller.require_role(Role::Driver, ACCEPT_FORBIDDEN_MESSAGE)?;
        let transition = BookingTransition::Claim {
            booking,
            driver: identity.user_id.clone(),
        };
        self.run_transition(transition, RIDE_UNAVAILABLE_MESSAGE)
            .await
            .inspect_err(|_| {
                info!(booking = %booking, driver = %identity.user_id, "ride claim did not apply");
            })
    }

    async fn complete(&self, caller: &Caller, booking: BookingId) -> Result<Booking, Error> {
        let identity = caller.require_role(Role::Driver, COMPLETE_FORBIDDEN_MESSAGE)?;
        let transition = BookingTransition::Complete {
            booking,
            driver: identity.user_id.clone(),
        };
        self.run_transition(transition, RIDE_NOT_IN_PROGRESS_MESSAGE)
            .await
    }
}

#[async_trait]
impl<R> BookingQuery for BookingService<R>
where
    R: BookingRepository,
{
    async fn list_mine(&self, caller: &Caller) -> Result<Vec<Booking>, Error> {
        let identity = caller.require_authenticated()?;
        self.bookings
            .list_for_passenger(&identity.user_id)
            .await
            .map_err(map_repository_error)
    }

    async fn list_pending(&self, caller: &Caller) -> Result<Vec<RideListing>, Error> {
        caller.require_role(Role::Driver, PENDING_FORBIDDEN_MESSAGE)?;
        self.bookings
            .list_claimable()
            .await
            .map_err(map_repository_error)
    }

    async fn list_accepted(&self, caller: &Caller) -> Result<Vec<RideListing>, Error> {
        self.driver_rides(caller, ACCEPTED_FORBIDDEN_MESSAGE).await
    }

    async fn earnings(&self, caller: &Caller) -> Result<EarningsSummary, Error> {
        let rides = self.driver_rides(caller, EARNINGS_FORBIDDEN_MESSAGE).await?;
        Ok(EarningsSummary::from_rides(
            rides.iter().map(|ride| &ride.booking),
            self.clock.utc(),
        ))
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
