//! Bookings: ride requests and their lifecycle.
//!
//! ```text
//! pending --claim--> confirmed --complete--> completed
//!    \
//!     --cancel--> cancelled
//! ```
//!
//! A booking has no driver while pending. Every transition is described by a
//! [`BookingTransition`], whose predicate storage adapters evaluate and apply
//! as one conditional write.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

/// Display fallbacks for stored bookings missing optional fields.
pub mod display_defaults {
    pub const VEHICLE_TYPE: &str = "standard";
    pub const VEHICLE_NAME: &str = "Not specified";
    pub const PRICE: f64 = 0.0;
    pub const PASSENGERS: u16 = 1;
}

/// Validation errors for booking values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingValidationError {
    InvalidId,
    EmptyPickupLocation,
    EmptyDropoffLocation,
    EmptyVehicleType,
    EmptyVehicleName,
    InvalidPrice,
    InvalidPassengers,
    DriverOnPendingBooking,
    MissingDriver { status: BookingStatus },
}

impl fmt::Display for BookingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "booking id must be a valid UUID"),
            Self::EmptyPickupLocation => write!(f, "pickup location must not be empty"),
            Self::EmptyDropoffLocation => write!(f, "dropoff location must not be empty"),
            Self::EmptyVehicleType => write!(f, "vehicle type must not be empty"),
            Self::EmptyVehicleName => write!(f, "vehicle name must not be empty"),
            Self::InvalidPrice => write!(f, "price must be a finite, non-negative amount"),
            Self::InvalidPassengers => write!(f, "passengers must be at least 1"),
            Self::DriverOnPendingBooking => {
                write!(f, "a pending booking must not have a driver assigned")
            }
            Self::MissingDriver { status } => {
                write!(f, "a {status} booking must have a driver assigned")
            }
        }
    }
}

impl std::error::Error for BookingValidationError {}

/// Stable booking identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Parse a booking identifier from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, BookingValidationError> {
        Uuid::parse_str(id.as_ref().trim())
            .map(Self)
            .map_err(|_| BookingValidationError::InvalidId)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Statuses listed in a driver's accepted-rides view.
    pub const ACCEPTED: [Self; 2] = [Self::Confirmed, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether a driver must be assigned in this status.
    pub fn requires_driver(self) -> bool {
        matches!(self, Self::Confirmed | Self::Completed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored status label is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// Payment state recorded on a booking. Nothing processes payments; the
/// field is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// What the passenger asked for: route, time, vehicle and price.
#[derive(Debug, Clone, PartialEq)]
pub struct RideDetails {
    pickup_location: String,
    dropoff_location: String,
    pickup_time: DateTime<Utc>,
    price: f64,
    vehicle_type: String,
    vehicle_name: String,
    passengers: u16,
}

/// Unvalidated ride request fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RideRequest {
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_time: DateTime<Utc>,
    pub price: f64,
    pub vehicle_type: String,
    pub vehicle_name: String,
    pub passengers: i64,
}

fn non_blank(value: &str, error: BookingValidationError) -> Result<String, BookingValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(error)
    } else {
        Ok(trimmed.to_owned())
    }
}

impl RideDetails {
    /// Validate a new ride request. The pickup time is not required to be in
    /// the future.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use rideease::domain::{BookingValidationError, RideDetails, RideRequest};
    ///
    /// let request = RideRequest {
    ///     pickup_location: "A".into(),
    ///     dropoff_location: "B".into(),
    ///     pickup_time: Utc::now(),
    ///     price: 1200.0,
    ///     vehicle_type: "taxi".into(),
    ///     vehicle_name: "WagonR Taxi".into(),
    ///     passengers: 0,
    /// };
    /// assert_eq!(
    ///     RideDetails::try_new(request),
    ///     Err(BookingValidationError::InvalidPassengers)
    /// );
    /// ```
    pub fn try_new(request: RideRequest) -> Result<Self, BookingValidationError> {
        let RideRequest {
            pickup_location,
            dropoff_location,
            pickup_time,
            price,
            vehicle_type,
            vehicle_name,
            passengers,
        } = request;

        let pickup_location =
            non_blank(&pickup_location, BookingValidationError::EmptyPickupLocation)?;
        let dropoff_location =
            non_blank(&dropoff_location, BookingValidationError::EmptyDropoffLocation)?;
        let vehicle_type = non_blank(&vehicle_type, BookingValidationError::EmptyVehicleType)?;
        let vehicle_name = non_blank(&vehicle_name, BookingValidationError::EmptyVehicleName)?;
        if !price.is_finite() || price < 0.0 {
            return Err(BookingValidationError::InvalidPrice);
        }
        let passengers = u16::try_from(passengers)
            .ok()
            .filter(|count| *count >= 1)
            .ok_or(BookingValidationError::InvalidPassengers)?;

        Ok(Self {
            pickup_location,
            dropoff_location,
            pickup_time,
            price,
            vehicle_type,
            vehicle_name,
            passengers,
        })
    }

    /// Rebuild details from storage, substituting display defaults for
    /// missing or unusable optional fields.
    pub fn from_stored(
        pickup_location: String,
        dropoff_location: String,
        pickup_time: DateTime<Utc>,
        price: Option<f64>,
        vehicle_type: Option<String>,
        vehicle_name: Option<String>,
        passengers: Option<i32>,
    ) -> Self {
        let present = |value: Option<String>| value.filter(|text| !text.trim().is_empty());
        Self {
            pickup_location,
            dropoff_location,
            pickup_time,
            price: price
                .filter(|amount| amount.is_finite() && *amount >= 0.0)
                .unwrap_or(display_defaults::PRICE),
            vehicle_type: present(vehicle_type)
                .unwrap_or_else(|| display_defaults::VEHICLE_TYPE.to_owned()),
            vehicle_name: present(vehicle_name)
                .unwrap_or_else(|| display_defaults::VEHICLE_NAME.to_owned()),
            passengers: passengers
                .and_then(|count| u16::try_from(count).ok())
                .filter(|count| *count >= 1)
                .unwrap_or(display_defaults::PASSENGERS),
        }
    }

    pub fn pickup_location(&self) -> &str {
        self.pickup_location.as_str()
    }

    pub fn dropoff_location(&self) -> &str {
        self.dropoff_location.as_str()
    }

    pub fn pickup_time(&self) -> DateTime<Utc> {
        self.pickup_time
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn vehicle_type(&self) -> &str {
        self.vehicle_type.as_str()
    }

    pub fn vehicle_name(&self) -> &str {
        self.vehicle_name.as_str()
    }

    pub fn passengers(&self) -> u16 {
        self.passengers
    }
}

/// A ride request and its lifecycle state.
///
/// ## Invariants
/// - `driver` is `None` while `status` is pending.
/// - `driver` is `Some` while `status` is confirmed or completed.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    id: BookingId,
    passenger: UserId,
    driver: Option<UserId>,
    details: RideDetails,
    status: BookingStatus,
    payment_status: PaymentStatus,
    created_at: DateTime<Utc>,
}

impl Booking {
    /// A freshly requested ride: pending, unpaid and unassigned.
    pub fn new_pending(
        id: BookingId,
        passenger: UserId,
        details: RideDetails,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            passenger,
            driver: None,
            details,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            created_at,
        }
    }

    /// Rebuild a booking loaded from storage, checking the driver invariant.
    pub fn restore(
        id: BookingId,
        passenger: UserId,
        driver: Option<UserId>,
        details: RideDetails,
        status: BookingStatus,
        payment_status: PaymentStatus,
        created_at: DateTime<Utc>,
    ) -> Result<Self, BookingValidationError> {
        match (status, driver.is_some()) {
            (BookingStatus::Pending, true) => {
                return Err(BookingValidationError::DriverOnPendingBooking);
            }
            (status, false) if status.requires_driver() => {
                return Err(BookingValidationError::MissingDriver { status });
            }
            _ => {}
        }
        Ok(Self {
            id,
            passenger,
            driver,
            details,
            status,
            payment_status,
            created_at,
        })
    }

    pub fn id(&self) -> BookingId {
        self.id
    }

    pub fn passenger(&self) -> &UserId {
        &self.passenger
    }

    pub fn driver(&self) -> Option<&UserId> {
        self.driver.as_ref()
    }

    pub fn details(&self) -> &RideDetails {
        &self.details
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Pending and not yet claimed by any driver.
    pub fn is_claimable(&self) -> bool {
        self.status == BookingStatus::Pending && self.driver.is_none()
    }
}

/// A guarded status change.
///
/// Adapters must evaluate [`BookingTransition::permits`] and write the result
/// of [`BookingTransition::apply`] atomically: a read followed by a separate
/// write would let two drivers claim the same ride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingTransition {
    /// A driver claims a pending, unassigned booking.
    Claim { booking: BookingId, driver: UserId },
    /// The assigned driver finishes a confirmed ride.
    Complete { booking: BookingId, driver: UserId },
    /// The owning passenger withdraws a pending request.
    Cancel { booking: BookingId, passenger: UserId },
}

impl BookingTransition {
    pub fn booking_id(&self) -> BookingId {
        match self {
            Self::Claim { booking, .. }
            | Self::Complete { booking, .. }
            | Self::Cancel { booking, .. } => *booking,
        }
    }

    /// Status the booking must currently hold.
    pub fn from_status(&self) -> BookingStatus {
        match self {
            Self::Claim { .. } | Self::Cancel { .. } => BookingStatus::Pending,
            Self::Complete { .. } => BookingStatus::Confirmed,
        }
    }

    /// Status the booking holds afterwards.
    pub fn to_status(&self) -> BookingStatus {
        match self {
            Self::Claim { .. } => BookingStatus::Confirmed,
            Self::Complete { .. } => BookingStatus::Completed,
            Self::Cancel { .. } => BookingStatus::Cancelled,
        }
    }

    /// The predicate a conditional write filters on.
    pub fn permits(&self, booking: &Booking) -> bool {
        if booking.id != self.booking_id() || booking.status != self.from_status() {
            return false;
        }
        match self {
            Self::Claim { .. } => booking.driver.is_none(),
            Self::Complete { driver, .. } => booking.driver.as_ref() == Some(driver),
            Self::Cancel { passenger, .. } => &booking.passenger == passenger,
        }
    }

    /// Apply the transition, or `None` when the predicate does not hold.
    pub fn apply(&self, booking: &Booking) -> Option<Booking> {
        if !self.permits(booking) {
            return None;
        }
        let mut updated = booking.clone();
        updated.status = self.to_status();
        if let Self::Claim { driver, .. } = self {
            updated.driver = Some(driver.clone());
        }
        Some(updated)
    }
}

/// Passenger contact details shown to drivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassengerContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// A booking joined with its passenger's contact details.
///
/// `passenger` is `None` when the owning account can no longer be found.
#[derive(Debug, Clone, PartialEq)]
pub struct RideListing {
    pub booking: Booking,
    pub passenger: Option<PassengerContact>,
}
