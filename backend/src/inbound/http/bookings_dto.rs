//! JSON shapes for booking endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Booking, BookingStatus, EarningsSummary, Error, PassengerContact, PaymentStatus, RideListing,
    RideRequest,
};

use super::validation::{FieldName, parse_rfc3339_timestamp, require, require_text};

const PICKUP_LOCATION: FieldName = FieldName::new("pickupLocation");
const DROPOFF_LOCATION: FieldName = FieldName::new("dropoffLocation");
const PICKUP_TIME: FieldName = FieldName::new("pickupTime");
const PRICE: FieldName = FieldName::new("price");
const VEHICLE_TYPE: FieldName = FieldName::new("vehicleType");
const VEHICLE_NAME: FieldName = FieldName::new("vehicleName");
const PASSENGERS: FieldName = FieldName::new("passengers");

/// Request body for `POST /api/bookings`.
///
/// Every field is required; they are optional here so a missing field is
/// reported with the same details as a blank one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[schema(example = "MG Road, Bengaluru")]
    pub pickup_location: Option<String>,
    #[schema(example = "Mysuru Palace")]
    pub dropoff_location: Option<String>,
    #[schema(example = "2026-03-18T09:30:00Z")]
    pub pickup_time: Option<String>,
    #[schema(example = 1200.0)]
    pub price: Option<f64>,
    #[schema(example = "taxi")]
    pub vehicle_type: Option<String>,
    #[schema(example = "WagonR Taxi")]
    pub vehicle_name: Option<String>,
    #[schema(example = 2)]
    pub passengers: Option<i64>,
}

impl TryFrom<CreateBookingRequest> for RideRequest {
    type Error = Error;

    fn try_from(value: CreateBookingRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            pickup_location: require_text(value.pickup_location, PICKUP_LOCATION)?,
            dropoff_location: require_text(value.dropoff_location, DROPOFF_LOCATION)?,
            pickup_time: parse_rfc3339_timestamp(
                require_text(value.pickup_time, PICKUP_TIME)?,
                PICKUP_TIME,
            )?,
            price: require(value.price, PRICE)?,
            vehicle_type: require_text(value.vehicle_type, VEHICLE_TYPE)?,
            vehicle_name: require_text(value.vehicle_name, VEHICLE_NAME)?,
            passengers: require(value.passengers, PASSENGERS)?,
        })
    }
}

/// Request body naming a booking, used by the driver endpoints.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingIdRequest {
    #[schema(example = "0b6f1c7e-3f52-4c1e-9a43-5c2d8f1e0b11")]
    pub booking_id: Option<String>,
}

/// A booking as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: String,
    /// Owning passenger's user id.
    pub user: String,
    /// Assigned driver's user id; absent while pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_time: DateTime<Utc>,
    pub price: f64,
    pub vehicle_type: String,
    pub vehicle_name: String,
    pub passengers: u16,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&Booking> for BookingDto {
    fn from(booking: &Booking) -> Self {
        let details = booking.details();
        Self {
            id: booking.id().to_string(),
            user: booking.passenger().to_string(),
            driver: booking.driver().map(ToString::to_string),
            pickup_location: details.pickup_location().to_owned(),
            dropoff_location: details.dropoff_location().to_owned(),
            pickup_time: details.pickup_time(),
            price: details.price(),
            vehicle_type: details.vehicle_type().to_owned(),
            vehicle_name: details.vehicle_name().to_owned(),
            passengers: details.passengers(),
            status: booking.status(),
            payment_status: booking.payment_status(),
            created_at: booking.created_at(),
        }
    }
}

impl From<Booking> for BookingDto {
    fn from(booking: Booking) -> Self {
        Self::from(&booking)
    }
}

/// Passenger contact details shown to drivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PassengerContactDto {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<PassengerContact> for PassengerContactDto {
    fn from(contact: PassengerContact) -> Self {
        Self {
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
        }
    }
}

/// A booking with its passenger's contact details, for driver views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RideDto {
    #[serde(flatten)]
    pub booking: BookingDto,
    /// Absent when the passenger account no longer exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger: Option<PassengerContactDto>,
}

impl From<RideListing> for RideDto {
    fn from(listing: RideListing) -> Self {
        Self {
            booking: BookingDto::from(&listing.booking),
            passenger: listing.passenger.map(PassengerContactDto::from),
        }
    }
}

/// `{message, booking}` envelope for booking mutations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingEnvelope {
    pub message: String,
    pub booking: BookingDto,
}

impl BookingEnvelope {
    pub fn new(message: &str, booking: Booking) -> Self {
        Self {
            message: message.to_owned(),
            booking: BookingDto::from(booking),
        }
    }
}

/// `{bookings}` envelope for the caller's own bookings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub bookings: Vec<BookingDto>,
}

/// `{rides}` envelope for a driver's accepted rides.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RidesResponse {
    pub rides: Vec<RideDto>,
}

/// Earnings totals for the calling driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EarningsResponse {
    pub today: f64,
    pub this_week: f64,
    pub this_month: f64,
    pub total: f64,
    pub total_rides: usize,
}

impl From<EarningsSummary> for EarningsResponse {
    fn from(summary: EarningsSummary) -> Self {
        Self {
            today: summary.today,
            this_week: summary.this_week,
            this_month: summary.this_month,
            total: summary.total,
            total_rides: summary.total_rides,
        }
    }
}
