//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    MockAccessTokenCodec, MockAccountCommand, MockAccountQuery, MockBookingCommand,
    MockBookingQuery, MockVehicleRepository,
};
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{
    Booking, BookingId, BookingTransition, Identity, RideDetails, RideRequest, Role, UserId,
};

use super::state::{HttpState, HttpStatePorts};

pub const DRIVER_ID: &str = "7b1e2a54-0c4f-4a55-8a51-3d3f6f9b2c10";
pub const PASSENGER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// A token codec with no expectations set.
pub fn token_codec() -> MockAccessTokenCodec {
    MockAccessTokenCodec::new()
}

/// A codec accepting the bearer tokens `driver` and `passenger`.
pub fn role_token_codec() -> MockAccessTokenCodec {
    let mut codec = MockAccessTokenCodec::new();
    codec.expect_verify().returning(|token| {
        let (id, role) = match token {
            "driver" => (DRIVER_ID, Role::Driver),
            "passenger" => (PASSENGER_ID, Role::Passenger),
            other => {
                return Err(crate::domain::ports::TokenError::invalid(format!(
                    "unknown test token {other}"
                )));
            }
        };
        let user_id = UserId::new(id).expect("fixture id");
        Ok(Identity::new(user_id, Some(role), None))
    });
    codec
}

pub fn user_id(raw: &str) -> UserId {
    UserId::new(raw).expect("fixture id")
}

pub const BOOKING_ID: &str = "0b6f1c7e-3f52-4c1e-9a43-5c2d8f1e0b11";

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 18, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// A pending booking owned by [`PASSENGER_ID`].
pub fn pending_booking() -> Booking {
    let details = RideDetails::try_new(RideRequest {
        pickup_location: "MG Road, Bengaluru".into(),
        dropoff_location: "Mysuru Palace".into(),
        pickup_time: fixed_time(),
        price: 1200.0,
        vehicle_type: "taxi".into(),
        vehicle_name: "WagonR Taxi".into(),
        passengers: 2,
    })
    .expect("valid details");
    Booking::new_pending(
        BookingId::new(BOOKING_ID).expect("fixture id"),
        user_id(PASSENGER_ID),
        details,
        fixed_time(),
    )
}

/// [`pending_booking`] claimed by [`DRIVER_ID`].
pub fn confirmed_booking() -> Booking {
    let booking = pending_booking();
    BookingTransition::Claim {
        booking: booking.id(),
        driver: user_id(DRIVER_ID),
    }
    .apply(&booking)
    .expect("claimable")
}

/// Builds an [`HttpState`] from mocks; ports left unset panic when called.
#[derive(Default)]
pub struct StateBuilder {
    bookings: Option<MockBookingCommand>,
    bookings_query: Option<MockBookingQuery>,
    accounts: Option<MockAccountCommand>,
    accounts_query: Option<MockAccountQuery>,
    vehicles: Option<MockVehicleRepository>,
    tokens: Option<MockAccessTokenCodec>,
}

impl StateBuilder {
    pub fn bookings(mut self, mock: MockBookingCommand) -> Self {
        self.bookings = Some(mock);
        self
    }

    pub fn bookings_query(mut self, mock: MockBookingQuery) -> Self {
        self.bookings_query = Some(mock);
        self
    }

    pub fn accounts(mut self, mock: MockAccountCommand) -> Self {
        self.accounts = Some(mock);
        self
    }

    pub fn accounts_query(mut self, mock: MockAccountQuery) -> Self {
        self.accounts_query = Some(mock);
        self
    }

    pub fn vehicles(mut self, mock: MockVehicleRepository) -> Self {
        self.vehicles = Some(mock);
        self
    }

    pub fn tokens(mut self, mock: MockAccessTokenCodec) -> Self {
        self.tokens = Some(mock);
        self
    }

    pub fn build(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            bookings: Arc::new(self.bookings.unwrap_or_default()),
            bookings_query: Arc::new(self.bookings_query.unwrap_or_default()),
            accounts: Arc::new(self.accounts.unwrap_or_default()),
            accounts_query: Arc::new(self.accounts_query.unwrap_or_default()),
            vehicles: Arc::new(self.vehicles.unwrap_or_default()),
            tokens: Arc::new(self.tokens.unwrap_or_else(role_token_codec)),
        })
    }
}
