//! Passenger booking endpoints and the driver's pending-ride feed.
//!
//! ```text
//! POST /api/bookings              {pickupLocation, dropoffLocation, ...}
//! GET  /api/bookings
//! GET  /api/bookings/pending
//! POST /api/bookings/{id}/cancel
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{Caller, Error, RideRequest};

use super::ApiResult;
use super::bookings_dto::{
    BookingDto, BookingEnvelope, BookingsResponse, CreateBookingRequest, RideDto,
};
use super::state::HttpState;
use super::validation::parse_booking_id;

pub const CREATED_MESSAGE: &str = "Booking created successfully";
pub const CANCELLED_MESSAGE: &str = "Booking cancelled successfully";

/// Request a ride.
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingEnvelope),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller may not book", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<CreateBookingRequest>,
) -> ApiResult<HttpResponse> {
    caller.require_authenticated()?;
    let request = RideRequest::try_from(payload.into_inner())?;
    let booking = state.bookings.create(&caller, request).await?;
    Ok(HttpResponse::Created().json(BookingEnvelope::new(CREATED_MESSAGE, booking)))
}

/// List the caller's own bookings, newest first.
#[utoipa::path(
    get,
    path = "/api/bookings",
    responses(
        (status = 200, description = "Caller's bookings", body = BookingsResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "listMyBookings"
)]
#[get("/bookings")]
pub async fn list_my_bookings(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<BookingsResponse>> {
    let bookings = state.bookings_query.list_mine(&caller).await?;
    Ok(web::Json(BookingsResponse {
        bookings: bookings.iter().map(BookingDto::from).collect(),
    }))
}

/// Pending, unclaimed bookings with passenger contact details.
#[utoipa::path(
    get,
    path = "/api/bookings/pending",
    responses(
        (status = 200, description = "Claimable rides, newest first", body = [RideDto]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not a driver", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "listPendingBookings"
)]
#[get("/bookings/pending")]
pub async fn list_pending_bookings(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Vec<RideDto>>> {
    let rides = state.bookings_query.list_pending(&caller).await?;
    Ok(web::Json(rides.into_iter().map(RideDto::from).collect()))
}

/// Withdraw one of the caller's own pending bookings.
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/cancel",
    params(("id" = String, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingEnvelope),
        (status = 400, description = "Invalid booking id", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "Booking cannot be cancelled", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "cancelBooking"
)]
#[post("/bookings/{id}/cancel")]
pub async fn cancel_booking(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    caller.require_authenticated()?;
    let booking_id = parse_booking_id(Some(path.into_inner()))?;
    let booking = state.bookings.cancel(&caller, booking_id).await?;
    Ok(HttpResponse::Ok().json(BookingEnvelope::new(CANCELLED_MESSAGE, booking)))
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;
