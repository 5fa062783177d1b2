//! Driver endpoints: claiming, completing and reviewing rides.
//!
//! ```text
//! POST /api/driver/accept-ride    {"bookingId": "..."}
//! GET  /api/driver/accepted-rides
//! POST /api/driver/complete-ride  {"bookingId": "..."}
//! GET  /api/driver/earnings
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::booking_service::{ACCEPT_FORBIDDEN_MESSAGE, COMPLETE_FORBIDDEN_MESSAGE};
use crate::domain::{Caller, Error, Role};

use super::ApiResult;
use super::bookings_dto::{
    BookingEnvelope, BookingIdRequest, EarningsResponse, RideDto, RidesResponse,
};
use super::state::HttpState;
use super::validation::parse_booking_id;

pub const ACCEPTED_MESSAGE: &str = "Ride request accepted successfully";
pub const COMPLETED_MESSAGE: &str = "Ride completed successfully";

/// Claim a pending ride. Under contention exactly one driver wins; the
/// others receive 404.
#[utoipa::path(
    post,
    path = "/api/driver/accept-ride",
    request_body = BookingIdRequest,
    responses(
        (status = 200, description = "Ride claimed", body = BookingEnvelope),
        (status = 400, description = "Missing or invalid booking id", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not a driver", body = Error),
        (status = 404, description = "Ride request is no longer available", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["driver"],
    operation_id = "acceptRide"
)]
#[post("/driver/accept-ride")]
pub async fn accept_ride(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<BookingIdRequest>,
) -> ApiResult<HttpResponse> {
    caller.require_role(Role::Driver, ACCEPT_FORBIDDEN_MESSAGE)?;
    let booking_id = parse_booking_id(payload.into_inner().booking_id)?;
    let booking = state.bookings.accept(&caller, booking_id).await?;
    Ok(HttpResponse::Ok().json(BookingEnvelope::new(ACCEPTED_MESSAGE, booking)))
}

/// The calling driver's confirmed and completed rides.
#[utoipa::path(
    get,
    path = "/api/driver/accepted-rides",
    responses(
        (status = 200, description = "Accepted rides, newest first", body = RidesResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not a driver", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["driver"],
    operation_id = "listAcceptedRides"
)]
#[get("/driver/accepted-rides")]
pub async fn list_accepted_rides(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<RidesResponse>> {
    let rides = state.bookings_query.list_accepted(&caller).await?;
    Ok(web::Json(RidesResponse {
        rides: rides.into_iter().map(RideDto::from).collect(),
    }))
}

/// Finish a ride the caller is driving.
#[utoipa::path(
    post,
    path = "/api/driver/complete-ride",
    request_body = BookingIdRequest,
    responses(
        (status = 200, description = "Ride completed", body = BookingEnvelope),
        (status = 400, description = "Missing or invalid booking id", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not a driver", body = Error),
        (status = 404, description = "Ride is not in progress for this driver", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["driver"],
    operation_id = "completeRide"
)]
#[post("/driver/complete-ride")]
pub async fn complete_ride(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<BookingIdRequest>,
) -> ApiResult<HttpResponse> {
    caller.require_role(Role::Driver, COMPLETE_FORBIDDEN_MESSAGE)?;
    let booking_id = parse_booking_id(payload.into_inner().booking_id)?;
    let booking = state.bookings.complete(&caller, booking_id).await?;
    Ok(HttpResponse::Ok().json(BookingEnvelope::new(COMPLETED_MESSAGE, booking)))
}

/// Earnings for today, this week (from Sunday) and this month, in UTC.
#[utoipa::path(
    get,
    path = "/api/driver/earnings",
    responses(
        (status = 200, description = "Earnings summary", body = EarningsResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller is not a driver", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["driver"],
    operation_id = "driverEarnings"
)]
#[get("/driver/earnings")]
pub async fn driver_earnings(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<EarningsResponse>> {
    let summary = state.bookings_query.earnings(&caller).await?;
    Ok(web::Json(EarningsResponse::from(summary)))
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
