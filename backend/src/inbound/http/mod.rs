//! HTTP inbound adapter exposing the REST API.
//!
//! Handlers extract a [`Caller`](crate::domain::Caller), validate request
//! bodies into domain values and delegate to the driving ports held in
//! [`state::HttpState`]. Every failure is rendered through
//! [`crate::domain::Error`].

use actix_web::web;
use serde_json::json;

use crate::domain::Error;

pub mod auth;
pub mod bookings;
pub mod bookings_dto;
pub mod driver;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod users_dto;
pub mod validation;
pub mod vehicles;

pub use error::ApiResult;

fn json_error(err: actix_web::error::JsonPayloadError) -> actix_web::Error {
    Error::invalid_request(format!("Malformed JSON body: {err}"))
        .with_details(json!({ "code": "invalid_json" }))
        .into()
}

fn query_error(err: actix_web::error::QueryPayloadError) -> actix_web::Error {
    Error::invalid_request(format!("Malformed query string: {err}"))
        .with_details(json!({ "code": "invalid_query" }))
        .into()
}

/// Mount every `/api` route on `cfg`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(|err, _| json_error(err)))
            .app_data(web::QueryConfig::default().error_handler(|err, _| query_error(err)))
            .service(users::signup)
            .service(users::login)
            .service(users::get_profile)
            .service(users::update_profile)
            .service(bookings::list_pending_bookings)
            .service(bookings::create_booking)
            .service(bookings::list_my_bookings)
            .service(bookings::cancel_booking)
            .service(driver::accept_ride)
            .service(driver::list_accepted_rides)
            .service(driver::complete_ride)
            .service(driver::driver_earnings)
            .service(vehicles::list_vehicles),
    );
}
