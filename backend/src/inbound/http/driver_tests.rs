//! Handler tests for the driver endpoints.

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::EarningsSummary;
use crate::domain::booking_service::{EARNINGS_FORBIDDEN_MESSAGE, RIDE_UNAVAILABLE_MESSAGE};
use crate::domain::ports::{MockBookingCommand, MockBookingQuery};
use crate::domain::{BookingTransition, RideListing};
use crate::inbound::http::test_utils::{
    BOOKING_ID, DRIVER_ID, StateBuilder, confirmed_booking, user_id,
};

async fn call(state: HttpState, request: test::TestRequest) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api")
                .service(accept_ride)
                .service(list_accepted_rides)
                .service(complete_ride)
                .service(driver_earnings),
        ),
    )
    .await;
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body: Value = test::read_body_json(response).await;
    (status, body)
}

fn accept(token: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/driver/accept-ride")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(body)
}

#[rstest]
#[actix_web::test]
async fn accept_assigns_the_caller() {
    let mut bookings = MockBookingCommand::new();
    bookings
        .expect_accept()
        .withf(|_, id| id.to_string() == BOOKING_ID)
        .times(1)
        .returning(|_, _| Ok(confirmed_booking()));

    let (status, body) = call(
        StateBuilder::default().bookings(bookings).build(),
        accept("driver", json!({ "bookingId": BOOKING_ID })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], ACCEPTED_MESSAGE);
    assert_eq!(body["booking"]["status"], "confirmed");
    assert_eq!(body["booking"]["driver"], DRIVER_ID);
}

#[rstest]
#[actix_web::test]
async fn passengers_are_forbidden_before_the_body_is_read() {
    let (status, body) = call(
        StateBuilder::default().build(),
        accept("passenger", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], ACCEPT_FORBIDDEN_MESSAGE);
}

#[rstest]
#[case(json!({}), "missing_field")]
#[case(json!({ "bookingId": "ride-42" }), "invalid_booking_id")]
#[actix_web::test]
async fn accept_validates_booking_id(#[case] body: Value, #[case] code: &str) {
    let (status, payload) = call(StateBuilder::default().build(), accept("driver", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["details"]["field"], "bookingId");
    assert_eq!(payload["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn losing_a_claim_race_is_not_found() {
    let mut bookings = MockBookingCommand::new();
    bookings
        .expect_accept()
        .returning(|_, _| Err(Error::not_found(RIDE_UNAVAILABLE_MESSAGE)));

    let (status, body) = call(
        StateBuilder::default().bookings(bookings).build(),
        accept("driver", json!({ "bookingId": BOOKING_ID })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], RIDE_UNAVAILABLE_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn complete_returns_completed_booking() {
    let mut bookings = MockBookingCommand::new();
    bookings.expect_complete().returning(|_, id| {
        BookingTransition::Complete {
            booking: id,
            driver: user_id(DRIVER_ID),
        }
        .apply(&confirmed_booking())
        .ok_or_else(|| Error::internal("fixture not completable"))
    });

    let (status, body) = call(
        StateBuilder::default().bookings(bookings).build(),
        test::TestRequest::post()
            .uri("/api/driver/complete-ride")
            .insert_header(("Authorization", "Bearer driver"))
            .set_json(json!({ "bookingId": BOOKING_ID })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], COMPLETED_MESSAGE);
    assert_eq!(body["booking"]["status"], "completed");
}

#[rstest]
#[actix_web::test]
async fn complete_is_forbidden_for_passengers() {
    let (status, body) = call(
        StateBuilder::default().build(),
        test::TestRequest::post()
            .uri("/api/driver/complete-ride")
            .insert_header(("Authorization", "Bearer passenger"))
            .set_json(json!({ "bookingId": BOOKING_ID })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], COMPLETE_FORBIDDEN_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn accepted_rides_are_enveloped() {
    let mut query = MockBookingQuery::new();
    query.expect_list_accepted().returning(|_| {
        Ok(vec![RideListing {
            booking: confirmed_booking(),
            passenger: None,
        }])
    });

    let (status, body) = call(
        StateBuilder::default().bookings_query(query).build(),
        test::TestRequest::get()
            .uri("/api/driver/accepted-rides")
            .insert_header(("Authorization", "Bearer driver")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rides"][0]["status"], "confirmed");
    assert!(body["rides"][0].get("passenger").is_none());
}

#[rstest]
#[actix_web::test]
async fn earnings_use_camel_case_totals() {
    let mut query = MockBookingQuery::new();
    query.expect_earnings().returning(|_| {
        Ok(EarningsSummary {
            today: 1200.0,
            this_week: 2000.0,
            this_month: 5000.0,
            total: 9000.0,
            total_rides: 7,
        })
    });

    let (status, body) = call(
        StateBuilder::default().bookings_query(query).build(),
        test::TestRequest::get()
            .uri("/api/driver/earnings")
            .insert_header(("Authorization", "Bearer driver")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "today": 1200.0,
            "thisWeek": 2000.0,
            "thisMonth": 5000.0,
            "total": 9000.0,
            "totalRides": 7
        })
    );
}

#[rstest]
#[actix_web::test]
async fn earnings_forbidden_message_comes_from_the_service() {
    let mut query = MockBookingQuery::new();
    query
        .expect_earnings()
        .returning(|_| Err(Error::forbidden(EARNINGS_FORBIDDEN_MESSAGE)));

    let (status, body) = call(
        StateBuilder::default().bookings_query(query).build(),
        test::TestRequest::get()
            .uri("/api/driver/earnings")
            .insert_header(("Authorization", "Bearer passenger")),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], EARNINGS_FORBIDDEN_MESSAGE);
}
