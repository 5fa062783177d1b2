//! Concurrency test: many drivers accepting one booking at once.

#[path = "support/http.rs"]
mod http;

use http::{Call, book, register, send, send_all};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(2)]
#[case(8)]
#[case(16)]
#[actix_web::test]
async fn exactly_one_concurrent_accept_wins(#[case] drivers: usize) {
    let state = http::fresh_state();
    let passenger = register(&state, "Asha Rao", "asha@example.com", "9876543210", "passenger").await;
    let mut accounts = Vec::with_capacity(drivers);
    for index in 0..drivers {
        accounts.push(
            register(
                &state,
                &format!("Driver {index:02}"),
                &format!("driver{index}@example.com"),
                &format!("90000000{index:02}"),
                "driver",
            )
            .await,
        );
    }
    let booking_id = book(&state, &passenger).await;

    let calls = accounts
        .iter()
        .map(|driver| {
            Call::post("/api/driver/accept-ride", json!({ "bookingId": booking_id }))
                .bearer(&driver.token)
        })
        .collect();
    let replies = send_all(&state, calls).await;

    let winners: Vec<_> = replies.iter().filter(|reply| reply.status == 200).collect();
    assert_eq!(winners.len(), 1, "replies: {replies:?}");
    assert!(
        replies
            .iter()
            .filter(|reply| reply.status != 200)
            .all(|reply| reply.status == 404)
    );

    let winner = winners[0].body["booking"]["driver"]
        .as_str()
        .expect("winning driver")
        .to_owned();
    let listing = send(&state, Call::get("/api/bookings").bearer(&passenger.token)).await;
    let stored = &listing.body["bookings"][0];
    assert_eq!(stored["status"], "confirmed");
    assert_eq!(stored["driver"], winner.as_str());
}

#[rstest]
#[actix_web::test]
async fn claimed_rides_leave_the_pending_feed() {
    let state = http::fresh_state();
    let passenger = register(&state, "Asha Rao", "asha@example.com", "9876543210", "passenger").await;
    let driver = register(&state, "Dev Kumar", "dev@example.com", "9000000001", "driver").await;
    let booking_id = book(&state, &passenger).await;

    let before = send(&state, Call::get("/api/bookings/pending").bearer(&driver.token)).await;
    assert_eq!(before.body.as_array().map(Vec::len), Some(1));
    assert_eq!(before.body[0]["passenger"]["email"], "asha@example.com");

    let accepted = send(
        &state,
        Call::post("/api/driver/accept-ride", json!({ "bookingId": booking_id }))
            .bearer(&driver.token),
    )
    .await;
    assert_eq!(accepted.status, 200);

    let after = send(&state, Call::get("/api/bookings/pending").bearer(&driver.token)).await;
    assert_eq!(after.body.as_array().map(Vec::len), Some(0));
    let rides = send(&state, Call::get("/api/driver/accepted-rides").bearer(&driver.token)).await;
    assert_eq!(rides.body["rides"][0]["id"], booking_id.as_str());
}
