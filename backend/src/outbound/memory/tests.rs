//! Tests for the in-memory store.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{BookingId, PersonName, RideDetails, RoleProfile};

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 18, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn pending(passenger: &UserId, created_at: DateTime<Utc>) -> Booking {
    let details = RideDetails::from_stored(
        "A".into(),
        "B".into(),
        created_at,
        Some(1200.0),
        Some("taxi".into()),
        Some("WagonR Taxi".into()),
        Some(2),
    );
    Booking::new_pending(BookingId::random(), passenger.clone(), details, created_at)
}

fn passenger(email: &str, phone: &str) -> User {
    User {
        id: UserId::random(),
        name: PersonName::new("Asha Rao").expect("valid name"),
        email: Email::new(email).expect("valid email"),
        phone: Phone::new(phone).expect("valid phone"),
        profile: RoleProfile::Passenger,
        is_verified: true,
        created_at: at(8),
    }
}

#[fixture]
fn store() -> InMemoryStore {
    InMemoryStore::new()
}

#[rstest]
#[tokio::test]
async fn concurrent_claims_have_exactly_one_winner() {
    let store = Arc::new(InMemoryStore::new());
    let owner = UserId::random();
    let booking = pending(&owner, at(9));
    BookingRepository::insert(store.as_ref(), &booking)
        .await
        .expect("insert");

    let attempts = (0..16).map(|_| {
        let store = Arc::clone(&store);
        let claim = BookingTransition::Claim {
            booking: booking.id(),
            driver: UserId::random(),
        };
        tokio::spawn(async move { store.transition(&claim).await })
    });
    let outcomes = futures::future::join_all(attempts).await;

    let winners: Vec<Booking> = outcomes
        .into_iter()
        .flat_map(|joined| joined.expect("task joined").expect("transition"))
        .collect();
    assert_eq!(winners.len(), 1);
    let winner = winners.first().expect("one winner");
    assert_eq!(winner.status(), BookingStatus::Confirmed);
    assert!(winner.driver().is_some());
}

#[rstest]
#[tokio::test]
async fn claimable_listing_is_newest_first_with_contact(store: InMemoryStore) {
    let user = passenger("asha@example.com", "9876543210");
    UserRepository::insert(&store, &user, &PasswordDigest::new("digest"))
        .await
        .expect("user stored");
    let older = pending(&user.id, at(9));
    let newer = pending(&user.id, at(11));
    for booking in [&older, &newer] {
        BookingRepository::insert(&store, booking)
            .await
            .expect("booking stored");
    }

    let listings = store.list_claimable().await.expect("listing");

    let ids: Vec<_> = listings.iter().map(|listing| listing.booking.id()).collect();
    assert_eq!(ids, vec![newer.id(), older.id()]);
    let contact = listings
        .first()
        .and_then(|listing| listing.passenger.clone())
        .expect("contact projected");
    assert_eq!(contact.email, "asha@example.com");
}

#[rstest]
#[tokio::test]
async fn cancelled_bookings_are_no_longer_claimable(store: InMemoryStore) {
    let owner = UserId::random();
    let booking = pending(&owner, at(9));
    BookingRepository::insert(&store, &booking)
        .await
        .expect("insert");

    let cancelled = store
        .transition(&BookingTransition::Cancel {
            booking: booking.id(),
            passenger: owner,
        })
        .await
        .expect("transition");

    assert_eq!(
        cancelled.map(|booking| booking.status()),
        Some(BookingStatus::Cancelled)
    );
    assert!(store.list_claimable().await.expect("listing").is_empty());
}

#[rstest]
#[tokio::test]
async fn duplicate_emails_are_rejected(store: InMemoryStore) {
    let first = passenger("asha@example.com", "9876543210");
    let second = passenger("asha@example.com", "1234567890");
    UserRepository::insert(&store, &first, &PasswordDigest::new("a"))
        .await
        .expect("first insert");

    let result = UserRepository::insert(&store, &second, &PasswordDigest::new("b")).await;

    assert!(matches!(result, Err(UserPersistenceError::Duplicate { .. })));
    assert!(
        store
            .contact_in_use(&second.email, &second.phone)
            .await
            .expect("lookup")
    );
}

#[rstest]
#[case(None, 3)]
#[case(Some(VehicleType::Taxi), 2)]
#[case(Some(VehicleType::Bus), 1)]
#[tokio::test]
async fn vehicle_filter_narrows_catalogue(
    store: InMemoryStore,
    #[case] filter: Option<VehicleType>,
    #[case] expected: usize,
) {
    let vehicles = store.list(filter).await.expect("catalogue");
    assert_eq!(vehicles.len(), expected);
    assert!(vehicles.iter().all(|vehicle| vehicle.matches(filter)));
}
