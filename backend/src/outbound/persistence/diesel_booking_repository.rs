//! PostgreSQL-backed `BookingRepository`.
//!
//! Status changes are single `UPDATE ... WHERE <predicate> RETURNING *`
//! statements, so PostgreSQL's row lock decides which of several concurrent
//! claims wins; the losers match zero rows.

use async_trait::async_trait;
use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{
    Booking, BookingId, BookingStatus, BookingTransition, PassengerContact, PaymentStatus,
    RideDetails, RideListing, UserId,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{BookingRow, NewBookingRow};
use super::pool::{DbPool, PoolError};
use super::schema::{bookings, users};

/// Diesel implementation of the booking ledger.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type ListingRow = (
    BookingRow,
    Option<String>,
    Option<String>,
    Option<String>,
);

fn pool_error(error: PoolError) -> BookingRepositoryError {
    map_pool_error(error, BookingRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> BookingRepositoryError {
    map_diesel_error(
        error,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
    )
}

fn row_to_booking(row: BookingRow) -> Result<Booking, BookingRepositoryError> {
    let status: BookingStatus = row.status.parse().map_err(|_| {
        BookingRepositoryError::query(format!("booking {} has status {:?}", row.id, row.status))
    })?;
    let payment_status: PaymentStatus = row.payment_status.parse().map_err(|_| {
        BookingRepositoryError::query(format!(
            "booking {} has payment status {:?}",
            row.id, row.payment_status
        ))
    })?;
    let details = RideDetails::from_stored(
        row.pickup_location,
        row.dropoff_location,
        row.pickup_time,
        row.price,
        row.vehicle_type,
        row.vehicle_name,
        row.passengers,
    );
    Booking::restore(
        BookingId::from_uuid(row.id),
        UserId::from_uuid(row.user_id),
        row.driver_id.map(UserId::from_uuid),
        details,
        status,
        payment_status,
        row.created_at,
    )
    .map_err(|err| BookingRepositoryError::query(format!("booking {}: {err}", row.id)))
}

fn row_to_listing(
    (row, name, email, phone): ListingRow,
) -> Result<RideListing, BookingRepositoryError> {
    let passenger = match (name, email, phone) {
        (Some(name), Some(email), Some(phone)) => Some(PassengerContact { name, email, phone }),
        _ => None,
    };
    Ok(RideListing {
        booking: row_to_booking(row)?,
        passenger,
    })
}

fn collect<T, R>(
    rows: Vec<R>,
    convert: impl Fn(R) -> Result<T, BookingRepositoryError>,
) -> Result<Vec<T>, BookingRepositoryError> {
    rows.into_iter().map(convert).collect()
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let details = booking.details();
        let row = NewBookingRow {
            id: *booking.id().as_uuid(),
            user_id: *booking.passenger().as_uuid(),
            driver_id: booking.driver().map(|driver| *driver.as_uuid()),
            pickup_location: details.pickup_location(),
            dropoff_location: details.dropoff_location(),
            pickup_time: details.pickup_time(),
            price: Some(details.price()),
            vehicle_type: Some(details.vehicle_type()),
            vehicle_name: Some(details.vehicle_name()),
            passengers: Some(i32::from(details.passengers())),
            status: booking.status().as_str(),
            payment_status: booking.payment_status().as_str(),
            created_at: booking.created_at(),
        };
        diesel::insert_into(bookings::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn transition(
        &self,
        transition: &BookingTransition,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let id = *transition.booking_id().as_uuid();
        let from = transition.from_status().as_str();
        let to = transition.to_status().as_str();
        let matching = bookings::table
            .filter(bookings::id.eq(id))
            .filter(bookings::status.eq(from));

        let updated = match transition {
            BookingTransition::Claim { driver, .. } => {
                diesel::update(matching.filter(bookings::driver_id.is_null()))
                    .set((
                        bookings::status.eq(to),
                        bookings::driver_id.eq(Some(*driver.as_uuid())),
                        bookings::updated_at.eq(now),
                    ))
                    .returning(BookingRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
            BookingTransition::Complete { driver, .. } => {
                diesel::update(matching.filter(bookings::driver_id.eq(*driver.as_uuid())))
                    .set((bookings::status.eq(to), bookings::updated_at.eq(now)))
                    .returning(BookingRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
            BookingTransition::Cancel { passenger, .. } => {
                diesel::update(matching.filter(bookings::user_id.eq(*passenger.as_uuid())))
                    .set((bookings::status.eq(to), bookings::updated_at.eq(now)))
                    .returning(BookingRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
        }
        .optional()
        .map_err(diesel_error)?;

        updated.map(row_to_booking).transpose()
    }

    async fn list_for_passenger(
        &self,
        passenger: &UserId,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<BookingRow> = bookings::table
            .filter(bookings::user_id.eq(passenger.as_uuid()))
            .order(bookings::created_at.desc())
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        collect(rows, row_to_booking)
    }

    async fn list_claimable(&self) -> Result<Vec<RideListing>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<ListingRow> = bookings::table
            .left_join(users::table.on(users::id.eq(bookings::user_id)))
            .filter(bookings::status.eq(BookingStatus::Pending.as_str()))
            .filter(bookings::driver_id.is_null())
            .order(bookings::created_at.desc())
            .select((
                BookingRow::as_select(),
                users::name.nullable(),
                users::email.nullable(),
                users::phone.nullable(),
            ))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        collect(rows, row_to_listing)
    }

    async fn list_for_driver(
        &self,
        driver: &UserId,
        statuses: &[BookingStatus],
    ) -> Result<Vec<RideListing>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let statuses: Vec<&str> = statuses.iter().map(|status| status.as_str()).collect();
        let rows: Vec<ListingRow> = bookings::table
            .left_join(users::table.on(users::id.eq(bookings::user_id)))
            .filter(bookings::driver_id.eq(driver.as_uuid()))
            .filter(bookings::status.eq_any(statuses))
            .order(bookings::created_at.desc())
            .select((
                BookingRow::as_select(),
                users::name.nullable(),
                users::email.nullable(),
                users::phone.nullable(),
            ))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        collect(rows, row_to_listing)
    }
}
