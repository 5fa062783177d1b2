//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{bookings, users, vehicles};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub license_number: Option<String>,
    pub driver_vehicle_type: Option<String>,
    pub vehicle_number: Option<String>,
    pub experience_years: Option<i32>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub license_number: Option<&'a str>,
    pub driver_vehicle_type: Option<&'a str>,
    pub vehicle_number: Option<&'a str>,
    pub experience_years: Option<i32>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Changeset for profile edits. `None` driver fields leave columns untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileUpdate<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub license_number: Option<&'a str>,
    pub driver_vehicle_type: Option<&'a str>,
    pub vehicle_number: Option<&'a str>,
    pub experience_years: Option<i32>,
}

/// Row struct for reading from the bookings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub pickup_time: DateTime<Utc>,
    pub price: Option<f64>,
    pub vehicle_type: Option<String>,
    pub vehicle_name: Option<String>,
    pub passengers: Option<i32>,
    pub status: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new booking records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub pickup_location: &'a str,
    pub dropoff_location: &'a str,
    pub pickup_time: DateTime<Utc>,
    pub price: Option<f64>,
    pub vehicle_type: Option<&'a str>,
    pub vehicle_name: Option<&'a str>,
    pub passengers: Option<i32>,
    pub status: &'a str,
    pub payment_status: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the vehicles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vehicles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VehicleRow {
    pub id: Uuid,
    pub name: String,
    pub vehicle_type: String,
    pub image: String,
    pub capacity: String,
    pub base_price: f64,
    pub price_per_km: f64,
    pub features: Vec<String>,
    pub estimated_time: String,
    pub available: i32,
}
