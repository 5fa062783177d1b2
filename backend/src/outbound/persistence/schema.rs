//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! Regenerate with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. Driver columns are set only for drivers.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        phone -> Varchar,
        password_hash -> Text,
        role -> Varchar,
        license_number -> Nullable<Varchar>,
        driver_vehicle_type -> Nullable<Varchar>,
        vehicle_number -> Nullable<Varchar>,
        experience_years -> Nullable<Int4>,
        is_verified -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ride requests. Display columns are nullable for legacy rows.
    bookings (id) {
        id -> Uuid,
        user_id -> Uuid,
        driver_id -> Nullable<Uuid>,
        pickup_location -> Text,
        dropoff_location -> Text,
        pickup_time -> Timestamptz,
        price -> Nullable<Float8>,
        vehicle_type -> Nullable<Varchar>,
        vehicle_name -> Nullable<Varchar>,
        passengers -> Nullable<Int4>,
        status -> Varchar,
        payment_status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Read-only vehicle catalogue seeded by migration.
    vehicles (id) {
        id -> Uuid,
        name -> Varchar,
        vehicle_type -> Varchar,
        image -> Text,
        capacity -> Varchar,
        base_price -> Float8,
        price_per_km -> Float8,
        features -> Array<Text>,
        estimated_time -> Varchar,
        available -> Int4,
    }
}

diesel::allow_tables_to_appear_in_same_query!(bookings, users, vehicles);
