//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence layers, plus the services implementing the driving ports.
//! Value objects validate on construction; aggregates keep their fields
//! private where an invariant spans more than one field.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifiers.
//! - User, Role, RoleProfile: accounts and role-specific data.
//! - Booking, BookingTransition: ride requests and their guarded status
//!   changes.
//! - Vehicle: catalogue entries and fare quotes.
//! - BookingService, AccountService: driving port implementations.

pub mod account;
pub mod account_service;
pub mod auth;
pub mod booking;
pub mod booking_service;
pub mod earnings;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod vehicle;

pub use self::account::{
    AuthSession, ProfileUpdate, Registration, RegistrationError, RegistrationInput,
};
pub use self::account_service::AccountService;
pub use self::auth::{
    AccessToken, Caller, Identity, LoginCredentials, LoginValidationError, MISSING_TOKEN_MESSAGE,
    PASSWORD_MIN_LEN, PASSWORD_SPECIALS, PasswordDigest, PasswordPolicyError,
    check_password_strength,
};
pub use self::booking::{
    Booking, BookingId, BookingStatus, BookingTransition, BookingValidationError,
    PassengerContact, PaymentStatus, RideDetails, RideListing, RideRequest, UnknownStatus,
    display_defaults,
};
pub use self::booking_service::{BookingPolicy, BookingService};
pub use self::earnings::{EarningsSummary, PeriodStarts};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DriverProfile, Email, NAME_MAX, NAME_MIN, PersonName, Phone, Role, RoleProfile, UnknownRole,
    User, UserId, UserValidationError,
};
pub use self::vehicle::{DistanceKm, InvalidDistance, UnknownVehicleType, Vehicle, VehicleType};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use rideease::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
