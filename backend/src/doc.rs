//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `inbound::http`, the request and
//! response shapes they use and the bearer-token security scheme. Public
//! endpoints opt out with an empty `security([])` on their path.
//!
//! The document backs Swagger UI (debug builds) and is exported by the
//! `openapi-dump` binary for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{BookingStatus, Error, ErrorCode, PaymentStatus, Role, VehicleType};
use crate::inbound::http::bookings_dto::{
    BookingDto, BookingEnvelope, BookingIdRequest, BookingsResponse, CreateBookingRequest,
    EarningsResponse, PassengerContactDto, RideDto, RidesResponse,
};
use crate::inbound::http::users_dto::{
    AuthResponse, DriverDetailsDto, DriverDetailsRequest, LoginRequest, ProfileResponse,
    ProfileUpdatedResponse, SignupRequest, UpdateProfileRequest, UserDto,
};
use crate::inbound::http::vehicles::{VehicleDto, VehiclesResponse};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token issued by POST /api/auth/signup or POST /api/auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "RideEase API",
        description = "Ride booking for passengers and drivers: accounts, bookings, driver \
                       workflow and the vehicle catalogue."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::get_profile,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::list_my_bookings,
        crate::inbound::http::bookings::list_pending_bookings,
        crate::inbound::http::bookings::cancel_booking,
        crate::inbound::http::driver::accept_ride,
        crate::inbound::http::driver::list_accepted_rides,
        crate::inbound::http::driver::complete_ride,
        crate::inbound::http::driver::driver_earnings,
        crate::inbound::http::vehicles::list_vehicles,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        VehicleType,
        BookingStatus,
        PaymentStatus,
        SignupRequest,
        LoginRequest,
        UpdateProfileRequest,
        DriverDetailsRequest,
        DriverDetailsDto,
        UserDto,
        AuthResponse,
        ProfileResponse,
        ProfileUpdatedResponse,
        CreateBookingRequest,
        BookingIdRequest,
        BookingDto,
        PassengerContactDto,
        RideDto,
        BookingEnvelope,
        BookingsResponse,
        RidesResponse,
        EarningsResponse,
        VehicleDto,
        VehiclesResponse,
    )),
    tags(
        (name = "auth", description = "Sign-up and login"),
        (name = "users", description = "The caller's own profile"),
        (name = "bookings", description = "Passenger ride requests"),
        (name = "driver", description = "Claiming, completing and reviewing rides"),
        (name = "vehicles", description = "Vehicle catalogue and fare estimates"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
