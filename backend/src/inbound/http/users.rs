//! Account endpoints: sign-up, login and the caller's own profile.
//!
//! ```text
//! POST /api/auth/signup {"name","email","password","phone","role?","driverDetails?"}
//! POST /api/auth/login  {"email","password"}
//! GET  /api/user/profile
//! PUT  /api/user/profile {"name","phone","driverDetails?"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde_json::json;

use crate::domain::{
    Caller, Error, LoginCredentials, LoginValidationError, ProfileUpdate, Registration, RegistrationError,
    RegistrationInput, Role, UserValidationError,
};

use super::ApiResult;
use super::state::HttpState;
use super::users_dto::{
    AuthResponse, LoginRequest, ProfileResponse, ProfileUpdatedResponse, SignupRequest,
    UpdateProfileRequest, UserDto,
};
use super::validation::{FieldName, field_error, missing_field_error, require_text};

pub const REGISTERED_MESSAGE: &str = "User registered successfully";
pub const LOGGED_IN_MESSAGE: &str = "Login successful";
pub const PROFILE_UPDATED_MESSAGE: &str = "Profile updated successfully";
pub const LOGIN_FIELDS_MESSAGE: &str = "Email and password are required";

const NAME: FieldName = FieldName::new("name");
const PHONE: FieldName = FieldName::new("phone");

fn missing_signup_fields(body: &SignupRequest) -> Result<(), Error> {
    let blank = |value: &Option<String>| value.as_deref().is_none_or(|v| v.trim().is_empty());
    let missing: Vec<&str> = [
        ("name", blank(&body.name)),
        ("email", blank(&body.email)),
        ("phone", blank(&body.phone)),
        // Passwords are not trimmed; only absence or emptiness counts.
        ("password", body.password.as_deref().is_none_or(str::is_empty)),
    ]
    .into_iter()
    .filter_map(|(field, is_missing)| is_missing.then_some(field))
    .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(
        Error::invalid_request(format!("Missing required fields: {}", missing.join(", ")))
            .with_details(json!({
                "field": missing.first().copied().unwrap_or("name"),
                "code": "missing_field",
                "fields": missing,
            })),
    )
}

fn parse_role(raw: Option<&str>) -> Result<Role, Error> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(Role::Passenger),
        Some(value) => value.to_ascii_lowercase().parse().map_err(|_| {
            field_error("role", "invalid_role", format!("unknown role: {value}"))
        }),
    }
}

fn map_registration_error(error: RegistrationError) -> Error {
    let (field, code) = match &error {
        RegistrationError::InvalidName(_) => ("name", "invalid_name"),
        RegistrationError::InvalidEmail(_) => ("email", "invalid_email"),
        RegistrationError::InvalidPhone(_) => ("phone", "invalid_phone"),
        RegistrationError::WeakPassword(_) => ("password", "weak_password"),
        RegistrationError::MissingDriverDetails => ("driverDetails", "missing_driver_details"),
        RegistrationError::AdminNotAllowed => ("role", "invalid_role"),
    };
    field_error(field, code, error.to_string())
}

fn map_profile_error(error: UserValidationError) -> Error {
    let (field, code) = match &error {
        UserValidationError::InvalidPhone => ("phone", "invalid_phone"),
        _ => ("name", "invalid_name"),
    };
    field_error(field, code, error.to_string())
}

/// Create an account and return a bearer token for it.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request or user already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    missing_signup_fields(&body)?;
    let role = parse_role(body.role.as_deref())?;
    let driver = match (role, body.driver_details) {
        (Role::Driver, Some(details)) => Some(details.into_profile()?),
        _ => None,
    };
    let registration = Registration::try_new(RegistrationInput {
        name: body.name.as_deref().unwrap_or_default(),
        email: body.email.as_deref().unwrap_or_default(),
        phone: body.phone.as_deref().unwrap_or_default(),
        password: body.password.as_deref().unwrap_or_default(),
        role,
        driver: driver.as_ref(),
    })
    .map_err(map_registration_error)?;

    let session = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(AuthResponse {
        message: REGISTERED_MESSAGE.to_owned(),
        user: UserDto::from(&session.user),
        token: session.token.into(),
    }))
}

/// Exchange email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Email or password missing", body = Error),
        (status = 401, description = "Invalid email or password", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(
        body.email.as_deref().unwrap_or_default(),
        body.password.as_deref().unwrap_or_default(),
    )
    .map_err(|err| {
        let field = match err {
            LoginValidationError::EmptyEmail => "email",
            LoginValidationError::EmptyPassword => "password",
        };
        Error::invalid_request(LOGIN_FIELDS_MESSAGE)
            .with_details(json!({ "field": field, "code": "missing_field" }))
    })?;
    let session = state.accounts.login(&credentials).await?;
    Ok(HttpResponse::Ok().json(AuthResponse {
        message: LOGGED_IN_MESSAGE.to_owned(),
        user: UserDto::from(&session.user),
        token: session.token.into(),
    }))
}

/// The caller's own profile.
#[utoipa::path(
    get,
    path = "/api/user/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getProfile"
)]
#[get("/user/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user = state.accounts_query.profile(&caller).await?;
    Ok(web::Json(ProfileResponse {
        user: UserDto::from(&user),
    }))
}

/// Edit name, phone and, for drivers, the driver sub-profile.
#[utoipa::path(
    put,
    path = "/api/user/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileUpdatedResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[put("/user/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<web::Json<ProfileUpdatedResponse>> {
    let identity = caller.require_authenticated()?;
    let body = payload.into_inner();
    let name = require_text(body.name, NAME)?;
    let phone = body
        .phone
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| missing_field_error(PHONE))?;
    let driver = match body.driver_details {
        Some(details) if identity.has_role(Role::Driver) => Some(details.into_profile()?),
        _ => None,
    };
    let update = ProfileUpdate::try_new(&name, &phone, driver).map_err(map_profile_error)?;

    let user = state.accounts.update_profile(&caller, update).await?;
    Ok(web::Json(ProfileUpdatedResponse {
        message: PROFILE_UPDATED_MESSAGE.to_owned(),
        user: UserDto::from(&user),
    }))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
