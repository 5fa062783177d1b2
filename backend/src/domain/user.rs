//! User accounts and their validated building blocks.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::VehicleType;

/// Validation errors returned by the user value-object constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyName,
    NameTooShort { min: usize },
    NameTooLong { max: usize },
    InvalidEmail,
    InvalidPhone,
    EmptyLicenseNumber,
    EmptyVehicleNumber,
    NegativeExperience,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooShort { min } => write!(f, "name must be at least {min} characters"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "Please enter a valid email address"),
            Self::InvalidPhone => write!(f, "Please enter a valid 10-digit phone number"),
            Self::EmptyLicenseNumber => write!(f, "license number must not be empty"),
            Self::EmptyVehicleNumber => write!(f, "vehicle number must not be empty"),
            Self::NegativeExperience => write!(f, "experience must not be negative"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Account role. Drives which endpoints a caller may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Passenger,
    Driver,
    Admin,
}

impl Role {
    /// Stable lower-case label used in storage, tokens and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passenger => "passenger",
            Self::Driver => "driver",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a role label is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "passenger" => Ok(Self::Passenger),
            "driver" => Ok(Self::Driver),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Minimum allowed length for a person's name.
pub const NAME_MIN: usize = 2;
/// Maximum allowed length for a person's name.
pub const NAME_MAX: usize = 100;

/// Trimmed personal name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Trim and validate a name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        let length = trimmed.chars().count();
        if length < NAME_MIN {
            return Err(UserValidationError::NameTooShort { min: NAME_MIN });
        }
        if length > NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^\S+@\S+\.\S+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^[0-9]{10}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Normalised (trimmed, lower-cased) email address.
///
/// # Examples
/// ```
/// use rideease::domain::Email;
///
/// let email = Email::new("  Rider@Example.COM ").expect("valid email");
/// assert_eq!(email.as_ref(), "rider@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Normalise and validate an email address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = email.as_ref().trim().to_lowercase();
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Ten-digit phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    /// Trim and validate a phone number.
    pub fn new(phone: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = phone.as_ref().trim();
        if !phone_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidPhone);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Driver-only account details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverProfile {
    license_number: String,
    vehicle_type: VehicleType,
    vehicle_number: String,
    experience_years: u16,
}

impl DriverProfile {
    /// Validate the driver sub-profile fields.
    pub fn new(
        license_number: impl AsRef<str>,
        vehicle_type: VehicleType,
        vehicle_number: impl AsRef<str>,
        experience_years: i32,
    ) -> Result<Self, UserValidationError> {
        let license_number = license_number.as_ref().trim();
        if license_number.is_empty() {
            return Err(UserValidationError::EmptyLicenseNumber);
        }
        let vehicle_number = vehicle_number.as_ref().trim();
        if vehicle_number.is_empty() {
            return Err(UserValidationError::EmptyVehicleNumber);
        }
        let experience_years =
            u16::try_from(experience_years).map_err(|_| UserValidationError::NegativeExperience)?;
        Ok(Self {
            license_number: license_number.to_owned(),
            vehicle_type,
            vehicle_number: vehicle_number.to_owned(),
            experience_years,
        })
    }

    pub fn license_number(&self) -> &str {
        self.license_number.as_str()
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }

    pub fn vehicle_number(&self) -> &str {
        self.vehicle_number.as_str()
    }

    pub fn experience_years(&self) -> u16 {
        self.experience_years
    }
}

/// Role together with any role-specific data.
///
/// Carrying the driver profile inside the `Driver` variant makes "profile
/// present if and only if role is driver" hold by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleProfile {
    Passenger,
    Driver(DriverProfile),
    Admin,
}

impl RoleProfile {
    /// The bare role.
    pub fn role(&self) -> Role {
        match self {
            Self::Passenger => Role::Passenger,
            Self::Driver(_) => Role::Driver,
            Self::Admin => Role::Admin,
        }
    }

    /// Driver details, present only for drivers.
    pub fn driver(&self) -> Option<&DriverProfile> {
        match self {
            Self::Driver(profile) => Some(profile),
            Self::Passenger | Self::Admin => None,
        }
    }
}

/// Application user. The password digest is kept out of this type so it
/// cannot leak into responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: PersonName,
    pub email: Email,
    pub phone: Phone,
    pub profile: RoleProfile,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Role derived from the profile.
    pub fn role(&self) -> Role {
        self.profile.role()
    }
}
