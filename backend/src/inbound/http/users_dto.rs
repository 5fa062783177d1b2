//! JSON shapes for sign-up, login and profile endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DriverProfile, Error, Role, User, UserValidationError, VehicleType};

use super::validation::{FieldName, field_error};

pub(crate) const DRIVER_DETAILS: FieldName = FieldName::new("driverDetails");

/// Driver sub-profile as sent by clients. All fields are required.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverDetailsRequest {
    #[schema(example = "KA-0120230001234")]
    pub license_number: Option<String>,
    #[schema(example = "taxi")]
    pub vehicle_type: Option<String>,
    #[schema(example = "KA01AB1234")]
    pub vehicle_number: Option<String>,
    /// Years of driving experience.
    #[schema(example = 5)]
    pub experience: Option<i32>,
}

impl DriverDetailsRequest {
    /// Validate into a domain profile.
    ///
    /// Missing or blank fields are reported together as
    /// `incomplete_driver_details`.
    pub(crate) fn into_profile(self) -> Result<DriverProfile, Error> {
        fn text(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }

        let mut missing = Vec::new();
        if text(&self.license_number).is_none() {
            missing.push("license number");
        }
        if text(&self.vehicle_type).is_none() {
            missing.push("vehicle type");
        }
        if text(&self.vehicle_number).is_none() {
            missing.push("vehicle number");
        }
        if self.experience.is_none() {
            missing.push("experience");
        }
        let (Some(license), Some(vehicle_type), Some(vehicle_number), Some(experience)) = (
            text(&self.license_number),
            text(&self.vehicle_type),
            text(&self.vehicle_number),
            self.experience,
        ) else {
            return Err(field_error(
                DRIVER_DETAILS.as_str(),
                "incomplete_driver_details",
                format!("Missing driver details: {}", missing.join(", ")),
            ));
        };

        let vehicle_type: VehicleType = vehicle_type.parse().map_err(|_| {
            field_error(
                "driverDetails.vehicleType",
                "invalid_vehicle_type",
                format!("unknown vehicle type: {vehicle_type}; expected taxi or bus"),
            )
        })?;
        DriverProfile::new(license, vehicle_type, vehicle_number, experience).map_err(|err| {
            let field = match err {
                UserValidationError::NegativeExperience => "driverDetails.experience",
                _ => DRIVER_DETAILS.as_str(),
            };
            field_error(field, "invalid_driver_details", err.to_string())
        })
    }
}

/// Request body for `POST /api/auth/signup`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[schema(example = "Asha Rao")]
    pub name: Option<String>,
    #[schema(example = "asha@example.com")]
    pub email: Option<String>,
    #[schema(example = "Str0ng!pw")]
    pub password: Option<String>,
    #[schema(example = "9876543210")]
    pub phone: Option<String>,
    /// `passenger` (default) or `driver`.
    #[schema(example = "passenger")]
    pub role: Option<String>,
    pub driver_details: Option<DriverDetailsRequest>,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "asha@example.com")]
    pub email: Option<String>,
    #[schema(example = "Str0ng!pw")]
    pub password: Option<String>,
}

/// Request body for `PUT /api/user/profile`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    /// Applied only when the caller is a driver.
    pub driver_details: Option<DriverDetailsRequest>,
}

/// Driver sub-profile as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverDetailsDto {
    pub license_number: String,
    pub vehicle_type: VehicleType,
    pub vehicle_number: String,
    pub experience: u16,
}

impl From<&DriverProfile> for DriverDetailsDto {
    fn from(profile: &DriverProfile) -> Self {
        Self {
            license_number: profile.license_number().to_owned(),
            vehicle_type: profile.vehicle_type(),
            vehicle_number: profile.vehicle_number().to_owned(),
            experience: profile.experience_years(),
        }
    }
}

/// Account as returned to clients. Never carries the password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_details: Option<DriverDetailsDto>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_ref().to_owned(),
            email: user.email.as_ref().to_owned(),
            phone: user.phone.as_ref().to_owned(),
            role: user.role(),
            is_verified: user.is_verified,
            driver_details: user.profile.driver().map(DriverDetailsDto::from),
            created_at: user.created_at,
        }
    }
}

/// `{message, user, token}` returned by sign-up and login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub message: String,
    pub user: UserDto,
    /// HS256 bearer token for the `Authorization` header.
    pub token: String,
}

/// `{user}` returned by the profile read.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: UserDto,
}

/// `{message, user}` returned by the profile update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdatedResponse {
    pub message: String,
    pub user: UserDto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn details(license: &str, vehicle_type: &str, number: &str) -> DriverDetailsRequest {
        DriverDetailsRequest {
            license_number: Some(license.into()),
            vehicle_type: Some(vehicle_type.into()),
            vehicle_number: Some(number.into()),
            experience: Some(4),
        }
    }

    #[rstest]
    fn driver_details_are_trimmed() {
        let profile = details("  DL-77 ", " taxi", "KA01 ")
            .into_profile()
            .expect("valid details");

        assert_eq!(profile.license_number(), "DL-77");
        assert_eq!(profile.vehicle_type(), VehicleType::Taxi);
        assert_eq!(profile.vehicle_number(), "KA01");
    }

    #[rstest]
    fn blank_driver_fields_are_listed_as_missing() {
        let mut request = details("   ", "bus", "");
        request.experience = None;

        let error = request.into_profile().expect_err("incomplete details");

        assert_eq!(
            error.message(),
            "Missing driver details: license number, vehicle number, experience"
        );
        assert_eq!(
            error.details(),
            Some(&json!({"field": "driverDetails", "code": "incomplete_driver_details"}))
        );
    }
}
