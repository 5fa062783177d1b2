//! Account registration and profile editing inputs.

use zeroize::Zeroizing;

use super::{
    AccessToken, DriverProfile, Email, PasswordPolicyError, PersonName, Phone, Role, RoleProfile,
    User, UserValidationError, check_password_strength,
};

/// Reasons a registration is rejected before any storage access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("{0}")]
    InvalidName(UserValidationError),
    #[error("{0}")]
    InvalidEmail(UserValidationError),
    #[error("{0}")]
    InvalidPhone(UserValidationError),
    #[error("{0}")]
    WeakPassword(PasswordPolicyError),
    #[error("Driver details are required for driver registration")]
    MissingDriverDetails,
    #[error("Admin accounts cannot be self-registered")]
    AdminNotAllowed,
}

/// Raw registration fields after transport-level presence checks.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationInput<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub password: &'a str,
    pub role: Role,
    pub driver: Option<&'a DriverProfile>,
}

/// A validated sign-up request.
#[derive(Debug, Clone)]
pub struct Registration {
    name: PersonName,
    email: Email,
    phone: Phone,
    password: Zeroizing<String>,
    profile: RoleProfile,
}

impl Registration {
    /// Validate a sign-up request.
    ///
    /// Passengers may send driver details; they are ignored.
    pub fn try_new(input: RegistrationInput<'_>) -> Result<Self, RegistrationError> {
        let name = PersonName::new(input.name).map_err(RegistrationError::InvalidName)?;
        let email = Email::new(input.email).map_err(RegistrationError::InvalidEmail)?;
        let phone = Phone::new(input.phone).map_err(RegistrationError::InvalidPhone)?;
        check_password_strength(input.password).map_err(RegistrationError::WeakPassword)?;
        let profile = match input.role {
            Role::Passenger => RoleProfile::Passenger,
            Role::Driver => RoleProfile::Driver(
                input
                    .driver
                    .cloned()
                    .ok_or(RegistrationError::MissingDriverDetails)?,
            ),
            Role::Admin => return Err(RegistrationError::AdminNotAllowed),
        };
        Ok(Self {
            name,
            email,
            phone,
            password: Zeroizing::new(input.password.to_owned()),
            profile,
        })
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn profile(&self) -> &RoleProfile {
        &self.profile
    }
}

/// Editable profile fields. Role, email and verification are not editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    name: PersonName,
    phone: Phone,
    driver: Option<DriverProfile>,
}

impl ProfileUpdate {
    pub fn try_new(
        name: &str,
        phone: &str,
        driver: Option<DriverProfile>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            name: PersonName::new(name)?,
            phone: Phone::new(phone)?,
            driver,
        })
    }

    /// Produce the edited user. Driver details replace the stored ones only
    /// for drivers and are ignored for every other role.
    pub fn apply_to(&self, user: &User) -> User {
        let profile = match (&user.profile, &self.driver) {
            (RoleProfile::Driver(_), Some(details)) => RoleProfile::Driver(details.clone()),
            (current, _) => current.clone(),
        };
        User {
            name: self.name.clone(),
            phone: self.phone.clone(),
            profile,
            ..user.clone()
        }
    }
}

/// A signed-in user and the bearer token issued for them.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: AccessToken,
}
