//! Authentication and authorisation primitives.
//!
//! Inbound adapters turn a bearer token into a [`Caller`] once per request;
//! domain services then authorise through [`Caller::require_authenticated`]
//! and [`Caller::require_role`] instead of inspecting token payloads.

use std::fmt;

use zeroize::Zeroizing;

use super::{Error, Role, UserId};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the account service.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and non-empty. Its format is not
///   checked; an unknown address simply fails authentication.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use rideease::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Rider@Example.com", "S3cret!pw").unwrap();
/// assert_eq!(creds.email(), "rider@example.com");
/// assert_eq!(creds.password(), "S3cret!pw");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalised = email.trim();
        if normalised.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalised.to_lowercase(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email used for the account lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN_LEN: usize = 8;
/// Characters that satisfy the "special character" rule.
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*";

/// Reasons a password fails the registration strength rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordPolicyError {
    TooShort { min: usize },
    MissingUppercase,
    MissingDigit,
    MissingSpecial,
}

impl fmt::Display for PasswordPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min } => write!(f, "Password must be at least {min} characters long"),
            Self::MissingUppercase => {
                write!(f, "Password must contain at least one uppercase letter")
            }
            Self::MissingDigit => write!(f, "Password must contain at least one number"),
            Self::MissingSpecial => write!(
                f,
                "Password must contain at least one special character ({PASSWORD_SPECIALS})"
            ),
        }
    }
}

impl std::error::Error for PasswordPolicyError {}

/// Check a candidate password against the registration strength rules.
///
/// # Examples
/// ```
/// use rideease::domain::{check_password_strength, PasswordPolicyError};
///
/// assert!(check_password_strength("Str0ng!pw").is_ok());
/// assert_eq!(
///     check_password_strength("weakpass1!"),
///     Err(PasswordPolicyError::MissingUppercase)
/// );
/// ```
pub fn check_password_strength(password: &str) -> Result<(), PasswordPolicyError> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(PasswordPolicyError::TooShort {
            min: PASSWORD_MIN_LEN,
        });
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordPolicyError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordPolicyError::MissingDigit);
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Err(PasswordPolicyError::MissingSpecial);
    }
    Ok(())
}

/// Encoded password hash as produced by a `PasswordHasher` adapter.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap an encoded hash string (for example an Argon2 PHC string).
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Signed bearer credential handed to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<AccessToken> for String {
    fn from(value: AccessToken) -> Self {
        value.0
    }
}

/// Verified claims carried by a bearer token.
///
/// `role` is `None` when the token carried no role claim or an unknown one;
/// such callers never pass a role guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Option<Role>,
    pub email: Option<String>,
}

impl Identity {
    pub fn new(user_id: UserId, role: Option<Role>, email: Option<String>) -> Self {
        Self {
            user_id,
            role,
            email,
        }
    }

    /// Whether the verified role claim equals `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }
}

/// Who is making a request.
///
/// # Examples
/// ```
/// use rideease::domain::{Caller, ErrorCode, Identity, Role, UserId};
///
/// let passenger = Caller::Authenticated(Identity::new(UserId::random(), Some(Role::Passenger), None));
/// let err = passenger
///     .require_role(Role::Driver, "Only drivers can accept rides")
///     .unwrap_err();
/// assert_eq!(err.code(), ErrorCode::Forbidden);
///
/// let err = Caller::Anonymous.require_authenticated().unwrap_err();
/// assert_eq!(err.code(), ErrorCode::Unauthorized);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// No credential was presented.
    Anonymous,
    /// A bearer token was presented and verified.
    Authenticated(Identity),
}

/// Message returned when a protected operation is called without a token.
pub const MISSING_TOKEN_MESSAGE: &str = "No token provided";

impl Caller {
    /// Require any verified identity.
    pub fn require_authenticated(&self) -> Result<&Identity, Error> {
        match self {
            Self::Authenticated(identity) => Ok(identity),
            Self::Anonymous => Err(Error::unauthorized(MISSING_TOKEN_MESSAGE)),
        }
    }

    /// Require a verified identity holding `role`; `forbidden_message` is
    /// returned to authenticated callers with any other role.
    pub fn require_role(&self, role: Role, forbidden_message: &str) -> Result<&Identity, Error> {
        let identity = self.require_authenticated()?;
        if identity.has_role(role) {
            Ok(identity)
        } else {
            Err(Error::forbidden(forbidden_message))
        }
    }
}
