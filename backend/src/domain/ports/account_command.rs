//! Driving port for sign-up, login and profile edits.

use async_trait::async_trait;

use crate::domain::{AuthSession, Caller, Error, LoginCredentials, ProfileUpdate, Registration, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account and sign it in.
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error>;

    /// Exchange credentials for a bearer token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error>;

    /// Apply an edit to the caller's own profile.
    async fn update_profile(&self, caller: &Caller, update: ProfileUpdate) -> Result<User, Error>;
}
