//! Account service: sign-up, login and profile management.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    AccessTokenCodec, AccountCommand, AccountQuery, PasswordHashError, PasswordHasher,
    TokenError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AuthSession, Caller, Email, Error, Identity, LoginCredentials, ProfileUpdate, Registration,
    User, UserId,
};

pub const USER_EXISTS_MESSAGE: &str = "User already exists";
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid email or password";
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

/// Account service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<dyn AccessTokenCodec>,
    clock: Arc<dyn Clock>,
}

impl<U, H> AccountService<U, H> {
    pub fn new(
        users: Arc<U>,
        hasher: Arc<H>,
        tokens: Arc<dyn AccessTokenCodec>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { .. } => Error::user_exists(USER_EXISTS_MESSAGE),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(format!("password hashing error: {error}"))
}

fn map_token_error(error: TokenError) -> Error {
    Error::internal(format!("token issuing error: {error}"))
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    fn sign_in(&self, user: User) -> Result<AuthSession, Error> {
        let identity = Identity::new(
            user.id.clone(),
            Some(user.role()),
            Some(user.email.as_ref().to_owned()),
        );
        let token = self.tokens.issue(&identity).map_err(map_token_error)?;
        Ok(AuthSession { user, token })
    }

    async fn existing_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))
    }
}

#[async_trait]
impl<U, H> AccountCommand for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error> {
        let in_use = self
            .users
            .contact_in_use(registration.email(), registration.phone())
            .await
            .map_err(map_user_error)?;
        if in_use {
            return Err(Error::user_exists(USER_EXISTS_MESSAGE));
        }

        let digest = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hash_error)?;
        let user = User {
            id: UserId::random(),
            name: registration.name().clone(),
            email: registration.email().clone(),
            phone: registration.phone().clone(),
            profile: registration.profile().clone(),
            is_verified: true,
            created_at: self.clock.utc(),
        };
        self.users
            .insert(&user, &digest)
            .await
            .map_err(map_user_error)?;
        self.sign_in(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error> {
        let rejected = || Error::unauthorized(INVALID_LOGIN_MESSAGE);
        let Ok(email) = Email::new(credentials.email()) else {
            return Err(rejected());
        };
        let stored = self
            .users
            .find_credentials(&email)
            .await
            .map_err(map_user_error)?
            .ok_or_else(rejected)?;
        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password)
            .await
            .map_err(map_hash_error)?;
        if !matches {
            return Err(rejected());
        }
        self.sign_in(stored.user)
    }

    async fn update_profile(&self, caller: &Caller, update: ProfileUpdate) -> Result<User, Error> {
        let identity = caller.require_authenticated()?;
        let current = self.existing_user(&identity.user_id).await?;
        self.users
            .update_profile(&update.apply_to(&current))
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))
    }
}

#[async_trait]
impl<U, H> AccountQuery for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn profile(&self, caller: &Caller) -> Result<User, Error> {
        let identity = caller.require_authenticated()?;
        self.existing_user(&identity.user_id).await
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
