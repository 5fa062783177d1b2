//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Email, PasswordDigest, Phone, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique email or phone constraint rejected the write.
        Duplicate { message: String } => "user already exists: {message}",
    }
}

/// A user together with the stored password digest, for login checks.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub user: User,
    pub password: PasswordDigest,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with `Duplicate` when the email is taken.
    async fn insert(
        &self,
        user: &User,
        password: &PasswordDigest,
    ) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user and password digest by normalised email.
    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Whether any account already uses the email or the phone number.
    async fn contact_in_use(&self, email: &Email, phone: &Phone)
    -> Result<bool, UserPersistenceError>;

    /// Overwrite the editable profile fields (name, phone, driver details).
    ///
    /// Returns the stored user, or `None` when the account no longer exists.
    async fn update_profile(&self, user: &User) -> Result<Option<User>, UserPersistenceError>;
}
