//! Driving port for reading the caller's account.

use async_trait::async_trait;

use crate::domain::{Caller, Error, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Fetch the caller's profile.
    async fn profile(&self, caller: &Caller) -> Result<User, Error>;
}
