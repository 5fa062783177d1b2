//! Driven port for issuing and verifying bearer tokens.
//!
//! Verification is pure: no store is consulted, so a token stays valid until
//! it expires even if the account changes.

use crate::domain::{AccessToken, Identity};

use super::define_port_error;

define_port_error! {
    /// Errors raised while encoding or decoding bearer tokens.
    pub enum TokenError {
        /// The token's expiry has passed.
        Expired => "token expired",
        /// Signature, structure or claims are invalid.
        Invalid { message: String } => "invalid token: {message}",
        /// Signing a new token failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait AccessTokenCodec: Send + Sync {
    /// Sign a token carrying the identity's claims.
    fn issue(&self, identity: &Identity) -> Result<AccessToken, TokenError>;

    /// Check signature and expiry and return the embedded identity.
    fn verify(&self, token: &str) -> Result<Identity, TokenError>;
}
