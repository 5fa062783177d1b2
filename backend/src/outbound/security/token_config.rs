//! Signing-secret configuration for bearer tokens.
//!
//! The secret is read from `RIDEEASE_JWT_SECRET`, or from the file named by
//! `RIDEEASE_JWT_SECRET_FILE`. Debug builds tolerate a missing or short
//! secret with a warning; release builds refuse to start.

use std::path::PathBuf;

use mockable::Env;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroize;

use super::TokenSecret;

pub const SECRET_ENV: &str = "RIDEEASE_JWT_SECRET";
pub const SECRET_FILE_ENV: &str = "RIDEEASE_JWT_SECRET_FILE";
/// HS256 keys shorter than the hash output weaken the MAC.
pub const SECRET_MIN_LEN: usize = 32;

const FINGERPRINT_BYTES: usize = 8;

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing or short secrets are tolerated with a warning.
    Debug,
    /// A secret of at least [`SECRET_MIN_LEN`] bytes is mandatory.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rideease::outbound::security::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while loading the token signing secret.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// Neither secret variable is set.
    #[error("missing required environment variable: {SECRET_ENV} or {SECRET_FILE_ENV}")]
    MissingEnv,
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configured secret is too short for release builds.
    #[error("token secret from {origin} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        origin: String,
        length: usize,
        min_len: usize,
    },
}

/// Load the signing secret from the environment.
///
/// `RIDEEASE_JWT_SECRET` wins over `RIDEEASE_JWT_SECRET_FILE`; blank values
/// count as unset.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use rideease::outbound::security::{BuildMode, token_secret_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "RIDEEASE_JWT_SECRET" => Some("k".repeat(48)),
///     _ => None,
/// });
///
/// let secret = token_secret_from_env(&env, BuildMode::Release).expect("secret loads");
/// assert_eq!(secret.len(), 48);
/// ```
pub fn token_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSecret, TokenConfigError> {
    let present = |name: &str| env.string(name).filter(|value| !value.trim().is_empty());

    let (origin, secret) = if let Some(value) = present(SECRET_ENV) {
        (SECRET_ENV.to_owned(), TokenSecret::new(value.into_bytes()))
    } else if let Some(path) = present(SECRET_FILE_ENV) {
        let path = PathBuf::from(path);
        let mut bytes = std::fs::read(&path).map_err(|source| TokenConfigError::KeyRead {
            path: path.clone(),
            source,
        })?;
        let secret = TokenSecret::new(trim_trailing_newline(&bytes));
        bytes.zeroize();
        (path.display().to_string(), secret)
    } else if mode.is_debug() {
        warn!("{SECRET_ENV} not set; using an ephemeral token secret (dev only)");
        return Ok(TokenSecret::ephemeral());
    } else {
        return Err(TokenConfigError::MissingEnv);
    };

    let length = secret.len();
    if length < SECRET_MIN_LEN {
        if mode.is_debug() {
            warn!(origin = %origin, length, "token secret shorter than {SECRET_MIN_LEN} bytes");
        } else {
            return Err(TokenConfigError::KeyTooShort {
                origin,
                length,
                min_len: SECRET_MIN_LEN,
            });
        }
    }
    Ok(secret)
}

fn trim_trailing_newline(bytes: &[u8]) -> Vec<u8> {
    let end = bytes
        .iter()
        .rposition(|byte| !matches!(byte, b'\n' | b'\r'))
        .map_or(0, |index| index + 1);
    bytes[..end].to_vec()
}

/// Truncated SHA-256 of the secret, safe to log for rotation checks.
///
/// # Examples
///
/// ```rust
/// use rideease::outbound::security::{TokenSecret, secret_fingerprint};
///
/// let fp = secret_fingerprint(&TokenSecret::new(vec![b'a'; 32]));
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn secret_fingerprint(secret: &TokenSecret) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
