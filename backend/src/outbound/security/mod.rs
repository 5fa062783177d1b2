//! Credential adapters: password hashing, bearer tokens and the signing
//! secret they depend on.

mod argon2_password_hasher;
mod jwt_token_codec;
mod token_config;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_token_codec::{DEFAULT_TOKEN_TTL_HOURS, JwtTokenCodec, TokenSecret};
pub use token_config::{
    BuildMode, SECRET_ENV, SECRET_FILE_ENV, SECRET_MIN_LEN, TokenConfigError, secret_fingerprint,
    token_secret_from_env,
};
