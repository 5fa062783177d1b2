//! Bearer-token extraction.
//!
//! Resolves the `Authorization` header into a [`Caller`] once per request.
//! A missing header is not an error here: it yields [`Caller::Anonymous`],
//! which every protected operation rejects. A header that is present but
//! unusable fails the request with 401 immediately.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Caller, Error};

use super::state::HttpState;

pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

const BEARER_PREFIX: &str = "Bearer ";

/// Resolve the caller from the request headers.
pub fn resolve_caller(req: &HttpRequest) -> Result<Caller, Error> {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        return Ok(Caller::Anonymous);
    };
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized(INVALID_TOKEN_MESSAGE))?;
    state
        .tokens
        .verify(token)
        .map(Caller::Authenticated)
        .map_err(|error| {
            debug!(%error, "bearer token rejected");
            Error::unauthorized(INVALID_TOKEN_MESSAGE)
        })
}

impl FromRequest for Caller {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_caller(req))
    }
}
