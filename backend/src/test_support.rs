//! Test utilities shared by integration tests in `tests/`.
//!
//! Compiled only with the `test-support` feature. Builds the HTTP state over
//! an [`InMemoryStore`] with the real account and booking services, so tests
//! exercise everything except PostgreSQL.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::AccessTokenCodec;
use crate::domain::{AccountService, BookingPolicy, BookingService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenCodec, TokenSecret};

/// Signing secret used by in-memory test servers.
pub const TEST_TOKEN_SECRET: &[u8] = b"rideease-test-secret-0123456789abcdef";

/// HTTP state over a fresh in-memory store, plus the store for assertions.
pub struct InMemoryApp {
    pub state: HttpState,
    pub store: Arc<InMemoryStore>,
}

/// Build an [`InMemoryApp`] with `policy`.
///
/// # Examples
///
/// ```rust
/// use rideease::domain::BookingPolicy;
/// use rideease::test_support::in_memory_app;
///
/// let app = in_memory_app(BookingPolicy::default());
/// let _state = app.state;
/// ```
pub fn in_memory_app(policy: BookingPolicy) -> InMemoryApp {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let store = Arc::new(InMemoryStore::new());
    let tokens: Arc<dyn AccessTokenCodec> = Arc::new(JwtTokenCodec::new(
        &TokenSecret::new(TEST_TOKEN_SECRET.to_vec()),
        chrono::Duration::hours(1),
        clock.clone(),
    ));
    let accounts = Arc::new(AccountService::new(
        store.clone(),
        Arc::new(Argon2PasswordHasher),
        tokens.clone(),
        clock.clone(),
    ));
    let bookings = Arc::new(BookingService::new(store.clone(), clock, policy));

    let state = HttpState::new(HttpStatePorts {
        bookings: bookings.clone(),
        bookings_query: bookings,
        accounts: accounts.clone(),
        accounts_query: accounts,
        vehicles: store.clone(),
        tokens,
    });
    InMemoryApp { state, store }
}
