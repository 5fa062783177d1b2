//! Builders wiring storage adapters into the HTTP state.
//!
//! With a database pool the Diesel repositories back every port; without
//! one a single [`InMemoryStore`] does.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use rideease::domain::ports::{
    AccessTokenCodec, BookingRepository, UserRepository, VehicleRepository,
};
use rideease::domain::{AccountService, BookingService};
use rideease::inbound::http::state::{HttpState, HttpStatePorts};
use rideease::outbound::memory::InMemoryStore;
use rideease::outbound::persistence::{
    DieselBookingRepository, DieselUserRepository, DieselVehicleRepository,
};
use rideease::outbound::security::{Argon2PasswordHasher, JwtTokenCodec};

use super::ServerConfig;

/// Storage adapters backing the driving ports.
struct Storage<U, B> {
    users: Arc<U>,
    bookings: Arc<B>,
    vehicles: Arc<dyn VehicleRepository>,
}

fn assemble<U, B>(storage: Storage<U, B>, config: &ServerConfig) -> HttpState
where
    U: UserRepository + 'static,
    B: BookingRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens: Arc<dyn AccessTokenCodec> = Arc::new(JwtTokenCodec::new(
        &config.token_secret,
        config.token_ttl,
        clock.clone(),
    ));
    let accounts = Arc::new(AccountService::new(
        storage.users,
        Arc::new(Argon2PasswordHasher),
        tokens.clone(),
        clock.clone(),
    ));
    let bookings = Arc::new(BookingService::new(storage.bookings, clock, config.policy));

    HttpState::new(HttpStatePorts {
        bookings: bookings.clone(),
        bookings_query: bookings,
        accounts: accounts.clone(),
        accounts_query: accounts,
        vehicles: storage.vehicles,
        tokens,
    })
}

/// Build the shared HTTP state for `config`.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL storage");
            assemble(
                Storage {
                    users: Arc::new(DieselUserRepository::new(pool.clone())),
                    bookings: Arc::new(DieselBookingRepository::new(pool.clone())),
                    vehicles: Arc::new(DieselVehicleRepository::new(pool.clone())),
                },
                config,
            )
        }
        None => {
            info!("no database configured; using in-memory storage");
            let store = Arc::new(InMemoryStore::new());
            assemble(
                Storage {
                    users: store.clone(),
                    bookings: store.clone(),
                    vehicles: store,
                },
                config,
            )
        }
    };
    web::Data::new(state)
}
