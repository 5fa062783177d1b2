//! Opt-in PostgreSQL access for repository integration tests.
//!
//! Tests run against `RIDEEASE_TEST_DATABASE_URL`. When it is unset they
//! print a skip marker and return early, unless `RIDEEASE_REQUIRE_DB_TESTS`
//! is truthy, in which case the missing database is a failure.

use rideease::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

pub const DATABASE_URL_ENV: &str = "RIDEEASE_TEST_DATABASE_URL";
pub const REQUIRE_ENV: &str = "RIDEEASE_REQUIRE_DB_TESTS";

fn truthy(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// A migrated pool, or `None` when database tests are not configured.
pub async fn migrated_pool() -> Option<DbPool> {
    let Some(url) = std::env::var(DATABASE_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
    else {
        if truthy(REQUIRE_ENV) {
            panic!("{REQUIRE_ENV} is set but {DATABASE_URL_ENV} is not");
        }
        eprintln!("SKIP-DB-TEST: {DATABASE_URL_ENV} not set");
        return None;
    };
    run_pending_migrations(&url)
        .await
        .expect("migrations apply");
    let pool = DbPool::new(PoolConfig::new(&url).with_max_size(8))
        .await
        .expect("pool builds");
    Some(pool)
}
