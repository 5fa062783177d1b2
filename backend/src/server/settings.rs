//! Process settings loaded via OrthoConfig from CLI flags, `RIDEEASE_*`
//! environment variables and an optional configuration file.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use rideease::outbound::persistence::PoolConfig;
use rideease::outbound::security::DEFAULT_TOKEN_TTL_HOURS;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings controlling the HTTP listener, storage and booking policy.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RIDEEASE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the server keeps data in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Whether drivers and admins may create bookings as well as passengers.
    pub allow_any_role_to_book: Option<bool>,
    /// Lifetime of issued bearer tokens.
    pub token_ttl_hours: Option<i64>,
}

/// Settings that parse but cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("token lifetime must be positive, got {0} hours")]
    TokenTtl(i64),
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Booking is open to every role unless explicitly restricted.
    pub fn allow_any_role_to_book(&self) -> bool {
        self.allow_any_role_to_book.unwrap_or(true)
    }

    pub fn token_ttl(&self) -> Result<chrono::Duration, SettingsError> {
        let hours = self.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS);
        if hours <= 0 {
            return Err(SettingsError::TokenTtl(hours));
        }
        chrono::Duration::try_hours(hours).ok_or(SettingsError::TokenTtl(hours))
    }

    /// Pool settings when a database is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self
            .database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())?;
        let config = PoolConfig::new(url);
        Some(match self.db_max_connections {
            Some(max) if max > 0 => config.with_max_size(max),
            _ => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "RIDEEASE_BIND_ADDR",
        "RIDEEASE_DATABASE_URL",
        "RIDEEASE_DB_MAX_CONNECTIONS",
        "RIDEEASE_ALLOW_ANY_ROLE_TO_BOOK",
        "RIDEEASE_TOKEN_TTL_HOURS",
    ];

    fn load_with(values: [Option<&str>; 5]) -> AppSettings {
        let _guard = lock_env(
            VARS.iter()
                .zip(values)
                .map(|(name, value)| (*name, value.map(str::to_owned))),
        );
        AppSettings::load_from_iter([OsString::from("rideease")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = load_with([None; 5]);

        assert!(settings.allow_any_role_to_book());
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert_eq!(
            settings.token_ttl().expect("default ttl"),
            chrono::Duration::hours(DEFAULT_TOKEN_TTL_HOURS)
        );
        assert!(settings.pool_config().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with([
            Some("127.0.0.1:9090"),
            Some("postgres://localhost/rideease"),
            Some("4"),
            Some("false"),
            Some("2"),
        ]);

        assert!(!settings.allow_any_role_to_book());
        assert_eq!(settings.bind_addr().expect("address").port(), 9090);
        assert_eq!(settings.token_ttl().expect("ttl"), chrono::Duration::hours(2));
        let pool = settings.pool_config().expect("database configured");
        assert_eq!(pool.database_url(), "postgres://localhost/rideease");
        assert_eq!(pool.max_size(), 4);
    }

    #[rstest]
    #[case(Some("false"), false)]
    #[case(Some("true"), true)]
    #[case(None, true)]
    fn booking_policy_follows_environment(
        #[case] value: Option<&str>,
        #[case] expected: bool,
    ) {
        let settings = load_with([None, None, None, value, None]);

        assert_eq!(settings.allow_any_role_to_book(), expected);
    }

    #[rstest]
    fn unusable_bind_address_is_reported() {
        let settings = load_with([Some("not-an-address"), None, None, None, None]);

        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
        assert!(settings.token_ttl().is_ok());
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    fn non_positive_token_ttl_is_reported(#[case] ttl: &str) {
        let settings = load_with([None, None, None, None, Some(ttl)]);

        assert!(matches!(settings.token_ttl(), Err(SettingsError::TokenTtl(_))));
        assert!(settings.bind_addr().is_ok());
    }
}
