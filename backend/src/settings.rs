//! Service configuration loaded via OrthoConfig.
//!
//! Values merge from CLI flags, `TRACKER_*` environment variables and config
//! files. Every setting has a default, so the service starts with no
//! configuration at all. The listen port also honours a plain `PORT`
//! variable, as set by most container hosts, when `TRACKER_PORT` is unset.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Listen port used when none is configured.
pub const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
/// Unprefixed port variable consulted when no port is configured.
pub const HOST_PORT_ENV: &str = "PORT";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The configured host is not an IP address.
    #[error("invalid listen host {host:?}: expected an IP address")]
    InvalidHost { host: String },
}

/// Runtime settings for the exercise tracker.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRACKER")]
pub struct AppSettings {
    /// PostgreSQL connection string. Records are kept in memory when absent.
    pub database_url: Option<String>,
    /// Listen address.
    pub host: Option<String>,
    /// Listen port.
    pub port: Option<u16>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
}

fn host_port() -> Option<u16> {
    std::env::var(HOST_PORT_ENV)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
}

impl AppSettings {
    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Listen port, falling back to `PORT` and then [`DEFAULT_PORT`].
    pub fn port(&self) -> u16 {
        self.port.or_else(host_port).unwrap_or(DEFAULT_PORT)
    }

    /// Pool size.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    /// Socket address to bind, defaulting to all interfaces.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidHost`] when `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip = match self.host.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_HOST,
            Some(host) => host.parse().map_err(|_| SettingsError::InvalidHost {
                host: host.to_owned(),
            })?,
        };
        Ok(SocketAddr::new(ip, self.port()))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use crate::outbound::persistence::DEFAULT_MAX_CONNECTIONS;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "TRACKER_DATABASE_URL",
        "TRACKER_HOST",
        "TRACKER_PORT",
        "TRACKER_DB_MAX_CONNECTIONS",
        HOST_PORT_ENV,
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("exercise-tracker")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert!(settings.database_url().is_none());
        assert_eq!(settings.port(), DEFAULT_PORT);
        assert_eq!(settings.db_max_connections(), DEFAULT_MAX_CONNECTIONS);
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::new(DEFAULT_HOST, DEFAULT_PORT))
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "TRACKER_DATABASE_URL",
                Some("postgres://tracker@db/tracker".to_owned()),
            ),
            ("TRACKER_HOST", Some("127.0.0.1".to_owned())),
            ("TRACKER_PORT", Some("8081".to_owned())),
            ("TRACKER_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            (HOST_PORT_ENV, Some("9000".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url(),
            Some("postgres://tracker@db/tracker")
        );
        assert_eq!(settings.db_max_connections(), 4);
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 8081)))
        );
    }

    fn settings(database_url: Option<&str>, host: Option<&str>) -> AppSettings {
        AppSettings {
            database_url: database_url.map(str::to_owned),
            host: host.map(str::to_owned),
            port: None,
            db_max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    #[rstest]
    #[case::plain(Some("5000"), 5000)]
    #[case::unparsable(Some("http"), DEFAULT_PORT)]
    #[case::absent(None, DEFAULT_PORT)]
    fn host_port_applies_when_no_port_is_configured(
        #[case] raw: Option<&str>,
        #[case] expected: u16,
    ) {
        let _guard = lock_env(
            VARS.map(|name| (name, None::<String>))
                .into_iter()
                .filter(|(name, _)| *name != HOST_PORT_ENV)
                .chain([(HOST_PORT_ENV, raw.map(str::to_owned))]),
        );

        let settings = load_from_empty_args();
        assert_eq!(settings.port(), expected);
    }

    #[rstest]
    fn blank_database_url_counts_as_unset() {
        let settings = settings(Some("  "), None);
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    fn hostnames_are_rejected() {
        let settings = settings(None, Some("localhost"));
        assert_eq!(
            settings.bind_addr(),
            Err(SettingsError::InvalidHost {
                host: "localhost".to_owned()
            })
        );
    }
}
