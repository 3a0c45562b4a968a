//! Service configuration loaded via OrthoConfig.
//!
//! Values merge from CLI flags, `USER_DIRECTORY_*` environment variables and
//! configuration files. The port carries a declared default; the remaining
//! fields are optional and their accessors supply defaults.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::DEFAULT_POOL_SIZE;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_USERS_FILE: &str = "users.json";

/// Runtime settings for the user directory service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_DIRECTORY")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    #[ortho_config(default = 8002)]
    pub port: u16,
    /// PostgreSQL URL; selects the relational store when set.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub database_pool_size: Option<u32>,
    /// JSON seed file for the in-memory store.
    pub users_file: Option<PathBuf>,
}

impl AppSettings {
    /// Bind host, defaulting to `localhost`.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Bind port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Database URL, if the relational store is configured.
    ///
    /// Blank values count as unset.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, defaulting to [`DEFAULT_POOL_SIZE`].
    #[must_use]
    pub fn database_pool_size(&self) -> u32 {
        self.database_pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }

    /// Seed file path, defaulting to `users.json` in the working directory.
    #[must_use]
    pub fn users_file(&self) -> PathBuf {
        self.users_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_USERS_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "USER_DIRECTORY_HOST",
        "USER_DIRECTORY_PORT",
        "USER_DIRECTORY_DATABASE_URL",
        "USER_DIRECTORY_DATABASE_POOL_SIZE",
        "USER_DIRECTORY_USERS_FILE",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("user-directory")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), "localhost");
        assert_eq!(settings.port(), 8002);
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.database_pool_size(), 10);
        assert_eq!(settings.users_file(), PathBuf::from("users.json"));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USER_DIRECTORY_HOST", Some("0.0.0.0".to_owned())),
            ("USER_DIRECTORY_PORT", Some("9000".to_owned())),
            (
                "USER_DIRECTORY_DATABASE_URL",
                Some("postgres://localhost/users".to_owned()),
            ),
            ("USER_DIRECTORY_DATABASE_POOL_SIZE", Some("3".to_owned())),
            ("USER_DIRECTORY_USERS_FILE", Some("/tmp/seed.json".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), "0.0.0.0");
        assert_eq!(settings.port(), 9000);
        assert_eq!(settings.database_url(), Some("postgres://localhost/users"));
        assert_eq!(settings.database_pool_size(), 3);
        assert_eq!(settings.users_file(), PathBuf::from("/tmp/seed.json"));
    }

    #[rstest]
    fn blank_database_url_counts_as_unset() {
        let settings = AppSettings {
            host: None,
            port: 8002,
            database_url: Some("   ".to_owned()),
            database_pool_size: None,
            users_file: None,
        };
        assert_eq!(settings.database_url(), None);
    }
}
