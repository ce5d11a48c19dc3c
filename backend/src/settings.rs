//! Service configuration loaded via OrthoConfig.
//!
//! Values layer defaults, an optional configuration file, `ITEM_SERVICE_*`
//! environment variables and command-line flags.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOCALE: &str = "en";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The host is not an IP address.
    #[error("invalid bind host '{host}': {message}")]
    InvalidHost { host: String, message: String },
    /// The default locale is blank.
    #[error("default locale must not be empty")]
    EmptyLocale,
}

/// Settings for the item catalogue service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ITEM_SERVICE")]
pub struct AppSettings {
    /// Interface to bind, defaults to all interfaces.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Locale used when a request does not name one we have messages for.
    pub default_locale: Option<String>,
    /// Insert the two sample items at start-up.
    #[ortho_config(default = true)]
    pub seed_items: bool,
}

impl AppSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST).trim();
        let ip: IpAddr = host.parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::InvalidHost {
                host: host.to_owned(),
                message: err.to_string(),
            }
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Fallback locale for message lookup.
    pub fn default_locale(&self) -> Result<&str, SettingsError> {
        let locale = self.default_locale.as_deref().unwrap_or(DEFAULT_LOCALE).trim();
        if locale.is_empty() {
            return Err(SettingsError::EmptyLocale);
        }
        Ok(locale)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings layering.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "ITEM_SERVICE_HOST",
        "ITEM_SERVICE_PORT",
        "ITEM_SERVICE_DEFAULT_LOCALE",
        "ITEM_SERVICE_SEED_ITEMS",
    ];

    fn load(args: &[&str]) -> AppSettings {
        let argv = std::iter::once(OsString::from("item-catalogue")).chain(args.iter().map(|arg| OsString::from(*arg)));
        AppSettings::load_from_iter(argv).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load(&[]);
        assert!(settings.seed_items);
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 8080)))
        );
        assert_eq!(settings.default_locale(), Ok("en"));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("ITEM_SERVICE_HOST", Some("127.0.0.1".to_owned())),
            ("ITEM_SERVICE_PORT", Some("9090".to_owned())),
            ("ITEM_SERVICE_DEFAULT_LOCALE", Some("ko".to_owned())),
            ("ITEM_SERVICE_SEED_ITEMS", Some("false".to_owned())),
        ]);

        let settings = load(&[]);
        assert!(!settings.seed_items);
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 9090)))
        );
        assert_eq!(settings.default_locale(), Ok("ko"));
    }

    #[rstest]
    fn command_line_wins_over_environment() {
        let _guard = lock_env([
            ("ITEM_SERVICE_HOST", None::<String>),
            ("ITEM_SERVICE_PORT", Some("9090".to_owned())),
            ("ITEM_SERVICE_DEFAULT_LOCALE", None::<String>),
            ("ITEM_SERVICE_SEED_ITEMS", None::<String>),
        ]);

        let settings = load(&["--port", "7070"]);
        assert_eq!(settings.port, Some(7070));
    }

    #[rstest]
    #[case(Some("not-an-ip"), None)]
    #[case(None, Some("  "))]
    fn invalid_values_are_reported(#[case] host: Option<&str>, #[case] locale: Option<&str>) {
        let settings = AppSettings {
            host: host.map(str::to_owned),
            port: None,
            default_locale: locale.map(str::to_owned),
            seed_items: false,
        };
        if host.is_some() {
            assert!(matches!(
                settings.bind_addr(),
                Err(SettingsError::InvalidHost { .. })
            ));
        }
        if locale.is_some() {
            assert_eq!(settings.default_locale(), Err(SettingsError::EmptyLocale));
        }
    }
}
