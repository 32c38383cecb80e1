//! Portal settings loaded via OrthoConfig.
//!
//! Every field can come from a `SMARTLINE_*` environment variable, a
//! `--flag` on the command line or a configuration file. Without a platform
//! URL the portal runs against in-memory fixtures.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::supabase::SupabaseConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values controlling the portal process.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SMARTLINE")]
pub struct PortalSettings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// Base URL of the backend platform, e.g. `https://abc.supabase.co`.
    pub supabase_url: Option<String>,
    /// Publishable anonymous key of the platform project.
    pub supabase_anon_key: Option<String>,
    /// Per-request timeout for platform calls, in seconds.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
}

/// Reasons the settings cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid platform URL '{value}': {source}")]
    SupabaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("SMARTLINE_SUPABASE_ANON_KEY is required when SMARTLINE_SUPABASE_URL is set")]
    MissingAnonKey,
    #[error("SMARTLINE_REQUEST_TIMEOUT_SECS must be greater than zero")]
    ZeroTimeout,
}

impl PortalSettings {
    /// Address to bind, falling back to all interfaces on port 8080.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Platform timeout; zero is rejected.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self.request_timeout_secs {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Platform client settings, or `None` to run on fixtures.
    pub fn supabase_config(&self) -> Result<Option<SupabaseConfig>, SettingsError> {
        let Some(raw_url) = self
            .supabase_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
        else {
            return Ok(None);
        };
        let url = Url::parse(raw_url).map_err(|source| SettingsError::SupabaseUrl {
            value: raw_url.to_owned(),
            source,
        })?;
        let anon_key = self
            .supabase_anon_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(SettingsError::MissingAnonKey)?;
        Ok(Some(SupabaseConfig {
            url,
            anon_key: anon_key.to_owned(),
            timeout: self.request_timeout()?,
        }))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for portal settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "SMARTLINE_BIND_ADDR",
        "SMARTLINE_SUPABASE_URL",
        "SMARTLINE_SUPABASE_ANON_KEY",
        "SMARTLINE_REQUEST_TIMEOUT_SECS",
    ];

    fn load_with(values: [Option<&str>; 4]) -> PortalSettings {
        let _guard = lock_env(
            VARS.into_iter()
                .zip(values)
                .map(|(name, value)| (name, value.map(str::to_owned))),
        );
        PortalSettings::load_from_iter([OsString::from("smartline")]).expect("config should load")
    }

    #[rstest]
    fn defaults_run_on_fixtures() {
        let settings = load_with([None, None, None, None]);
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("addr")
        );
        assert_eq!(
            settings.request_timeout().expect("timeout"),
            Duration::from_secs(10)
        );
        assert!(settings.supabase_config().expect("config").is_none());
    }

    #[rstest]
    fn environment_configures_the_platform() {
        let settings = load_with([
            Some("127.0.0.1:9000"),
            Some("https://demo.supabase.co"),
            Some("anon-key"),
            Some("3"),
        ]);
        assert_eq!(settings.bind_addr().expect("bind addr").port(), 9000);
        let config = settings
            .supabase_config()
            .expect("config")
            .expect("platform configured");
        assert_eq!(config.url.as_str(), "https://demo.supabase.co/");
        assert_eq!(config.anon_key, "anon-key");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[rstest]
    fn url_without_key_is_rejected() {
        let settings = load_with([None, Some("https://demo.supabase.co"), None, None]);
        assert!(matches!(
            settings.supabase_config(),
            Err(SettingsError::MissingAnonKey)
        ));
    }

    #[rstest]
    #[case(Some("not-an-address"), None)]
    #[case(None, Some("0"))]
    fn invalid_values_are_reported(#[case] bind: Option<&str>, #[case] timeout: Option<&str>) {
        let settings = load_with([bind, None, None, timeout]);
        assert!(settings.bind_addr().is_err() || settings.request_timeout().is_err());
    }
}
