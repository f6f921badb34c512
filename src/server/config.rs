//! Server configuration loaded via OrthoConfig.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::ports::LendingBackend;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CORE_URL: &str = "http://localhost:3001";

/// Configuration values controlling the desk service, read from the
/// environment (`DESK_*`), config file, or command line.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DESK")]
pub struct DeskSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Base URL of the external lending core.
    pub core_url: Option<String>,
    /// Outbound request timeout towards the core, in seconds.
    #[ortho_config(default = 30)]
    pub core_timeout_secs: u64,
}

impl DeskSettings {
    /// Parse the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|err| std::io::Error::other(format!("invalid bind address {raw}: {err}")))
    }

    /// Parse the configured core base URL, falling back to the default.
    pub fn core_url(&self) -> std::io::Result<Url> {
        let raw = self.core_url.as_deref().unwrap_or(DEFAULT_CORE_URL);
        Url::parse(raw)
            .map_err(|err| std::io::Error::other(format!("invalid core URL {raw}: {err}")))
    }

    /// Outbound request timeout towards the core.
    pub fn core_timeout(&self) -> Duration {
        Duration::from_secs(self.core_timeout_secs.max(1))
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) backend: Arc<dyn LendingBackend>,
}

impl ServerConfig {
    /// Construct a server configuration from a bind address and the
    /// lending-core gateway to inject into handlers.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, backend: Arc<dyn LendingBackend>) -> Self {
        Self { bind_addr, backend }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and fallbacks.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    fn load_from_empty_args() -> DeskSettings {
        DeskSettings::load_from_iter([OsString::from("lending-desk")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("DESK_BIND_ADDR", None::<String>),
            ("DESK_CORE_URL", None::<String>),
            ("DESK_CORE_TIMEOUT_SECS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("valid default"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("valid addr")
        );
        assert_eq!(
            settings.core_url().expect("valid default").as_str(),
            "http://localhost:3001/"
        );
        assert_eq!(settings.core_timeout(), Duration::from_secs(30));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("DESK_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "DESK_CORE_URL",
                Some("https://core.lending.test/api".to_owned()),
            ),
            ("DESK_CORE_TIMEOUT_SECS", Some("5".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("valid addr"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("valid addr")
        );
        assert_eq!(
            settings.core_url().expect("valid url").as_str(),
            "https://core.lending.test/api"
        );
        assert_eq!(settings.core_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let _guard = lock_env([("DESK_BIND_ADDR", Some("not-an-addr".to_owned()))]);

        let settings = load_from_empty_args();
        let err = settings.bind_addr().expect_err("invalid address");
        assert!(err.to_string().contains("not-an-addr"));
    }

    #[rstest]
    fn zero_timeout_is_clamped_to_one_second() {
        let _guard = lock_env([("DESK_CORE_TIMEOUT_SECS", Some("0".to_owned()))]);

        let settings = load_from_empty_args();
        assert_eq!(settings.core_timeout(), Duration::from_secs(1));
    }
}
