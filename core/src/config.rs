//! Client configuration.
//!
//! The API key and version are carried for forward compatibility; neither is
//! sent with requests today.

use tracing::Dispatch;

pub const DEFAULT_HOST: &str = "www.pharmvar.org/api-service";
pub const DEFAULT_API_VERSION: &str = "0.1";

/// Constructor-time settings for `RestAdapter` and `PharmVarClient`.
///
/// `logger` receives the client's `tracing` events. The default,
/// `Dispatch::none()`, drops them; pass `Dispatch::default()` to forward them
/// to the process-wide subscriber instead.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub api_key: String,
    pub version: String,
    pub verify_tls: bool,
    pub logger: Dispatch,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            api_key: String::new(),
            version: DEFAULT_API_VERSION.to_string(),
            verify_tls: true,
            logger: Dispatch::none(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `PHARMVAR_HOST`, `PHARMVAR_API_KEY`,
    /// `PHARMVAR_API_VERSION` and `PHARMVAR_VERIFY_TLS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("PHARMVAR_HOST").unwrap_or(defaults.host),
            api_key: lookup("PHARMVAR_API_KEY").unwrap_or(defaults.api_key),
            version: lookup("PHARMVAR_API_VERSION").unwrap_or(defaults.version),
            verify_tls: lookup("PHARMVAR_VERIFY_TLS")
                .map(|value| parse_flag(&value))
                .unwrap_or(defaults.verify_tls),
            logger: defaults.logger,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    pub fn with_logger(mut self, logger: Dispatch) -> Self {
        self.logger = logger;
        self
    }
}

/// Only an explicit negative turns verification off.
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_point_at_public_service() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "www.pharmvar.org/api-service");
        assert_eq!(config.version, "0.1");
        assert!(config.api_key.is_empty());
        assert!(config.verify_tls);
    }

    #[test]
    fn builder_overrides_fields() {
        let config = ClientConfig::default()
            .with_host("localhost:3000/api-service")
            .with_api_key("secret")
            .with_version("0.2")
            .with_verify_tls(false);
        assert_eq!(config.host, "localhost:3000/api-service");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.version, "0.2");
        assert!(!config.verify_tls);
    }

    #[test]
    fn lookup_overrides_defaults() {
        let env: HashMap<&str, &str> = [
            ("PHARMVAR_HOST", "mirror.example.org/api"),
            ("PHARMVAR_VERIFY_TLS", "off"),
        ]
        .into_iter()
        .collect();
        let config = ClientConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.host, "mirror.example.org/api");
        assert_eq!(config.version, "0.1");
        assert!(!config.verify_tls);
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config.host, DEFAULT_HOST);
        assert!(config.verify_tls);
    }

    #[test]
    fn flag_parsing() {
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" NO "));
        assert!(!parse_flag("0"));
        assert!(parse_flag("true"));
        assert!(parse_flag("yes"));
        assert!(parse_flag("whatever"));
    }
}
