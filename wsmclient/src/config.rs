//! Client configuration
//!
//! Loaded from YAML, then overridden by `WSMAN_CONFIG__<KEY>` environment
//! variables (for example `WSMAN_CONFIG__PASSWORD` or `WSMAN_CONFIG__USE_TLS`).

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Prefix of the environment variables overriding configuration keys
pub const ENV_PREFIX: &str = "WSMAN_CONFIG__";

/// Plain HTTP port of the WS-Management service
pub const HTTP_PORT: u16 = 16992;

/// TLS port of the WS-Management service
pub const HTTPS_PORT: u16 = 16993;

/// HTTP authentication scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    #[default]
    Digest,
    Basic,
}

/// Connection settings of one WS-Management endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Host name or address of the endpoint
    pub target: String,

    /// Explicit port, defaults to 16992 (16993 with TLS)
    pub port: Option<u16>,

    pub username: String,
    pub password: String,
    pub auth: AuthScheme,
    pub use_tls: bool,

    /// Accept self-signed certificates when `use_tls` is set
    pub self_signed_allowed: bool,

    pub timeout_secs: u64,

    /// Log raw request and response envelopes at info level
    pub log_messages: bool,

    /// MessageID of the first envelope built by the client
    pub message_id_base: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            target: String::new(),
            port: None,
            username: String::new(),
            password: String::new(),
            auth: AuthScheme::Digest,
            use_tls: false,
            self_signed_allowed: false,
            timeout_secs: 30,
            log_messages: false,
            message_id_base: 0,
        }
    }
}

impl ClientConfig {
    pub fn new(
        target: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            username: username.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    /// Parses a YAML document; absent keys take their default
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ClientConfig =
            serde_yaml::from_str(yaml).context("Invalid client configuration")?;
        Ok(config)
    }

    /// Loads a YAML file and applies the environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Cannot read configuration file {}", path.display()))?;

        let mut config = Self::from_yaml_str(&yaml)?;
        config.apply_env_overrides()?;
        debug!(config = %config.to_redacted_yaml()?, "Effective client configuration");

        info!(
            path = %path.display(),
            target = %config.target,
            port = config.effective_port(),
            tls = config.use_tls,
            "Loaded WS-Management client configuration"
        );
        Ok(config)
    }

    /// Applies every `WSMAN_CONFIG__<KEY>` variable of the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(env::vars())
    }

    /// Applies `(variable, value)` overrides; variables without the prefix are ignored
    pub fn apply_overrides<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut current = match serde_yaml::to_value(&*self)? {
            Value::Mapping(map) => map,
            _ => return Err(anyhow!("Configuration is not a map")),
        };

        let mut changed = false;
        for (key, value) in vars {
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let name = name.to_lowercase();
            let key_value = Value::String(name.clone());

            let converted = match current.get(&key_value) {
                None => {
                    warn!(variable = %key, "Unknown configuration key, override ignored");
                    continue;
                }
                Some(Value::String(_)) => Value::String(value),
                Some(_) => convert_env_value(&value),
            };

            debug!(key = %name, "Configuration key overridden from environment");
            current.insert(key_value, converted);
            changed = true;
        }

        if changed {
            *self = serde_yaml::from_value(Value::Mapping(current))
                .context("Invalid configuration override")?;
        }
        Ok(())
    }

    pub fn effective_port(&self) -> u16 {
        self.port
            .unwrap_or(if self.use_tls { HTTPS_PORT } else { HTTP_PORT })
    }

    /// `http(s)://target:port/wsman`
    pub fn endpoint_url(&self) -> String {
        let scheme = if self.use_tls { "https" } else { "http" };
        format!("{}://{}:{}/wsman", scheme, self.target, self.effective_port())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// YAML rendering with the password masked
    pub fn to_redacted_yaml(&self) -> Result<String> {
        let mut value = serde_yaml::to_value(self)?;
        if let Value::Mapping(map) = &mut value {
            redact(map);
        }
        Ok(serde_yaml::to_string(&value)?)
    }
}

fn redact(map: &mut Mapping) {
    let key = Value::String("password".to_string());
    if map.contains_key(&key) {
        map.insert(key, Value::String("********".to_string()));
    }
}

fn convert_env_value(value: &str) -> Value {
    if let Ok(parsed) = serde_yaml::from_str::<Value>(value) {
        return parsed;
    }
    Value::String(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("192.168.1.10", "admin", "P@ssw0rd");
        assert_eq!(config.auth, AuthScheme::Digest);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.effective_port(), 16992);
        assert_eq!(config.endpoint_url(), "http://192.168.1.10:16992/wsman");
    }

    #[test]
    fn test_tls_port_and_scheme() {
        let mut config = ClientConfig::new("amt.local", "admin", "pw");
        config.use_tls = true;
        assert_eq!(config.endpoint_url(), "https://amt.local:16993/wsman");

        config.port = Some(8443);
        assert_eq!(config.endpoint_url(), "https://amt.local:8443/wsman");
    }

    #[test]
    fn test_from_yaml_partial_document() {
        let config = ClientConfig::from_yaml_str(
            "target: 10.0.0.5\nusername: admin\npassword: secret\nauth: basic\nlog_messages: true\n",
        )
        .unwrap();
        assert_eq!(config.target, "10.0.0.5");
        assert_eq!(config.auth, AuthScheme::Basic);
        assert!(config.log_messages);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.port, None);
    }

    #[test]
    fn test_from_yaml_rejects_unknown_scheme() {
        assert!(ClientConfig::from_yaml_str("auth: kerberos\n").is_err());
    }

    #[test]
    fn test_overrides_are_typed() {
        let mut config = ClientConfig::new("host", "admin", "pw");
        config
            .apply_overrides(vars(&[
                ("WSMAN_CONFIG__PORT", "1234"),
                ("WSMAN_CONFIG__USE_TLS", "true"),
                ("WSMAN_CONFIG__TIMEOUT_SECS", "5"),
                ("WSMAN_CONFIG__AUTH", "basic"),
                ("UNRELATED", "x"),
            ]))
            .unwrap();

        assert_eq!(config.port, Some(1234));
        assert!(config.use_tls);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.auth, AuthScheme::Basic);
    }

    #[test]
    fn test_string_overrides_are_kept_verbatim() {
        let mut config = ClientConfig::new("host", "admin", "pw");
        config
            .apply_overrides(vars(&[
                ("WSMAN_CONFIG__PASSWORD", "123"),
                ("WSMAN_CONFIG__USERNAME", "true"),
            ]))
            .unwrap();
        assert_eq!(config.password, "123");
        assert_eq!(config.username, "true");
    }

    #[test]
    fn test_unknown_override_is_ignored() {
        let mut config = ClientConfig::new("host", "admin", "pw");
        let before = config.clone();
        config
            .apply_overrides(vars(&[("WSMAN_CONFIG__COLOR", "blue")]))
            .unwrap();
        assert_eq!(config, before);
    }

    #[test]
    fn test_invalid_override_fails() {
        let mut config = ClientConfig::new("host", "admin", "pw");
        let result = config.apply_overrides(vars(&[("WSMAN_CONFIG__PORT", "not-a-port")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_redacted_yaml_hides_password() {
        let config = ClientConfig::new("host", "admin", "hunter2");
        let yaml = config.to_redacted_yaml().unwrap();
        assert!(yaml.contains("password: '********'") || yaml.contains("password: \"********\""));
        assert!(!yaml.contains("hunter2"));
    }
}
