//! Runtime configuration
//!
//! Configuration is assembled in layers: defaults, then an optional TOML
//! file, then `CURSUS_*` environment overrides, then validation.

use crate::{CursusError, CursusResult};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Environment variable holding the token encryption secret
pub const ENV_ENCRYPTION_SECRET: &str = "CURSUS_ENCRYPTION_SECRET";
/// Environment variable toggling the cookie `Secure` attribute
pub const ENV_COOKIE_SECURE: &str = "CURSUS_COOKIE_SECURE";
/// Environment variable holding the cookie `Domain` attribute
pub const ENV_COOKIE_DOMAIN: &str = "CURSUS_COOKIE_DOMAIN";
/// Environment variable overriding the default session lifetime
pub const ENV_SESSION_MAX_AGE: &str = "CURSUS_SESSION_MAX_AGE";
/// Environment variable overriding the server bind address
pub const ENV_BIND_ADDRESS: &str = "CURSUS_BIND_ADDRESS";
/// Environment variable pointing at an organization snapshot
pub const ENV_SNAPSHOT: &str = "CURSUS_SNAPSHOT";

/// Default session cookie name
pub const DEFAULT_COOKIE_NAME: &str = "access_token";

fn default_true() -> bool {
    true
}

fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

fn default_max_age() -> u64 {
    3600
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

/// Secret string that is wiped on drop and never printed
#[derive(Clone)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
    /// Wrap a secret value
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Borrow the secret value
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the secret is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SecretString {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString(<redacted>)")
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CursusConfig {
    /// Session cookie configuration
    pub session: SessionConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Organization snapshot used to seed the in-memory stores
    pub snapshot_path: Option<PathBuf>,
}

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Secret the token cipher key is derived from
    #[serde(default)]
    pub encryption_secret: SecretString,

    /// Emit the `Secure` cookie attribute.
    ///
    /// This should remain `true` outside local development.
    #[serde(default = "default_true")]
    pub cookie_secure: bool,

    /// Cookie `Domain` attribute
    #[serde(default)]
    pub cookie_domain: Option<String>,

    /// Cookie name
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Default cookie lifetime in seconds
    #[serde(default = "default_max_age")]
    pub max_age_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            encryption_secret: SecretString::default(),
            cookie_secure: true,
            cookie_domain: None,
            cookie_name: default_cookie_name(),
            max_age_seconds: default_max_age(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

impl CursusConfig {
    /// Load configuration: defaults, optional file, environment, validation
    pub fn load(path: Option<&Path>) -> CursusResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn load_from_file(path: &Path) -> CursusResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CursusError::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a TOML configuration document
    pub fn from_toml_str(content: &str) -> CursusResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `CURSUS_*` overrides from the process environment
    pub fn merge_with_env(&mut self) -> CursusResult<()> {
        self.merge_with_vars(|key| std::env::var(key).ok())
    }

    /// Apply `CURSUS_*` overrides from an arbitrary variable source
    pub fn merge_with_vars<F>(&mut self, lookup: F) -> CursusResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup(ENV_ENCRYPTION_SECRET) {
            self.session.encryption_secret = SecretString::new(secret);
        }
        if let Some(secure) = lookup(ENV_COOKIE_SECURE) {
            self.session.cookie_secure = parse_flag(ENV_COOKIE_SECURE, &secure)?;
        }
        if let Some(domain) = lookup(ENV_COOKIE_DOMAIN) {
            let domain = domain.trim().to_string();
            self.session.cookie_domain = (!domain.is_empty()).then_some(domain);
        }
        if let Some(max_age) = lookup(ENV_SESSION_MAX_AGE) {
            self.session.max_age_seconds = max_age.trim().parse().map_err(|_| {
                CursusError::config(format!("{ENV_SESSION_MAX_AGE} must be an integer"))
            })?;
        }
        if let Some(bind) = lookup(ENV_BIND_ADDRESS) {
            self.server.bind_address = bind;
        }
        if let Some(snapshot) = lookup(ENV_SNAPSHOT) {
            self.snapshot_path = Some(PathBuf::from(snapshot));
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> CursusResult<()> {
        if self.session.encryption_secret.is_empty() {
            return Err(CursusError::config(format!(
                "encryption secret is required (set {ENV_ENCRYPTION_SECRET})"
            )));
        }
        if self.session.cookie_name.is_empty() {
            return Err(CursusError::config("cookie name must not be empty"));
        }
        if self.session.max_age_seconds == 0 {
            return Err(CursusError::config("session max age must be positive"));
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> CursusResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(CursusError::config(format!(
            "{key} must be a boolean, got {other:?}"
        ))),
    }
}
