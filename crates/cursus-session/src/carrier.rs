//! Session cookie carrier

use cookie::time::Duration;
use cookie::{Cookie, SameSite};
use cursus_core::{CursusError, CursusResult, SessionConfig};
use cursus_crypto::{CipherKey, TokenCipher};
use http::header::COOKIE;
use http::HeaderMap;
use std::fmt;

/// Issues, revokes and reads the sealed session cookie
#[derive(Clone)]
pub struct SessionCarrier {
    cipher: TokenCipher,
    cookie_name: String,
    secure: bool,
    domain: Option<String>,
    default_max_age: u64,
}

impl SessionCarrier {
    /// Create a carrier using `cipher` and the cookie attributes in `config`
    pub fn new(cipher: TokenCipher, config: &SessionConfig) -> Self {
        Self {
            cipher,
            cookie_name: config.cookie_name.clone(),
            secure: config.cookie_secure,
            domain: config.cookie_domain.clone(),
            default_max_age: config.max_age_seconds,
        }
    }

    /// Create a carrier keyed from the configured encryption secret
    pub fn from_config(config: &SessionConfig) -> CursusResult<Self> {
        if config.encryption_secret.is_empty() {
            return Err(CursusError::config("session encryption secret is empty"));
        }
        let key = CipherKey::from_config_secret(&config.encryption_secret);
        Ok(Self::new(TokenCipher::new(&key), config))
    }

    /// Name of the session cookie
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Lifetime used when the caller does not pick one
    pub fn default_max_age(&self) -> u64 {
        self.default_max_age
    }

    /// Seal `raw_token` into a session cookie living `max_age_seconds`
    pub fn issue(&self, raw_token: &str, max_age_seconds: u64) -> CursusResult<Cookie<'static>> {
        if max_age_seconds == 0 {
            return Err(CursusError::invalid("session lifetime must be positive"));
        }
        let seconds = i64::try_from(max_age_seconds)
            .map_err(|_| CursusError::invalid("session lifetime out of range"))?;
        let sealed = self.cipher.seal(raw_token)?;
        Ok(self.build(sealed, Duration::seconds(seconds)))
    }

    /// Seal `raw_token` with the configured default lifetime
    pub fn issue_default(&self, raw_token: &str) -> CursusResult<Cookie<'static>> {
        self.issue(raw_token, self.default_max_age)
    }

    /// Cookie that clears the session: empty value, zero lifetime
    pub fn revoke(&self) -> Cookie<'static> {
        self.build(String::new(), Duration::ZERO)
    }

    /// Raw token from the cookie named `cookie_name`, if present and intact
    pub fn read(&self, headers: &HeaderMap, cookie_name: &str) -> Option<String> {
        let sealed = find_cookie(headers, cookie_name)?;
        match self.cipher.open(&sealed) {
            Ok(token) => Some(token),
            Err(_) => {
                tracing::debug!(cookie = cookie_name, "session cookie could not be opened");
                None
            }
        }
    }

    /// Raw token from the configured session cookie
    pub fn read_session(&self, headers: &HeaderMap) -> Option<String> {
        self.read(headers, &self.cookie_name)
    }

    fn build(&self, value: String, max_age: Duration) -> Cookie<'static> {
        let mut builder = Cookie::build((self.cookie_name.clone(), value))
            .http_only(true)
            .same_site(SameSite::Strict)
            .path("/")
            .secure(self.secure)
            .max_age(max_age);
        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        builder.build()
    }
}

impl fmt::Debug for SessionCarrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCarrier")
            .field("cookie_name", &self.cookie_name)
            .field("secure", &self.secure)
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}

/// Value of the first cookie named `name` across all `Cookie` headers
fn find_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}
