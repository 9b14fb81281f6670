// Shared transport configuration for building the reqwest::Client.
//
// Credentials are injected as sensitive default headers so that every
// request carries them and tracing never prints them.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Public Cloudflare v4 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4/";

/// How requests authenticate against the API.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Scoped API token, sent as `Authorization: Bearer <token>`.
    ApiToken(SecretString),
    /// Legacy global API key, sent as `X-Auth-Key` + `X-Auth-Email`.
    ApiKey { key: SecretString, email: String },
}

impl Credentials {
    fn headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        match self {
            Self::ApiToken(token) => {
                let value = format!("Bearer {}", token.expose_secret());
                headers.insert(AUTHORIZATION, sensitive(&value, "API token")?);
            }
            Self::ApiKey { key, email } => {
                headers.insert("X-Auth-Key", sensitive(key.expose_secret(), "API key")?);
                headers.insert("X-Auth-Email", sensitive(email, "API email")?);
            }
        }
        Ok(headers)
    }
}

fn sensitive(raw: &str, what: &str) -> Result<HeaderValue, Error> {
    let mut value = HeaderValue::from_str(raw).map_err(|e| Error::Authentication {
        message: format!("invalid {what} header value: {e}"),
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("cfctl/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` that authenticates every request.
    pub fn build_client(&self, credentials: &Credentials) -> Result<reqwest::Client, Error> {
        let headers = credentials.headers()?;

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }

    /// Build a client without credentials, for public endpoints.
    pub fn build_anonymous_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(Error::Transport)
    }
}
