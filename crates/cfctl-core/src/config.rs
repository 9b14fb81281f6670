// ── Runtime connection configuration ──
//
// These types describe *how* to reach the API. They carry credential
// data and connection tuning, but never touch disk. The CLI builds a
// `ClientConfig` from its profile and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

pub use cfctl_api::DEFAULT_BASE_URL;

/// How to authenticate with the API.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// Scoped API token (preferred).
    ApiToken(SecretString),
    /// Legacy global API key plus the account email.
    ApiKey { key: SecretString, email: String },
}

impl AuthCredentials {
    pub(crate) fn to_api(&self) -> cfctl_api::Credentials {
        match self {
            Self::ApiToken(token) => cfctl_api::Credentials::ApiToken(token.clone()),
            Self::ApiKey { key, email } => cfctl_api::Credentials::ApiKey {
                key: key.clone(),
                email: email.clone(),
            },
        }
    }
}

/// Everything needed to build a [`CloudflareClient`](crate::CloudflareClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base, normally `https://api.cloudflare.com/client/v4/`.
    pub api_url: Url,
    pub auth: AuthCredentials,
    /// Per-request timeout.
    pub timeout: Duration,
}
