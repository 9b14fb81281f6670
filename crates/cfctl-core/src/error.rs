// ── Core error types ──
//
// Errors from cfctl-core. Reconciliation failures keep the original
// `cfctl_api::Error` as their source so callers see the remote's content
// untouched. Everything else goes through `From<cfctl_api::Error>`.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors (no remote call made) ───────────────────────────
    #[error("Invalid scope: {reason}")]
    InvalidScope { reason: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Reconciliation errors ────────────────────────────────────────
    #[error("Searching {kind} failed: {source}")]
    RemoteSearch {
        kind: &'static str,
        #[source]
        source: cfctl_api::Error,
    },

    #[error("Writing {kind}{} failed: {source}", id_suffix(.id.as_deref()))]
    RemoteWrite {
        kind: &'static str,
        /// Resource being updated; `None` for a create.
        id: Option<String>,
        /// Ids already written before the failure.
        applied: Vec<String>,
        #[source]
        source: cfctl_api::Error,
    },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Operation not supported: {operation}")]
    Unsupported { operation: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// Cloudflare error code, e.g. 81057 for a duplicate record.
        code: Option<i64>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

fn id_suffix(id: Option<&str>) -> String {
    id.map(|i| format!(" {i}")).unwrap_or_default()
}

impl CoreError {
    /// The remote error underneath a reconciliation failure, if any.
    pub fn remote_source(&self) -> Option<&cfctl_api::Error> {
        match self {
            Self::RemoteSearch { source, .. } | Self::RemoteWrite { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<cfctl_api::Error> for CoreError {
    fn from(err: cfctl_api::Error) -> Self {
        match err {
            cfctl_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            cfctl_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            cfctl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            cfctl_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            cfctl_api::Error::RateLimited { retry_after_secs } => CoreError::Api {
                message: format!("Rate limited -- retry after {retry_after_secs}s"),
                code: None,
                status: Some(429),
            },
            cfctl_api::Error::Api {
                status: 404,
                message,
                ..
            } => CoreError::NotFound {
                entity_type: "Resource".into(),
                identifier: message,
            },
            cfctl_api::Error::Api {
                status,
                code,
                message,
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
            },
            cfctl_api::Error::MissingResult => {
                CoreError::Internal("response envelope carried no result".into())
            }
            cfctl_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            cfctl_api::Error::UnsupportedOperation(op) => CoreError::Unsupported {
                operation: op.to_string(),
            },
        }
    }
}
