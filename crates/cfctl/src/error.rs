//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use cfctl_config::ConfigError;
use cfctl_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const PARTIAL: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to {url}: {reason}")]
    #[diagnostic(
        code(cfctl::connection_failed),
        help(
            "Check network access to the API.\n\
             URL: {url}\n\
             Override the endpoint with --api-url or the profile's api_url."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(cfctl::auth_failed),
        help(
            "Verify that the API token is valid and has the needed permissions.\n\
             Store a new one with: cfctl config set-token"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(cfctl::no_credentials),
        help(
            "Configure credentials with: cfctl config init\n\
             Or set CF_API_TOKEN (or CF_API_KEY and CF_API_EMAIL)."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(cfctl::not_found),
        help("Run: cfctl {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error{}: {message}", .code.map(|c| format!(" ({c})")).unwrap_or_default())]
    #[diagnostic(code(cfctl::api_error))]
    ApiError { code: Option<i64>, message: String },

    #[error("Operation '{operation}' is not supported")]
    #[diagnostic(code(cfctl::unsupported))]
    Unsupported { operation: String },

    // ── Upsert outcomes ──────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(cfctl::upsert_failed),
        help(
            "Re-running is safe: matching resources are updated again and\n\
             nothing is duplicated. Add -v for request details."
        )
    )]
    UpsertFailed { message: String },

    #[error("Updated {updated} of {total} {kind}s; {failed} failed")]
    #[diagnostic(
        code(cfctl::partial_update),
        help(
            "The failed items are listed above. Re-running is safe: matching\n\
             {kind}s are updated again and nothing is duplicated."
        )
    )]
    PartialUpdate {
        kind: &'static str,
        updated: usize,
        failed: usize,
        total: usize,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(cfctl::validation))]
    Validation { field: String, reason: String },

    #[error("Invalid scope: {reason}")]
    #[diagnostic(
        code(cfctl::invalid_scope),
        help("Pass exactly one of --zone or --account.")
    )]
    InvalidScope { reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(cfctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: cfctl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(cfctl::config))]
    Config(ConfigError),

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(cfctl::timeout),
        help("Increase timeout with --timeout.")
    )]
    Timeout { seconds: u64 },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::PartialUpdate { .. } => exit_code::PARTIAL,
            Self::Validation { .. } | Self::InvalidScope { .. } => exit_code::USAGE,
            Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            other => CliError::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidScope { reason } => CliError::InvalidScope { reason },

            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            err @ (CoreError::RemoteSearch { .. } | CoreError::RemoteWrite { .. }) => {
                let mut message = err.to_string();
                if let Some(code) = err
                    .remote_source()
                    .and_then(cfctl_core::ApiError::api_error_code)
                {
                    message.push_str(&format!(" (code {code})"));
                }
                let applied = match &err {
                    CoreError::RemoteWrite { applied, .. } => applied.as_slice(),
                    _ => &[],
                };
                if !applied.is_empty() {
                    message.push_str(&format!("; already updated: {}", applied.join(", ")));
                }
                CliError::UpsertFailed { message }
            }

            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: list_command_for(&entity_type).into(),
                resource_type: entity_type,
                identifier,
            },

            CoreError::Unsupported { operation } => CliError::Unsupported { operation },

            CoreError::Api { message, code, .. } => CliError::ApiError { code, message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError {
                code: None,
                message,
            },
        }
    }
}

fn list_command_for(entity_type: &str) -> &'static str {
    match entity_type {
        "Zone" => "zones list",
        "DNS record" => "dns list --zone <zone>",
        "access rule" => "firewall rules list",
        _ => "--help",
    }
}
