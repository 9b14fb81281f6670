//! Shared configuration for the `cfctl` binary.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and the pieces of `cfctl_core::ClientConfig` they resolve to. The CLI
//! layers its `GlobalOpts` flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use cfctl_core::{AuthCredentials, DEFAULT_BASE_URL};

/// Keyring service name under which secrets are stored.
pub const KEYRING_SERVICE: &str = "cfctl";

/// Environment variables honored when no profile is configured.
pub const ENV_API_TOKEN: &str = "CF_API_TOKEN";
pub const ENV_API_KEY: &str = "CF_API_KEY";
pub const ENV_API_EMAIL: &str = "CF_API_EMAIL";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("keyring access failed: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named set of connection settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// API base URL; the public Cloudflare endpoint when unset.
    pub api_url: Option<String>,

    /// Auth mode: "token" (API token) or "key" (global API key + email).
    #[serde(default = "default_auth_mode")]
    pub auth_mode: String,

    /// API token (plaintext, prefer keyring or env var).
    pub api_token: Option<String>,

    /// Environment variable name containing the API token.
    pub api_token_env: Option<String>,

    /// Global API key (plaintext, prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the global API key.
    pub api_key_env: Option<String>,

    /// Account email paired with the global API key.
    pub api_email: Option<String>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

fn default_auth_mode() -> String {
    "token".into()
}

/// Which secret a keyring entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    ApiToken,
    ApiKey,
}

impl SecretKind {
    /// The secret a profile's auth mode needs.
    pub fn for_auth_mode(mode: &str) -> Result<Self, ConfigError> {
        match mode {
            "token" => Ok(Self::ApiToken),
            "key" => Ok(Self::ApiKey),
            other => Err(invalid_auth_mode(other)),
        }
    }

    fn keyring_user(self, profile_name: &str) -> String {
        match self {
            Self::ApiToken => format!("{profile_name}/api-token"),
            Self::ApiKey => format!("{profile_name}/api-key"),
        }
    }
}

fn invalid_auth_mode(got: &str) -> ConfigError {
    ConfigError::Validation {
        field: "auth_mode".into(),
        reason: format!("expected 'token' or 'key', got '{got}'"),
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "cfctl", "cfctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("cfctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. `CFCTL_` variables override file values,
/// with `__` separating nested keys (`CFCTL_DEFAULTS__OUTPUT=json`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CFCTL_").split("__"));

    let config: Config = figment.extract()?;
    debug!(path = %path.display(), profiles = config.profiles.len(), "loaded config");
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Keyring ─────────────────────────────────────────────────────────

fn keyring_secret(kind: SecretKind, profile_name: &str) -> Option<SecretString> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &kind.keyring_user(profile_name)).ok()?;
    entry.get_password().ok().map(SecretString::from)
}

/// Store a secret for `profile_name` in the system keyring.
pub fn store_secret(kind: SecretKind, profile_name: &str, secret: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &kind.keyring_user(profile_name))?;
    entry.set_password(secret)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// One secret through the chain: named env var, keyring, plaintext.
fn resolve_secret(
    kind: SecretKind,
    env_name: Option<&str>,
    plaintext: Option<&str>,
    profile_name: &str,
    env: &impl Fn(&str) -> Option<String>,
) -> Option<SecretString> {
    // 1. Env var named by the profile
    if let Some(val) = env_name.and_then(env) {
        return Some(SecretString::from(val));
    }

    // 2. System keyring
    if let Some(secret) = keyring_secret(kind, profile_name) {
        return Some(secret);
    }

    // 3. Plaintext in config
    plaintext.map(SecretString::from)
}

/// Resolve `AuthCredentials` from a profile's `auth_mode` field.
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Result<AuthCredentials, ConfigError> {
    resolve_auth_with(profile, profile_name, &process_env)
}

fn resolve_auth_with(
    profile: &Profile,
    profile_name: &str,
    env: &impl Fn(&str) -> Option<String>,
) -> Result<AuthCredentials, ConfigError> {
    let no_credentials = || ConfigError::NoCredentials {
        profile: profile_name.into(),
    };

    match SecretKind::for_auth_mode(&profile.auth_mode)? {
        SecretKind::ApiToken => resolve_secret(
            SecretKind::ApiToken,
            profile.api_token_env.as_deref(),
            profile.api_token.as_deref(),
            profile_name,
            env,
        )
        .map(AuthCredentials::ApiToken)
        .ok_or_else(no_credentials),
        SecretKind::ApiKey => {
            let email = profile
                .api_email
                .clone()
                .or_else(|| env(ENV_API_EMAIL))
                .ok_or_else(|| ConfigError::Validation {
                    field: "api_email".into(),
                    reason: format!("profile '{profile_name}' uses key auth but has no email"),
                })?;
            let key = resolve_secret(
                SecretKind::ApiKey,
                profile.api_key_env.as_deref(),
                profile.api_key.as_deref(),
                profile_name,
                env,
            )
            .ok_or_else(no_credentials)?;
            Ok(AuthCredentials::ApiKey { key, email })
        }
    }
}

/// Credentials from `CF_API_TOKEN`, or `CF_API_KEY` + `CF_API_EMAIL`,
/// for running without any profile.
pub fn env_auth() -> Option<AuthCredentials> {
    env_auth_with(&process_env)
}

fn env_auth_with(env: &impl Fn(&str) -> Option<String>) -> Option<AuthCredentials> {
    if let Some(token) = env(ENV_API_TOKEN) {
        return Some(AuthCredentials::ApiToken(SecretString::from(token)));
    }
    match (env(ENV_API_KEY), env(ENV_API_EMAIL)) {
        (Some(key), Some(email)) => Some(AuthCredentials::ApiKey {
            key: SecretString::from(key),
            email,
        }),
        _ => None,
    }
}

/// Parse an API base URL, defaulting to the public endpoint.
pub fn parse_api_url(raw: Option<&str>) -> Result<Url, ConfigError> {
    let raw = raw.unwrap_or(DEFAULT_BASE_URL);
    raw.parse().map_err(|_| ConfigError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {raw}"),
    })
}
