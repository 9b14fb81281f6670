//! CLI configuration: thin wrapper around `cfctl_config` shared types.
//!
//! Adds the resolution that respects `GlobalOpts` flag overrides
//! (--api-url, --api-token, --timeout, ...).

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use cfctl_core::{AuthCredentials, ClientConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use cfctl_config::{
    Config, Profile, SecretKind, config_path, load_config_or_default, save_config, store_secret,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

pub fn profile_not_found(name: String, config: &Config) -> CliError {
    let mut available: Vec<_> = config.profiles.keys().cloned().collect();
    available.sort();
    CliError::ProfileNotFound {
        name,
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}

/// Credentials given directly on the command line.
fn flag_credentials(global: &GlobalOpts) -> Option<AuthCredentials> {
    if let Some(ref token) = global.api_token {
        return Some(AuthCredentials::ApiToken(SecretString::from(token.clone())));
    }
    match (&global.api_key, &global.api_email) {
        (Some(key), Some(email)) => Some(AuthCredentials::ApiKey {
            key: SecretString::from(key.clone()),
            email: email.clone(),
        }),
        _ => None,
    }
}

/// API URL and timeout: flag > profile > config defaults.
pub fn resolve_endpoint(global: &GlobalOpts) -> Result<(Url, Duration), CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    let api_url = cfctl_config::parse_api_url(
        global
            .api_url
            .as_deref()
            .or_else(|| profile.and_then(|p| p.api_url.as_deref())),
    )?;
    let timeout = global
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(cfg.defaults.timeout);

    Ok((api_url, Duration::from_secs(timeout)))
}

/// Build a `ClientConfig` from the config file, profile, and CLI overrides.
///
/// Credential order: command-line flag, then the profile's chain (named
/// env var, keyring, plaintext). Without a profile, `CF_API_TOKEN` or
/// `CF_API_KEY` + `CF_API_EMAIL` are used.
pub fn build_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let (api_url, timeout) = resolve_endpoint(global)?;

    let auth = if let Some(auth) = flag_credentials(global) {
        auth
    } else if let Some(profile) = cfg.profiles.get(&profile_name) {
        cfctl_config::resolve_auth(profile, &profile_name)?
    } else if global.profile.is_some() {
        return Err(profile_not_found(profile_name, &cfg));
    } else {
        cfctl_config::env_auth().ok_or(CliError::NoCredentials {
            profile: profile_name,
        })?
    };

    Ok(ClientConfig {
        api_url,
        auth,
        timeout,
    })
}
