//! Shared helpers for command handlers.

use cfctl_core::AccessRuleMode;

use crate::cli::RuleMode;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

pub fn rule_mode(mode: RuleMode) -> AccessRuleMode {
    match mode {
        RuleMode::Block => AccessRuleMode::Block,
        RuleMode::Challenge => AccessRuleMode::Challenge,
        RuleMode::Whitelist => AccessRuleMode::Whitelist,
        RuleMode::JsChallenge => AccessRuleMode::JsChallenge,
        RuleMode::ManagedChallenge => AccessRuleMode::ManagedChallenge,
    }
}

/// Status line on stderr, suppressed by `--quiet`.
pub fn note(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{message}");
    }
}
