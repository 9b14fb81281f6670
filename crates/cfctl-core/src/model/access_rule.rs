// ── IP access rule domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::target::ConfigurationTarget;

/// Action applied to traffic matching a rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AccessRuleMode {
    Block,
    Challenge,
    Whitelist,
    JsChallenge,
    ManagedChallenge,
}

/// Scope as reported by the remote on each rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOwner {
    pub id: String,
    pub scope_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessRule {
    pub id: String,
    pub configuration: ConfigurationTarget,
    pub mode: AccessRuleMode,
    pub notes: String,
    pub owner: Option<RuleOwner>,
    pub modified_on: Option<DateTime<Utc>>,
}

/// Search filter within one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRuleFilter {
    pub configuration: Option<ConfigurationTarget>,
    pub mode: Option<AccessRuleMode>,
    pub notes: Option<String>,
}

/// Fields for creating a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccessRule {
    pub configuration: ConfigurationTarget,
    pub mode: AccessRuleMode,
    pub notes: Option<String>,
}

/// Partial update; `None` leaves the remote value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRulePatch {
    pub mode: Option<AccessRuleMode>,
    pub notes: Option<String>,
}
