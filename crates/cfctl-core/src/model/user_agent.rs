// ── User-Agent blocking rule domain types ──

use serde::{Deserialize, Serialize};

use super::access_rule::AccessRuleMode;

/// Zone rule matching one exact `User-Agent` header value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgentRule {
    pub id: String,
    pub description: String,
    pub mode: AccessRuleMode,
    pub user_agent: String,
    pub paused: bool,
}

/// Full rule contents for create and replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentRuleFields {
    pub mode: AccessRuleMode,
    pub user_agent: String,
    pub paused: bool,
    pub description: Option<String>,
}
