// ── Page rule domain types ──

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRule {
    pub id: String,
    pub priority: i64,
    pub status: String,
    /// Constraint of the first target, when the rule has one.
    pub url_pattern: Option<String>,
    pub actions: Vec<PageRuleAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRuleAction {
    /// Setting name, e.g. `cache_level` or `forwarding_url`.
    pub id: String,
    pub value: ActionValue,
}

/// Decoded action value. Shapes the CLI has no special rendering for are
/// kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ActionValue {
    /// On/off style actions that carry no value.
    None,
    Forward { status_code: u16, url: String },
    Text(String),
    Number(serde_json::Number),
    Json(serde_json::Value),
}
