// Wire types for the Cloudflare v4 API.
//
// Every response is wrapped in the same envelope:
// `{ success, errors, messages, result, result_info }`.
// Field names follow the API's snake_case except where noted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Envelope ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    #[serde(default)]
    pub messages: Vec<ApiMessage>,
    pub result: Option<T>,
    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

/// Error-only view of the envelope, used for non-2xx bodies whose
/// `result` may not match the expected type.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
}

/// One entry of the envelope's `errors` / `messages` arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default = "first_page")]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number this page was fetched as.
    pub page: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

impl<T> Page<T> {
    pub(crate) fn from_parts(items: Vec<T>, requested: u32, info: Option<ResultInfo>) -> Self {
        match info {
            Some(info) => Self {
                items,
                page: requested,
                total_pages: info.total_pages,
                total_count: info.total_count,
            },
            None => {
                let total_count = u64::try_from(items.len()).unwrap_or(u64::MAX);
                Self {
                    items,
                    page: requested,
                    total_pages: requested,
                    total_count,
                }
            }
        }
    }

    /// Whether the remote reports pages beyond this one.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Convert the items while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total_count: self.total_count,
        }
    }
}

/// Body of `DELETE` responses: just the removed id.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DeletedResponse {
    pub id: String,
}

// ── Zones & accounts ─────────────────────────────────────────────────

/// Zone, from `GET /zones`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub paused: bool,
    #[serde(rename = "type", default)]
    pub zone_type: Option<String>,
    #[serde(default)]
    pub plan: Option<ZonePlan>,
    #[serde(default)]
    pub name_servers: Vec<String>,
    #[serde(default)]
    pub vanity_name_servers: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonePlan {
    #[serde(default)]
    pub name: String,
}

/// Account, from `GET /accounts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub name: String,
}

/// Body for `POST /zones`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateZoneBody {
    pub name: String,
    #[serde(rename = "type")]
    pub zone_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountIdRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountIdRef {
    pub id: String,
}

// ── User & edge IPs ──────────────────────────────────────────────────

/// Authenticated user, from `GET /user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub two_factor_authentication_enabled: bool,
}

/// Edge address ranges, from `GET /ips`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpRangesResponse {
    #[serde(default)]
    pub ipv4_cidrs: Vec<String>,
    #[serde(default)]
    pub ipv6_cidrs: Vec<String>,
}

/// Body for `PATCH /user`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditUserBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
}

/// Origin CA root, from `GET /cert_req?certificate_chain_type=<ecc|rsa>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginCaRootResponse {
    #[serde(default)]
    pub certificate: String,
}

// ── DNS records ──────────────────────────────────────────────────────

/// DNS record, from `GET /zones/{zone_id}/dns_records`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecordResponse {
    pub id: String,
    #[serde(default)]
    pub zone_id: Option<String>,
    #[serde(default)]
    pub zone_name: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub proxied: bool,
    #[serde(default)]
    pub proxiable: bool,
    #[serde(default)]
    pub priority: Option<u16>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified_on: Option<DateTime<Utc>>,
}

/// Filters for listing DNS records. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsRecordQuery {
    /// Exact, fully qualified name.
    pub name: Option<String>,
    pub name_contains: Option<String>,
    pub record_type: Option<String>,
    pub content_contains: Option<String>,
}

impl DnsRecordQuery {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref name) = self.name {
            params.push(("name", name.clone()));
        }
        if let Some(ref name) = self.name_contains {
            params.push(("name.contains", name.clone()));
        }
        if let Some(ref ty) = self.record_type {
            params.push(("type", ty.clone()));
        }
        if let Some(ref content) = self.content_contains {
            params.push(("content.contains", content.clone()));
        }
        if !params.is_empty() {
            params.push(("match", "all".to_owned()));
        }
        params
    }
}

/// Body for `POST /zones/{zone_id}/dns_records`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateDnsRecordBody {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

/// Body for `PATCH /zones/{zone_id}/dns_records/{id}`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditDnsRecordBody {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

// ── IP access rules ──────────────────────────────────────────────────

/// The `{target, value}` pair an access rule matches on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfiguration {
    pub target: String,
    pub value: String,
}

/// Where a rule lives, as reported by the remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleScope {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub scope_type: String,
}

/// Access rule, from `GET /{zones|accounts}/{id}/firewall/access_rules/rules`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessRuleResponse {
    pub id: String,
    pub configuration: RuleConfiguration,
    pub mode: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub scope: Option<RuleScope>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified_on: Option<DateTime<Utc>>,
}

/// Filters for listing access rules. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRuleQuery {
    pub target: Option<String>,
    pub value: Option<String>,
    pub mode: Option<String>,
    pub notes: Option<String>,
}

impl AccessRuleQuery {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref target) = self.target {
            params.push(("configuration.target", target.clone()));
        }
        if let Some(ref value) = self.value {
            params.push(("configuration.value", value.clone()));
        }
        if let Some(ref mode) = self.mode {
            params.push(("mode", mode.clone()));
        }
        if let Some(ref notes) = self.notes {
            params.push(("notes", notes.clone()));
        }
        params
    }
}

/// Body for `POST .../firewall/access_rules/rules`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAccessRuleBody {
    pub mode: String,
    pub configuration: RuleConfiguration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for `PATCH .../firewall/access_rules/rules/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditAccessRuleBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ── User-Agent blocking rules ────────────────────────────────────────

/// Always `{"target": "ua", "value": <user agent>}` for these rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UaConfiguration {
    pub target: String,
    pub value: String,
}

impl UaConfiguration {
    pub fn user_agent(value: impl Into<String>) -> Self {
        Self {
            target: "ua".into(),
            value: value.into(),
        }
    }
}

/// User-Agent rule, from `GET /zones/{zone_id}/firewall/ua_rules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UaRuleResponse {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub mode: String,
    pub configuration: UaConfiguration,
    #[serde(default)]
    pub paused: bool,
}

/// Body for both `POST` and `PUT` on `.../firewall/ua_rules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UaRuleBody {
    pub mode: String,
    pub configuration: UaConfiguration,
    pub paused: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ── Page rules ───────────────────────────────────────────────────────

/// Page rule, from `GET /zones/{zone_id}/pagerules`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRuleResponse {
    pub id: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub targets: Vec<PageRuleTarget>,
    #[serde(default)]
    pub actions: Vec<PageRuleActionResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRuleTarget {
    #[serde(default)]
    pub target: String,
    pub constraint: PageRuleConstraint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRuleConstraint {
    #[serde(default)]
    pub operator: String,
    pub value: String,
}

/// A setting applied by a page rule. `value` varies per action id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRuleActionResponse {
    pub id: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// URL prefix of a scoped access-rule collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopePath<'a> {
    Zone(&'a str),
    Account(&'a str),
}

impl ScopePath<'_> {
    pub(crate) fn prefix(self) -> String {
        match self {
            Self::Zone(id) => format!("zones/{id}"),
            Self::Account(id) => format!("accounts/{id}"),
        }
    }
}
