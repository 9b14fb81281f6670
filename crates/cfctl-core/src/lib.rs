//! Domain layer between `cfctl-api` and the `cfctl` binary.
//!
//! - **[`CloudflareClient`]** wraps the raw HTTP client with domain types,
//!   zone/account name resolution and scope selection.
//!
//! - **Target classification** ([`classify`]) turns a free-form operator
//!   value into an IP, CIDR range, ASN or country
//!   [`ConfigurationTarget`].
//!
//! - **Upsert reconcilers** ([`upsert_dns_record`], [`upsert_access_rule`])
//!   search a scope exhaustively, then either create one resource or update
//!   every match. They depend only on the [`ResourceCollection`] seam, so
//!   they run unchanged against the live API or an in-memory collection.

pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod remote;
pub mod upsert;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cfctl_api::Error as ApiError;
pub use client::CloudflareClient;
pub use config::{AuthCredentials, ClientConfig, DEFAULT_BASE_URL};
pub use error::CoreError;
pub use remote::{AccessRules, DnsRecords, ManagedResource, Pager, ResourceCollection, ResourceKind};
pub use upsert::{
    AccessRuleOverrides, DnsIdentity, DnsRecordFields, Impact, UpdateFailure, UpsertAction,
    UpsertOutcome, upsert_access_rule, upsert_dns_record,
};

// ── Model re-exports ────────────────────────────────────────────────
pub use model::{
    AccessRule, AccessRuleFilter, AccessRuleMode, AccessRulePatch, Account, AccountRef,
    ActionValue, ConfigurationTarget, DnsRecord, DnsRecordFilter, DnsRecordPatch, IpRanges,
    NewAccessRule, NewDnsRecord, OriginCaAlgorithm, PageRule, PageRuleAction, RuleOwner, Scope,
    ScopeSelection, TTL_AUTOMATIC, User, UserAgentRule, UserAgentRuleFields, UserPatch, Zone,
    ZoneRef, classify, ensure_exclusive,
};
