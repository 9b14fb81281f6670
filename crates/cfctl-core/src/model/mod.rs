// ── Domain model ──
//
// Canonical types handed to the CLI. Built from `cfctl_api` wire types in
// `crate::convert`.

pub mod access_rule;
pub mod dns;
pub mod page_rule;
pub mod scope;
pub mod target;
pub mod user_agent;
pub mod zone;

pub use access_rule::{
    AccessRule, AccessRuleFilter, AccessRuleMode, AccessRulePatch, NewAccessRule, RuleOwner,
};
pub use dns::{DnsRecord, DnsRecordFilter, DnsRecordPatch, NewDnsRecord, TTL_AUTOMATIC};
pub use page_rule::{ActionValue, PageRule, PageRuleAction};
pub use scope::{AccountRef, Scope, ScopeSelection, ZoneRef, ensure_exclusive};
pub use target::{ConfigurationTarget, classify};
pub use user_agent::{UserAgentRule, UserAgentRuleFields};
pub use zone::{Account, IpRanges, OriginCaAlgorithm, User, UserPatch, Zone};
