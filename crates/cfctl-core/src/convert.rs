// ── API-to-domain type conversions ──
//
// Bridges raw `cfctl_api` wire types and `cfctl_core::model` domain types
// in both directions. Responses become domain types; filters, new
// resources and patches become query params and request bodies.

use cfctl_api::types::{
    AccessRuleQuery, AccessRuleResponse, AccountResponse, CreateAccessRuleBody,
    CreateDnsRecordBody, DnsRecordQuery, DnsRecordResponse, EditAccessRuleBody,
    EditDnsRecordBody, EditUserBody, IpRangesResponse, PageRuleActionResponse, PageRuleResponse,
    RuleConfiguration, UaConfiguration, UaRuleBody, UaRuleResponse, UserResponse, ZoneResponse,
};
use serde_json::{Map, Value};

use crate::model::{
    AccessRule, AccessRuleFilter, AccessRuleMode, AccessRulePatch, Account, ActionValue,
    ConfigurationTarget, DnsRecord, DnsRecordFilter, DnsRecordPatch, IpRanges, NewAccessRule,
    NewDnsRecord, PageRule, PageRuleAction, RuleOwner, User, UserAgentRule, UserAgentRuleFields,
    UserPatch, Zone,
};

// ── Responses → domain ──────────────────────────────────────────────

impl From<ZoneResponse> for Zone {
    fn from(z: ZoneResponse) -> Self {
        let name_servers = match z.vanity_name_servers {
            Some(vanity) if !vanity.is_empty() => vanity,
            _ => z.name_servers,
        };
        Self {
            id: z.id,
            name: z.name,
            status: z.status,
            plan: z.plan.map(|p| p.name).unwrap_or_default(),
            paused: z.paused,
            zone_type: z.zone_type,
            name_servers,
        }
    }
}

impl From<AccountResponse> for Account {
    fn from(a: AccountResponse) -> Self {
        Self {
            id: a.id,
            name: a.name,
        }
    }
}

impl From<UserResponse> for User {
    fn from(u: UserResponse) -> Self {
        let name = [u.first_name.as_deref(), u.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_owned();
        Self {
            id: u.id,
            email: u.email,
            username: u.username,
            name,
            two_factor: u.two_factor_authentication_enabled,
        }
    }
}

impl From<IpRangesResponse> for IpRanges {
    fn from(r: IpRangesResponse) -> Self {
        Self {
            ipv4: r.ipv4_cidrs,
            ipv6: r.ipv6_cidrs,
        }
    }
}

impl From<DnsRecordResponse> for DnsRecord {
    fn from(r: DnsRecordResponse) -> Self {
        Self {
            id: r.id,
            zone_id: r.zone_id,
            zone_name: r.zone_name,
            name: r.name,
            record_type: r.record_type,
            content: r.content,
            ttl: r.ttl,
            proxied: r.proxied,
            proxiable: r.proxiable,
            priority: r.priority,
            modified_on: r.modified_on,
        }
    }
}

fn parse_mode(kind: &str, id: &str, mode: &str) -> Result<AccessRuleMode, cfctl_api::Error> {
    mode.parse::<AccessRuleMode>()
        .map_err(|e| cfctl_api::Error::Deserialization {
            message: format!("{kind} {id} has unknown mode {mode:?}: {e}"),
            body: mode.to_owned(),
        })
}

impl TryFrom<AccessRuleResponse> for AccessRule {
    type Error = cfctl_api::Error;

    fn try_from(r: AccessRuleResponse) -> Result<Self, Self::Error> {
        let mode = parse_mode("access rule", &r.id, &r.mode)?;
        Ok(Self {
            configuration: ConfigurationTarget::from_wire(
                &r.configuration.target,
                &r.configuration.value,
            ),
            id: r.id,
            mode,
            notes: r.notes,
            owner: r.scope.map(|s| RuleOwner {
                id: s.id,
                scope_type: s.scope_type,
            }),
            modified_on: r.modified_on,
        })
    }
}

impl TryFrom<UaRuleResponse> for UserAgentRule {
    type Error = cfctl_api::Error;

    fn try_from(r: UaRuleResponse) -> Result<Self, Self::Error> {
        let mode = parse_mode("User-Agent rule", &r.id, &r.mode)?;
        Ok(Self {
            id: r.id,
            description: r.description,
            mode,
            user_agent: r.configuration.value,
            paused: r.paused,
        })
    }
}

impl From<PageRuleResponse> for PageRule {
    fn from(r: PageRuleResponse) -> Self {
        Self {
            url_pattern: r.targets.into_iter().next().map(|t| t.constraint.value),
            id: r.id,
            priority: r.priority,
            status: r.status,
            actions: r.actions.into_iter().map(PageRuleAction::from).collect(),
        }
    }
}

impl From<PageRuleActionResponse> for PageRuleAction {
    fn from(a: PageRuleActionResponse) -> Self {
        let value = match a.value {
            None | Some(Value::Null) => ActionValue::None,
            Some(Value::String(s)) => ActionValue::Text(s),
            Some(Value::Number(n)) => ActionValue::Number(n),
            Some(Value::Object(map)) => {
                forward(&map).unwrap_or_else(|| ActionValue::Json(Value::Object(map)))
            }
            Some(other) => ActionValue::Json(other),
        };
        Self { id: a.id, value }
    }
}

/// `{"url": .., "status_code": ..}`, the shape of `forwarding_url` values.
fn forward(map: &Map<String, Value>) -> Option<ActionValue> {
    let url = map.get("url")?.as_str()?;
    let status_code = map.get("status_code")?.as_u64()?;
    Some(ActionValue::Forward {
        status_code: u16::try_from(status_code).ok()?,
        url: url.to_owned(),
    })
}

// ── Domain → requests ───────────────────────────────────────────────

impl From<&UserAgentRuleFields> for UaRuleBody {
    fn from(f: &UserAgentRuleFields) -> Self {
        Self {
            mode: f.mode.to_string(),
            configuration: UaConfiguration::user_agent(f.user_agent.clone()),
            paused: f.paused,
            description: f.description.clone(),
        }
    }
}

impl From<&UserPatch> for EditUserBody {
    fn from(p: &UserPatch) -> Self {
        Self {
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            telephone: p.telephone.clone(),
            country: p.country.clone(),
            zipcode: p.zipcode.clone(),
        }
    }
}

impl From<&DnsRecordFilter> for DnsRecordQuery {
    fn from(f: &DnsRecordFilter) -> Self {
        Self {
            name: f.name.clone(),
            name_contains: f.name_contains.clone(),
            record_type: f.record_type.clone(),
            content_contains: f.content_contains.clone(),
        }
    }
}

impl From<&NewDnsRecord> for CreateDnsRecordBody {
    fn from(r: &NewDnsRecord) -> Self {
        Self {
            record_type: r.record_type.clone(),
            name: r.name.clone(),
            content: r.content.clone(),
            ttl: r.ttl,
            proxied: r.proxied,
            priority: r.priority,
        }
    }
}

impl From<&DnsRecordPatch> for EditDnsRecordBody {
    fn from(p: &DnsRecordPatch) -> Self {
        Self {
            record_type: p.record_type.clone(),
            name: p.name.clone(),
            content: p.content.clone(),
            ttl: p.ttl,
            proxied: p.proxied,
            priority: p.priority,
        }
    }
}

impl From<&AccessRuleFilter> for AccessRuleQuery {
    fn from(f: &AccessRuleFilter) -> Self {
        Self {
            target: f.configuration.as_ref().map(|c| c.target().to_owned()),
            value: f.configuration.as_ref().map(|c| c.value().to_owned()),
            mode: f.mode.map(|m| m.to_string()),
            notes: f.notes.clone(),
        }
    }
}

impl From<&NewAccessRule> for CreateAccessRuleBody {
    fn from(r: &NewAccessRule) -> Self {
        Self {
            mode: r.mode.to_string(),
            configuration: RuleConfiguration {
                target: r.configuration.target().to_owned(),
                value: r.configuration.value().to_owned(),
            },
            notes: r.notes.clone(),
        }
    }
}

impl From<&AccessRulePatch> for EditAccessRuleBody {
    fn from(p: &AccessRulePatch) -> Self {
        Self {
            mode: p.mode.map(|m| m.to_string()),
            notes: p.notes.clone(),
        }
    }
}
