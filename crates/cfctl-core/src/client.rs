// ── Cloudflare client facade ──
//
// Wraps `cfctl_api::ApiClient` with domain types. Implements the
// `ResourceCollection` seam for the reconcilers and offers the plain
// list/get/create/update/delete calls the CLI uses directly.

use tracing::{debug, warn};
use url::Url;

use cfctl_api::types::{AccountIdRef, CreateZoneBody};
use cfctl_api::{
    ACCESS_RULES_PER_PAGE, ApiClient, DNS_RECORDS_PER_PAGE, Page, TransportConfig,
    UA_RULES_PER_PAGE, ZONES_PER_PAGE,
};

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{
    AccessRule, AccessRuleFilter, AccessRulePatch, Account, AccountRef, DnsRecord,
    DnsRecordFilter, DnsRecordPatch, IpRanges, NewAccessRule, NewDnsRecord, OriginCaAlgorithm,
    PageRule, Scope, ScopeSelection, User, UserAgentRule, UserAgentRuleFields, UserPatch, Zone,
    ZoneRef, ensure_exclusive,
};
use crate::remote::{AccessRules, DnsRecords, Pager, ResourceCollection};

/// Domain-level handle on the Cloudflare API.
#[derive(Debug, Clone)]
pub struct CloudflareClient {
    api: ApiClient,
}

fn transport(timeout: std::time::Duration) -> TransportConfig {
    TransportConfig {
        timeout,
        ..TransportConfig::default()
    }
}

impl CloudflareClient {
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        let api = ApiClient::new(
            config.api_url.as_str(),
            &config.auth.to_api(),
            &transport(config.timeout),
        )?;
        Ok(Self { api })
    }

    /// Client without credentials, for public endpoints such as `/ips`.
    pub fn anonymous(api_url: &Url, timeout: std::time::Duration) -> Result<Self, CoreError> {
        let api = ApiClient::anonymous(api_url.as_str(), &transport(timeout))?;
        Ok(Self { api })
    }

    pub fn from_api(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    // ── Zones ────────────────────────────────────────────────────────

    pub async fn list_zones(&self) -> Result<Vec<Zone>, CoreError> {
        let zones = self
            .api
            .paginate_all(|page| self.api.list_zones(None, page, ZONES_PER_PAGE))
            .await?;
        Ok(zones.into_iter().map(Zone::from).collect())
    }

    /// Every zone with exactly this name (normally one).
    pub async fn zone_info(&self, name: &str) -> Result<Vec<Zone>, CoreError> {
        let zones = self
            .api
            .paginate_all(|page| self.api.list_zones(Some(name), page, ZONES_PER_PAGE))
            .await?;
        Ok(zones.into_iter().map(Zone::from).collect())
    }

    /// Resolve a zone name to its id from the first page of matches.
    pub async fn zone_by_name(&self, name: &str) -> Result<ZoneRef, CoreError> {
        let page = self.api.list_zones(Some(name), 1, ZONES_PER_PAGE).await?;
        let zone = page
            .items
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "Zone".into(),
                identifier: name.to_owned(),
            })?;
        debug!(zone = %zone.name, id = %zone.id, "resolved zone");
        Ok(ZoneRef {
            id: zone.id,
            name: zone.name,
        })
    }

    pub async fn create_zone(&self, name: &str, account: Option<&AccountRef>) -> Result<Zone, CoreError> {
        let body = CreateZoneBody {
            name: name.to_owned(),
            zone_type: "full".into(),
            account: account.map(|a| AccountIdRef { id: a.id.clone() }),
        };
        Ok(self.api.create_zone(&body).await?.into())
    }

    pub async fn delete_zone(&self, zone: &ZoneRef) -> Result<String, CoreError> {
        Ok(self.api.delete_zone(&zone.id).await?)
    }

    // ── Accounts ─────────────────────────────────────────────────────

    pub async fn list_accounts(&self) -> Result<Vec<Account>, CoreError> {
        let accounts = self
            .api
            .paginate_all(|page| self.api.list_accounts(page, ZONES_PER_PAGE))
            .await?;
        Ok(accounts.into_iter().map(Account::from).collect())
    }

    /// Map an account name to its id. When the listing fails or no
    /// account has that name, the argument is used as the id.
    pub async fn resolve_account(&self, name_or_id: &str) -> AccountRef {
        match self.list_accounts().await {
            Ok(accounts) => {
                if let Some(account) = accounts.into_iter().find(|a| a.name == name_or_id) {
                    debug!(account = %account.name, id = %account.id, "resolved account");
                    return AccountRef { id: account.id };
                }
            }
            Err(e) => {
                warn!(error = %e, "could not list accounts, treating {name_or_id:?} as an id");
            }
        }
        AccountRef {
            id: name_or_id.to_owned(),
        }
    }

    /// Turn CLI-level zone/account names into a scope selection.
    ///
    /// Exclusivity is checked before any name lookup.
    pub async fn select_scope(
        &self,
        zone: Option<&str>,
        account: Option<&str>,
    ) -> Result<ScopeSelection, CoreError> {
        ensure_exclusive(zone.is_some(), account.is_some())?;
        let zone = match zone {
            Some(name) => Some(self.zone_by_name(name).await?),
            None => None,
        };
        let account = match account {
            Some(name_or_id) => Some(self.resolve_account(name_or_id).await),
            None => None,
        };
        Ok(ScopeSelection { zone, account })
    }

    // ── User & edge IPs ──────────────────────────────────────────────

    pub async fn user(&self) -> Result<User, CoreError> {
        Ok(self.api.get_user().await?.into())
    }

    pub async fn update_user(&self, patch: &UserPatch) -> Result<User, CoreError> {
        if patch.is_empty() {
            return Err(CoreError::Validation {
                message: "nothing to update".into(),
            });
        }
        Ok(self.api.edit_user(&patch.into()).await?.into())
    }

    pub async fn ip_ranges(&self) -> Result<IpRanges, CoreError> {
        Ok(self.api.list_ip_ranges().await?.into())
    }

    /// PEM text of the Origin CA root for `algorithm`, whitespace-trimmed.
    pub async fn origin_ca_root_cert(
        &self,
        algorithm: OriginCaAlgorithm,
    ) -> Result<String, CoreError> {
        let root = self
            .api
            .get_origin_ca_root(&algorithm.to_string())
            .await?;
        Ok(root.certificate.trim().to_owned())
    }

    // ── DNS records ──────────────────────────────────────────────────

    pub async fn list_dns_records(
        &self,
        zone: &ZoneRef,
        filter: &DnsRecordFilter,
    ) -> Result<Vec<DnsRecord>, CoreError> {
        let scope = Scope::Zone(zone.clone());
        Ok(Pager::<DnsRecords, _>::new(self, &scope, filter)
            .drain()
            .await?)
    }

    pub async fn get_dns_record(&self, zone: &ZoneRef, id: &str) -> Result<DnsRecord, CoreError> {
        Ok(self.api.get_dns_record(&zone.id, id).await?.into())
    }

    pub async fn create_dns_record(
        &self,
        zone: &ZoneRef,
        record: &NewDnsRecord,
    ) -> Result<DnsRecord, CoreError> {
        Ok(self
            .api
            .create_dns_record(&zone.id, &record.into())
            .await?
            .into())
    }

    pub async fn update_dns_record(
        &self,
        zone: &ZoneRef,
        id: &str,
        patch: &DnsRecordPatch,
    ) -> Result<DnsRecord, CoreError> {
        if patch.is_empty() {
            return Err(CoreError::Validation {
                message: "nothing to update".into(),
            });
        }
        Ok(self
            .api
            .edit_dns_record(&zone.id, id, &patch.into())
            .await?
            .into())
    }

    pub async fn delete_dns_record(&self, zone: &ZoneRef, id: &str) -> Result<String, CoreError> {
        Ok(self.api.delete_dns_record(&zone.id, id).await?)
    }

    // ── Access rules ─────────────────────────────────────────────────

    pub async fn list_access_rules(
        &self,
        scope: &Scope,
        filter: &AccessRuleFilter,
    ) -> Result<Vec<AccessRule>, CoreError> {
        Ok(Pager::<AccessRules, _>::new(self, scope, filter)
            .drain()
            .await?)
    }

    pub async fn create_access_rule(
        &self,
        scope: &Scope,
        rule: &NewAccessRule,
    ) -> Result<AccessRule, CoreError> {
        let created = self
            .api
            .create_access_rule(scope.path(), &rule.into())
            .await?;
        Ok(AccessRule::try_from(created)?)
    }

    pub async fn update_access_rule(
        &self,
        scope: &Scope,
        id: &str,
        patch: &AccessRulePatch,
    ) -> Result<AccessRule, CoreError> {
        let updated = self
            .api
            .edit_access_rule(scope.path(), id, &patch.into())
            .await?;
        Ok(AccessRule::try_from(updated)?)
    }

    pub async fn delete_access_rule(&self, scope: &Scope, id: &str) -> Result<String, CoreError> {
        Ok(self.api.delete_access_rule(scope.path(), id).await?)
    }

    // ── User-Agent rules ─────────────────────────────────────────────

    /// One page when `page` is given, otherwise every page.
    pub async fn list_user_agent_rules(
        &self,
        zone: &ZoneRef,
        page: Option<u32>,
    ) -> Result<Vec<UserAgentRule>, CoreError> {
        let rules = match page {
            Some(page) => {
                self.api
                    .list_ua_rules(&zone.id, page, UA_RULES_PER_PAGE)
                    .await?
                    .items
            }
            None => {
                self.api
                    .paginate_all(|page| self.api.list_ua_rules(&zone.id, page, UA_RULES_PER_PAGE))
                    .await?
            }
        };
        debug!(zone = %zone.name, count = rules.len(), "listed User-Agent rules");
        let rules = rules
            .into_iter()
            .map(UserAgentRule::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rules)
    }

    pub async fn create_user_agent_rule(
        &self,
        zone: &ZoneRef,
        fields: &UserAgentRuleFields,
    ) -> Result<UserAgentRule, CoreError> {
        let created = self.api.create_ua_rule(&zone.id, &fields.into()).await?;
        Ok(UserAgentRule::try_from(created)?)
    }

    /// Replace every field of an existing rule.
    pub async fn replace_user_agent_rule(
        &self,
        zone: &ZoneRef,
        id: &str,
        fields: &UserAgentRuleFields,
    ) -> Result<UserAgentRule, CoreError> {
        let updated = self
            .api
            .update_ua_rule(&zone.id, id, &fields.into())
            .await?;
        Ok(UserAgentRule::try_from(updated)?)
    }

    pub async fn delete_user_agent_rule(
        &self,
        zone: &ZoneRef,
        id: &str,
    ) -> Result<String, CoreError> {
        Ok(self.api.delete_ua_rule(&zone.id, id).await?)
    }

    // ── Page rules ───────────────────────────────────────────────────

    pub async fn list_page_rules(&self, zone: &ZoneRef) -> Result<Vec<PageRule>, CoreError> {
        let rules = self.api.list_page_rules(&zone.id).await?;
        Ok(rules.into_iter().map(PageRule::from).collect())
    }
}

// ── Reconciler seam ─────────────────────────────────────────────────

fn zone_only(scope: &Scope) -> Result<&ZoneRef, cfctl_api::Error> {
    scope
        .zone()
        .ok_or(cfctl_api::Error::UnsupportedOperation(
            "DNS records exist only within a zone",
        ))
}

impl ResourceCollection<DnsRecords> for CloudflareClient {
    async fn fetch_page(
        &self,
        scope: &Scope,
        filter: &DnsRecordFilter,
        page: u32,
    ) -> Result<Page<DnsRecord>, cfctl_api::Error> {
        let zone = zone_only(scope)?;
        let page = self
            .api
            .list_dns_records(&zone.id, &filter.into(), page, DNS_RECORDS_PER_PAGE)
            .await?;
        Ok(page.map(DnsRecord::from))
    }

    async fn create(
        &self,
        scope: &Scope,
        fields: &NewDnsRecord,
    ) -> Result<DnsRecord, cfctl_api::Error> {
        let zone = zone_only(scope)?;
        Ok(self
            .api
            .create_dns_record(&zone.id, &fields.into())
            .await?
            .into())
    }

    async fn update(
        &self,
        scope: &Scope,
        id: &str,
        patch: &DnsRecordPatch,
    ) -> Result<DnsRecord, cfctl_api::Error> {
        let zone = zone_only(scope)?;
        Ok(self
            .api
            .edit_dns_record(&zone.id, id, &patch.into())
            .await?
            .into())
    }
}

impl ResourceCollection<AccessRules> for CloudflareClient {
    async fn fetch_page(
        &self,
        scope: &Scope,
        filter: &AccessRuleFilter,
        page: u32,
    ) -> Result<Page<AccessRule>, cfctl_api::Error> {
        let page = self
            .api
            .list_access_rules(scope.path(), &filter.into(), page, ACCESS_RULES_PER_PAGE)
            .await?;
        let Page {
            items,
            page,
            total_pages,
            total_count,
        } = page;
        let items = items
            .into_iter()
            .map(AccessRule::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            items,
            page,
            total_pages,
            total_count,
        })
    }

    async fn create(
        &self,
        scope: &Scope,
        fields: &NewAccessRule,
    ) -> Result<AccessRule, cfctl_api::Error> {
        let created = self
            .api
            .create_access_rule(scope.path(), &fields.into())
            .await?;
        AccessRule::try_from(created)
    }

    async fn update(
        &self,
        scope: &Scope,
        id: &str,
        patch: &AccessRulePatch,
    ) -> Result<AccessRule, cfctl_api::Error> {
        let updated = self
            .api
            .edit_access_rule(scope.path(), id, &patch.into())
            .await?;
        AccessRule::try_from(updated)
    }
}
