// DNS record create-or-update.

use tracing::{debug, info};

use super::{Phase, UpsertAction, UpsertOutcome};
use crate::error::CoreError;
use crate::model::{
    DnsRecord, DnsRecordFilter, DnsRecordPatch, NewDnsRecord, ScopeSelection, TTL_AUTOMATIC,
};
use crate::remote::{DnsRecords, Pager, ResourceCollection, ResourceKind};

/// What makes a DNS record "the same record": name plus type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsIdentity {
    /// Name relative to the zone, e.g. `www`.
    pub name: String,
    /// Upper-cased record type, e.g. `A`.
    pub record_type: String,
}

impl DnsIdentity {
    pub fn new(name: impl Into<String>, record_type: &str) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.to_ascii_uppercase(),
        }
    }

    /// `name` and `zone` joined with a literal dot.
    pub fn fqdn(&self, zone_name: &str) -> String {
        format!("{}.{zone_name}", self.name)
    }
}

/// Caller-supplied record fields. Absent values take defaults on both
/// create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecordFields {
    pub content: String,
    pub ttl: Option<u32>,
    pub proxied: Option<bool>,
    pub priority: Option<u16>,
}

impl DnsRecordFields {
    fn ttl(&self) -> u32 {
        self.ttl.unwrap_or(TTL_AUTOMATIC)
    }

    fn priority(&self) -> Option<u16> {
        self.priority.filter(|p| *p != 0)
    }

    /// The complete field set sent on every update.
    fn full_patch(&self, identity: &DnsIdentity) -> DnsRecordPatch {
        DnsRecordPatch {
            name: None,
            record_type: Some(identity.record_type.clone()),
            content: Some(self.content.clone()),
            ttl: Some(self.ttl()),
            proxied: Some(self.proxied.unwrap_or(false)),
            priority: self.priority(),
        }
    }

    fn new_record(&self, identity: &DnsIdentity, fqdn: String) -> NewDnsRecord {
        NewDnsRecord {
            name: fqdn,
            record_type: identity.record_type.clone(),
            content: self.content.clone(),
            ttl: self.ttl(),
            proxied: Some(self.proxied.unwrap_or(false)),
            priority: self.priority(),
        }
    }
}

/// Make sure exactly one `identity` record exists in the zone, carrying
/// `fields`. Every record of that name and type is updated; one is
/// created only when none exist.
pub async fn upsert_dns_record<C>(
    collection: &C,
    selection: ScopeSelection,
    identity: &DnsIdentity,
    fields: &DnsRecordFields,
) -> Result<UpsertOutcome<DnsRecord>, CoreError>
where
    C: ResourceCollection<DnsRecords>,
{
    let kind = DnsRecords::LABEL;
    debug!(kind, phase = %Phase::Validating, name = %identity.name, "upsert");

    let scope = selection.resolve()?;
    let Some(zone) = scope.zone() else {
        debug!(kind, phase = %Phase::Failed, "account scope");
        return Err(CoreError::InvalidScope {
            reason: "DNS records can only be managed within a zone".into(),
        });
    };
    let fqdn = identity.fqdn(&zone.name);

    debug!(kind, phase = %Phase::Searching, %fqdn);
    let filter = DnsRecordFilter {
        name: Some(fqdn.clone()),
        ..Default::default()
    };
    let found = Pager::<DnsRecords, _>::new(collection, &scope, &filter)
        .drain()
        .await
        .map_err(|source| {
            debug!(kind, phase = %Phase::Failed, "search failed");
            CoreError::RemoteSearch { kind, source }
        })?;

    let matches: Vec<DnsRecord> = found
        .into_iter()
        .filter(|r| r.name.eq_ignore_ascii_case(&fqdn) && r.record_type == identity.record_type)
        .collect();

    if matches.is_empty() {
        debug!(kind, phase = %Phase::Creating, %fqdn);
        let new = fields.new_record(identity, fqdn);
        let created = collection.create(&scope, &new).await.map_err(|source| {
            debug!(kind, phase = %Phase::Failed, "create failed");
            CoreError::RemoteWrite {
                kind,
                id: None,
                applied: Vec::new(),
                source,
            }
        })?;
        info!(id = %created.id, name = %created.name, "created DNS record");
        debug!(kind, phase = %Phase::Done);
        return Ok(UpsertOutcome::created(created));
    }

    let patch = fields.full_patch(identity);
    let mut updated = Vec::with_capacity(matches.len());
    for record in &matches {
        debug!(kind, phase = %Phase::Updating, id = %record.id);
        match collection.update(&scope, &record.id, &patch).await {
            Ok(r) => updated.push(r),
            Err(source) => {
                debug!(kind, phase = %Phase::Failed, id = %record.id, "update failed");
                return Err(CoreError::RemoteWrite {
                    kind,
                    id: Some(record.id.clone()),
                    applied: updated.iter().map(|r: &DnsRecord| r.id.clone()).collect(),
                    source,
                });
            }
        }
    }

    info!(count = updated.len(), %fqdn, "updated DNS records");
    debug!(kind, phase = %Phase::Done);
    Ok(UpsertOutcome {
        action: UpsertAction::Updated,
        resources: updated,
        failures: Vec::new(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{AccountRef, ZoneRef};
    use crate::upsert::Impact;
    use crate::upsert::mock::MemoryCollection;

    fn zone() -> ScopeSelection {
        ScopeSelection::zone(ZoneRef {
            id: "z1".into(),
            name: "example.com".into(),
        })
    }

    fn record(id: &str, name: &str, ty: &str, content: &str) -> DnsRecord {
        DnsRecord {
            id: id.into(),
            zone_id: Some("z1".into()),
            zone_name: Some("example.com".into()),
            name: name.into(),
            record_type: ty.into(),
            content: content.into(),
            ttl: 3600,
            proxied: true,
            proxiable: true,
            priority: None,
            modified_on: None,
        }
    }

    fn fields(content: &str) -> DnsRecordFields {
        DnsRecordFields {
            content: content.into(),
            ttl: None,
            proxied: None,
            priority: None,
        }
    }

    #[tokio::test]
    async fn creates_with_defaults_when_absent() {
        let remote = MemoryCollection::new(Vec::new(), 2);
        let identity = DnsIdentity::new("www", "a");

        let out = upsert_dns_record(&remote, zone(), &identity, &fields("192.0.2.1"))
            .await
            .unwrap();

        assert_eq!(out.action, UpsertAction::Created);
        let created = &out.resources[0];
        assert_eq!(created.name, "www.example.com");
        assert_eq!(created.record_type, "A");
        assert_eq!(created.ttl, TTL_AUTOMATIC);
        assert!(!created.proxied);
        assert_eq!(created.priority, None);
    }

    #[tokio::test]
    async fn second_run_converges_on_one_record() {
        let remote = MemoryCollection::new(Vec::new(), 2);
        let identity = DnsIdentity::new("www", "A");

        upsert_dns_record(&remote, zone(), &identity, &fields("192.0.2.1"))
            .await
            .unwrap();
        let second = DnsRecordFields {
            ttl: Some(300),
            proxied: Some(true),
            ..fields("192.0.2.2")
        };
        let out = upsert_dns_record(&remote, zone(), &identity, &second)
            .await
            .unwrap();

        assert_eq!(out.action, UpsertAction::Updated);
        let items = remote.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].content, "192.0.2.2");
        assert_eq!(items[0].ttl, 300);
        assert!(items[0].proxied);
        assert_eq!(remote.created(), 1);
    }

    #[tokio::test]
    async fn match_on_a_later_page_prevents_create() {
        let mut existing: Vec<DnsRecord> = (0..5)
            .map(|i| record(&format!("t{i}"), "www.example.com", "TXT", "v=x"))
            .collect();
        existing.push(record("a1", "www.example.com", "A", "192.0.2.1"));
        let remote = MemoryCollection::new(existing, 2);

        let out = upsert_dns_record(
            &remote,
            zone(),
            &DnsIdentity::new("www", "A"),
            &fields("192.0.2.9"),
        )
        .await
        .unwrap();

        assert_eq!(out.action, UpsertAction::Updated);
        assert_eq!(remote.created(), 0);
        assert_eq!(remote.updated(), vec!["a1".to_owned()]);
    }

    #[tokio::test]
    async fn other_types_on_the_name_do_not_count() {
        let remote = MemoryCollection::new(
            vec![record("mx1", "www.example.com", "MX", "mail.example.com")],
            10,
        );

        let out = upsert_dns_record(
            &remote,
            zone(),
            &DnsIdentity::new("www", "A"),
            &fields("192.0.2.1"),
        )
        .await
        .unwrap();

        assert_eq!(out.action, UpsertAction::Created);
        assert_eq!(remote.items().len(), 2);
    }

    #[tokio::test]
    async fn every_type_match_is_updated() {
        let remote = MemoryCollection::new(
            vec![
                record("a1", "www.example.com", "A", "192.0.2.1"),
                record("a2", "www.example.com", "A", "192.0.2.2"),
            ],
            1,
        );

        let out = upsert_dns_record(
            &remote,
            zone(),
            &DnsIdentity::new("www", "A"),
            &fields("192.0.2.3"),
        )
        .await
        .unwrap();

        assert_eq!(out.resources.len(), 2);
        assert!(out.resources.iter().all(|r| r.content == "192.0.2.3"));
        assert_eq!(out.impact(), Impact::All);
    }

    #[tokio::test]
    async fn write_failure_aborts_and_reports_applied() {
        let mut remote = MemoryCollection::new(
            vec![
                record("a1", "www.example.com", "A", "192.0.2.1"),
                record("a2", "www.example.com", "A", "192.0.2.2"),
                record("a3", "www.example.com", "A", "192.0.2.3"),
            ],
            10,
        );
        remote.fail_updates.insert("a2".into());

        let err = upsert_dns_record(
            &remote,
            zone(),
            &DnsIdentity::new("www", "A"),
            &fields("192.0.2.9"),
        )
        .await
        .unwrap_err();

        match err {
            CoreError::RemoteWrite { id, applied, .. } => {
                assert_eq!(id.as_deref(), Some("a2"));
                assert_eq!(applied, vec!["a1".to_owned()]);
            }
            other => panic!("expected RemoteWrite, got {other:?}"),
        }
        assert_eq!(remote.updated(), vec!["a1".to_owned()]);
    }

    #[tokio::test]
    async fn search_failure_never_creates() {
        let mut remote = MemoryCollection::new(
            vec![
                record("t1", "www.example.com", "TXT", "x"),
                record("t2", "www.example.com", "TXT", "y"),
            ],
            1,
        );
        remote.fail_search_on_page = Some(2);

        let err = upsert_dns_record(
            &remote,
            zone(),
            &DnsIdentity::new("www", "A"),
            &fields("192.0.2.1"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CoreError::RemoteSearch { .. }));
        assert_eq!(remote.created(), 0);
    }

    #[tokio::test]
    async fn account_scope_is_rejected_without_remote_calls() {
        let remote = MemoryCollection::<DnsRecord>::new(Vec::new(), 10);
        let selection = ScopeSelection::account(AccountRef { id: "a1".into() });

        let err = upsert_dns_record(
            &remote,
            selection,
            &DnsIdentity::new("www", "A"),
            &fields("192.0.2.1"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CoreError::InvalidScope { .. }));
        assert_eq!(remote.calls(), 0);
    }

    #[tokio::test]
    async fn zero_priority_is_omitted() {
        let remote = MemoryCollection::new(Vec::new(), 10);
        let mx = DnsRecordFields {
            priority: Some(0),
            ..fields("mail.example.com")
        };

        let out = upsert_dns_record(&remote, zone(), &DnsIdentity::new("@", "MX"), &mx)
            .await
            .unwrap();

        assert_eq!(out.resources[0].priority, None);
        assert_eq!(out.resources[0].name, "@.example.com");
    }
}
