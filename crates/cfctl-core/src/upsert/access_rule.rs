// Access rule create-or-update.

use tracing::{debug, info, warn};

use super::{Phase, UpdateFailure, UpsertAction, UpsertOutcome};
use crate::error::CoreError;
use crate::model::{
    AccessRule, AccessRuleFilter, AccessRuleMode, AccessRulePatch, ConfigurationTarget,
    NewAccessRule, ScopeSelection, classify,
};
use crate::remote::{AccessRules, Pager, ResourceCollection, ResourceKind};

/// Optionally-supplied rule fields. `None` means "keep what the rule has";
/// `Some("")` for notes clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRuleOverrides {
    pub mode: Option<AccessRuleMode>,
    pub notes: Option<String>,
}

impl AccessRuleOverrides {
    /// Per-field merge over an existing rule.
    pub fn merged_onto(&self, existing: &AccessRule) -> AccessRulePatch {
        AccessRulePatch {
            mode: Some(self.mode.unwrap_or(existing.mode)),
            notes: Some(
                self.notes
                    .clone()
                    .unwrap_or_else(|| existing.notes.clone()),
            ),
        }
    }

    pub fn new_rule(&self, configuration: ConfigurationTarget) -> Result<NewAccessRule, CoreError> {
        let mode = self.mode.ok_or_else(|| CoreError::Validation {
            message: format!("a mode is required to create a rule for {configuration}"),
        })?;
        Ok(NewAccessRule {
            configuration,
            mode,
            notes: self.notes.clone(),
        })
    }
}

/// Apply `overrides` to every rule in scope matching the classified
/// `raw_value`, or create one rule when nothing matches.
///
/// A failed update is recorded in the outcome and the remaining rules
/// are still processed.
pub async fn upsert_access_rule<C>(
    collection: &C,
    selection: ScopeSelection,
    raw_value: &str,
    overrides: &AccessRuleOverrides,
) -> Result<UpsertOutcome<AccessRule>, CoreError>
where
    C: ResourceCollection<AccessRules>,
{
    let kind = AccessRules::LABEL;
    debug!(kind, phase = %Phase::Validating, value = raw_value, "upsert");

    let scope = selection.resolve()?;
    let configuration = classify(raw_value);

    debug!(kind, phase = %Phase::Searching, %configuration, scope = scope.kind());
    let filter = AccessRuleFilter {
        configuration: Some(configuration.clone()),
        ..Default::default()
    };
    let matches: Vec<AccessRule> = Pager::<AccessRules, _>::new(collection, &scope, &filter)
        .drain()
        .await
        .map_err(|source| {
            debug!(kind, phase = %Phase::Failed, "search failed");
            CoreError::RemoteSearch { kind, source }
        })?
        .into_iter()
        .filter(|r| r.configuration.target() == configuration.target())
        .collect();

    if matches.is_empty() {
        debug!(kind, phase = %Phase::Creating, %configuration);
        let new = overrides.new_rule(configuration)?;
        let created = collection.create(&scope, &new).await.map_err(|source| {
            debug!(kind, phase = %Phase::Failed, "create failed");
            CoreError::RemoteWrite {
                kind,
                id: None,
                applied: Vec::new(),
                source,
            }
        })?;
        info!(id = %created.id, mode = %created.mode, "created access rule");
        debug!(kind, phase = %Phase::Done);
        return Ok(UpsertOutcome::created(created));
    }

    let mut updated = Vec::with_capacity(matches.len());
    let mut failures = Vec::new();
    for existing in &matches {
        debug!(kind, phase = %Phase::Updating, id = %existing.id);
        let patch = overrides.merged_onto(existing);
        match collection.update(&scope, &existing.id, &patch).await {
            Ok(rule) => updated.push(rule),
            Err(error) => {
                warn!(id = %existing.id, %error, "access rule update failed, continuing");
                failures.push(UpdateFailure {
                    id: existing.id.clone(),
                    error,
                });
            }
        }
    }

    info!(
        updated = updated.len(),
        failed = failures.len(),
        %configuration,
        "updated access rules"
    );
    debug!(kind, phase = %Phase::Done);
    Ok(UpsertOutcome {
        action: UpsertAction::Updated,
        resources: updated,
        failures,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{AccountRef, DnsRecord, ZoneRef};
    use crate::upsert::mock::MemoryCollection;
    use crate::upsert::{DnsIdentity, DnsRecordFields, Impact, upsert_dns_record};

    fn account() -> ScopeSelection {
        ScopeSelection::account(AccountRef { id: "acc1".into() })
    }

    fn zone_ref() -> ZoneRef {
        ZoneRef {
            id: "z1".into(),
            name: "example.com".into(),
        }
    }

    fn rule(id: &str, value: &str, mode: AccessRuleMode, notes: &str) -> AccessRule {
        AccessRule {
            id: id.into(),
            configuration: classify(value),
            mode,
            notes: notes.into(),
            owner: None,
            modified_on: None,
        }
    }

    #[tokio::test]
    async fn absent_notes_are_carried_forward() {
        let remote = MemoryCollection::new(
            vec![rule("r1", "198.51.100.4", AccessRuleMode::Block, "legacy")],
            10,
        );
        let overrides = AccessRuleOverrides {
            mode: Some(AccessRuleMode::Challenge),
            notes: None,
        };

        let out = upsert_access_rule(&remote, account(), "198.51.100.4", &overrides)
            .await
            .unwrap();

        assert_eq!(out.action, UpsertAction::Updated);
        assert_eq!(out.resources[0].notes, "legacy");
        assert_eq!(out.resources[0].mode, AccessRuleMode::Challenge);
    }

    #[tokio::test]
    async fn remote_matches_are_updated_even_when_text_differs() {
        let mut remote = MemoryCollection::new(
            vec![
                rule("r1", "13335", AccessRuleMode::Block, "cdn"),
                rule("r2", "US", AccessRuleMode::Block, ""),
            ],
            10,
        );
        remote.match_target_only = true;
        let overrides = AccessRuleOverrides {
            mode: Some(AccessRuleMode::Challenge),
            notes: None,
        };

        let out = upsert_access_rule(&remote, account(), "013335", &overrides)
            .await
            .unwrap();

        assert_eq!(out.action, UpsertAction::Updated);
        assert_eq!(remote.created(), 0);
        assert_eq!(remote.updated(), vec!["r1".to_owned()]);
        assert_eq!(out.resources[0].configuration, ConfigurationTarget::Asn("13335".into()));
        assert_eq!(out.resources[0].mode, AccessRuleMode::Challenge);
        assert_eq!(out.resources[0].notes, "cdn");
    }

    #[tokio::test]
    async fn absent_mode_is_carried_forward_per_rule() {
        let remote = MemoryCollection::new(
            vec![
                rule("r1", "10.0.0.0/24", AccessRuleMode::Block, "a"),
                rule("r2", "10.0.0.0/24", AccessRuleMode::Whitelist, "b"),
            ],
            1,
        );
        let overrides = AccessRuleOverrides {
            mode: None,
            notes: Some("reviewed".into()),
        };

        // Host bits in the input are masked before searching.
        let out = upsert_access_rule(&remote, account(), "10.0.0.77/24", &overrides)
            .await
            .unwrap();

        let modes: Vec<_> = out.resources.iter().map(|r| r.mode).collect();
        assert_eq!(modes, vec![AccessRuleMode::Block, AccessRuleMode::Whitelist]);
        assert!(out.resources.iter().all(|r| r.notes == "reviewed"));
    }

    #[tokio::test]
    async fn explicit_empty_notes_clear() {
        let remote = MemoryCollection::new(
            vec![rule("r1", "US", AccessRuleMode::Block, "legacy")],
            10,
        );
        let overrides = AccessRuleOverrides {
            mode: None,
            notes: Some(String::new()),
        };

        let out = upsert_access_rule(&remote, account(), "US", &overrides)
            .await
            .unwrap();
        assert_eq!(out.resources[0].notes, "");
    }

    #[tokio::test]
    async fn one_failed_update_does_not_stop_the_batch() {
        let mut remote = MemoryCollection::new(
            vec![
                rule("r1", "13335", AccessRuleMode::Block, ""),
                rule("r2", "13335", AccessRuleMode::Block, ""),
                rule("r3", "13335", AccessRuleMode::Block, ""),
            ],
            10,
        );
        remote.fail_updates.insert("r2".into());
        let overrides = AccessRuleOverrides {
            mode: Some(AccessRuleMode::JsChallenge),
            notes: None,
        };

        let out = upsert_access_rule(&remote, account(), "13335", &overrides)
            .await
            .unwrap();

        let ids: Vec<_> = out.resources.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r3"]);
        assert_eq!(out.failures.len(), 1);
        assert_eq!(out.failures[0].id, "r2");
        assert_eq!(out.impact(), Impact::Partial);
        assert_eq!(remote.updated(), vec!["r1".to_owned(), "r3".to_owned()]);
    }

    #[tokio::test]
    async fn all_updates_failing_reports_no_impact() {
        let mut remote = MemoryCollection::new(
            vec![rule("r1", "US", AccessRuleMode::Block, "")],
            10,
        );
        remote.fail_updates.insert("r1".into());

        let out = upsert_access_rule(&remote, account(), "US", &AccessRuleOverrides::default())
            .await
            .unwrap();

        assert_eq!(out.impact(), Impact::None);
        assert_eq!(out.attempted(), 1);
    }

    #[tokio::test]
    async fn creates_from_classified_value() {
        let remote = MemoryCollection::new(Vec::new(), 10);
        let overrides = AccessRuleOverrides {
            mode: Some(AccessRuleMode::Block),
            notes: Some("scanner".into()),
        };

        let out = upsert_access_rule(
            &remote,
            ScopeSelection::zone(zone_ref()),
            "2001:db8::5/48",
            &overrides,
        )
        .await
        .unwrap();

        assert_eq!(out.action, UpsertAction::Created);
        assert_eq!(
            out.resources[0].configuration,
            ConfigurationTarget::CidrRange("2001:db8::/48".into())
        );
        assert_eq!(out.resources[0].notes, "scanner");
    }

    #[tokio::test]
    async fn create_without_mode_is_rejected() {
        let remote = MemoryCollection::<AccessRule>::new(Vec::new(), 10);

        let err = upsert_access_rule(&remote, account(), "US", &AccessRuleOverrides::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Validation { .. }));
        assert_eq!(remote.created(), 0);
    }

    #[tokio::test]
    async fn both_scopes_fail_before_any_remote_call() {
        let remote = MemoryCollection::<AccessRule>::new(Vec::new(), 10);
        let selection = ScopeSelection {
            zone: Some(zone_ref()),
            account: Some(AccountRef { id: "acc1".into() }),
        };

        let err = upsert_access_rule(&remote, selection, "US", &AccessRuleOverrides::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidScope { .. }));
        assert_eq!(remote.calls(), 0);
    }

    #[tokio::test]
    async fn neither_scope_fails_before_any_remote_call() {
        let remote = MemoryCollection::<AccessRule>::new(Vec::new(), 10);

        let err = upsert_access_rule(
            &remote,
            ScopeSelection::default(),
            "US",
            &AccessRuleOverrides::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CoreError::InvalidScope { .. }));
        assert_eq!(remote.calls(), 0);
    }

    /// DNS updates overwrite every field with the caller's set (defaults
    /// filling gaps) while access rules keep fields the caller left out.
    #[tokio::test]
    async fn dns_replaces_while_access_rules_merge() {
        let dns = MemoryCollection::new(
            vec![DnsRecord {
                id: "d1".into(),
                zone_id: Some("z1".into()),
                zone_name: Some("example.com".into()),
                name: "www.example.com".into(),
                record_type: "A".into(),
                content: "192.0.2.1".into(),
                ttl: 3600,
                proxied: true,
                proxiable: true,
                priority: None,
                modified_on: None,
            }],
            10,
        );
        let fields = DnsRecordFields {
            content: "192.0.2.2".into(),
            ttl: None,
            proxied: None,
            priority: None,
        };
        let out = upsert_dns_record(
            &dns,
            ScopeSelection::zone(zone_ref()),
            &DnsIdentity::new("www", "A"),
            &fields,
        )
        .await
        .unwrap();
        assert_eq!(out.resources[0].ttl, 1);
        assert!(!out.resources[0].proxied);

        let rules = MemoryCollection::new(
            vec![rule("r1", "192.0.2.2", AccessRuleMode::Whitelist, "keep me")],
            10,
        );
        let out = upsert_access_rule(&rules, account(), "192.0.2.2", &AccessRuleOverrides::default())
            .await
            .unwrap();
        assert_eq!(out.resources[0].mode, AccessRuleMode::Whitelist);
        assert_eq!(out.resources[0].notes, "keep me");
    }
}
