// In-memory paged collection for reconciler tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::Mutex;

use cfctl_api::Page;

use crate::model::{
    AccessRule, AccessRuleFilter, AccessRulePatch, DnsRecord, DnsRecordFilter, DnsRecordPatch,
    NewAccessRule, NewDnsRecord, Scope,
};
use crate::remote::{AccessRules, DnsRecords, ResourceCollection};

pub(crate) struct MemoryCollection<R> {
    state: Mutex<State<R>>,
    per_page: usize,
    pub fail_updates: HashSet<String>,
    pub fail_search_on_page: Option<u32>,
    /// Search matches on the target kind alone, like a remote that
    /// normalizes values before comparing.
    pub match_target_only: bool,
}

struct State<R> {
    items: Vec<R>,
    calls: usize,
    created: usize,
    updated: Vec<String>,
}

pub(crate) fn remote_failure() -> cfctl_api::Error {
    cfctl_api::Error::Api {
        status: 500,
        code: Some(10000),
        message: "internal error".into(),
    }
}

impl<R: Clone> MemoryCollection<R> {
    pub fn new(items: Vec<R>, per_page: usize) -> Self {
        Self {
            state: Mutex::new(State {
                items,
                calls: 0,
                created: 0,
                updated: Vec::new(),
            }),
            per_page,
            fail_updates: HashSet::new(),
            fail_search_on_page: None,
            match_target_only: false,
        }
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub fn created(&self) -> usize {
        self.state.lock().unwrap().created
    }

    pub fn updated(&self) -> Vec<String> {
        self.state.lock().unwrap().updated.clone()
    }

    pub fn items(&self) -> Vec<R> {
        self.state.lock().unwrap().items.clone()
    }

    fn page_of(&self, page: u32, matches: impl Fn(&R) -> bool) -> Result<Page<R>, cfctl_api::Error> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        if self.fail_search_on_page == Some(page) {
            return Err(remote_failure());
        }
        let all: Vec<R> = state.items.iter().filter(|r| matches(r)).cloned().collect();
        let total_pages = all.len().div_ceil(self.per_page).max(1);
        let start = usize::try_from(page - 1).unwrap() * self.per_page;
        let items = all.into_iter().skip(start).take(self.per_page).collect();
        Ok(Page {
            items,
            page,
            total_pages: u32::try_from(total_pages).unwrap(),
            total_count: 0,
        })
    }

    fn write(
        &self,
        id: &str,
        find: impl Fn(&R) -> bool,
        apply: impl FnOnce(&mut R),
    ) -> Result<R, cfctl_api::Error> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        if self.fail_updates.contains(id) {
            return Err(remote_failure());
        }
        let item = state.items.iter_mut().find(|r| find(r)).unwrap();
        apply(item);
        let out = item.clone();
        state.updated.push(id.to_owned());
        Ok(out)
    }

    fn insert(&self, build: impl FnOnce(usize) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        state.created += 1;
        let item = build(state.created);
        state.items.push(item.clone());
        item
    }
}

// ── DNS records ─────────────────────────────────────────────────────

impl ResourceCollection<DnsRecords> for MemoryCollection<DnsRecord> {
    async fn fetch_page(
        &self,
        _scope: &Scope,
        filter: &DnsRecordFilter,
        page: u32,
    ) -> Result<Page<DnsRecord>, cfctl_api::Error> {
        self.page_of(page, |r| {
            filter
                .name
                .as_ref()
                .is_none_or(|n| r.name.eq_ignore_ascii_case(n))
        })
    }

    async fn create(
        &self,
        _scope: &Scope,
        fields: &NewDnsRecord,
    ) -> Result<DnsRecord, cfctl_api::Error> {
        Ok(self.insert(|n| DnsRecord {
            id: format!("new-{n}"),
            zone_id: None,
            zone_name: None,
            name: fields.name.clone(),
            record_type: fields.record_type.clone(),
            content: fields.content.clone(),
            ttl: fields.ttl,
            proxied: fields.proxied.unwrap_or(false),
            proxiable: true,
            priority: fields.priority,
            modified_on: None,
        }))
    }

    async fn update(
        &self,
        _scope: &Scope,
        id: &str,
        patch: &DnsRecordPatch,
    ) -> Result<DnsRecord, cfctl_api::Error> {
        self.write(
            id,
            |r| r.id == id,
            |r| {
                if let Some(ref t) = patch.record_type {
                    r.record_type.clone_from(t);
                }
                if let Some(ref c) = patch.content {
                    r.content.clone_from(c);
                }
                if let Some(ttl) = patch.ttl {
                    r.ttl = ttl;
                }
                if let Some(p) = patch.proxied {
                    r.proxied = p;
                }
                if patch.priority.is_some() {
                    r.priority = patch.priority;
                }
            },
        )
    }
}

// ── Access rules ────────────────────────────────────────────────────

impl ResourceCollection<AccessRules> for MemoryCollection<AccessRule> {
    async fn fetch_page(
        &self,
        _scope: &Scope,
        filter: &AccessRuleFilter,
        page: u32,
    ) -> Result<Page<AccessRule>, cfctl_api::Error> {
        let target_only = self.match_target_only;
        self.page_of(page, |r| {
            filter.configuration.as_ref().is_none_or(|c| {
                if target_only {
                    r.configuration.target() == c.target()
                } else {
                    &r.configuration == c
                }
            })
        })
    }

    async fn create(
        &self,
        _scope: &Scope,
        fields: &NewAccessRule,
    ) -> Result<AccessRule, cfctl_api::Error> {
        Ok(self.insert(|n| AccessRule {
            id: format!("new-{n}"),
            configuration: fields.configuration.clone(),
            mode: fields.mode,
            notes: fields.notes.clone().unwrap_or_default(),
            owner: None,
            modified_on: None,
        }))
    }

    async fn update(
        &self,
        _scope: &Scope,
        id: &str,
        patch: &AccessRulePatch,
    ) -> Result<AccessRule, cfctl_api::Error> {
        self.write(
            id,
            |r| r.id == id,
            |r| {
                if let Some(mode) = patch.mode {
                    r.mode = mode;
                }
                if let Some(ref notes) = patch.notes {
                    r.notes.clone_from(notes);
                }
            },
        )
    }
}
