// ── Remote resource collections ──
//
// The reconciler talks to the remote through `ResourceCollection`, one
// impl per resource kind. `Pager` walks a collection page by page and is
// always drained to completion before any create/update decision.

use std::future::Future;
use std::marker::PhantomData;

use cfctl_api::Page;
use tracing::trace;

use crate::model::{
    AccessRule, AccessRuleFilter, AccessRulePatch, DnsRecord, DnsRecordFilter, DnsRecordPatch,
    NewAccessRule, NewDnsRecord, Scope,
};

/// Anything the remote assigns an id to.
pub trait ManagedResource {
    fn id(&self) -> &str;
}

impl ManagedResource for DnsRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl ManagedResource for AccessRule {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Type-level description of one resource family.
pub trait ResourceKind {
    /// Human-readable name used in errors and logs.
    const LABEL: &'static str;
    type Resource: ManagedResource + Clone + Send;
    type Filter: Send + Sync;
    type Create: Send + Sync;
    type Patch: Send + Sync;
}

/// DNS records in a zone.
#[derive(Debug)]
pub enum DnsRecords {}

impl ResourceKind for DnsRecords {
    const LABEL: &'static str = "DNS record";
    type Resource = DnsRecord;
    type Filter = DnsRecordFilter;
    type Create = NewDnsRecord;
    type Patch = DnsRecordPatch;
}

/// IP access rules in a zone or account.
#[derive(Debug)]
pub enum AccessRules {}

impl ResourceKind for AccessRules {
    const LABEL: &'static str = "access rule";
    type Resource = AccessRule;
    type Filter = AccessRuleFilter;
    type Create = NewAccessRule;
    type Patch = AccessRulePatch;
}

/// The remote side of a resource family: paged search, create, update.
///
/// Errors are the API's own and are passed through untouched.
pub trait ResourceCollection<K: ResourceKind>: Sync {
    /// Fetch one 1-based page of resources matching `filter`.
    fn fetch_page(
        &self,
        scope: &Scope,
        filter: &K::Filter,
        page: u32,
    ) -> impl Future<Output = Result<Page<K::Resource>, cfctl_api::Error>> + Send;

    fn create(
        &self,
        scope: &Scope,
        fields: &K::Create,
    ) -> impl Future<Output = Result<K::Resource, cfctl_api::Error>> + Send;

    fn update(
        &self,
        scope: &Scope,
        id: &str,
        patch: &K::Patch,
    ) -> impl Future<Output = Result<K::Resource, cfctl_api::Error>> + Send;
}

// ── Pager ────────────────────────────────────────────────────────────

/// Finite, restartable walk over a paged search.
///
/// An error ends the walk and is returned as-is; `Ok(None)` means the
/// remote has no more pages.
pub struct Pager<'a, K: ResourceKind, C> {
    collection: &'a C,
    scope: &'a Scope,
    filter: &'a K::Filter,
    next_page: u32,
    done: bool,
    _kind: PhantomData<fn() -> K>,
}

impl<'a, K, C> Pager<'a, K, C>
where
    K: ResourceKind,
    C: ResourceCollection<K>,
{
    pub fn new(collection: &'a C, scope: &'a Scope, filter: &'a K::Filter) -> Self {
        Self {
            collection,
            scope,
            filter,
            next_page: 1,
            done: false,
            _kind: PhantomData,
        }
    }

    pub fn has_more(&self) -> bool {
        !self.done
    }

    /// Fetch the next page.
    pub async fn advance(&mut self) -> Result<Option<Vec<K::Resource>>, cfctl_api::Error> {
        if self.done {
            return Ok(None);
        }

        let page = match self
            .collection
            .fetch_page(self.scope, self.filter, self.next_page)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                self.done = true;
                return Err(e);
            }
        };

        trace!(
            kind = K::LABEL,
            page = self.next_page,
            total_pages = page.total_pages,
            items = page.items.len(),
            "fetched page"
        );

        self.done = !page.has_more() || page.items.is_empty();
        self.next_page += 1;
        Ok(Some(page.items))
    }

    /// Fetch every remaining page.
    pub async fn drain(&mut self) -> Result<Vec<K::Resource>, cfctl_api::Error> {
        let mut all = Vec::new();
        while let Some(items) = self.advance().await? {
            all.extend(items);
        }
        Ok(all)
    }

    /// Start again from the first page.
    pub fn restart(&mut self) {
        self.next_page = 1;
        self.done = false;
    }
}
