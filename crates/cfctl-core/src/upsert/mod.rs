// ── Idempotent create-or-update ──
//
// Both reconcilers follow the same shape:
//
//   Validating → Searching → { Creating | Updating × N } → Done
//
// Scope is validated before any remote call. The search is drained to
// the last page before deciding. Neither path ever deletes.
//
// They differ on update: DNS records get the full override set with
// defaults filled in, while access rules merge per field over each
// matched rule. A failed DNS write aborts; a failed access-rule update
// is recorded and the batch continues.

mod access_rule;
mod dns;

use serde::Serialize;
use strum::Display;

pub use access_rule::{AccessRuleOverrides, upsert_access_rule};
pub use dns::{DnsIdentity, DnsRecordFields, upsert_dns_record};

/// Which branch the reconciler took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UpsertAction {
    Created,
    Updated,
}

/// One matched resource that could not be updated.
#[derive(Debug)]
pub struct UpdateFailure {
    pub id: String,
    pub error: cfctl_api::Error,
}

/// How many of the attempted resources were actually written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    None,
    Partial,
    All,
}

/// Result of one reconciliation run.
#[derive(Debug)]
pub struct UpsertOutcome<R> {
    pub action: UpsertAction,
    /// Resources as returned by the remote after the write.
    pub resources: Vec<R>,
    /// Only ever populated by the access-rule path.
    pub failures: Vec<UpdateFailure>,
}

impl<R> UpsertOutcome<R> {
    pub(crate) fn created(resource: R) -> Self {
        Self {
            action: UpsertAction::Created,
            resources: vec![resource],
            failures: Vec::new(),
        }
    }

    pub fn impact(&self) -> Impact {
        match (self.resources.is_empty(), self.failures.is_empty()) {
            (true, _) => Impact::None,
            (false, true) => Impact::All,
            (false, false) => Impact::Partial,
        }
    }

    /// Resources matched (update) or requested (create).
    pub fn attempted(&self) -> usize {
        self.resources.len() + self.failures.len()
    }
}

#[derive(Debug, Clone, Copy, Display)]
pub(crate) enum Phase {
    Validating,
    Searching,
    Creating,
    Updating,
    Done,
    Failed,
}

#[cfg(test)]
pub(crate) mod mock;
