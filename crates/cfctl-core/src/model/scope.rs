// ── Resource scope ──
//
// Access rules live under exactly one zone or one account. DNS records
// only ever live under a zone. User-level scope is not supported.

use serde::{Deserialize, Serialize};

use cfctl_api::types::ScopePath;

use crate::error::CoreError;

/// A zone the caller has already resolved to an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRef {
    pub id: String,
    pub name: String,
}

/// An account the caller has already resolved to an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    pub id: String,
}

/// Validated ownership boundary of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scope {
    Zone(ZoneRef),
    Account(AccountRef),
}

impl Scope {
    pub fn id(&self) -> &str {
        match self {
            Self::Zone(z) => &z.id,
            Self::Account(a) => &a.id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Zone(_) => "zone",
            Self::Account(_) => "account",
        }
    }

    pub fn zone(&self) -> Option<&ZoneRef> {
        match self {
            Self::Zone(z) => Some(z),
            Self::Account(_) => None,
        }
    }

    pub(crate) fn path(&self) -> ScopePath<'_> {
        match self {
            Self::Zone(z) => ScopePath::Zone(&z.id),
            Self::Account(a) => ScopePath::Account(&a.id),
        }
    }
}

/// Raw, not yet validated scope as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSelection {
    pub zone: Option<ZoneRef>,
    pub account: Option<AccountRef>,
}

impl ScopeSelection {
    pub fn zone(zone: ZoneRef) -> Self {
        Self {
            zone: Some(zone),
            account: None,
        }
    }

    pub fn account(account: AccountRef) -> Self {
        Self {
            zone: None,
            account: Some(account),
        }
    }

    /// Exactly one of zone / account must be present.
    pub fn resolve(self) -> Result<Scope, CoreError> {
        ensure_exclusive(self.zone.is_some(), self.account.is_some())?;
        match (self.zone, self.account) {
            (Some(zone), None) => Ok(Scope::Zone(zone)),
            (None, Some(account)) => Ok(Scope::Account(account)),
            _ => Err(CoreError::InvalidScope {
                reason: "exactly one of zone or account is required".into(),
            }),
        }
    }
}

/// Check exclusivity on presence alone, before any name is resolved remotely.
pub fn ensure_exclusive(zone: bool, account: bool) -> Result<(), CoreError> {
    match (zone, account) {
        (true, true) => Err(CoreError::InvalidScope {
            reason: "cannot specify both a zone and an account".into(),
        }),
        (false, false) => Err(CoreError::InvalidScope {
            reason: "a zone or an account is required".into(),
        }),
        _ => Ok(()),
    }
}
