// ── DNS record domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// TTL value meaning "let the edge decide".
pub const TTL_AUTOMATIC: u32 = 1;

/// A DNS record inside a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    pub zone_id: Option<String>,
    pub zone_name: Option<String>,
    /// Fully qualified name.
    pub name: String,
    pub record_type: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
    pub proxiable: bool,
    /// MX/SRV only.
    pub priority: Option<u16>,
    pub modified_on: Option<DateTime<Utc>>,
}

impl DnsRecord {
    /// Content as shown in listings: MX and SRV carry their priority in
    /// front, and SRV tab separators become spaces.
    pub fn display_content(&self) -> String {
        match self.record_type.as_str() {
            "MX" => format!("{} {}", self.priority.unwrap_or(0), self.content),
            "SRV" => format!("{} {}", self.priority.unwrap_or(0), self.content).replace('\t', " "),
            _ => self.content.clone(),
        }
    }

    pub fn ttl_display(&self) -> String {
        if self.ttl == TTL_AUTOMATIC {
            "auto".into()
        } else {
            self.ttl.to_string()
        }
    }
}

/// Search filter for DNS records in a zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsRecordFilter {
    /// Exact fully qualified name.
    pub name: Option<String>,
    pub name_contains: Option<String>,
    pub record_type: Option<String>,
    pub content_contains: Option<String>,
}

/// Fields for creating a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDnsRecord {
    pub name: String,
    pub record_type: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: Option<bool>,
    pub priority: Option<u16>,
}

/// Partial update; `None` leaves the remote value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsRecordPatch {
    pub name: Option<String>,
    pub record_type: Option<String>,
    pub content: Option<String>,
    pub ttl: Option<u32>,
    pub proxied: Option<bool>,
    pub priority: Option<u16>,
}

impl DnsRecordPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(record_type: &str, content: &str, priority: Option<u16>) -> DnsRecord {
        DnsRecord {
            id: "r1".into(),
            zone_id: None,
            zone_name: None,
            name: "example.com".into(),
            record_type: record_type.into(),
            content: content.into(),
            ttl: TTL_AUTOMATIC,
            proxied: false,
            proxiable: false,
            priority,
            modified_on: None,
        }
    }

    #[test]
    fn mx_content_is_prefixed_with_priority() {
        let r = record("MX", "mail.example.com", Some(10));
        assert_eq!(r.display_content(), "10 mail.example.com");
    }

    #[test]
    fn srv_tabs_become_spaces() {
        let r = record("SRV", "5\t5060\tsip.example.com", Some(20));
        assert_eq!(r.display_content(), "20 5 5060 sip.example.com");
    }

    #[test]
    fn other_types_are_verbatim() {
        let r = record("TXT", "v=spf1\t-all", None);
        assert_eq!(r.display_content(), "v=spf1\t-all");
        assert_eq!(r.ttl_display(), "auto");
    }

    #[test]
    fn empty_patch() {
        assert!(DnsRecordPatch::default().is_empty());
        assert!(
            !DnsRecordPatch {
                ttl: Some(60),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
