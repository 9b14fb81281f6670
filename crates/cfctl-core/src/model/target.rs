// ── Access-rule configuration targets ──
//
// A raw operator value ("203.0.113.5", "10.0.0.0/8", "13335", "US") is
// classified into exactly one wire target. The same classification is
// used to build search filters and create requests, so a CIDR is always
// searched for and created in its masked form.

use std::convert::Infallible;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use ipnet::IpNet;
use serde::{Deserialize, Serialize};

/// What an access rule matches on. Serializes as `{"target": .., "value": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "target", content = "value")]
pub enum ConfigurationTarget {
    /// Canonical textual IPv4/IPv6 address.
    #[serde(rename = "ip")]
    IpAddress(String),
    /// Network address with host bits zeroed, plus prefix length.
    #[serde(rename = "ip_range")]
    CidrRange(String),
    /// Autonomous system number, kept as typed.
    #[serde(rename = "asn")]
    Asn(String),
    /// Anything else. Not checked against ISO 3166.
    #[serde(rename = "country")]
    Country(String),
}

/// Infer the target of a raw value. Never fails.
///
/// Precedence: IP literal, then CIDR (masked), then a base-10 `i32`,
/// then country as the catch-all.
pub fn classify(raw: &str) -> ConfigurationTarget {
    if let Ok(ip) = raw.parse::<IpAddr>() {
        return ConfigurationTarget::IpAddress(ip.to_string());
    }
    if let Ok(net) = raw.parse::<IpNet>() {
        return ConfigurationTarget::CidrRange(net.trunc().to_string());
    }
    if raw.parse::<i32>().is_ok() {
        return ConfigurationTarget::Asn(raw.to_owned());
    }
    ConfigurationTarget::Country(raw.to_owned())
}

impl ConfigurationTarget {
    /// Wire name of the target (`ip`, `ip_range`, `asn`, `country`).
    pub fn target(&self) -> &'static str {
        match self {
            Self::IpAddress(_) => "ip",
            Self::CidrRange(_) => "ip_range",
            Self::Asn(_) => "asn",
            Self::Country(_) => "country",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::IpAddress(v) | Self::CidrRange(v) | Self::Asn(v) | Self::Country(v) => v,
        }
    }

    /// Rebuild from a remote `{target, value}` pair without reclassifying.
    ///
    /// Unknown targets fall back to reclassifying the value.
    pub fn from_wire(target: &str, value: &str) -> Self {
        match target {
            "ip" => Self::IpAddress(value.to_owned()),
            "ip_range" => Self::CidrRange(value.to_owned()),
            "asn" => Self::Asn(value.to_owned()),
            "country" => Self::Country(value.to_owned()),
            _ => classify(value),
        }
    }
}

impl fmt::Display for ConfigurationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.target(), self.value())
    }
}

impl FromStr for ConfigurationTarget {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(classify(s))
    }
}
