// cfctl-api: Async Rust client for the Cloudflare v4 REST API

pub mod client;
pub mod dns;
pub mod error;
pub mod firewall;
pub mod page_rules;
pub mod transport;
pub mod types;
pub mod user;
pub mod user_agents;
pub mod zones;

pub use client::ApiClient;
pub use dns::DNS_RECORDS_PER_PAGE;
pub use error::Error;
pub use firewall::ACCESS_RULES_PER_PAGE;
pub use transport::{Credentials, DEFAULT_BASE_URL, TransportConfig};
pub use types::Page;
pub use user_agents::UA_RULES_PER_PAGE;
pub use zones::ZONES_PER_PAGE;
