//! Clap derive structures for the `cfctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Also compiled by `build.rs` for man pages, so it depends on clap only.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// cfctl -- manage Cloudflare DNS records and IP access rules
#[derive(Debug, Parser)]
#[command(
    name = "cfctl",
    version,
    about = "Manage Cloudflare zones, DNS records and firewall access rules",
    long_about = "Operator CLI for the Cloudflare v4 API.\n\n\
        `create-or-update` commands search the whole zone or account first,\n\
        then create one resource or update every match. They never delete.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "CFCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "CFCTL_API_URL", global = true)]
    pub api_url: Option<String>,

    /// API token (overrides profile and keyring)
    #[arg(long, global = true, conflicts_with = "api_key")]
    pub api_token: Option<String>,

    /// Global API key, used together with --api-email
    #[arg(long, global = true, requires = "api_email")]
    pub api_key: Option<String>,

    /// Account email for --api-key
    #[arg(long, global = true)]
    pub api_email: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CFCTL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds [default: profile, then 30]
    #[arg(long, env = "CFCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage zones
    #[command(alias = "z")]
    Zones(ZonesArgs),

    /// Manage DNS records in a zone
    Dns(DnsArgs),

    /// Manage IP access rules
    #[command(alias = "fw")]
    Firewall(FirewallArgs),

    /// Manage User-Agent blocking rules in a zone
    #[command(alias = "ua")]
    UserAgents(UserAgentsArgs),

    /// Inspect page rules
    #[command(name = "pagerules", alias = "page-rules")]
    PageRules(PageRulesArgs),

    /// Print the Origin CA root certificate (PEM)
    #[command(alias = "ocrc")]
    OriginCaRootCert(OriginCaRootCertArgs),

    /// List Cloudflare edge IP ranges
    Ips(IpsArgs),

    /// Show or update the authenticated user
    User(UserArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ZONES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ZonesArgs {
    #[command(subcommand)]
    pub command: ZonesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ZonesCommand {
    /// List all zones
    #[command(alias = "ls")]
    List,

    /// Show details for a zone
    Info {
        /// Zone name (e.g. example.com)
        zone: String,
    },

    /// Create a zone with full DNS setup
    Create {
        /// Zone name
        #[arg(long)]
        zone: String,

        /// Owning account (name or ID)
        #[arg(long)]
        account: Option<String>,

        /// Scan for existing DNS records (accepted for compatibility, ignored)
        #[arg(long)]
        jumpstart: bool,
    },

    /// Delete a zone
    #[command(alias = "rm")]
    Delete {
        /// Zone name
        #[arg(long)]
        zone: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DNS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DnsArgs {
    #[command(subcommand)]
    pub command: DnsCommand,
}

/// Record fields shared by `create` and `create-or-update`.
#[derive(Debug, Args)]
pub struct DnsRecordFieldArgs {
    /// Record name relative to the zone (e.g. www)
    #[arg(long)]
    pub name: String,

    /// Record type (A, AAAA, CNAME, MX, TXT, SRV, ...)
    #[arg(long = "type")]
    pub record_type: String,

    /// Record content
    #[arg(long)]
    pub content: String,

    /// TTL in seconds; 1 means automatic
    #[arg(long)]
    pub ttl: Option<u32>,

    /// Proxy through Cloudflare (`--proxy`, or `--proxy false`)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub proxy: Option<bool>,

    /// Priority (MX, SRV)
    #[arg(long)]
    pub priority: Option<u16>,
}

#[derive(Debug, Subcommand)]
pub enum DnsCommand {
    /// List DNS records
    #[command(alias = "ls")]
    List {
        /// Zone name
        #[arg(long)]
        zone: String,

        /// Show a single record by ID
        #[arg(long)]
        id: Option<String>,

        /// Name contains
        #[arg(long)]
        name: Option<String>,

        /// Record type
        #[arg(long = "type")]
        record_type: Option<String>,

        /// Content contains
        #[arg(long)]
        content: Option<String>,
    },

    /// Create a DNS record
    Create {
        /// Zone name
        #[arg(long)]
        zone: String,

        #[command(flatten)]
        fields: DnsRecordFieldArgs,
    },

    /// Update a DNS record; only the supplied fields are changed
    Update {
        /// Zone name
        #[arg(long)]
        zone: String,

        /// Record ID
        #[arg(long)]
        id: String,

        /// New fully qualified name
        #[arg(long)]
        name: Option<String>,

        /// New record type
        #[arg(long = "type")]
        record_type: Option<String>,

        /// New content
        #[arg(long)]
        content: Option<String>,

        /// New TTL
        #[arg(long)]
        ttl: Option<u32>,

        /// Proxy through Cloudflare (`--proxy`, or `--proxy false`)
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        proxy: Option<bool>,

        /// New priority
        #[arg(long)]
        priority: Option<u16>,
    },

    /// Delete a DNS record
    #[command(alias = "rm")]
    Delete {
        /// Zone name
        #[arg(long)]
        zone: String,

        /// Record ID
        #[arg(long)]
        id: String,
    },

    /// Create the record, or update every record with this name and type
    CreateOrUpdate {
        /// Zone name
        #[arg(long)]
        zone: String,

        #[command(flatten)]
        fields: DnsRecordFieldArgs,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FIREWALL
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FirewallArgs {
    #[command(subcommand)]
    pub command: FirewallCommand,
}

#[derive(Debug, Subcommand)]
pub enum FirewallCommand {
    /// Manage IP access rules
    Rules(RulesArgs),
}

#[derive(Debug, Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: RulesCommand,
}

/// Exactly one of `--zone` / `--account` is required; checked before any
/// request is sent.
#[derive(Debug, Args)]
pub struct ScopeArgs {
    /// Zone name
    #[arg(long)]
    pub zone: Option<String>,

    /// Account name or ID
    #[arg(long)]
    pub account: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RuleMode {
    Block,
    Challenge,
    Whitelist,
    JsChallenge,
    ManagedChallenge,
}

#[derive(Debug, Subcommand)]
pub enum RulesCommand {
    /// List access rules
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        scope: ScopeArgs,

        /// IP, CIDR range, ASN or country code
        #[arg(long)]
        value: Option<String>,

        /// Rule mode
        #[arg(long, value_enum)]
        mode: Option<RuleMode>,

        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Create an access rule
    Create {
        #[command(flatten)]
        scope: ScopeArgs,

        /// IP, CIDR range, ASN or country code
        #[arg(long)]
        value: String,

        /// Rule mode
        #[arg(long, value_enum)]
        mode: RuleMode,

        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Update an access rule
    Update {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Rule ID
        #[arg(long)]
        id: String,

        /// New mode
        #[arg(long, value_enum)]
        mode: Option<RuleMode>,

        /// New notes; an empty string clears them
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete an access rule
    #[command(alias = "rm")]
    Delete {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Rule ID
        #[arg(long)]
        id: String,
    },

    /// Create a rule for the value, or update every rule matching it
    CreateOrUpdate {
        #[command(flatten)]
        scope: ScopeArgs,

        /// IP, CIDR range, ASN or country code
        #[arg(long)]
        value: String,

        /// Rule mode; required when no rule exists yet
        #[arg(long, value_enum)]
        mode: Option<RuleMode>,

        /// Notes; omitted keeps existing notes, an empty string clears them
        #[arg(long)]
        notes: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USER-AGENT RULES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UserAgentsArgs {
    #[command(subcommand)]
    pub command: UserAgentsCommand,
}

/// Full rule contents; `update` replaces every field.
#[derive(Debug, Args)]
pub struct UserAgentRuleArgs {
    /// Rule mode
    #[arg(long, value_enum)]
    pub mode: RuleMode,

    /// Exact User-Agent header value to match
    #[arg(long)]
    pub value: String,

    /// Create the rule paused
    #[arg(long)]
    pub paused: bool,

    /// Description
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum UserAgentsCommand {
    /// List User-Agent rules
    #[command(alias = "ls")]
    List {
        /// Zone name
        #[arg(long)]
        zone: String,

        /// Show only this page of results (1-based)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        page: Option<u32>,
    },

    /// Create a User-Agent rule
    Create {
        /// Zone name
        #[arg(long)]
        zone: String,

        #[command(flatten)]
        rule: UserAgentRuleArgs,
    },

    /// Replace a User-Agent rule
    Update {
        /// Zone name
        #[arg(long)]
        zone: String,

        /// Rule ID
        #[arg(long)]
        id: String,

        #[command(flatten)]
        rule: UserAgentRuleArgs,
    },

    /// Delete a User-Agent rule
    #[command(alias = "rm")]
    Delete {
        /// Zone name
        #[arg(long)]
        zone: String,

        /// Rule ID
        #[arg(long)]
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PAGE RULES / ORIGIN CA
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PageRulesArgs {
    #[command(subcommand)]
    pub command: PageRulesCommand,
}

#[derive(Debug, Subcommand)]
pub enum PageRulesCommand {
    /// List page rules for a zone
    #[command(alias = "ls")]
    List {
        /// Zone name
        #[arg(long)]
        zone: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CertAlgorithm {
    Ecc,
    Rsa,
}

#[derive(Debug, Args)]
pub struct OriginCaRootCertArgs {
    /// Key type of the root certificate
    #[arg(long, value_enum)]
    pub algorithm: CertAlgorithm,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  IPS / USER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum IpType {
    Ipv4,
    Ipv6,
    All,
}

#[derive(Debug, Args)]
pub struct IpsArgs {
    /// Address family to show
    #[arg(long, value_enum, default_value = "all")]
    pub ip_type: IpType,

    /// Print bare CIDRs, one per line
    #[arg(long)]
    pub ip_only: bool,
}

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Show the user behind the configured credentials
    Info,

    /// Update profile fields of the authenticated user
    Update {
        /// First name
        #[arg(long)]
        first_name: Option<String>,

        /// Last name
        #[arg(long)]
        last_name: Option<String>,

        /// Telephone number
        #[arg(long)]
        telephone: Option<String>,

        /// Country code
        #[arg(long)]
        country: Option<String>,

        /// Postal code
        #[arg(long)]
        zipcode: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the active profile's API token or key in the system keyring
    SetToken,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
