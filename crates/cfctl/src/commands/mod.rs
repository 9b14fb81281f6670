//! Command dispatch: bridges CLI args -> `CloudflareClient` -> output formatting.

pub mod config_cmd;
pub mod dns;
pub mod firewall;
pub mod ips;
pub mod origin_ca;
pub mod page_rules;
pub mod user;
pub mod user_agents;
pub mod util;
pub mod zones;

use cfctl_core::CloudflareClient;

use crate::cli::{Command, FirewallCommand, GlobalOpts, RulesCommand};
use crate::error::CliError;

/// Reject argument combinations that can be judged without the network.
///
/// Runs before credentials are resolved, so a bad scope fails the same
/// way with or without a configured profile.
pub fn validate(cmd: &Command) -> Result<(), CliError> {
    if let Command::User(args) = cmd {
        if matches!(user::user_patch(&args.command), Some(patch) if patch.is_empty()) {
            return Err(CliError::Validation {
                field: "user update".into(),
                reason: "pass at least one field to change".into(),
            });
        }
        return Ok(());
    }
    let Command::Firewall(args) = cmd else {
        return Ok(());
    };
    let FirewallCommand::Rules(rules) = &args.command;
    let scope = match &rules.command {
        RulesCommand::List { scope, .. }
        | RulesCommand::Create { scope, .. }
        | RulesCommand::Update { scope, .. }
        | RulesCommand::Delete { scope, .. }
        | RulesCommand::CreateOrUpdate { scope, .. } => scope,
    };
    cfctl_core::ensure_exclusive(scope.zone.is_some(), scope.account.is_some())?;
    Ok(())
}

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &CloudflareClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Zones(args) => zones::handle(client, args, global).await,
        Command::Dns(args) => dns::handle(client, args, global).await,
        Command::Firewall(args) => firewall::handle(client, args, global).await,
        Command::UserAgents(args) => user_agents::handle(client, args, global).await,
        Command::PageRules(args) => page_rules::handle(client, args, global).await,
        Command::OriginCaRootCert(args) => origin_ca::handle(client, &args, global).await,
        Command::Ips(args) => ips::handle(client, &args, global).await,
        Command::User(args) => user::handle(client, &args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Unsupported {
            operation: "dispatch of a local command".into(),
        }),
    }
}
