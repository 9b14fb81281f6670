//! IP access rule command handlers.

use tabled::Tabled;

use cfctl_core::{
    AccessRule, AccessRuleFilter, AccessRuleOverrides, AccessRulePatch, CloudflareClient, Impact,
    NewAccessRule, Scope, UpsertOutcome, classify, upsert_access_rule,
};

use crate::cli::{FirewallArgs, FirewallCommand, GlobalOpts, RulesCommand, ScopeArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl RuleRow {
    fn new(r: &AccessRule, color: bool) -> Self {
        Self {
            id: r.id.clone(),
            target: r.configuration.target().into(),
            value: r.configuration.value().into(),
            mode: output::paint_mode(&r.mode.to_string(), color),
            notes: r.notes.clone(),
        }
    }
}

fn rule_detail(r: &AccessRule) -> String {
    let mut lines = vec![
        format!("ID:       {}", r.id),
        format!("Target:   {}", r.configuration.target()),
        format!("Value:    {}", r.configuration.value()),
        format!("Mode:     {}", r.mode),
        format!("Notes:    {}", r.notes),
    ];
    if let Some(ref owner) = r.owner {
        lines.push(format!("Scope:    {} {}", owner.scope_type, owner.id));
    }
    if let Some(modified) = r.modified_on {
        lines.push(format!("Modified: {}", modified.to_rfc3339()));
    }
    lines.join("\n")
}

fn render_rules(rules: &[AccessRule], global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        rules,
        |r| RuleRow::new(r, color),
        |r| r.id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_rule(rule: &AccessRule, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, rule, rule_detail, |r| r.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Resolve `--zone` / `--account` into a validated scope.
async fn resolve_scope(client: &CloudflareClient, scope: &ScopeArgs) -> Result<Scope, CliError> {
    let selection = client
        .select_scope(scope.zone.as_deref(), scope.account.as_deref())
        .await?;
    Ok(selection.resolve()?)
}

/// Map a reconciliation outcome onto the CLI's exit semantics.
///
/// Every failed update is reported on stderr. A batch where nothing was
/// written is an error, a batch with some failures is a partial update.
fn report_outcome(outcome: &UpsertOutcome<AccessRule>, value: &str) -> Result<(), CliError> {
    for failure in &outcome.failures {
        eprintln!("warning: access rule {} not updated: {}", failure.id, failure.error);
    }
    match outcome.impact() {
        Impact::All => Ok(()),
        Impact::Partial => Err(CliError::PartialUpdate {
            kind: "access rule",
            updated: outcome.resources.len(),
            failed: outcome.failures.len(),
            total: outcome.attempted(),
        }),
        Impact::None => Err(CliError::UpsertFailed {
            message: format!(
                "none of the {} access rules matching {value} could be updated",
                outcome.attempted()
            ),
        }),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &CloudflareClient,
    args: FirewallArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let FirewallCommand::Rules(rules) = args.command;
    match rules.command {
        RulesCommand::List {
            scope,
            value,
            mode,
            notes,
        } => {
            let scope = resolve_scope(client, &scope).await?;
            let filter = AccessRuleFilter {
                configuration: value.as_deref().map(classify),
                mode: mode.map(util::rule_mode),
                notes,
            };
            let rules = client.list_access_rules(&scope, &filter).await?;
            render_rules(&rules, global)
        }

        RulesCommand::Create {
            scope,
            value,
            mode,
            notes,
        } => {
            let scope = resolve_scope(client, &scope).await?;
            let rule = NewAccessRule {
                configuration: classify(&value),
                mode: util::rule_mode(mode),
                notes,
            };
            let created = client.create_access_rule(&scope, &rule).await?;
            render_rule(&created, global)
        }

        RulesCommand::Update {
            scope,
            id,
            mode,
            notes,
        } => {
            let scope = resolve_scope(client, &scope).await?;
            let patch = AccessRulePatch {
                mode: mode.map(util::rule_mode),
                notes,
            };
            if patch == AccessRulePatch::default() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "pass --mode and/or --notes".into(),
                });
            }
            let updated = client.update_access_rule(&scope, &id, &patch).await?;
            render_rule(&updated, global)
        }

        RulesCommand::Delete { scope, id } => {
            let scope = resolve_scope(client, &scope).await?;
            if !util::confirm(
                &format!("Delete access rule {id} from {} {}?", scope.kind(), scope.id()),
                global.yes,
            )? {
                return Ok(());
            }
            let deleted = client.delete_access_rule(&scope, &id).await?;
            util::note(&format!("Access rule {deleted} deleted"), global.quiet);
            Ok(())
        }

        RulesCommand::CreateOrUpdate {
            scope,
            value,
            mode,
            notes,
        } => {
            let selection = client
                .select_scope(scope.zone.as_deref(), scope.account.as_deref())
                .await?;
            let overrides = AccessRuleOverrides {
                mode: mode.map(util::rule_mode),
                notes,
            };
            let outcome = upsert_access_rule(client, selection, &value, &overrides).await?;
            util::note(
                &format!(
                    "{} {} access rule(s) for {}",
                    outcome.action,
                    outcome.resources.len(),
                    classify(&value)
                ),
                global.quiet,
            );
            render_rules(&outcome.resources, global)?;
            report_outcome(&outcome, &value)
        }
    }
}
