//! User-Agent blocking rule handlers.

use tabled::Tabled;

use cfctl_core::{CloudflareClient, UserAgentRule, UserAgentRuleFields};

use crate::cli::{GlobalOpts, UserAgentRuleArgs, UserAgentsArgs, UserAgentsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UaRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Paused")]
    paused: bool,
}

impl UaRow {
    fn new(r: &UserAgentRule, color: bool) -> Self {
        Self {
            id: r.id.clone(),
            description: r.description.clone(),
            mode: output::paint_mode(&r.mode.to_string(), color),
            value: r.user_agent.clone(),
            paused: r.paused,
        }
    }
}

impl From<&UserAgentRuleArgs> for UserAgentRuleFields {
    fn from(a: &UserAgentRuleArgs) -> Self {
        Self {
            mode: util::rule_mode(a.mode),
            user_agent: a.value.clone(),
            paused: a.paused,
            description: a.description.clone(),
        }
    }
}

fn render_rules(rules: &[UserAgentRule], global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        rules,
        |r| UaRow::new(r, color),
        |r| r.id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &CloudflareClient,
    args: UserAgentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        UserAgentsCommand::List { zone, page } => {
            let zone = client.zone_by_name(&zone).await?;
            let rules = client.list_user_agent_rules(&zone, page).await?;
            render_rules(&rules, global)
        }

        UserAgentsCommand::Create { zone, rule } => {
            let zone = client.zone_by_name(&zone).await?;
            let created = client
                .create_user_agent_rule(&zone, &(&rule).into())
                .await?;
            render_rules(&[created], global)
        }

        UserAgentsCommand::Update { zone, id, rule } => {
            let zone = client.zone_by_name(&zone).await?;
            let updated = client
                .replace_user_agent_rule(&zone, &id, &(&rule).into())
                .await?;
            render_rules(&[updated], global)
        }

        UserAgentsCommand::Delete { zone, id } => {
            let zone_ref = client.zone_by_name(&zone).await?;
            if !util::confirm(
                &format!("Delete User-Agent rule {id} in {zone}?"),
                global.yes,
            )? {
                return Ok(());
            }
            let deleted = client.delete_user_agent_rule(&zone_ref, &id).await?;
            util::note(&format!("User-Agent rule {deleted} deleted"), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::RuleMode;
    use cfctl_core::AccessRuleMode;

    #[test]
    fn rule_args_become_full_fields() {
        let args = UserAgentRuleArgs {
            mode: RuleMode::JsChallenge,
            value: "curl/8.0".into(),
            paused: true,
            description: None,
        };
        let fields = UserAgentRuleFields::from(&args);
        assert_eq!(fields.mode, AccessRuleMode::JsChallenge);
        assert_eq!(fields.user_agent, "curl/8.0");
        assert!(fields.paused);
        assert_eq!(fields.description, None);
    }

    #[test]
    fn row_shows_exact_user_agent() {
        let rule = UserAgentRule {
            id: "ua1".into(),
            description: "scraper".into(),
            mode: AccessRuleMode::Block,
            user_agent: "BadBot/1.0 (+http://bad.example)".into(),
            paused: false,
        };
        let table = output::render_table(&[UaRow::new(&rule, false)]);
        assert!(table.contains("BadBot/1.0 (+http://bad.example)"));
        assert!(table.contains("block"));
    }
}
