//! Page rule handlers.

use tabled::Tabled;

use cfctl_core::{ActionValue, CloudflareClient, PageRule, PageRuleAction};

use crate::cli::{GlobalOpts, PageRulesArgs, PageRulesCommand};
use crate::error::CliError;
use crate::output;

// ── Formatting ──────────────────────────────────────────────────────

/// `cache_everything` -> `Cache Everything`.
fn title(raw: &str) -> String {
    raw.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe_action(action: &PageRuleAction) -> String {
    let name = title(&action.id);
    match &action.value {
        ActionValue::None => name,
        ActionValue::Forward { status_code, url } => format!("{name}: {status_code} - {url}"),
        ActionValue::Text(text) => format!("{name}: {}", title(text)),
        ActionValue::Number(n) => format!("{name}: {n}"),
        ActionValue::Json(value) => format!("{name}: {value}"),
    }
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PageRuleRow {
    #[tabled(rename = "Pri")]
    priority: i64,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Settings")]
    settings: String,
}

impl PageRuleRow {
    fn new(r: &PageRule, color: bool) -> Self {
        Self {
            priority: r.priority,
            id: r.id.clone(),
            status: output::paint_status(&r.status, color),
            url: r.url_pattern.clone().unwrap_or_default(),
            settings: r
                .actions
                .iter()
                .map(describe_action)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &CloudflareClient,
    args: PageRulesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PageRulesCommand::List { zone } => {
            let zone = client.zone_by_name(&zone).await?;
            let rules = client.list_page_rules(&zone).await?;
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &rules,
                |r| PageRuleRow::new(r, color),
                |r| r.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
