//! Zone command handlers.

use tabled::Tabled;

use cfctl_core::{CloudflareClient, Zone};

use crate::cli::{GlobalOpts, OutputFormat, ZonesArgs, ZonesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ZoneRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Plan")]
    plan: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl ZoneRow {
    fn new(z: &Zone, color: bool) -> Self {
        Self {
            id: z.id.clone(),
            name: z.name.clone(),
            plan: z.plan.clone(),
            status: output::paint_status(&z.status, color),
        }
    }
}

fn zone_detail(z: &Zone) -> String {
    let mut lines = vec![
        format!("ID:           {}", z.id),
        format!("Zone:         {}", z.name),
        format!("Plan:         {}", z.plan),
        format!("Status:       {}", z.status),
        format!("Paused:       {}", z.paused),
    ];
    if let Some(ref zone_type) = z.zone_type {
        lines.push(format!("Type:         {zone_type}"));
    }
    lines.push("Name Servers:".into());
    lines.extend(z.name_servers.iter().map(|ns| format!("  {ns}")));
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &CloudflareClient,
    args: ZonesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    match args.command {
        ZonesCommand::List => {
            let zones = client.list_zones().await?;
            let out = output::render_list(
                &global.output,
                &zones,
                |z| ZoneRow::new(z, color),
                |z| z.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ZonesCommand::Info { zone } => {
            let zones = client.zone_info(&zone).await?;
            if zones.is_empty() {
                return Err(CliError::NotFound {
                    resource_type: "Zone".into(),
                    identifier: zone,
                    list_command: "zones list".into(),
                });
            }
            let out = match global.output {
                OutputFormat::Table => zones
                    .iter()
                    .map(zone_detail)
                    .collect::<Vec<_>>()
                    .join("\n\n"),
                _ => output::render_list(
                    &global.output,
                    &zones,
                    |z| ZoneRow::new(z, color),
                    |z| z.id.clone(),
                )?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ZonesCommand::Create {
            zone,
            account,
            jumpstart,
        } => {
            if jumpstart {
                tracing::debug!("--jumpstart is accepted but has no effect");
            }
            let account = match account {
                Some(ref a) => Some(client.resolve_account(a).await),
                None => None,
            };
            let created = client.create_zone(&zone, account.as_ref()).await?;
            let out = output::render_single(&global.output, &created, zone_detail, |z| {
                z.id.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ZonesCommand::Delete { zone } => {
            let zone_ref = client.zone_by_name(&zone).await?;
            if !util::confirm(
                &format!("Delete zone '{zone}' and all of its records? This is destructive."),
                global.yes,
            )? {
                return Ok(());
            }
            let id = client.delete_zone(&zone_ref).await?;
            util::note(&format!("Zone {zone} deleted ({id})"), global.quiet);
            Ok(())
        }
    }
}
