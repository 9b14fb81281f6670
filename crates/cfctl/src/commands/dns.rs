//! DNS record command handlers.

use tabled::Tabled;

use cfctl_core::{
    CloudflareClient, DnsIdentity, DnsRecord, DnsRecordFields, DnsRecordFilter, DnsRecordPatch,
    NewDnsRecord, ScopeSelection, TTL_AUTOMATIC, upsert_dns_record,
};

use crate::cli::{DnsArgs, DnsCommand, DnsRecordFieldArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DnsRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    record_type: String,
    #[tabled(rename = "Content")]
    content: String,
    #[tabled(rename = "TTL")]
    ttl: String,
    #[tabled(rename = "Proxied")]
    proxied: String,
}

impl From<&DnsRecord> for DnsRow {
    fn from(r: &DnsRecord) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
            record_type: r.record_type.clone(),
            content: r.display_content(),
            ttl: r.ttl_display(),
            proxied: if r.proxied { "yes" } else { "no" }.into(),
        }
    }
}

fn record_detail(r: &DnsRecord) -> String {
    [
        format!("ID:       {}", r.id),
        format!("Name:     {}", r.name),
        format!("Type:     {}", r.record_type),
        format!("Content:  {}", r.display_content()),
        format!("TTL:      {}", r.ttl_display()),
        format!("Proxied:  {}", r.proxied),
        format!(
            "Modified: {}",
            r.modified_on.map(|t| t.to_rfc3339()).unwrap_or_default()
        ),
    ]
    .join("\n")
}

fn render_records(records: &[DnsRecord], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(&global.output, records, |r| DnsRow::from(r), |r| r.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_record(record: &DnsRecord, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, record, record_detail, |r| r.id.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

impl From<&DnsRecordFieldArgs> for DnsRecordFields {
    fn from(args: &DnsRecordFieldArgs) -> Self {
        Self {
            content: args.content.clone(),
            ttl: args.ttl,
            proxied: args.proxy,
            priority: args.priority,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &CloudflareClient,
    args: DnsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DnsCommand::List {
            zone,
            id,
            name,
            record_type,
            content,
        } => {
            let zone = client.zone_by_name(&zone).await?;
            if let Some(id) = id {
                let record = client.get_dns_record(&zone, &id).await?;
                return render_record(&record, global);
            }
            let filter = DnsRecordFilter {
                name: None,
                name_contains: name,
                record_type: record_type.map(|t| t.to_ascii_uppercase()),
                content_contains: content,
            };
            let records = client.list_dns_records(&zone, &filter).await?;
            render_records(&records, global)
        }

        DnsCommand::Create { zone, fields } => {
            let zone = client.zone_by_name(&zone).await?;
            let record = NewDnsRecord {
                name: fields.name,
                record_type: fields.record_type.to_ascii_uppercase(),
                content: fields.content,
                ttl: fields.ttl.unwrap_or(TTL_AUTOMATIC),
                proxied: fields.proxy,
                priority: fields.priority,
            };
            let created = client.create_dns_record(&zone, &record).await?;
            render_record(&created, global)
        }

        DnsCommand::Update {
            zone,
            id,
            name,
            record_type,
            content,
            ttl,
            proxy,
            priority,
        } => {
            let zone = client.zone_by_name(&zone).await?;
            let patch = DnsRecordPatch {
                name,
                record_type: record_type.map(|t| t.to_ascii_uppercase()),
                content,
                ttl,
                proxied: proxy,
                priority,
            };
            let updated = client.update_dns_record(&zone, &id, &patch).await?;
            render_record(&updated, global)
        }

        DnsCommand::Delete { zone, id } => {
            let zone_ref = client.zone_by_name(&zone).await?;
            if !util::confirm(
                &format!("Delete DNS record {id} from {zone}?"),
                global.yes,
            )? {
                return Ok(());
            }
            let deleted = client.delete_dns_record(&zone_ref, &id).await?;
            util::note(&format!("DNS record {deleted} deleted"), global.quiet);
            Ok(())
        }

        DnsCommand::CreateOrUpdate { zone, fields } => {
            let selection = ScopeSelection::zone(client.zone_by_name(&zone).await?);
            let identity = DnsIdentity::new(fields.name.clone(), &fields.record_type);
            let outcome =
                upsert_dns_record(client, selection, &identity, &DnsRecordFields::from(&fields))
                    .await?;
            util::note(
                &format!(
                    "{} {} DNS record(s) for {}",
                    outcome.action,
                    outcome.resources.len(),
                    identity.fqdn(&zone)
                ),
                global.quiet,
            );
            render_records(&outcome.resources, global)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_args_keep_absent_values_absent() {
        let args = DnsRecordFieldArgs {
            name: "www".into(),
            record_type: "a".into(),
            content: "192.0.2.1".into(),
            ttl: None,
            proxy: None,
            priority: None,
        };
        let fields = DnsRecordFields::from(&args);
        assert_eq!(fields.ttl, None);
        assert_eq!(fields.proxied, None);
    }

    #[test]
    fn row_shows_priority_and_auto_ttl() {
        let record = DnsRecord {
            id: "r1".into(),
            zone_id: None,
            zone_name: None,
            name: "example.com".into(),
            record_type: "MX".into(),
            content: "mail.example.com".into(),
            ttl: TTL_AUTOMATIC,
            proxied: false,
            proxiable: false,
            priority: Some(10),
            modified_on: None,
        };
        let row = DnsRow::from(&record);
        assert_eq!(row.content, "10 mail.example.com");
        assert_eq!(row.ttl, "auto");
        assert_eq!(row.proxied, "no");
    }
}
