//! Edge IP range handler. Needs no credentials.

use tabled::Tabled;

use cfctl_core::{CloudflareClient, IpRanges};

use crate::cli::{GlobalOpts, IpType, IpsArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct RangeRow {
    #[tabled(rename = "Family")]
    family: &'static str,
    #[tabled(rename = "CIDR")]
    cidr: String,
}

fn select(ranges: IpRanges, ip_type: IpType) -> IpRanges {
    match ip_type {
        IpType::Ipv4 => IpRanges {
            ipv4: ranges.ipv4,
            ipv6: Vec::new(),
        },
        IpType::Ipv6 => IpRanges {
            ipv4: Vec::new(),
            ipv6: ranges.ipv6,
        },
        IpType::All => ranges,
    }
}

fn rows(ranges: &IpRanges) -> Vec<RangeRow> {
    let v4 = ranges.ipv4.iter().map(|c| RangeRow {
        family: "ipv4",
        cidr: c.clone(),
    });
    let v6 = ranges.ipv6.iter().map(|c| RangeRow {
        family: "ipv6",
        cidr: c.clone(),
    });
    v4.chain(v6).collect()
}

pub async fn handle(
    client: &CloudflareClient,
    args: &IpsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let ranges = select(client.ip_ranges().await?, args.ip_type);

    let out = if args.ip_only || matches!(global.output, OutputFormat::Plain) {
        rows(&ranges)
            .into_iter()
            .map(|r| r.cidr)
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        let rows = rows(&ranges);
        output::render_single(
            &global.output,
            &ranges,
            |_| output::render_table(&rows),
            |_| String::new(),
        )?
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
