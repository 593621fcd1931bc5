//! List command - render the reconciled machine list.

use anyhow::Result;
use clap::Args;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use htb_client::{ApiClient, Machine};

use crate::commands::{machine_fields, render_field, DEFAULT_FIELDS};

#[derive(Args)]
pub struct ListArgs {
    /// Include retired machines (VIP-only targets)
    #[arg(long)]
    pub retired: bool,

    /// Only machines still missing a user or root own
    #[arg(long)]
    pub incomplete: bool,

    /// Only print field values, separated by --separator
    #[arg(short, long)]
    pub quiet: bool,

    /// Field separator for --quiet output
    #[arg(short, long, default_value = " ")]
    pub separator: String,

    /// Row separator for --quiet output
    #[arg(long = "row-separator", default_value = "\n")]
    pub row_separator: String,

    /// Limit output to these fields
    #[arg(short, long, value_name = "FIELD", num_args = 1..)]
    pub fields: Vec<String>,

    /// Show every field the server sends
    #[arg(short, long)]
    pub all_fields: bool,
}

pub async fn run(api: &ApiClient, args: ListArgs) -> Result<i32> {
    let machines = api.reconcile().await?;

    let machines: Vec<&Machine> = machines
        .iter()
        .filter(|m| {
            let incomplete = !m.owned_user || !m.owned_root;
            (incomplete || !args.incomplete) && (!m.retired || args.retired)
        })
        .collect();

    let fields = selected_fields(&args, &machines);

    if args.quiet {
        let rows: Vec<String> = machines
            .iter()
            .map(|m| {
                let record = machine_fields(m);
                fields
                    .iter()
                    .map(|f| render_field(record.get(f)))
                    .collect::<Vec<_>>()
                    .join(&args.separator)
            })
            .collect();
        println!("{}", rows.join(&args.row_separator));
        return Ok(0);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(fields.clone());
    for m in &machines {
        let record = machine_fields(m);
        table.add_row(
            fields
                .iter()
                .map(|f| render_field(record.get(f)))
                .collect::<Vec<String>>(),
        );
    }
    println!("{table}");
    Ok(0)
}

fn selected_fields(args: &ListArgs, machines: &[&Machine]) -> Vec<String> {
    if args.all_fields {
        machines
            .first()
            .map(|m| machine_fields(m).keys().cloned().collect())
            .unwrap_or_default()
    } else if !args.fields.is_empty() {
        args.fields.clone()
    } else {
        DEFAULT_FIELDS.iter().map(|s| s.to_string()).collect()
    }
}
