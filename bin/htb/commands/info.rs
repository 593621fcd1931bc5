//! Info command - show one machine.

use anyhow::Result;
use clap::Args;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use htb_client::{find_machine_id, ApiClient};

use crate::commands::{machine_fields, render_field};

#[derive(Args)]
pub struct InfoArgs {
    /// Name of the machine to show
    #[arg(value_name = "BOX")]
    pub box_name: String,

    /// Only print field values, separated by --separator
    #[arg(short, long)]
    pub quiet: bool,

    /// Field separator for --quiet output
    #[arg(short, long, default_value = " ")]
    pub separator: String,

    /// Limit output to these fields
    #[arg(short, long, value_name = "FIELD", num_args = 1..)]
    pub fields: Vec<String>,

    /// Show every field the server sends
    #[arg(short, long)]
    pub all_fields: bool,
}

pub async fn run(api: &ApiClient, args: InfoArgs) -> Result<i32> {
    let machines = api.reconcile().await?;
    let id = find_machine_id(&machines, &args.box_name).unwrap_or(0);
    let machine = api.machine(id).await?;
    let record = machine_fields(&machine);

    let fields: Vec<String> = if args.all_fields || args.fields.is_empty() {
        record.keys().cloned().collect()
    } else {
        args.fields.clone()
    };

    if args.quiet {
        let vals: Vec<String> = fields.iter().map(|f| render_field(record.get(f))).collect();
        println!("{}", vals.join(&args.separator));
        return Ok(0);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    for f in &fields {
        table.add_row(vec![f.clone(), render_field(record.get(f))]);
    }
    println!("{table}");
    Ok(0)
}
