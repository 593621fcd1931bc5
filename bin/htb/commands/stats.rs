//! Stats command - platform statistics.

use anyhow::Result;
use clap::Args;
use htb_client::{render_envelope, ApiClient};

use crate::style::print_header;

#[derive(Args)]
pub struct StatsArgs {
    /// Trailing days for the daily own counts
    #[arg(long, default_value_t = 30)]
    pub days: u32,
}

pub async fn run(api: &ApiClient, args: StatsArgs) -> Result<i32> {
    print_header("Global");
    let global = api.global_stats().await?;
    println!("{}", render_envelope(&global));

    print_header("Overview");
    let overview = api.overview_stats().await?;
    println!("{}", render_envelope(&overview));

    print_header(&format!("Owns, last {} days", args.days));
    let daily = api.daily_owns(args.days).await?;
    println!("{}", render_envelope(&daily));

    Ok(0)
}
