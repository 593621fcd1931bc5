//! Spawn command - assign a machine to the account.

use anyhow::Result;
use htb_client::{dispatch, ApiClient, Command, Config};

pub async fn run(api: &ApiClient, config: &Config, box_name: &str) -> Result<i32> {
    let machines = api.reconcile().await?;
    let code = dispatch(api, &machines, &config.lab, Command::Spawn, box_name).await?;
    Ok(code)
}
