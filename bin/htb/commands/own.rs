//! Own command - submit a flag for a machine.

use anyhow::Result;
use htb_client::{dispatch, ApiClient, Command, Config};

pub async fn run(
    api: &ApiClient,
    config: &Config,
    box_name: &str,
    flag: String,
    difficulty: u8,
) -> Result<i32> {
    let machines = api.reconcile().await?;
    let command = Command::Own { flag, difficulty };
    let code = dispatch(api, &machines, &config.lab, command, box_name).await?;
    Ok(code)
}
