//! Reset command - reset a machine in place.
//!
//! Resets take a few minutes to apply and can be cancelled by other users on
//! the same lab.

use anyhow::Result;
use htb_client::{dispatch, ApiClient, Command, Config};

pub async fn run(api: &ApiClient, config: &Config, box_name: &str) -> Result<i32> {
    let machines = api.reconcile().await?;
    let code = dispatch(api, &machines, &config.lab, Command::Reset, box_name).await?;
    Ok(code)
}
