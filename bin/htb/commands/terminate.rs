//! Terminate command - de-assign a machine from the account.
//!
//! Termination can take a couple of minutes server-side; no new machine can
//! be spawned until it completes.

use anyhow::Result;
use htb_client::{dispatch, ApiClient, Command, Config};

pub async fn run(api: &ApiClient, config: &Config, box_name: &str) -> Result<i32> {
    let machines = api.reconcile().await?;
    let code = dispatch(api, &machines, &config.lab, Command::Terminate, box_name).await?;
    Ok(code)
}
