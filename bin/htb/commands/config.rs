//! Config command - store the API key and lab tier.

use anyhow::Result;
use htb_client::Config;

use crate::style::{print_key_value, print_success};

pub fn run(api_key: &str, lab: &str) -> Result<i32> {
    let config = Config {
        api_key: api_key.to_string(),
        lab: lab.to_string(),
    };
    config.save()?;

    print_success("Configuration saved");
    print_key_value("api_key", &config.api_key);
    print_key_value("lab", &config.lab);
    Ok(0)
}
