//! Vpn command - VPN status, free slots and lab switching.

use anyhow::Result;
use clap::{Args, Subcommand};
use htb_client::{render_envelope, ApiClient};

use crate::style::print_header;

#[derive(Args)]
pub struct VpnArgs {
    #[command(subcommand)]
    pub action: VpnAction,
}

#[derive(Subcommand)]
pub enum VpnAction {
    /// Status of every VPN server
    Status,
    /// Free slots per VPN server
    Slots,
    /// Connection status of this account
    Connection {
        /// Show the fortress connection instead of the lab connection
        #[arg(long)]
        fortress: bool,
    },
    /// Switch the lab the account is connected to
    Switch {
        /// One of: usfree, eufree, usvip, euvip, euvipbeta
        lab: String,
    },
}

pub async fn run(api: &ApiClient, args: VpnArgs) -> Result<i32> {
    let envelope = match args.action {
        VpnAction::Status => {
            print_header("VPN Status");
            api.vpn_statusall().await?
        }
        VpnAction::Slots => {
            print_header("VPN Free Slots");
            api.vpn_freeslots().await?
        }
        VpnAction::Connection { fortress: false } => {
            print_header("Connection");
            api.connection_status().await?
        }
        VpnAction::Connection { fortress: true } => {
            print_header("Fortress Connection");
            api.fortress_connection_status().await?
        }
        VpnAction::Switch { lab } => {
            print_header("Switch Lab");
            api.switch_lab(&lab).await?
        }
    };
    println!("{}", render_envelope(&envelope));
    Ok(0)
}
