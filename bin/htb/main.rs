//! Command line utility for the Hack The Box API.

mod commands;
mod style;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use htb_client::{ApiClient, Config};

use crate::style::print_error;

#[derive(Parser)]
#[command(name = "htb", version, about = "Interact with the Hack The Box machine API")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Store the API key and lab tier used by every other command
    Config {
        /// API key from the account settings page
        #[arg(long = "api-key", value_name = "KEY")]
        api_key: String,
        /// Lab tier the account connects to
        #[arg(long, value_parser = ["free", "vip"])]
        lab: String,
    },
    /// List machines
    List(commands::list::ListArgs),
    /// Show one machine
    Info(commands::info::InfoArgs),
    /// [VIP only] Spawn a machine
    Spawn {
        /// Name of the machine to spawn
        #[arg(value_name = "BOX")]
        box_name: String,
    },
    /// [VIP only] Terminate a machine
    Terminate {
        /// Name of the machine to terminate
        #[arg(value_name = "BOX")]
        box_name: String,
    },
    /// Submit a flag to own a machine
    Own {
        /// Name of the machine the flag belongs to
        #[arg(value_name = "BOX")]
        box_name: String,
        /// The flag to submit; user vs root is determined server-side
        #[arg(short, long)]
        flag: String,
        /// How difficult the machine was, 1-10
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=10))]
        difficulty: u8,
    },
    /// [Free] Reset a machine
    Reset {
        /// Name of the machine to reset
        #[arg(value_name = "BOX")]
        box_name: String,
    },
    /// Platform statistics
    Stats(commands::stats::StatsArgs),
    /// VPN status, free slots and lab switching
    Vpn(commands::vpn::VpnArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            print_error(&format!("{e:#}"));
            1
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<i32> {
    if let Cmd::Config { api_key, lab } = &cli.command {
        return commands::config::run(api_key, lab);
    }

    let config = Config::load()?;
    if config.api_key.is_empty() {
        print_error("No API key configured.");
        println!("Find the key on your account settings page, then run:");
        println!("    htb config --api-key <KEY> --lab <free|vip>");
        return Ok(1);
    }
    let api = ApiClient::new(&config.api_key);

    match cli.command {
        Cmd::Config { .. } => unreachable!("handled above"),
        Cmd::List(args) => commands::list::run(&api, args).await,
        Cmd::Info(args) => commands::info::run(&api, args).await,
        Cmd::Spawn { box_name } => commands::spawn::run(&api, &config, &box_name).await,
        Cmd::Terminate { box_name } => commands::terminate::run(&api, &config, &box_name).await,
        Cmd::Own {
            box_name,
            flag,
            difficulty,
        } => commands::own::run(&api, &config, &box_name, flag, difficulty).await,
        Cmd::Reset { box_name } => commands::reset::run(&api, &config, &box_name).await,
        Cmd::Stats(args) => commands::stats::run(&api, args).await,
        Cmd::Vpn(args) => commands::vpn::run(&api, args).await,
    }
}
