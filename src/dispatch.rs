//! Maps named commands onto the mutating API operations.
//!
//! This is the piece between the CLI and the client: it resolves the
//! human-entered machine name, enforces the free-tier restriction on
//! spawn/terminate, prints the operation's status line, and turns the
//! outcome into a process exit code.

use tracing::debug;

use crate::client::{render_envelope, ApiClient, DEFAULT_LAB};
use crate::error::Result;
use crate::machine::{find_machine_id, Machine};

/// A mutating command against one machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Spawn,
    Terminate,
    Own { flag: String, difficulty: u8 },
    Reset,
}

/// Run one command against the machine called `name` and translate the
/// outcome into a process exit code: 0 on success, 1 on failure.
///
/// Spawn and terminate are refused locally on free-tier labs; nothing else
/// is validated here. A name that matches no machine degrades to id 0 and is
/// rejected by the server like any other bad id.
pub async fn dispatch(
    api: &ApiClient,
    machines: &[Machine],
    lab: &str,
    command: Command,
    name: &str,
) -> Result<i32> {
    if lab == "free" {
        match command {
            Command::Spawn => {
                println!("Free users cannot spawn machines. Please use reset instead.");
                return Ok(1);
            }
            Command::Terminate => {
                println!("Free users cannot terminate machines. Please use reset instead.");
                return Ok(1);
            }
            _ => {}
        }
    }

    let id = find_machine_id(machines, name).unwrap_or(0);
    debug!("resolved {:?} to machine id {}", name, id);

    let outcome = match command {
        Command::Spawn => {
            println!("{}", attempt_notice("spawn", name));
            api.spawn_machine(id, DEFAULT_LAB).await?
        }
        Command::Terminate => {
            println!("{}", attempt_notice("terminate", name));
            api.terminate_machine(id, DEFAULT_LAB).await?
        }
        Command::Own { flag, difficulty } => {
            println!(
                "Attempting to own {} with flag {} and rating {}/10...",
                capitalize(name),
                flag,
                difficulty
            );
            api.own_machine(id, &flag, difficulty).await?
        }
        Command::Reset => {
            println!("{}", attempt_notice("reset", name));
            let envelope = api.reset_machine(id).await?;
            println!("{}", render_envelope(&envelope));
            return Ok(0);
        }
    };

    if !outcome.message.is_empty() {
        println!("{}", outcome.message);
    }
    Ok(if outcome.success { 0 } else { 1 })
}

fn attempt_notice(verb: &str, name: &str) -> String {
    format!(
        "Attempting to {} {}. This request often takes ~30 seconds, so be patient please...",
        verb,
        capitalize(name)
    )
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
