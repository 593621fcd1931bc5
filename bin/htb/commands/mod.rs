//! One module per subcommand, plus shared field-rendering helpers.

pub mod config;
pub mod info;
pub mod list;
pub mod own;
pub mod reset;
pub mod spawn;
pub mod stats;
pub mod terminate;
pub mod vpn;

use htb_client::{render_value, Machine};

/// Columns shown by `list` when no field selection is given.
pub(crate) const DEFAULT_FIELDS: [&str; 7] = [
    "id",
    "name",
    "os",
    "rating",
    "owned_user",
    "owned_root",
    "active",
];

/// Flatten a machine into its display fields, typed ones and `extra` alike.
pub(crate) fn machine_fields(machine: &Machine) -> serde_json::Map<String, serde_json::Value> {
    match serde_json::to_value(machine) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    }
}

/// Nested objects flatten to `key: value` lines; strings print bare.
pub(crate) fn render_field(value: Option<&serde_json::Value>) -> String {
    match value {
        None => String::new(),
        Some(serde_json::Value::Object(map)) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", k, render_value(v)))
            .collect::<Vec<_>>()
            .join("\n"),
        Some(v) => render_value(v),
    }
}
