//! Machine records and ownership reconciliation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A machine on the network.
///
/// The typed fields are the ones the client interprets; everything else the
/// server sends (ip, points, release dates, maker, ...) lands in `extra` so
/// display layers can still show it. `owned_user`, `owned_root` and `active`
/// are filled in locally by [`merge_owns`], never by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub retired: bool,
    #[serde(default)]
    pub owned_user: bool,
    #[serde(default)]
    pub owned_root: bool,
    #[serde(default)]
    pub active: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Whether the current user has taken the user and root flags of one machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipRecord {
    pub id: u64,
    #[serde(default)]
    pub owned_user: bool,
    #[serde(default)]
    pub owned_root: bool,
}

/// Merge ownership records into the machine list.
///
/// Machines without a matching record default to not owned, and `active` is
/// derived from `retired` for every machine. Records whose id matches no
/// machine are ignored. The listing order of `machines` is kept as-is.
pub fn merge_owns(mut machines: Vec<Machine>, owns: &[OwnershipRecord]) -> Vec<Machine> {
    let by_id: HashMap<u64, &OwnershipRecord> = owns.iter().map(|rec| (rec.id, rec)).collect();
    for machine in &mut machines {
        match by_id.get(&machine.id) {
            Some(rec) => {
                machine.owned_user = rec.owned_user;
                machine.owned_root = rec.owned_root;
            }
            None => {
                machine.owned_user = false;
                machine.owned_root = false;
            }
        }
        machine.active = !machine.retired;
    }
    machines
}

/// Resolve a human-entered machine name to its id, case-insensitively.
pub fn find_machine_id(machines: &[Machine], name: &str) -> Option<u64> {
    machines
        .iter()
        .find(|m| m.name.eq_ignore_ascii_case(name))
        .map(|m| m.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn machine(id: u64, name: &str, retired: bool) -> Machine {
        Machine {
            id,
            name: name.to_string(),
            os: String::new(),
            rating: 0.0,
            retired,
            owned_user: false,
            owned_root: false,
            active: false,
            extra: serde_json::Map::new(),
        }
    }

    fn own(id: u64, user: bool, root: bool) -> OwnershipRecord {
        OwnershipRecord {
            id,
            owned_user: user,
            owned_root: root,
        }
    }

    #[test]
    fn merge_empty_machines_yields_empty() {
        let merged = merge_owns(vec![], &[own(1, true, true), own(2, true, false)]);
        assert!(merged.is_empty());
    }

    #[test]
    fn merge_defaults_to_not_owned() {
        let merged = merge_owns(vec![machine(7, "Jeeves", false)], &[own(3, true, true)]);
        assert!(!merged[0].owned_user);
        assert!(!merged[0].owned_root);
    }

    #[test]
    fn merge_applies_matching_record() {
        let machines = vec![machine(1, "Foo", false)];
        let merged = merge_owns(machines, &[own(1, true, false)]);
        assert_eq!(merged[0].id, 1);
        assert_eq!(merged[0].name, "Foo");
        assert!(merged[0].owned_user);
        assert!(!merged[0].owned_root);
        assert!(!merged[0].retired);
        assert!(merged[0].active);
    }

    #[test]
    fn merge_derives_active_from_retired() {
        let machines = vec![machine(1, "Lame", true), machine(2, "Bashed", false)];
        let merged = merge_owns(machines, &[]);
        assert!(!merged[0].active);
        assert!(merged[1].active);
    }

    #[test]
    fn merge_keeps_listing_order() {
        let machines = vec![
            machine(9, "Zeta", false),
            machine(3, "Alpha", false),
            machine(5, "Mango", false),
        ];
        let merged = merge_owns(machines, &[own(5, true, true)]);
        let ids: Vec<u64> = merged.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![9, 3, 5]);
    }

    #[test]
    fn merge_ignores_records_for_unknown_ids() {
        let merged = merge_owns(vec![machine(1, "Foo", false)], &[own(42, true, true)]);
        assert_eq!(merged.len(), 1);
        assert!(!merged[0].owned_user);
    }

    #[test]
    fn find_machine_id_is_case_insensitive() {
        let machines = vec![machine(4, "Netmon", false), machine(8, "Irked", false)];
        assert_eq!(find_machine_id(&machines, "netmon"), Some(4));
        assert_eq!(find_machine_id(&machines, "IRKED"), Some(8));
        assert_eq!(find_machine_id(&machines, "nope"), None);
    }

    #[test]
    fn unknown_server_fields_land_in_extra() {
        let machines: Vec<Machine> = serde_json::from_value(json!([
            {"id": 1, "name": "Foo", "os": "Linux", "rating": 4.6, "retired": false,
             "ip": "10.10.10.7", "points": 20}
        ]))
        .unwrap();
        assert_eq!(machines[0].extra.get("ip"), Some(&json!("10.10.10.7")));
        assert_eq!(machines[0].extra.get("points"), Some(&json!(20)));
    }

    #[test]
    fn machine_parses_with_minimal_fields() {
        let machines: Vec<Machine> =
            serde_json::from_value(json!([{"id": 1, "name": "Foo", "retired": false}])).unwrap();
        let merged = merge_owns(machines, &[own(1, true, false)]);
        assert!(merged[0].owned_user);
        assert!(!merged[0].owned_root);
        assert!(merged[0].active);
        assert_eq!(merged[0].os, "");
    }
}
