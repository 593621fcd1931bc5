//! Client library for the Hack The Box machine API.
//!
//! The crate splits into:
//! - `client`: transport, response validation and one method per endpoint
//! - `machine`: machine records and ownership reconciliation
//! - `dispatch`: named commands mapped onto the mutating operations
//! - `config`: the on-disk `{api_key, lab}` pair
//! - `error`: the error taxonomy shared by all of the above
//!
//! The `htb` binary under `bin/htb/` is a thin front end over these modules;
//! scripts can depend on the library directly and call the per-endpoint
//! methods on [`ApiClient`].

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod machine;

pub use client::{
    render_envelope, render_value, validate, ApiClient, Envelope, OpOutcome, BASE_URL,
    DEFAULT_LAB, SWITCHABLE_LABS,
};
pub use config::Config;
pub use dispatch::{dispatch, Command};
pub use error::{Error, Result};
pub use machine::{find_machine_id, merge_owns, Machine, OwnershipRecord};
