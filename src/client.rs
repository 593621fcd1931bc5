//! HTTP client for the Hack The Box API.
//!
//! The API is inconsistent about how calls authenticate and how failures are
//! reported, and the client reproduces those quirks rather than papering over
//! them:
//! - Most endpoints take the token as an `api_token` query parameter; the
//!   rest rely on nothing beyond the fixed `User-Agent`.
//! - Successful calls usually answer `{"success": "1", ...}` (the string,
//!   not a number). Several legacy endpoints never set the field, or set it
//!   unreliably; those are requested raw and returned unvalidated.
//! - Mutating VM operations report failures that an interactive caller wants
//!   as a status line, not an error; they degrade to [`OpOutcome`].

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::machine::{merge_owns, Machine, OwnershipRecord};

/// Base URL every request path is appended to.
pub const BASE_URL: &str = "https://www.hackthebox.eu/api";

/// Lab used for VM assign/remove calls.
pub const DEFAULT_LAB: &str = "vip";

/// Labs accepted by the lab-switch endpoint.
pub const SWITCHABLE_LABS: [&str; 5] = ["usfree", "eufree", "usvip", "euvip", "euvipbeta"];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw decoded body of an API response, prior to validation.
pub type Envelope = serde_json::Map<String, Value>;

// ============================================================================
// RESPONSE VALIDATION
// ============================================================================

/// Check the `success` marker on an envelope.
///
/// Anything other than the literal string `"1"` is a rejection. The rejected
/// envelope is rendered whole into the error so callers keep every field the
/// server sent, not just an error code.
pub fn validate(envelope: Envelope) -> Result<Envelope> {
    match envelope.get("success") {
        Some(Value::String(s)) if s == "1" => Ok(envelope),
        _ => Err(Error::Rejected(render_envelope(&envelope))),
    }
}

/// Render an envelope as one `key: value` line per field.
pub fn render_envelope(envelope: &Envelope) -> String {
    envelope
        .iter()
        .map(|(k, v)| format!("{}: {}", k, render_value(v)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strings render bare, everything else as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Outcome of a mutating VM/flag operation.
///
/// These operations degrade rejection into a uniform result instead of an
/// error: `message` is what the caller shows, `diagnostic` keeps the full
/// rejection detail when there was one.
#[derive(Debug, Clone, PartialEq)]
pub struct OpOutcome {
    pub success: bool,
    pub message: String,
    pub diagnostic: Option<String>,
}

// ============================================================================
// CLIENT
// ============================================================================

/// One instance per credential; every operation is a single round-trip.
pub struct ApiClient {
    base_url: String,
    api_token: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Client against the production API.
    pub fn new(api_token: &str) -> Self {
        Self::with_base_url(BASE_URL, api_token)
    }

    /// Client against an explicit base URL, for tests and staging use.
    pub fn with_base_url(base_url: &str, api_token: &str) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("htb-client/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("http client");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
            http,
        }
    }

    /// Append the query-parameter credential to a path. Paths arrive with
    /// their trailing slashes already in place and are kept verbatim.
    fn auth(&self, path: &str) -> String {
        format!("{}?api_token={}", path, self.api_token)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // The body is decoded regardless of HTTP status: the upstream signals
    // failure inside the envelope, not on the status line.
    async fn get_raw<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("GET {}", path);
        let resp = self.http.get(self.url(path)).send().await?;
        Ok(resp.json().await?)
    }

    async fn post_raw<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Option<&[(&str, String)]>,
    ) -> Result<T> {
        debug!("POST {}", path);
        let mut req = self.http.post(self.url(path));
        if let Some(form) = form {
            req = req.form(form);
        }
        Ok(req.send().await?.json().await?)
    }

    /// GET returning a validated envelope.
    async fn get(&self, path: &str) -> Result<Envelope> {
        validate(self.get_raw(path).await?)
    }

    /// POST returning a validated envelope.
    async fn post(&self, path: &str, form: Option<&[(&str, String)]>) -> Result<Envelope> {
        validate(self.post_raw(path, form).await?)
    }

    // ------------------------------------------------------------------
    // Statistics
    // ------------------------------------------------------------------

    /// Platform-wide statistics.
    pub async fn global_stats(&self) -> Result<Envelope> {
        self.post("/stats/global", None).await
    }

    /// Overview statistics. This endpoint carries no success marker at all,
    /// so the body comes back unvalidated; the observed contract is exactly
    /// three top-level fields.
    pub async fn overview_stats(&self) -> Result<Envelope> {
        self.get_raw("/stats/overview").await
    }

    /// Own and user totals over the trailing `days` days (upstream default
    /// is 30).
    pub async fn daily_owns(&self, days: u32) -> Result<Envelope> {
        self.post(&format!("/stats/daily/owns/{}", days), None).await
    }

    /// Conversation listing. No success marker; unvalidated.
    pub async fn list_conversations(&self) -> Result<Envelope> {
        let path = self.auth("/conversations/list/");
        self.post_raw(&path, None).await
    }

    // ------------------------------------------------------------------
    // VPN / connection
    // ------------------------------------------------------------------

    /// Free slots on each VPN server.
    pub async fn vpn_freeslots(&self) -> Result<Envelope> {
        let path = self.auth("/vpnserver/freeslots/");
        self.post(&path, None).await
    }

    /// Status of every VPN server.
    pub async fn vpn_statusall(&self) -> Result<Envelope> {
        let path = self.auth("/vpnserver/status/all/");
        self.get(&path).await
    }

    /// Current lab connection status. The success marker misbehaves on this
    /// endpoint, so no validation is applied.
    pub async fn connection_status(&self) -> Result<Envelope> {
        let path = self.auth("/users/htb/connection/status/");
        self.post_raw(&path, None).await
    }

    /// Fortress connection status. Same unreliable success marker as
    /// [`connection_status`](Self::connection_status).
    pub async fn fortress_connection_status(&self) -> Result<Envelope> {
        let path = self.auth("/users/htb/fortress/connection/status/");
        self.post_raw(&path, None).await
    }

    /// Switch the lab the profile is connected to.
    ///
    /// `lab` must be one of [`SWITCHABLE_LABS`]; anything else fails before a
    /// request is made. The endpoint answers without a success marker.
    pub async fn switch_lab(&self, lab: &str) -> Result<Envelope> {
        if !SWITCHABLE_LABS.contains(&lab) {
            return Err(Error::InvalidArgument(format!(
                "unknown lab {:?}, expected one of {:?}",
                lab, SWITCHABLE_LABS
            )));
        }
        let path = self.auth(&format!("/labs/switch/{}/", lab));
        self.post_raw(&path, None).await
    }

    // ------------------------------------------------------------------
    // Machines
    // ------------------------------------------------------------------

    /// Per-machine ownership records for the current user.
    pub async fn owns(&self) -> Result<Vec<OwnershipRecord>> {
        let path = self.auth("/machines/owns");
        self.get_raw(&path).await
    }

    /// Every machine on the network, in server listing order.
    pub async fn machines(&self) -> Result<Vec<Machine>> {
        let path = self.auth("/machines/get/all/");
        self.get_raw(&path).await
    }

    /// A single machine by id.
    pub async fn machine(&self, id: u64) -> Result<Machine> {
        let path = self.auth(&format!("/machines/get/{}/", id));
        self.get_raw(&path).await
    }

    /// Fetch the ownership records and the machine catalog and merge them:
    /// `owned_user`/`owned_root` come from the matching record, `active` is
    /// derived from `retired`. Listing order is preserved.
    pub async fn reconcile(&self) -> Result<Vec<Machine>> {
        let owns = self.owns().await?;
        let machines = self.machines().await?;
        Ok(merge_owns(machines, &owns))
    }

    // ------------------------------------------------------------------
    // Mutating VM operations
    // ------------------------------------------------------------------

    /// Spawn a machine. `lab` is `"vip"` for paying accounts.
    ///
    /// Rejections come back as a failed [`OpOutcome`], not an error. The
    /// call returns once the server accepts the request; provisioning
    /// continues server-side for up to a few minutes.
    pub async fn spawn_machine(&self, id: u64, lab: &str) -> Result<OpOutcome> {
        let path = self.auth(&format!("/vm/{}/assign/{}", lab, id));
        self.vm_outcome("spawn", self.post(&path, None).await)
    }

    /// Terminate a machine. Same degrade policy as
    /// [`spawn_machine`](Self::spawn_machine).
    pub async fn terminate_machine(&self, id: u64, lab: &str) -> Result<OpOutcome> {
        let path = self.auth(&format!("/vm/{}/remove/{}", lab, id));
        self.vm_outcome("terminate", self.post(&path, None).await)
    }

    /// Submit a flag for a machine. `difficulty` is the user-facing 1-10
    /// rating; the wire protocol wants it times ten.
    pub async fn own_machine(&self, id: u64, flag: &str, difficulty: u8) -> Result<OpOutcome> {
        let path = self.auth("/machines/own");
        let form = [
            ("id", id.to_string()),
            ("flag", flag.to_string()),
            ("difficulty", (u32::from(difficulty) * 10).to_string()),
        ];
        self.vm_outcome("own", self.post(&path, Some(&form[..])).await)
    }

    /// Submit a user flag hash for a machine. `diff` is already on the
    /// server's 10-100 scale. Any rejection collapses to `false`.
    pub async fn own_machine_user(&self, id: u64, hash: &str, diff: u32) -> Result<bool> {
        let path = self.auth(&format!("/machines/own/user/{}/", id));
        let form = [("hash", hash.to_string()), ("diff", diff.to_string())];
        self.flag_outcome(self.post(&path, Some(&form[..])).await)
    }

    /// Submit a root flag hash for a machine. See
    /// [`own_machine_user`](Self::own_machine_user).
    pub async fn own_machine_root(&self, id: u64, hash: &str, diff: u32) -> Result<bool> {
        let path = self.auth(&format!("/machines/own/root/{}/", id));
        let form = [("hash", hash.to_string()), ("diff", diff.to_string())];
        self.flag_outcome(self.post(&path, Some(&form[..])).await)
    }

    /// Reset a machine. The free-tier alternative to a terminate/spawn
    /// cycle; other users can cancel the reset server-side.
    pub async fn reset_machine(&self, id: u64) -> Result<Envelope> {
        let path = self.auth(&format!("/vm/reset/{}/", id));
        self.post(&path, None).await
    }

    /// Collapse a validated response into an [`OpOutcome`], turning a
    /// rejection into a failed outcome instead of an error. Transport
    /// failures still propagate.
    fn vm_outcome(&self, op: &str, result: Result<Envelope>) -> Result<OpOutcome> {
        match result {
            Ok(envelope) => Ok(OpOutcome {
                success: true,
                message: envelope.get("status").map(render_value).unwrap_or_default(),
                diagnostic: None,
            }),
            Err(Error::Rejected(detail)) => {
                warn!("{} rejected by api:\n{}", op, detail);
                Ok(OpOutcome {
                    success: false,
                    message: "An Error Occurred".to_string(),
                    diagnostic: Some(detail),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Like [`vm_outcome`](Self::vm_outcome) but for the bare-boolean flag
    /// endpoints.
    fn flag_outcome(&self, result: Result<Envelope>) -> Result<bool> {
        match result {
            Ok(_) => Ok(true),
            Err(Error::Rejected(detail)) => {
                debug!("flag submission rejected:\n{}", detail);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
