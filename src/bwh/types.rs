//! KiwiVM `getServiceInfo` payload.

use serde::{Deserialize, Serialize};

/// Fields of `getServiceInfo` the bot reports on.
///
/// KiwiVM returns many more fields; unknown ones are ignored. Every field is
/// optional because the API omits some of them for suspended or
/// freshly-provisioned servers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Status code of the call; only `Some(0)` means success
    #[serde(default)]
    pub error: Option<i64>,
    /// Human-readable error text when `error != 0`
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    /// Plan name, e.g. `bwh1g_ca`
    #[serde(default)]
    pub plan: Option<String>,
    /// Monthly transfer quota in bytes
    #[serde(default)]
    pub plan_monthly_data: Option<u64>,
    /// Transfer used in the current period, in bytes
    #[serde(default)]
    pub data_counter: Option<u64>,
    /// Unix timestamp of the next counter reset
    #[serde(default)]
    pub data_next_reset: Option<i64>,
}
