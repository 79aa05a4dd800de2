// ── Domain model ──
//
// Typed records the aggregator consumes. Built from the legacy API
// payloads in `convert.rs`; the aggregator never sees raw JSON.

use serde::{Deserialize, Serialize};

/// A connected device, reduced to what the display needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub is_guest: bool,
    pub is_wired: bool,
    /// Seconds since the client associated.
    pub uptime: i64,
    /// Display label: hostname, else alias, else MAC.
    pub hostname: String,
}

/// One period of a site report (5-minute or daily granularity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStat {
    /// Start of the period, Unix milliseconds.
    pub timestamp_ms: i64,
    pub wan_tx_bytes: u64,
    pub wan_rx_bytes: u64,
}

/// Everything fetched from the controller for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSnapshot {
    pub clients: Vec<ClientRecord>,
    /// 5-minute site report, oldest first.
    pub five_minutes: Vec<PeriodStat>,
    /// Daily site report, oldest first.
    pub daily: Vec<PeriodStat>,
}
