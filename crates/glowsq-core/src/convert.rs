// ── Wire → domain conversions ──
//
// The controller is loose about field presence and numeric types. These
// impls settle every gap once, so the aggregator works on total records.

use glowsq_api::{ReportRow, StationEntry};

use crate::model::{ClientRecord, PeriodStat};

impl From<StationEntry> for ClientRecord {
    fn from(c: StationEntry) -> Self {
        let hostname = c
            .hostname
            .filter(|h| !h.is_empty())
            .or_else(|| c.name.filter(|n| !n.is_empty()))
            .unwrap_or(c.mac);

        Self {
            is_guest: c.is_guest.unwrap_or(false),
            is_wired: c.is_wired.unwrap_or(false),
            uptime: c.uptime.unwrap_or(0),
            hostname,
        }
    }
}

impl From<ReportRow> for PeriodStat {
    fn from(s: ReportRow) -> Self {
        Self {
            timestamp_ms: s.time,
            wan_tx_bytes: whole_bytes(s.wan_tx_bytes),
            wan_rx_bytes: whole_bytes(s.wan_rx_bytes),
        }
    }
}

/// Round a reported counter to the nearest byte, treating missing,
/// negative and non-finite values as zero.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
fn whole_bytes(raw: Option<f64>) -> u64 {
    match raw {
        // `as` saturates at u64::MAX for out-of-range floats.
        Some(v) if v.is_finite() && v > 0.0 => v.round() as u64,
        _ => 0,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(value: serde_json::Value) -> ClientRecord {
        serde_json::from_value::<StationEntry>(value)
            .unwrap()
            .into()
    }

    fn stat(value: serde_json::Value) -> PeriodStat {
        serde_json::from_value::<ReportRow>(value)
            .unwrap()
            .into()
    }

    #[test]
    fn client_label_prefers_hostname() {
        let c = client(json!({
            "mac": "aa:bb:cc:dd:ee:ff",
            "hostname": "laptop",
            "name": "Work Laptop",
            "is_guest": true,
            "is_wired": false,
            "uptime": 42
        }));
        assert_eq!(c.hostname, "laptop");
        assert!(c.is_guest);
        assert!(!c.is_wired);
        assert_eq!(c.uptime, 42);
    }

    #[test]
    fn client_label_falls_back_to_alias_then_mac() {
        let aliased = client(json!({ "mac": "aa:bb:cc:dd:ee:01", "hostname": "", "name": "NAS" }));
        assert_eq!(aliased.hostname, "NAS");

        let bare = client(json!({ "mac": "aa:bb:cc:dd:ee:02" }));
        assert_eq!(bare.hostname, "aa:bb:cc:dd:ee:02");
        assert!(!bare.is_guest);
        assert!(!bare.is_wired);
        assert_eq!(bare.uptime, 0);
    }

    #[test]
    fn fractional_counters_round_to_whole_bytes() {
        let s = stat(json!({
            "time": 1_700_000_000_000_i64,
            "wan-tx_bytes": 1234.5,
            "wan-rx_bytes": 99.4
        }));
        assert_eq!(s.timestamp_ms, 1_700_000_000_000);
        assert_eq!(s.wan_tx_bytes, 1235);
        assert_eq!(s.wan_rx_bytes, 99);
    }

    #[test]
    fn missing_or_negative_counters_are_zero() {
        let s = stat(json!({ "time": 0, "wan-tx_bytes": -10.0 }));
        assert_eq!(s.wan_tx_bytes, 0);
        assert_eq!(s.wan_rx_bytes, 0);
    }
}
