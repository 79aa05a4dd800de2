// The three reads behind a display summary.

use chrono::Utc;
use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::models::{Report, ReportRow, StationEntry};
use crate::session::Session;

/// The controller only returns attributes that are asked for.
const REPORT_ATTRS: [&str; 8] = [
    "bytes",
    "wan-tx_bytes",
    "wan-rx_bytes",
    "wlan_bytes",
    "num_sta",
    "lan-num_sta",
    "wlan-num_sta",
    "time",
];

impl Session {
    /// Currently associated stations, `GET stat/sta`.
    pub async fn stations(&mut self) -> Result<Vec<StationEntry>, Error> {
        self.session_get("stat/sta").await
    }

    /// Report rows over `[start_ms, end_ms]`, oldest first.
    pub async fn report(
        &mut self,
        report: Report,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<ReportRow>, Error> {
        debug!(report = report.name(), start_ms, end_ms, "requesting site report");
        let endpoint = format!("stat/report/{}.site", report.name());
        let body = json!({ "attrs": REPORT_ATTRS, "start": start_ms, "end": end_ms });
        self.session_post(&endpoint, &body).await
    }

    /// Report rows for the report's look-back window ending now.
    pub async fn recent_report(&mut self, report: Report) -> Result<Vec<ReportRow>, Error> {
        let end_ms = Utc::now().timestamp_millis();
        self.report(report, end_ms.saturating_sub(report.lookback_ms()), end_ms)
            .await
    }
}
