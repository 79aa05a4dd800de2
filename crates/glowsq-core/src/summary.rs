// ── Display summary ──
//
// The JSON document the display firmware polls. Field order is the wire
// order; the firmware reads keys by name, but humans debugging with curl
// read them top to bottom.

use serde::{Deserialize, Serialize};

use crate::aggregate::{
    GraphOptions, build_graph, format_bytes, monthly_totals, tally_clients,
};
use crate::config::ClockZone;
use crate::model::SiteSnapshot;

/// Flat summary of one site, ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub clients: usize,
    pub guests: usize,
    pub wireless: usize,
    pub wired: usize,
    pub curr_rx: String,
    pub max_rx: String,
    pub curr_tx: String,
    pub max_tx: String,
    pub min_uptime: i64,
    /// Omitted when the site has no clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newest: Option<String>,
    pub month_tx: String,
    pub month_rx: String,
    pub graph: Vec<u32>,
}

impl Summary {
    /// Aggregate a snapshot. `reference_month` (1-12) selects which daily
    /// stats count toward the monthly totals.
    pub fn build(
        snapshot: &SiteSnapshot,
        options: &GraphOptions,
        reference_month: u32,
        zone: ClockZone,
    ) -> Self {
        let tally = tally_clients(&snapshot.clients);
        let month = monthly_totals(&snapshot.daily, reference_month, zone);
        let graph = build_graph(&snapshot.five_minutes, options);

        Self {
            clients: tally.clients,
            guests: tally.guests,
            wireless: tally.wireless,
            wired: tally.wired,
            curr_rx: label(graph.curr_rx),
            max_rx: label(graph.max_rx),
            curr_tx: label(graph.curr_tx),
            max_tx: label(graph.max_tx),
            min_uptime: tally.min_uptime,
            newest: tally.newest,
            month_tx: label(month.tx_bytes),
            month_rx: label(month.rx_bytes),
            graph: graph.heights,
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn label(bytes: u64) -> String {
    format_bytes(bytes as f64, 0)
}
