// Wire types for the three reads.
//
// Field presence varies between controller releases, so nearly every
// field is optional; `glowsq-core` decides what a missing value means.

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// What the controller sends back from a site-scoped endpoint.
///
/// Network application endpoints wrap data in `{meta, data}`. UniFi OS
/// may instead answer `{"error": {code, message}}` with HTTP 200 when
/// the proxy itself rejects the call.
#[derive(Debug, Deserialize)]
#[serde(untagged, bound = "T: DeserializeOwned")]
pub(crate) enum Reply<T> {
    Console { error: ConsoleError },
    Envelope {
        meta: Meta,
        #[serde(default = "Vec::new")]
        data: Vec<T>,
    },
}

#[derive(Debug, Deserialize)]
pub(crate) struct Meta {
    pub rc: String,
    #[serde(default)]
    pub msg: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConsoleError {
    pub code: u16,
    #[serde(default)]
    pub message: Option<String>,
}

/// One connected station from `stat/sta`. Only the fields the display
/// uses are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct StationEntry {
    pub mac: String,
    #[serde(default)]
    pub hostname: Option<String>,
    /// Alias set in the controller UI.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_guest: Option<bool>,
    #[serde(default)]
    pub is_wired: Option<bool>,
    /// Seconds since association.
    #[serde(default)]
    pub uptime: Option<i64>,
}

/// Site report granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    FiveMinutes,
    Daily,
}

impl Report {
    const HOUR_MS: i64 = 3_600_000;

    /// `stat/report/{name}.site`
    pub fn name(self) -> &'static str {
        match self {
            Self::FiveMinutes => "5minutes",
            Self::Daily => "daily",
        }
    }

    /// Look-back window ending now. The controller keeps 5-minute rows
    /// for about a day, daily rows for about a year.
    pub fn lookback_ms(self) -> i64 {
        match self {
            Self::FiveMinutes => 12 * Self::HOUR_MS,
            Self::Daily => 52 * 7 * 24 * Self::HOUR_MS,
        }
    }
}

/// One row of a site report. Byte counters are averaged by the
/// controller and often fractional.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRow {
    /// Period start, Unix milliseconds.
    pub time: i64,
    #[serde(default, rename = "wan-tx_bytes")]
    pub wan_tx_bytes: Option<f64>,
    #[serde(default, rename = "wan-rx_bytes")]
    pub wan_rx_bytes: Option<f64>,
}
