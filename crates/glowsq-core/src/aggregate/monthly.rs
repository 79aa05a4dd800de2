use serde::{Deserialize, Serialize};

use crate::config::ClockZone;
use crate::model::PeriodStat;

/// WAN byte totals for one calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub tx_bytes: u64,
    pub rx_bytes: u64,
}

/// Sum WAN bytes of the daily stats whose month equals `reference_month`.
///
/// Only the month number is compared. A daily report spanning more than
/// eleven months therefore folds the same month of the previous year into
/// the total.
pub fn monthly_totals(daily: &[PeriodStat], reference_month: u32, zone: ClockZone) -> MonthlyTotals {
    daily
        .iter()
        .filter(|stat| zone.month_of_millis(stat.timestamp_ms) == Some(reference_month))
        .fold(MonthlyTotals::default(), |acc, stat| MonthlyTotals {
            tx_bytes: acc.tx_bytes.saturating_add(stat.wan_tx_bytes),
            rx_bytes: acc.rx_bytes.saturating_add(stat.wan_rx_bytes),
        })
}
