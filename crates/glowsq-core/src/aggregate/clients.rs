use serde::{Deserialize, Serialize};

use crate::model::ClientRecord;

/// Starting value for the running uptime minimum. Larger than any real
/// uptime, so it survives unchanged when there are no clients.
pub const UPTIME_SENTINEL: i64 = 9_999_999_999;

/// Client counts for one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientTally {
    /// Non-guest clients.
    pub clients: usize,
    pub guests: usize,
    pub wireless: usize,
    pub wired: usize,
    /// Label of the most recently connected client; `None` means no data.
    pub newest: Option<String>,
    pub min_uptime: i64,
}

impl Default for ClientTally {
    fn default() -> Self {
        Self {
            clients: 0,
            guests: 0,
            wireless: 0,
            wired: 0,
            newest: None,
            min_uptime: UPTIME_SENTINEL,
        }
    }
}

/// Count guests/clients and wired/wireless, and find the newest client.
///
/// The newest client is the first one with the strictly smallest uptime,
/// so ties keep the earlier record.
pub fn tally_clients(clients: &[ClientRecord]) -> ClientTally {
    let mut tally = ClientTally::default();

    for client in clients {
        if client.is_guest {
            tally.guests += 1;
        } else {
            tally.clients += 1;
        }

        if client.is_wired {
            tally.wired += 1;
        } else {
            tally.wireless += 1;
        }

        if client.uptime < tally.min_uptime {
            tally.newest = Some(client.hostname.clone());
            tally.min_uptime = client.uptime;
        }
    }

    tally
}
