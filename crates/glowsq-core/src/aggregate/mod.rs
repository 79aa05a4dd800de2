// ── Stats aggregation ──
//
// Pure, single-pass transformations over one request's snapshot.
// Nothing here performs I/O or reads a clock.

pub mod bytes_fmt;
pub mod clients;
pub mod graph;
pub mod monthly;

pub use bytes_fmt::format_bytes;
pub use clients::{ClientTally, UPTIME_SENTINEL, tally_clients};
pub use graph::{
    DEFAULT_GRAPH_HEIGHT, DEFAULT_GRAPH_WIDTH, Graph, GraphOptions, GraphScale, build_graph,
};
pub use monthly::{MonthlyTotals, monthly_totals};
