//! Client and traffic aggregation between `glowsq-api` and the display server.
//!
//! - **[`Controller`]** opens one controller session per call and returns
//!   a [`SiteSnapshot`] or, via [`Controller::summarize`], a ready-made
//!   [`Summary`].
//!
//! - **Aggregation** ([`aggregate`]) is pure: client tallies, the scaled
//!   traffic graph, monthly WAN totals and compact byte labels.
//!
//! - **Domain model** ([`model`]) carries only the fields the display
//!   needs. Raw controller records are converted in [`convert`].

pub mod aggregate;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod summary;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregate::{
    DEFAULT_GRAPH_HEIGHT, DEFAULT_GRAPH_WIDTH, GraphOptions, GraphScale, format_bytes,
};
pub use config::{ClockZone, ControllerConfig, PlatformHint, TlsVerification};
pub use controller::Controller;
pub use error::CoreError;
pub use model::{ClientRecord, PeriodStat, SiteSnapshot};
pub use summary::Summary;
