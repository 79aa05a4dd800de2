// glowsq-api: read-only UniFi controller session
//
// A `Session` logs in once, performs the three reads a status display
// needs (connected stations, 5-minute and daily site reports) and logs
// out. Nothing here is shared between sessions.

pub mod error;
pub mod models;
pub mod platform;
pub mod session;
pub mod transport;

mod reads;

pub use error::Error;
pub use models::{Report, ReportRow, StationEntry};
pub use platform::ControllerPlatform;
pub use session::Session;
pub use transport::{TlsMode, TransportConfig};
