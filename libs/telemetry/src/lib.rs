//! Logging setup shared by the Adaptive Card binaries.
//! Installs a `tracing` subscriber configured from the environment so the
//! parser's spans and warnings end up on stderr as text or JSON.

mod config;
mod tracing_init;

pub use config::TelemetryConfig;
pub use tracing_init::{init_telemetry, install, record_parse_summary};
