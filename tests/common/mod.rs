//! Helpers shared by the integration tests.

use domain_rr::base::Name;
use std::str::FromStr;

/// Initializes tracing based logging.
///
/// Override the level with the env var RUST_LOG, e.g. RUST_LOG=trace.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .try_init()
        .ok();
}

#[allow(dead_code)]
pub fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}
