//! # Observability
//!
//! - **Logging**: `tracing` events rendered by a `tracing-subscriber` layer
//! - **Stats**: atomic counters a codec updates as it works
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rsfec_core::observe::{self, LogConfig};
//!
//! let stats = observe::init(&LogConfig::default());
//! let rs = rsfec_core::ReedSolomon::new(16)?.with_stats(stats.clone());
//! ```

pub mod logging;
pub mod stats;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
pub use stats::{CodecStats, Counter, StatsSnapshot};

use std::sync::Arc;

/// Set up logging and return a fresh shared stats instance.
pub fn init(log_config: &LogConfig) -> Arc<CodecStats> {
    init_logging(log_config);
    Arc::new(CodecStats::new())
}
