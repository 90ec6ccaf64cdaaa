//! # Codec Statistics
//!
//! Lock-free counters describing what a codec has seen. A single
//! [`CodecStats`] can be shared between any number of codecs and threads via
//! `Arc`.
//!
//! ```rust
//! use std::sync::Arc;
//! use rsfec_core::{observe::CodecStats, ReedSolomon};
//!
//! let stats = Arc::new(CodecStats::new());
//! let rs = ReedSolomon::new(4).unwrap().with_stats(stats.clone());
//!
//! let mut cw = rs.encode(b"telemetry").unwrap();
//! cw[2] ^= 0x40;
//! rs.decode(&mut cw, &[]).unwrap();
//!
//! let snap = stats.snapshot();
//! assert_eq!(snap.encoded, 1);
//! assert_eq!(snap.corrected, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// A simple atomic counter.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    /// Create a new counter.
    pub fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }

    /// Increment by 1.
    #[inline]
    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment by a specific amount.
    #[inline]
    pub fn inc_by(&self, n: u64) {
        self.value.fetch_add(n, Ordering::Relaxed);
    }

    /// Get the current value.
    #[inline]
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Reset to zero.
    #[inline]
    pub fn reset(&self) {
        self.value.store(0, Ordering::Relaxed);
    }
}

/// Counters for encode and decode activity.
#[derive(Debug, Default)]
pub struct CodecStats {
    /// Codewords produced
    pub encoded: Counter,
    /// Received words with an all-zero syndrome
    pub clean: Counter,
    /// Received words repaired successfully
    pub corrected: Counter,
    /// Bytes changed by repairs
    pub symbols_corrected: Counter,
    /// Erasures declared by callers
    pub erasures: Counter,
    /// Received words rejected as uncorrectable
    pub failed: Counter,
}

impl CodecStats {
    /// Create a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point-in-time copy of every counter.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            encoded: self.encoded.get(),
            clean: self.clean.get(),
            corrected: self.corrected.get(),
            symbols_corrected: self.symbols_corrected.get(),
            erasures: self.erasures.get(),
            failed: self.failed.get(),
        }
    }

    /// Reset every counter to zero.
    pub fn reset(&self) {
        self.encoded.reset();
        self.clean.reset();
        self.corrected.reset();
        self.symbols_corrected.reset();
        self.erasures.reset();
        self.failed.reset();
    }
}

/// Plain copy of [`CodecStats`] for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub encoded: u64,
    pub clean: u64,
    pub corrected: u64,
    pub symbols_corrected: u64,
    pub erasures: u64,
    pub failed: u64,
}

impl StatsSnapshot {
    /// Total received words decoded.
    pub fn decoded(&self) -> u64 {
        self.clean + self.corrected + self.failed
    }

    /// Fraction of decoded words that could not be repaired.
    pub fn failure_rate(&self) -> f64 {
        match self.decoded() {
            0 => 0.0,
            n => self.failed as f64 / n as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_counter() {
        let c = Counter::new();
        c.inc();
        c.inc_by(4);
        assert_eq!(c.get(), 5);
        c.reset();
        assert_eq!(c.get(), 0);
    }

    #[test]
    fn test_snapshot_and_rates() {
        let stats = CodecStats::new();
        stats.clean.inc_by(6);
        stats.corrected.inc_by(3);
        stats.failed.inc();
        let snap = stats.snapshot();
        assert_eq!(snap.decoded(), 10);
        assert!((snap.failure_rate() - 0.1).abs() < 1e-12);

        stats.reset();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
        assert_eq!(StatsSnapshot::default().failure_rate(), 0.0);
    }

    #[test]
    fn test_shared_across_threads() {
        let stats = Arc::new(CodecStats::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let stats = stats.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        stats.encoded.inc();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(stats.encoded.get(), 4000);
    }
}
