//! # Reed-Solomon Codec
//!
//! [`ReedSolomon`] ties the pieces together for one parity count. It holds
//! no scratch state of its own: field tables and generator polynomials are
//! process-wide and read-only, and every decode works in a fresh
//! [`DecoderContext`](crate::decoder::DecoderContext). A codec can therefore
//! be shared freely between threads.
//!
//! ## Codeword Layout
//!
//! ```text
//! ┌──────────────────────────────┬────────────────┐
//! │ data (k bytes, unchanged)    │ parity (P)     │   k + P <= 255
//! └──────────────────────────────┴────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rsfec_core::ReedSolomon;
//!
//! let rs = ReedSolomon::new(4)?;
//! let mut cw = rs.encode(b"Hello")?;
//! assert_eq!(cw.len(), 9);
//!
//! cw[1] ^= 0xFF;
//! let fixed = rs.decode(&mut cw, &[])?;
//! assert_eq!(fixed.positions(), &[1]);
//! assert_eq!(&cw[..5], b"Hello");
//! # Ok::<(), rsfec_core::FecError>(())
//! ```

use std::sync::Arc;

use crate::config::CodecConfig;
use crate::decoder::{self, Correction};
use crate::encoder::{self, MAX_CODEWORD_LEN};
use crate::error::{FecError, FecResult};
use crate::generator::{self, Generator};
use crate::gf;
use crate::observe::CodecStats;
use crate::syndrome::Syndromes;

/// Build the shared field tables and the generator for `parity`.
///
/// Safe to call any number of times from any thread; later calls return the
/// generator built by the first.
pub fn initialize(parity: usize) -> FecResult<&'static Generator> {
    gf::init();
    generator::shared(parity)
}

/// Systematic RS(n, n - P) codec over GF(256).
#[derive(Debug, Clone)]
pub struct ReedSolomon {
    generator: &'static Generator,
    verify: bool,
    stats: Option<Arc<CodecStats>>,
}

impl ReedSolomon {
    /// Codec with `parity` check symbols per codeword (1..=254).
    pub fn new(parity: usize) -> FecResult<Self> {
        let generator = initialize(parity)?;
        tracing::debug!(parity, "codec initialized");
        Ok(Self {
            generator,
            verify: false,
            stats: None,
        })
    }

    /// Codec described by a [`CodecConfig`].
    pub fn from_config(config: &CodecConfig) -> FecResult<Self> {
        Ok(Self::new(config.parity)?.with_verification(config.verify))
    }

    /// Re-check the syndromes of every correction before committing it.
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Record activity in `stats`.
    pub fn with_stats(mut self, stats: Arc<CodecStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Parity symbols per codeword.
    pub fn parity(&self) -> usize {
        self.generator.parity()
    }

    /// Longest message that fits in one codeword.
    pub fn max_data_len(&self) -> usize {
        MAX_CODEWORD_LEN - self.parity()
    }

    /// Undeclared byte errors guaranteed correctable without erasures.
    pub fn max_errors(&self) -> usize {
        self.parity() / 2
    }

    /// Declared erasures correctable when there are no other errors.
    pub fn max_erasures(&self) -> usize {
        self.parity()
    }

    pub fn verifies(&self) -> bool {
        self.verify
    }

    pub fn generator(&self) -> &'static Generator {
        self.generator
    }

    pub fn stats(&self) -> Option<&Arc<CodecStats>> {
        self.stats.as_ref()
    }

    /// Encode `message` into a new `message.len() + P` byte codeword.
    pub fn encode(&self, message: &[u8]) -> FecResult<Vec<u8>> {
        let codeword = encoder::encode(self.generator, message)?;
        self.count(|s| s.encoded.inc());
        Ok(codeword)
    }

    /// Encode into `out`, returning the codeword length.
    ///
    /// Nothing is written when the message is too long or `out` too short.
    pub fn encode_into(&self, message: &[u8], out: &mut [u8]) -> FecResult<usize> {
        let n = encoder::encode_into(self.generator, message, out)?;
        self.count(|s| s.encoded.inc());
        Ok(n)
    }

    /// Syndromes S_0..S_(P-1) of a received word.
    pub fn compute_syndromes(&self, codeword: &[u8]) -> Syndromes {
        Syndromes::compute(codeword, self.parity())
    }

    /// True when `syndromes` show no detectable error.
    pub fn is_zero(syndromes: &Syndromes) -> bool {
        syndromes.is_zero()
    }

    /// Correct `codeword` in place given its syndromes and the positions
    /// (0-indexed from the start) of bytes known to be unreliable.
    ///
    /// On `Err` the codeword is exactly as it was passed in.
    pub fn correct(
        &self,
        codeword: &mut [u8],
        erasures: &[usize],
        syndromes: &Syndromes,
    ) -> FecResult<Correction> {
        if syndromes.parity() != self.parity() {
            return Err(FecError::ParityMismatch {
                expected: self.parity(),
                actual: syndromes.parity(),
            });
        }

        let result = decoder::correct(codeword, erasures, syndromes, self.verify);
        self.record(codeword.len(), &result);
        result
    }

    /// Compute syndromes and correct `codeword` in place if needed.
    pub fn decode(&self, codeword: &mut [u8], erasures: &[usize]) -> FecResult<Correction> {
        let syndromes = self.compute_syndromes(codeword);
        self.correct(codeword, erasures, &syndromes)
    }

    fn count(&self, f: impl FnOnce(&CodecStats)) {
        if let Some(stats) = &self.stats {
            f(stats);
        }
    }

    fn record(&self, len: usize, result: &FecResult<Correction>) {
        match result {
            Ok(c) if c.is_clean() => {
                tracing::trace!(len, erasures = c.erasures(), "codeword clean");
                self.count(|s| {
                    s.clean.inc();
                    s.erasures.inc_by(c.erasures() as u64);
                });
            }
            Ok(c) => {
                tracing::debug!(
                    len,
                    errata = c.error_count(),
                    changed = c.changed_count(),
                    erasures = c.erasures(),
                    positions = ?c.positions(),
                    "codeword corrected"
                );
                self.count(|s| {
                    s.corrected.inc();
                    s.symbols_corrected.inc_by(c.changed_count() as u64);
                    s.erasures.inc_by(c.erasures() as u64);
                });
            }
            Err(e) if e.is_uncorrectable() => {
                tracing::debug!(len, error = %e, "codeword uncorrectable");
                self.count(|s| s.failed.inc());
            }
            Err(e) => {
                tracing::warn!(len, error = %e, "decode rejected");
            }
        }
    }
}
