//! # Reed-Solomon FEC over GF(256)
//!
//! Systematic Reed-Solomon forward error correction for byte-oriented radio
//! links. A message of up to `255 - P` bytes is extended with `P` parity
//! bytes; the receiver can repair up to `t` unknown byte errors and `e`
//! declared erasures as long as `2t + e <= P`.
//!
//! ## Overview
//!
//! - **Field**: GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//!   (0x11D) and generator α = 2
//! - **Encoding**: LFSR division by g(x) = Π (x + α^n), n = 1..P
//! - **Decoding**: syndromes, erasure-aware Berlekamp-Massey, Chien search
//!   and Forney's formula
//!
//! ## Signal Flow
//!
//! ```text
//! TX: data ─► LFSR encoder ─► [data | parity]
//! RX: [data | parity] ─► Syndromes ─► BM (Λ, Ω) ─► Chien ─► Forney ─► corrected word
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rsfec_core::ReedSolomon;
//!
//! let rs = ReedSolomon::new(8).unwrap();
//! let mut cw = rs.encode(b"telemetry frame 42").unwrap();
//!
//! // Two unknown errors plus one byte the radio flagged as unreliable
//! cw[0] ^= 0x80;
//! cw[9] = 0x00;
//! cw[20] ^= 0x3C;
//!
//! let fixed = rs.decode(&mut cw, &[9]).unwrap();
//! assert_eq!(fixed.error_count(), 3);
//! assert_eq!(&cw[..18], b"telemetry frame 42");
//! ```
//!
//! Decoding is bounded-distance: a word with more damage than `2t + e <= P`
//! may be "corrected" into a different valid codeword. See [`decoder`] and
//! [`crc`].

pub mod berlekamp;
pub mod chien;
pub mod codec;
pub mod config;
pub mod crc;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod forney;
pub mod generator;
pub mod gf;
pub mod observe;
pub mod poly;
pub mod syndrome;

pub use codec::{initialize, ReedSolomon};
pub use config::{CodecConfig, RsfecConfig};
pub use decoder::Correction;
pub use error::{FecError, FecResult};
pub use syndrome::Syndromes;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::codec::ReedSolomon;
    pub use crate::crc::{Crc16, CrcComputer};
    pub use crate::decoder::Correction;
    pub use crate::error::{FecError, FecResult};
    pub use crate::syndrome::Syndromes;
}
