//! Syndrome computation.
//!
//! S_j = C(α^(j+1)) for j in 0..P, where the received word is read as a
//! polynomial with its first byte as the highest-degree coefficient. A valid
//! codeword is a multiple of the generator and so yields all-zero syndromes.

use crate::encoder::MAX_CODEWORD_LEN;
use crate::error::{FecError, FecResult};
use crate::generator;
use crate::gf;
use crate::poly::{Poly, MAX_PARITY};

/// Syndrome vector of a received word.
#[derive(Clone, PartialEq, Eq)]
pub struct Syndromes {
    values: [u8; MAX_PARITY],
    parity: usize,
}

impl Syndromes {
    /// Evaluate `codeword` at the `parity` generator roots.
    pub fn new(codeword: &[u8], parity: usize) -> FecResult<Self> {
        generator::validate_parity(parity)?;
        if codeword.len() > MAX_CODEWORD_LEN {
            return Err(FecError::CodewordTooLong {
                data_len: codeword.len().saturating_sub(parity),
                parity,
                max: MAX_CODEWORD_LEN,
            });
        }
        Ok(Self::compute(codeword, parity))
    }

    /// Build from raw syndrome values S_0..S_(P-1).
    pub fn from_values(values: &[u8]) -> FecResult<Self> {
        generator::validate_parity(values.len())?;
        let mut buf = [0u8; MAX_PARITY];
        buf[..values.len()].copy_from_slice(values);
        Ok(Self {
            values: buf,
            parity: values.len(),
        })
    }

    /// Unchecked form of [`new`](Self::new) for callers that already hold a
    /// valid parity.
    pub(crate) fn compute(codeword: &[u8], parity: usize) -> Self {
        debug_assert!((1..=MAX_PARITY).contains(&parity));
        let mut values = [0u8; MAX_PARITY];
        for (j, s) in values[..parity].iter_mut().enumerate() {
            let root = gf::alpha_pow(j + 1);
            *s = codeword.iter().fold(0u8, |acc, &b| b ^ gf::mul(root, acc));
        }
        Self { values, parity }
    }

    /// True when every syndrome is zero. Strong, but not absolute, evidence
    /// that the word was received intact.
    pub fn is_zero(&self) -> bool {
        self.as_slice().iter().all(|&s| s == 0)
    }

    /// Number of syndromes (the parity count).
    pub fn parity(&self) -> usize {
        self.parity
    }

    /// S_0..S_{P-1}.
    pub fn as_slice(&self) -> &[u8] {
        &self.values[..self.parity]
    }

    /// The syndrome polynomial S(z) = Σ S_j z^j, zero-padded to `len` slots.
    pub fn as_poly(&self, len: usize) -> Poly {
        Poly::from_coeffs(self.as_slice(), len)
    }
}

impl std::fmt::Debug for Syndromes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Syndromes").field(&self.as_slice()).finish()
    }
}
