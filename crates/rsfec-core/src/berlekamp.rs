//! Erasure-aware Berlekamp-Massey.
//!
//! Declared erasures are folded into the starting locator
//!
//! ```text
//! Γ(z) = Π (1 + α^(l_e) z)      over erasure locations l_e
//! ```
//!
//! and the iteration only runs over the syndromes the erasures leave free
//! (`n = e .. P-1`), so each erasure costs one degree of Λ while each
//! undeclared error costs two. On exit Λ(z) locates errors and erasures
//! together and Ω(z) = Λ(z)S(z) mod z^P is the matching evaluator.
//!
//! Locations are exponents counted from the END of the codeword: location
//! `l` is byte `len - 1 - l`. [`ErasureSet`] converts from start-indexed
//! byte positions at the boundary.

use crate::encoder::MAX_CODEWORD_LEN;
use crate::error::{FecError, FecResult};
use crate::generator;
use crate::gf;
use crate::poly::{Poly, MAX_PARITY};
use crate::syndrome::Syndromes;

/// Validated set of erasure locations.
#[derive(Clone, PartialEq, Eq)]
pub struct ErasureSet {
    locations: [u8; MAX_PARITY],
    count: usize,
}

impl ErasureSet {
    /// No erasures.
    pub fn empty() -> Self {
        Self {
            locations: [0u8; MAX_PARITY],
            count: 0,
        }
    }

    /// Build from byte positions counted from the start of a codeword of
    /// `len` bytes.
    ///
    /// Rejects an invalid parity, a codeword longer than 255 bytes, more than
    /// `parity` erasures, positions outside the codeword and repeated
    /// positions.
    pub fn from_positions(positions: &[usize], len: usize, parity: usize) -> FecResult<Self> {
        generator::validate_parity(parity)?;
        if len > MAX_CODEWORD_LEN {
            return Err(FecError::CodewordTooLong {
                data_len: len.saturating_sub(parity),
                parity,
                max: MAX_CODEWORD_LEN,
            });
        }
        if positions.len() > parity {
            return Err(FecError::TooManyErasures {
                erasures: positions.len(),
                parity,
            });
        }

        let mut seen = [false; MAX_CODEWORD_LEN];
        let mut set = Self::empty();
        for &position in positions {
            if position >= len {
                return Err(FecError::ErasureOutOfRange { position, len });
            }
            if std::mem::replace(&mut seen[position], true) {
                return Err(FecError::DuplicateErasure { position });
            }
            set.locations[set.count] = (len - 1 - position) as u8;
            set.count += 1;
        }
        Ok(set)
    }

    /// Number of declared erasures.
    pub fn len(&self) -> usize {
        self.count
    }

    /// True when no erasures are declared.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Locator exponents, counted from the end of the codeword.
    pub fn locations(&self) -> &[u8] {
        &self.locations[..self.count]
    }

    /// Γ(z) = Π (1 + α^l z), with `len` slots.
    pub fn locator(&self, len: usize) -> Poly {
        let mut gamma = Poly::one(len);
        let mut term = Poly::zero(len);
        for &loc in self.locations() {
            term.copy_from(&gamma);
            term.scale(gf::alpha_pow(loc as usize));
            term.mul_by_z();
            gamma.add_assign(&term);
        }
        gamma
    }
}

impl std::fmt::Debug for ErasureSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ErasureSet").field(&self.locations()).finish()
    }
}

/// Output of the locator search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    /// Error/erasure locator Λ, `Λ[0] == 1`.
    pub lambda: Poly,
    /// Error evaluator Ω = ΛS mod z^P.
    pub omega: Poly,
    /// Register length L reached by the iteration.
    pub length: usize,
}

/// Run the modified Berlekamp-Massey iteration.
///
/// All working polynomials have `2 * P` slots.
pub fn solve(syndromes: &Syndromes, erasures: &ErasureSet) -> Locator {
    let parity = syndromes.parity();
    let maxdeg = 2 * parity;
    let s = syndromes.as_slice();

    let gamma = erasures.locator(maxdeg);

    let mut d_poly = gamma.clone();
    d_poly.mul_by_z();
    let mut psi = gamma;
    let mut psi2 = Poly::zero(maxdeg);

    let mut k: isize = -1;
    let mut l = erasures.len();

    for n in erasures.len()..parity {
        let d = discrepancy(&psi, s, l, n);
        if d != 0 {
            for i in 0..maxdeg {
                psi2.set(i, psi.coeff(i) ^ gf::mul(d, d_poly.coeff(i)));
            }

            let shift = n as isize - k;
            if (l as isize) < shift {
                let l2 = shift as usize;
                k = n as isize - l as isize;
                let d_inv = gf::inv(d);
                for i in 0..maxdeg {
                    d_poly.set(i, gf::mul(psi.coeff(i), d_inv));
                }
                l = l2;
            }

            psi.copy_from(&psi2);
        }
        d_poly.mul_by_z();
    }

    let omega = psi
        .multiply(&syndromes.as_poly(maxdeg))
        .truncated(parity, maxdeg);

    Locator {
        lambda: psi,
        omega,
        length: l,
    }
}

/// d = Σ_{i=0}^{L} ψ_i S_{n-i}
fn discrepancy(psi: &Poly, s: &[u8], l: usize, n: usize) -> u8 {
    (0..=l.min(n)).fold(0u8, |acc, i| acc ^ gf::mul(psi.coeff(i), s[n - i]))
}
