//! Forney error-magnitude evaluation.
//!
//! For a location l with X^-1 = α^(255-l):
//!
//! ```text
//! e_l = Ω(X^-1) / Λ'(X^-1)
//! ```
//!
//! In characteristic 2 the formal derivative keeps only odd-degree terms, so
//! Λ'(x) = Λ_1 + Λ_3 x^2 + Λ_5 x^4 + ...

use crate::berlekamp::Locator;
use crate::chien::ErrorLocations;
use crate::error::{FecError, FecResult};
use crate::gf::{self, GF_ORDER};

/// Correction values, index-aligned with the [`ErrorLocations`] they were
/// computed for.
#[derive(Clone, PartialEq, Eq)]
pub struct Magnitudes {
    values: [u8; GF_ORDER],
    count: usize,
}

impl Magnitudes {
    /// Magnitudes in location order.
    pub fn as_slice(&self) -> &[u8] {
        &self.values[..self.count]
    }

    /// Number of magnitudes.
    pub fn len(&self) -> usize {
        self.count
    }

    /// True if there are none.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl std::fmt::Debug for Magnitudes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Compute the magnitude for every location.
///
/// Fails if Λ' vanishes at a root, which only happens for a locator that does
/// not describe a real error pattern.
pub fn magnitudes(locator: &Locator, locations: &ErrorLocations) -> FecResult<Magnitudes> {
    let mut out = Magnitudes {
        values: [0u8; GF_ORDER],
        count: 0,
    };

    for location in locations.iter() {
        let x_inv_log = GF_ORDER - location;

        let num = locator
            .omega
            .coeffs()
            .iter()
            .enumerate()
            .fold(0u8, |acc, (j, &w)| acc ^ gf::mul(w, gf::alpha_pow(x_inv_log * j)));

        let den = locator
            .lambda
            .coeffs()
            .iter()
            .enumerate()
            .skip(1)
            .step_by(2)
            .fold(0u8, |acc, (j, &c)| {
                acc ^ gf::mul(c, gf::alpha_pow(x_inv_log * (j - 1)))
            });

        if den == 0 {
            return Err(FecError::DegenerateLocator { location });
        }

        out.values[out.count] = gf::div(num, den);
        out.count += 1;
    }

    Ok(out)
}

/// XOR each magnitude into the byte at its location.
///
/// Every location must already be known to lie inside `codeword`.
pub fn apply(codeword: &mut [u8], locations: &ErrorLocations, magnitudes: &Magnitudes) {
    let len = codeword.len();
    for (location, &mag) in locations.iter().zip(magnitudes.as_slice()) {
        debug_assert!(location < len, "location {location} outside codeword");
        codeword[len - 1 - location] ^= mag;
    }
}
