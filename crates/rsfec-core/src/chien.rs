//! Chien search.
//!
//! Exhaustively evaluates Λ at α^r for every nonzero field element. A root at
//! α^r marks location `255 - r` (counted from the end of the codeword), since
//! Λ's roots are the inverses of the error locators X = α^l.

use crate::gf::{self, GF_ORDER};
use crate::poly::Poly;

/// Error locations found by the search, counted from the end of the codeword.
#[derive(Clone, PartialEq, Eq)]
pub struct ErrorLocations {
    locations: [u8; GF_ORDER],
    count: usize,
}

impl ErrorLocations {
    pub(crate) fn new() -> Self {
        Self {
            locations: [0u8; GF_ORDER],
            count: 0,
        }
    }

    fn push(&mut self, location: u8) {
        if self.count < GF_ORDER {
            self.locations[self.count] = location;
            self.count += 1;
        }
    }

    /// Number of roots found.
    pub fn len(&self) -> usize {
        self.count
    }

    /// True when Λ has no roots in the field.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Locations in discovery order (descending).
    pub fn as_slice(&self) -> &[u8] {
        &self.locations[..self.count]
    }

    /// Iterate the locations as `usize`.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.as_slice().iter().map(|&l| l as usize)
    }
}

impl std::fmt::Debug for ErrorLocations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Find every root of Λ, using coefficients Λ_0..Λ_P.
pub fn find_roots(lambda: &Poly, parity: usize) -> ErrorLocations {
    let mut found = ErrorLocations::new();
    for r in 1..=GF_ORDER {
        let sum = (0..=parity).fold(0u8, |acc, k| {
            acc ^ gf::mul(gf::alpha_pow(k * r), lambda.coeff(k))
        });
        if sum == 0 {
            found.push((GF_ORDER - r) as u8);
        }
    }
    found
}
