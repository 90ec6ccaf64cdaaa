//! Fixed-capacity polynomials over GF(256).
//!
//! Coefficients are stored in ascending order: `coeff(i)` is the coefficient
//! of z^i. Every polynomial carries a runtime length (for locator work this is
//! `MAXDEG = 2 * parity`) and all binary operations expect equal lengths, as
//! the decoder keeps every working polynomial at the same zero-padded size.
//!
//! Storage lives inline, so no operation allocates.

use crate::gf;

/// Largest supported parity count. A codeword holds at most 255 symbols and
/// needs at least one data byte.
pub const MAX_PARITY: usize = 254;

/// Largest locator length, `2 * MAX_PARITY`.
pub const MAX_LOCATOR_LEN: usize = 2 * MAX_PARITY;

/// Inline capacity of a [`Poly`]; large enough for the product of two
/// maximum-length locators.
pub const POLY_CAPACITY: usize = 2 * MAX_LOCATOR_LEN;

/// Polynomial with inline storage and a runtime length.
#[derive(Clone)]
pub struct Poly {
    coeffs: [u8; POLY_CAPACITY],
    len: usize,
}

impl Poly {
    /// The zero polynomial with `len` coefficient slots.
    pub fn zero(len: usize) -> Self {
        assert!(
            len <= POLY_CAPACITY,
            "polynomial length {len} exceeds capacity {POLY_CAPACITY}"
        );
        Self {
            coeffs: [0u8; POLY_CAPACITY],
            len,
        }
    }

    /// The constant polynomial 1.
    pub fn one(len: usize) -> Self {
        assert!(len > 0, "polynomial needs at least one slot");
        let mut p = Self::zero(len);
        p.coeffs[0] = 1;
        p
    }

    /// Build from ascending coefficients, zero-padded to `len`.
    pub fn from_coeffs(coeffs: &[u8], len: usize) -> Self {
        assert!(coeffs.len() <= len, "{} coefficients do not fit in {len}", coeffs.len());
        let mut p = Self::zero(len);
        p.coeffs[..coeffs.len()].copy_from_slice(coeffs);
        p
    }

    /// Number of coefficient slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the polynomial has no slots at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Coefficients `0..len`, lowest degree first.
    #[inline]
    pub fn coeffs(&self) -> &[u8] {
        &self.coeffs[..self.len]
    }

    /// Coefficient of z^i, or 0 past the end.
    #[inline]
    pub fn coeff(&self, i: usize) -> u8 {
        if i < self.len {
            self.coeffs[i]
        } else {
            0
        }
    }

    /// Set the coefficient of z^i.
    #[inline]
    pub fn set(&mut self, i: usize, value: u8) {
        assert!(i < self.len, "index {i} out of range for length {}", self.len);
        self.coeffs[i] = value;
    }

    /// Reset every coefficient to zero.
    pub fn clear(&mut self) {
        self.coeffs[..self.len].fill(0);
    }

    /// Overwrite with the coefficients of `src`.
    pub fn copy_from(&mut self, src: &Poly) {
        debug_assert_eq!(self.len, src.len, "copy between different lengths");
        self.coeffs[..self.len].copy_from_slice(&src.coeffs[..self.len]);
    }

    /// `self += src` (coefficient-wise XOR).
    pub fn add_assign(&mut self, src: &Poly) {
        debug_assert_eq!(self.len, src.len, "add between different lengths");
        for (d, &s) in self.coeffs[..self.len].iter_mut().zip(&src.coeffs[..src.len]) {
            *d ^= s;
        }
    }

    /// Multiply every coefficient by the field constant `k`.
    pub fn scale(&mut self, k: u8) {
        for c in &mut self.coeffs[..self.len] {
            *c = gf::mul(k, *c);
        }
    }

    /// Multiply by z: shift every coefficient up one degree. The top
    /// coefficient falls off the end and degree 0 becomes zero.
    pub fn mul_by_z(&mut self) {
        if self.len == 0 {
            return;
        }
        self.coeffs.copy_within(0..self.len - 1, 1);
        self.coeffs[0] = 0;
    }

    /// Full product `self * other`, returned with `2 * len` slots.
    ///
    /// Each coefficient of `self` scales a copy of `other` shifted by its
    /// degree, and the copies are XOR-accumulated.
    pub fn multiply(&self, other: &Poly) -> Poly {
        debug_assert_eq!(self.len, other.len, "multiply between different lengths");
        let mut out = Poly::zero(self.len + other.len);
        for (i, &a) in self.coeffs().iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in other.coeffs().iter().enumerate() {
                out.coeffs[i + j] ^= gf::mul(a, b);
            }
        }
        out
    }

    /// The first `terms` coefficients (i.e. `self mod z^terms`), stored with
    /// `len` slots.
    pub fn truncated(&self, terms: usize, len: usize) -> Poly {
        let mut out = Poly::zero(len);
        let n = terms.min(len).min(self.len);
        out.coeffs[..n].copy_from_slice(&self.coeffs[..n]);
        out
    }

    /// Highest degree with a nonzero coefficient, or `None` for zero.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs().iter().rposition(|&c| c != 0)
    }

    /// Evaluate at `x` by Horner's rule.
    pub fn eval(&self, x: u8) -> u8 {
        self.coeffs()
            .iter()
            .rev()
            .fold(0u8, |acc, &c| gf::mul(acc, x) ^ c)
    }
}

impl PartialEq for Poly {
    fn eq(&self, other: &Self) -> bool {
        self.coeffs() == other.coeffs()
    }
}

impl Eq for Poly {}

impl std::fmt::Debug for Poly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.coeffs()).finish()
    }
}
