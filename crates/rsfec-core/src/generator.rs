//! Generator polynomial
//!
//! g(x) = (x + α^1)(x + α^2)...(x + α^P), ascending order, monic.
//! The roots α^1..α^P are the check points used by the syndrome unit.

use std::sync::OnceLock;

use crate::error::{FecError, FecResult};
use crate::gf;
use crate::poly::{Poly, MAX_PARITY};

#[allow(clippy::declare_interior_mutable_const)]
const UNBUILT: OnceLock<Generator> = OnceLock::new();

static GENERATORS: [OnceLock<Generator>; MAX_PARITY + 1] = [UNBUILT; MAX_PARITY + 1];

/// Generator polynomial for a code with `parity` check symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    parity: usize,
    poly: Poly,
}

impl Generator {
    /// Build the generator for `parity` check symbols.
    pub fn new(parity: usize) -> FecResult<Self> {
        validate_parity(parity)?;
        gf::init();

        let len = parity + 1;
        let mut g = Poly::one(len);
        for n in 1..=parity {
            let factor = Poly::from_coeffs(&[gf::alpha_pow(n), 1], len);
            g = g.multiply(&factor).truncated(len, len);
        }

        Ok(Self { parity, poly: g })
    }

    /// Number of parity symbols this generator produces.
    pub fn parity(&self) -> usize {
        self.parity
    }

    /// Coefficients g_0..g_P, lowest degree first. `g_P` is always 1.
    pub fn coeffs(&self) -> &[u8] {
        self.poly.coeffs()
    }

    /// Coefficient of x^i.
    #[inline]
    pub fn coeff(&self, i: usize) -> u8 {
        self.poly.coeff(i)
    }

    /// Evaluate g at `x`.
    pub fn eval(&self, x: u8) -> u8 {
        self.poly.eval(x)
    }
}

/// Process-wide generator for `parity`, built on first request.
pub fn shared(parity: usize) -> FecResult<&'static Generator> {
    validate_parity(parity)?;
    if let Some(g) = GENERATORS[parity].get() {
        return Ok(g);
    }
    let built = Generator::new(parity)?;
    Ok(GENERATORS[parity].get_or_init(|| built))
}

pub(crate) fn validate_parity(parity: usize) -> FecResult<()> {
    if parity == 0 || parity > MAX_PARITY {
        return Err(FecError::InvalidParity { parity });
    }
    Ok(())
}
