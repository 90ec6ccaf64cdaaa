//! GF(2^8) arithmetic.
//!
//! The field is generated by the primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//! (0x11D) with α = 2. Addition is XOR; multiplication goes through a pair of
//! exponent/logarithm tables that are built once per process and shared
//! read-only by every codec.
//!
//! ```text
//! exp[i]  = α^i          i in 0..512  (exp[i + 255] == exp[i])
//! log[a]  = i, α^i = a   a in 1..256  (log[0] is a placeholder)
//! ```

use std::sync::OnceLock;

/// Low byte of the primitive polynomial (the x^8 term is implicit).
pub const PRIM_POLY_TAPS: u8 = 0x1D;

/// Number of nonzero field elements, 2^8 - 1.
pub const GF_ORDER: usize = 255;

const EXP_LEN: usize = 2 * GF_ORDER + 2;

static GF_TABLES: OnceLock<GfTables> = OnceLock::new();

/// Exponent and logarithm tables for GF(256).
#[derive(Clone, PartialEq, Eq)]
pub struct GfTables {
    exp: [u8; EXP_LEN],
    log: [u8; 256],
}

impl GfTables {
    /// Walk an 8-bit LFSR with feedback taps 0x1D to enumerate α^0..α^254.
    fn build() -> Self {
        let mut exp = [0u8; EXP_LEN];
        let mut log = [0u8; 256];

        let mut reg: u8 = 1;
        for i in 0..GF_ORDER {
            exp[i] = reg;
            log[reg as usize] = i as u8;
            let carry = reg & 0x80 != 0;
            reg <<= 1;
            if carry {
                reg ^= PRIM_POLY_TAPS;
            }
        }
        // Double the table so log[a] + log[b] never needs a modulo.
        for i in GF_ORDER..EXP_LEN {
            exp[i] = exp[i - GF_ORDER];
        }

        Self { exp, log }
    }

    /// α^i for i in 0..512.
    #[inline]
    pub fn exp(&self, i: usize) -> u8 {
        self.exp[i]
    }

    /// Discrete logarithm of a nonzero element.
    #[inline]
    pub fn log(&self, a: u8) -> u8 {
        debug_assert!(a != 0, "log of zero");
        self.log[a as usize]
    }
}

impl std::fmt::Debug for GfTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GfTables").finish_non_exhaustive()
    }
}

/// Build the field tables if needed and return the shared instance.
///
/// Safe to call any number of times from any thread; the tables are built
/// exactly once.
pub fn init() -> &'static GfTables {
    GF_TABLES.get_or_init(GfTables::build)
}

#[inline]
fn tables() -> &'static GfTables {
    init()
}

/// Multiply two field elements.
#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let t = tables();
    t.exp[t.log[a as usize] as usize + t.log[b as usize] as usize]
}

/// Multiplicative inverse. `a` must be nonzero.
#[inline]
pub fn inv(a: u8) -> u8 {
    debug_assert!(a != 0, "GF inverse of zero");
    let t = tables();
    t.exp[GF_ORDER - t.log[a as usize] as usize]
}

/// Field division `a / b`. `b` must be nonzero.
#[inline]
pub fn div(a: u8, b: u8) -> u8 {
    debug_assert!(b != 0, "GF division by zero");
    if a == 0 {
        return 0;
    }
    let t = tables();
    t.exp[t.log[a as usize] as usize + GF_ORDER - t.log[b as usize] as usize]
}

/// α^n, reduced modulo the multiplicative order.
#[inline]
pub fn alpha_pow(n: usize) -> u8 {
    tables().exp[n % GF_ORDER]
}
