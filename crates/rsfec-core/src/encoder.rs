//! Systematic LFSR encoder.
//!
//! The message is clocked through a P-stage linear feedback shift register
//! whose taps are the generator coefficients. After the last data byte the
//! register holds the remainder of `M(x) * x^P mod g(x)`; those P symbols are
//! appended highest stage first.
//!
//! ```text
//!   codeword = [ d_0 .. d_{k-1} | r_{P-1} .. r_0 ]
//! ```

use crate::error::{FecError, FecResult};
use crate::generator::Generator;
use crate::gf;
use crate::poly::MAX_PARITY;

/// Maximum codeword length for GF(256).
pub const MAX_CODEWORD_LEN: usize = 255;

/// Compute the parity symbols of `message` into `parity_out`, in codeword
/// order (highest register stage first).
pub fn compute_parity(generator: &Generator, message: &[u8], parity_out: &mut [u8]) -> FecResult<()> {
    let parity = generator.parity();
    check_lengths(message.len(), parity)?;
    if parity_out.len() < parity {
        return Err(FecError::BufferTooShort {
            expected: parity,
            actual: parity_out.len(),
        });
    }

    let mut lfsr = [0u8; MAX_PARITY];
    let lfsr = &mut lfsr[..parity];

    for &byte in message {
        let feedback = byte ^ lfsr[parity - 1];
        for j in (1..parity).rev() {
            lfsr[j] = lfsr[j - 1] ^ gf::mul(generator.coeff(j), feedback);
        }
        lfsr[0] = gf::mul(generator.coeff(0), feedback);
    }

    for (out, &stage) in parity_out[..parity].iter_mut().zip(lfsr.iter().rev()) {
        *out = stage;
    }
    Ok(())
}

/// Write the systematic codeword for `message` into `out`.
///
/// Returns the codeword length, `message.len() + parity`.
pub fn encode_into(generator: &Generator, message: &[u8], out: &mut [u8]) -> FecResult<usize> {
    let data_len = message.len();
    check_lengths(data_len, generator.parity())?;

    let total = data_len + generator.parity();
    if out.len() < total {
        return Err(FecError::BufferTooShort {
            expected: total,
            actual: out.len(),
        });
    }

    out[..data_len].copy_from_slice(message);
    compute_parity(generator, message, &mut out[data_len..total])?;
    Ok(total)
}

/// Encode `message` into a freshly allocated codeword.
pub fn encode(generator: &Generator, message: &[u8]) -> FecResult<Vec<u8>> {
    let mut codeword = vec![0u8; message.len() + generator.parity()];
    encode_into(generator, message, &mut codeword)?;
    Ok(codeword)
}

/// Reject data lengths that would overflow a 255-symbol codeword.
pub(crate) fn check_lengths(data_len: usize, parity: usize) -> FecResult<()> {
    if data_len + parity > MAX_CODEWORD_LEN {
        return Err(FecError::CodewordTooLong {
            data_len,
            parity,
            max: MAX_CODEWORD_LEN,
        });
    }
    Ok(())
}
