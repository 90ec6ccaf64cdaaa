//! CRC-16/CCITT
//!
//! Reed-Solomon decoding cannot tell a received word with too many errors
//! from a different, correctable one. A CRC carried inside the data bytes
//! catches those silent miscorrections.
//!
//! ## Supported Parameterisations
//!
//! - CRC-16/XMODEM (polynomial 0x1021, init 0x0000), the classic `crc_ccitt`
//! - CRC-16/CCITT-FALSE (polynomial 0x1021, init 0xFFFF)
//!
//! ## Example
//!
//! ```rust
//! use rsfec_core::crc::{Crc16, CrcComputer};
//!
//! let mut crc = Crc16::xmodem();
//! crc.update(b"123456789");
//! assert_eq!(crc.finalize(), 0x31C3);
//! ```

/// CRC-CCITT generator polynomial x^16 + x^12 + x^5 + 1.
pub const CCITT_POLY: u16 = 0x1021;

/// Trait for CRC computation.
pub trait CrcComputer {
    /// The output type of the CRC
    type Output: Copy + PartialEq + std::fmt::LowerHex;

    /// Update the CRC with additional data.
    fn update(&mut self, data: &[u8]);

    /// Return the CRC of everything seen since the last reset.
    fn finalize(&self) -> Self::Output;

    /// Reset to the initial state.
    fn reset(&mut self);

    /// Compute CRC of an entire buffer in one call.
    fn compute(data: &[u8]) -> Self::Output
    where
        Self: Sized + Default,
    {
        let mut crc = Self::default();
        crc.update(data);
        crc.finalize()
    }

    /// Verify that data matches an expected CRC.
    fn verify(&mut self, data: &[u8], expected: Self::Output) -> bool
    where
        Self: Sized,
    {
        self.reset();
        self.update(data);
        self.finalize() == expected
    }
}

/// MSB-first CRC-16 with a 256-entry lookup table.
#[derive(Clone)]
pub struct Crc16 {
    table: [u16; 256],
    value: u16,
    init: u16,
}

impl Crc16 {
    /// CRC-16/XMODEM: polynomial 0x1021, init 0x0000.
    pub fn xmodem() -> Self {
        Self::new(CCITT_POLY, 0x0000)
    }

    /// CRC-16/CCITT-FALSE: polynomial 0x1021, init 0xFFFF.
    pub fn ccitt_false() -> Self {
        Self::new(CCITT_POLY, 0xFFFF)
    }

    /// Non-reflected CRC-16 with no output XOR.
    pub fn new(poly: u16, init: u16) -> Self {
        let mut table = [0u16; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            let mut crc = (i as u16) << 8;
            for _ in 0..8 {
                if crc & 0x8000 != 0 {
                    crc = (crc << 1) ^ poly;
                } else {
                    crc <<= 1;
                }
            }
            *slot = crc;
        }
        Self {
            table,
            value: init,
            init,
        }
    }

    /// Append the big-endian CRC of `data` to it.
    pub fn append_to(&mut self, data: &mut Vec<u8>) {
        self.reset();
        self.update(data);
        data.extend_from_slice(&self.finalize().to_be_bytes());
    }

    /// Check a buffer whose last two bytes are a big-endian CRC of the rest.
    pub fn check_trailing(&mut self, framed: &[u8]) -> bool {
        match framed.len().checked_sub(2) {
            Some(split) => {
                let expected = u16::from_be_bytes([framed[split], framed[split + 1]]);
                self.verify(&framed[..split], expected)
            }
            None => false,
        }
    }
}

impl Default for Crc16 {
    fn default() -> Self {
        Self::xmodem()
    }
}

impl std::fmt::Debug for Crc16 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crc16")
            .field("init", &format_args!("{:#06x}", self.init))
            .field("value", &format_args!("{:#06x}", self.value))
            .finish()
    }
}

impl CrcComputer for Crc16 {
    type Output = u16;

    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            let idx = ((self.value >> 8) as u8) ^ byte;
            self.value = (self.value << 8) ^ self.table[idx as usize];
        }
    }

    fn finalize(&self) -> u16 {
        self.value
    }

    fn reset(&mut self) {
        self.value = self.init;
    }
}
