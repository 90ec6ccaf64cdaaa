//! Error and erasure correction pipeline.
//!
//! ```text
//! syndromes ─► Berlekamp-Massey ─► Chien search ─► Forney ─► apply
//!                (Λ, Ω)              (locations)    (magnitudes)
//! ```
//!
//! All intermediate state lives in a [`DecoderContext`] created for the call,
//! and the codeword is only written once the complete set of corrections has
//! been computed and validated. Any failure leaves it untouched.
//!
//! Bounded-distance decoding has an inherent blind spot: when a received word
//! carries more errors than `2t + e <= P` allows, the iteration can settle on a
//! locator for a *different* nearby codeword. That locator passes every check
//! here and the word is "corrected" into the wrong codeword. Callers that need
//! to rule this out must carry an independent check (for example
//! [`crate::crc`]) inside the data bytes.

use crate::berlekamp::{self, ErasureSet};
use crate::chien::{self, ErrorLocations};
use crate::encoder::MAX_CODEWORD_LEN;
use crate::error::{FecError, FecResult};
use crate::forney::{self, Magnitudes};
use crate::syndrome::Syndromes;

/// Outcome of a successful correction.
#[derive(Clone, PartialEq, Eq)]
pub struct Correction {
    positions: [usize; MAX_CODEWORD_LEN],
    magnitudes: [u8; MAX_CODEWORD_LEN],
    count: usize,
    erasures: usize,
}

impl Correction {
    fn clean(erasures: usize) -> Self {
        Self {
            positions: [0usize; MAX_CODEWORD_LEN],
            magnitudes: [0u8; MAX_CODEWORD_LEN],
            count: 0,
            erasures,
        }
    }

    /// True if the word was accepted without changing any byte.
    pub fn is_clean(&self) -> bool {
        self.magnitudes().iter().all(|&m| m == 0)
    }

    /// Byte positions (from the start of the codeword) located as errata,
    /// ascending. Includes declared erasures.
    pub fn positions(&self) -> &[usize] {
        &self.positions[..self.count]
    }

    /// Values XORed into the bytes at [`positions`](Self::positions). An
    /// erasure whose byte happened to be right gets magnitude 0.
    pub fn magnitudes(&self) -> &[u8] {
        &self.magnitudes[..self.count]
    }

    /// Number of located errata (roots of Λ).
    pub fn error_count(&self) -> usize {
        self.count
    }

    /// Number of bytes actually changed.
    pub fn changed_count(&self) -> usize {
        self.magnitudes().iter().filter(|&&m| m != 0).count()
    }

    /// Number of erasures the caller declared.
    pub fn erasures(&self) -> usize {
        self.erasures
    }
}

impl std::fmt::Debug for Correction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Correction")
            .field("positions", &self.positions())
            .field("magnitudes", &self.magnitudes())
            .field("erasures", &self.erasures)
            .finish()
    }
}

/// Per-call decoder state.
#[derive(Debug, Clone)]
pub struct DecoderContext {
    len: usize,
    syndromes: Syndromes,
    erasures: ErasureSet,
}

impl DecoderContext {
    /// Validate the inputs for correcting a codeword of `len` bytes.
    pub fn new(len: usize, erasures: &[usize], syndromes: &Syndromes) -> FecResult<Self> {
        let parity = syndromes.parity();
        if parity == 0 {
            return Err(FecError::InvalidParity { parity });
        }
        if len > MAX_CODEWORD_LEN {
            return Err(FecError::CodewordTooLong {
                data_len: len.saturating_sub(parity),
                parity,
                max: MAX_CODEWORD_LEN,
            });
        }
        let erasures = ErasureSet::from_positions(erasures, len, parity)?;
        Ok(Self {
            len,
            syndromes: syndromes.clone(),
            erasures,
        })
    }

    /// Parity count the syndromes were computed for.
    pub fn parity(&self) -> usize {
        self.syndromes.parity()
    }

    /// Run locator search, root finding and magnitude evaluation.
    pub fn plan(&self) -> FecResult<CorrectionPlan> {
        let parity = self.parity();
        let locator = berlekamp::solve(&self.syndromes, &self.erasures);
        let locations = chien::find_roots(&locator.lambda, parity);
        let roots = locations.len();

        tracing::trace!(
            register_len = locator.length,
            roots,
            erasures = self.erasures.len(),
            "locator search finished"
        );

        if roots == 0 || roots > parity {
            return Err(FecError::Uncorrectable { roots, parity });
        }
        // A locator of degree d that splits into fewer than d distinct roots
        // cannot describe a real error pattern.
        if locator.lambda.degree() != Some(roots) {
            return Err(FecError::Uncorrectable { roots, parity });
        }
        if let Some(location) = locations.iter().find(|&l| l >= self.len) {
            return Err(FecError::RootOutOfRange {
                location,
                len: self.len,
            });
        }

        let magnitudes = forney::magnitudes(&locator, &locations)?;

        Ok(CorrectionPlan {
            len: self.len,
            parity,
            erasures: self.erasures.len(),
            locations,
            magnitudes,
        })
    }
}

/// Fully computed corrections, not yet applied.
#[derive(Debug, Clone)]
pub struct CorrectionPlan {
    len: usize,
    parity: usize,
    erasures: usize,
    locations: ErrorLocations,
    magnitudes: Magnitudes,
}

impl CorrectionPlan {
    /// Apply to a scratch copy and confirm the result is a codeword.
    pub fn verify(&self, codeword: &[u8]) -> FecResult<()> {
        debug_assert_eq!(codeword.len(), self.len);
        let mut scratch = [0u8; MAX_CODEWORD_LEN];
        let scratch = &mut scratch[..self.len];
        scratch.copy_from_slice(codeword);
        forney::apply(scratch, &self.locations, &self.magnitudes);
        if Syndromes::compute(scratch, self.parity).is_zero() {
            Ok(())
        } else {
            Err(FecError::VerificationFailed)
        }
    }

    /// Write the corrections into `codeword`.
    pub fn apply(self, codeword: &mut [u8]) -> Correction {
        debug_assert_eq!(codeword.len(), self.len);
        forney::apply(codeword, &self.locations, &self.magnitudes);

        let mut pairs = [(0usize, 0u8); MAX_CODEWORD_LEN];
        let count = self.locations.len();
        for (slot, (l, &m)) in pairs
            .iter_mut()
            .zip(self.locations.iter().zip(self.magnitudes.as_slice()))
        {
            *slot = (self.len - 1 - l, m);
        }
        pairs[..count].sort_unstable_by_key(|&(pos, _)| pos);

        let mut report = Correction::clean(self.erasures);
        for (i, &(pos, mag)) in pairs[..count].iter().enumerate() {
            report.positions[i] = pos;
            report.magnitudes[i] = mag;
        }
        report.count = count;
        report
    }
}

/// Correct `codeword` in place given its `syndromes` and declared erasure
/// positions (0-indexed from the start).
///
/// With `verify`, corrections are checked against a fresh syndrome
/// computation before anything is written.
pub fn correct(
    codeword: &mut [u8],
    erasures: &[usize],
    syndromes: &Syndromes,
    verify: bool,
) -> FecResult<Correction> {
    let ctx = DecoderContext::new(codeword.len(), erasures, syndromes)?;
    if syndromes.is_zero() {
        return Ok(Correction::clean(erasures.len()));
    }

    let plan = ctx.plan()?;
    if verify {
        plan.verify(codeword)?;
    }
    Ok(plan.apply(codeword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::generator::Generator;
    use rand::rngs::StdRng;
    use rand::seq::index::sample;
    use rand::{Rng, SeedableRng};

    fn random_codeword(rng: &mut StdRng, parity: usize, data_len: usize) -> Vec<u8> {
        let g = Generator::new(parity).unwrap();
        let msg: Vec<u8> = (0..data_len).map(|_| rng.gen()).collect();
        encode(&g, &msg).unwrap()
    }

    fn corrupt(rng: &mut StdRng, cw: &mut [u8], positions: &[usize]) {
        for &p in positions {
            cw[p] ^= rng.gen_range(1..=255u8);
        }
    }

    #[test]
    fn test_clean_word_needs_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut cw = random_codeword(&mut rng, 4, 100);
        let s = Syndromes::compute(&cw, 4);
        let c = correct(&mut cw, &[], &s, false).unwrap();
        assert!(c.is_clean());
        assert_eq!(c.error_count(), 0);
    }

    #[test]
    fn test_concrete_two_error_scenario() {
        let g = Generator::new(4).unwrap();
        let msg: Vec<u8> = (0x01..=0xF4u8).collect();
        assert_eq!(msg.len(), 244);
        let original = encode(&g, &msg).unwrap();
        assert_eq!(original.len(), 248);

        let mut cw = original.clone();
        cw[10] ^= 0x5A;
        cw[200] = !cw[200];
        let s = Syndromes::compute(&cw, 4);
        assert!(!s.is_zero());

        let c = correct(&mut cw, &[], &s, false).unwrap();
        assert_eq!(c.error_count(), 2);
        assert_eq!(c.positions(), &[10, 200]);
        assert_eq!(&cw[..244], &msg[..]);
        assert_eq!(cw, original);
    }

    #[test]
    fn test_plan_does_not_touch_word_until_applied() {
        let mut rng = StdRng::seed_from_u64(0x91A);
        let original = random_codeword(&mut rng, 6, 80);
        let mut cw = original.clone();
        cw[5] ^= 0x33;
        cw[50] = 0;
        let received = cw.clone();

        let s = Syndromes::compute(&cw, 6);
        let ctx = DecoderContext::new(cw.len(), &[50], &s).unwrap();
        assert_eq!(ctx.parity(), 6);

        let plan = ctx.plan().unwrap();
        plan.verify(&cw).unwrap();
        assert_eq!(cw, received);

        let c = plan.apply(&mut cw);
        assert_eq!(cw, original);
        assert_eq!(c.positions(), &[5, 50]);
        assert_eq!(c.erasures(), 1);
    }

    #[test]
    fn test_report_lists_errata_in_position_order() {
        let mut rng = StdRng::seed_from_u64(0x50_27);
        let original = random_codeword(&mut rng, 16, 200);
        let mut cw = original.clone();

        let mut injected: Vec<(usize, u8)> = sample(&mut rng, cw.len(), 8)
            .into_iter()
            .map(|p| (p, rng.gen_range(1..=255u8)))
            .collect();
        for &(p, e) in &injected {
            cw[p] ^= e;
        }
        injected.sort_unstable();

        let s = Syndromes::compute(&cw, 16);
        let c = correct(&mut cw, &[], &s, false).unwrap();
        assert_eq!(cw, original);
        assert_eq!(c.error_count(), 8);
        assert_eq!(c.changed_count(), 8);
        let expected_positions: Vec<usize> = injected.iter().map(|&(p, _)| p).collect();
        let expected_magnitudes: Vec<u8> = injected.iter().map(|&(_, e)| e).collect();
        assert_eq!(c.positions(), &expected_positions[..]);
        assert_eq!(c.magnitudes(), &expected_magnitudes[..]);

        let s_clean = Syndromes::compute(&cw, 16);
        let clean = correct(&mut cw, &[], &s_clean, false).unwrap();
        assert!(clean.positions().is_empty());
        assert!(clean.magnitudes().is_empty());
    }

    #[test]
    fn test_bounded_errors_corrected() {
        let mut rng = StdRng::seed_from_u64(0xFEC);
        for parity in 1..=20 {
            for _ in 0..10 {
                let data_len = rng.gen_range(1..=255 - parity);
                let original = random_codeword(&mut rng, parity, data_len);
                let len = original.len();
                let t = (parity / 2).min(len);
                let mut cw = original.clone();
                let positions = sample(&mut rng, len, t).into_vec();
                corrupt(&mut rng, &mut cw, &positions);

                let s = Syndromes::compute(&cw, parity);
                let c = correct(&mut cw, &[], &s, false)
                    .unwrap_or_else(|e| panic!("P={parity} len={len} t={t}: {e}"));
                assert_eq!(cw, original, "P={parity} len={len} t={t}");
                assert_eq!(c.error_count(), t);
            }
        }
    }

    #[test]
    fn test_errors_and_erasures_corrected() {
        let mut rng = StdRng::seed_from_u64(0xE7A5);
        for parity in [2usize, 4, 5, 8, 16, 20] {
            for e in 0..=parity {
                let t = (parity - e) / 2;
                let original = random_codeword(&mut rng, parity, 255 - parity);
                let len = original.len();
                let picked = sample(&mut rng, len, e + t).into_vec();
                let (erased, errors) = picked.split_at(e);

                let mut cw = original.clone();
                for &p in erased {
                    cw[p] = 0;
                }
                corrupt(&mut rng, &mut cw, errors);

                let s = Syndromes::compute(&cw, parity);
                correct(&mut cw, erased, &s, true)
                    .unwrap_or_else(|err| panic!("P={parity} e={e} t={t}: {err}"));
                assert_eq!(cw, original, "P={parity} e={e} t={t}");
            }
        }
    }

    #[test]
    fn test_last_byte_correctable() {
        let mut rng = StdRng::seed_from_u64(9);
        let original = random_codeword(&mut rng, 4, 30);
        let mut cw = original.clone();
        let last = cw.len() - 1;
        cw[last] ^= 0x80;
        cw[0] ^= 0x01;
        let s = Syndromes::compute(&cw, 4);
        let c = correct(&mut cw, &[], &s, false).unwrap();
        assert_eq!(c.positions(), &[0, last]);
        assert_eq!(cw, original);
    }

    #[test]
    fn test_overload_fails_or_miscorrects_without_panic() {
        let mut rng = StdRng::seed_from_u64(0xBAD);
        for parity in [4usize, 8, 16] {
            for _ in 0..50 {
                let original = random_codeword(&mut rng, parity, 200 - parity);
                let len = original.len();
                let mut cw = original.clone();
                let positions = sample(&mut rng, len, parity / 2 + 3).into_vec();
                corrupt(&mut rng, &mut cw, &positions);
                let received = cw.clone();

                let s = Syndromes::compute(&cw, parity);
                match correct(&mut cw, &[], &s, false) {
                    Ok(_) => assert_ne!(cw, original),
                    Err(e) => {
                        assert!(e.is_uncorrectable(), "{e}");
                        assert_eq!(cw, received, "failed correction must not touch the word");
                    }
                }
            }
        }
    }

    #[test]
    fn test_verify_leaves_word_on_failure() {
        let mut rng = StdRng::seed_from_u64(77);
        for _ in 0..50 {
            let original = random_codeword(&mut rng, 4, 120);
            let mut cw = original.clone();
            let positions = sample(&mut rng, cw.len(), 6).into_vec();
            corrupt(&mut rng, &mut cw, &positions);
            let received = cw.clone();
            let s = Syndromes::compute(&cw, 4);
            if correct(&mut cw, &[], &s, true).is_err() {
                assert_eq!(cw, received);
            }
        }
    }

    #[test]
    fn test_invalid_erasures_rejected_before_work() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut cw = random_codeword(&mut rng, 4, 20);
        let s = Syndromes::compute(&cw, 4);
        assert_eq!(
            correct(&mut cw, &[1, 2, 3, 4, 5], &s, false),
            Err(FecError::TooManyErasures {
                erasures: 5,
                parity: 4
            })
        );
        assert_eq!(
            correct(&mut cw, &[24], &s, false),
            Err(FecError::ErasureOutOfRange {
                position: 24,
                len: 24
            })
        );
    }

    #[test]
    fn test_root_outside_short_codeword_rejected() {
        // Syndromes of a single error at location 40 applied to a 10-byte word.
        let mut cw = [0u8; 10];
        let s = Syndromes::from_values(&[
            crate::gf::alpha_pow(40),
            crate::gf::alpha_pow(80),
            crate::gf::alpha_pow(120),
            crate::gf::alpha_pow(160),
        ])
        .unwrap();
        assert_eq!(
            correct(&mut cw, &[], &s, false),
            Err(FecError::RootOutOfRange {
                location: 40,
                len: 10
            })
        );
        assert_eq!(cw, [0u8; 10]);
    }
}
