//! Randomised encode/corrupt/decode harness.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rsfec_core::ReedSolomon;

/// Parameters for one harness run.
#[derive(Debug, Clone, Copy)]
pub struct SelftestParams {
    pub trials: usize,
    /// Byte errors injected per codeword
    pub errors: usize,
    pub seed: u64,
}

/// Outcome of a harness run.
#[derive(Debug, Clone, Default)]
pub struct SelftestReport {
    pub trials: usize,
    /// Trials whose decoded data differed from the message
    pub miscorrected: usize,
    /// Trials the decoder rejected
    pub rejected: usize,
    pub encode_time: Duration,
    pub decode_time: Duration,
}

impl SelftestReport {
    pub fn failures(&self) -> usize {
        self.miscorrected + self.rejected
    }

    pub fn mean_encode(&self) -> Duration {
        self.encode_time / self.trials.max(1) as u32
    }

    pub fn mean_decode(&self) -> Duration {
        self.decode_time / self.trials.max(1) as u32
    }
}

/// Encode full-length random messages, damage `errors` distinct bytes of
/// each codeword and try to recover them.
pub fn run(rs: &ReedSolomon, params: SelftestParams) -> anyhow::Result<SelftestReport> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let data_len = rs.max_data_len();
    let cw_len = data_len + rs.parity();
    anyhow::ensure!(
        params.errors <= cw_len,
        "cannot inject {} errors into a {cw_len}-byte codeword",
        params.errors
    );

    let mut report = SelftestReport {
        trials: params.trials,
        ..Default::default()
    };
    let mut msg = vec![0u8; data_len];
    let mut codeword = [0u8; 255];

    for trial in 0..params.trials {
        rng.fill(&mut msg[..]);

        let start = Instant::now();
        rs.encode_into(&msg, &mut codeword)?;
        report.encode_time += start.elapsed();

        let cw = &mut codeword[..cw_len];
        for pos in sample(&mut rng, cw_len, params.errors).into_vec() {
            cw[pos] ^= rng.gen_range(1..=255u8);
        }

        let start = Instant::now();
        let outcome = rs.decode(cw, &[]);
        report.decode_time += start.elapsed();

        match outcome {
            Ok(_) if cw[..data_len] == msg[..] => {}
            Ok(c) => {
                report.miscorrected += 1;
                tracing::warn!(trial, positions = ?c.positions(), "decoded to the wrong data");
            }
            Err(e) => {
                report.rejected += 1;
                tracing::info!(trial, error = %e, "codeword rejected");
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_capability_never_fails() {
        let rs = ReedSolomon::new(4).unwrap();
        let report = run(
            &rs,
            SelftestParams {
                trials: 50,
                errors: 2,
                seed: 7,
            },
        )
        .unwrap();
        assert_eq!(report.trials, 50);
        assert_eq!(report.failures(), 0);
    }

    #[test]
    fn test_overload_is_reported() {
        let rs = ReedSolomon::new(4).unwrap();
        let report = run(
            &rs,
            SelftestParams {
                trials: 20,
                errors: 8,
                seed: 3,
            },
        )
        .unwrap();
        assert_eq!(report.failures(), 20);
    }

    #[test]
    fn test_too_many_errors_rejected() {
        let rs = ReedSolomon::new(4).unwrap();
        let params = SelftestParams {
            trials: 1,
            errors: 256,
            seed: 0,
        };
        assert!(run(&rs, params).is_err());
    }
}
