mod selftest;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use rsfec_core::crc::{Crc16, CrcComputer};
use rsfec_core::observe::{init_logging, LogConfig, LogLevel};
use rsfec_core::{ReedSolomon, RsfecConfig};

use crate::selftest::SelftestParams;

#[derive(Parser, Debug)]
#[command(
    name = "rsfec",
    version,
    about = "Reed-Solomon GF(256) forward error correction"
)]
struct Cli {
    /// Configuration file (default: RSFEC_CONFIG or the standard search path)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append parity to a hex-encoded message
    Encode {
        #[arg(value_name = "HEX")]
        message: String,

        /// Parity symbols per codeword
        #[arg(short, long)]
        parity: Option<usize>,
    },

    /// Correct a hex-encoded codeword
    Decode {
        #[arg(value_name = "HEX")]
        codeword: String,

        #[arg(short, long)]
        parity: Option<usize>,

        /// Byte position (0-based) known to be unreliable; repeatable
        #[arg(short = 'e', long = "erasure", value_name = "POS")]
        erasures: Vec<usize>,

        /// Re-check syndromes before accepting a correction
        #[arg(long, action = ArgAction::SetTrue)]
        verify: bool,
    },

    /// Run the randomised encode/corrupt/decode harness
    Selftest {
        #[arg(short, long)]
        parity: Option<usize>,

        #[arg(long, default_value_t = 10)]
        trials: usize,

        /// Byte errors per codeword (default: parity / 2)
        #[arg(long)]
        errors: Option<usize>,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// CRC-16/CCITT of hex-encoded bytes
    Crc {
        #[arg(value_name = "HEX")]
        data: String,

        /// Use init 0xFFFF instead of 0x0000
        #[arg(long, action = ArgAction::SetTrue)]
        ccitt_false: bool,
    },

    /// Print an example configuration file
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RsfecConfig::load_from(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => RsfecConfig::load().context("Failed to load config")?,
    };
    if cli.quiet {
        config.logging = LogConfig {
            filter: config.logging.filter.take(),
            ..LogConfig::quiet()
        };
    } else if cli.verbose > 0 {
        config.logging.level = LogLevel::from_verbosity(cli.verbose);
    }
    init_logging(&config.logging);

    let output = match cli.command {
        Command::Encode { message, parity } => {
            encode_hex(&codec(&config, parity, false)?, &message)?
        }

        Command::Decode {
            codeword,
            parity,
            erasures,
            verify,
        } => decode_hex(&codec(&config, parity, verify)?, &codeword, &erasures)?,

        Command::Selftest {
            parity,
            trials,
            errors,
            seed,
        } => {
            let rs = codec(&config, parity, false)?;
            let params = SelftestParams {
                trials,
                errors: errors.unwrap_or(rs.max_errors()),
                seed: seed.unwrap_or_else(rand::random),
            };
            run_selftest(&rs, params)?
        }

        Command::Crc { data, ccitt_false } => crc_hex(&data, ccitt_false)?,

        Command::Config => RsfecConfig::example_yaml(),
    };

    print!("{output}");
    Ok(())
}

/// Hex codeword for a hex message.
fn encode_hex(rs: &ReedSolomon, message: &str) -> Result<String> {
    let data = parse_hex(message)?;
    let codeword = rs
        .encode(&data)
        .with_context(|| format!("Cannot encode {} bytes with P={}", data.len(), rs.parity()))?;
    Ok(format!("{}\n", hex::encode(codeword)))
}

/// Corrected codeword, its data bytes and what was changed.
fn decode_hex(rs: &ReedSolomon, codeword: &str, erasures: &[usize]) -> Result<String> {
    let mut cw = parse_hex(codeword)?;
    if cw.len() <= rs.parity() {
        bail!(
            "Codeword must be longer than {} parity bytes, got {}",
            rs.parity(),
            cw.len()
        );
    }

    let fixed = rs
        .decode(&mut cw, erasures)
        .context("Codeword could not be corrected")?;
    let data_len = cw.len() - rs.parity();

    let mut out = format!(
        "{}\ndata: {}\n",
        hex::encode(&cw),
        hex::encode(&cw[..data_len])
    );
    if fixed.is_clean() {
        out.push_str("clean\n");
    } else {
        out.push_str(&format!(
            "corrected {} byte(s) at {:?}\n",
            fixed.changed_count(),
            fixed.positions()
        ));
    }
    Ok(out)
}

fn run_selftest(rs: &ReedSolomon, params: SelftestParams) -> Result<String> {
    let mut out = format!(
        "RS({}, {}) with {} error(s) per codeword, {} trial(s), seed {}\n",
        rs.max_data_len() + rs.parity(),
        rs.max_data_len(),
        params.errors,
        params.trials,
        params.seed
    );
    let report = selftest::run(rs, params)?;
    out.push_str(&format!("mean encode: {:?}\n", report.mean_encode()));
    out.push_str(&format!("mean decode: {:?}\n", report.mean_decode()));
    out.push_str(&format!(
        "rejected: {}, miscorrected: {}\n",
        report.rejected, report.miscorrected
    ));

    if report.failures() == 0 {
        out.push_str("All tests passed\n");
    } else if params.errors <= rs.max_errors() {
        bail!(
            "Failed to correct {} of {} codewords",
            report.failures(),
            report.trials
        );
    }
    Ok(out)
}

fn crc_hex(data: &str, ccitt_false: bool) -> Result<String> {
    let bytes = parse_hex(data)?;
    let mut crc = if ccitt_false {
        Crc16::ccitt_false()
    } else {
        Crc16::xmodem()
    };
    crc.update(&bytes);
    Ok(format!("{:04x}\n", crc.finalize()))
}

/// Codec from the config, with command-line overrides.
fn codec(config: &RsfecConfig, parity: Option<usize>, verify: bool) -> Result<ReedSolomon> {
    let mut codec_config = config.codec.clone();
    if let Some(p) = parity {
        codec_config.parity = p;
    }
    codec_config.verify |= verify;
    ReedSolomon::from_config(&codec_config).context("Invalid codec parameters")
}

/// Hex string to bytes; whitespace and a leading `0x` are ignored.
fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let cleaned: String = input.split_whitespace().collect();
    let cleaned = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
        .unwrap_or(&cleaned);
    hex::decode(cleaned).with_context(|| format!("Invalid hex input: {input:?}"))
}
