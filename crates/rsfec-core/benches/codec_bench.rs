//! Codec Benchmarks
//!
//! Run with: cargo bench -p rsfec-core --bench codec_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rsfec_core::crc::{Crc16, CrcComputer};
use rsfec_core::ReedSolomon;

const PARITIES: [usize; 3] = [4, 16, 32];

fn full_codeword(rs: &ReedSolomon, rng: &mut StdRng) -> Vec<u8> {
    let msg: Vec<u8> = (0..rs.max_data_len()).map(|_| rng.gen()).collect();
    rs.encode(&msg).unwrap_or_default()
}

fn corrupt(cw: &mut [u8], count: usize, rng: &mut StdRng) {
    for p in sample(rng, cw.len(), count).into_vec() {
        cw[p] ^= rng.gen_range(1..=255u8);
    }
}

// ============================================================================
// Encoder
// ============================================================================

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let mut rng = StdRng::seed_from_u64(1);

    for parity in PARITIES {
        let rs = ReedSolomon::new(parity).unwrap();
        let msg: Vec<u8> = (0..rs.max_data_len()).map(|_| rng.gen()).collect();
        let mut out = [0u8; 255];

        group.throughput(Throughput::Bytes(msg.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode_into", parity), &msg, |b, msg| {
            b.iter(|| rs.encode_into(black_box(msg), &mut out))
        });
    }

    group.finish();
}

// ============================================================================
// Decoder
// ============================================================================

fn bench_syndromes(c: &mut Criterion) {
    let mut group = c.benchmark_group("syndromes");
    let mut rng = StdRng::seed_from_u64(2);

    for parity in PARITIES {
        let rs = ReedSolomon::new(parity).unwrap();
        let cw = full_codeword(&rs, &mut rng);

        group.throughput(Throughput::Bytes(cw.len() as u64));
        group.bench_with_input(BenchmarkId::new("clean", parity), &cw, |b, cw| {
            b.iter(|| rs.compute_syndromes(black_box(cw)))
        });
    }

    group.finish();
}

fn bench_correct(c: &mut Criterion) {
    let mut group = c.benchmark_group("correct");
    let mut rng = StdRng::seed_from_u64(3);

    for parity in PARITIES {
        let rs = ReedSolomon::new(parity).unwrap();
        let original = full_codeword(&rs, &mut rng);

        let mut errors = original.clone();
        corrupt(&mut errors, rs.max_errors(), &mut rng);
        group.bench_with_input(BenchmarkId::new("max_errors", parity), &errors, |b, rx| {
            b.iter(|| {
                let mut cw = rx.clone();
                rs.decode(black_box(&mut cw), &[])
            })
        });

        let mut erased = original.clone();
        let erasures = sample(&mut rng, erased.len(), rs.max_erasures()).into_vec();
        for &p in &erasures {
            erased[p] = 0;
        }
        group.bench_with_input(BenchmarkId::new("max_erasures", parity), &erased, |b, rx| {
            b.iter(|| {
                let mut cw = rx.clone();
                rs.decode(black_box(&mut cw), black_box(&erasures))
            })
        });
    }

    group.finish();
}

// ============================================================================
// CRC
// ============================================================================

fn bench_crc(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc16");
    let data = vec![0xA5u8; 251];
    let mut crc = Crc16::xmodem();

    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("xmodem_251", |b| {
        b.iter(|| {
            crc.reset();
            crc.update(black_box(&data));
            crc.finalize()
        })
    });

    group.finish();
}

criterion_group!(
    name = codec_benches;
    config = Criterion::default();
    targets = bench_encode, bench_syndromes, bench_correct
);

criterion_group!(
    name = util_benches;
    config = Criterion::default();
    targets = bench_crc
);

criterion_main!(codec_benches, util_benches);
