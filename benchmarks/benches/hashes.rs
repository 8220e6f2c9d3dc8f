// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use bulwark_hash::{Blake2bState, ScryptParams, Sha256State, scrypt};

fn benchmark_digests(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest");

    for len in [64usize, 1024, 16 * 1024].iter() {
        let input = vec![0x5au8; *len];
        group.throughput(Throughput::Bytes(*len as u64));

        group.bench_with_input(format!("sha256/{len} bytes"), &input, |b, input| {
            let mut out = [0u8; 32];
            b.iter(|| Sha256State::digest(black_box(input), &mut out).expect("sha256 failed"));
        });

        group.bench_with_input(format!("blake2b-512/{len} bytes"), &input, |b, input| {
            let mut out = [0u8; 64];
            b.iter(|| {
                Blake2bState::digest(&mut out, None, black_box(input)).expect("blake2b failed")
            });
        });
    }

    group.finish();
}

fn benchmark_scrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("scrypt");
    group.sample_size(10);

    // Interactive-login cost and the RFC 7914 vector cost
    for (n, r) in [(1024u64, 8u32), (16384, 8)] {
        let params = ScryptParams::new(n, r, 1, 64).expect("invalid params");
        let mut out = [0u8; 64];

        group.bench_function(format!("N={n},r={r},p=1"), |b| {
            b.iter(|| {
                scrypt(black_box(b"password"), black_box(b"NaCl"), &params, &mut out)
                    .expect("scrypt failed")
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_digests, benchmark_scrypt);
criterion_main!(benches);
