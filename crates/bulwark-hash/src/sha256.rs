// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! SHA-256 per FIPS 180-4 Section 6.2

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::HashError;

/// SHA-256 constants K per FIPS 180-4 Section 4.2.2
const K256: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

/// Initial hash values H(0) per FIPS 180-4 Section 5.3.3
/// First 32 bits of fractional parts of square roots of first 8 primes
const H0: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

pub(crate) const BLOCK_LEN: usize = 64;

/// Digest length in bytes.
pub const SHA256_LEN: usize = 32;

/// Single-use SHA-256 context.
///
/// Feed input with [`update`](Self::update), read the digest once with
/// [`finish`](Self::finish). The message schedule, working variables and the
/// partial block are wiped after every compression and on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sha256State {
    // Hash state H(i)
    h: [u32; 8],

    // Message schedule W[0..63]
    w: [u32; 64],

    // Working variables a..h
    wv: [u32; 8],

    // Input buffering
    buffer: [u8; BLOCK_LEN],
    buffer_len: usize,
    total_len: u64,

    finished: bool,
}

impl Default for Sha256State {
    fn default() -> Self {
        Self::new()
    }
}

impl Sha256State {
    /// Creates a state initialized with H(0).
    pub fn new() -> Self {
        Self {
            h: H0,
            w: [0; 64],
            wv: [0; 8],
            buffer: [0; BLOCK_LEN],
            buffer_len: 0,
            total_len: 0,
            finished: false,
        }
    }

    /// One-shot digest of `data`.
    pub fn digest(data: &[u8], out: &mut [u8; SHA256_LEN]) -> Result<(), HashError> {
        let mut state = Self::new();
        state.update(data)?;
        state.finish(out)
    }

    /// Compression over `self.buffer` per FIPS 180-4 Section 6.2.2
    fn compress(&mut self) {
        // W[0..15] from block (big-endian)
        for (t, chunk) in self.buffer.chunks_exact(4).enumerate() {
            self.w[t] = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        // W[t] = σ1(W[t-2]) + W[t-7] + σ0(W[t-15]) + W[t-16]
        for t in 16..64 {
            let s0 = self.w[t - 15].rotate_right(7)
                ^ self.w[t - 15].rotate_right(18)
                ^ (self.w[t - 15] >> 3);
            let s1 = self.w[t - 2].rotate_right(17)
                ^ self.w[t - 2].rotate_right(19)
                ^ (self.w[t - 2] >> 10);

            self.w[t] = s1
                .wrapping_add(self.w[t - 7])
                .wrapping_add(s0)
                .wrapping_add(self.w[t - 16]);
        }

        self.wv = self.h;

        for (k, wt) in K256.iter().zip(self.w.iter()) {
            let [a, b, c, d, e, f, g, h] = self.wv;

            // T1 = h + Σ1(e) + Ch(e,f,g) + K[t] + W[t]
            let bsig1 = e.rotate_right(6) ^ e.rotate_right(11) ^ e.rotate_right(25);
            let ch = (e & f) ^ (!e & g);
            let t1 = h
                .wrapping_add(bsig1)
                .wrapping_add(ch)
                .wrapping_add(*k)
                .wrapping_add(*wt);

            // T2 = Σ0(a) + Maj(a,b,c)
            let bsig0 = a.rotate_right(2) ^ a.rotate_right(13) ^ a.rotate_right(22);
            let maj = (a & b) ^ (a & c) ^ (b & c);
            let t2 = bsig0.wrapping_add(maj);

            self.wv = [t1.wrapping_add(t2), a, b, c, d.wrapping_add(t1), e, f, g];
        }

        for (h, v) in self.h.iter_mut().zip(self.wv.iter()) {
            *h = h.wrapping_add(*v);
        }

        self.w.zeroize();
        self.wv.zeroize();
        self.buffer.zeroize();
        self.buffer_len = 0;
    }

    /// Absorbs `data`.
    pub fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        if self.finished {
            return Err(HashError::InvalidState);
        }

        self.total_len = self.total_len.wrapping_add(data.len() as u64);

        let mut rest = data;

        while !rest.is_empty() {
            let take = (BLOCK_LEN - self.buffer_len).min(rest.len());

            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&rest[..take]);
            self.buffer_len += take;
            rest = &rest[take..];

            if self.buffer_len == BLOCK_LEN {
                self.compress();
            }
        }

        Ok(())
    }

    /// Pads, writes the digest and wipes the state. Single use.
    pub fn finish(&mut self, out: &mut [u8; SHA256_LEN]) -> Result<(), HashError> {
        if self.finished {
            return Err(HashError::InvalidState);
        }

        let bit_len = self.total_len.wrapping_mul(8);

        // Append 0x80 (1 bit followed by zeros)
        self.buffer[self.buffer_len] = 0x80;
        self.buffer_len += 1;

        // No room left for the 64-bit length
        if self.buffer_len > BLOCK_LEN - 8 {
            self.buffer[self.buffer_len..].fill(0);
            self.compress();
        }

        self.buffer[self.buffer_len..BLOCK_LEN - 8].fill(0);
        self.buffer[BLOCK_LEN - 8..].copy_from_slice(&bit_len.to_be_bytes());
        self.compress();

        for (chunk, word) in out.chunks_exact_mut(4).zip(self.h.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }

        self.zeroize();
        self.finished = true;

        Ok(())
    }
}
