// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! BLAKE2b per RFC 7693
//!
//! Unkeyed and keyed modes, digests of 1 to 64 bytes. No salt or
//! personalization.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::HashError;

/// Initialization vector per RFC 7693 Section 2.6 (same as SHA-512 H(0))
const IV: [u64; 8] = [
    0x6a09e667f3bcc908,
    0xbb67ae8584caa73b,
    0x3c6ef372fe94f82b,
    0xa54ff53a5f1d36f1,
    0x510e527fade682d1,
    0x9b05688c2b3e6c1f,
    0x1f83d9abfb41bd6b,
    0x5be0cd19137e2179,
];

/// Message word permutations per RFC 7693 Section 2.7
const SIGMA: [[usize; 16]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
    [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
    [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
    [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
    [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
    [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
    [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
    [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
    [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
];

const ROUNDS: usize = 12;
const BLOCK_LEN: usize = 128;

/// Largest digest (and key) length in bytes.
pub const BLAKE2B_MAX_LEN: usize = 64;

/// Single-use BLAKE2b context.
///
/// `update` buffers up to one block and holds the last full block back until
/// more input arrives, since the final block must be compressed with the
/// finalization flag set.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Blake2bState {
    h: [u64; 8],
    v: [u64; 16],
    m: [u64; 16],
    buffer: [u8; BLOCK_LEN],
    buffer_len: usize,
    // Bytes compressed so far (t0, t1 as one 128-bit counter)
    counter: u128,
    digest_length: usize,
    finished: bool,
}

impl Blake2bState {
    /// Creates a context for a `digest_length`-byte digest, keyed if `key` is
    /// given.
    ///
    /// `digest_length` must be in `1..=64` and the key at most 64 bytes. An
    /// empty key is the same as no key.
    pub fn new(digest_length: usize, key: Option<&[u8]>) -> Result<Self, HashError> {
        if digest_length == 0 || digest_length > BLAKE2B_MAX_LEN {
            return Err(HashError::InvalidArgument(
                "blake2b digest length must be between 1 and 64",
            ));
        }

        let key = key.unwrap_or_default();

        if key.len() > BLAKE2B_MAX_LEN {
            return Err(HashError::InvalidArgument(
                "blake2b key must be at most 64 bytes",
            ));
        }

        let mut h = IV;
        // Parameter block: fanout = depth = 1, key length, digest length
        h[0] ^= 0x0101_0000 ^ ((key.len() as u64) << 8) ^ digest_length as u64;

        let mut state = Self {
            h,
            v: [0; 16],
            m: [0; 16],
            buffer: [0; BLOCK_LEN],
            buffer_len: 0,
            counter: 0,
            digest_length,
            finished: false,
        };

        // The zero-padded key is the first block.
        if !key.is_empty() {
            state.buffer[..key.len()].copy_from_slice(key);
            state.buffer_len = BLOCK_LEN;
        }

        Ok(state)
    }

    /// One-shot digest. `out.len()` is the digest length.
    pub fn digest(out: &mut [u8], key: Option<&[u8]>, input: &[u8]) -> Result<(), HashError> {
        let mut state = Self::new(out.len(), key)?;
        state.update(input)?;
        state.finish(out)
    }

    /// Digest length this context was created for.
    pub fn digest_length(&self) -> usize {
        self.digest_length
    }

    #[inline(always)]
    fn g(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
        v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
        v[d] = (v[d] ^ v[a]).rotate_right(32);
        v[c] = v[c].wrapping_add(v[d]);
        v[b] = (v[b] ^ v[c]).rotate_right(24);
        v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
        v[d] = (v[d] ^ v[a]).rotate_right(16);
        v[c] = v[c].wrapping_add(v[d]);
        v[b] = (v[b] ^ v[c]).rotate_right(63);
    }

    /// Compression function F per RFC 7693 Section 3.2
    fn compress(&mut self, last: bool) {
        for (word, chunk) in self.m.iter_mut().zip(self.buffer.chunks_exact(8)) {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            *word = u64::from_le_bytes(bytes);
        }

        self.v[..8].copy_from_slice(&self.h);
        self.v[8..].copy_from_slice(&IV);
        self.v[12] ^= self.counter as u64;
        self.v[13] ^= (self.counter >> 64) as u64;

        if last {
            self.v[14] = !self.v[14];
        }

        for round in 0..ROUNDS {
            let s = &SIGMA[round % 10];
            let (v, m) = (&mut self.v, &self.m);

            Self::g(v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
            Self::g(v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
            Self::g(v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
            Self::g(v, 3, 7, 11, 15, m[s[6]], m[s[7]]);
            Self::g(v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
            Self::g(v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
            Self::g(v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
            Self::g(v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
        }

        for i in 0..8 {
            self.h[i] ^= self.v[i] ^ self.v[i + 8];
        }

        self.v.zeroize();
        self.m.zeroize();
    }

    /// Absorbs `data`.
    pub fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        if self.finished {
            return Err(HashError::InvalidState);
        }

        let mut rest = data;

        while !rest.is_empty() {
            // A full buffer is only compressed once more input follows it.
            if self.buffer_len == BLOCK_LEN {
                self.counter = self.counter.wrapping_add(BLOCK_LEN as u128);
                self.compress(false);
                self.buffer.zeroize();
                self.buffer_len = 0;
            }

            let take = (BLOCK_LEN - self.buffer_len).min(rest.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&rest[..take]);
            self.buffer_len += take;
            rest = &rest[take..];
        }

        Ok(())
    }

    /// Compresses the final block, writes the digest and wipes the state.
    ///
    /// `out` must be exactly `digest_length` bytes.
    pub fn finish(&mut self, out: &mut [u8]) -> Result<(), HashError> {
        if self.finished {
            return Err(HashError::InvalidState);
        }

        if out.len() != self.digest_length {
            return Err(HashError::InvalidArgument(
                "output length differs from blake2b digest length",
            ));
        }

        self.counter = self.counter.wrapping_add(self.buffer_len as u128);
        self.buffer[self.buffer_len..].fill(0);
        self.compress(true);

        for (chunk, word) in out.chunks_mut(8).zip(self.h.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes()[..chunk.len()]);
        }

        self.zeroize();
        self.finished = true;

        Ok(())
    }
}
