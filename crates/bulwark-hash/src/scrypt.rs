// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! scrypt per RFC 7914
//!
//! ```text
//! B  = PBKDF2-HMAC-SHA256(P, S, 1, p * 128 * r)
//! B_i = ROMix(r, B_i, N)        for each of the p lanes
//! DK = PBKDF2-HMAC-SHA256(P, B, 1, dkLen)
//! ```

use zeroize::{Zeroize, Zeroizing};

use bulwark_buffer::BufferError;

use crate::error::HashError;
use crate::pbkdf2::pbkdf2_hmac_sha256;
use crate::salsa::{MixScratch, SALSA_WORDS, block_mix};

/// Cost parameters of a scrypt derivation.
///
/// Defaults: `N = 65536`, `r = 8`, `p = 1`, a 128-byte key and a 512-byte
/// salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptParams {
    n: u64,
    r: u32,
    p: u32,
    key_len: usize,
    salt_len: usize,
}

impl ScryptParams {
    /// Default CPU/memory cost `N`.
    pub const DEFAULT_N: u64 = 65536;
    /// Default block size `r`.
    pub const DEFAULT_R: u32 = 8;
    /// Default parallelization `p`.
    pub const DEFAULT_P: u32 = 1;
    /// Default derived key length in bytes.
    pub const DEFAULT_KEY_LEN: usize = 128;
    /// Default salt length in bytes.
    pub const DEFAULT_SALT_LEN: usize = 512;

    /// Validates and builds a parameter set with the default salt length.
    ///
    /// `n` must be a power of two greater than 1, `r`, `p` and `key_len` at
    /// least 1, and the working buffers (`128 * r * p` and `128 * r * n`
    /// bytes) addressable.
    pub fn new(n: u64, r: u32, p: u32, key_len: usize) -> Result<Self, HashError> {
        if n < 2 || !n.is_power_of_two() {
            return Err(HashError::InvalidArgument(
                "scrypt N must be a power of two greater than 1",
            ));
        }

        if r == 0 || p == 0 {
            return Err(HashError::InvalidArgument("scrypt r and p must be at least 1"));
        }

        if key_len == 0 {
            return Err(HashError::InvalidArgument("scrypt key length must be at least 1"));
        }

        let params = Self {
            n,
            r,
            p,
            key_len,
            salt_len: Self::DEFAULT_SALT_LEN,
        };

        params.lane_len()?;
        params.lanes_len()?;
        params.table_len()?;

        Ok(params)
    }

    /// Same parameters with a different salt length.
    pub fn with_salt_len(mut self, salt_len: usize) -> Self {
        self.salt_len = salt_len;
        self
    }

    /// Same parameters with a different key length.
    pub fn with_key_len(self, key_len: usize) -> Result<Self, HashError> {
        Ok(Self::new(self.n, self.r, self.p, key_len)?.with_salt_len(self.salt_len))
    }

    /// CPU/memory cost `N`.
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Block size `r`.
    pub fn r(&self) -> u32 {
        self.r
    }

    /// Parallelization `p`.
    pub fn p(&self) -> u32 {
        self.p
    }

    /// Derived key length in bytes.
    pub fn key_len(&self) -> usize {
        self.key_len
    }

    /// Salt length in bytes drawn for fresh hashes.
    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    fn overflow() -> HashError {
        HashError::InvalidArgument("scrypt parameters overflow the address space")
    }

    /// Bytes per lane: `128 * r`.
    fn lane_len(&self) -> Result<usize, HashError> {
        (self.r as usize).checked_mul(128).ok_or_else(Self::overflow)
    }

    /// Bytes of B: `128 * r * p`.
    fn lanes_len(&self) -> Result<usize, HashError> {
        self.lane_len()?
            .checked_mul(self.p as usize)
            .ok_or_else(Self::overflow)
    }

    /// Bytes of V: `128 * r * N`.
    fn table_len(&self) -> Result<usize, HashError> {
        let n = usize::try_from(self.n).map_err(|_| Self::overflow())?;
        self.lane_len()?.checked_mul(n).ok_or_else(Self::overflow)
    }

    /// Working memory of one derivation in bytes: `128 * r * (N + p)`.
    pub fn memory_cost(&self) -> Result<usize, HashError> {
        self.table_len()?
            .checked_add(self.lanes_len()?)
            .ok_or_else(Self::overflow)
    }
}

impl Default for ScryptParams {
    fn default() -> Self {
        Self {
            n: Self::DEFAULT_N,
            r: Self::DEFAULT_R,
            p: Self::DEFAULT_P,
            key_len: Self::DEFAULT_KEY_LEN,
            salt_len: Self::DEFAULT_SALT_LEN,
        }
    }
}

/// Working memory of one ROMix pass, wiped on drop.
struct RoMix {
    r: usize,
    n: usize,
    x: Zeroizing<Vec<u32>>,
    y: Zeroizing<Vec<u32>>,
    v: Zeroizing<Vec<u32>>,
    scratch: MixScratch,
}

impl RoMix {
    fn new(params: &ScryptParams) -> Result<Self, HashError> {
        let lane_words = params.lane_len()? / 4;
        let table_words = params.table_len()? / 4;

        Ok(Self {
            r: params.r as usize,
            n: params.n as usize,
            x: zeroed(lane_words)?,
            y: zeroed(lane_words)?,
            v: zeroed(table_words)?,
            scratch: MixScratch::default(),
        })
    }

    /// Integerify(X) mod N: the first 8 bytes of the last 64-byte chunk,
    /// little-endian. N is a power of two, so `mod` is a mask.
    fn integerify(&self) -> usize {
        let last = (2 * self.r - 1) * SALSA_WORDS;
        let value = u64::from(self.x[last]) | (u64::from(self.x[last + 1]) << 32);

        (value & (self.n as u64 - 1)) as usize
    }

    /// ROMix over one lane, in place.
    fn run(&mut self, lane: &mut [u8]) {
        let lane_words = self.x.len();

        for (word, chunk) in self.x.iter_mut().zip(lane.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        // V_i = X; X = BlockMix(X)
        for i in 0..self.n {
            self.v[i * lane_words..(i + 1) * lane_words].copy_from_slice(&self.x);
            block_mix(&self.x, &mut self.y, self.r, &mut self.scratch);
            core::mem::swap(&mut self.x, &mut self.y);
        }

        // X = BlockMix(X ^ V_j)
        for _ in 0..self.n {
            let j = self.integerify();
            let row = &self.v[j * lane_words..(j + 1) * lane_words];

            for (x, v) in self.x.iter_mut().zip(row.iter()) {
                *x ^= v;
            }

            block_mix(&self.x, &mut self.y, self.r, &mut self.scratch);
            core::mem::swap(&mut self.x, &mut self.y);
        }

        for (chunk, word) in lane.chunks_exact_mut(4).zip(self.x.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }

        self.x.as_mut_slice().zeroize();
        self.y.as_mut_slice().zeroize();
    }
}

impl Drop for RoMix {
    fn drop(&mut self) {
        self.scratch.zeroize();
    }
}

/// Fills `out` with the scrypt derivation of `password` under `salt`.
///
/// `out.len()` overrides `params.key_len()`. All intermediate memory is wiped
/// before return.
pub fn scrypt(
    password: &[u8],
    salt: &[u8],
    params: &ScryptParams,
    out: &mut [u8],
) -> Result<(), HashError> {
    if out.is_empty() {
        return Err(HashError::InvalidArgument("scrypt key length must be at least 1"));
    }

    let lane_len = params.lane_len()?;
    let mut b = zeroed::<u8>(params.lanes_len()?)?;

    pbkdf2_hmac_sha256(password, salt, 1, &mut b)?;

    let mut romix = RoMix::new(params)?;
    for lane in b.chunks_exact_mut(lane_len) {
        romix.run(lane);
    }

    pbkdf2_hmac_sha256(password, &b, 1, out)
}

/// Zero-filled working buffer; allocation failure is an error, not an abort.
fn zeroed<T: Copy + Default + Zeroize>(len: usize) -> Result<Zeroizing<Vec<T>>, HashError> {
    let mut words = Vec::new();
    words
        .try_reserve_exact(len)
        .map_err(|_| HashError::Buffer(BufferError::AllocationFailure))?;
    words.resize(len, T::default());

    Ok(Zeroizing::new(words))
}
