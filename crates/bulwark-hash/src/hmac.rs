// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! HMAC-SHA256 per RFC 2104

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::HashError;
use crate::sha256::{BLOCK_LEN, SHA256_LEN, Sha256State};

/// Keyed HMAC-SHA256 context.
///
/// `new` absorbs `K ⊕ ipad` into the inner hash and `K ⊕ opad` into the outer
/// one, so a keyed state can be cloned and reused for many messages (PBKDF2
/// does this once per block).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HmacSha256State {
    inner: Sha256State,
    outer: Sha256State,
}

impl HmacSha256State {
    /// Keys a new context. Keys longer than the block are hashed first.
    pub fn new(key: &[u8]) -> Result<Self, HashError> {
        let mut key_block = [0u8; BLOCK_LEN];

        if key.len() > BLOCK_LEN {
            let mut hashed = [0u8; SHA256_LEN];
            Sha256State::digest(key, &mut hashed)?;
            key_block[..SHA256_LEN].copy_from_slice(&hashed);
            hashed.zeroize();
        } else {
            key_block[..key.len()].copy_from_slice(key);
        }

        let mut pad = [0u8; BLOCK_LEN];
        let mut inner = Sha256State::new();
        let mut outer = Sha256State::new();

        for (p, k) in pad.iter_mut().zip(key_block.iter()) {
            *p = k ^ 0x36;
        }
        inner.update(&pad)?;

        for (p, k) in pad.iter_mut().zip(key_block.iter()) {
            *p = k ^ 0x5c;
        }
        outer.update(&pad)?;

        pad.zeroize();
        key_block.zeroize();

        Ok(Self { inner, outer })
    }

    /// Absorbs message bytes.
    pub fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        self.inner.update(data)
    }

    /// Writes `H(K ⊕ opad || H(K ⊕ ipad || m))`. Single use.
    pub fn finish(&mut self, out: &mut [u8; SHA256_LEN]) -> Result<(), HashError> {
        let mut inner_hash = [0u8; SHA256_LEN];

        let result = self
            .inner
            .finish(&mut inner_hash)
            .and_then(|()| self.outer.update(&inner_hash))
            .and_then(|()| self.outer.finish(out));

        inner_hash.zeroize();
        result
    }

    /// One-shot HMAC of `message` under `key`.
    pub fn compute(key: &[u8], message: &[u8], out: &mut [u8; SHA256_LEN]) -> Result<(), HashError> {
        let mut mac = Self::new(key)?;
        mac.update(message)?;
        mac.finish(out)
    }
}
