// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use bulwark_buffer::SecureBuffer;

use super::{ProtectedHashFunction, hex_of};
use crate::blake2b::{BLAKE2B_MAX_LEN, Blake2bState};
use crate::error::HashError;

/// BLAKE2b over protected buffers.
///
/// The digest length is fixed per provider (32 bytes by default). The keyed
/// MAC always produces the full 64 bytes.
#[derive(Debug, Clone, Copy)]
pub struct Blake2b {
    digest_length: usize,
}

impl Default for Blake2b {
    fn default() -> Self {
        Self {
            digest_length: Self::DEFAULT_DIGEST_LEN,
        }
    }
}

impl Blake2b {
    /// Digest length of [`Blake2b::default`].
    pub const DEFAULT_DIGEST_LEN: usize = 32;

    /// Length of [`compute_mac`](Self::compute_mac) tags.
    pub const MAC_LEN: usize = BLAKE2B_MAX_LEN;

    /// Provider producing `digest_length`-byte digests (1 to 64).
    pub fn new(digest_length: usize) -> Result<Self, HashError> {
        if digest_length == 0 || digest_length > BLAKE2B_MAX_LEN {
            return Err(HashError::InvalidArgument(
                "blake2b digest length must be between 1 and 64",
            ));
        }

        Ok(Self { digest_length })
    }

    /// Digest length in bytes.
    pub fn digest_length(&self) -> usize {
        self.digest_length
    }

    /// Plain one-shot digest of `len` bytes, keyed if `key` is given.
    pub fn digest(len: usize, key: Option<&[u8]>, input: &[u8]) -> Result<Vec<u8>, HashError> {
        let mut out = vec![0u8; len];
        Blake2bState::digest(&mut out, key, input)?;

        Ok(out)
    }

    /// 64-byte keyed BLAKE2b tag of a public `message` under a protected key.
    pub fn compute_mac(
        &self,
        key: &mut SecureBuffer,
        message: &[u8],
    ) -> Result<[u8; BLAKE2B_MAX_LEN], HashError> {
        let mut tag = [0u8; BLAKE2B_MAX_LEN];

        key.open(|key| Blake2bState::digest(&mut tag, Some(key), message))?;

        Ok(tag)
    }

    /// 64-byte keyed BLAKE2b of a protected `message`, as lowercase hex.
    pub fn compute_hmac(
        &self,
        key: &mut SecureBuffer,
        message: &mut SecureBuffer,
    ) -> Result<String, HashError> {
        let mut mac = self.compute_hmac_protected(key, message)?;
        hex_of(&mut mac)
    }

    /// 64-byte keyed BLAKE2b of a protected `message`, into a protected buffer.
    pub fn compute_hmac_protected(
        &self,
        key: &mut SecureBuffer,
        message: &mut SecureBuffer,
    ) -> Result<SecureBuffer, HashError> {
        let mut out = SecureBuffer::allocate(BLAKE2B_MAX_LEN)?;

        {
            let mut access = out.access()?;
            let tag = access.content_mut();

            key.open(|key| {
                message.open(|message| Blake2bState::digest(tag, Some(key), message))
            })?;
        }

        Ok(out)
    }
}

impl ProtectedHashFunction for Blake2b {
    fn compute_hash_protected(&self, input: &mut SecureBuffer) -> Result<SecureBuffer, HashError> {
        let mut out = SecureBuffer::allocate(self.digest_length)?;

        {
            let mut access = out.access()?;
            let digest = access.content_mut();

            input.open(|data| Blake2bState::digest(digest, None, data))?;
        }

        Ok(out)
    }
}
