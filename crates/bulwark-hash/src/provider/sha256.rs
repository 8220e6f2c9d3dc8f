// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use bulwark_buffer::SecureBuffer;

use super::{ProtectedHashFunction, hex_of};
use crate::error::HashError;
use crate::hmac::HmacSha256State;
use crate::sha256::{SHA256_LEN, Sha256State};

/// SHA-256 and HMAC-SHA256 over protected buffers.
///
/// # Example
///
/// ```rust
/// use bulwark_buffer::SecureBuffer;
/// use bulwark_hash::{HashError, ProtectedHashFunction, Sha256};
///
/// fn example() -> Result<(), HashError> {
///     let mut input = SecureBuffer::from_slice(b"abc")?;
///     let digest = Sha256.compute_hash(&mut input)?;
///
///     assert_eq!(
///         digest,
///         "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
///     );
///     Ok(())
/// }
/// # example().unwrap();
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256;

fn as_digest(out: &mut [u8]) -> Result<&mut [u8; SHA256_LEN], HashError> {
    out.try_into()
        .map_err(|_| HashError::InvalidArgument("sha256 output must be 32 bytes"))
}

impl Sha256 {
    /// HMAC-SHA256 of `message` under `key`, as lowercase hex.
    pub fn compute_hmac(
        &self,
        key: &mut SecureBuffer,
        message: &mut SecureBuffer,
    ) -> Result<String, HashError> {
        let mut mac = self.compute_hmac_protected(key, message)?;
        hex_of(&mut mac)
    }

    /// HMAC-SHA256 of `message` under `key`, into a protected buffer.
    pub fn compute_hmac_protected(
        &self,
        key: &mut SecureBuffer,
        message: &mut SecureBuffer,
    ) -> Result<SecureBuffer, HashError> {
        let mut out = SecureBuffer::allocate(SHA256_LEN)?;

        {
            let mut access = out.access()?;
            let digest = as_digest(access.content_mut())?;

            key.open(|key| {
                message.open(|message| HmacSha256State::compute(key, message, digest))
            })?;
        }

        Ok(out)
    }
}

impl ProtectedHashFunction for Sha256 {
    fn compute_hash_protected(&self, input: &mut SecureBuffer) -> Result<SecureBuffer, HashError> {
        let mut out = SecureBuffer::allocate(SHA256_LEN)?;

        {
            let mut access = out.access()?;
            let digest = as_digest(access.content_mut())?;

            input.open(|data| Sha256State::digest(data, digest))?;
        }

        Ok(out)
    }
}
