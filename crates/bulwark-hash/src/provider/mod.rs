// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Hash providers over protected inputs.

mod blake2b;
mod scrypt;
mod sha256;

pub use blake2b::Blake2b;
pub use scrypt::Scrypt;
pub use sha256::Sha256;

use bulwark_buffer::SecureBuffer;
use bulwark_string::ProtectedString;
use bulwark_util::to_hex;

use crate::error::HashError;

/// A hash function that reads its input from protected memory.
///
/// The input buffer is unlocked only while it is absorbed. Protected outputs
/// are written straight into a fresh locked [`SecureBuffer`]; plain outputs
/// are lowercase hex digests, or self-describing strings for password
/// hashes.
pub trait ProtectedHashFunction {
    /// Hashes `input` into a new protected buffer.
    fn compute_hash_protected(&self, input: &mut SecureBuffer) -> Result<SecureBuffer, HashError>;

    /// Hashes `input` into a printable string.
    fn compute_hash(&self, input: &mut SecureBuffer) -> Result<String, HashError> {
        let mut digest = self.compute_hash_protected(input)?;
        hex_of(&mut digest)
    }

    /// Hashes the UTF-8 encoding of `input` into a new protected buffer.
    fn compute_hash_protected_string<S>(&self, input: &mut S) -> Result<SecureBuffer, HashError>
    where
        S: ProtectedString + ?Sized,
    {
        let mut utf8 = input.protected_utf8_bytes()?;
        self.compute_hash_protected(&mut utf8)
    }

    /// Hashes the UTF-8 encoding of `input` into a printable string.
    fn compute_hash_string<S>(&self, input: &mut S) -> Result<String, HashError>
    where
        S: ProtectedString + ?Sized,
    {
        let mut utf8 = input.protected_utf8_bytes()?;
        self.compute_hash(&mut utf8)
    }
}

/// Lowercase hex of a protected buffer's content.
pub(crate) fn hex_of(buffer: &mut SecureBuffer) -> Result<String, HashError> {
    buffer.open(|content| Ok(to_hex(content)))
}
