// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Small helpers shared by every bulwark crate.
//!
//! - [`constant_time_eq`]: timing-independent slice comparison, used for every
//!   secret comparison (buffers, strings, MACs, scrypt hashes).
//! - [`to_hex`]: lowercase hex rendering for plain digest outputs.

#![warn(missing_docs)]

use subtle::ConstantTimeEq;

/// Compares two byte slices without an early exit on the first mismatch.
///
/// Slices of different lengths compare unequal. The length itself is not
/// treated as secret.
#[inline(never)]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}

/// Renders bytes as a lowercase hex string, two characters per byte.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decodes a hex string. Panics on malformed input (test vectors only).
#[cfg(feature = "test-utils")]
pub fn hex_to_bytes(hex: &str) -> Vec<u8> {
    hex::decode(hex).expect("Failed to decode hex")
}

/// Returns true if every byte of `bytes` is zero.
#[cfg(feature = "test-utils")]
pub fn is_slice_zeroized(bytes: &[u8]) -> bool {
    bytes.iter().fold(0u8, |acc, b| acc | b) == 0
}
