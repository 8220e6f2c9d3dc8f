// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Hash functions and password hashing over protected memory.
//!
//! - SHA-256 and HMAC-SHA256 (FIPS 180-4, RFC 2104)
//! - BLAKE2b, unkeyed and keyed (RFC 7693)
//! - PBKDF2-HMAC-SHA256 (RFC 8018) and scrypt (RFC 7914)
//!
//! The streaming states ([`Sha256State`], [`HmacSha256State`],
//! [`Blake2bState`]) work on plain slices and wipe themselves on drop. The
//! providers ([`Sha256`], [`Blake2b`], [`Scrypt`]) read their input from a
//! [`SecureBuffer`](bulwark_buffer::SecureBuffer) or a
//! [`ProtectedString`](bulwark_string::ProtectedString) and write protected
//! outputs straight into locked buffers.
//!
//! References:
//! - FIPS 180-4: Secure Hash Standard
//!   <https://nvlpubs.nist.gov/nistpubs/fips/nist.fips.180-4.pdf>
//! - RFC 7693: The BLAKE2 Cryptographic Hash and MAC
//!   <https://datatracker.ietf.org/doc/html/rfc7693>
//! - RFC 7914: The scrypt Password-Based Key Derivation Function
//!   <https://datatracker.ietf.org/doc/html/rfc7914>

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod blake2b;
mod error;
mod hmac;
mod pbkdf2;
mod provider;
mod salsa;
mod scrypt;
mod sha256;

pub use blake2b::{BLAKE2B_MAX_LEN, Blake2bState};
pub use error::HashError;
pub use hmac::HmacSha256State;
pub use pbkdf2::pbkdf2_hmac_sha256;
pub use provider::{Blake2b, ProtectedHashFunction, Scrypt, Sha256};
pub use scrypt::{ScryptParams, scrypt};
pub use sha256::{SHA256_LEN, Sha256State};
