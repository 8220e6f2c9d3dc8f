// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! AES-256 in CBC mode with PKCS#7 padding, operating on protected buffers.
//!
//! The round-key schedule lives in a [`SecureBuffer`](bulwark_buffer::SecureBuffer)
//! and data is encrypted in place inside the caller's buffer, so neither key
//! material nor plaintext is copied into plain memory.
//!
//! This crate provides confidentiality only. Authenticate ciphertexts before
//! decrypting them (the `bulwark` envelope does Encrypt-then-MAC).
//!
//! References:
//! - FIPS 197: Advanced Encryption Standard
//!   <https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.197-upd1.pdf>
//! - NIST SP 800-38A: Block Cipher Modes of Operation
//!   <https://nvlpubs.nist.gov/nistpubs/Legacy/SP/nistspecialpublication800-38a.pdf>

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod cipher;
mod consts;
mod error;
mod key_schedule;
mod state;

pub mod pkcs7;

pub use consts::{BLOCK_SIZE, KEY_SIZE};
pub use error::AesError;
pub use state::AesState;
