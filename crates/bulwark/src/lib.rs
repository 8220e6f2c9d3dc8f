// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! <p align="center"><em>Protected-memory crypto toolkit for Rust.</em></p>
//!
//! ---
//!
//! Bulwark keeps secrets in memory that is locked while nobody is looking at
//! it, unlocks it only for the duration of a scoped access, and zeroes it
//! before it is released.
//!
//! # Features
//!
//! - **Secure buffers**: `mlock`ed, `mprotect`ed pages on Unix,
//!   `CryptProtectMemory` on Windows, XOR obfuscation elsewhere
//! - **Scoped access**: every unlock is a guard that re-locks on drop, on
//!   every exit path
//! - **Secret strings**: contiguous or one-buffer-per-character layouts
//! - **Hashes**: SHA-256, HMAC-SHA256, BLAKE2b (keyed and unkeyed), scrypt
//! - **Authenticated encryption**: AES-256-CBC + keyed BLAKE2b, Encrypt-then-MAC
//!
//! # Quick Start
//!
//! ```rust
//! use bulwark::{Error, ProtectedAes, SecureBuffer};
//! use bulwark::hash::{ProtectedHashFunction, Scrypt, ScryptParams};
//! use bulwark::string::{ProtectedString, ProtectedStringList};
//!
//! fn main() -> Result<(), Error> {
//!     // Secrets never sit in plain memory
//!     let mut key = SecureBuffer::random(32, &bulwark::rand::SystemEntropySource {})?;
//!
//!     let aes = ProtectedAes::new();
//!     let envelope = aes.encrypt(&mut key, "attack at dawn")?;
//!     assert_eq!(aes.decrypt(&mut key, &envelope)?.as_str(), "attack at dawn");
//!
//!     // Passwords typed one character at a time
//!     let mut password = ProtectedStringList::new();
//!     password.push_str("hunter2")?;
//!
//!     let scrypt = Scrypt::new(ScryptParams::new(1024, 8, 1, 64)?);
//!     let hash = scrypt.compute_hash_string(&mut password)?;
//!     let mut utf8 = password.protected_utf8_bytes()?;
//!     assert!(scrypt.compare(&mut utf8, &hash)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Crates
//!
//! | Module | Crate | Contents |
//! |--------|-------|----------|
//! | [`buffer`] | `bulwark-buffer` | [`SecureBuffer`], [`ScopedAccess`], platform backends |
//! | [`string`] | `bulwark-string` | `ProtectedStringBlock`, `ProtectedStringList` |
//! | [`hash`] | `bulwark-hash` | SHA-256, HMAC, BLAKE2b, PBKDF2, scrypt |
//! | [`aes`] | `bulwark-aes` | AES-256-CBC, PKCS#7 |
//! | [`rand`] | `bulwark-rand` | Injectable entropy sources |
//!
//! Each crate has its own error type; the facade folds all of them into
//! [`Error`].
//!
//! # Platform support
//!
//! | Platform | Backend |
//! |----------|---------|
//! | Linux, macOS | `mmap` + `mlock` + `mprotect` |
//! | Windows | `CryptProtectMemory` |
//! | anything else, or `portable` feature | XOR obfuscation |
//!
//! # License
//!
//! GPL-3.0-only

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod envelope;
mod error;

pub mod support;

pub use bulwark_aes as aes;
pub use bulwark_buffer as buffer;
pub use bulwark_hash as hash;
pub use bulwark_rand as rand;
pub use bulwark_string as string;

pub use bulwark_buffer::{ScopedAccess, SecureBuffer};
pub use envelope::ProtectedAes;
pub use error::Error;
