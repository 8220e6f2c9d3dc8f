// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Protected memory buffers with scoped unlocking and zeroize-on-free.
//!
//! [`SecureBuffer`] is the foundation of every bulwark primitive: a fixed
//! capacity region that is locked (inaccessible) at rest, unlocked only through
//! a [`ScopedAccess`] guard, and zeroed before it is released.
//!
//! # Backends
//!
//! The region comes from a platform backend chosen once per process
//! ([`selected_backend`]):
//!
//! - **Page** (Unix): `mmap` + `mlock`, toggled between `PROT_NONE` and
//!   `PROT_READ | PROT_WRITE`.
//! - **Encrypted** (Windows): `CryptProtectMemory` in place, 16-byte granularity.
//! - **Frobnicated** (fallback, or the `portable` feature): XOR obfuscation.
//!
//! # Example
//!
//! ```rust
//! use bulwark_buffer::{BufferError, SecureBuffer};
//!
//! fn example() -> Result<(), BufferError> {
//!     let mut buffer = SecureBuffer::allocate(32)?;
//!
//!     buffer.write(b"secret", 0)?;
//!     assert!(buffer.is_locked());
//!
//!     buffer.open(|content: &[u8]| {
//!         assert_eq!(&content[..6], b"secret");
//!         Ok::<_, BufferError>(())
//!     })?;
//!
//!     // Zeroed and released here (also on drop).
//!     buffer.free();
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod backend;
mod error;
mod scoped;
mod secure_buffer;

pub use backend::{BackendKind, selected_backend};
pub use error::{BufferError, PageError};
pub use scoped::ScopedAccess;
pub use secure_buffer::SecureBuffer;
