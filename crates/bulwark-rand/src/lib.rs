// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # bulwark_rand
//!
//! Cryptographically secure randomness for the bulwark primitives.
//!
//! Nothing in bulwark reaches for a global RNG: every operation that needs
//! randomness (envelope IVs, scrypt salts) takes an [`EntropySource`]
//! explicitly, so tests can inject a deterministic or failing source.
//!
//! ## Core Types
//!
//! - [`SystemEntropySource`]: OS-level CSPRNG (via `getrandom`)
//!
//! ## Example
//!
//! ```rust
//! use bulwark_rand::{EntropySource, SystemEntropySource};
//!
//! let entropy = SystemEntropySource {};
//!
//! let mut iv = [0u8; 16];
//! entropy.fill_bytes(&mut iv).expect("Failed to generate entropy");
//! ```

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod error;
mod system;
mod traits;

#[cfg(any(test, feature = "test-utils"))]
pub mod support;

pub use error::EntropyError;
pub use system::SystemEntropySource;
pub use traits::EntropySource;
