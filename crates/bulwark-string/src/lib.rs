// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Secret strings built on [`SecureBuffer`](bulwark_buffer::SecureBuffer).
//!
//! Two layouts share the [`ProtectedString`] contract:
//!
//! - [`ProtectedStringBlock`]: one contiguous buffer of UTF-8 bytes. Cheap to
//!   build and compare, but a comparison unlocks the whole string at once.
//! - [`ProtectedStringList`]: one 4-byte buffer per code point. A comparison
//!   unlocks a single character at a time, so an observer single-stepping the
//!   process sees one character per observation point.
//!
//! # Example
//!
//! ```rust
//! use bulwark_string::{ProtectedString, ProtectedStringList, StringError};
//!
//! fn example() -> Result<(), StringError> {
//!     let mut password = ProtectedStringList::new();
//!     password.push_str("pässwörd")?;
//!
//!     assert_eq!(password.len(), 8);
//!
//!     let mut utf8 = password.protected_utf8_bytes()?;
//!     assert_eq!(utf8.len(), 10);
//!     assert!(utf8.is_locked());
//!
//!     utf8.free();
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod block;
mod error;
mod list;
mod traits;
mod utf8;

pub use block::ProtectedStringBlock;
pub use error::StringError;
pub use list::ProtectedStringList;
pub use traits::ProtectedString;
