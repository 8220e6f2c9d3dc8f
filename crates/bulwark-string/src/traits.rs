// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use bulwark_buffer::SecureBuffer;

use crate::error::StringError;

/// Common contract of the protected string layouts.
///
/// Lengths count code points, not bytes. Every operation leaves the backing
/// buffers locked when it returns.
pub trait ProtectedString {
    /// Number of code points.
    fn len(&self) -> usize;

    /// Number of UTF-8 bytes.
    fn byte_len(&self) -> usize;

    /// Returns true if the string holds no characters.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends one character.
    fn append(&mut self, c: char) -> Result<(), StringError>;

    /// Appends every character of `s`.
    ///
    /// `s` itself is not protected; callers holding it in plain memory
    /// should wipe it afterwards.
    fn push_str(&mut self, s: &str) -> Result<(), StringError> {
        for c in s.chars() {
            self.append(c)?;
        }

        Ok(())
    }

    /// Returns the character at `index`.
    fn get(&mut self, index: usize) -> Result<char, StringError>;

    /// Removes and returns the last character.
    fn pop(&mut self) -> Result<Option<char>, StringError>;

    /// Removes every character, wiping the released storage.
    fn clear(&mut self) -> Result<(), StringError>;

    /// Compares two strings of the same layout in constant time over their
    /// content. Strings of different lengths compare unequal.
    fn equals(&mut self, other: &mut Self) -> Result<bool, StringError>
    where
        Self: Sized;

    /// Copies the UTF-8 encoding into a fresh, locked [`SecureBuffer`].
    ///
    /// The bytes move buffer to buffer; no plain copy is made.
    fn protected_utf8_bytes(&mut self) -> Result<SecureBuffer, StringError>;
}
