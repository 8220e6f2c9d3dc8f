// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! ProtectedStringBlock - contiguous protected UTF-8 string.

use zeroize::Zeroizing;

use bulwark_buffer::SecureBuffer;

use crate::error::StringError;
use crate::traits::ProtectedString;
use crate::utf8::{decode_char, is_continuation};

/// A secret string stored as one contiguous [`SecureBuffer`].
///
/// When the capacity is exceeded the content moves into a buffer of at least
/// twice the size and the old buffer is wiped and released. Comparison unlocks
/// both buffers in full for its duration; use
/// [`ProtectedStringList`](crate::ProtectedStringList) when that exposure is
/// unacceptable.
pub struct ProtectedStringBlock {
    buffer: SecureBuffer,
    char_count: usize,
}

impl ProtectedStringBlock {
    /// Creates an empty string.
    pub fn new() -> Result<Self, StringError> {
        let buffer = SecureBuffer::allocate(0)?;

        Ok(Self {
            buffer,
            char_count: 0,
        })
    }

    /// Bytes the string can hold before it has to grow.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    fn grow_to(&mut self, needed: usize) -> Result<(), StringError> {
        let target = self.buffer.capacity().saturating_mul(2).max(needed);
        let len = self.buffer.len();

        let mut grown = SecureBuffer::allocate(target)?;
        grown.set_content_length(0)?;
        self.buffer.copy_to(0, &mut grown, 0, len)?;

        let mut old = core::mem::replace(&mut self.buffer, grown);
        old.free();

        Ok(())
    }

    fn char_bounds(content: &[u8], index: usize) -> Option<(usize, usize)> {
        let mut starts = content
            .iter()
            .enumerate()
            .filter(|(_, byte)| !is_continuation(**byte))
            .map(|(position, _)| position)
            .skip(index);

        let start = starts.next()?;
        let end = starts.next().unwrap_or(content.len());

        Some((start, end))
    }
}

impl ProtectedString for ProtectedStringBlock {
    fn len(&self) -> usize {
        self.char_count
    }

    fn byte_len(&self) -> usize {
        self.buffer.len()
    }

    fn append(&mut self, c: char) -> Result<(), StringError> {
        let mut encoded = Zeroizing::new([0u8; 4]);
        let width = c.encode_utf8(&mut encoded[..]).len();

        let offset = self.buffer.len();
        let end = offset + width;

        if end > self.buffer.capacity() {
            self.grow_to(end)?;
        }

        self.buffer.write(&encoded[..width], offset)?;
        self.char_count += 1;

        Ok(())
    }

    fn get(&mut self, index: usize) -> Result<char, StringError> {
        let len = self.char_count;

        if index >= len {
            return Err(StringError::IndexOutOfRange { index, len });
        }

        self.buffer.open(|content| {
            let (start, end) = Self::char_bounds(content, index)
                .ok_or(StringError::IndexOutOfRange { index, len })?;

            decode_char(&content[start..end])
        })
    }

    fn pop(&mut self) -> Result<Option<char>, StringError> {
        if self.char_count == 0 {
            return Ok(None);
        }

        let (start, c) = self.buffer.open(|content| {
            let start = content
                .iter()
                .rposition(|byte| !is_continuation(*byte))
                .ok_or(StringError::InvalidUtf8)?;

            Ok::<_, StringError>((start, decode_char(&content[start..])?))
        })?;

        self.buffer.set_content_length(start)?;
        self.char_count -= 1;

        Ok(Some(c))
    }

    fn clear(&mut self) -> Result<(), StringError> {
        self.buffer.set_content_length(0)?;
        self.char_count = 0;

        Ok(())
    }

    fn equals(&mut self, other: &mut Self) -> Result<bool, StringError> {
        if self.char_count != other.char_count {
            return Ok(false);
        }

        Ok(self.buffer.equals(&mut other.buffer)?)
    }

    fn protected_utf8_bytes(&mut self) -> Result<SecureBuffer, StringError> {
        let len = self.buffer.len();
        let mut out = SecureBuffer::allocate(len)?;

        self.buffer.copy_to(0, &mut out, 0, len)?;

        Ok(out)
    }
}

impl core::fmt::Debug for ProtectedStringBlock {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProtectedStringBlock")
            .field("len", &self.char_count)
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
