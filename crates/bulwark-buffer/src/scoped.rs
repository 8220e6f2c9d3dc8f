// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! ScopedAccess - time-boxed unlock of a SecureBuffer.
//!
//! Construction unlocks the buffer, `Drop` locks it again. The guard holds the
//! exclusive borrow of its buffer, so guards never nest over the same buffer.
//! If the region cannot be re-protected it is disposed and the process aborts:
//! continuing would leave secrets readable.

use crate::error::{BufferError, PageError};
use crate::secure_buffer::SecureBuffer;

/// Unlocked view of a [`SecureBuffer`], re-locked on drop.
///
/// # Example
///
/// ```rust
/// use bulwark_buffer::{BufferError, SecureBuffer};
///
/// fn example() -> Result<(), BufferError> {
///     let mut buffer = SecureBuffer::allocate(4)?;
///
///     {
///         let mut access = buffer.access()?;
///         access.content_mut().copy_from_slice(b"abcd");
///     }
///
///     assert!(buffer.is_locked());
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct ScopedAccess<'a> {
    buffer: &'a mut SecureBuffer,
}

impl<'a> ScopedAccess<'a> {
    pub(crate) fn new(buffer: &'a mut SecureBuffer) -> Result<Self, BufferError> {
        buffer.ensure_alive()?;
        buffer.region.unprotect()?;

        Ok(Self { buffer })
    }

    /// Capacity of the underlying buffer.
    pub fn capacity(&self) -> usize {
        self.buffer.region.capacity()
    }

    /// Logical content length.
    pub fn len(&self) -> usize {
        self.buffer.content_length
    }

    /// Returns true if the buffer holds no content.
    pub fn is_empty(&self) -> bool {
        self.buffer.content_length == 0
    }

    /// Full-capacity view.
    pub fn as_slice(&self) -> &[u8] {
        unsafe { self.buffer.region.as_slice() }
    }

    /// Full-capacity mutable view.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { self.buffer.region.as_mut_slice() }
    }

    /// View of `[0, len)`.
    pub fn content(&self) -> &[u8] {
        &self.as_slice()[..self.buffer.content_length]
    }

    /// Mutable view of `[0, len)`.
    pub fn content_mut(&mut self) -> &mut [u8] {
        let len = self.buffer.content_length;
        &mut self.as_mut_slice()[..len]
    }

    /// Raw address of the region, valid only while this guard lives.
    pub fn as_ptr(&self) -> *const u8 {
        self.as_slice().as_ptr()
    }

    /// Sets the logical content length. Bytes past a shrunk length are zeroed.
    pub fn set_content_length(&mut self, len: usize) -> Result<(), BufferError> {
        let capacity = self.capacity();

        if len > capacity {
            return Err(BufferError::out_of_bounds(0, len, capacity));
        }

        let current = self.buffer.content_length;

        if len < current {
            self.as_mut_slice()[len..current].fill(0);
        }

        self.buffer.content_length = len;

        Ok(())
    }

    /// Extends the content length to cover `end` if it is past the current end.
    pub(crate) fn grow_content_to(&mut self, end: usize) {
        if end > self.buffer.content_length {
            self.buffer.content_length = end;
        }
    }
}

impl Drop for ScopedAccess<'_> {
    fn drop(&mut self) {
        if let Err(error) = self.buffer.region.protect() {
            self.buffer.region.dispose();
            abort(error);
        }
    }
}

impl core::fmt::Debug for ScopedAccess<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScopedAccess")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

fn abort(error: PageError) -> ! {
    tracing::error!(%error, "secure region could not be re-protected, aborting");

    #[cfg(test)]
    std::process::exit(error as i32);

    #[cfg(not(test))]
    std::process::abort()
}
