// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! SecureBuffer - fixed-capacity protected byte region.
//!
//! Every operation follows the same shape: validate first, then open a
//! [`ScopedAccess`] (unlock), touch the bytes, and let the guard re-lock on the
//! way out, whatever that way is.

use zeroize::{Zeroize, Zeroizing};

use bulwark_rand::EntropySource;
use bulwark_util::constant_time_eq;

use crate::backend::{BackendKind, Region, allocate_region, selected_backend};
use crate::error::BufferError;
use crate::scoped::ScopedAccess;

/// A protected, zeroize-on-free byte buffer.
///
/// - `capacity`: allocated size, rounded to the backend granularity.
/// - `len`: logical content length (`<= capacity`).
///
/// The buffer is locked whenever no [`ScopedAccess`] is alive. `free()` (also
/// run on drop) zeroes the full capacity before releasing the region.
pub struct SecureBuffer {
    pub(crate) region: Box<dyn Region>,
    pub(crate) content_length: usize,
    freed: bool,
}

impl SecureBuffer {
    /// Allocates a buffer on the process backend (see [`selected_backend`]).
    ///
    /// The content is zeroed and `len()` is `size`.
    pub fn allocate(size: usize) -> Result<Self, BufferError> {
        Self::allocate_with(selected_backend(), size)
    }

    /// Allocates a buffer on an explicit backend.
    pub fn allocate_with(kind: BackendKind, size: usize) -> Result<Self, BufferError> {
        let region = allocate_region(kind, size)?;

        Ok(Self {
            region,
            content_length: size,
            freed: false,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_region(region: Box<dyn Region>, content_length: usize) -> Self {
        Self {
            region,
            content_length,
            freed: false,
        }
    }

    /// Allocates a buffer holding a copy of `bytes`.
    ///
    /// `bytes` stays untouched; prefer [`SecureBuffer::from_mut_slice`] when the
    /// source should not outlive the copy.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, BufferError> {
        let mut buffer = Self::allocate(bytes.len())?;
        buffer.write(bytes, 0)?;

        Ok(buffer)
    }

    /// Moves `bytes` into a new buffer, zeroizing the source.
    pub fn from_mut_slice(bytes: &mut [u8]) -> Result<Self, BufferError> {
        let result = Self::from_slice(bytes);
        bytes.zeroize();

        result
    }

    /// Allocates `size` bytes filled from `entropy`.
    ///
    /// The random bytes are produced directly inside the unlocked region.
    pub fn random<E: EntropySource>(size: usize, entropy: &E) -> Result<Self, BufferError> {
        let mut buffer = Self::allocate(size)?;

        {
            let mut access = buffer.access()?;
            entropy.fill_bytes(access.content_mut())?;
        }

        Ok(buffer)
    }

    /// Backend this buffer lives on.
    pub fn backend(&self) -> BackendKind {
        self.region.kind()
    }

    /// Allocated size in bytes (0 after `free()`).
    pub fn capacity(&self) -> usize {
        self.region.capacity()
    }

    /// Logical content length.
    pub fn len(&self) -> usize {
        self.content_length
    }

    /// Returns true if the buffer holds no content.
    pub fn is_empty(&self) -> bool {
        self.content_length == 0
    }

    /// Returns true unless a [`ScopedAccess`] currently has the buffer open.
    ///
    /// A freed buffer reports locked: nothing is readable any more.
    pub fn is_locked(&self) -> bool {
        self.freed || self.region.is_protected()
    }

    /// Returns true once `free()` ran.
    pub fn is_freed(&self) -> bool {
        self.freed
    }

    pub(crate) fn ensure_alive(&self) -> Result<(), BufferError> {
        if self.freed {
            return Err(BufferError::Freed);
        }

        Ok(())
    }

    fn check_range(&self, offset: usize, len: usize) -> Result<usize, BufferError> {
        self.ensure_alive()?;

        let capacity = self.capacity();
        let end = offset
            .checked_add(len)
            .ok_or_else(|| BufferError::out_of_bounds(offset, len, capacity))?;

        if end > capacity {
            return Err(BufferError::out_of_bounds(offset, len, capacity));
        }

        Ok(end)
    }

    /// Unlocks the buffer until the returned guard is dropped.
    pub fn access(&mut self) -> Result<ScopedAccess<'_>, BufferError> {
        ScopedAccess::new(self)
    }

    /// Runs `f` over the content with the buffer unlocked.
    pub fn open<R, E, F>(&mut self, f: F) -> Result<R, E>
    where
        E: From<BufferError>,
        F: FnOnce(&[u8]) -> Result<R, E>,
    {
        let access = self.access()?;
        f(access.content())
    }

    /// Runs `f` over the mutable content with the buffer unlocked.
    pub fn open_mut<R, E, F>(&mut self, f: F) -> Result<R, E>
    where
        E: From<BufferError>,
        F: FnOnce(&mut [u8]) -> Result<R, E>,
    {
        let mut access = self.access()?;
        f(access.content_mut())
    }

    /// Copies `bytes` to `offset`, growing the content length if needed.
    ///
    /// Nothing is written if the range exceeds the capacity.
    pub fn write(&mut self, bytes: &[u8], offset: usize) -> Result<(), BufferError> {
        let end = self.check_range(offset, bytes.len())?;
        let mut access = self.access()?;

        access.as_mut_slice()[offset..end].copy_from_slice(bytes);
        access.grow_content_to(end);

        Ok(())
    }

    /// Copies `len` bytes starting at `offset` out of the buffer.
    ///
    /// The copy is unprotected (but zeroized on drop); keep it short-lived.
    pub fn read(&mut self, offset: usize, len: usize) -> Result<Zeroizing<Vec<u8>>, BufferError> {
        let end = self.check_range(offset, len)?;
        let access = self.access()?;

        Ok(Zeroizing::new(access.as_slice()[offset..end].to_vec()))
    }

    /// Reads the byte at `index`.
    pub fn get(&mut self, index: usize) -> Result<u8, BufferError> {
        self.check_range(index, 1)?;
        let access = self.access()?;

        Ok(access.as_slice()[index])
    }

    /// Writes the byte at `index`, growing the content length if needed.
    pub fn set(&mut self, index: usize, value: u8) -> Result<(), BufferError> {
        self.write(&[value], index)
    }

    /// Copies `len` bytes from `self[src_offset..]` into `dest[dest_offset..]`.
    ///
    /// Both buffers are unlocked for the duration and the bytes move region to
    /// region without an intermediate plain copy.
    pub fn copy_to(
        &mut self,
        src_offset: usize,
        dest: &mut SecureBuffer,
        dest_offset: usize,
        len: usize,
    ) -> Result<(), BufferError> {
        let src_end = self.check_range(src_offset, len)?;
        let dest_end = dest.check_range(dest_offset, len)?;

        let src = self.access()?;
        let mut dst = dest.access()?;

        dst.as_mut_slice()[dest_offset..dest_end]
            .copy_from_slice(&src.as_slice()[src_offset..src_end]);
        dst.grow_content_to(dest_end);

        Ok(())
    }

    /// Sets the logical content length (see [`ScopedAccess::set_content_length`]).
    pub fn set_content_length(&mut self, len: usize) -> Result<(), BufferError> {
        self.access()?.set_content_length(len)
    }

    /// Shifts the content `n` bytes towards the end (`>>`), zero-filling the head.
    ///
    /// Bytes shifted past `len()` are dropped.
    pub fn shift_right(&mut self, n: usize) -> Result<(), BufferError> {
        self.ensure_alive()?;

        if n == 0 {
            return Ok(());
        }

        let mut access = self.access()?;
        let content = access.content_mut();
        let len = content.len();

        if n >= len {
            content.fill(0);
        } else {
            content.copy_within(..len - n, n);
            content[..n].fill(0);
        }

        Ok(())
    }

    /// Shifts the content `n` bytes towards the start (`<<`), zero-filling the tail.
    pub fn shift_left(&mut self, n: usize) -> Result<(), BufferError> {
        self.ensure_alive()?;

        if n == 0 {
            return Ok(());
        }

        let mut access = self.access()?;
        let content = access.content_mut();
        let len = content.len();

        if n >= len {
            content.fill(0);
        } else {
            content.copy_within(n.., 0);
            content[len - n..].fill(0);
        }

        Ok(())
    }

    /// Compares the contents of two buffers in constant time.
    ///
    /// Buffers of different backends cannot be compared
    /// ([`BufferError::TypeMismatch`]); different lengths compare unequal.
    /// Both buffers are locked again on return, whatever the outcome.
    pub fn equals(&mut self, other: &mut SecureBuffer) -> Result<bool, BufferError> {
        self.ensure_alive()?;
        other.ensure_alive()?;

        if self.backend() != other.backend() {
            return Err(BufferError::TypeMismatch {
                left: self.backend(),
                right: other.backend(),
            });
        }

        if self.content_length != other.content_length {
            return Ok(false);
        }

        let left = self.access()?;
        let right = other.access()?;

        Ok(constant_time_eq(left.content(), right.content()))
    }

    /// Zeroes the full capacity and releases the region.
    ///
    /// Idempotent; every other operation on a freed buffer fails with
    /// [`BufferError::Freed`].
    pub fn free(&mut self) {
        if self.freed {
            return;
        }

        self.region.dispose();
        self.content_length = 0;
        self.freed = true;
    }

    /// Test backdoor: frees the buffer like `free()` does and returns the raw
    /// region bytes as the backend left them right before releasing them.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn free_and_inspect(&mut self) -> Result<Vec<u8>, BufferError> {
        self.ensure_alive()?;

        let snapshot = self.region.dispose_and_inspect();
        self.content_length = 0;
        self.freed = true;

        Ok(snapshot?)
    }
}

impl Drop for SecureBuffer {
    fn drop(&mut self) {
        self.free();
    }
}

impl core::fmt::Debug for SecureBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecureBuffer")
            .field("backend", &self.backend())
            .field("len", &self.content_length)
            .field("capacity", &self.capacity())
            .field("freed", &self.freed)
            .finish_non_exhaustive()
    }
}
