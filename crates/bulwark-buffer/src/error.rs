// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for bulwark-buffer.

use thiserror::Error;

use bulwark_rand::EntropyError;

use crate::backend::BackendKind;

/// Errors from the platform protection primitives (mmap, mlock, mprotect,
/// CryptProtectMemory).
///
/// The discriminant doubles as the process exit code when a region cannot be
/// re-protected and the process aborts.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PageError {
    /// The region could not be reserved.
    #[error("failed to create protected region")]
    Create = 1,

    /// The region could not be locked into RAM.
    #[error("failed to lock region")]
    Lock = 2,

    /// The region could not be made inaccessible.
    #[error("failed to protect region")]
    Protect = 3,

    /// The region could not be made accessible.
    #[error("failed to unprotect region")]
    Unprotect = 4,
}

/// Errors returned by [`SecureBuffer`](crate::SecureBuffer) operations.
#[derive(Debug, Error)]
pub enum BufferError {
    /// Secure memory could not be reserved.
    #[error("secure memory could not be allocated")]
    AllocationFailure,

    /// An offset/length pair reaches past the buffer capacity.
    #[error("range at offset {offset} with length {len} exceeds capacity {capacity}")]
    OutOfBounds {
        /// Requested start offset.
        offset: usize,
        /// Requested length.
        len: usize,
        /// Capacity of the buffer.
        capacity: usize,
    },

    /// Two buffers of different backends were compared.
    #[error("cannot compare a {left:?} buffer with a {right:?} buffer")]
    TypeMismatch {
        /// Backend of the left operand.
        left: BackendKind,
        /// Backend of the right operand.
        right: BackendKind,
    },

    /// The buffer was used after `free()`.
    #[error("buffer has been freed")]
    Freed,

    /// The requested backend does not exist on this platform.
    #[error("{0:?} backend is not available on this platform")]
    UnsupportedBackend(BackendKind),

    /// The entropy source failed while filling the buffer.
    #[error("EntropyError: {0}")]
    Entropy(#[from] EntropyError),

    /// A protection primitive failed.
    #[error("PageError: {0}")]
    Page(#[from] PageError),

    /// Error raised inside an `open`/`open_mut` callback.
    #[error("callback error: {0:?}")]
    CallbackError(Box<dyn core::fmt::Debug + Send + Sync + 'static>),
}

impl BufferError {
    /// Wraps an arbitrary callback error.
    pub fn callback_error<E: core::fmt::Debug + Send + Sync + 'static>(e: E) -> Self {
        Self::CallbackError(Box::new(e))
    }

    pub(crate) fn out_of_bounds(offset: usize, len: usize, capacity: usize) -> Self {
        Self::OutOfBounds {
            offset,
            len,
            capacity,
        }
    }
}
