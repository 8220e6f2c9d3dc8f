// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Unified error taxonomy.
//!
//! Each component crate keeps its own detailed error; everything collapses
//! into [`Error`] at the facade so callers match on one small enum.

use thiserror::Error;

use bulwark_aes::AesError;
use bulwark_buffer::BufferError;
use bulwark_hash::HashError;
use bulwark_rand::EntropyError;
use bulwark_string::StringError;

/// Errors surfaced by the bulwark facade.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Secure memory could not be reserved or protected.
    #[error("secure memory could not be allocated")]
    AllocationFailure,

    /// An offset or index reaches past the end of a buffer or string.
    #[error("out of bounds")]
    OutOfBounds,

    /// An object was used outside its call sequence (after `free()` or
    /// `finish()`).
    #[error("invalid state")]
    InvalidState,

    /// Two buffers on different backends were compared.
    #[error("type mismatch")]
    TypeMismatch,

    /// An envelope could not be authenticated or opened.
    #[error("authentication failed")]
    AuthenticationFailure,

    /// PKCS#7 padding did not validate.
    #[error("invalid padding")]
    InvalidPadding,

    /// A parameter is out of range or an input is malformed.
    #[error("invalid argument")]
    InvalidArgument,

    /// The entropy source could not produce random bytes.
    #[error("entropy not available")]
    EntropyNotAvailable,
}

impl From<EntropyError> for Error {
    fn from(_: EntropyError) -> Self {
        Self::EntropyNotAvailable
    }
}

impl From<BufferError> for Error {
    fn from(error: BufferError) -> Self {
        match error {
            BufferError::AllocationFailure | BufferError::Page(_) => Self::AllocationFailure,
            BufferError::OutOfBounds { .. } => Self::OutOfBounds,
            BufferError::TypeMismatch { .. } => Self::TypeMismatch,
            BufferError::Freed | BufferError::CallbackError(_) => Self::InvalidState,
            BufferError::UnsupportedBackend(_) => Self::InvalidArgument,
            BufferError::Entropy(e) => e.into(),
        }
    }
}

impl From<StringError> for Error {
    fn from(error: StringError) -> Self {
        match error {
            StringError::Buffer(e) => e.into(),
            StringError::IndexOutOfRange { .. } => Self::OutOfBounds,
            StringError::InvalidUtf8 => Self::InvalidArgument,
        }
    }
}

impl From<HashError> for Error {
    fn from(error: HashError) -> Self {
        match error {
            HashError::InvalidState => Self::InvalidState,
            HashError::InvalidArgument(_) => Self::InvalidArgument,
            HashError::Buffer(e) => e.into(),
            HashError::String(e) => e.into(),
            HashError::Entropy(e) => e.into(),
        }
    }
}

impl From<AesError> for Error {
    fn from(error: AesError) -> Self {
        match error {
            AesError::InvalidArgument(_) => Self::InvalidArgument,
            AesError::InvalidPadding => Self::InvalidPadding,
            AesError::Buffer(e) => e.into(),
        }
    }
}
