// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

use bulwark_buffer::BufferError;

/// Errors returned by the cipher and the padding routines.
#[derive(Debug, Error)]
pub enum AesError {
    /// Wrong key length or a buffer that is not block aligned.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// PKCS#7 padding did not validate.
    #[error("invalid padding")]
    InvalidPadding,

    /// A secure buffer operation failed.
    #[error("BufferError: {0}")]
    Buffer(#[from] BufferError),
}
