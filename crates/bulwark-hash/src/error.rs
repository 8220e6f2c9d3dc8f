// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

use bulwark_buffer::BufferError;
use bulwark_rand::EntropyError;
use bulwark_string::StringError;

/// Errors returned by the hash functions and key derivation.
#[derive(Debug, Error)]
pub enum HashError {
    /// The state was used after `finish()`.
    #[error("hash state already finished")]
    InvalidState,

    /// A parameter is out of range or an input is malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A secure buffer operation failed.
    #[error("BufferError: {0}")]
    Buffer(#[from] BufferError),

    /// A protected string could not be read.
    #[error("StringError: {0}")]
    String(#[from] StringError),

    /// Salt generation failed.
    #[error("EntropyError: {0}")]
    Entropy(#[from] EntropyError),
}
