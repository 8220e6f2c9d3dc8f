// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

use bulwark_buffer::BufferError;

/// Errors returned by protected strings.
#[derive(Debug, Error)]
pub enum StringError {
    /// The underlying secure buffer failed.
    #[error("BufferError: {0}")]
    Buffer(#[from] BufferError),

    /// A character index past the end of the string.
    #[error("index {index} out of range for string of length {len}")]
    IndexOutOfRange {
        /// Requested character index.
        index: usize,
        /// Character count of the string.
        len: usize,
    },

    /// Stored bytes no longer decode as UTF-8.
    #[error("protected string holds invalid UTF-8")]
    InvalidUtf8,
}
