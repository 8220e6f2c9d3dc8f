// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

/// Entropy error
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyError {
    /// The entropy source could not produce random bytes.
    #[error("entropy source not available")]
    EntropyNotAvailable,
}
