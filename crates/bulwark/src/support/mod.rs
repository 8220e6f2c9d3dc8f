// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities re-exported from the component crates.

#[cfg(feature = "test-utils")]
pub mod rand {
    //! Deterministic and failing entropy sources.
    pub use bulwark_rand::support::test_utils::*;
}
