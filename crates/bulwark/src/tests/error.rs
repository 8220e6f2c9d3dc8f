// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use bulwark_aes::AesError;
use bulwark_buffer::{BackendKind, BufferError, PageError};
use bulwark_hash::HashError;
use bulwark_rand::EntropyError;
use bulwark_string::StringError;

use crate::error::Error;

// =============================================================================
// Conversions
// =============================================================================

#[test]
fn test_from_buffer_error() {
    let cases = [
        (BufferError::AllocationFailure, Error::AllocationFailure),
        (BufferError::Page(PageError::Lock), Error::AllocationFailure),
        (
            BufferError::OutOfBounds {
                offset: 1,
                len: 2,
                capacity: 2,
            },
            Error::OutOfBounds,
        ),
        (
            BufferError::TypeMismatch {
                left: BackendKind::Page,
                right: BackendKind::Frobnicated,
            },
            Error::TypeMismatch,
        ),
        (BufferError::Freed, Error::InvalidState),
        (
            BufferError::UnsupportedBackend(BackendKind::Encrypted),
            Error::InvalidArgument,
        ),
        (
            BufferError::Entropy(EntropyError::EntropyNotAvailable),
            Error::EntropyNotAvailable,
        ),
        (BufferError::callback_error("boom"), Error::InvalidState),
    ];

    for (from, expected) in cases {
        assert_eq!(Error::from(from), expected);
    }
}

#[test]
fn test_from_nested_errors() {
    assert_eq!(
        Error::from(StringError::IndexOutOfRange { index: 3, len: 2 }),
        Error::OutOfBounds
    );
    assert_eq!(Error::from(StringError::InvalidUtf8), Error::InvalidArgument);
    assert_eq!(
        Error::from(StringError::Buffer(BufferError::Freed)),
        Error::InvalidState
    );

    assert_eq!(Error::from(HashError::InvalidState), Error::InvalidState);
    assert_eq!(
        Error::from(HashError::InvalidArgument("n")),
        Error::InvalidArgument
    );
    assert_eq!(
        Error::from(HashError::String(StringError::Buffer(BufferError::AllocationFailure))),
        Error::AllocationFailure
    );
    assert_eq!(
        Error::from(HashError::Entropy(EntropyError::EntropyNotAvailable)),
        Error::EntropyNotAvailable
    );

    assert_eq!(Error::from(AesError::InvalidPadding), Error::InvalidPadding);
    assert_eq!(
        Error::from(AesError::InvalidArgument("key")),
        Error::InvalidArgument
    );
    assert_eq!(
        Error::from(AesError::Buffer(BufferError::TypeMismatch {
            left: BackendKind::Page,
            right: BackendKind::Encrypted,
        })),
        Error::TypeMismatch
    );
}

#[test]
fn test_display_is_opaque() {
    assert_eq!(Error::AuthenticationFailure.to_string(), "authentication failed");
    assert_eq!(Error::InvalidPadding.to_string(), "invalid padding");
}
