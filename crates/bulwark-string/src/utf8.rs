// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::StringError;

/// Returns true for UTF-8 continuation bytes (`0b10xx_xxxx`).
#[inline]
pub(crate) fn is_continuation(byte: u8) -> bool {
    byte & 0xc0 == 0x80
}

/// Decodes exactly one character from `bytes`.
pub(crate) fn decode_char(bytes: &[u8]) -> Result<char, StringError> {
    let s = core::str::from_utf8(bytes).map_err(|_| StringError::InvalidUtf8)?;
    let mut chars = s.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(StringError::InvalidUtf8),
    }
}
