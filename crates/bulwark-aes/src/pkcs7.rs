// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! PKCS#7 padding (RFC 5652 Section 6.3) for a 16-byte block.
//!
//! Padding always adds between 1 and 16 bytes, each equal to the pad length,
//! so block-aligned input gains a full block.

use bulwark_buffer::SecureBuffer;

use crate::consts::BLOCK_SIZE;
use crate::error::AesError;

/// Number of padding bytes appended to content of length `len`.
pub fn pad_len(len: usize) -> usize {
    BLOCK_SIZE - len % BLOCK_SIZE
}

/// Length of `len` bytes of content once padded.
pub fn padded_len(len: usize) -> usize {
    len + pad_len(len)
}

/// Appends padding after the content of `buffer`, returning the new length.
///
/// The buffer capacity must already cover [`padded_len`]; nothing is written
/// otherwise.
pub fn apply(buffer: &mut SecureBuffer) -> Result<usize, AesError> {
    let len = buffer.len();
    let pad = pad_len(len);
    let padding = [pad as u8; BLOCK_SIZE];

    buffer.write(&padding[..pad], len)?;

    Ok(len + pad)
}

/// Validates the padding of `bytes` and returns the unpadded length.
///
/// Rejects input that is empty or not block aligned, a final byte outside
/// `1..=16`, and any padding byte that differs from the pad length. The
/// padding bytes are inspected without early exit.
pub fn content_length(bytes: &[u8]) -> Result<usize, AesError> {
    let len = bytes.len();

    if len < BLOCK_SIZE || len % BLOCK_SIZE != 0 {
        return Err(AesError::InvalidPadding);
    }

    let pad = bytes[len - 1];

    if pad == 0 || pad as usize > BLOCK_SIZE {
        return Err(AesError::InvalidPadding);
    }

    let mut mismatch = 0u8;

    for (i, byte) in bytes[len - BLOCK_SIZE..].iter().rev().enumerate() {
        let in_padding = 0u8.wrapping_sub(((i as u8) < pad) as u8);
        mismatch |= (byte ^ pad) & in_padding;
    }

    if mismatch != 0 {
        return Err(AesError::InvalidPadding);
    }

    Ok(len - pad as usize)
}

/// Strips validated padding from `buffer`, returning the new length.
///
/// The padding bytes are zeroed; the buffer is left untouched on error.
pub fn remove(buffer: &mut SecureBuffer) -> Result<usize, AesError> {
    let len = buffer.open(content_length)?;
    buffer.set_content_length(len)?;

    Ok(len)
}
