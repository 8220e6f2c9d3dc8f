// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! AesState - AES-256 key schedule plus CBC chaining value.

use zeroize::Zeroize;

use bulwark_buffer::SecureBuffer;

use crate::cipher::{decrypt_block, encrypt_block};
use crate::consts::{BLOCK_SIZE, KEY_SIZE, ROUND_KEYS_SIZE};
use crate::error::AesError;
use crate::key_schedule::expand_key;

/// AES-256-CBC state.
///
/// The expanded key lives in a [`SecureBuffer`]; the chaining value carries
/// over between calls, so a long message can be processed in several chunks.
///
/// # Example
///
/// ```rust
/// use bulwark_aes::{AesError, AesState};
/// use bulwark_buffer::SecureBuffer;
///
/// fn example() -> Result<(), AesError> {
///     let mut key = SecureBuffer::from_slice(&[7u8; 32])?;
///     let mut data = SecureBuffer::from_slice(&[1u8; 32])?;
///
///     AesState::new(&mut key, [0u8; 16])?.encrypt_cbc(&mut data)?;
///     AesState::new(&mut key, [0u8; 16])?.decrypt_cbc(&mut data)?;
///
///     assert_eq!(&data.read(0, 32)?[..], &[1u8; 32]);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct AesState {
    round_keys: SecureBuffer,
    iv: [u8; BLOCK_SIZE],
}

impl AesState {
    /// Expands `key` (exactly [`KEY_SIZE`] bytes of content) and sets the IV.
    pub fn new(key: &mut SecureBuffer, iv: [u8; BLOCK_SIZE]) -> Result<Self, AesError> {
        if key.len() != KEY_SIZE {
            return Err(AesError::InvalidArgument("key must be 32 bytes"));
        }

        let mut round_keys = SecureBuffer::allocate(ROUND_KEYS_SIZE)?;

        key.open(|key_bytes| {
            round_keys.open_mut(|schedule| {
                let key_bytes: &[u8; KEY_SIZE] = key_bytes
                    .try_into()
                    .map_err(|_| AesError::InvalidArgument("key must be 32 bytes"))?;
                let schedule: &mut [u8; ROUND_KEYS_SIZE] = schedule
                    .try_into()
                    .map_err(|_| AesError::InvalidArgument("invalid round key buffer"))?;

                expand_key(key_bytes, schedule);

                Ok::<(), AesError>(())
            })
        })?;

        Ok(Self { round_keys, iv })
    }

    /// Current chaining value.
    pub fn iv(&self) -> &[u8; BLOCK_SIZE] {
        &self.iv
    }

    /// Replaces the chaining value.
    pub fn set_iv(&mut self, iv: [u8; BLOCK_SIZE]) {
        self.iv = iv;
    }

    /// Encrypts the content of `buffer` in place.
    ///
    /// The content length must be a multiple of [`BLOCK_SIZE`].
    pub fn encrypt_cbc(&mut self, buffer: &mut SecureBuffer) -> Result<(), AesError> {
        ensure_block_aligned(buffer.len())?;

        let iv = &mut self.iv;

        self.round_keys.open(|schedule| {
            let schedule = as_schedule(schedule)?;

            buffer.open_mut(|data| {
                for block in data.chunks_exact_mut(BLOCK_SIZE) {
                    let block: &mut [u8; BLOCK_SIZE] = block
                        .try_into()
                        .map_err(|_| AesError::InvalidArgument("partial block"))?;

                    xor_in_place(block, iv);
                    encrypt_block(block, schedule);
                    iv.copy_from_slice(block);
                }

                Ok(())
            })
        })
    }

    /// Decrypts the content of `buffer` in place.
    ///
    /// The content length must be a multiple of [`BLOCK_SIZE`]. Padding is
    /// left in place; see [`pkcs7::remove`](crate::pkcs7::remove).
    pub fn decrypt_cbc(&mut self, buffer: &mut SecureBuffer) -> Result<(), AesError> {
        ensure_block_aligned(buffer.len())?;

        let iv = &mut self.iv;

        self.round_keys.open(|schedule| {
            let schedule = as_schedule(schedule)?;

            buffer.open_mut(|data| {
                let mut previous = [0u8; BLOCK_SIZE];

                for block in data.chunks_exact_mut(BLOCK_SIZE) {
                    let block: &mut [u8; BLOCK_SIZE] = block
                        .try_into()
                        .map_err(|_| AesError::InvalidArgument("partial block"))?;

                    previous.copy_from_slice(block);
                    decrypt_block(block, schedule);
                    xor_in_place(block, iv);
                    iv.copy_from_slice(&previous);
                }

                previous.zeroize();

                Ok(())
            })
        })
    }
}

impl Drop for AesState {
    fn drop(&mut self) {
        self.iv.zeroize();
        self.round_keys.free();
    }
}

impl core::fmt::Debug for AesState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AesState").finish_non_exhaustive()
    }
}

fn ensure_block_aligned(len: usize) -> Result<(), AesError> {
    if len % BLOCK_SIZE != 0 {
        return Err(AesError::InvalidArgument(
            "data length must be a multiple of the block size",
        ));
    }

    Ok(())
}

fn as_schedule(bytes: &[u8]) -> Result<&[u8; ROUND_KEYS_SIZE], AesError> {
    bytes
        .try_into()
        .map_err(|_| AesError::InvalidArgument("invalid round key buffer"))
}

#[inline(always)]
fn xor_in_place(block: &mut [u8; BLOCK_SIZE], other: &[u8; BLOCK_SIZE]) {
    for (b, o) in block.iter_mut().zip(other.iter()) {
        *b ^= o;
    }
}
