// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! KeyExpansion per FIPS 197 Section 5.2 (Nk = 8)

use zeroize::Zeroize;

use crate::consts::{KEY_SIZE, RCON, ROUND_KEYS_SIZE, SBOX};

const NK: usize = KEY_SIZE / 4;

/// Expands a 32-byte key into the 240-byte schedule `round_keys`.
///
/// Word `i` lives at `round_keys[4i..4i + 4]`. Every 8th word takes
/// RotWord + SubWord + Rcon, every word at 4 mod 8 takes SubWord.
pub(crate) fn expand_key(key: &[u8; KEY_SIZE], round_keys: &mut [u8; ROUND_KEYS_SIZE]) {
    round_keys[..KEY_SIZE].copy_from_slice(key);

    let mut temp = [0u8; 4];

    for i in NK..ROUND_KEYS_SIZE / 4 {
        temp.copy_from_slice(&round_keys[(i - 1) * 4..i * 4]);

        if i % NK == 0 {
            temp.rotate_left(1);
            for byte in temp.iter_mut() {
                *byte = SBOX[*byte as usize];
            }
            temp[0] ^= RCON[i / NK - 1];
        } else if i % NK == 4 {
            for byte in temp.iter_mut() {
                *byte = SBOX[*byte as usize];
            }
        }

        for j in 0..4 {
            round_keys[i * 4 + j] = round_keys[(i - NK) * 4 + j] ^ temp[j];
        }
    }

    temp.zeroize();
}
