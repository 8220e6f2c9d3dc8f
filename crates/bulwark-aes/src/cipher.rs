// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! AES block cipher per FIPS 197 Sections 5.1 and 5.3
//!
//! The state is the 16-byte block in column-major order: byte `r + 4c` is
//! row `r` of column `c`.

use zeroize::Zeroize;

use crate::consts::{BLOCK_SIZE, ROUND_KEYS_SIZE, ROUNDS, RSBOX, SBOX};

type Block = [u8; BLOCK_SIZE];

#[inline(always)]
fn xtime(x: u8) -> u8 {
    (x << 1) ^ (((x >> 7) & 1) * 0x1b)
}

/// GF(2^8) multiplication, fixed iteration count.
#[inline(always)]
fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;

    for _ in 0..8 {
        product ^= a & 0u8.wrapping_sub(b & 1);
        a = xtime(a);
        b >>= 1;
    }

    product
}

fn add_round_key(state: &mut Block, round_keys: &[u8; ROUND_KEYS_SIZE], round: usize) {
    let key = &round_keys[round * BLOCK_SIZE..(round + 1) * BLOCK_SIZE];

    for (s, k) in state.iter_mut().zip(key.iter()) {
        *s ^= k;
    }
}

fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = SBOX[*byte as usize];
    }
}

fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = RSBOX[*byte as usize];
    }
}

/// Row `r` rotates left by `r` columns.
fn shift_rows(state: &mut Block) {
    let mut old = *state;

    for r in 1..4 {
        for c in 0..4 {
            state[r + 4 * c] = old[r + 4 * ((c + r) % 4)];
        }
    }

    old.zeroize();
}

fn inv_shift_rows(state: &mut Block) {
    let mut old = *state;

    for r in 1..4 {
        for c in 0..4 {
            state[r + 4 * ((c + r) % 4)] = old[r + 4 * c];
        }
    }

    old.zeroize();
}

fn mix_columns(state: &mut Block) {
    for column in state.chunks_exact_mut(4) {
        let [a0, a1, a2, a3] = [column[0], column[1], column[2], column[3]];
        let all = a0 ^ a1 ^ a2 ^ a3;

        column[0] ^= all ^ xtime(a0 ^ a1);
        column[1] ^= all ^ xtime(a1 ^ a2);
        column[2] ^= all ^ xtime(a2 ^ a3);
        column[3] ^= all ^ xtime(a3 ^ a0);
    }
}

fn inv_mix_columns(state: &mut Block) {
    for column in state.chunks_exact_mut(4) {
        let [a0, a1, a2, a3] = [column[0], column[1], column[2], column[3]];

        column[0] = gmul(a0, 0x0e) ^ gmul(a1, 0x0b) ^ gmul(a2, 0x0d) ^ gmul(a3, 0x09);
        column[1] = gmul(a0, 0x09) ^ gmul(a1, 0x0e) ^ gmul(a2, 0x0b) ^ gmul(a3, 0x0d);
        column[2] = gmul(a0, 0x0d) ^ gmul(a1, 0x09) ^ gmul(a2, 0x0e) ^ gmul(a3, 0x0b);
        column[3] = gmul(a0, 0x0b) ^ gmul(a1, 0x0d) ^ gmul(a2, 0x09) ^ gmul(a3, 0x0e);
    }
}

/// Cipher(): encrypts one block in place.
pub(crate) fn encrypt_block(state: &mut Block, round_keys: &[u8; ROUND_KEYS_SIZE]) {
    add_round_key(state, round_keys, 0);

    for round in 1..ROUNDS {
        sub_bytes(state);
        shift_rows(state);
        mix_columns(state);
        add_round_key(state, round_keys, round);
    }

    // Last round skips MixColumns
    sub_bytes(state);
    shift_rows(state);
    add_round_key(state, round_keys, ROUNDS);
}

/// InvCipher(): decrypts one block in place.
pub(crate) fn decrypt_block(state: &mut Block, round_keys: &[u8; ROUND_KEYS_SIZE]) {
    add_round_key(state, round_keys, ROUNDS);

    for round in (1..ROUNDS).rev() {
        inv_shift_rows(state);
        inv_sub_bytes(state);
        add_round_key(state, round_keys, round);
        inv_mix_columns(state);
    }

    inv_shift_rows(state);
    inv_sub_bytes(state);
    add_round_key(state, round_keys, 0);
}
