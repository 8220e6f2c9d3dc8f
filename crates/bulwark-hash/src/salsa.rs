// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Salsa20/8 core and scrypt BlockMix per RFC 7914 Sections 3 and 4

use zeroize::Zeroize;

/// Words per 64-byte Salsa block.
pub(crate) const SALSA_WORDS: usize = 16;

#[inline(always)]
fn quarter(x: &mut [u32; SALSA_WORDS], a: usize, b: usize, c: usize, d: usize) {
    x[b] ^= x[a].wrapping_add(x[d]).rotate_left(7);
    x[c] ^= x[b].wrapping_add(x[a]).rotate_left(9);
    x[d] ^= x[c].wrapping_add(x[b]).rotate_left(13);
    x[a] ^= x[d].wrapping_add(x[c]).rotate_left(18);
}

/// Salsa20/8 core: four double rounds, then add the input.
///
/// `scratch` holds the working words and is wiped before return.
pub(crate) fn salsa20_8(block: &mut [u32; SALSA_WORDS], scratch: &mut [u32; SALSA_WORDS]) {
    scratch.copy_from_slice(block);

    for _ in 0..4 {
        // Columns
        quarter(scratch, 0, 4, 8, 12);
        quarter(scratch, 5, 9, 13, 1);
        quarter(scratch, 10, 14, 2, 6);
        quarter(scratch, 15, 3, 7, 11);

        // Rows
        quarter(scratch, 0, 1, 2, 3);
        quarter(scratch, 5, 6, 7, 4);
        quarter(scratch, 10, 11, 8, 9);
        quarter(scratch, 15, 12, 13, 14);
    }

    for (word, mixed) in block.iter_mut().zip(scratch.iter()) {
        *word = word.wrapping_add(*mixed);
    }

    scratch.zeroize();
}

/// Scratch for [`block_mix`]: the running block and the Salsa working words.
#[derive(Default, Zeroize)]
pub(crate) struct MixScratch {
    x: [u32; SALSA_WORDS],
    salsa: [u32; SALSA_WORDS],
}

/// scryptBlockMix: `input` and `output` are `2r` Salsa blocks each.
///
/// Output block `i` goes to position `i / 2` when `i` is even and to
/// `r + i / 2` when odd.
pub(crate) fn block_mix(input: &[u32], output: &mut [u32], r: usize, scratch: &mut MixScratch) {
    let blocks = 2 * r;

    scratch
        .x
        .copy_from_slice(&input[(blocks - 1) * SALSA_WORDS..blocks * SALSA_WORDS]);

    for i in 0..blocks {
        let chunk = &input[i * SALSA_WORDS..(i + 1) * SALSA_WORDS];

        for (x, word) in scratch.x.iter_mut().zip(chunk.iter()) {
            *x ^= word;
        }

        salsa20_8(&mut scratch.x, &mut scratch.salsa);

        let dest = if i % 2 == 0 { i / 2 } else { r + i / 2 };
        output[dest * SALSA_WORDS..(dest + 1) * SALSA_WORDS].copy_from_slice(&scratch.x);
    }

    scratch.zeroize();
}
