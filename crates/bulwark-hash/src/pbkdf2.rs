// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! PBKDF2-HMAC-SHA256 per RFC 8018 Section 5.2

use zeroize::Zeroize;

use crate::error::HashError;
use crate::hmac::HmacSha256State;
use crate::sha256::SHA256_LEN;

/// Fills `out` with `PBKDF2-HMAC-SHA256(password, salt, iterations)`.
///
/// Block `i` (1-based) is `U1 ⊕ U2 ⊕ … ⊕ Uc` with `U1 = HMAC(P, S || INT(i))`
/// and `Uj = HMAC(P, Uj-1)`. The last block is truncated to fit `out`.
pub fn pbkdf2_hmac_sha256(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out: &mut [u8],
) -> Result<(), HashError> {
    if iterations == 0 {
        return Err(HashError::InvalidArgument("pbkdf2 iterations must be at least 1"));
    }

    if out.len().div_ceil(SHA256_LEN) > u32::MAX as usize {
        return Err(HashError::InvalidArgument("pbkdf2 output too long"));
    }

    let keyed = HmacSha256State::new(password)?;

    let mut u = [0u8; SHA256_LEN];
    let mut t = [0u8; SHA256_LEN];

    let result = (|| -> Result<(), HashError> {
        for (index, chunk) in out.chunks_mut(SHA256_LEN).enumerate() {
            let block_index = (index as u32) + 1;

            let mut mac = keyed.clone();
            mac.update(salt)?;
            mac.update(&block_index.to_be_bytes())?;
            mac.finish(&mut u)?;
            t.copy_from_slice(&u);

            for _ in 1..iterations {
                let mut mac = keyed.clone();
                mac.update(&u)?;
                mac.finish(&mut u)?;

                for (acc, byte) in t.iter_mut().zip(u.iter()) {
                    *acc ^= byte;
                }
            }

            chunk.copy_from_slice(&t[..chunk.len()]);
        }

        Ok(())
    })();

    u.zeroize();
    t.zeroize();

    result
}
