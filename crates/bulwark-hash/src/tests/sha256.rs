// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

// References:
// [1] FIPS 180-4: Secure Hash Standard (SHS)
//     https://nvlpubs.nist.gov/nistpubs/fips/nist.fips.180-4.pdf
// [2] RFC 6234 Section 8.5 test vectors
//     https://www.rfc-editor.org/rfc/rfc6234.html#section-8.5

use bulwark_util::to_hex;

use crate::error::HashError;
use crate::sha256::{SHA256_LEN, Sha256State};

fn sha256_hex(msg: &[u8]) -> String {
    let mut digest = [0u8; SHA256_LEN];
    Sha256State::digest(msg, &mut digest).expect("Failed to digest()");
    to_hex(&digest)
}

// =============================================================================
// Known answers
// =============================================================================

#[test]
fn test_sha256_empty() {
    assert_eq!(
        sha256_hex(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_sha256_abc() {
    assert_eq!(
        sha256_hex(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn test_sha256_56_bytes() {
    // Length field no longer fits after the 0x80 marker: forces a padding block.
    let msg = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";
    assert_eq!(msg.len(), 56);

    assert_eq!(
        sha256_hex(msg),
        "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
    );
}

#[test]
fn test_sha256_112_bytes() {
    let msg = b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu";
    assert_eq!(msg.len(), 112);

    assert_eq!(
        sha256_hex(msg),
        "cf5b16a778af8380036ce59e7b0492370b249b11e8f07a51afac45037afee9d1"
    );
}

#[test]
fn test_sha256_million_a() {
    let mut state = Sha256State::new();
    let chunk = [b'a'; 1000];

    for _ in 0..1000 {
        state.update(&chunk).expect("Failed to update()");
    }

    let mut digest = [0u8; SHA256_LEN];
    state.finish(&mut digest).expect("Failed to finish()");

    assert_eq!(
        to_hex(&digest),
        "cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0"
    );
}

// =============================================================================
// Streaming
// =============================================================================

#[test]
fn test_sha256_streaming_matches_one_shot() {
    let msg: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    let expected = sha256_hex(&msg);

    for split in [0, 1, 55, 56, 63, 64, 65, 128, 999, 1000] {
        let mut state = Sha256State::new();
        state.update(&msg[..split]).expect("Failed to update()");
        state.update(&msg[split..]).expect("Failed to update()");

        let mut digest = [0u8; SHA256_LEN];
        state.finish(&mut digest).expect("Failed to finish()");

        assert_eq!(to_hex(&digest), expected, "split at {split}");
    }
}

// =============================================================================
// Single use
// =============================================================================

#[test]
fn test_sha256_use_after_finish_is_invalid_state() {
    let mut state = Sha256State::new();
    let mut digest = [0u8; SHA256_LEN];

    state.finish(&mut digest).expect("Failed to finish()");

    assert!(matches!(state.update(b"x"), Err(HashError::InvalidState)));
    assert!(matches!(
        state.finish(&mut digest),
        Err(HashError::InvalidState)
    ));
}
