// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

// References:
// [1] RFC 7693 Appendix A: BLAKE2b-512("abc")
//     https://datatracker.ietf.org/doc/html/rfc7693#appendix-A
// [2] BLAKE2 reference known-answer tests (blake2b-kat.txt)

use bulwark_util::to_hex;

use crate::blake2b::Blake2bState;
use crate::error::HashError;

fn blake2b_hex(len: usize, key: Option<&[u8]>, input: &[u8]) -> String {
    let mut out = vec![0u8; len];
    Blake2bState::digest(&mut out, key, input).expect("Failed to digest()");
    to_hex(&out)
}

// =============================================================================
// Known answers
// =============================================================================

#[test]
fn test_blake2b_512_abc() {
    assert_eq!(
        blake2b_hex(64, None, b"abc"),
        "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d1\
         7d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923"
    );
}

#[test]
fn test_blake2b_512_empty() {
    assert_eq!(
        blake2b_hex(64, None, b""),
        "786a02f742015903c6c6fd852552d272912f4740e15847618a86e217f71f5419\
         d25e1031afee585313896444934eb04b903a685b1448b755d56f701afe9be2ce"
    );
}

#[test]
fn test_blake2b_256_empty() {
    assert_eq!(
        blake2b_hex(32, None, b""),
        "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
    );
}

#[test]
fn test_blake2b_256_abc() {
    assert_eq!(
        blake2b_hex(32, None, b"abc"),
        "bddd813c634239723171ef3fee98579b94964e3bb1cb3e427262c8c068d52319"
    );
}

#[test]
fn test_blake2b_keyed_empty_input() {
    let key: Vec<u8> = (0..64u8).collect();

    assert_eq!(
        blake2b_hex(64, Some(key.as_slice()), b""),
        "10ebb67700b1868efb4417987acf4690ae9d972fb7a590c2f02871799aaa4786\
         b5e996e8f0f4eb981fc214b005f42d2ff4233499391653df7aefcbc13fc51568"
    );
}

#[test]
fn test_blake2b_empty_key_is_unkeyed() {
    assert_eq!(
        blake2b_hex(64, Some(&b""[..]), b"abc"),
        blake2b_hex(64, None, b"abc")
    );
}

#[test]
fn test_blake2b_key_changes_digest() {
    assert_ne!(
        blake2b_hex(64, Some(&b"k1"[..]), b"abc"),
        blake2b_hex(64, Some(&b"k2"[..]), b"abc")
    );
}

// =============================================================================
// Streaming
// =============================================================================

#[test]
fn test_blake2b_streaming_matches_one_shot() {
    let msg: Vec<u8> = (0..=255u8).cycle().take(600).collect();

    for len in [0, 1, 127, 128, 129, 256, 257, 600] {
        let expected = blake2b_hex(64, Some(&b"key"[..]), &msg[..len]);

        for split in [0, 1, 64, 127, 128, 129, 256] {
            let split = split.min(len);
            let mut state = Blake2bState::new(64, Some(&b"key"[..])).expect("Failed to new()");
            state.update(&msg[..split]).expect("Failed to update()");
            state.update(&msg[split..len]).expect("Failed to update()");

            let mut out = [0u8; 64];
            state.finish(&mut out).expect("Failed to finish()");

            assert_eq!(to_hex(&out), expected, "len {len}, split at {split}");
        }
    }
}

// =============================================================================
// Argument validation
// =============================================================================

#[test]
fn test_blake2b_rejects_digest_length() {
    assert!(matches!(
        Blake2bState::new(0, None),
        Err(HashError::InvalidArgument(_))
    ));
    assert!(matches!(
        Blake2bState::new(65, None),
        Err(HashError::InvalidArgument(_))
    ));
}

#[test]
fn test_blake2b_rejects_long_key() {
    assert!(matches!(
        Blake2bState::new(32, Some(&[0u8; 65][..])),
        Err(HashError::InvalidArgument(_))
    ));
}

#[test]
fn test_blake2b_finish_checks_output_length() {
    let mut state = Blake2bState::new(32, None).expect("Failed to new()");
    let mut out = [0u8; 64];

    assert!(matches!(
        state.finish(&mut out),
        Err(HashError::InvalidArgument(_))
    ));
}

#[test]
fn test_blake2b_use_after_finish_is_invalid_state() {
    let mut state = Blake2bState::new(32, None).expect("Failed to new()");
    let mut out = [0u8; 32];

    state.finish(&mut out).expect("Failed to finish()");

    assert!(matches!(state.update(b"x"), Err(HashError::InvalidState)));
    assert!(matches!(state.finish(&mut out), Err(HashError::InvalidState)));
}
