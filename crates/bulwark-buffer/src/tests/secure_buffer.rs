// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use proptest::prelude::*;

use bulwark_rand::support::test_utils::{MockEntropySource, MockEntropySourceBehaviour};
use bulwark_util::is_slice_zeroized;

use crate::backend::BackendKind;
use crate::error::BufferError;
use crate::secure_buffer::SecureBuffer;

use super::support::FaultyRegion;

// =============================================================================
// allocate()
// =============================================================================

#[test]
fn test_allocate_is_zeroed_and_locked() {
    let mut buffer = SecureBuffer::allocate(16).expect("Failed to allocate()");

    assert!(buffer.is_locked());
    assert_eq!(buffer.len(), 16);
    assert!(buffer.capacity() >= 16);

    let bytes = buffer.read(0, 16).expect("Failed to read()");
    assert!(is_slice_zeroized(&bytes));
}

#[test]
fn test_allocate_zero_size() {
    let buffer = SecureBuffer::allocate(0).expect("Failed to allocate()");

    assert!(buffer.is_empty());
    assert!(buffer.capacity() >= 1);
}

#[test]
fn test_allocate_with_frobnicated() {
    let buffer =
        SecureBuffer::allocate_with(BackendKind::Frobnicated, 5).expect("Failed to allocate_with()");

    assert_eq!(buffer.backend(), BackendKind::Frobnicated);
    assert_eq!(buffer.capacity(), 5);
}

#[test]
fn test_allocate_frobnicated_huge_fails() {
    let result = SecureBuffer::allocate_with(BackendKind::Frobnicated, usize::MAX);

    assert!(matches!(result, Err(BufferError::AllocationFailure)));
}

#[cfg(unix)]
#[test]
fn test_allocate_page_huge_fails() {
    let result = SecureBuffer::allocate_with(BackendKind::Page, usize::MAX);

    assert!(matches!(result, Err(BufferError::AllocationFailure)));
}

#[cfg(unix)]
#[test]
fn test_allocate_encrypted_unsupported_on_unix() {
    let result = SecureBuffer::allocate_with(BackendKind::Encrypted, 16);

    assert!(matches!(
        result,
        Err(BufferError::UnsupportedBackend(BackendKind::Encrypted))
    ));
}

// =============================================================================
// from_slice() / from_mut_slice() / random()
// =============================================================================

#[test]
fn test_from_slice_copies_content() {
    let mut buffer = SecureBuffer::from_slice(b"hunter2").expect("Failed to from_slice()");

    assert_eq!(buffer.len(), 7);
    assert_eq!(buffer.read(0, 7).expect("Failed to read()").as_slice(), b"hunter2");
}

#[test]
fn test_from_mut_slice_zeroizes_source() {
    let mut source = *b"correct horse";
    let mut buffer = SecureBuffer::from_mut_slice(&mut source).expect("Failed to from_mut_slice()");

    assert!(is_slice_zeroized(&source));
    assert_eq!(
        buffer.read(0, 13).expect("Failed to read()").as_slice(),
        b"correct horse"
    );
}

#[test]
fn test_random_fills_from_entropy() {
    let entropy = MockEntropySource::new(MockEntropySourceBehaviour::Repeat(0x7f));
    let mut buffer = SecureBuffer::random(12, &entropy).expect("Failed to random()");

    assert_eq!(buffer.read(0, 12).expect("Failed to read()").as_slice(), &[0x7f; 12]);
    assert!(buffer.is_locked());
}

#[test]
fn test_random_propagates_entropy_failure() {
    let entropy = MockEntropySource::new(MockEntropySourceBehaviour::FailAlways);
    let result = SecureBuffer::random(12, &entropy);

    assert!(matches!(result, Err(BufferError::Entropy(_))));
}

// =============================================================================
// write() / read()
// =============================================================================

#[test]
fn test_write_at_offset_grows_len() {
    let mut buffer = SecureBuffer::allocate(8).expect("Failed to allocate()");
    buffer.set_content_length(0).expect("Failed to set_content_length()");

    buffer.write(b"xy", 3).expect("Failed to write()");

    assert_eq!(buffer.len(), 5);
    assert_eq!(
        buffer.read(0, 5).expect("Failed to read()").as_slice(),
        &[0, 0, 0, b'x', b'y']
    );
}

#[test]
fn test_write_out_of_bounds_changes_nothing() {
    let mut buffer = SecureBuffer::allocate_with(BackendKind::Frobnicated, 4)
        .expect("Failed to allocate_with()");
    buffer.write(b"abcd", 0).expect("Failed to write()");

    let result = buffer.write(b"xyz", 2);

    assert!(matches!(
        result,
        Err(BufferError::OutOfBounds {
            offset: 2,
            len: 3,
            capacity: 4
        })
    ));
    assert!(buffer.is_locked());
    assert_eq!(buffer.read(0, 4).expect("Failed to read()").as_slice(), b"abcd");
}

#[test]
fn test_read_out_of_bounds() {
    let mut buffer = SecureBuffer::allocate_with(BackendKind::Frobnicated, 4)
        .expect("Failed to allocate_with()");

    assert!(matches!(
        buffer.read(3, 2),
        Err(BufferError::OutOfBounds { .. })
    ));
    assert!(matches!(
        buffer.read(usize::MAX, 2),
        Err(BufferError::OutOfBounds { .. })
    ));
    assert!(buffer.is_locked());
}

// =============================================================================
// get() / set()
// =============================================================================

#[test]
fn test_get_set() {
    let mut buffer = SecureBuffer::allocate(4).expect("Failed to allocate()");

    buffer.set(2, 0xab).expect("Failed to set()");

    assert_eq!(buffer.get(2).expect("Failed to get()"), 0xab);
    assert_eq!(buffer.get(1).expect("Failed to get()"), 0);
}

#[test]
fn test_get_past_capacity_fails() {
    let mut buffer = SecureBuffer::allocate_with(BackendKind::Frobnicated, 4)
        .expect("Failed to allocate_with()");

    assert!(matches!(buffer.get(4), Err(BufferError::OutOfBounds { .. })));
    assert!(matches!(
        buffer.set(4, 1),
        Err(BufferError::OutOfBounds { .. })
    ));
}

// =============================================================================
// copy_to()
// =============================================================================

#[test]
fn test_copy_to_moves_range() {
    let mut src = SecureBuffer::from_slice(b"abcdef").expect("Failed to from_slice()");
    let mut dest = SecureBuffer::allocate(8).expect("Failed to allocate()");

    src.copy_to(2, &mut dest, 1, 3).expect("Failed to copy_to()");

    assert_eq!(
        dest.read(0, 5).expect("Failed to read()").as_slice(),
        &[0, b'c', b'd', b'e', 0]
    );
    assert!(src.is_locked());
    assert!(dest.is_locked());
}

#[test]
fn test_copy_to_grows_dest_len() {
    let mut src = SecureBuffer::from_slice(b"abcd").expect("Failed to from_slice()");
    let mut dest = SecureBuffer::allocate(8).expect("Failed to allocate()");
    dest.set_content_length(0).expect("Failed to set_content_length()");

    src.copy_to(0, &mut dest, 2, 4).expect("Failed to copy_to()");

    assert_eq!(dest.len(), 6);
}

#[test]
fn test_copy_to_out_of_bounds_on_either_side() {
    let mut src = SecureBuffer::allocate_with(BackendKind::Frobnicated, 4)
        .expect("Failed to allocate_with()");
    let mut dest = SecureBuffer::allocate_with(BackendKind::Frobnicated, 2)
        .expect("Failed to allocate_with()");

    assert!(matches!(
        src.copy_to(2, &mut dest, 0, 4),
        Err(BufferError::OutOfBounds { .. })
    ));
    assert!(matches!(
        src.copy_to(0, &mut dest, 0, 3),
        Err(BufferError::OutOfBounds { .. })
    ));
}

// =============================================================================
// shift_left() / shift_right()
// =============================================================================

#[test]
fn test_shift_right() {
    let mut buffer = SecureBuffer::from_slice(&[1, 2, 3, 4]).expect("Failed to from_slice()");

    buffer.shift_right(1).expect("Failed to shift_right()");

    assert_eq!(buffer.read(0, 4).expect("Failed to read()").as_slice(), &[0, 1, 2, 3]);
}

#[test]
fn test_shift_left() {
    let mut buffer = SecureBuffer::from_slice(&[1, 2, 3, 4]).expect("Failed to from_slice()");

    buffer.shift_left(2).expect("Failed to shift_left()");

    assert_eq!(buffer.read(0, 4).expect("Failed to read()").as_slice(), &[3, 4, 0, 0]);
}

#[test]
fn test_shift_by_zero_is_noop() {
    let mut buffer = SecureBuffer::from_slice(&[1, 2, 3]).expect("Failed to from_slice()");

    buffer.shift_left(0).expect("Failed to shift_left()");
    buffer.shift_right(0).expect("Failed to shift_right()");

    assert_eq!(buffer.read(0, 3).expect("Failed to read()").as_slice(), &[1, 2, 3]);
}

#[test]
fn test_shift_past_len_zeroes_content() {
    let mut left = SecureBuffer::from_slice(&[1, 2, 3]).expect("Failed to from_slice()");
    let mut right = SecureBuffer::from_slice(&[1, 2, 3]).expect("Failed to from_slice()");

    left.shift_left(3).expect("Failed to shift_left()");
    right.shift_right(10).expect("Failed to shift_right()");

    assert!(is_slice_zeroized(&left.read(0, 3).expect("Failed to read()")));
    assert!(is_slice_zeroized(&right.read(0, 3).expect("Failed to read()")));
}

// =============================================================================
// equals()
// =============================================================================

#[test]
fn test_equals_same_content() {
    let mut a = SecureBuffer::from_slice(b"same").expect("Failed to from_slice()");
    let mut b = SecureBuffer::from_slice(b"same").expect("Failed to from_slice()");

    assert!(a.equals(&mut b).expect("Failed to equals()"));
    assert!(a.is_locked());
    assert!(b.is_locked());
}

#[test]
fn test_equals_different_content() {
    let mut a = SecureBuffer::from_slice(b"same").expect("Failed to from_slice()");
    let mut b = SecureBuffer::from_slice(b"sane").expect("Failed to from_slice()");

    assert!(!a.equals(&mut b).expect("Failed to equals()"));
}

#[test]
fn test_equals_different_len() {
    let mut a = SecureBuffer::from_slice(b"same").expect("Failed to from_slice()");
    let mut b = SecureBuffer::from_slice(b"sam").expect("Failed to from_slice()");

    assert!(!a.equals(&mut b).expect("Failed to equals()"));
}

#[test]
fn test_equals_ignores_bytes_past_len() {
    let mut a = SecureBuffer::from_slice(b"abXX").expect("Failed to from_slice()");
    let mut b = SecureBuffer::from_slice(b"abYY").expect("Failed to from_slice()");

    a.set_content_length(2).expect("Failed to set_content_length()");
    b.set_content_length(2).expect("Failed to set_content_length()");

    assert!(a.equals(&mut b).expect("Failed to equals()"));
}

#[cfg(unix)]
#[test]
fn test_equals_across_backends_is_type_mismatch() {
    let mut a =
        SecureBuffer::allocate_with(BackendKind::Page, 4).expect("Failed to allocate_with()");
    let mut b = SecureBuffer::allocate_with(BackendKind::Frobnicated, 4)
        .expect("Failed to allocate_with()");

    let result = a.equals(&mut b);

    assert!(matches!(
        result,
        Err(BufferError::TypeMismatch {
            left: BackendKind::Page,
            right: BackendKind::Frobnicated
        })
    ));
    assert!(a.is_locked());
    assert!(b.is_locked());
}

// =============================================================================
// free()
// =============================================================================

#[test]
fn test_free_is_idempotent() {
    let mut buffer = SecureBuffer::from_slice(b"secret").expect("Failed to from_slice()");

    buffer.free();
    buffer.free();

    assert!(buffer.is_freed());
    assert!(buffer.is_locked());
    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.capacity(), 0);
}

#[test]
fn test_use_after_free_fails() {
    let mut buffer = SecureBuffer::from_slice(b"secret").expect("Failed to from_slice()");
    buffer.free();

    assert!(matches!(buffer.read(0, 1), Err(BufferError::Freed)));
    assert!(matches!(buffer.write(b"x", 0), Err(BufferError::Freed)));
    assert!(matches!(buffer.access(), Err(BufferError::Freed)));
    assert!(matches!(buffer.shift_left(1), Err(BufferError::Freed)));

    let mut other = SecureBuffer::allocate(1).expect("Failed to allocate()");
    assert!(matches!(other.equals(&mut buffer), Err(BufferError::Freed)));
}

#[test]
fn test_free_and_inspect_on_freed_buffer_fails() {
    let mut buffer = SecureBuffer::allocate(4).expect("Failed to allocate()");
    buffer.free();

    assert!(matches!(buffer.free_and_inspect(), Err(BufferError::Freed)));
}

#[test]
fn test_free_and_inspect_sees_content_left_by_wipe() {
    let (region, faults) = FaultyRegion::new(8);
    let mut buffer = SecureBuffer::from_region(Box::new(region), 0);
    buffer.write(b"secret!!", 0).expect("Failed to write()");

    faults.skip_zeroize(true);
    let snapshot = buffer.free_and_inspect().expect("Failed to free_and_inspect()");

    assert_eq!(&snapshot[..8], b"secret!!");
    assert!(buffer.is_freed());
}

#[test]
fn test_free_and_inspect_after_real_wipe() {
    let (region, _faults) = FaultyRegion::new(8);
    let mut buffer = SecureBuffer::from_region(Box::new(region), 0);
    buffer.write(b"secret!!", 0).expect("Failed to write()");

    let snapshot = buffer.free_and_inspect().expect("Failed to free_and_inspect()");

    assert_eq!(snapshot.len(), 8);
    assert!(is_slice_zeroized(&snapshot));
}

fn available_backends() -> Vec<BackendKind> {
    [BackendKind::Page, BackendKind::Encrypted, BackendKind::Frobnicated]
        .into_iter()
        .filter(|kind| kind.is_available())
        .collect()
}

proptest! {
    #[test]
    fn test_free_zeroizes_full_capacity(data in prop::collection::vec(any::<u8>(), 1..512)) {
        for kind in available_backends() {
            let mut buffer = SecureBuffer::allocate_with(kind, data.len()).expect("Failed to allocate_with()");
            buffer.write(&data, 0).expect("Failed to write()");
            let capacity = buffer.capacity();

            let snapshot = buffer.free_and_inspect().expect("Failed to free_and_inspect()");

            prop_assert_eq!(snapshot.len(), capacity);
            prop_assert!(is_slice_zeroized(&snapshot), "{:?}", kind);
            prop_assert!(buffer.is_freed());
            prop_assert_eq!(buffer.capacity(), 0);
        }
    }
}

// =============================================================================
// open() / open_mut()
// =============================================================================

#[test]
fn test_open_mut_modifies_content() {
    let mut buffer = SecureBuffer::from_slice(b"abc").expect("Failed to from_slice()");

    buffer
        .open_mut(|content: &mut [u8]| {
            content.reverse();
            Ok::<_, BufferError>(())
        })
        .expect("Failed to open_mut()");

    assert_eq!(buffer.read(0, 3).expect("Failed to read()").as_slice(), b"cba");
    assert!(buffer.is_locked());
}

#[test]
fn test_open_returns_callback_value() {
    let mut buffer = SecureBuffer::from_slice(b"abc").expect("Failed to from_slice()");

    let len = buffer
        .open(|content: &[u8]| Ok::<_, BufferError>(content.len()))
        .expect("Failed to open()");

    assert_eq!(len, 3);
}
