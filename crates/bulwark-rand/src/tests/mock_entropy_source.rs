// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::EntropyError;
use crate::support::test_utils::{MockEntropySource, MockEntropySourceBehaviour};
use crate::traits::EntropySource;

// =============================================================================
// behaviours
// =============================================================================

#[test]
fn test_mock_none_delegates() {
    let entropy = MockEntropySource::new(MockEntropySourceBehaviour::None);
    let mut buf = [0u8; 16];

    assert!(entropy.fill_bytes(&mut buf).is_ok());
    assert_eq!(entropy.call_count(), 1);
}

#[test]
fn test_mock_fail_always() {
    let entropy = MockEntropySource::new(MockEntropySourceBehaviour::FailAlways);
    let mut buf = [0u8; 16];

    assert_eq!(
        entropy.fill_bytes(&mut buf),
        Err(EntropyError::EntropyNotAvailable)
    );
    assert_eq!(
        entropy.fill_bytes(&mut buf),
        Err(EntropyError::EntropyNotAvailable)
    );
    assert_eq!(entropy.call_count(), 2);
}

#[test]
fn test_mock_fail_at_nth() {
    let entropy = MockEntropySource::new(MockEntropySourceBehaviour::FailAtNthFillBytes(2));
    let mut buf = [0u8; 16];

    assert!(entropy.fill_bytes(&mut buf).is_ok());
    assert!(entropy.fill_bytes(&mut buf).is_err());
    assert!(entropy.fill_bytes(&mut buf).is_ok());
}

#[test]
fn test_mock_repeat_is_deterministic() {
    let entropy = MockEntropySource::new(MockEntropySourceBehaviour::Repeat(0xab));
    let mut buf = [0u8; 8];

    entropy.fill_bytes(&mut buf).expect("Failed to fill_bytes()");

    assert_eq!(buf, [0xab; 8]);
}

// =============================================================================
// counters
// =============================================================================

#[test]
fn test_mock_reset_count_and_change_behaviour() {
    let mut entropy = MockEntropySource::new(MockEntropySourceBehaviour::FailAlways);
    let mut buf = [0u8; 4];

    let _ = entropy.fill_bytes(&mut buf);
    assert_eq!(entropy.call_count(), 1);

    entropy.reset_count();
    assert_eq!(entropy.call_count(), 0);

    entropy.change_behaviour(MockEntropySourceBehaviour::Repeat(7));
    entropy.fill_bytes(&mut buf).expect("Failed to fill_bytes()");

    assert_eq!(buf, [7; 4]);
}
