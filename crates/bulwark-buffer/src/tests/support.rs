// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Fault-injecting region for exercising the error paths of the guards.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::backend::{BackendKind, FrobnicatedRegion, Region};
use crate::error::PageError;

/// Switches shared with a [`FaultyRegion`] after it was moved into a buffer.
#[derive(Clone, Default)]
pub struct Faults {
    fail_protect: Arc<AtomicBool>,
    fail_unprotect: Arc<AtomicBool>,
    skip_zeroize: Arc<AtomicBool>,
}

impl Faults {
    pub fn fail_protect(&self, fail: bool) {
        self.fail_protect.store(fail, Ordering::SeqCst);
    }

    pub fn fail_unprotect(&self, fail: bool) {
        self.fail_unprotect.store(fail, Ordering::SeqCst);
    }

    /// Wipe unprotects but leaves the content in place.
    pub fn skip_zeroize(&self, skip: bool) {
        self.skip_zeroize.store(skip, Ordering::SeqCst);
    }
}

/// Frobnicated region whose protect/unprotect can be made to fail and whose
/// wipe can be made to skip zeroization.
pub struct FaultyRegion {
    inner: FrobnicatedRegion,
    faults: Faults,
}

impl FaultyRegion {
    pub fn new(size: usize) -> (Self, Faults) {
        let faults = Faults::default();
        let region = Self {
            inner: FrobnicatedRegion::new(size).expect("Failed to FrobnicatedRegion::new()"),
            faults: faults.clone(),
        };

        (region, faults)
    }
}

impl Region for FaultyRegion {
    fn kind(&self) -> BackendKind {
        self.inner.kind()
    }

    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn is_protected(&self) -> bool {
        self.inner.is_protected()
    }

    fn protect(&mut self) -> Result<(), PageError> {
        if self.faults.fail_protect.load(Ordering::SeqCst) {
            return Err(PageError::Protect);
        }

        self.inner.protect()
    }

    fn unprotect(&mut self) -> Result<(), PageError> {
        if self.faults.fail_unprotect.load(Ordering::SeqCst) {
            return Err(PageError::Unprotect);
        }

        self.inner.unprotect()
    }

    unsafe fn as_slice(&self) -> &[u8] {
        unsafe { self.inner.as_slice() }
    }

    unsafe fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { self.inner.as_mut_slice() }
    }

    fn wipe(&mut self) {
        if self.faults.skip_zeroize.load(Ordering::SeqCst) {
            let _ = self.inner.unprotect();
            return;
        }

        self.inner.wipe();
    }

    fn release(&mut self) {
        self.inner.release();
    }
}
