// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! FrobnicatedRegion - portable fallback.
//!
//! Heap memory XORed with a constant while protected (`memfrob` semantics).
//! This only keeps secrets out of naive memory scans; it is the backend of last
//! resort on platforms without page protection or memory encryption.

use zeroize::Zeroize;

use super::{BackendKind, Region};
use crate::error::PageError;

const FROB_KEY: u8 = 0x2a;

#[derive(Debug)]
pub(crate) struct FrobnicatedRegion {
    bytes: Vec<u8>,
    is_protected: bool,
}

impl FrobnicatedRegion {
    pub fn new(size: usize) -> Result<Self, PageError> {
        let capacity = size.max(1);
        let mut bytes = Vec::new();

        bytes
            .try_reserve_exact(capacity)
            .map_err(|_| PageError::Create)?;
        bytes.resize(capacity, 0);

        let mut region = Self {
            bytes,
            is_protected: false,
        };

        region.protect()?;

        Ok(region)
    }

    fn frobnicate(&mut self) {
        for byte in self.bytes.iter_mut() {
            *byte ^= FROB_KEY;
        }
    }
}

impl Region for FrobnicatedRegion {
    fn kind(&self) -> BackendKind {
        BackendKind::Frobnicated
    }

    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn is_protected(&self) -> bool {
        self.is_protected
    }

    fn protect(&mut self) -> Result<(), PageError> {
        if !self.is_protected {
            self.frobnicate();
            self.is_protected = true;
        }

        Ok(())
    }

    fn unprotect(&mut self) -> Result<(), PageError> {
        if self.is_protected {
            self.frobnicate();
            self.is_protected = false;
        }

        Ok(())
    }

    unsafe fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    unsafe fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    fn wipe(&mut self) {
        self.bytes.as_mut_slice().zeroize();
        self.is_protected = false;
    }

    fn release(&mut self) {
        // Vec::zeroize also wipes spare capacity and clears the length.
        self.bytes.zeroize();
        self.bytes = Vec::new();
        self.is_protected = false;
    }
}

impl Drop for FrobnicatedRegion {
    fn drop(&mut self) {
        self.dispose();
    }
}
