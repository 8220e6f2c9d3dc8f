// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! EncryptedRegion - Windows in-place memory encryption.
//!
//! The region is encrypted with `CryptProtectMemory(SAME_PROCESS)` while
//! protected. The API works on whole cipher blocks, so the capacity is rounded
//! up to `CRYPTPROTECTMEMORY_BLOCK_SIZE`. `VirtualLock` is best effort.

use winapi::shared::minwindef::{DWORD, LPVOID};
use winapi::um::dpapi::{
    CRYPTPROTECTMEMORY_BLOCK_SIZE, CRYPTPROTECTMEMORY_SAME_PROCESS, CryptProtectMemory,
    CryptUnprotectMemory,
};
use winapi::um::memoryapi::{VirtualLock, VirtualUnlock};
use zeroize::Zeroize;

use super::{BackendKind, Region, round_up};
use crate::error::PageError;

#[derive(Debug)]
pub(crate) struct EncryptedRegion {
    bytes: Vec<u8>,
    is_locked: bool,
    is_protected: bool,
}

impl EncryptedRegion {
    pub fn new(size: usize) -> Result<Self, PageError> {
        let capacity =
            round_up(size, CRYPTPROTECTMEMORY_BLOCK_SIZE as usize).ok_or(PageError::Create)?;

        if capacity > DWORD::MAX as usize {
            return Err(PageError::Create);
        }

        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(capacity)
            .map_err(|_| PageError::Create)?;
        bytes.resize(capacity, 0);

        let mut region = Self {
            bytes,
            is_locked: false,
            is_protected: false,
        };

        let locked = unsafe { VirtualLock(region.bytes.as_mut_ptr() as LPVOID, capacity) } != 0;

        if locked {
            region.is_locked = true;
        } else {
            tracing::warn!(capacity, "VirtualLock refused, region may be paged out");
        }

        region.protect()?;

        Ok(region)
    }
}

impl Region for EncryptedRegion {
    fn kind(&self) -> BackendKind {
        BackendKind::Encrypted
    }

    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn is_protected(&self) -> bool {
        self.is_protected
    }

    fn protect(&mut self) -> Result<(), PageError> {
        if self.is_protected {
            return Ok(());
        }

        let ok = unsafe {
            CryptProtectMemory(
                self.bytes.as_mut_ptr() as LPVOID,
                self.bytes.len() as DWORD,
                CRYPTPROTECTMEMORY_SAME_PROCESS,
            )
        } != 0;

        if !ok {
            return Err(PageError::Protect);
        }

        self.is_protected = true;

        Ok(())
    }

    fn unprotect(&mut self) -> Result<(), PageError> {
        if !self.is_protected {
            return Ok(());
        }

        let ok = unsafe {
            CryptUnprotectMemory(
                self.bytes.as_mut_ptr() as LPVOID,
                self.bytes.len() as DWORD,
                CRYPTPROTECTMEMORY_SAME_PROCESS,
            )
        } != 0;

        if !ok {
            return Err(PageError::Unprotect);
        }

        self.is_protected = false;

        Ok(())
    }

    unsafe fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    unsafe fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    fn wipe(&mut self) {
        if self.bytes.is_empty() {
            return;
        }

        // Ciphertext is wiped too, so an unprotect failure is harmless here.
        let _ = self.unprotect();
        self.bytes.as_mut_slice().zeroize();
        self.is_protected = false;
    }

    fn release(&mut self) {
        if self.bytes.is_empty() {
            return;
        }

        self.bytes.zeroize();

        if self.is_locked {
            unsafe { VirtualUnlock(self.bytes.as_mut_ptr() as LPVOID, self.bytes.capacity()) };
            self.is_locked = false;
        }

        self.bytes = Vec::new();
        self.is_protected = false;
    }
}

impl Drop for EncryptedRegion {
    fn drop(&mut self) {
        self.dispose();
    }
}
