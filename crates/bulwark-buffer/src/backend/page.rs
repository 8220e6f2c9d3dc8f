// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! PageRegion - mmap'd pages with mlock/mprotect.
//!
//! The region spans as many pages as the requested size needs. It is locked in
//! RAM when the kernel allows it (mlock is best effort: a refused lock is
//! logged, not fatal) and sits at PROT_NONE whenever it is not being accessed.

use core::ptr;

use zeroize::Zeroize;

use super::{BackendKind, Region, round_up};
use crate::error::PageError;

/// Returns the system page size.
pub(crate) fn page_size() -> usize {
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };

    if size > 0 { size as usize } else { 4096 }
}

/// Page-protected region.
#[derive(Debug)]
pub(crate) struct PageRegion {
    ptr: *mut u8,
    capacity: usize,
    is_locked: bool,
    is_protected: bool,
}

// Safety: the region owns its mapping; mutation requires &mut.
unsafe impl Send for PageRegion {}
unsafe impl Sync for PageRegion {}

impl PageRegion {
    /// Maps, zeroizes, locks (best effort) and protects a new region.
    pub fn new(size: usize) -> Result<Self, PageError> {
        let capacity = round_up(size, page_size()).ok_or(PageError::Create)?;

        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                capacity,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };

        if ptr == libc::MAP_FAILED {
            return Err(PageError::Create);
        }

        let mut region = Self {
            ptr: ptr as *mut u8,
            capacity,
            is_locked: false,
            is_protected: false,
        };

        unsafe { region.as_mut_slice().zeroize() };

        if let Err(error) = region.lock() {
            tracing::warn!(%error, capacity, "mlock refused, region may be swapped");
        }

        if let Err(error) = region.protect() {
            region.dispose();
            return Err(error);
        }

        Ok(region)
    }

    /// Locks the region in RAM (prevents swapping to disk).
    fn lock(&mut self) -> Result<(), PageError> {
        let failed = unsafe { libc::mlock(self.ptr as *const _, self.capacity) } != 0;

        if failed {
            return Err(PageError::Lock);
        }

        self.is_locked = true;

        Ok(())
    }

    fn munlock(&mut self) {
        if self.is_locked {
            unsafe { libc::munlock(self.ptr as *const _, self.capacity) };
            self.is_locked = false;
        }
    }

    fn munmap(&mut self) {
        unsafe { libc::munmap(self.ptr as *mut libc::c_void, self.capacity) };
        self.ptr = ptr::null_mut();
        self.capacity = 0;
    }
}

impl Region for PageRegion {
    fn kind(&self) -> BackendKind {
        BackendKind::Page
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn is_protected(&self) -> bool {
        self.is_protected
    }

    fn protect(&mut self) -> Result<(), PageError> {
        let failed =
            unsafe { libc::mprotect(self.ptr as *mut _, self.capacity, libc::PROT_NONE) } != 0;

        if failed {
            return Err(PageError::Protect);
        }

        self.is_protected = true;

        Ok(())
    }

    fn unprotect(&mut self) -> Result<(), PageError> {
        let failed = unsafe {
            libc::mprotect(
                self.ptr as *mut _,
                self.capacity,
                libc::PROT_READ | libc::PROT_WRITE,
            )
        } != 0;

        if failed {
            return Err(PageError::Unprotect);
        }

        self.is_protected = false;

        Ok(())
    }

    unsafe fn as_slice(&self) -> &[u8] {
        unsafe { core::slice::from_raw_parts(self.ptr, self.capacity) }
    }

    unsafe fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { core::slice::from_raw_parts_mut(self.ptr, self.capacity) }
    }

    fn wipe(&mut self) {
        if self.ptr.is_null() {
            return;
        }

        // If unprotect fails the page stays PROT_NONE until unmapped.
        if self.is_protected {
            let _ = self.unprotect();
        }

        if !self.is_protected {
            unsafe { self.as_mut_slice().zeroize() };
        }
    }

    fn release(&mut self) {
        if self.ptr.is_null() {
            return;
        }

        self.munlock();
        self.munmap();
    }
}

impl Drop for PageRegion {
    fn drop(&mut self) {
        self.dispose();
    }
}
