// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Platform backends for secure regions.
//!
//! Every backend implements [`Region`]: a fixed-capacity memory region that can
//! be switched between an inaccessible ("protected") and an accessible state.
//! The backend for a process is chosen once, by platform detection, and cached.
//!
//! | Backend | Platform | Granularity | Protected means |
//! |---------|----------|-------------|-----------------|
//! | [`BackendKind::Page`] | Unix | page size | `mprotect(PROT_NONE)` + `mlock` |
//! | [`BackendKind::Encrypted`] | Windows | 16 bytes | `CryptProtectMemory` |
//! | [`BackendKind::Frobnicated`] | any | 1 byte | XOR `0x2a` obfuscation |

use std::sync::OnceLock;

use crate::error::{BufferError, PageError};

#[cfg(windows)]
mod encrypted;
mod frobnicated;
#[cfg(unix)]
mod page;

#[cfg(windows)]
pub(crate) use encrypted::EncryptedRegion;
pub(crate) use frobnicated::FrobnicatedRegion;
#[cfg(unix)]
pub(crate) use page::{PageRegion, page_size};

/// Concrete secure-memory backend of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// mmap'd pages, mlock'd and toggled with mprotect (Unix).
    Page,
    /// Heap region encrypted in place with `CryptProtectMemory` (Windows).
    Encrypted,
    /// Heap region XOR-obfuscated while locked (portable fallback).
    Frobnicated,
}

impl BackendKind {
    /// Returns true if this backend can be allocated on the current platform.
    pub fn is_available(self) -> bool {
        match self {
            Self::Page => cfg!(unix),
            Self::Encrypted => cfg!(windows),
            Self::Frobnicated => true,
        }
    }
}

/// A secure memory region owned by a buffer.
///
/// # Safety contract
///
/// `as_slice`/`as_mut_slice` may only be called while the region is
/// unprotected. On the page backend a protected region faults on access; on
/// the other backends it yields ciphertext or obfuscated bytes.
pub(crate) trait Region: Send + Sync {
    /// Backend that produced this region.
    fn kind(&self) -> BackendKind;

    /// Usable size in bytes (the requested size rounded to the granularity).
    fn capacity(&self) -> usize;

    /// Whether the region is currently inaccessible.
    fn is_protected(&self) -> bool;

    /// Makes the region inaccessible.
    fn protect(&mut self) -> Result<(), PageError>;

    /// Makes the region accessible.
    fn unprotect(&mut self) -> Result<(), PageError>;

    /// # Safety
    /// Region must be unprotected.
    unsafe fn as_slice(&self) -> &[u8];

    /// # Safety
    /// Region must be unprotected.
    unsafe fn as_mut_slice(&mut self) -> &mut [u8];

    /// Best effort: unprotects and zeroizes the full capacity. The region stays
    /// allocated and unprotected on success.
    fn wipe(&mut self);

    /// Returns the memory to the system. Idempotent; the capacity is 0 after.
    fn release(&mut self);

    /// Wipes, then releases.
    fn dispose(&mut self) {
        self.wipe();
        self.release();
    }

    /// Disposes like [`Region::dispose`], snapshotting the raw bytes between
    /// the wipe and the release.
    #[cfg(any(test, feature = "test-utils"))]
    fn dispose_and_inspect(&mut self) -> Result<Vec<u8>, PageError> {
        self.wipe();

        let snapshot = if self.is_protected() {
            Err(PageError::Unprotect)
        } else {
            Ok(unsafe { self.as_slice() }.to_vec())
        };

        self.release();

        snapshot
    }
}

/// Returns the backend selected for this process.
///
/// Detection runs once; the result is cached for the lifetime of the process.
pub fn selected_backend() -> BackendKind {
    static SELECTED: OnceLock<BackendKind> = OnceLock::new();

    *SELECTED.get_or_init(|| {
        let kind = detect_backend();
        tracing::debug!(backend = ?kind, "selected secure memory backend");
        kind
    })
}

fn detect_backend() -> BackendKind {
    if cfg!(feature = "portable") {
        BackendKind::Frobnicated
    } else if cfg!(unix) {
        BackendKind::Page
    } else if cfg!(windows) {
        BackendKind::Encrypted
    } else {
        BackendKind::Frobnicated
    }
}

/// Allocates a zeroed, protected region of at least `size` bytes.
pub(crate) fn allocate_region(
    kind: BackendKind,
    size: usize,
) -> Result<Box<dyn Region>, BufferError> {
    let region: Box<dyn Region> = match kind {
        #[cfg(unix)]
        BackendKind::Page => Box::new(PageRegion::new(size).map_err(map_create_error)?),
        #[cfg(windows)]
        BackendKind::Encrypted => Box::new(EncryptedRegion::new(size).map_err(map_create_error)?),
        BackendKind::Frobnicated => {
            Box::new(FrobnicatedRegion::new(size).map_err(map_create_error)?)
        }
        #[allow(unreachable_patterns)]
        unsupported => return Err(BufferError::UnsupportedBackend(unsupported)),
    };

    Ok(region)
}

fn map_create_error(error: PageError) -> BufferError {
    match error {
        PageError::Create => BufferError::AllocationFailure,
        other => BufferError::Page(other),
    }
}

/// Rounds `size` up to a multiple of `granularity` (a size of 0 still takes
/// one granule). Returns `None` on overflow.
pub(crate) fn round_up(size: usize, granularity: usize) -> Option<usize> {
    let size = size.max(1);
    let granules = size.checked_add(granularity - 1)? / granularity;

    granules.checked_mul(granularity)
}
