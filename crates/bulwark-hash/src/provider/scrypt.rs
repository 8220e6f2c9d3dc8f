// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Scrypt password hashing with self-describing hash strings.
//!
//! Format: `$s2$<N>$<r>$<p>$<base64 salt>$<base64 hash>` (standard base64
//! alphabet, padded).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use zeroize::Zeroizing;

use bulwark_buffer::SecureBuffer;
use bulwark_rand::{EntropySource, SystemEntropySource};
use bulwark_util::constant_time_eq;

use super::ProtectedHashFunction;
use crate::error::HashError;
use crate::scrypt::{ScryptParams, scrypt};

const VERSION_TAG: &str = "s2";
const PARTS: usize = 7;

/// Scrypt provider with an injected salt source.
#[derive(Debug)]
pub struct Scrypt<E: EntropySource = SystemEntropySource> {
    params: ScryptParams,
    entropy: E,
}

impl Default for Scrypt<SystemEntropySource> {
    fn default() -> Self {
        Self::new(ScryptParams::default())
    }
}

impl Scrypt<SystemEntropySource> {
    /// Provider drawing salts from the system CSPRNG.
    pub fn new(params: ScryptParams) -> Self {
        Self::with_entropy(params, SystemEntropySource {})
    }
}

impl<E: EntropySource> Scrypt<E> {
    /// Working memory [`compare`](Self::compare) accepts from a stored hash
    /// string: 1 GiB.
    pub const MAX_COMPARE_MEMORY: usize = 1 << 30;

    /// Provider drawing salts from `entropy`.
    pub fn with_entropy(params: ScryptParams, entropy: E) -> Self {
        Self { params, entropy }
    }

    /// Parameters used for fresh hashes.
    pub fn params(&self) -> &ScryptParams {
        &self.params
    }

    /// Returns true if `hash` has the shape of a scrypt hash string: seven
    /// `$`-separated parts, an empty first part and the `s2` version tag.
    ///
    /// The numeric and base64 fields are only checked by
    /// [`compare`](Self::compare).
    pub fn is_valid(hash: &str) -> bool {
        let parts: Vec<&str> = hash.split('$').collect();

        parts.len() == PARTS && parts[0].is_empty() && parts[1] == VERSION_TAG
    }

    /// Derives the raw key of `password` under `salt` with the provider
    /// parameters.
    pub fn derive(&self, password: &mut SecureBuffer, salt: &[u8]) -> Result<SecureBuffer, HashError> {
        derive_with(password, salt, &self.params)
    }

    /// Hashes `password` under a fresh salt into a hash string.
    ///
    /// Equivalent to [`ProtectedHashFunction::compute_hash`].
    pub fn hash_password(&self, password: &mut SecureBuffer) -> Result<String, HashError> {
        let mut salt = Zeroizing::new(vec![0u8; self.params.salt_len()]);
        self.entropy.fill_bytes(&mut salt)?;

        let mut key = self.derive(password, &salt)?;
        let encoded_key = key.open(|key| Ok::<_, HashError>(STANDARD.encode(key)))?;

        Ok(format!(
            "${VERSION_TAG}${}${}${}${}${}",
            self.params.n(),
            self.params.r(),
            self.params.p(),
            STANDARD.encode(&salt[..]),
            encoded_key,
        ))
    }

    /// Re-derives `password` with the parameters and salt stored in `hash`
    /// and compares the keys in constant time.
    ///
    /// Malformed hash strings are [`HashError::InvalidArgument`], and so are
    /// stored parameters needing more than [`MAX_COMPARE_MEMORY`](Self::MAX_COMPARE_MEMORY)
    /// bytes of working memory (or the provider's own cost, if larger).
    pub fn compare(&self, password: &mut SecureBuffer, hash: &str) -> Result<bool, HashError> {
        let parsed = ParsedHash::parse(hash)?;
        let params = ScryptParams::new(parsed.n, parsed.r, parsed.p, parsed.key.len())?;

        let limit = Self::MAX_COMPARE_MEMORY.max(self.params.memory_cost()?);

        if params.memory_cost()? > limit {
            return Err(HashError::InvalidArgument(
                "scrypt hash string exceeds the memory limit",
            ));
        }

        let mut derived = derive_with(password, &parsed.salt, &params)?;

        derived.open(|derived| Ok(constant_time_eq(derived, &parsed.key)))
    }
}

impl<E: EntropySource> ProtectedHashFunction for Scrypt<E> {
    /// Raw key under a fresh, discarded salt.
    fn compute_hash_protected(&self, input: &mut SecureBuffer) -> Result<SecureBuffer, HashError> {
        let mut salt = Zeroizing::new(vec![0u8; self.params.salt_len()]);
        self.entropy.fill_bytes(&mut salt)?;

        self.derive(input, &salt)
    }

    fn compute_hash(&self, input: &mut SecureBuffer) -> Result<String, HashError> {
        self.hash_password(input)
    }
}

fn derive_with(
    password: &mut SecureBuffer,
    salt: &[u8],
    params: &ScryptParams,
) -> Result<SecureBuffer, HashError> {
    tracing::debug!(
        n = params.n(),
        r = params.r(),
        p = params.p(),
        key_len = params.key_len(),
        "deriving scrypt key"
    );

    let mut out = SecureBuffer::allocate(params.key_len())?;

    {
        let mut access = out.access()?;
        let key = access.content_mut();

        password.open(|password| scrypt(password, salt, params, key))?;
    }

    Ok(out)
}

struct ParsedHash {
    n: u64,
    r: u32,
    p: u32,
    salt: Zeroizing<Vec<u8>>,
    key: Zeroizing<Vec<u8>>,
}

impl ParsedHash {
    fn parse(hash: &str) -> Result<Self, HashError> {
        let malformed = HashError::InvalidArgument("malformed scrypt hash string");

        if !Scrypt::<SystemEntropySource>::is_valid(hash) {
            return Err(malformed);
        }

        let parts: Vec<&str> = hash.split('$').collect();

        let (Ok(n), Ok(r), Ok(p)) = (parts[2].parse(), parts[3].parse(), parts[4].parse()) else {
            return Err(malformed);
        };

        let (Ok(salt), Ok(key)) = (STANDARD.decode(parts[5]), STANDARD.decode(parts[6])) else {
            return Err(malformed);
        };

        Ok(Self {
            n,
            r,
            p,
            salt: Zeroizing::new(salt),
            key: Zeroizing::new(key),
        })
    }
}
