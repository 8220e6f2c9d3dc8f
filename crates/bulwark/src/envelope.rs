// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! ProtectedAes - Encrypt-then-MAC envelope over AES-256-CBC and keyed BLAKE2b.
//!
//! Wire format, base64 (standard alphabet, padded):
//!
//! ```text
//! [ IV: 16 ][ ciphertext: 16 * k, k >= 1 ][ MAC: 64 ]
//! ```
//!
//! Key derivation from the caller's raw key:
//!
//! ```text
//! padded   = BLAKE2b-512(raw_key)
//! aes_key  = BLAKE2b-256(padded ^ 0x36..)
//! hmac_key = BLAKE2b-512(padded ^ 0x5c..)
//! MAC      = BLAKE2b-512(key = hmac_key, IV || ciphertext)
//! ```
//!
//! The MAC is verified in constant time before anything is decrypted or
//! unpadded.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use zeroize::{Zeroize, Zeroizing};

use bulwark_aes::{AesState, BLOCK_SIZE, KEY_SIZE, pkcs7};
use bulwark_buffer::{BufferError, SecureBuffer};
use bulwark_hash::{BLAKE2B_MAX_LEN, Blake2b, Blake2bState, HashError};
use bulwark_rand::{EntropySource, SystemEntropySource};
use bulwark_util::constant_time_eq;

use crate::error::Error;

const IV_LEN: usize = BLOCK_SIZE;
const MAC_LEN: usize = Blake2b::MAC_LEN;
const MIN_ENVELOPE_LEN: usize = IV_LEN + BLOCK_SIZE + MAC_LEN;

const INNER_PAD: u8 = 0x36;
const OUTER_PAD: u8 = 0x5c;

/// Authenticated AES-256 envelope with an injected IV source.
///
/// Decryption reports every problem with the envelope itself (bad base64,
/// wrong length, MAC mismatch, bad padding) as
/// [`Error::AuthenticationFailure`], whatever the cause.
///
/// # Example
///
/// ```rust
/// use bulwark::{Error, ProtectedAes, SecureBuffer};
///
/// fn example() -> Result<(), Error> {
///     let aes = ProtectedAes::new();
///     let mut key = SecureBuffer::from_slice(b"correct horse battery staple")?;
///
///     let envelope = aes.encrypt(&mut key, "attack at dawn")?;
///     let plaintext = aes.decrypt(&mut key, &envelope)?;
///
///     assert_eq!(plaintext.as_str(), "attack at dawn");
///     Ok(())
/// }
/// # example().unwrap();
/// ```
#[derive(Debug)]
pub struct ProtectedAes<E: EntropySource = SystemEntropySource> {
    entropy: E,
}

impl Default for ProtectedAes<SystemEntropySource> {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtectedAes<SystemEntropySource> {
    /// Envelope drawing IVs from the system CSPRNG.
    pub fn new() -> Self {
        Self::with_entropy(SystemEntropySource {})
    }
}

impl<E: EntropySource> ProtectedAes<E> {
    /// Envelope drawing IVs from `entropy`.
    pub fn with_entropy(entropy: E) -> Self {
        Self { entropy }
    }

    /// Encrypts the content of `plaintext` under `key` into a base64 envelope.
    ///
    /// `plaintext` is only read; both buffers are locked again on return.
    pub fn encrypt_protected(
        &self,
        key: &mut SecureBuffer,
        plaintext: &mut SecureBuffer,
    ) -> Result<String, Error> {
        let mut keys = EnvelopeKeys::derive(key)?;

        let mut iv = [0u8; IV_LEN];
        self.entropy.fill_bytes(&mut iv)?;

        let len = plaintext.len();
        let mut data = SecureBuffer::allocate(pkcs7::padded_len(len))?;
        data.set_content_length(0)?;
        plaintext.copy_to(0, &mut data, 0, len)?;
        pkcs7::apply(&mut data)?;

        AesState::new(&mut keys.cipher, iv)?.encrypt_cbc(&mut data)?;

        let mut envelope = Vec::with_capacity(IV_LEN + data.len() + MAC_LEN);
        envelope.extend_from_slice(&iv);
        data.open(|ciphertext| {
            envelope.extend_from_slice(ciphertext);
            Ok::<(), BufferError>(())
        })?;

        let mac = Blake2b::default().compute_mac(&mut keys.mac, &envelope)?;
        envelope.extend_from_slice(&mac);

        tracing::debug!(
            plaintext_len = len,
            envelope_len = envelope.len(),
            "sealed envelope"
        );

        Ok(STANDARD.encode(&envelope))
    }

    /// Authenticates and decrypts `envelope` into a new protected buffer.
    ///
    /// Errors unrelated to the envelope content (a freed key, allocation
    /// failures) are reported as such.
    pub fn decrypt_protected(
        &self,
        key: &mut SecureBuffer,
        envelope: &str,
    ) -> Result<SecureBuffer, Error> {
        let result = open_envelope(key, envelope);

        if let Err(Error::AuthenticationFailure) = result {
            tracing::warn!(envelope_len = envelope.len(), "envelope rejected");
        }

        result
    }

    /// Encrypts a plain string. See [`encrypt_protected`](Self::encrypt_protected).
    pub fn encrypt(&self, key: &mut SecureBuffer, plaintext: &str) -> Result<String, Error> {
        let mut buffer = SecureBuffer::from_slice(plaintext.as_bytes())?;
        self.encrypt_protected(key, &mut buffer)
    }

    /// Decrypts an envelope holding UTF-8 text.
    ///
    /// The returned string is zeroized on drop. A plaintext that is not UTF-8
    /// fails with [`Error::InvalidArgument`].
    pub fn decrypt(&self, key: &mut SecureBuffer, envelope: &str) -> Result<Zeroizing<String>, Error> {
        let mut plaintext = self.decrypt_protected(key, envelope)?;
        let bytes = plaintext.read(0, plaintext.len())?;

        String::from_utf8(bytes.to_vec())
            .map(Zeroizing::new)
            .map_err(|error| {
                error.into_bytes().zeroize();
                Error::InvalidArgument
            })
    }
}

fn open_envelope(key: &mut SecureBuffer, envelope: &str) -> Result<SecureBuffer, Error> {
    let decoded = Zeroizing::new(
        STANDARD
            .decode(envelope)
            .map_err(|_| Error::AuthenticationFailure)?,
    );

    if decoded.len() < MIN_ENVELOPE_LEN || (decoded.len() - IV_LEN - MAC_LEN) % BLOCK_SIZE != 0 {
        return Err(Error::AuthenticationFailure);
    }

    let (authenticated, mac) = decoded.split_at(decoded.len() - MAC_LEN);
    let (iv, ciphertext) = authenticated.split_at(IV_LEN);

    let mut keys = EnvelopeKeys::derive(key)?;
    let expected = Blake2b::default().compute_mac(&mut keys.mac, authenticated)?;

    if !constant_time_eq(&expected, mac) {
        return Err(Error::AuthenticationFailure);
    }

    let iv: [u8; IV_LEN] = iv.try_into().map_err(|_| Error::AuthenticationFailure)?;
    let mut data = SecureBuffer::from_slice(ciphertext)?;

    AesState::new(&mut keys.cipher, iv)?.decrypt_cbc(&mut data)?;
    pkcs7::remove(&mut data).map_err(|_| Error::AuthenticationFailure)?;

    tracing::debug!(
        envelope_len = decoded.len(),
        plaintext_len = data.len(),
        "opened envelope"
    );

    Ok(data)
}

/// Domain-separated subkeys of one raw key.
struct EnvelopeKeys {
    cipher: SecureBuffer,
    mac: SecureBuffer,
}

impl EnvelopeKeys {
    fn derive(key: &mut SecureBuffer) -> Result<Self, Error> {
        let mut padded = SecureBuffer::allocate(BLAKE2B_MAX_LEN)?;

        {
            let mut access = padded.access()?;
            let out = access.content_mut();

            key.open(|raw| {
                if raw.is_empty() {
                    return Err(HashError::InvalidArgument("envelope key must not be empty"));
                }

                Blake2bState::digest(out, None, raw)
            })?;
        }

        let cipher = subkey(&mut padded, INNER_PAD, KEY_SIZE)?;
        let mac = subkey(&mut padded, OUTER_PAD, BLAKE2B_MAX_LEN)?;

        padded.free();

        Ok(Self { cipher, mac })
    }
}

/// `BLAKE2b-len(padded ^ pad)`, with the masked copy kept in a locked buffer.
fn subkey(padded: &mut SecureBuffer, pad: u8, len: usize) -> Result<SecureBuffer, Error> {
    let mut masked = SecureBuffer::allocate(padded.len())?;

    {
        let mut access = masked.access()?;
        let masked_bytes = access.content_mut();

        padded.open(|bytes| {
            for (m, b) in masked_bytes.iter_mut().zip(bytes.iter()) {
                *m = b ^ pad;
            }
            Ok::<(), BufferError>(())
        })?;
    }

    let mut out = SecureBuffer::allocate(len)?;

    {
        let mut access = out.access()?;
        let digest = access.content_mut();

        masked.open(|bytes| Blake2bState::digest(digest, None, bytes))?;
    }

    masked.free();

    Ok(out)
}
