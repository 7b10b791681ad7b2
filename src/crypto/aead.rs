// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! Authenticated encryption with associated data.
//!
//! A GCM-SIV-shaped construction over RC6, POLYVAL and counter mode:
//!
//! 1. **Key derivation.** For every message, counter blocks
//!    `ctr ‖ nonce ‖ 0*` (counter as one little-endian word) are encrypted
//!    under the key generating key. The first 8 bytes of blocks 0-1 form the
//!    16-byte authentication key; blocks 2-3 (and 4-5 for a 32-byte KGK)
//!    form the encryption key.
//! 2. **Tag.** POLYVAL over the zero-padded AAD, the zero-padded plaintext
//!    and a length block (padded bit lengths of AAD and plaintext, each a
//!    little-endian `u64` in its half of the block). The first 12 bytes are
//!    XORed with the nonce, the top bit of the last byte is cleared, and the
//!    result is encrypted under the encryption key.
//! 3. **Encryption.** Counter mode under the encryption key, seeded with the
//!    tag, over the padded plaintext; the padding is then trimmed.
//!
//! The sealed envelope is:
//!
//! ```text
//! [12 bytes] nonce
//! [N bytes ] ciphertext (N = plaintext length)
//! [B bytes ] tag (one cipher block: 16 bytes for u32 words, 32 for u64)
//! ```
//!
//! Opening recomputes the tag over the decrypted data and compares in
//! constant time. On mismatch the decrypted buffer is wiped and only
//! [`CryptoError::AuthenticationFailed`] is returned.

use core::fmt;
use core::marker::PhantomData;

use rand::RngCore;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use super::ctr::Ctr;
use super::ecb::Ecb;
use super::error::CryptoError;
use super::padding::{pad_to_block_size, write_le_u64};
use super::polyval::Polyval;
use super::rc6::Rc6;
use super::word::Word;

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Ceiling for plaintext and AAD: 2^36 bytes (64 GiB).
pub const MAX_DATA_LEN: u64 = 1 << 36;

/// Accepted key generating key lengths.
pub const KGK_LENS: [usize; 2] = [16, 32];

/// Bytes taken from each encrypted key counter block.
const KEY_CTR_BYTES: usize = 8;

/// Per-message keys derived from (KGK, nonce).
struct MessageKeys {
    authentication: Zeroizing<Vec<u8>>,
    encryption: Zeroizing<Vec<u8>>,
}

/// AEAD keyed by a borrowed key generating key.
pub struct Aead<'k, W: Word> {
    kgk: &'k [u8],
    parallel: bool,
    _word: PhantomData<W>,
}

impl<W: Word> fmt::Debug for Aead<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aead")
            .field("kgk_len", &self.kgk.len())
            .field("block_len", &W::block_len())
            .field("parallel", &self.parallel)
            .finish()
    }
}

impl<'k, W: Word> Aead<'k, W> {
    /// Create an AEAD over `kgk`, which must be 16 or 32 bytes.
    pub fn new(kgk: &'k [u8]) -> Result<Self, CryptoError> {
        if !KGK_LENS.contains(&kgk.len()) {
            return Err(CryptoError::InvalidKeyLength { got: kgk.len() });
        }
        Ok(Self { kgk, parallel: true, _word: PhantomData })
    }

    /// Select the rayon keystream path (default) or the sequential one.
    /// Output is identical either way.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Tag length in bytes (one cipher block).
    pub fn tag_len(&self) -> usize {
        W::block_len()
    }

    /// Seal under a fresh random nonce. Returns `nonce ‖ ciphertext ‖ tag`.
    pub fn seal(&self, plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);
        self.seal_with_nonce(plaintext, aad, &nonce)
    }

    /// Seal under a caller-supplied nonce. Returns `nonce ‖ ciphertext ‖ tag`.
    ///
    /// Deterministic: the same (KGK, nonce, plaintext, AAD) always gives the
    /// same envelope. Never reuse a nonce under one KGK.
    pub fn seal_with_nonce(
        &self,
        plaintext: &[u8],
        aad: &[u8],
        nonce: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let (ciphertext, tag) = self.encrypt_detached(nonce, aad, plaintext)?;
        let mut envelope = Vec::with_capacity(NONCE_LEN + ciphertext.len() + self.tag_len());
        envelope.extend_from_slice(nonce);
        envelope.extend_from_slice(&ciphertext);
        envelope.extend_from_slice(tag.as_ref());
        Ok(envelope)
    }

    /// Open `nonce ‖ ciphertext ‖ tag`.
    pub fn open(&self, envelope: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let min = NONCE_LEN + self.tag_len();
        if envelope.len() < min {
            return Err(CryptoError::MalformedEnvelope { got: envelope.len(), min });
        }
        let (nonce, sealed) = envelope.split_at(NONCE_LEN);
        self.open_with_nonce(sealed, aad, nonce)
    }

    /// Open `ciphertext ‖ tag` whose nonce travelled out of band.
    pub fn open_with_nonce(
        &self,
        sealed: &[u8],
        aad: &[u8],
        nonce: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let tag_len = self.tag_len();
        if sealed.len() < tag_len {
            return Err(CryptoError::MalformedEnvelope { got: sealed.len(), min: tag_len });
        }
        let (ciphertext, tag_bytes) = sealed.split_at(sealed.len() - tag_len);
        let mut tag = W::Block::default();
        tag.as_mut().copy_from_slice(tag_bytes);
        self.decrypt_detached(nonce, aad, ciphertext, &tag)
    }

    /// Encrypt and return the ciphertext and the tag separately.
    pub fn encrypt_detached(
        &self,
        nonce: &[u8],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<(Vec<u8>, W::Block), CryptoError> {
        validate(nonce, plaintext.len(), aad.len())?;
        let keys = self.derive_keys(nonce);

        let mut buffer = plaintext.to_vec();
        let pad_len = pad_to_block_size(&mut buffer, W::block_len());
        let mut aad = aad.to_vec();
        pad_to_block_size(&mut aad, W::block_len());

        let tag = self.compute_tag(&keys, &buffer, &aad, nonce);
        self.apply_keystream(&mut buffer, &keys.encryption, &tag);
        buffer.truncate(buffer.len() - pad_len);

        Ok((buffer, tag))
    }

    /// Decrypt and verify. Plaintext is only returned when the tag matches.
    pub fn decrypt_detached(
        &self,
        nonce: &[u8],
        aad: &[u8],
        ciphertext: &[u8],
        tag: &W::Block,
    ) -> Result<Vec<u8>, CryptoError> {
        validate(nonce, ciphertext.len(), aad.len())?;

        let mut buffer = ciphertext.to_vec();
        let pad_len = pad_to_block_size(&mut buffer, W::block_len());
        let mut aad = aad.to_vec();
        pad_to_block_size(&mut aad, W::block_len());

        let keys = self.derive_keys(nonce);
        self.apply_keystream(&mut buffer, &keys.encryption, tag);

        // The keystream also covered the padding; restore the zeros the
        // tag was computed over.
        let data_len = buffer.len() - pad_len;
        buffer[data_len..].fill(0);

        let expected = self.compute_tag(&keys, &buffer, &aad, nonce);
        if !bool::from(expected.as_ref().ct_eq(tag.as_ref())) {
            buffer.zeroize();
            tracing::debug!(len = ciphertext.len(), "AEAD tag mismatch");
            return Err(CryptoError::AuthenticationFailed);
        }

        buffer.truncate(data_len);
        Ok(buffer)
    }

    /// Derive the message authentication and encryption keys for `nonce`.
    fn derive_keys(&self, nonce: &[u8]) -> MessageKeys {
        let cipher = Rc6::<W>::new(self.kgk);
        let counters: u32 = if self.kgk.len() == 32 { 6 } else { 4 };
        let mut authentication = Zeroizing::new(Vec::with_capacity(2 * KEY_CTR_BYTES));
        let mut encryption =
            Zeroizing::new(Vec::with_capacity((counters as usize - 2) * KEY_CTR_BYTES));

        for ctr in 0..counters {
            let mut block = W::Block::default();
            {
                let bytes = block.as_mut();
                W::from_u32(ctr).store_le(&mut bytes[..W::BYTES]);
                bytes[W::BYTES..W::BYTES + NONCE_LEN].copy_from_slice(nonce);
            }
            cipher.encrypt_block(&mut block);

            let key = if ctr < 2 { &mut authentication } else { &mut encryption };
            key.extend_from_slice(&block.as_ref()[..KEY_CTR_BYTES]);
            block.zeroize();
        }

        MessageKeys { authentication, encryption }
    }

    /// Tag over block-aligned `plaintext` and `aad`.
    fn compute_tag(&self, keys: &MessageKeys, plaintext: &[u8], aad: &[u8], nonce: &[u8]) -> W::Block {
        let block_len = W::block_len();
        let mut length_block = W::Block::default();
        write_le_u64(length_block.as_mut(), 0, aad.len() as u64 * 8);
        write_le_u64(length_block.as_mut(), block_len / 2, plaintext.len() as u64 * 8);

        let mut authenticator = Polyval::<W>::new(&keys.authentication);
        authenticator.update(aad);
        authenticator.update(plaintext);
        authenticator.update(length_block.as_ref());
        let mut tag = authenticator.digest();

        let bytes = tag.as_mut();
        for (t, n) in bytes.iter_mut().zip(nonce) {
            *t ^= n;
        }
        bytes[block_len - 1] &= 0x7f;

        Ecb::<W>::new().encrypt(&mut tag, &keys.encryption);
        tag
    }

    fn apply_keystream(&self, buffer: &mut [u8], key: &[u8], seed: &W::Block) {
        let ctr = Ctr::new(Ecb::<W>::new());
        if self.parallel {
            ctr.crypt_parallel(buffer, key, seed);
        } else {
            ctr.crypt(buffer, key, seed);
        }
    }
}

/// Configuration and size checks, run before any key material is touched.
fn validate(nonce: &[u8], data_len: usize, aad_len: usize) -> Result<(), CryptoError> {
    if nonce.len() != NONCE_LEN {
        return Err(CryptoError::InvalidNonceLength { got: nonce.len() });
    }
    if data_len as u64 > MAX_DATA_LEN {
        return Err(CryptoError::PlaintextTooLarge { got: data_len });
    }
    if aad_len as u64 > MAX_DATA_LEN {
        return Err(CryptoError::AadTooLarge { got: aad_len });
    }
    Ok(())
}
