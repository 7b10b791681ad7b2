// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! Error type for the cipher stack.

use thiserror::Error;

/// Failures reported by the AEAD and the single-block adapter.
///
/// Configuration and size errors are raised before any cryptographic work;
/// [`CryptoError::AuthenticationFailed`] is raised after decryption, and the
/// decrypted buffer is wiped before it is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Key generating key is neither 16 nor 32 bytes.
    #[error("key generating key must be 16 or 32 bytes, got {got}")]
    InvalidKeyLength { got: usize },
    /// Nonce is not 12 bytes.
    #[error("nonce must be 12 bytes, got {got}")]
    InvalidNonceLength { got: usize },
    /// Plaintext (or ciphertext) exceeds the 64 GiB ceiling.
    #[error("plaintext must be at most 64 GiB, got {got} bytes")]
    PlaintextTooLarge { got: usize },
    /// Additional authenticated data exceeds the 64 GiB ceiling.
    #[error("authenticated data must be at most 64 GiB, got {got} bytes")]
    AadTooLarge { got: usize },
    /// Envelope too short to hold a nonce and a tag.
    #[error("sealed data must be at least {min} bytes, got {got}")]
    MalformedEnvelope { got: usize, min: usize },
    /// Single-block call with a buffer of the wrong size.
    #[error("block must be {expected} bytes, got {got}")]
    InvalidBlockLength { got: usize, expected: usize },
    /// Tag mismatch: wrong key, wrong AAD, or tampered data.
    #[error("AEAD authentication failed")]
    AuthenticationFailed,
}
