// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! Error types for the hide/reveal pipeline.
//!
//! [`DnaHideError`] covers all failure modes from flat-file parsing through
//! decryption and decompression.

use thiserror::Error;

use crate::crypto::CryptoError;

/// Errors that can occur while hiding or revealing data.
#[derive(Debug, Error)]
pub enum DnaHideError {
    /// Encryption or authentication failed (wrong password, wrong AAD,
    /// or a damaged sequence).
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    /// The sequence contains something other than A, C, G or T.
    #[error("invalid base {found:?} at position {position}")]
    InvalidBase { position: usize, found: char },
    /// The sequence does not end on a whole symbol group.
    #[error("DNA sequence of {bases} bases is truncated")]
    TruncatedSequence { bases: usize },
    /// No `ORIGIN` record in the flat file.
    #[error("flat file has no ORIGIN record")]
    MissingOrigin,
    /// Unexpected character in the sequence section of the flat file.
    #[error("invalid flat file: unexpected {found:?} on line {line}")]
    InvalidFlatFile { line: usize, found: char },
    /// Unknown compression flags or a damaged compressed stream.
    #[error("payload is corrupted")]
    PayloadCorrupted,
    /// Decompressed output exceeds the configured limit.
    #[error("decompressed payload exceeds {limit} bytes")]
    OutputTooLarge { limit: usize },
}

impl DnaHideError {
    /// `true` when the failure means the password or AAD was wrong (or the
    /// sequence was altered after sealing).
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::Crypto(CryptoError::AuthenticationFailed))
    }
}
