// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! Hide/reveal pipeline.
//!
//! ```text
//! hide:   data ─▶ compress ─▶ [seal] ─▶ codon encode ─▶ flat file
//! reveal: flat file ─▶ parse ─▶ codon decode ─▶ [open] ─▶ decompress ─▶ data
//! ```
//!
//! The bracketed stages run only when a password is given. The key
//! generating key is derived from the password with PBKDF2 and the data is
//! sealed with the 128-bit block AEAD. Without a password the sequence is
//! only compressed and encoded, which hides the data but does not protect it.

use rand::rngs::OsRng;

use crate::crypto::kdf::derive_kgk;
use crate::crypto::Aead128;
use crate::dna::{codon, genbank};
use crate::error::DnaHideError;
use crate::payload::{self, DEFAULT_OUTPUT_LIMIT};

/// Settings for [`hide`].
#[derive(Clone, Default)]
pub struct HideOptions {
    /// Encrypt under a key derived from this password. `None` or an empty
    /// string skips encryption.
    pub password: Option<String>,
    /// Additional authenticated data bound to the ciphertext.
    pub aad: Vec<u8>,
    /// Use the sequential keystream path instead of the parallel one.
    pub sequential: bool,
    /// Fixed accession number for the flat file; random if `None`.
    pub accession: Option<u32>,
}

/// Settings for [`reveal`].
#[derive(Clone)]
pub struct RevealOptions {
    /// Password the data was hidden with, if any.
    pub password: Option<String>,
    /// Additional authenticated data the data was hidden with.
    pub aad: Vec<u8>,
    /// Use the sequential keystream path instead of the parallel one.
    pub sequential: bool,
    /// Largest decompressed output accepted.
    pub max_output_len: usize,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            password: None,
            aad: Vec::new(),
            sequential: false,
            max_output_len: DEFAULT_OUTPUT_LIMIT,
        }
    }
}

// Keep passwords out of logs and panic messages.
impl std::fmt::Debug for HideOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HideOptions")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("aad_len", &self.aad.len())
            .field("sequential", &self.sequential)
            .field("accession", &self.accession)
            .finish()
    }
}

impl std::fmt::Debug for RevealOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealOptions")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("aad_len", &self.aad.len())
            .field("sequential", &self.sequential)
            .field("max_output_len", &self.max_output_len)
            .finish()
    }
}

fn effective_password(password: &Option<String>) -> Option<&str> {
    password.as_deref().filter(|p| !p.is_empty())
}

/// Hide `data` in a GenBank-style flat file.
///
/// # Errors
/// - [`DnaHideError::Crypto`] if the compressed data or the AAD exceeds the
///   AEAD size limit.
pub fn hide(data: &[u8], options: &HideOptions) -> Result<String, DnaHideError> {
    tracing::info!(bytes = data.len(), "compressing");
    let mut body = payload::compress(data);
    tracing::debug!(compressed = body.len(), "compressed");

    if let Some(password) = effective_password(&options.password) {
        tracing::info!("encrypting");
        let kgk = derive_kgk(password);
        let aead = Aead128::new(&kgk[..])?.with_parallel(!options.sequential);
        body = aead.seal(&body, &options.aad)?;
    }

    tracing::info!("encoding DNA");
    let dna = codon::encode(&body);
    let accession = options.accession.unwrap_or_else(|| genbank::random_accession(&mut OsRng));
    tracing::debug!(bases = dna.len(), accession, "rendering flat file");
    Ok(genbank::render(&dna, accession))
}

/// Recover the data hidden in a flat file by [`hide`].
///
/// # Errors
/// - [`DnaHideError::MissingOrigin`] / [`DnaHideError::InvalidFlatFile`] if
///   the flat file cannot be read.
/// - [`DnaHideError::InvalidBase`] / [`DnaHideError::TruncatedSequence`] if
///   the sequence is damaged.
/// - [`DnaHideError::Crypto`] on a wrong password or AAD.
/// - [`DnaHideError::PayloadCorrupted`] / [`DnaHideError::OutputTooLarge`]
///   if decompression fails.
pub fn reveal(text: &str, options: &RevealOptions) -> Result<Vec<u8>, DnaHideError> {
    tracing::info!("decoding DNA");
    let dna = genbank::parse(text)?;
    let mut body = codon::decode(&dna)?;

    if let Some(password) = effective_password(&options.password) {
        tracing::info!("decrypting");
        let kgk = derive_kgk(password);
        let aead = Aead128::new(&kgk[..])?.with_parallel(!options.sequential);
        body = aead.open(&body, &options.aad)?;
    }

    tracing::info!(bytes = body.len(), "decompressing");
    payload::decompress(&body, options.max_output_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::CryptoError;

    fn with_password(password: &str, aad: &[u8]) -> (HideOptions, RevealOptions) {
        let hide = HideOptions {
            password: Some(password.into()),
            aad: aad.to_vec(),
            accession: Some(1234),
            ..HideOptions::default()
        };
        let reveal = RevealOptions {
            password: Some(password.into()),
            aad: aad.to_vec(),
            ..RevealOptions::default()
        };
        (hide, reveal)
    }

    #[test]
    fn plain_roundtrip() {
        let data = b"GATTACA is not a real gene.";
        let text = hide(data, &HideOptions::default()).unwrap();
        assert!(text.starts_with("LOCUS"));
        assert_eq!(reveal(&text, &RevealOptions::default()).unwrap(), data);
    }

    #[test]
    fn password_roundtrip() {
        let (h, r) = with_password("hunter2", b"lab notebook 7");
        let data = "Sequence me. ".repeat(100);
        let text = hide(data.as_bytes(), &h).unwrap();
        assert!(text.contains("GXP_1234"));
        assert_eq!(reveal(&text, &r).unwrap(), data.as_bytes());
    }

    #[test]
    fn wrong_password_fails_authentication() {
        let (h, _) = with_password("right", b"aad");
        let (_, r) = with_password("wrong", b"aad");
        let text = hide(b"secret", &h).unwrap();
        let err = reveal(&text, &r).unwrap_err();
        assert!(err.is_authentication_failure(), "{err}");
    }

    #[test]
    fn wrong_aad_fails_authentication() {
        let (h, _) = with_password("pw", b"aad-1");
        let (_, r) = with_password("pw", b"aad-2");
        let text = hide(b"secret", &h).unwrap();
        assert!(matches!(
            reveal(&text, &r),
            Err(DnaHideError::Crypto(CryptoError::AuthenticationFailed))
        ));
    }

    #[test]
    fn empty_password_means_plain() {
        let h = HideOptions { password: Some(String::new()), ..HideOptions::default() };
        let text = hide(b"abc", &h).unwrap();
        assert_eq!(reveal(&text, &RevealOptions::default()).unwrap(), b"abc");
    }

    #[test]
    fn empty_input_roundtrip() {
        let (h, r) = with_password("pw", b"x");
        let text = hide(b"", &h).unwrap();
        assert!(reveal(&text, &r).unwrap().is_empty());

        let text = hide(b"", &HideOptions::default()).unwrap();
        assert!(reveal(&text, &RevealOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn sequential_and_parallel_interoperate() {
        let (mut h, mut r) = with_password("pw", b"aad");
        h.sequential = true;
        r.sequential = false;
        let data: Vec<u8> = (0..50_000u32).map(|i| (i.wrapping_mul(2654435761) >> 24) as u8).collect();
        let text = hide(&data, &h).unwrap();
        assert_eq!(reveal(&text, &r).unwrap(), data);
    }

    #[test]
    fn output_limit_applies() {
        let data = vec![b'z'; 5000];
        let text = hide(&data, &HideOptions::default()).unwrap();
        let r = RevealOptions { max_output_len: 100, ..RevealOptions::default() };
        assert!(matches!(reveal(&text, &r), Err(DnaHideError::OutputTooLarge { limit: 100 })));
    }

    #[test]
    fn debug_redacts_password() {
        let (h, r) = with_password("topsecret", b"aad");
        assert!(!format!("{h:?}").contains("topsecret"));
        assert!(!format!("{r:?}").contains("topsecret"));
    }
}
