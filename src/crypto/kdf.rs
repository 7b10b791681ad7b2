// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! Password-based derivation of the key generating key.
//!
//! PBKDF2-HMAC-SHA256 (RFC 8018 §5.2). The password doubles as the salt so
//! that a flat file can be opened with the password alone; nothing about
//! the derivation is stored next to the sequence.

use sha2::Sha256;
use zeroize::Zeroizing;

/// PBKDF2 iteration count used for the key generating key.
pub const KDF_ITERATIONS: u32 = 15_000;

/// Length of the derived key generating key.
pub const KGK_LEN: usize = 32;

/// Fill `out` with PBKDF2-HMAC-SHA256(password, salt, iterations).
///
/// Cannot fail. An iteration count of zero is treated as one.
pub fn pbkdf2_hmac_sha256(password: &[u8], salt: &[u8], iterations: u32, out: &mut [u8]) {
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations.max(1), out);
}

/// Derive the 32-byte key generating key for `password`.
pub fn derive_kgk(password: &str) -> Zeroizing<[u8; KGK_LEN]> {
    derive_kgk_with(password, KDF_ITERATIONS)
}

/// [`derive_kgk`] with an explicit iteration count.
pub fn derive_kgk_with(password: &str, iterations: u32) -> Zeroizing<[u8; KGK_LEN]> {
    let mut kgk = Zeroizing::new([0u8; KGK_LEN]);
    let bytes = password.as_bytes();
    pbkdf2_hmac_sha256(bytes, bytes, iterations, &mut *kgk);
    kgk
}
