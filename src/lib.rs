// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! # dnahide-core
//!
//! Hide arbitrary data in synthetic DNA. Data is Brotli-compressed,
//! optionally sealed with an authenticated cipher, mapped onto codons and
//! wrapped in a GenBank-style flat file.
//!
//! - [`crypto`]: RC6 over 32- or 64-bit words, counter mode (sequential or
//!   rayon-parallel), a POLYVAL-style authenticator and the AEAD built from
//!   them, plus PBKDF2 password derivation.
//! - [`dna`]: codon codec and flat-file rendering/parsing.
//! - [`payload`]: compression framing.
//! - [`pipeline`]: [`hide`] and [`reveal`].
//!
//! # Quick start
//!
//! ```rust
//! use dnahide_core::{hide, reveal, HideOptions, RevealOptions};
//!
//! let hide_opts = HideOptions {
//!     password: Some("passphrase".into()),
//!     aad: b"notebook 12".to_vec(),
//!     ..HideOptions::default()
//! };
//! let flat_file = hide(b"secret message", &hide_opts).unwrap();
//!
//! let reveal_opts = RevealOptions {
//!     password: Some("passphrase".into()),
//!     aad: b"notebook 12".to_vec(),
//!     ..RevealOptions::default()
//! };
//! assert_eq!(reveal(&flat_file, &reveal_opts).unwrap(), b"secret message");
//! ```

pub mod crypto;
pub mod dna;
pub mod error;
pub mod payload;
pub mod pipeline;

pub use crypto::{Aead, Aead128, Aead256, CryptoError, Ctr, Ecb, Polyval, Rc6, Word};
pub use crypto::{MAX_DATA_LEN, NONCE_LEN};
pub use error::DnaHideError;
pub use pipeline::{hide, reveal, HideOptions, RevealOptions};
