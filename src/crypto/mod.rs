// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! Cipher stack: RC6 over a generic word, single-block and counter modes,
//! a POLYVAL-style authenticator, and the AEAD that ties them together.
//!
//! Dependency order, leaves first:
//!
//! - [`word`]: the `u32`/`u64` parameterisation.
//! - [`rc6`]: key schedule and block transform.
//! - [`ecb`]: one block under a raw key.
//! - [`ctr`]: counter-mode keystream, sequential or rayon-parallel.
//! - [`polyval`]: polynomial hash over GF(2^128) / GF(2^256).
//! - [`padding`]: block alignment helpers.
//! - [`aead`]: key derivation, tag, seal and open.
//! - [`kdf`]: PBKDF2-HMAC-SHA256 for password-derived keys.

pub mod aead;
pub mod ctr;
pub mod ecb;
pub mod error;
pub mod kdf;
pub mod padding;
pub mod polyval;
pub mod rc6;
pub mod word;

pub use aead::{Aead, MAX_DATA_LEN, NONCE_LEN};
pub use ctr::Ctr;
pub use ecb::Ecb;
pub use error::CryptoError;
pub use polyval::Polyval;
pub use rc6::Rc6;
pub use word::Word;

/// AEAD with 32-bit words and 128-bit blocks, as used by the pipeline.
pub type Aead128<'k> = Aead<'k, u32>;

/// AEAD with 64-bit words and 256-bit blocks.
pub type Aead256<'k> = Aead<'k, u64>;
