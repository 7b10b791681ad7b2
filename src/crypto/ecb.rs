// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! Single-block mode: one block in, one block out, under a raw key.
//!
//! Used for tag encryption and as the keystream primitive of the counter
//! engine. The keyed entry points expand the key on every call; callers
//! that encrypt many blocks under one key hold an [`Rc6`] and use
//! [`Ecb::encrypt_with`].

use core::marker::PhantomData;

use super::error::CryptoError;
use super::rc6::Rc6;
use super::word::Word;

/// Stateless single-block adapter over [`Rc6`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Ecb<W: Word> {
    _word: PhantomData<W>,
}

impl<W: Word> Ecb<W> {
    pub fn new() -> Self {
        Self { _word: PhantomData }
    }

    /// Encrypt one block in place under `key`.
    pub fn encrypt(&self, block: &mut W::Block, key: &[u8]) {
        Rc6::<W>::new(key).encrypt_block(block);
    }

    /// Decrypt one block in place under `key`.
    pub fn decrypt(&self, block: &mut W::Block, key: &[u8]) {
        Rc6::<W>::new(key).decrypt_block(block);
    }

    /// Encrypt one block with an already expanded key.
    #[inline]
    pub fn encrypt_with(&self, cipher: &Rc6<W>, block: &mut W::Block) {
        cipher.encrypt_block(block);
    }

    /// Encrypt an untyped buffer that must be exactly one block long.
    pub fn encrypt_slice(&self, data: &mut [u8], key: &[u8]) -> Result<(), CryptoError> {
        let mut block = to_block::<W>(data)?;
        self.encrypt(&mut block, key);
        data.copy_from_slice(block.as_ref());
        Ok(())
    }

    /// Decrypt an untyped buffer that must be exactly one block long.
    pub fn decrypt_slice(&self, data: &mut [u8], key: &[u8]) -> Result<(), CryptoError> {
        let mut block = to_block::<W>(data)?;
        self.decrypt(&mut block, key);
        data.copy_from_slice(block.as_ref());
        Ok(())
    }
}

fn to_block<W: Word>(data: &[u8]) -> Result<W::Block, CryptoError> {
    let expected = W::block_len();
    if data.len() != expected {
        return Err(CryptoError::InvalidBlockLength { got: data.len(), expected });
    }
    let mut block = W::Block::default();
    block.as_mut().copy_from_slice(data);
    Ok(block)
}
