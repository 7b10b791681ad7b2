// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! Counter mode.
//!
//! Keystream block `i` is the encryption of the counter seed with its last
//! eight bytes, read as a big-endian `u64`, incremented by `i` (wrapping).
//! Because block `i` depends only on `i`, the key and the seed, the buffer
//! can be cut into disjoint runs that are processed independently; the
//! parallel path does exactly that with rayon and produces byte-identical
//! output.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::ecb::Ecb;
use super::rc6::Rc6;
use super::word::Word;

/// Blocks per rayon work item in [`Ctr::crypt_parallel`].
pub const PARALLEL_CHUNK_BLOCKS: usize = 1024;

/// Bytes of the seed that carry the block counter.
const COUNTER_BYTES: usize = 8;

/// Counter-mode engine over the single-block adapter.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ctr<W: Word> {
    ecb: Ecb<W>,
}

impl<W: Word> Ctr<W> {
    pub fn new(ecb: Ecb<W>) -> Self {
        Self { ecb }
    }

    /// XOR `data` with the keystream, one block at a time, in order.
    ///
    /// `data` is normally a block multiple; a trailing partial block uses
    /// the prefix of its keystream block. Applying the same call twice
    /// restores the input.
    pub fn crypt(&self, data: &mut [u8], key: &[u8], counter_seed: &W::Block) {
        let cipher = Rc6::<W>::new(key);
        self.apply_keystream(&cipher, data, counter_seed, 0);
    }

    /// Same transform as [`Ctr::crypt`], computed over independent runs of
    /// [`PARALLEL_CHUNK_BLOCKS`] blocks on the rayon pool.
    ///
    /// Without the `parallel` feature this is the sequential path.
    pub fn crypt_parallel(&self, data: &mut [u8], key: &[u8], counter_seed: &W::Block) {
        let cipher = Rc6::<W>::new(key);

        #[cfg(feature = "parallel")]
        data.par_chunks_mut(PARALLEL_CHUNK_BLOCKS * W::block_len())
            .enumerate()
            .for_each(|(run, chunk)| {
                let first = (run * PARALLEL_CHUNK_BLOCKS) as u64;
                self.apply_keystream(&cipher, chunk, counter_seed, first);
            });
        #[cfg(not(feature = "parallel"))]
        self.apply_keystream(&cipher, data, counter_seed, 0);
    }

    fn apply_keystream(&self, cipher: &Rc6<W>, data: &mut [u8], seed: &W::Block, first_block: u64) {
        for (i, chunk) in data.chunks_mut(W::block_len()).enumerate() {
            let mut keystream = counter_block::<W>(seed, first_block.wrapping_add(i as u64));
            self.ecb.encrypt_with(cipher, &mut keystream);
            for (byte, k) in chunk.iter_mut().zip(keystream.as_ref()) {
                *byte ^= k;
            }
        }
    }
}

/// Counter block for block index `index`: the seed with its trailing
/// big-endian `u64` advanced by `index`.
pub fn counter_block<W: Word>(seed: &W::Block, index: u64) -> W::Block {
    let mut block = *seed;
    let bytes = block.as_mut();
    let tail = bytes.len() - COUNTER_BYTES;
    let mut counter = [0u8; COUNTER_BYTES];
    counter.copy_from_slice(&bytes[tail..]);
    let next = u64::from_be_bytes(counter).wrapping_add(index);
    bytes[tail..].copy_from_slice(&next.to_be_bytes());
    block
}
