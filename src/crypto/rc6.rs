// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! RC6-w/20/b block cipher over a generic machine word.
//!
//! A block is four little-endian words `A, B, C, D`. Each of the 20 rounds
//! derives two rotation amounts from `B` and `D` through the quadratic
//! `x·(2x + 1) <<< lg w`, mixes them into `A` and `C` with data-dependent
//! rotations, adds two round keys, and rotates the register file by one.
//!
//! The key schedule expands a key of up to 255 bytes into `2r + 4` round
//! keys seeded from the `P`/`Q` constants of the word type.

use zeroize::Zeroize;

use super::word::Word;

/// Number of rounds.
pub const ROUNDS: usize = 20;

/// Size of the expanded round-key table.
pub const ROUND_KEYS: usize = 2 * ROUNDS + 4;

/// Longest key the schedule accepts.
pub const MAX_KEY_LEN: usize = 255;

/// Upper bound on key words (`MAX_KEY_LEN` split into 32-bit words).
const MAX_KEY_WORDS: usize = (MAX_KEY_LEN + 3) / 4;

/// RC6 with an expanded key. Construct once per key, reuse for any number
/// of blocks.
#[derive(Clone)]
pub struct Rc6<W: Word> {
    s: [W; ROUND_KEYS],
}

impl<W: Word> Rc6<W> {
    /// Run the key schedule.
    ///
    /// Keys longer than [`MAX_KEY_LEN`] are truncated to it.
    pub fn new(key: &[u8]) -> Self {
        let key = &key[..key.len().min(MAX_KEY_LEN)];
        let c = ((key.len() + W::BYTES - 1) / W::BYTES).max(1);

        let mut l = [W::ZERO; MAX_KEY_WORDS];
        for (word, chunk) in l.iter_mut().zip(key.chunks(W::BYTES)) {
            *word = W::load_le(chunk);
        }

        let mut s = [W::ZERO; ROUND_KEYS];
        s[0] = W::P;
        for i in 1..ROUND_KEYS {
            s[i] = s[i - 1].wrapping_add(W::Q);
        }

        let (mut a, mut b) = (W::ZERO, W::ZERO);
        let (mut i, mut j) = (0usize, 0usize);
        for _ in 0..3 * c.max(ROUND_KEYS) {
            a = s[i].wrapping_add(a).wrapping_add(b).rotl(3);
            s[i] = a;
            let ab = a.wrapping_add(b);
            b = l[j].wrapping_add(ab).rotl(ab.low_u32());
            l[j] = b;
            i = (i + 1) % ROUND_KEYS;
            j = (j + 1) % c;
        }

        l.zeroize();
        Self { s }
    }

    /// Encrypt one block in place.
    pub fn encrypt_block(&self, block: &mut W::Block) {
        let s = &self.s;
        let [mut a, mut b, mut c, mut d] = load_block::<W>(block);

        b = b.wrapping_add(s[0]);
        d = d.wrapping_add(s[1]);
        for i in 1..=ROUNDS {
            let t = quadratic(b);
            let u = quadratic(d);
            a = (a ^ t).rotl(u.low_u32()).wrapping_add(s[2 * i]);
            c = (c ^ u).rotl(t.low_u32()).wrapping_add(s[2 * i + 1]);
            (a, b, c, d) = (b, c, d, a);
        }
        a = a.wrapping_add(s[2 * ROUNDS + 2]);
        c = c.wrapping_add(s[2 * ROUNDS + 3]);

        store_block::<W>(block, [a, b, c, d]);
    }

    /// Decrypt one block in place. Exact inverse of [`Rc6::encrypt_block`].
    pub fn decrypt_block(&self, block: &mut W::Block) {
        let s = &self.s;
        let [mut a, mut b, mut c, mut d] = load_block::<W>(block);

        c = c.wrapping_sub(s[2 * ROUNDS + 3]);
        a = a.wrapping_sub(s[2 * ROUNDS + 2]);
        for i in (1..=ROUNDS).rev() {
            (a, b, c, d) = (d, a, b, c);
            let u = quadratic(d);
            let t = quadratic(b);
            c = c.wrapping_sub(s[2 * i + 1]).rotr(t.low_u32()) ^ u;
            a = a.wrapping_sub(s[2 * i]).rotr(u.low_u32()) ^ t;
        }
        d = d.wrapping_sub(s[1]);
        b = b.wrapping_sub(s[0]);

        store_block::<W>(block, [a, b, c, d]);
    }
}

impl<W: Word> Drop for Rc6<W> {
    fn drop(&mut self) {
        self.s.zeroize();
    }
}

/// `(x · (2x + 1)) <<< lg w`
#[inline]
fn quadratic<W: Word>(x: W) -> W {
    x.wrapping_mul(x.wrapping_add(x).wrapping_add(W::ONE)).rotl(W::LG_W)
}

#[inline]
fn load_block<W: Word>(block: &W::Block) -> [W; 4] {
    let bytes = block.as_ref();
    let n = W::BYTES;
    [
        W::load_le(&bytes[..n]),
        W::load_le(&bytes[n..2 * n]),
        W::load_le(&bytes[2 * n..3 * n]),
        W::load_le(&bytes[3 * n..]),
    ]
}

#[inline]
fn store_block<W: Word>(block: &mut W::Block, words: [W; 4]) {
    let bytes = block.as_mut();
    for (word, chunk) in words.iter().zip(bytes.chunks_exact_mut(W::BYTES)) {
        word.store_le(chunk);
    }
}
