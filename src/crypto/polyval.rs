// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! POLYVAL-style universal hash over a binary field.
//!
//! Input blocks `X_1..X_n` are folded into the accumulator as
//! `S_j = dot(S_{j-1} ⊕ X_j, H)` where `dot(a, b) = a · b · x^-n`
//! (RFC 8452 §3). Blocks are read as little-endian polynomials: bit 0 of
//! byte 0 is the coefficient of `x^0`.
//!
//! The 128-bit field is POLYVAL's `x^128 + x^127 + x^126 + x^121 + 1`.
//! The 256-bit field, used with 64-bit cipher words, is
//! `x^256 + x^10 + x^5 + x^2 + 1`.
//!
//! Multiplication is bit-serial and branch-free: every step is selected by
//! an all-ones/all-zeros mask, so the instruction stream does not depend on
//! key or data bits.

use core::ops::BitXor;

use zeroize::{DefaultIsZeroes, Zeroize};

use super::word::Word;

/// Element of the hash field, convertible to and from one cipher block.
pub trait FieldElement: Copy + Default + Send + Sync + Zeroize + BitXor<Output = Self> {
    type Block;

    fn from_block(block: &Self::Block) -> Self;
    fn to_block(self) -> Self::Block;
    /// Montgomery-form product `self · h · x^-n`.
    fn dot(self, h: Self) -> Self;
}

/// `(P - x^128 - 1) / x + x^127` for `P = x^128 + x^127 + x^126 + x^121 + 1`.
const GF128_R: u128 = 0xE1 << 120;

/// GF(2^128) element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gf128(u128);

impl DefaultIsZeroes for Gf128 {}

impl BitXor for Gf128 {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl FieldElement for Gf128 {
    type Block = [u8; 16];

    fn from_block(block: &[u8; 16]) -> Self {
        Self(u128::from_le_bytes(*block))
    }

    fn to_block(self) -> [u8; 16] {
        self.0.to_le_bytes()
    }

    fn dot(self, h: Self) -> Self {
        let (a, b) = (self.0, h.0);
        let mut acc = 0u128;
        for i in 0..128 {
            let take = 0u128.wrapping_sub((b >> i) & 1);
            acc ^= a & take;
            // acc · x^-1: add P when the constant term is set, then shift.
            let carry = 0u128.wrapping_sub(acc & 1);
            acc = (acc >> 1) ^ (GF128_R & carry);
        }
        Self(acc)
    }
}

/// High limb of `(P - x^256 - 1) / x + x^255` for
/// `P = x^256 + x^10 + x^5 + x^2 + 1`.
const GF256_R_HI: u128 = 1 << 127;
/// Low limb of the same constant: `x^9 + x^4 + x`.
const GF256_R_LO: u128 = (1 << 9) | (1 << 4) | (1 << 1);

/// GF(2^256) element as little-endian `(lo, hi)` limbs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gf256 {
    lo: u128,
    hi: u128,
}

impl DefaultIsZeroes for Gf256 {}

impl BitXor for Gf256 {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self { lo: self.lo ^ rhs.lo, hi: self.hi ^ rhs.hi }
    }
}

impl FieldElement for Gf256 {
    type Block = [u8; 32];

    fn from_block(block: &[u8; 32]) -> Self {
        let mut lo = [0u8; 16];
        let mut hi = [0u8; 16];
        lo.copy_from_slice(&block[..16]);
        hi.copy_from_slice(&block[16..]);
        Self { lo: u128::from_le_bytes(lo), hi: u128::from_le_bytes(hi) }
    }

    fn to_block(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[..16].copy_from_slice(&self.lo.to_le_bytes());
        out[16..].copy_from_slice(&self.hi.to_le_bytes());
        out
    }

    fn dot(self, h: Self) -> Self {
        let limbs = [h.lo, h.hi];
        let (mut lo, mut hi) = (0u128, 0u128);
        for i in 0..256 {
            let take = 0u128.wrapping_sub((limbs[i / 128] >> (i % 128)) & 1);
            lo ^= self.lo & take;
            hi ^= self.hi & take;
            let carry = 0u128.wrapping_sub(lo & 1);
            lo = (lo >> 1) | (hi << 127);
            hi >>= 1;
            lo ^= GF256_R_LO & carry;
            hi ^= GF256_R_HI & carry;
        }
        Self { lo, hi }
    }
}

/// Running polynomial hash keyed by one authentication key.
pub struct Polyval<W: Word> {
    h: W::Field,
    s: W::Field,
}

impl<W: Word> Polyval<W> {
    /// Key the hash. The key is zero-extended (or truncated) to one block.
    pub fn new(key: &[u8]) -> Self {
        let mut block = W::Block::default();
        let n = key.len().min(W::block_len());
        block.as_mut()[..n].copy_from_slice(&key[..n]);
        let h = W::Field::from_block(&block);
        block.zeroize();
        Self { h, s: W::Field::default() }
    }

    /// Absorb `data` block by block. A trailing partial block is zero-padded,
    /// which is equivalent to the caller padding first.
    pub fn update(&mut self, data: &[u8]) {
        let block_len = W::block_len();
        let mut chunks = data.chunks_exact(block_len);
        for chunk in &mut chunks {
            self.update_block(chunk);
        }
        let rem = chunks.remainder();
        if !rem.is_empty() {
            self.update_block(rem);
        }
    }

    fn update_block(&mut self, chunk: &[u8]) {
        let mut block = W::Block::default();
        block.as_mut()[..chunk.len()].copy_from_slice(chunk);
        let x = W::Field::from_block(&block);
        self.s = (self.s ^ x).dot(self.h);
    }

    /// Finish and return the accumulator as one block.
    pub fn digest(self) -> W::Block {
        self.s.to_block()
    }
}

impl<W: Word> Drop for Polyval<W> {
    fn drop(&mut self) {
        self.h.zeroize();
        self.s.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block16(s: &str) -> [u8; 16] {
        let mut out = [0u8; 16];
        out.copy_from_slice(&hex::decode(s).unwrap());
        out
    }

    #[test]
    fn rfc8452_appendix_a() {
        let h = hex::decode("25629347589242761d31f826ba4b757b").unwrap();
        let mut mac = Polyval::<u32>::new(&h);
        mac.update(&hex::decode("4f4f95668c83dfb6401762bb2d01a262").unwrap());
        mac.update(&hex::decode("d1a24ddd2721d006bbe45f20d3c9f362").unwrap());
        assert_eq!(hex::encode(mac.digest()), "f7a3b47b846119fae5b7866cf5e5b77e");
    }

    #[test]
    fn one_is_x_to_the_128() {
        // dot(a, x^128) = a, and x^128 mod P = x^127 + x^126 + x^121 + 1.
        let x128 = Gf128(1 | (1 << 121) | (1 << 126) | (1 << 127));
        let a = Gf128::from_block(&block16("4f4f95668c83dfb6401762bb2d01a262"));
        assert_eq!(a.dot(x128), a);
    }

    #[test]
    fn one_is_x_to_the_256() {
        let x256 = Gf256 { lo: 1 | (1 << 2) | (1 << 5) | (1 << 10), hi: 0 };
        let a = Gf256 { lo: 0x0123_4567_89ab_cdef_0011_2233_4455_6677, hi: 0xdead_beef };
        assert_eq!(a.dot(x256), a);
    }

    #[test]
    fn dot_is_commutative() {
        let a = Gf256 { lo: 0x1234_5678, hi: 1 << 100 };
        let b = Gf256 { lo: u128::MAX, hi: 0x9abc };
        assert_eq!(a.dot(b), b.dot(a));
        let c = Gf128(0x5555_0000_ffff);
        let d = Gf128(u128::MAX >> 3);
        assert_eq!(c.dot(d), d.dot(c));
    }

    #[test]
    fn partial_block_is_zero_padded() {
        let key = [7u8; 16];
        let mut a = Polyval::<u32>::new(&key);
        a.update(b"abc");
        let mut padded = [0u8; 16];
        padded[..3].copy_from_slice(b"abc");
        let mut b = Polyval::<u32>::new(&key);
        b.update(&padded);
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn empty_input_digests_to_zero() {
        let mac = Polyval::<u64>::new(&[9u8; 16]);
        assert_eq!(mac.digest(), [0u8; 32]);
    }
}
