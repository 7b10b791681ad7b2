// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! Machine-word parameterisation of the cipher stack.
//!
//! Every primitive in [`crate::crypto`] is generic over a [`Word`]: the
//! register width of the RC6 core. The word fixes the block length
//! (four words), the magic constants of the key schedule, and the binary
//! field used by the polynomial hash.
//!
//! | Word  | Block    | Hash field  |
//! |-------|----------|-------------|
//! | `u32` | 16 bytes | GF(2^128)   |
//! | `u64` | 32 bytes | GF(2^256)   |
//!
//! All loads and stores are little-endian regardless of host byte order.

use core::fmt::Debug;
use core::ops::BitXor;

use zeroize::Zeroize;

use super::polyval::{FieldElement, Gf128, Gf256};

/// Fixed-width unsigned integer usable as an RC6 register.
pub trait Word:
    Copy + Default + Eq + Debug + Send + Sync + Zeroize + BitXor<Output = Self> + 'static
{
    /// Width in bits.
    const BITS: u32;
    /// Width in bytes.
    const BYTES: usize;
    /// log2 of `BITS`; the fixed rotation of the round function.
    const LG_W: u32;
    /// Key schedule constant `Odd((e - 2) * 2^w)`.
    const P: Self;
    /// Key schedule constant `Odd((phi - 1) * 2^w)`.
    const Q: Self;
    const ZERO: Self;
    const ONE: Self;

    /// One cipher block: four words.
    type Block: AsRef<[u8]> + AsMut<[u8]> + Copy + Default + Eq + Debug + Send + Sync + Zeroize;
    /// Field element the polynomial hash multiplies in.
    type Field: FieldElement<Block = Self::Block>;

    fn from_u32(v: u32) -> Self;
    /// Truncating conversion; only the low `LG_W` bits matter for rotations.
    fn low_u32(self) -> u32;
    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn rotl(self, n: u32) -> Self;
    fn rotr(self, n: u32) -> Self;

    /// Load a word from up to `BYTES` little-endian bytes, zero-extending
    /// short input.
    fn load_le(bytes: &[u8]) -> Self;
    /// Store the word as exactly `BYTES` little-endian bytes.
    fn store_le(self, out: &mut [u8]);

    /// Block length in bytes.
    fn block_len() -> usize {
        4 * Self::BYTES
    }
}

macro_rules! impl_word {
    ($t:ty, $lg:expr, $p:expr, $q:expr, $block:ty, $field:ty) => {
        impl Word for $t {
            const BITS: u32 = <$t>::BITS;
            const BYTES: usize = core::mem::size_of::<$t>();
            const LG_W: u32 = $lg;
            const P: Self = $p;
            const Q: Self = $q;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            type Block = $block;
            type Field = $field;

            #[inline]
            fn from_u32(v: u32) -> Self {
                v as $t
            }

            #[inline]
            fn low_u32(self) -> u32 {
                self as u32
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$t>::wrapping_sub(self, rhs)
            }

            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$t>::wrapping_mul(self, rhs)
            }

            #[inline]
            fn rotl(self, n: u32) -> Self {
                self.rotate_left(n & (Self::BITS - 1))
            }

            #[inline]
            fn rotr(self, n: u32) -> Self {
                self.rotate_right(n & (Self::BITS - 1))
            }

            #[inline]
            fn load_le(bytes: &[u8]) -> Self {
                let mut buf = [0u8; core::mem::size_of::<$t>()];
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                <$t>::from_le_bytes(buf)
            }

            #[inline]
            fn store_le(self, out: &mut [u8]) {
                out[..Self::BYTES].copy_from_slice(&self.to_le_bytes());
            }
        }
    };
}

impl_word!(u32, 5, 0xB7E1_5163, 0x9E37_79B9, [u8; 16], Gf128);
impl_word!(u64, 6, 0xB7E1_5162_8AED_2A6B, 0x9E37_79B9_7F4A_7C15, [u8; 32], Gf256);
