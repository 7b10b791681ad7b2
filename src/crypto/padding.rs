// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! Block alignment and canonical little-endian field writers.

/// Length after zero-padding `len` bytes to a block multiple.
///
/// Empty input occupies one full block of padding; a non-empty exact
/// multiple is left as is.
pub fn padded_len(len: usize, block_len: usize) -> usize {
    if len == 0 {
        block_len
    } else {
        len.div_ceil(block_len) * block_len
    }
}

/// Append zeros until `data` is block aligned. Returns the number of bytes
/// appended.
pub fn pad_to_block_size(data: &mut Vec<u8>, block_len: usize) -> usize {
    let pad_len = padded_len(data.len(), block_len) - data.len();
    data.resize(data.len() + pad_len, 0);
    pad_len
}

/// Write `value` as eight little-endian bytes at `offset`.
pub fn write_le_u64(buf: &mut [u8], offset: usize, value: u64) {
    buf[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
}
