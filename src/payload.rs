// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! Payload compression.
//!
//! Data is compressed before it is sealed and turned into bases, so every
//! byte saved here is four bases less in the flat file:
//!
//! ```text
//! [1 byte ] flags
//! [M bytes] body (raw or Brotli-compressed depending on flags)
//! ```

use std::io::{Read, Write};

use crate::error::DnaHideError;

/// Compression algorithm flags (bits 0-1 of flags byte).
const COMPRESS_NONE: u8 = 0b00;
const COMPRESS_BROTLI: u8 = 0b01;
const COMPRESS_MASK: u8 = 0b11;

/// Brotli compression quality (0-11).
const BROTLI_QUALITY: u32 = 11;

/// Brotli LG_WINDOW_SIZE. 22 is the default (4 MB window).
const BROTLI_LG_WINDOW_SIZE: u32 = 22;

const BUFFER_SIZE: usize = 4096;

/// Default cap on decompressed output.
pub const DEFAULT_OUTPUT_LIMIT: usize = 256 * 1024 * 1024;

/// Wrap `data` as `[flags][body]`, Brotli-compressed only if that is
/// strictly smaller.
pub fn compress(data: &[u8]) -> Vec<u8> {
    let compressed = compress_brotli(data);

    let (flags, body) = if compressed.len() < data.len() {
        (COMPRESS_BROTLI, compressed.as_slice())
    } else {
        (COMPRESS_NONE, data)
    };
    let mut result = Vec::with_capacity(1 + body.len());
    result.push(flags);
    result.extend_from_slice(body);
    result
}

/// Undo [`compress`], refusing to produce more than `limit` bytes.
pub fn decompress(payload: &[u8], limit: usize) -> Result<Vec<u8>, DnaHideError> {
    let Some((&flags, body)) = payload.split_first() else {
        return Err(DnaHideError::PayloadCorrupted);
    };

    let data = match flags & COMPRESS_MASK {
        COMPRESS_NONE => body.to_vec(),
        COMPRESS_BROTLI => decompress_brotli(body, limit)?,
        _ => return Err(DnaHideError::PayloadCorrupted),
    };
    if data.len() > limit {
        return Err(DnaHideError::OutputTooLarge { limit });
    }
    Ok(data)
}

fn compress_brotli(data: &[u8]) -> Vec<u8> {
    let mut output = Vec::new();
    {
        let mut compressor = brotli::CompressorWriter::new(
            &mut output,
            BUFFER_SIZE,
            BROTLI_QUALITY,
            BROTLI_LG_WINDOW_SIZE,
        );
        let Ok(()) = compressor.write_all(data) else {
            unreachable!("writing into a Vec cannot fail");
        };
        // CompressorWriter flushes on drop
    }
    output
}

fn decompress_brotli(data: &[u8], limit: usize) -> Result<Vec<u8>, DnaHideError> {
    let mut output = Vec::new();
    let decompressor = brotli::Decompressor::new(data, BUFFER_SIZE);
    // One byte past the limit tells an exact fit from an overflow.
    let cap = (limit as u64).saturating_add(1);
    decompressor
        .take(cap)
        .read_to_end(&mut output)
        .map_err(|_| DnaHideError::PayloadCorrupted)?;
    if output.len() > limit {
        return Err(DnaHideError::OutputTooLarge { limit });
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_not_compressed() {
        let packed = compress(b"Hi");
        assert_eq!(packed[0] & COMPRESS_MASK, COMPRESS_NONE);
        assert_eq!(&packed[1..], b"Hi");
        assert_eq!(decompress(&packed, 1024).unwrap(), b"Hi");
    }

    #[test]
    fn long_repetitive_text_compressed() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(50);
        let packed = compress(text.as_bytes());
        assert_eq!(packed[0] & COMPRESS_MASK, COMPRESS_BROTLI);
        assert!(packed.len() < text.len() / 4);
        assert_eq!(decompress(&packed, 1 << 20).unwrap(), text.as_bytes());
    }

    #[test]
    fn incompressible_data_stays_raw() {
        use rand::{RngCore, SeedableRng};
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        let mut data = vec![0u8; 300];
        rng.fill_bytes(&mut data);
        let packed = compress(&data);
        assert_eq!(packed[0], COMPRESS_NONE);
        assert_eq!(decompress(&packed, 1024).unwrap(), data);
    }

    #[test]
    fn empty_data_roundtrip() {
        let packed = compress(b"");
        assert_eq!(packed, vec![COMPRESS_NONE]);
        assert!(decompress(&packed, 0).unwrap().is_empty());
    }

    #[test]
    fn empty_payload_error() {
        assert!(matches!(decompress(&[], 10), Err(DnaHideError::PayloadCorrupted)));
    }

    #[test]
    fn unknown_flags_rejected() {
        assert!(matches!(
            decompress(&[0b10, 1, 2, 3], 10),
            Err(DnaHideError::PayloadCorrupted)
        ));
    }

    #[test]
    fn corrupted_brotli_stream_rejected() {
        let data: String = (0..2000).map(|i| format!("line {i}\n")).collect();
        let packed = compress(data.as_bytes());
        assert_eq!(packed[0], COMPRESS_BROTLI);
        let truncated = &packed[..packed.len() / 2];
        match decompress(truncated, 1 << 20) {
            Err(e) => assert!(matches!(e, DnaHideError::PayloadCorrupted)),
            Ok(out) => assert_ne!(out, data.as_bytes()),
        }
    }

    #[test]
    fn output_limit_enforced() {
        let data = vec![0u8; 10_000];
        let packed = compress(&data);
        assert_eq!(packed[0], COMPRESS_BROTLI);
        assert_eq!(decompress(&packed, 10_000).unwrap().len(), 10_000);
        assert!(matches!(
            decompress(&packed, 9_999),
            Err(DnaHideError::OutputTooLarge { limit: 9_999 })
        ));

        let raw = compress(b"abc");
        assert!(matches!(
            decompress(&raw, 2),
            Err(DnaHideError::OutputTooLarge { limit: 2 })
        ));
    }
}
