// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! Bytes to codons and back.
//!
//! Every three bytes split into four 6-bit symbols (base64 order, most
//! significant bits first) and every symbol becomes one codon. A trailing
//! group of one or two bytes yields two or three codons; no padding symbols
//! are emitted.
//!
//! ```text
//! bytes   [ b0      ][ b1      ][ b2      ]
//! symbols [ s0   ][ s1   ][ s2   ][ s3   ]
//! bases   ATT     GCA     ...     TGA
//! ```

use crate::error::DnaHideError;

/// Bases per codon.
pub const CODON_LEN: usize = 3;

/// Codon for each 6-bit symbol.
pub const CODONS: [&str; 64] = [
    "ATT", "ATC", "ATA", "CTT", "CTC", "CTA", "CTG", "TTA", //
    "TTG", "GTT", "GTC", "GTA", "GTG", "TTT", "TTC", "ATG", //
    "TGT", "TGC", "GCT", "GCC", "GCA", "GCG", "GGT", "GGC", //
    "GGA", "GGG", "CCT", "CCC", "CCA", "CCG", "ACT", "ACC", //
    "ACA", "ACG", "TCT", "TCC", "TCA", "TCG", "AGT", "AGC", //
    "TAT", "TAC", "TGG", "CAA", "CAG", "AAT", "AAC", "CAT", //
    "CAC", "GAA", "GAG", "GAT", "GAC", "AAA", "AAG", "CGT", //
    "CGC", "CGA", "CGG", "AGA", "AGG", "TAA", "TAG", "TGA", //
];

/// Symbol for each codon, indexed by the codon's bases packed two bits each
/// (A=0, C=1, G=2, T=3, first base highest).
const SYMBOLS: [u8; 64] = build_symbol_table();

const fn base_bits(base: u8) -> u8 {
    match base {
        b'A' => 0,
        b'C' => 1,
        b'G' => 2,
        _ => 3,
    }
}

const fn build_symbol_table() -> [u8; 64] {
    let mut table = [0u8; 64];
    let mut symbol = 0;
    while symbol < 64 {
        let codon = CODONS[symbol].as_bytes();
        let packed = (base_bits(codon[0]) << 4) | (base_bits(codon[1]) << 2) | base_bits(codon[2]);
        table[packed as usize] = symbol as u8;
        symbol += 1;
    }
    table
}

/// Number of bases [`encode`] produces for `len` bytes.
pub fn encoded_len(len: usize) -> usize {
    let symbols = len / 3 * 4
        + match len % 3 {
            0 => 0,
            rem => rem + 1,
        };
    symbols * CODON_LEN
}

/// Encode `bytes` as a string of A/C/G/T.
pub fn encode(bytes: &[u8]) -> String {
    let mut dna = String::with_capacity(encoded_len(bytes.len()));
    for chunk in bytes.chunks(3) {
        let mut group = [0u8; 3];
        group[..chunk.len()].copy_from_slice(chunk);
        let bits = u32::from(group[0]) << 16 | u32::from(group[1]) << 8 | u32::from(group[2]);
        for i in 0..=chunk.len() {
            let symbol = (bits >> (18 - 6 * i)) & 0x3f;
            dna.push_str(CODONS[symbol as usize]);
        }
    }
    dna
}

/// Decode a string produced by [`encode`].
pub fn decode(dna: &str) -> Result<Vec<u8>, DnaHideError> {
    let bases = dna.as_bytes();
    if let Some(position) = bases.iter().position(|b| !matches!(b, b'A' | b'C' | b'G' | b'T')) {
        let found = dna[position..].chars().next().unwrap_or('\0');
        return Err(DnaHideError::InvalidBase { position, found });
    }
    let codons = bases.len() / CODON_LEN;
    if bases.len() % CODON_LEN != 0 || codons % 4 == 1 {
        return Err(DnaHideError::TruncatedSequence { bases: bases.len() });
    }

    let symbols = bases.chunks_exact(CODON_LEN).map(|codon| {
        let packed = (base_bits(codon[0]) << 4) | (base_bits(codon[1]) << 2) | base_bits(codon[2]);
        u32::from(SYMBOLS[packed as usize])
    });

    let mut out = Vec::with_capacity(codons / 4 * 3 + 2);
    let mut bits = 0u32;
    let mut count = 0;
    for symbol in symbols {
        bits = bits << 6 | symbol;
        count += 1;
        if count == 4 {
            out.extend_from_slice(&bits.to_be_bytes()[1..]);
            bits = 0;
            count = 0;
        }
    }
    if count > 0 {
        // Left-align the partial group as if zero symbols followed.
        bits <<= 6 * (4 - count);
        out.extend_from_slice(&bits.to_be_bytes()[1..count]);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codons_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for codon in CODONS {
            assert_eq!(codon.len(), CODON_LEN);
            assert!(seen.insert(codon), "duplicate codon {codon}");
        }
    }

    #[test]
    fn symbol_table_inverts_codons() {
        for (symbol, codon) in CODONS.iter().enumerate() {
            let b = codon.as_bytes();
            let packed = (base_bits(b[0]) << 4) | (base_bits(b[1]) << 2) | base_bits(b[2]);
            assert_eq!(SYMBOLS[packed as usize] as usize, symbol);
        }
    }

    #[test]
    fn known_encoding() {
        // "Man" is TWFu in base64: T=19, W=22, F=5, u=46.
        assert_eq!(encode(b"Man"), "GCCGGTCTAAAC");
        assert_eq!(decode("GCCGGTCTAAAC").unwrap(), b"Man");
        // "Ma" is TWE: T=19, W=22, E=4.
        assert_eq!(encode(b"Ma"), "GCCGGTCTC");
        // "M" is TQ: T=19, Q=16.
        assert_eq!(encode(b"M"), "GCCTGT");
        assert_eq!(CODONS[46], "AAC");
        assert_eq!(CODONS[47], "CAT");
    }

    #[test]
    fn all_lengths_roundtrip() {
        let data: Vec<u8> = (0..=255u8).collect();
        for len in 0..40 {
            let dna = encode(&data[..len]);
            assert_eq!(dna.len(), encoded_len(len));
            assert_eq!(decode(&dna).unwrap(), &data[..len], "len {len}");
        }
        assert_eq!(decode(&encode(&data)).unwrap(), data);
    }

    #[test]
    fn empty_input() {
        assert_eq!(encode(b""), "");
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn invalid_base_reported_with_position() {
        match decode("ATTAXT") {
            Err(DnaHideError::InvalidBase { position, found }) => {
                assert_eq!(position, 4);
                assert_eq!(found, 'X');
            }
            other => panic!("expected InvalidBase, got {other:?}"),
        }
        assert!(matches!(decode("attatt"), Err(DnaHideError::InvalidBase { position: 0, .. })));
    }

    #[test]
    fn truncated_sequences_rejected() {
        // Not a whole number of codons.
        assert!(matches!(decode("ATTA"), Err(DnaHideError::TruncatedSequence { bases: 4 })));
        // A single trailing codon carries fewer than eight bits.
        assert!(matches!(decode("ATT"), Err(DnaHideError::TruncatedSequence { bases: 3 })));
        let five_codons = "ATT".repeat(5);
        assert!(matches!(decode(&five_codons), Err(DnaHideError::TruncatedSequence { .. })));
    }
}
