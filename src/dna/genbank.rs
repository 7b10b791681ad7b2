// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! GenBank-style flat file wrapper around a base sequence.
//!
//! ```text
//! LOCUS       GXP_4711(PAX6/human) 96   bp DNA
//! ACCESSION   GXP_4711
//! BASE COUNT  25  a 21  c 26  g 24  t
//! ORIGIN
//!         1 ATTGCAGGTC TTAGCCTAGA ...
//!        61 ...
//! //
//! ```
//!
//! Only the `ORIGIN` section matters when reading a file back; the header
//! records are cosmetic.

use rand::Rng;

use crate::error::DnaHideError;

/// Bases per group in the `ORIGIN` section.
pub const GROUP_LEN: usize = 10;

/// Groups per line in the `ORIGIN` section.
pub const GROUPS_PER_LINE: usize = 6;

/// Largest accession number produced by [`random_accession`].
pub const MAX_ACCESSION: u32 = 9_999_999;

const ORIGIN: &str = "ORIGIN";
const TERMINATOR: &str = "//";

/// Pick a random accession number in `0..=MAX_ACCESSION`.
pub fn random_accession<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(0..=MAX_ACCESSION)
}

/// Render `dna` as a flat file under accession `GXP_{accession}`.
pub fn render(dna: &str, accession: u32) -> String {
    let count = |base: char| dna.chars().filter(|&c| c == base).count();
    let line_len = GROUP_LEN * GROUPS_PER_LINE;
    let mut out = String::with_capacity(dna.len() * 11 / 10 + 16 * (dna.len() / line_len + 1) + 160);

    out.push_str(&format!(
        "{:<12}GXP_{accession}(PAX6/human) {:<4} bp {:<5}\n",
        "LOCUS",
        dna.len(),
        "DNA"
    ));
    out.push_str(&format!("{:<12}GXP_{accession}\n", "ACCESSION"));
    out.push_str(&format!(
        "{:<12}{:<3} a {:<3} c {:<3} g {:<3} t \n",
        "BASE COUNT",
        count('A'),
        count('C'),
        count('G'),
        count('T'),
    ));
    out.push_str(ORIGIN);
    out.push('\n');

    let bases = dna.as_bytes();
    for (line_index, line) in bases.chunks(line_len).enumerate() {
        out.push_str(&format!("{:>9}", line_index * line_len + 1));
        for group in line.chunks(GROUP_LEN) {
            out.push(' ');
            // Groups come from an ASCII-only sequence.
            out.extend(group.iter().map(|&b| b as char));
        }
        out.push('\n');
    }
    out.push_str(TERMINATOR);
    out.push('\n');
    out
}

/// Extract the base sequence from a flat file.
///
/// Everything after the `ORIGIN` line is scanned up to an optional `//`
/// terminator. Position numbers and whitespace are skipped; any other
/// character fails with [`DnaHideError::InvalidFlatFile`] naming the
/// 1-based line.
pub fn parse(text: &str) -> Result<String, DnaHideError> {
    let mut lines = text.lines().enumerate();
    if !lines.any(|(_, line)| line.starts_with(ORIGIN)) {
        return Err(DnaHideError::MissingOrigin);
    }

    let mut dna = String::with_capacity(text.len());
    for (index, line) in lines {
        if line.starts_with(TERMINATOR) {
            break;
        }
        for c in line.chars() {
            match c {
                'A' | 'C' | 'G' | 'T' => dna.push(c),
                c if c.is_ascii_digit() || c.is_whitespace() => {}
                found => {
                    return Err(DnaHideError::InvalidFlatFile {
                        line: index + 1,
                        found,
                    })
                }
            }
        }
    }
    tracing::debug!(bases = dna.len(), "parsed flat file");
    Ok(dna)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn header_records() {
        let text = render("ACGTACGTAA", 42);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "LOCUS       GXP_42(PAX6/human) 10   bp DNA  ");
        assert_eq!(lines[1], "ACCESSION   GXP_42");
        assert_eq!(lines[2], "BASE COUNT  4   a 2   c 2   g 2   t ");
        assert_eq!(lines[3], "ORIGIN");
        assert_eq!(lines[4], "        1 ACGTACGTAA");
        assert_eq!(lines[5], "//");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn sequence_lines_hold_sixty_bases() {
        let dna = "ACGT".repeat(40); // 160 bases
        let text = render(&dna, 1);
        let seq: Vec<&str> = text.lines().skip(4).collect();
        assert_eq!(
            seq[0],
            "        1 ACGTACGTAC GTACGTACGT ACGTACGTAC GTACGTACGT ACGTACGTAC GTACGTACGT"
        );
        assert!(seq[1].starts_with("       61 "));
        assert!(seq[2].starts_with("      121 "));
        assert_eq!(seq[2].split_whitespace().count(), 5); // position + 4 groups
        assert_eq!(seq[3], "//");
    }

    #[test]
    fn render_parse_roundtrip() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(3);
        for len in [0usize, 1, 9, 10, 59, 60, 61, 600, 1234] {
            let dna: String = (0..len).map(|_| ['A', 'C', 'G', 'T'][rng.gen_range(0..4)]).collect();
            let text = render(&dna, random_accession(&mut rng));
            assert_eq!(parse(&text).unwrap(), dna, "len {len}");
        }
    }

    #[test]
    fn accession_in_range() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(11);
        for _ in 0..1000 {
            assert!(random_accession(&mut rng) <= MAX_ACCESSION);
        }
    }

    #[test]
    fn missing_origin() {
        assert!(matches!(parse("LOCUS x\nACGT\n"), Err(DnaHideError::MissingOrigin)));
        assert!(matches!(parse(""), Err(DnaHideError::MissingOrigin)));
    }

    #[test]
    fn invalid_character_reports_line() {
        let text = "LOCUS\nORIGIN\n        1 ACGT\n       61 ACNT\n";
        match parse(text) {
            Err(DnaHideError::InvalidFlatFile { line, found }) => {
                assert_eq!(line, 4);
                assert_eq!(found, 'N');
            }
            other => panic!("expected InvalidFlatFile, got {other:?}"),
        }
    }

    #[test]
    fn tolerates_crlf_and_missing_terminator() {
        let text = "ORIGIN\r\n        1 ACGTA CGT\r\n       61 TT\r\n";
        assert_eq!(parse(text).unwrap(), "ACGTACGTTT");
    }

    #[test]
    fn text_after_terminator_ignored() {
        let text = "ORIGIN\n        1 ACGT\n//\ntrailing notes\n";
        assert_eq!(parse(text).unwrap(), "ACGT");
    }
}
