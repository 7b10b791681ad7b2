// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! Synthetic DNA representation of binary data.
//!
//! ```text
//! bytes ──codon::encode──▶ ACGT string ──genbank::render──▶ flat file
//! bytes ◀─codon::decode─── ACGT string ◀─genbank::parse──── flat file
//! ```

pub mod codon;
pub mod genbank;
