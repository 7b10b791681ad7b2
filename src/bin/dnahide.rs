// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/dnahide

//! dnahide command-line tool.
//!
//! # Usage
//!
//! ```bash
//! # Hide a file in a flat file, encrypted
//! dnahide -i notes.txt -o notes.gb -p hunter2 -a "lab 7"
//!
//! # Recover it
//! dnahide -u -i notes.gb -o notes.txt -p hunter2 -a "lab 7"
//!
//! # Plain encoding through a pipe
//! echo hello | dnahide | dnahide -u
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dnahide_core::{hide, reveal, HideOptions, RevealOptions};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Hide data in synthetic DNA
#[derive(Parser)]
#[command(name = "dnahide")]
#[command(about = "Hide data in a GenBank-style DNA flat file")]
#[command(version)]
struct Args {
    /// Recover data from a flat file instead of hiding it
    #[arg(short, long)]
    unsteg: bool,

    /// Input file (stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Encryption password
    #[arg(short, long)]
    password: Option<String>,

    /// Additional authenticated data (required with a password)
    #[arg(short, long)]
    aad: Option<String>,

    /// Compute the keystream on one thread
    #[arg(long)]
    sequential: bool,

    /// Log level when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("unsteg", &self.unsteg)
            .field("input", &self.input)
            .field("output", &self.output)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("sequential", &self.sequential)
            .finish()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
    tracing::debug!(?args, "starting");

    check_credentials(&args)?;

    let input = read_input(args.input.as_ref())?;
    let aad = args.aad.clone().unwrap_or_default().into_bytes();

    let output = if args.unsteg {
        let text = String::from_utf8(input).context("flat file is not valid UTF-8")?;
        let options = RevealOptions {
            password: args.password.clone(),
            aad,
            sequential: args.sequential,
            ..RevealOptions::default()
        };
        reveal(&text, &options).context("failed to recover data")?
    } else {
        let options = HideOptions {
            password: args.password.clone(),
            aad,
            sequential: args.sequential,
            ..HideOptions::default()
        };
        hide(&input, &options).context("failed to hide data")?.into_bytes()
    };

    write_output(args.output.as_ref(), &output)
}

/// A non-empty password needs non-empty AAD; an empty password means no
/// encryption.
fn check_credentials(args: &Args) -> Result<()> {
    if args.password.as_deref().is_some_and(|p| !p.is_empty())
        && args.aad.as_deref().map_or(true, str::is_empty)
    {
        bail!("a password requires authentication data (-a)");
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            let data =
                fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
            tracing::info!(bytes = data.len(), file = %path.display(), "read input");
            Ok(data)
        }
        None => {
            let mut data = Vec::new();
            io::stdin().read_to_end(&mut data).context("cannot read stdin")?;
            Ok(data)
        }
    }
}

fn write_output(path: Option<&PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, data).with_context(|| format!("cannot write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data).context("cannot write stdout")?;
            stdout.flush().context("cannot flush stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("dnahide").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn empty_password_without_aad_is_plain() {
        let args = parse(&["-p", ""]);
        assert_eq!(args.password.as_deref(), Some(""));
        assert!(check_credentials(&args).is_ok());
    }

    #[test]
    fn password_requires_aad() {
        assert!(check_credentials(&parse(&["-p", "secret"])).is_err());
        assert!(check_credentials(&parse(&["-p", "secret", "-a", ""])).is_err());
        assert!(check_credentials(&parse(&["-p", "secret", "-a", "lab 7"])).is_ok());
        assert!(check_credentials(&parse(&["-u", "--sequential"])).is_ok());
    }
}
