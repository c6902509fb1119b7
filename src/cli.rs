use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use num_bigint::BigInt;

use crate::{DivisionPolicy, MAX_BASE, MIN_BASE};

fn parse_bigint(s: &str) -> Result<BigInt, String> {
    BigInt::parse_bytes(s.as_bytes(), 10).ok_or_else(|| format!("'{s}' is not an integer"))
}

fn parse_base(s: &str) -> Result<u32, String> {
    let base: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(format!("base must be between {MIN_BASE} and {MAX_BASE}"));
    }

    Ok(base)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    /// Divide the exact Lagrange sum once; fail if it is not an integer
    Exact,
    /// Truncate every Lagrange term toward zero
    Truncate,
}

impl From<Policy> for DivisionPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Exact => DivisionPolicy::Exact,
            Policy::Truncate => DivisionPolicy::Truncate,
        }
    }
}

#[derive(Parser)]
#[command(name = "sss-recon")]
#[command(about = "Recover Shamir secrets from shares with base-encoded values")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recover the secret (P(0)) of one or more share documents
    #[command(arg_required_else_help = true)]
    Recover {
        /// JSON share documents
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Policy::Exact)]
        policy: Policy,

        /// Use only the first k shares of each document
        #[arg(short, long)]
        threshold_only: bool,

        /// Also print the secret as UTF-8 text when possible
        #[arg(long)]
        text: bool,

        /// Print a SHA-256 fingerprint instead of the secret
        #[arg(short, long)]
        fingerprint: bool,
    },
    /// Decode a number written in base 2..=36 to decimal
    Decode {
        digits: String,

        #[arg(short, long, value_parser = parse_base)]
        base: u32,
    },
    /// Evaluate the interpolating polynomial of a document at x
    Evaluate {
        file: PathBuf,

        #[arg(long, allow_hyphen_values = true, value_parser = parse_bigint)]
        at: BigInt,

        #[arg(short, long, value_enum, default_value_t = Policy::Exact)]
        policy: Policy,

        #[arg(short, long)]
        threshold_only: bool,
    },
}
