use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use num_bigint::BigInt;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::info;

use crate::{DivisionPolicy, SecretReconstructor, ShareDocument};

#[derive(Debug, Clone, Copy, Default)]
pub struct RecoverOptions {
    pub policy: DivisionPolicy,
    /// Use only the first `k` shares by index instead of every listed share.
    pub threshold_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    pub threshold: usize,
    pub shares_used: usize,
    pub secret: BigInt,
}

fn load_document(
    json: &str,
    options: &RecoverOptions,
) -> Result<(ShareDocument, SecretReconstructor)> {
    let document = ShareDocument::from_json(json)?;
    let mut reconstructor = SecretReconstructor::with_policy(options.policy);

    document.load_into(&mut reconstructor, options.threshold_only)?;

    Ok((document, reconstructor))
}

/// Recover the secret described by a JSON share document
///
/// # Errors
/// Returns an error if the document is malformed, a share fails to decode,
/// or interpolation fails
pub fn recover_document(json: &str, options: &RecoverOptions) -> Result<Recovery> {
    let (document, reconstructor) = load_document(json, options)?;

    let secret = reconstructor
        .reconstruct_secret()
        .context("Failed to reconstruct secret")?;

    Ok(Recovery {
        threshold: document.threshold(),
        shares_used: reconstructor.len(),
        secret,
    })
}

/// Recover the secret of a share document on disk
pub fn recover_file(path: &Path, options: &RecoverOptions) -> Result<Recovery> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read share document {}", path.display()))?;

    let recovery = recover_document(&json, options)
        .with_context(|| format!("Failed to recover {}", path.display()))?;

    info!(
        path = %path.display(),
        threshold = recovery.threshold,
        shares = recovery.shares_used,
        "recovered secret"
    );

    Ok(recovery)
}

/// Recover every document independently, in parallel
///
/// Results are returned in the order of `paths`.
pub fn recover_files(paths: &[PathBuf], options: &RecoverOptions) -> Vec<Result<Recovery>> {
    paths
        .par_iter()
        .map(|path| recover_file(path, options))
        .collect()
}

/// Evaluate the polynomial through a document's shares at `at`
pub fn evaluate_document(json: &str, at: &BigInt, options: &RecoverOptions) -> Result<BigInt> {
    let (_, reconstructor) = load_document(json, options)?;

    reconstructor
        .interpolate_at(at)
        .with_context(|| format!("Failed to evaluate at x = {}", at))
}

pub fn evaluate_file(path: &Path, at: &BigInt, options: &RecoverOptions) -> Result<BigInt> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read share document {}", path.display()))?;

    evaluate_document(&json, at, options)
}
