use num_bigint::{BigInt, Sign};
use sha2::{Digest, Sha256};

#[cfg(feature = "cli")]
pub mod cli;
pub mod commands;
mod decoder;
pub mod document;
mod error;
#[cfg(test)]
mod polynomial;
mod reconstructor;
mod share;
mod util;

pub use decoder::{decode, MAX_BASE, MIN_BASE};
pub use document::{DocumentError, ShareDocument};
pub use error::{ReconstructError, Result};
pub use reconstructor::{DivisionPolicy, SecretReconstructor};
pub use share::Share;

/// Reads a non-negative secret as big-endian UTF-8 bytes.
pub fn secret_to_text(secret: &BigInt) -> Option<String> {
    match secret.to_bytes_be() {
        (Sign::Minus, _) => None,
        (_, bytes) => String::from_utf8(bytes).ok(),
    }
}

/// Hex SHA-256 of the secret's decimal representation.
pub fn fingerprint(secret: &BigInt) -> String {
    let digest = Sha256::digest(secret.to_str_radix(10).as_bytes());

    format!("{:x}", digest)
}
