use num_bigint::BigInt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconstructError {
    #[error("base {0} is outside the supported range 2..=36")]
    InvalidBase(u32),

    #[error("invalid digit {ch:?} at position {position}")]
    InvalidDigit { ch: char, position: usize },

    #[error("digit {ch:?} (value {value}) at position {position} is out of range for base {base}")]
    DigitOutOfRange {
        ch: char,
        value: u32,
        base: u32,
        position: usize,
    },

    #[error("a share with x = {0} is already present")]
    DuplicateShareX(BigInt),

    #[error("no shares available for reconstruction")]
    NoSharesAvailable,

    /// Lagrange denominator of the share at this x evaluated to zero.
    #[error("degenerate share set: zero Lagrange denominator for share x = {0}")]
    DegenerateShareSet(BigInt),

    #[error("interpolated value {numerator}/{denominator} is not an integer")]
    NonIntegerResult {
        numerator: BigInt,
        denominator: BigInt,
    },
}

pub type Result<T> = std::result::Result<T, ReconstructError>;
