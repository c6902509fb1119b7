use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::error::{ReconstructError, Result};

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

/// Decodes `digits` written in `base` into an exact integer.
///
/// Digits are `0-9` followed by `a-z` (either case) for the values 10 to 35.
/// The string is consumed from its least significant (rightmost) digit,
/// accumulating `digit * base^k`. An empty string decodes to zero.
pub fn decode(digits: &str, base: u32) -> Result<BigInt> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(ReconstructError::InvalidBase(base));
    }

    let radix = BigInt::from(base);
    let chars: Vec<char> = digits.chars().collect();
    let mut result = BigInt::zero();
    let mut place = BigInt::one();

    for (position, &ch) in chars.iter().enumerate().rev() {
        let value = ch
            .to_digit(MAX_BASE)
            .ok_or(ReconstructError::InvalidDigit { ch, position })?;

        if value >= base {
            return Err(ReconstructError::DigitOutOfRange {
                ch,
                value,
                base,
                position,
            });
        }

        result += &place * BigInt::from(value);
        place *= &radix;
    }

    Ok(result)
}
