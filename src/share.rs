use num_bigint::BigInt;

use crate::decoder;
use crate::error::Result;

/// A decoded point `(x, y)` on the sharing polynomial.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Share {
    x: BigInt,
    y: BigInt,
}

impl Share {
    pub fn new(x: BigInt, y: BigInt) -> Self {
        Share { x, y }
    }

    /// Decodes `y_digits` in `y_base` and pairs it with `x`.
    pub fn decode(x: BigInt, y_digits: &str, y_base: u32) -> Result<Self> {
        let y = decoder::decode(y_digits, y_base)?;

        Ok(Share::new(x, y))
    }

    pub fn x(&self) -> &BigInt {
        &self.x
    }

    pub fn y(&self) -> &BigInt {
        &self.y
    }
}

impl From<(BigInt, BigInt)> for Share {
    fn from((x, y): (BigInt, BigInt)) -> Self {
        Share::new(x, y)
    }
}
