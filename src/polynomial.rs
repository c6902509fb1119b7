use num_bigint::{BigInt, BigUint, RandBigInt, ToBigInt};
use num_traits::{One, Zero};

// p(X) = s + p1X + ... + pfX^f, used to produce consistent shares in tests.
#[derive(Debug, Clone, Default)]
pub struct Polynomial {
    pub coefficients: Vec<BigInt>,
}

impl Polynomial {
    pub fn from_coefficients(coefficients: &[BigInt]) -> Self {
        Polynomial {
            coefficients: coefficients.to_vec(),
        }
    }

    // non-negative coefficients below 2^bits
    pub fn random(degree: usize, bits: usize) -> Self {
        let mut rng = rand::thread_rng();
        let bound = BigUint::one() << bits;

        let coefficients: Vec<BigInt> = (0..=degree)
            .map(|_| rng.gen_biguint_below(&bound).to_bigint().unwrap())
            .collect();

        Polynomial::from_coefficients(&coefficients)
    }

    pub fn secret(&self) -> BigInt {
        self.coefficients.first().cloned().unwrap_or_else(BigInt::zero)
    }

    // get p(X) = value, Horner's rule
    pub fn get_value(&self, x: &BigInt) -> BigInt {
        self.coefficients
            .iter()
            .rev()
            .fold(BigInt::zero(), |acc, coefficient| acc * x + coefficient)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;

    use super::Polynomial;

    #[test]
    fn test_random_polynomial() {
        let polynomial = Polynomial::random(3, 64);

        assert_eq!(polynomial.coefficients.len(), 4);
        assert!(polynomial
            .coefficients
            .iter()
            .all(|c| c >= &BigInt::from(0) && c.bits() <= 64));
    }

    #[test]
    fn test_get_value() {
        let polynomial = Polynomial::from_coefficients(&[
            BigInt::from(3),
            BigInt::from(2),
            BigInt::from(2),
            BigInt::from(4),
        ]);

        // p(0) = a_0 = 3
        assert_eq!(polynomial.get_value(&BigInt::from(0)), BigInt::from(3));
        assert_eq!(polynomial.secret(), BigInt::from(3));

        // p(1) = 11
        assert_eq!(polynomial.get_value(&BigInt::from(1)), BigInt::from(11));

        // p(2) = 47
        assert_eq!(polynomial.get_value(&BigInt::from(2)), BigInt::from(47));

        // p(-1) = 3 - 2 + 2 - 4
        assert_eq!(polynomial.get_value(&BigInt::from(-1)), BigInt::from(-1));
    }
}
