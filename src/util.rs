use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

pub struct Util {}

impl Util {
    // Lagrange basis polynomial L_j evaluated at `at`, as an unreduced fraction:
    //   L_j(at) = prod_{i != j} (x_i - at) / (x_i - x_j)
    // At `at = 0` the numerator is prod x_i and the denominator prod (x_i - x_j).
    pub fn lagrange_basis(j: usize, xs: &[&BigInt], at: &BigInt) -> (BigInt, BigInt) {
        let mut numerator = BigInt::one();
        let mut denominator = BigInt::one();
        let x_j = xs[j];

        for (i, x_i) in xs.iter().enumerate() {
            if i == j {
                continue;
            }

            numerator *= *x_i - at;
            denominator *= *x_i - x_j;
        }

        (numerator, denominator)
    }

    // Reduces numerator / denominator to lowest terms with a positive denominator.
    // The denominator must be non-zero.
    pub fn reduce(numerator: BigInt, denominator: BigInt) -> (BigInt, BigInt) {
        let gcd = numerator.gcd(&denominator);

        let (numerator, denominator) = if gcd.is_zero() || gcd.is_one() {
            (numerator, denominator)
        } else {
            (numerator / &gcd, denominator / &gcd)
        };

        if denominator.is_negative() {
            (-numerator, -denominator)
        } else {
            (numerator, denominator)
        }
    }
}
