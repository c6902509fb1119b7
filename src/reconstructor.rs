use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use tracing::{debug, trace};

use crate::{
    error::{ReconstructError, Result},
    share::Share,
    util::Util,
};

/// How the Lagrange sum is divided out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DivisionPolicy {
    /// Accumulate all terms as one reduced fraction and divide once at the end.
    /// A non-integral result is reported as [`ReconstructError::NonIntegerResult`].
    #[default]
    Exact,
    /// Divide every term on its own, truncating toward zero, and sum the quotients.
    Truncate,
}

/// Collects shares and recovers the constant term of the polynomial through them.
///
/// Not internally synchronized; callers sharing an instance across threads
/// must serialize access themselves.
#[derive(Debug, Clone, Default)]
pub struct SecretReconstructor {
    shares: Vec<Share>,
    policy: DivisionPolicy,
}

impl SecretReconstructor {
    pub fn new() -> Self {
        SecretReconstructor::with_policy(DivisionPolicy::default())
    }

    pub fn with_policy(policy: DivisionPolicy) -> Self {
        SecretReconstructor {
            shares: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DivisionPolicy {
        self.policy
    }

    /// Shares in insertion order.
    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Decodes `y_digits` in `y_base` and stores the share at `x`.
    ///
    /// Decoding errors are returned unchanged. A share whose `x` is already
    /// present is rejected with [`ReconstructError::DuplicateShareX`] and the
    /// collection is left untouched.
    pub fn insert_share(&mut self, x: BigInt, y_digits: &str, y_base: u32) -> Result<()> {
        let share = Share::decode(x, y_digits, y_base)?;

        self.push(share)
    }

    /// Stores an already decoded point.
    pub fn insert_point(&mut self, x: BigInt, y: BigInt) -> Result<()> {
        self.push(Share::new(x, y))
    }

    fn push(&mut self, share: Share) -> Result<()> {
        if self.shares.iter().any(|s| s.x() == share.x()) {
            return Err(ReconstructError::DuplicateShareX(share.x().clone()));
        }

        debug!(x = %share.x(), count = self.shares.len() + 1, "inserted share");

        self.shares.push(share);

        Ok(())
    }

    /// Lagrange interpolation of the stored shares at `x = 0`.
    pub fn reconstruct_secret(&self) -> Result<BigInt> {
        self.interpolate_at(&BigInt::zero())
    }

    /// Lagrange interpolation of the stored shares at `at`.
    pub fn interpolate_at(&self, at: &BigInt) -> Result<BigInt> {
        if self.shares.is_empty() {
            return Err(ReconstructError::NoSharesAvailable);
        }

        let xs: Vec<&BigInt> = self.shares.iter().map(Share::x).collect();

        match self.policy {
            DivisionPolicy::Exact => self.interpolate_exact(&xs, at),
            DivisionPolicy::Truncate => self.interpolate_truncated(&xs, at),
        }
    }

    fn interpolate_exact(&self, xs: &[&BigInt], at: &BigInt) -> Result<BigInt> {
        let mut numerator = BigInt::zero();
        let mut denominator = BigInt::one();

        for (j, share) in self.shares.iter().enumerate() {
            let (basis_numerator, basis_denominator) = Util::lagrange_basis(j, xs, at);

            if basis_denominator.is_zero() {
                return Err(ReconstructError::DegenerateShareSet(share.x().clone()));
            }

            let term = share.y() * basis_numerator;

            trace!(
                x = %share.x(),
                numerator = %term,
                denominator = %basis_denominator,
                "lagrange term"
            );

            // numerator / denominator + term / basis_denominator
            numerator = numerator * &basis_denominator + term * &denominator;
            denominator *= basis_denominator;

            let (n, d) = Util::reduce(numerator, denominator);
            numerator = n;
            denominator = d;
        }

        if numerator.is_multiple_of(&denominator) {
            Ok(numerator / denominator)
        } else {
            Err(ReconstructError::NonIntegerResult {
                numerator,
                denominator,
            })
        }
    }

    fn interpolate_truncated(&self, xs: &[&BigInt], at: &BigInt) -> Result<BigInt> {
        let mut result = BigInt::zero();

        for (j, share) in self.shares.iter().enumerate() {
            let (basis_numerator, basis_denominator) = Util::lagrange_basis(j, xs, at);

            if basis_denominator.is_zero() {
                return Err(ReconstructError::DegenerateShareSet(share.x().clone()));
            }

            // BigInt division truncates toward zero
            let term = share.y() * basis_numerator / basis_denominator;

            trace!(x = %share.x(), term = %term, "lagrange term");

            result += term;
        }

        Ok(result)
    }

    /// Drops every stored share; the policy is kept.
    pub fn reset_shares(&mut self) {
        debug!(dropped = self.shares.len(), "reset shares");

        self.shares.clear();
    }
}
