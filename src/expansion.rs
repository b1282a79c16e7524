//! Digit-by-digit expansion in exact rational arithmetic.
//!
//! Each [`Step`] records `orig = digit + prime * next`. The brute-force
//! stepper ([`Ratio::next_padic_ratio`], [`Ratio::to_padic_expansion`])
//! finds every step by search and serves as an independent check of
//! [`Ratio::to_padic`]; it is far too slow for anything else.
//! [`Ratio::to_padic_steps`] rebuilds the same steps from the fast
//! conversion.

use tracing::trace;

use crate::error::{PadicError, Result};
use crate::ratio_trait::RatioInteger;
use crate::Ratio;

/// One digit of an expansion: `orig = digit + prime * next`.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<T: RatioInteger> {
    /// Digit in `[0, prime)`.
    pub digit: u64,
    /// Value being expanded at this step.
    pub orig: Ratio<T>,
    /// Remaining value, expanded by the following step.
    pub next: Ratio<T>,
}

impl<T: RatioInteger> Ratio<T> {
    fn ensure_unit_denominator(&self, prime: u64) -> Result<()> {
        if prime < 2 {
            return Err(PadicError::InvalidParameter(format!(
                "prime should be >= 2, got {prime}"
            )));
        }
        if self.denom.rem_u64(prime) == 0 {
            return Err(PadicError::InvalidParameter(format!(
                "denominator {} is divisible by {prime}",
                self.denom.to_decimal_string()
            )));
        }
        Ok(())
    }

    /// Find the next digit by search.
    ///
    /// Tries every digit `d0` in `[0, prime)` against residuals `±m/d`,
    /// `d` the reduced denominator and `0 <= m <= max(|n|, d)`, until
    /// `d0 + prime * residual` equals the ratio.
    ///
    /// ```
    /// use padic_ratio::RatioU64;
    ///
    /// let step = RatioU64::from_i64(2, 5).unwrap().next_padic_ratio(3).unwrap();
    /// assert_eq!(step.digit, 1);
    /// assert_eq!(step.next.to_string(), "-1/5");
    /// ```
    ///
    /// # Errors
    ///
    /// [`PadicError::InvalidParameter`] if `prime < 2` or divides the
    /// denominator. [`PadicError::ValueOutOfRange`] if the search space
    /// does not fit in a machine word.
    pub fn next_padic_ratio(&self, prime: u64) -> Result<Step<T>> {
        let orig = self.reduce();
        orig.ensure_unit_denominator(prime)?;

        let limit = match (orig.numer.try_to_u64(), orig.denom.try_to_u64()) {
            (Some(n), Some(d)) => n.max(d),
            _ => {
                return Err(PadicError::ValueOutOfRange(format!(
                    "{orig} is too large to search"
                )))
            }
        };

        let scale = Self::integer_u64(prime);
        for digit in 0..prime {
            let head = Self::integer_u64(digit);
            for m in 0..=limit {
                for negative in [false, true] {
                    let next = Self::new_raw(T::from_u64(m), orig.denom.clone(), negative);
                    if head.add(&scale.mul(&next)) == orig {
                        trace!(digit, %next, "step found");
                        return Ok(Step {
                            digit,
                            orig,
                            next: next.reduce(),
                        });
                    }
                }
            }
        }

        Err(PadicError::ReconstructionFailed(format!(
            "no digit found for {orig} in base {prime}"
        )))
    }

    /// First `precision` steps of the brute-force stepper.
    ///
    /// ```
    /// use padic_ratio::RatioU64;
    ///
    /// let steps = RatioU64::from_i64(2, 5).unwrap().to_padic_expansion(3, 6).unwrap();
    /// let digits: Vec<u64> = steps.iter().map(|s| s.digit).collect();
    /// assert_eq!(digits, vec![1, 1, 2, 1, 0, 1]);
    /// ```
    pub fn to_padic_expansion(&self, prime: u64, precision: usize) -> Result<Vec<Step<T>>> {
        let mut steps = Vec::with_capacity(precision);
        let mut current = self.clone();
        for _ in 0..precision {
            let step = current.next_padic_ratio(prime)?;
            current = step.next.clone();
            steps.push(step);
        }
        Ok(steps)
    }

    /// The steps of [`to_padic`](Ratio::to_padic), each residual computed
    /// as `(orig - digit) / prime`.
    ///
    /// # Errors
    ///
    /// Same as [`to_padic`](Ratio::to_padic); additionally
    /// [`PadicError::InvalidParameter`] if `prime` divides the denominator.
    pub fn to_padic_steps(&self, prime: u64, precision: usize) -> Result<Vec<Step<T>>> {
        let orig = self.reduce();
        orig.ensure_unit_denominator(prime)?;
        let padic = orig.to_padic(prime, precision)?;

        let scale = Self::integer_u64(padic.prime());
        let mut current = orig;
        let mut steps = Vec::with_capacity(padic.precision());
        for digit in padic.digits() {
            let next = current
                .sub(&Self::integer_u64(digit))
                .div(&scale)?
                .reduce();
            steps.push(Step {
                digit,
                orig: current,
                next: next.clone(),
            });
            current = next;
        }
        Ok(steps)
    }

    fn integer_u64(n: u64) -> Self {
        Self::new_raw(T::from_u64(n), T::ONE, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RatioU64;

    fn r(n: i64, d: i64) -> RatioU64 {
        RatioU64::from_i64(n, d).unwrap()
    }

    #[test]
    fn test_two_fifths_base_three() {
        let steps = r(2, 5).to_padic_expansion(3, 6).unwrap();
        let digits: Vec<u64> = steps.iter().map(|s| s.digit).collect();
        assert_eq!(digits, vec![1, 1, 2, 1, 0, 1]);
        let nexts: Vec<String> = steps.iter().map(|s| s.next.to_string()).collect();
        assert_eq!(nexts, vec!["-1/5", "-2/5", "-4/5", "-3/5", "-1/5", "-2/5"]);
    }

    #[test]
    fn test_each_step_recombines() {
        let prime = RatioU64::integer(7);
        for step in r(-517, 211).to_padic_expansion(7, 5).unwrap() {
            let back = RatioU64::integer(step.digit as i64).add(&prime.mul(&step.next));
            assert_eq!(back, step.orig);
        }
    }

    #[test]
    fn test_stepper_matches_fast_digits() {
        let x = r(17, 7);
        let slow: Vec<u64> = x.to_padic_expansion(5, 7).unwrap().iter().map(|s| s.digit).collect();
        let fast = x.to_padic(5, 7).unwrap().digits();
        assert_eq!(slow, fast);
    }

    #[test]
    fn test_steps_from_fast_conversion() {
        let slow = r(2, 5).to_padic_expansion(3, 6).unwrap();
        let fast = r(2, 5).to_padic_steps(3, 6).unwrap();
        assert_eq!(slow, fast);
    }

    #[test]
    fn test_integer_steps() {
        let steps = RatioU64::integer(38).to_padic_steps(5, 4).unwrap();
        let digits: Vec<u64> = steps.iter().map(|s| s.digit).collect();
        assert_eq!(digits, vec![3, 2, 1, 0]);
        assert!(steps[3].next.is_zero());
    }

    #[test]
    fn test_denominator_must_be_unit() {
        assert!(matches!(r(1, 10).next_padic_ratio(5), Err(PadicError::InvalidParameter(_))));
        assert!(matches!(r(1, 10).to_padic_steps(5, 3), Err(PadicError::InvalidParameter(_))));
        assert!(matches!(r(1, 3).next_padic_ratio(1), Err(PadicError::InvalidParameter(_))));
    }

    #[test]
    fn test_zero_expands_to_zero_digits() {
        let steps = RatioU64::zero().to_padic_expansion(3, 3).unwrap();
        assert!(steps.iter().all(|s| s.digit == 0 && s.next.is_zero()));
    }
}
