//! Conversions between [`Ratio`] and [`Padic`].
//!
//! - [`Ratio::to_padic`]: Hensel digit extraction
//! - [`Padic::convert_to_ratio`]: bounded rational reconstruction

use tracing::{debug, trace, warn};

use crate::bounds::Bounds;
use crate::error::{PadicError, Result};
use crate::factor::is_prime;
use crate::modular::{mod_inverse, mul_mod};
use crate::padic::{DigitWindow, Padic};
use crate::ratio_trait::RatioInteger;
use crate::Ratio;

impl<T: RatioInteger> Ratio<T> {
    /// p-adic expansion of the ratio with default [`Bounds`].
    ///
    /// ```
    /// use padic_ratio::RatioU64;
    ///
    /// let x = RatioU64::from_i64(17, 7).unwrap().to_padic(5, 7).unwrap();
    /// assert_eq!(x.to_string(), "3 2 4 1 2 1 1");
    /// assert_eq!(x.valuation(), 0);
    /// ```
    pub fn to_padic(&self, prime: u64, precision: usize) -> Result<Padic> {
        self.to_padic_with(prime, precision, &Bounds::default())
    }

    /// p-adic expansion of the ratio.
    ///
    /// `prime` is clipped to `bounds.max_prime` and `precision` to
    /// `bounds.max_precision()`. The ratio is reduced first; digits are then
    /// produced from the lowest exponent up until `precision + 1` digits
    /// past the valuation exist, the buffer ends, or the expansion
    /// terminates.
    ///
    /// # Errors
    ///
    /// - [`PadicError::InvalidParameter`]: `prime < 2`, `precision < 1`
    ///   before or after clipping, or the (clipped) prime is composite
    /// - [`PadicError::ZeroOperand`]: the ratio is zero
    /// - [`PadicError::ValueOutOfRange`]: numerator or denominator above
    ///   `bounds.max_arg`, more than `bounds.max_exp` factors of `prime`
    ///   in the denominator, or `bounds.max_exp` or more in the numerator
    #[tracing::instrument(level = "debug", skip(self, bounds), fields(ratio = %self))]
    pub fn to_padic_with(&self, prime: u64, precision: usize, bounds: &Bounds) -> Result<Padic> {
        if prime < 2 {
            return Err(PadicError::InvalidParameter(format!(
                "prime should be >= 2, got {prime}"
            )));
        }
        if precision < 1 {
            return Err(PadicError::InvalidParameter(
                "precision should be >= 1".into(),
            ));
        }
        let prime = if prime > bounds.max_prime {
            warn!(prime, max_prime = bounds.max_prime, "prime clipped");
            bounds.max_prime
        } else {
            prime
        };
        let precision = if precision > bounds.max_precision() {
            warn!(precision, max_precision = bounds.max_precision(), "precision clipped");
            bounds.max_precision()
        } else {
            precision
        };
        if precision < 1 {
            return Err(PadicError::InvalidParameter(format!(
                "max_exp {} leaves no room for a digit",
                bounds.max_exp
            )));
        }
        if !is_prime(prime) {
            return Err(PadicError::InvalidParameter(format!("{prime} is not prime")));
        }

        let reduced = self.reduce();
        if reduced.is_zero() {
            return Err(PadicError::ZeroOperand("0 has no p-adic expansion".into()));
        }
        let numer = bounded_word(&reduced.numer, bounds.max_arg, "numerator")?;
        let denom = bounded_word(&reduced.denom, bounds.max_arg, "denominator")?;

        let p = prime as i128;
        let max_exp = bounds.max_exp as i32;

        // denominator: strip the prime, what is left is a unit
        let mut unit = denom as i128;
        let mut exponent: i32 = 0;
        while unit % p == 0 {
            unit /= p;
            exponent -= 1;
        }
        if exponent < -max_exp {
            return Err(PadicError::ValueOutOfRange(format!(
                "denominator holds {} factors of {prime}, at most {max_exp} fit",
                -exponent
            )));
        }
        let unit_inverse = mod_inverse((unit % p) as u64, prime).ok_or_else(|| {
            PadicError::InvalidParameter(format!("{unit} is not invertible modulo {prime}"))
        })?;

        let mut rest: i128 = if reduced.negative {
            -(numer as i128)
        } else {
            numer as i128
        };
        let mut valuation: Option<i32> = None;
        let mut digits = DigitWindow::new(bounds.max_exp);
        loop {
            while rest != 0 && rest % p == 0 {
                rest /= p;
                exponent += 1;
            }
            let v = *valuation.get_or_insert(exponent);
            if exponent >= max_exp || exponent - v > precision as i32 {
                break;
            }

            let digit = mul_mod(rest.rem_euclid(p) as u64, unit_inverse, prime);
            trace!(exponent, digit, "digit");
            digits.set(exponent, digit);
            rest -= digit as i128 * unit;
            if rest == 0 {
                break;
            }
        }

        let valuation = valuation.unwrap_or(exponent);
        if valuation >= max_exp {
            return Err(PadicError::ValueOutOfRange(format!(
                "numerator holds {valuation} factors of {prime}, fewer than {max_exp} fit"
            )));
        }
        debug!(prime, precision, valuation, "expansion done");
        Ok(Padic::from_parts(prime, precision, valuation, digits, *bounds))
    }
}

/// `value` as a machine word, if it does not exceed `max_arg`.
fn bounded_word<T: RatioInteger>(value: &T, max_arg: u64, what: &str) -> Result<u64> {
    match value.try_to_u64() {
        Some(word) if word <= max_arg => Ok(word),
        _ => Err(PadicError::ValueOutOfRange(format!(
            "{what} {} exceeds {max_arg}",
            value.to_decimal_string()
        ))),
    }
}

/// Distance from the valuation to the highest window exponent whose digit
/// differs from `filler`, or `-1` when every digit equals `filler`.
fn significant_span(padic: &Padic, valuation: i32, filler: u64) -> i32 {
    let mut j = padic.precision() as i32 - 1 + valuation;
    while j >= valuation && padic.digit(j) == filler {
        j -= 1;
    }
    j - valuation
}

impl Padic {
    /// Recover a small rational from the expansion.
    ///
    /// Tries multipliers `i = 1, 2, ...` up to `bounds.max_approx`. The
    /// search stops when the expansion itself is a small non-negative
    /// integer (non-zero digits confined to the lower half of the window),
    /// or when `i` times it ends in a run of `p - 1` digits covering the
    /// upper half, i.e. looks like a small negative integer. The result is
    /// that integer over `i`, scaled by `p^-valuation` for negative
    /// valuations, and is not reduced.
    ///
    /// Only reliable when numerator and denominator are well below
    /// `p^(precision / 2)`.
    ///
    /// ```
    /// use padic_ratio::RatioU64;
    ///
    /// let x = RatioU64::from_i64(-2, 7).unwrap().to_padic(5, 8).unwrap();
    /// let back: RatioU64 = x.convert_to_ratio().unwrap();
    /// assert_eq!(back.to_string(), "-2/7");
    /// ```
    ///
    /// # Errors
    ///
    /// [`PadicError::ReconstructionFailed`] if no multiplier within
    /// `bounds.max_approx` works or the integer does not fit in `T`.
    pub fn convert_to_ratio<T: RatioInteger>(&self) -> Result<Ratio<T>> {
        let prime = self.prime();
        let valuation = self.valuation();
        let precision = self.precision() as i32;
        let max_approx = self.bounds().max_approx;

        let mut acc = self.clone();
        let mut multiplier = 1u64;
        let mut negative = false;
        let small_positive = significant_span(self, valuation, 0) * 2 < precision;
        while !small_positive && multiplier <= max_approx {
            if significant_span(&acc, valuation, prime - 1) * 2 < precision {
                negative = true;
                break;
            }
            acc = acc.add(self)?;
            multiplier += 1;
            trace!(multiplier, "reconstruction round");
        }

        if multiplier > max_approx {
            debug!(max_approx, "reconstruction exhausted");
            return Err(PadicError::ReconstructionFailed(format!(
                "no multiplier up to {max_approx} yields an integer"
            )));
        }
        if negative {
            acc = acc.cmpt();
        }
        let numer: T = acc.dsum().ok_or_else(|| {
            PadicError::ReconstructionFailed(format!(
                "digit sum does not fit in {} bits",
                T::BITS
            ))
        })?;

        let mut denom = T::from_u64(multiplier);
        let base = T::from_u64(prime);
        for _ in valuation..0 {
            denom = denom.checked_mul(&base).ok_or_else(|| {
                PadicError::ReconstructionFailed(format!(
                    "denominator does not fit in {} bits",
                    T::BITS
                ))
            })?;
        }

        let ratio = Ratio::new_raw(numer, denom, negative);
        debug!(%ratio, multiplier, negative, "reconstructed");
        Ok(ratio)
    }
}
