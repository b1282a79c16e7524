//! Fixed-window p-adic expansions.
//!
//! A [`Padic`] holds the digits of `Σ digit[i]·p^i` for logical exponents
//! starting at `min(valuation, 0)`. Digits live in a [`DigitWindow`], a
//! buffer addressed by signed exponent so that fractional digits (negative
//! exponents) need no special casing in the arithmetic.

use core::fmt;

use crate::bounds::Bounds;
use crate::error::{PadicError, Result};
use crate::factor::is_prime;
use crate::ratio_trait::RatioInteger;

/// Digit storage addressed by logical exponent.
///
/// Backed by `2 * max_exp` cells covering exponents `[-max_exp, max_exp)`.
/// Reads outside that range return `0`; writes outside it are dropped.
///
/// ```
/// use padic_ratio::DigitWindow;
///
/// let mut w = DigitWindow::new(4);
/// w.set(-4, 2);
/// w.set(3, 1);
/// w.set(4, 9); // beyond the buffer
/// assert_eq!(w.get(-4), 2);
/// assert_eq!(w.get(3), 1);
/// assert_eq!(w.get(4), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DigitWindow {
    offset: usize,
    cells: Vec<u64>,
}

impl DigitWindow {
    /// Zeroed window over `[-max_exp, max_exp)`.
    pub fn new(max_exp: usize) -> Self {
        Self {
            offset: max_exp,
            cells: vec![0; 2 * max_exp],
        }
    }

    #[inline]
    fn slot(&self, exponent: i32) -> Option<usize> {
        let index = exponent as i64 + self.offset as i64;
        (0..self.cells.len() as i64)
            .contains(&index)
            .then_some(index as usize)
    }

    /// Whether `exponent` has a backing cell.
    #[inline]
    pub fn contains(&self, exponent: i32) -> bool {
        self.slot(exponent).is_some()
    }

    /// Digit at `exponent`.
    #[inline]
    pub fn get(&self, exponent: i32) -> u64 {
        self.slot(exponent).map_or(0, |i| self.cells[i])
    }

    /// Store `digit` at `exponent`.
    #[inline]
    pub fn set(&mut self, exponent: i32, digit: u64) {
        if let Some(i) = self.slot(exponent) {
            self.cells[i] = digit;
        }
    }
}

/// A truncated p-adic expansion.
///
/// Values are immutable: arithmetic returns a new `Padic` with its own
/// freshly allocated digits.
///
/// # Examples
///
/// ```
/// use padic_ratio::RatioU64;
///
/// let third = RatioU64::from_i64(1, 3).unwrap().to_padic(5, 10).unwrap();
/// assert_eq!(third.to_string(), "3 1 3 1 3 1 3 1 3 2");
///
/// let two_thirds = RatioU64::from_i64(2, 3).unwrap().to_padic(5, 10).unwrap();
/// assert_eq!(third.add(&two_thirds).unwrap().to_string(), "0 0 0 0 0 0 0 0 0 1");
/// ```
#[derive(Clone, Debug)]
pub struct Padic {
    prime: u64,
    precision: usize,
    valuation: i32,
    digits: DigitWindow,
    bounds: Bounds,
}

impl Padic {
    pub(crate) fn from_parts(
        prime: u64,
        precision: usize,
        valuation: i32,
        digits: DigitWindow,
        bounds: Bounds,
    ) -> Self {
        Self {
            prime,
            precision,
            valuation,
            digits,
            bounds,
        }
    }

    /// The prime `p`.
    #[inline]
    pub fn prime(&self) -> u64 {
        self.prime
    }

    /// Number of digits in the window.
    #[inline]
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Exponent of the lowest non-zero digit.
    #[inline]
    pub fn valuation(&self) -> i32 {
        self.valuation
    }

    /// Bounds this expansion was built with.
    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Coefficient of `p^exponent`.
    #[inline]
    pub fn digit(&self, exponent: i32) -> u64 {
        self.digits.get(exponent)
    }

    /// Lowest exponent of the display window, `min(valuation, 0)`.
    #[inline]
    fn window_start(&self) -> i32 {
        self.valuation.min(0)
    }

    #[inline]
    fn span_end(&self) -> i32 {
        self.precision as i32 + self.valuation
    }

    /// The `precision` window digits, lowest exponent first.
    ///
    /// ```
    /// use padic_ratio::RatioU64;
    ///
    /// let x = RatioU64::from_i64(38, 1).unwrap().to_padic(5, 7).unwrap();
    /// assert_eq!(x.digits(), vec![3, 2, 1, 0, 0, 0, 0]);
    /// ```
    pub fn digits(&self) -> Vec<u64> {
        let start = self.window_start();
        (start..start + self.precision as i32)
            .map(|i| self.digits.get(i))
            .collect()
    }

    // ========================================================================
    // ARITHMETIC
    // ========================================================================

    /// Digit-wise sum with carry, starting at the lower of the two
    /// valuations.
    ///
    /// # Errors
    ///
    /// [`PadicError::InvalidParameter`] if the primes, the precisions or
    /// the bounds differ.
    pub fn add(&self, other: &Padic) -> Result<Padic> {
        if self.prime != other.prime {
            return Err(PadicError::InvalidParameter(format!(
                "cannot add a {}-adic and a {}-adic number",
                self.prime, other.prime
            )));
        }
        if self.precision != other.precision {
            return Err(PadicError::InvalidParameter(format!(
                "precision mismatch: {} vs {}",
                self.precision, other.precision
            )));
        }
        if self.bounds != other.bounds {
            return Err(PadicError::InvalidParameter(format!(
                "bounds mismatch: {:?} vs {:?}",
                self.bounds, other.bounds
            )));
        }

        let valuation = self.valuation.min(other.valuation);
        let prime = u128::from(self.prime);
        let mut digits = DigitWindow::new(self.bounds.max_exp);
        let mut carry = 0u128;
        for i in valuation..=self.precision as i32 + valuation {
            carry += u128::from(self.digits.get(i)) + u128::from(other.digits.get(i));
            if carry >= prime {
                digits.set(i, (carry - prime) as u64);
                carry = 1;
            } else {
                digits.set(i, carry as u64);
                carry = 0;
            }
        }

        Ok(Self::from_parts(
            self.prime,
            self.precision,
            valuation,
            digits,
            self.bounds,
        ))
    }

    /// Radix complement: every digit becomes `p - 1 - digit`, then one is
    /// added at the valuation.
    ///
    /// Exact negation only for expansions of finite integers; the digits
    /// past the window are assumed to continue the `p - 1` run.
    ///
    /// ```
    /// use padic_ratio::RatioU64;
    ///
    /// let minus_one = RatioU64::integer(-1).to_padic(5, 6).unwrap();
    /// assert_eq!(minus_one.to_string(), "4 4 4 4 4 4");
    /// assert_eq!(minus_one.cmpt().to_string(), "0 0 0 0 0 1");
    /// ```
    pub fn cmpt(&self) -> Padic {
        let p1 = self.prime - 1;
        let mut digits = self.digits.clone();
        let mut carry = 1u64;
        for i in self.valuation..=self.span_end() {
            carry += p1 - digits.get(i);
            if carry > p1 {
                digits.set(i, carry - self.prime);
                carry = 1;
            } else {
                digits.set(i, carry);
                carry = 0;
            }
        }
        Self::from_parts(
            self.prime,
            self.precision,
            self.valuation,
            digits,
            self.bounds,
        )
    }

    /// Horner evaluation of the window as a base-`p` numeral.
    ///
    /// Returns `None` when the value does not fit in `T`.
    ///
    /// ```
    /// use crypto_bigint::U64;
    /// use padic_ratio::RatioU64;
    ///
    /// let x = RatioU64::from_i64(-517, 1477).unwrap().to_padic(7, 11).unwrap();
    /// assert_eq!(x.dsum::<U64>(), Some(U64::from_u64(384_219_886)));
    /// ```
    pub fn dsum<T: RatioInteger>(&self) -> Option<T> {
        let start = self.window_start();
        let prime = T::from_u64(self.prime);
        let mut sum = T::ZERO;
        for i in (start..start + self.precision as i32).rev() {
            sum = sum
                .checked_mul(&prime)?
                .checked_add(&T::from_u64(self.digits.get(i)))?;
        }
        Some(sum)
    }

    // ========================================================================
    // PARSING
    // ========================================================================

    /// Parse the output of `to_string` back into an expansion, using
    /// default [`Bounds`].
    ///
    /// ```
    /// use padic_ratio::Padic;
    ///
    /// let x = Padic::parse("1 2 3 4 3 5 4 6 4 1. 1", 7, 11).unwrap();
    /// assert_eq!(x.valuation(), -1);
    /// assert_eq!(x.digit(-1), 1);
    /// assert_eq!(x.digit(9), 1);
    /// ```
    pub fn parse(text: &str, prime: u64, precision: usize) -> Result<Padic> {
        Self::parse_with(text, prime, precision, &Bounds::default())
    }

    /// Parse space-separated digits, highest exponent first, with an
    /// optional `.` after the digit of exponent 0.
    ///
    /// With a point, the valuation is minus the number of digits after it;
    /// otherwise it is the exponent of the lowest non-zero digit.
    ///
    /// # Errors
    ///
    /// [`PadicError::InvalidParameter`] for a prime that is composite or
    /// outside `2..=max_prime`, a precision outside `1..max_exp`, an empty
    /// string, a chunk that is not a digit, a second point, or a digit
    /// not below `prime`. [`PadicError::ValueOutOfRange`] if the digits do
    /// not fit the buffer.
    pub fn parse_with(text: &str, prime: u64, precision: usize, bounds: &Bounds) -> Result<Padic> {
        if prime < 2 || prime > bounds.max_prime {
            return Err(PadicError::InvalidParameter(format!(
                "prime should be in 2..={}, got {prime}",
                bounds.max_prime
            )));
        }
        if !is_prime(prime) {
            return Err(PadicError::InvalidParameter(format!("{prime} is not prime")));
        }
        if precision < 1 || precision > bounds.max_precision() {
            return Err(PadicError::InvalidParameter(format!(
                "precision should be in 1..={}, got {precision}",
                bounds.max_precision()
            )));
        }

        let mut fraction_len: Option<usize> = None;
        let mut values = Vec::new();
        for (i, chunk) in text.split_whitespace().rev().enumerate() {
            let number = match chunk.strip_suffix('.') {
                Some(number) => {
                    if fraction_len.replace(i).is_some() {
                        return Err(PadicError::InvalidParameter(format!(
                            "more than one point in {text:?}"
                        )));
                    }
                    number
                }
                None => chunk,
            };
            let digit: u64 = number.parse().map_err(|_| {
                PadicError::InvalidParameter(format!("not a digit: {chunk:?}"))
            })?;
            if digit >= prime {
                return Err(PadicError::InvalidParameter(format!(
                    "digit {digit} is not below {prime}"
                )));
            }
            values.push(digit);
        }
        if values.is_empty() {
            return Err(PadicError::InvalidParameter("empty digit string".into()));
        }

        let start = -(fraction_len.unwrap_or(0) as i32);
        let mut digits = DigitWindow::new(bounds.max_exp);
        let end = start + values.len() as i32 - 1;
        if !digits.contains(start) || !digits.contains(end) {
            return Err(PadicError::ValueOutOfRange(format!(
                "{} digits do not fit a buffer of exponents [-{m}, {m})",
                values.len(),
                m = bounds.max_exp
            )));
        }
        for (j, digit) in values.iter().enumerate() {
            digits.set(start + j as i32, *digit);
        }

        let valuation = match fraction_len {
            Some(len) if len > 0 => start,
            _ => values
                .iter()
                .position(|&d| d != 0)
                .map_or(0, |j| start + j as i32),
        };

        Ok(Self::from_parts(prime, precision, valuation, digits, *bounds))
    }
}

impl PartialEq for Padic {
    /// Same prime, precision, valuation and window digits.
    fn eq(&self, other: &Self) -> bool {
        self.prime == other.prime
            && self.precision == other.precision
            && self.valuation == other.valuation
            && self.digits() == other.digits()
    }
}

impl Eq for Padic {}

impl fmt::Display for Padic {
    /// Digits from high to low exponent, space separated, with a `.` after
    /// the digit of exponent 0 when the valuation is negative.
    ///
    /// Normally the `precision` digits of the window. The rendering is
    /// extended upwards to reach exponent 0 when the valuation is negative,
    /// and to reach the valuation when it is positive, so that
    /// [`parse`](Padic::parse) recovers the valuation from the text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.window_start();
        let top = start + self.precision as i32 - 1;
        let top = if self.valuation < 0 {
            top.max(0)
        } else {
            top.max(self.valuation)
        };
        for i in (start..=top).rev() {
            write!(f, "{}", self.digits.get(i))?;
            if i == 0 && self.valuation < 0 {
                f.write_str(".")?;
            }
            if i > start {
                f.write_str(" ")?;
            }
        }
        Ok(())
    }
}
