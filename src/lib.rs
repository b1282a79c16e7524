//! Exact rationals and fixed-precision p-adic expansions over crypto-bigint
//! integers.
//!
//! This library provides `Ratio<T>`, a signed rational generic over the
//! crypto-bigint unsigned integers `U64` through `U512`, and [`Padic`], a
//! truncated base-`p` digit expansion of such a rational.
//!
//! # Features
//!
//! - **Hensel digit extraction**: [`Ratio::to_padic`] produces the p-adic
//!   digits of any bounded rational, including negative valuations
//! - **Digit arithmetic**: carry-propagating [`Padic::add`], radix
//!   complement [`Padic::cmpt`] and Horner evaluation [`Padic::dsum`]
//! - **Rational reconstruction**: [`Padic::convert_to_ratio`] recovers small
//!   rationals from a truncated expansion
//! - **Explicit bounds**: every loop is capped by a [`Bounds`] value instead
//!   of process-wide constants
//!
//! # Design Philosophy
//!
//! Like the arithmetic it is built on, `Ratio` operations return
//! **unreduced** results. Call [`Ratio::reduce`] (or [`Ratio::normalize`]
//! in place) when lowest terms matter. Equality compares values, so `2/4`
//! equals `1/2`.
//!
//! # Examples
//!
//! ## Ratio arithmetic
//!
//! ```
//! use padic_ratio::RatioU64;
//!
//! let a = RatioU64::from_i64(12, 5).unwrap();
//! let b = RatioU64::from_i64(12, 5).unwrap();
//! assert_eq!(a.mul(&b).to_string(), "144/25");
//! assert_eq!(a.div(&b).unwrap().to_string(), "60/60");
//! assert_eq!(a.add(&b).reduce().to_string(), "24/5");
//! ```
//!
//! ## p-adic expansion
//!
//! ```
//! use padic_ratio::RatioU64;
//!
//! let x = RatioU64::from_i64(-517, 1477).unwrap();
//! let padic = x.to_padic(7, 11).unwrap();
//! assert_eq!(padic.valuation(), -1);
//! assert_eq!(padic.to_string(), "1 2 3 4 3 5 4 6 4 1. 1");
//! assert_eq!(padic.cmpt().to_string(), "5 4 3 2 3 1 2 0 2 5. 6");
//! ```
//!
//! ## Reconstruction
//!
//! ```
//! use padic_ratio::{Padic, RatioU64};
//!
//! let padic = Padic::parse("0 0 0 0 1 2 3", 5, 7).unwrap();
//! let back: RatioU64 = padic.convert_to_ratio().unwrap();
//! assert_eq!(back.to_string(), "38");
//! ```

pub mod bounds;
pub mod convert;
pub mod error;
pub mod expansion;
pub mod factor;
pub mod modular;
pub mod padic;
pub mod ratio_trait;

pub use crate::bounds::Bounds;
pub use crate::error::{PadicError, Result};
pub use crate::expansion::Step;
pub use crate::factor::FactorMap;
pub use crate::padic::{DigitWindow, Padic};
pub use crate::ratio_trait::{RatioInteger, WideInteger};

use core::fmt;

/// A rational number represented as numerator/denominator with explicit sign.
///
/// # Invariants
///
/// - Denominator is never zero (every public constructor checks it)
/// - Values are not automatically reduced
/// - Sign is stored separately in the `negative` field
/// - Zero is always represented with `negative = false`
///
/// # Examples
///
/// ```
/// use padic_ratio::Ratio;
/// use crypto_bigint::U128;
///
/// let r = Ratio::<U128>::from_i64_signed(12, 5, true).unwrap();
/// assert_eq!(r.numer, U128::from_u64(12));
/// assert_eq!(r.denom, U128::from_u64(5));
/// assert!(r.negative);
/// assert_eq!(r.to_string(), "-12/5");
/// ```
#[derive(Clone, Debug)]
pub struct Ratio<T: RatioInteger> {
    /// The numerator magnitude.
    pub numer: T,
    /// The denominator, always positive.
    pub denom: T,
    /// Sign of the rational (true = negative).
    pub negative: bool,
}

impl<T: RatioInteger> Ratio<T> {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Assemble a ratio without checks; zero is forced non-negative.
    #[inline(always)]
    pub(crate) fn new_raw(numer: T, denom: T, negative: bool) -> Self {
        let negative = negative && !numer.is_zero_bool();
        Self {
            numer,
            denom,
            negative,
        }
    }

    /// Create a ratio from magnitudes and a sign, without reduction.
    ///
    /// # Errors
    ///
    /// [`PadicError::DivisionByZero`] if `denom` is zero.
    pub fn try_new(numer: T, denom: T, negative: bool) -> Result<Self> {
        if denom.is_zero_bool() {
            return Err(PadicError::DivisionByZero);
        }
        Ok(Self::new_raw(numer, denom, negative))
    }

    /// Create `n/d` from signed machine integers, without reduction.
    ///
    /// ```
    /// use padic_ratio::RatioU64;
    ///
    /// assert_eq!(RatioU64::from_i64(12, -4).unwrap().to_string(), "-12/4");
    /// assert!(RatioU64::from_i64(1, 0).is_err());
    /// ```
    #[inline]
    pub fn from_i64(n: i64, d: i64) -> Result<Self> {
        Self::from_i64_signed(n, d, false)
    }

    /// Create `±n/d`: the sign is the product of the signs of `n`, `d` and
    /// the `negative` flag.
    pub fn from_i64_signed(n: i64, d: i64, negative: bool) -> Result<Self> {
        if d == 0 {
            return Err(PadicError::DivisionByZero);
        }
        Ok(Self::new_raw(
            T::from_u64(n.unsigned_abs()),
            T::from_u64(d.unsigned_abs()),
            (n < 0) ^ (d < 0) ^ negative,
        ))
    }

    /// Create the integer `n/1`.
    #[inline]
    pub fn integer(n: i64) -> Self {
        Self::new_raw(T::from_u64(n.unsigned_abs()), T::ONE, n < 0)
    }

    /// Create a ratio representing 1.
    #[inline(always)]
    pub fn one() -> Self {
        Self {
            numer: T::ONE,
            denom: T::ONE,
            negative: false,
        }
    }

    /// Create a ratio representing 0.
    #[inline(always)]
    pub fn zero() -> Self {
        Self {
            numer: T::ZERO,
            denom: T::ONE,
            negative: false,
        }
    }

    // ========================================================================
    // BASIC OPERATIONS
    // ========================================================================

    /// Negate the ratio, flipping its sign.
    #[allow(clippy::should_implement_trait)] // We do implement Neg trait, clippy doesn't detect it
    #[inline(always)]
    pub fn neg(mut self) -> Self {
        if !self.numer.is_zero_bool() {
            self.negative = !self.negative;
        }
        self
    }

    /// Get the absolute value.
    #[inline(always)]
    pub fn abs(&self) -> Self {
        Self {
            numer: self.numer.clone(),
            denom: self.denom.clone(),
            negative: false,
        }
    }

    /// Swap numerator and denominator, keeping the sign.
    ///
    /// # Errors
    ///
    /// [`PadicError::DivisionByZero`] if the ratio is zero.
    pub fn inverse(&self) -> Result<Self> {
        Self::try_new(self.denom.clone(), self.numer.clone(), self.negative)
    }

    /// Check if the ratio is zero.
    #[inline(always)]
    pub fn is_zero(&self) -> bool {
        self.numer.is_zero_bool()
    }

    /// Check if the ratio is negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative && !self.numer.is_zero_bool()
    }

    /// Check if the ratio is stored with denominator 1.
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.denom == T::ONE
    }

    // ========================================================================
    // REDUCTION
    // ========================================================================

    /// Reduce the ratio to lowest terms in place.
    ///
    /// Zero is normalized to `0/1`.
    #[inline]
    pub fn normalize(&mut self) {
        if self.numer.is_zero_bool() {
            self.denom = T::ONE;
            self.negative = false;
            return;
        }

        let g = T::gcd(self.numer.clone(), self.denom.clone());
        if g == T::ONE {
            return;
        }
        self.numer = self.numer.wrapping_div(&g);
        self.denom = self.denom.wrapping_div(&g);
    }

    /// Lowest-terms copy of the ratio.
    ///
    /// ```
    /// use padic_ratio::RatioU64;
    ///
    /// let r = RatioU64::from_i64(12, 60).unwrap();
    /// assert_eq!(r.to_string(), "12/60");
    /// assert_eq!(r.reduce().to_string(), "1/5");
    /// ```
    #[must_use]
    pub fn reduce(&self) -> Self {
        let mut reduced = self.clone();
        reduced.normalize();
        reduced
    }

    // ========================================================================
    // FLOAT CONVERSION
    // ========================================================================

    /// Approximate conversion to f64.
    ///
    /// Large values are scaled to fit in f64 range, potentially losing precision.
    #[inline]
    pub fn to_f64_approx(&self) -> f64 {
        let n_bits = self.numer.bits_u32();
        let d_bits = self.denom.bits_u32();

        if n_bits == 0 {
            return 0.0;
        }

        let n_shift = n_bits.saturating_sub(64);
        let d_shift = d_bits.saturating_sub(64);

        let n_approx = self.numer.shr_vartime_u32(n_shift).first_word() as f64;
        let d_approx = self.denom.shr_vartime_u32(d_shift).first_word() as f64;

        let exp_diff = (n_shift as i32) - (d_shift as i32);
        let val = n_approx / d_approx * 2f64.powi(exp_diff);

        if self.negative {
            -val
        } else {
            val
        }
    }

    /// Decimal rendering with a fixed number of fraction digits.
    ///
    /// ```
    /// use padic_ratio::RatioU64;
    ///
    /// assert_eq!(RatioU64::from_i64(1, 3).unwrap().to_fixed(2), "0.33");
    /// assert_eq!(RatioU64::from_i64(-7, 2).unwrap().to_fixed(1), "-3.5");
    /// ```
    pub fn to_fixed(&self, decimals: usize) -> String {
        format!("{:.*}", decimals, self.to_f64_approx())
    }

    // ========================================================================
    // ARITHMETIC
    // ========================================================================

    /// Add two ratios: `(±a·d ± c·b) / (b·d)`.
    ///
    /// Returns an unreduced result. If the cross products overflow `T`, the
    /// sum is computed in `T::Wide` and reduced.
    ///
    /// # Panics
    ///
    /// Panics if even the reduced sum does not fit in `T`.
    #[inline]
    pub fn add(&self, other: &Self) -> Self {
        let (ad, ad_hi) = self.numer.mul_wide(&other.denom);
        let (bc, bc_hi) = other.numer.mul_wide(&self.denom);
        let (bd, bd_hi) = self.denom.mul_wide(&other.denom);

        if ad_hi.is_zero_bool() && bc_hi.is_zero_bool() && bd_hi.is_zero_bool() {
            if let Some((numer, negative)) =
                signed_sum(&ad, self.negative, &bc, other.negative)
            {
                return Self::new_raw(numer, bd, negative);
            }
        }

        self.add_wide(other)
    }

    #[cold]
    #[inline(never)]
    fn add_wide(&self, other: &Self) -> Self {
        let a = self.numer.to_wide();
        let b = self.denom.to_wide();
        let c = other.numer.to_wide();
        let d = other.denom.to_wide();

        let ad = a.wrapping_mul(&d);
        let bc = b.wrapping_mul(&c);
        let bd = b.wrapping_mul(&d);

        let (numer_wide, negative) = signed_sum(&ad, self.negative, &bc, other.negative)
            .expect("numerator overflow in wide addition");

        let g = T::Wide::gcd(numer_wide.clone(), bd.clone());
        let numer = T::from_wide_checked(&numer_wide.wrapping_div(&g))
            .expect("numerator overflow after reduction");
        let denom =
            T::from_wide_checked(&bd.wrapping_div(&g)).expect("denominator overflow after reduction");

        Self::new_raw(numer, denom, negative)
    }

    /// Subtract another ratio.
    ///
    /// Equivalent to `self.add(&other.neg())`.
    #[inline]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.clone().neg())
    }

    /// Multiply two ratios without reduction.
    ///
    /// When the plain products overflow, common factors across the operands
    /// are cancelled first.
    ///
    /// # Panics
    ///
    /// Panics if the product still overflows after cross-cancellation.
    #[inline]
    pub fn mul(&self, other: &Self) -> Self {
        let negative = self.negative ^ other.negative;

        let (ac, ac_hi) = self.numer.mul_wide(&other.numer);
        let (bd, bd_hi) = self.denom.mul_wide(&other.denom);

        if ac_hi.is_zero_bool() && bd_hi.is_zero_bool() {
            return Self::new_raw(ac, bd, negative);
        }

        let g_ad = T::gcd(self.numer.clone(), other.denom.clone());
        let g_bc = T::gcd(self.denom.clone(), other.numer.clone());

        let a = self.numer.wrapping_div(&g_ad);
        let c = other.numer.wrapping_div(&g_bc);
        let b = self.denom.wrapping_div(&g_bc);
        let d = other.denom.wrapping_div(&g_ad);

        let (ac, ac_hi) = a.mul_wide(&c);
        let (bd, bd_hi) = b.mul_wide(&d);

        if !ac_hi.is_zero_bool() || !bd_hi.is_zero_bool() {
            panic!("multiplication overflow after cross-cancellation");
        }

        Self::new_raw(ac, bd, negative)
    }

    /// Divide by another ratio: `(±a·d) / (b·c)`, unreduced.
    ///
    /// # Errors
    ///
    /// [`PadicError::DivisionByZero`] if `other` is zero.
    pub fn div(&self, other: &Self) -> Result<Self> {
        let reciprocal = other.inverse()?;
        Ok(self.mul(&reciprocal))
    }

    /// Classical distance `|self - other|`, reduced.
    pub fn distance(&self, other: &Self) -> Self {
        self.sub(other).reduce().abs()
    }

    // ========================================================================
    // FACTORS AND P-ADIC NORM
    // ========================================================================

    /// Prime factorization of the ratio: prime → exponent in the numerator
    /// minus exponent in the denominator.
    ///
    /// ```
    /// use padic_ratio::{RatioInteger, RatioU64};
    ///
    /// let r = RatioU64::from_i64(140, 297).unwrap();
    /// let exps: Vec<(u64, i32)> = r
    ///     .factors()
    ///     .into_iter()
    ///     .map(|(p, e)| (p.try_to_u64().unwrap(), e))
    ///     .collect();
    /// assert_eq!(exps, vec![(2, 2), (3, -3), (5, 1), (7, 1), (11, -1)]);
    /// ```
    pub fn factors(&self) -> FactorMap<T> {
        factor::ratio_factors(&self.numer, &self.denom)
    }

    /// Whether `prime` is a prime dividing the numerator or the
    /// denominator more often than the other.
    pub fn is_factor(&self, prime: u64) -> bool {
        self.padic_valuation(prime) != 0
    }

    /// `(prime, exponent)` of `prime` in the factor map, exponent 0 if absent.
    pub fn factor(&self, prime: u64) -> (u64, i32) {
        (prime, self.padic_valuation(prime))
    }

    /// Exponent of `prime` in the ratio (its p-adic valuation).
    ///
    /// Found by dividing `prime` out of the numerator and the denominator,
    /// without factoring the rest. `0` for zero and for a composite `prime`,
    /// which never appears in [`factors`](Ratio::factors).
    ///
    /// ```
    /// use padic_ratio::RatioU64;
    ///
    /// let r = RatioU64::from_i64(-517, 1477).unwrap();
    /// assert_eq!(r.padic_valuation(7), -1);
    /// assert_eq!(r.padic_valuation(11), 1);
    /// ```
    pub fn padic_valuation(&self, prime: u64) -> i32 {
        if self.numer.is_zero_bool() || !factor::is_prime(prime) {
            return 0;
        }
        let (up, _) = factor::strip_factor(&self.numer, prime);
        let (down, _) = factor::strip_factor(&self.denom, prime);
        up as i32 - down as i32
    }

    /// p-adic absolute value `p^(-v)`: `1/p^v` for `v > 0`, `p^|v|` otherwise,
    /// and `0` for zero.
    ///
    /// ```
    /// use padic_ratio::RatioU64;
    ///
    /// let r = RatioU64::from_i64(-517, 1477).unwrap();
    /// assert_eq!(r.padic_abs(7).to_string(), "7");
    /// assert_eq!(r.padic_abs(11).to_string(), "1/11");
    /// assert_eq!(r.padic_abs(5).to_string(), "1");
    /// ```
    pub fn padic_abs(&self, prime: u64) -> Self {
        if self.numer.is_zero_bool() {
            return Self::zero();
        }
        let valuation = self.padic_valuation(prime);
        let power = pow_u64::<T>(prime, valuation.unsigned_abs());
        if valuation > 0 {
            Self::new_raw(T::ONE, power, false)
        } else {
            Self::new_raw(power, T::ONE, false)
        }
    }

    /// p-adic absolute value of the classical distance.
    pub fn padic_distance(&self, other: &Self, prime: u64) -> Self {
        self.distance(other).padic_abs(prime)
    }

    /// The reduced magnitude with every factor of `prime` divided out.
    ///
    /// Together with [`padic_valuation`](Ratio::padic_valuation) this splits
    /// `|x| = p^v · u` with `u` a p-adic unit.
    pub fn without_prime(&self, prime: u64) -> Self {
        let reduced = self.reduce();
        if !factor::is_prime(prime) {
            return reduced.abs();
        }
        let (_, numer) = factor::strip_factor(&reduced.numer, prime);
        let (_, denom) = factor::strip_factor(&reduced.denom, prime);
        Self::new_raw(numer, denom, false)
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Signed addition of two magnitudes; `None` on overflow.
fn signed_sum<I: WideInteger>(a: &I, a_neg: bool, b: &I, b_neg: bool) -> Option<(I, bool)> {
    if a_neg == b_neg {
        let sum = a.wrapping_add(b);
        if sum < *a {
            return None;
        }
        return Some((sum, a_neg));
    }
    if a >= b {
        Some((a.wrapping_sub(b), a_neg))
    } else {
        Some((b.wrapping_sub(a), b_neg))
    }
}

/// `base^exp` in `T`; wraps silently, callers only raise factors of values
/// that already fit.
fn pow_u64<T: RatioInteger>(base: u64, exp: u32) -> T {
    let base = T::from_u64(base);
    let mut result = T::ONE;
    for _ in 0..exp {
        result = result.wrapping_mul(&base);
    }
    result
}

// ============================================================================
// TRAIT IMPLEMENTATIONS
// ============================================================================

use core::ops::{Add, Mul, Neg, Sub};

impl<T: RatioInteger> Add for Ratio<T> {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Ratio::add(&self, &other)
    }
}

impl<T: RatioInteger> Add for &Ratio<T> {
    type Output = Ratio<T>;
    #[inline(always)]
    fn add(self, other: Self) -> Ratio<T> {
        Ratio::add(self, other)
    }
}

impl<T: RatioInteger> Mul for Ratio<T> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        Ratio::mul(&self, &other)
    }
}

impl<T: RatioInteger> Mul for &Ratio<T> {
    type Output = Ratio<T>;
    #[inline(always)]
    fn mul(self, other: Self) -> Ratio<T> {
        Ratio::mul(self, other)
    }
}

impl<T: RatioInteger> Neg for Ratio<T> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Ratio::neg(self)
    }
}

impl<T: RatioInteger> Sub for Ratio<T> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Ratio::sub(&self, &other)
    }
}

impl<T: RatioInteger> Sub for &Ratio<T> {
    type Output = Ratio<T>;
    fn sub(self, other: Self) -> Ratio<T> {
        Ratio::sub(self, other)
    }
}

impl<T: RatioInteger> PartialEq for Ratio<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.numer.is_zero_bool() && other.numer.is_zero_bool() {
            return true;
        }
        if self.negative != other.negative {
            return false;
        }

        let (ad, ad_hi) = self.numer.mul_wide(&other.denom);
        let (bc, bc_hi) = other.numer.mul_wide(&self.denom);

        ad == bc && ad_hi == bc_hi
    }
}

impl<T: RatioInteger> Eq for Ratio<T> {}

impl<T: RatioInteger> fmt::Display for Ratio<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.numer.is_zero_bool() {
            return f.write_str("0");
        }
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.numer.to_decimal_string())?;
        if self.denom != T::ONE {
            write!(f, "/{}", self.denom.to_decimal_string())?;
        }
        Ok(())
    }
}

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// Ratio using 64-bit integers.
pub type RatioU64 = Ratio<crypto_bigint::U64>;

/// Ratio using 128-bit integers.
pub type RatioU128 = Ratio<crypto_bigint::U128>;

/// Ratio using 256-bit integers.
pub type RatioU256 = Ratio<crypto_bigint::U256>;

/// Ratio using 512-bit integers.
pub type RatioU512 = Ratio<crypto_bigint::U512>;

#[cfg(test)]
mod tests {
    // explicit imports: the operator traits in scope would shadow the
    // by-reference inherent methods
    use super::{PadicError, Ratio, RatioU64};
    use crypto_bigint::{U128, U64};

    fn r(n: i64, d: i64) -> RatioU64 {
        RatioU64::from_i64(n, d).unwrap()
    }

    fn rs(n: i64, d: i64, negative: bool) -> RatioU64 {
        RatioU64::from_i64_signed(n, d, negative).unwrap()
    }

    #[test]
    fn test_zero_denominator_rejected() {
        assert_eq!(RatioU64::from_i64(1, 0).unwrap_err(), PadicError::DivisionByZero);
        assert_eq!(
            RatioU64::try_new(U64::ONE, U64::ZERO, false).unwrap_err(),
            PadicError::DivisionByZero
        );
    }

    #[test]
    fn test_sign_processing() {
        assert!(r(-3, 4).negative);
        assert!(r(3, -4).negative);
        assert!(!r(-3, -4).negative);
        assert!(!rs(-3, 4, true).negative);
        assert!(!rs(0, 4, true).negative);
    }

    #[test]
    fn test_predicates() {
        assert!(RatioU64::one().is_integer());
        assert_eq!(RatioU64::one(), r(7, 7));
        assert!(RatioU64::zero().is_zero());
        assert!(!RatioU64::zero().is_negative());
        assert!(r(-1, 2).is_negative());
        assert!(!r(4, 2).is_integer());
        assert!(r(4, 2).reduce().is_integer());
    }

    #[test]
    fn test_neg() {
        assert_eq!(rs(12, 5, true).neg().to_string(), "12/5");
        assert_eq!(r(12, 5).neg().to_string(), "-12/5");
        assert_eq!((-r(0, 3)).to_string(), "0");
    }

    #[test]
    fn test_inverse() {
        assert_eq!(rs(12, 5, true).inverse().unwrap().to_string(), "-5/12");
        assert_eq!(r(12, 5).inverse().unwrap().to_string(), "5/12");
        assert_eq!(r(0, 5).inverse().unwrap_err(), PadicError::DivisionByZero);
    }

    #[test]
    fn test_abs() {
        assert_eq!(rs(12, 5, true).abs().to_string(), "12/5");
        assert_eq!(r(12, 5).abs().to_string(), "12/5");
    }

    #[test]
    fn test_reduce() {
        assert_eq!(r(12, 4).reduce().to_string(), "3");
        assert_eq!(r(12, 60).reduce().to_string(), "1/5");
        assert_eq!(rs(-12, 60, true).reduce().to_string(), "1/5");
        assert_eq!(r(0, 60).reduce().denom, U64::ONE);
    }

    #[test]
    fn test_add() {
        assert_eq!(r(12, 5).add(&rs(12, 5, true)).to_string(), "0");
        let sum = r(12, 5) + r(12, 5);
        assert_eq!(sum.to_string(), "120/25");
        assert_eq!(sum.reduce().to_string(), "24/5");
    }

    #[test]
    fn test_sub() {
        assert_eq!(r(12, 5).sub(&r(12, 5)).to_string(), "0");
        assert_eq!(r(12, 1).sub(&rs(5, 1, true)).reduce().to_string(), "17");
        assert_eq!((r(12, 3) - r(5, 2)).reduce().to_string(), "3/2");
    }

    #[test]
    fn test_mul() {
        assert_eq!(r(12, 5).mul(&r(12, 5)).to_string(), "144/25");
        assert_eq!(RatioU64::integer(12).mul(&RatioU64::integer(-5)).reduce().to_string(), "-60");
        assert_eq!((r(12, 3) * r(5, 2)).reduce().to_string(), "10");
    }

    #[test]
    fn test_div() {
        assert_eq!(r(12, 5).div(&r(12, 5)).unwrap().to_string(), "60/60");
        assert_eq!(
            RatioU64::integer(12).div(&RatioU64::integer(-5)).unwrap().reduce().to_string(),
            "-12/5"
        );
        assert_eq!(r(12, 3).div(&r(5, 2)).unwrap().reduce().to_string(), "8/5");
        assert_eq!(r(1, 2).div(&RatioU64::zero()).unwrap_err(), PadicError::DivisionByZero);
    }

    #[test]
    fn test_equality_is_by_value() {
        assert_eq!(r(2, 4), r(1, 2));
        assert_eq!(r(0, 4), rs(0, 9, true));
        assert_ne!(r(1, 2), r(-1, 2));
        assert_eq!(r(2, 4).reduce().to_string(), r(1, 2).reduce().to_string());
    }

    #[test]
    fn test_add_overflow_falls_back_to_wide() {
        let a = RatioU64::try_new(U64::ONE, U64::from_u64(1 << 33), false).unwrap();
        let b = RatioU64::try_new(U64::ONE, U64::from_u64(1 << 34), false).unwrap();
        let sum = a.add(&b);
        assert_eq!(sum.numer, U64::from_u64(3));
        assert_eq!(sum.denom, U64::from_u64(1 << 34));
    }

    #[test]
    fn test_mul_overflow_cross_cancels() {
        let a = RatioU64::try_new(U64::from_u64(1 << 40), U64::from_u64(3), false).unwrap();
        let b = RatioU64::try_new(U64::from_u64(1 << 30), U64::from_u64(1 << 35), false).unwrap();
        let prod = a.mul(&b);
        assert_eq!(prod.numer, U64::from_u64(1 << 35));
        assert_eq!(prod.denom, U64::from_u64(3));
    }

    #[test]
    fn test_distance() {
        assert_eq!(r(1, 3).distance(&r(2, 3)).to_string(), "1/3");
        assert_eq!(r(-1, 2).distance(&r(1, 2)).to_string(), "1");
    }

    #[test]
    fn test_padic_valuation_and_factor() {
        let x = r(-517, 1477);
        assert_eq!(x.padic_valuation(7), -1);
        assert_eq!(x.padic_valuation(11), 1);
        assert_eq!(x.padic_valuation(3), 0);
        assert!(x.is_factor(47));
        assert!(!x.is_factor(2));
        assert_eq!(x.factor(211), (211, -1));
        assert_eq!(r(2, 4).padic_valuation(2), -1);
        assert_eq!(RatioU64::zero().padic_valuation(5), 0);
    }

    #[test]
    fn test_valuation_skips_large_cofactors() {
        // 8 * (2^61 - 1) / 3, the cofactor a Mersenne prime
        let mersenne = (1u128 << 61) - 1;
        let x = Ratio::<U128>::try_new(U128::from_u128(8 * mersenne), U128::from_u64(3), false).unwrap();
        assert_eq!(x.padic_valuation(2), 3);
        assert_eq!(x.padic_valuation(3), -1);
        assert_eq!(x.padic_valuation(5), 0);
        assert_eq!(x.factor(2), (2, 3));
        assert!(x.is_factor(3));
        assert_eq!(x.without_prime(2).to_string(), format!("{mersenne}/3"));
    }

    #[test]
    fn test_valuation_of_composite_is_zero() {
        let x = r(16, 9);
        assert_eq!(x.padic_valuation(4), 0);
        assert!(!x.is_factor(9));
        assert_eq!(x.without_prime(4).to_string(), "16/9");
    }

    #[test]
    fn test_padic_abs_and_distance() {
        assert_eq!(RatioU64::zero().padic_abs(5).to_string(), "0");
        assert_eq!(r(50, 3).padic_abs(5).to_string(), "1/25");
        assert_eq!(r(1, 3).padic_distance(&r(2, 3), 3).to_string(), "3");
        assert_eq!(RatioU64::integer(1).padic_distance(&RatioU64::integer(26), 5).to_string(), "1/25");
    }

    #[test]
    fn test_without_prime() {
        assert_eq!(r(140, 297).without_prime(3).to_string(), "140/11");
        assert_eq!(r(-50, 3).without_prime(5).to_string(), "2/3");
    }

    #[test]
    fn test_display_is_decimal_for_wide_types() {
        let big = Ratio::<U128>::try_new(U128::from_u128(1u128 << 100), U128::from_u64(3), true).unwrap();
        assert_eq!(big.to_string(), "-1267650600228229401496703205376/3");
    }

    #[test]
    fn test_to_f64_approx() {
        assert!((r(3, 4).to_f64_approx() - 0.75).abs() < 1e-12);
        assert!((r(-517, 1477).to_f64_approx() + 0.35003385).abs() < 1e-6);
    }
}
