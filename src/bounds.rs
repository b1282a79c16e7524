//! Tunable limits that keep every loop in the engine bounded.

/// Limits applied by conversions and reconstruction.
///
/// The defaults reproduce the classic fixed-buffer engine: a digit buffer of
/// `2 * 64` cells, operands up to `2^20`, primes up to the largest 15-bit
/// prime and 100 000 reconstruction rounds. Tests can shrink them, as long as
/// one set of bounds is used for a whole computation.
///
/// ```
/// use padic_ratio::Bounds;
///
/// let small = Bounds::default().with_max_exp(16).with_max_approx(500);
/// assert_eq!(small.max_exp, 16);
/// assert_eq!(small.max_prime, 32_749);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    /// Largest exponent addressable in a digit buffer; the buffer covers
    /// `[-max_exp, max_exp)` and precision is clipped to `max_exp - 1`.
    pub max_exp: usize,
    /// Largest accepted numerator magnitude or denominator.
    pub max_arg: u64,
    /// Primes above this are clipped down to it by conversions and rejected
    /// by parsing.
    pub max_prime: u64,
    /// Maximum number of self-additions tried by rational reconstruction.
    pub max_approx: u64,
}

impl Bounds {
    /// Default digit-buffer half width.
    pub const MAX_EXP: usize = 64;
    /// Default operand limit.
    pub const MAX_ARG: u64 = 1_048_576;
    /// Default prime limit.
    pub const MAX_PRIME: u64 = 32_749;
    /// Default reconstruction round limit.
    pub const MAX_APPROX: u64 = 100_000;

    /// Bounds with explicit values.
    pub const fn new(max_exp: usize, max_arg: u64, max_prime: u64, max_approx: u64) -> Self {
        Self {
            max_exp,
            max_arg,
            max_prime,
            max_approx,
        }
    }

    /// Set the buffer half width. Below 2 no precision fits and every
    /// conversion fails.
    pub const fn with_max_exp(mut self, max_exp: usize) -> Self {
        self.max_exp = max_exp;
        self
    }

    /// Set the operand limit.
    pub const fn with_max_arg(mut self, max_arg: u64) -> Self {
        self.max_arg = max_arg;
        self
    }

    /// Set the prime limit.
    pub const fn with_max_prime(mut self, max_prime: u64) -> Self {
        self.max_prime = max_prime;
        self
    }

    /// Set how many multipliers reconstruction tries before giving up.
    pub const fn with_max_approx(mut self, max_approx: u64) -> Self {
        self.max_approx = max_approx;
        self
    }

    /// Largest usable precision, one less than the buffer half width.
    #[inline]
    pub const fn max_precision(&self) -> usize {
        self.max_exp.saturating_sub(1)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(
            Self::MAX_EXP,
            Self::MAX_ARG,
            Self::MAX_PRIME,
            Self::MAX_APPROX,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let b = Bounds::default();
        assert_eq!(b.max_exp, 64);
        assert_eq!(b.max_arg, 1 << 20);
        assert_eq!(b.max_prime, 32_749);
        assert_eq!(b.max_approx, 100_000);
        assert_eq!(b.max_precision(), 63);
    }

    #[test]
    fn test_builders_touch_one_field() {
        let b = Bounds::default().with_max_arg(1000).with_max_prime(97);
        assert_eq!(b.max_arg, 1000);
        assert_eq!(b.max_prime, 97);
        assert_eq!(b.max_exp, Bounds::MAX_EXP);
        assert_eq!(b.max_approx, Bounds::MAX_APPROX);
    }
}
