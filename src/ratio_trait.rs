//! Integer abstraction letting `Ratio<T>` and the p-adic engine run over any
//! supported crypto-bigint width.
//!
//! # Architecture
//!
//! The trait system uses two levels:
//!
//! - [`WideInteger`]: minimal operations, also available on the overflow types
//! - [`RatioInteger`]: everything the engine needs, plus a `Wide` companion
//!
//! Most p-adic work only ever touches values bounded by
//! [`Bounds::max_arg`](crate::Bounds) and primes below
//! [`Bounds::max_prime`](crate::Bounds), so the helpers here favour a single
//! machine word and fall back to full-width arithmetic only when needed.
//!
//! # Example
//!
//! ```
//! use padic_ratio::RatioInteger;
//! use crypto_bigint::U128;
//!
//! let x = U128::from_u64(1_000_003);
//! assert_eq!(x.rem_u64(7), 1_000_003 % 7);
//! assert_eq!(x.to_decimal_string(), "1000003");
//! ```

use core::fmt::Debug;
use crypto_bigint::{Encoding, Zero, U1024, U128, U256, U512, U64};

/// Operations shared by every integer used by the engine, including the
/// double-width types used for overflow fallback.
pub trait WideInteger: Clone + Debug + PartialEq + Eq + PartialOrd + Ord + Sized + 'static {
    /// Number of bits in this integer type.
    const BITS: u32;

    /// The zero value.
    const ZERO: Self;

    /// The one value.
    const ONE: Self;

    /// Returns the number of significant bits in this value.
    fn bits_u32(&self) -> u32;

    /// Right shift by a variable amount (variable-time).
    fn shr_vartime_u32(&self, shift: u32) -> Self;

    /// Returns `true` if this value is zero.
    fn is_zero_bool(&self) -> bool;

    /// Add with wrapping on overflow.
    fn wrapping_add(&self, other: &Self) -> Self;

    /// Subtract with wrapping on underflow.
    fn wrapping_sub(&self, other: &Self) -> Self;

    /// Multiply with wrapping on overflow.
    fn wrapping_mul(&self, other: &Self) -> Self;

    /// Divide, panicking on division by zero.
    fn wrapping_div(&self, other: &Self) -> Self;

    /// Remainder, panicking on division by zero.
    fn wrapping_rem(&self, other: &Self) -> Self;

    /// Greatest common divisor.
    fn gcd(a: Self, b: Self) -> Self;

    /// Little-endian bytes.
    fn to_le_bytes_vec(&self) -> Vec<u8>;

    /// Create from little-endian bytes, truncating or zero-extending.
    fn from_le_bytes_slice(bytes: &[u8]) -> Self;

    /// Least significant 64 bits.
    fn first_word(&self) -> u64;
}

/// Integer type suitable for `Ratio<T>` and p-adic conversion.
///
/// The `Wide` type must be able to hold the product of two `Self` values.
///
/// Implemented for `U64`, `U128`, `U256` and `U512`. `U1024` is only a
/// `WideInteger`.
pub trait RatioInteger: WideInteger {
    /// The wide type for overflow arithmetic (`Wide::BITS >= 2 * Self::BITS`).
    type Wide: WideInteger;

    /// Create from a 64-bit unsigned integer.
    fn from_u64(n: u64) -> Self;

    /// Convert to the wide type.
    fn to_wide(&self) -> Self::Wide;

    /// Convert back from the wide type, `None` if the value does not fit.
    fn from_wide_checked(wide: &Self::Wide) -> Option<Self>;

    /// Multiply returning both halves as `(low, high)`.
    fn mul_wide(&self, other: &Self) -> (Self, Self);

    /// Try to convert to u64, returning `None` if the value doesn't fit.
    #[inline]
    fn try_to_u64(&self) -> Option<u64> {
        (self.bits_u32() <= 64).then(|| self.first_word())
    }

    /// Multiplication that reports overflow instead of wrapping.
    #[inline]
    fn checked_mul(&self, other: &Self) -> Option<Self> {
        let (lo, hi) = self.mul_wide(other);
        hi.is_zero_bool().then_some(lo)
    }

    /// Addition that reports overflow instead of wrapping.
    #[inline]
    fn checked_add(&self, other: &Self) -> Option<Self> {
        let sum = self.wrapping_add(other);
        (sum >= *self).then_some(sum)
    }

    /// `self mod m` for a non-zero word-sized modulus.
    #[inline]
    fn rem_u64(&self, m: u64) -> u64 {
        match self.try_to_u64() {
            Some(v) => v % m,
            None => self.wrapping_rem(&Self::from_u64(m)).first_word(),
        }
    }

    /// Base-10 rendering. crypto-bigint's own `Display` is hexadecimal.
    fn to_decimal_string(&self) -> String {
        if let Some(v) = self.try_to_u64() {
            return v.to_string();
        }
        const CHUNK: u64 = 10_000_000_000_000_000_000;
        let chunk = Self::from_u64(CHUNK);
        let mut groups = Vec::new();
        let mut rest = self.clone();
        while !rest.is_zero_bool() {
            groups.push(rest.wrapping_rem(&chunk).first_word());
            rest = rest.wrapping_div(&chunk);
        }
        let mut out = String::new();
        for (i, group) in groups.iter().rev().enumerate() {
            if i == 0 {
                out.push_str(&group.to_string());
            } else {
                out.push_str(&format!("{group:019}"));
            }
        }
        out
    }
}

macro_rules! impl_wide_integer {
    ($type:ty, $bits:expr) => {
        impl WideInteger for $type {
            const BITS: u32 = $bits;
            const ZERO: Self = <$type>::ZERO;
            const ONE: Self = <$type>::ONE;

            #[inline(always)]
            fn bits_u32(&self) -> u32 {
                self.bits() as u32
            }

            #[inline(always)]
            fn shr_vartime_u32(&self, shift: u32) -> Self {
                self.shr_vartime(shift as usize)
            }

            #[inline(always)]
            fn is_zero_bool(&self) -> bool {
                bool::from(<$type as Zero>::is_zero(self))
            }

            #[inline(always)]
            fn wrapping_add(&self, other: &Self) -> Self {
                self.wrapping_add(other)
            }

            #[inline(always)]
            fn wrapping_sub(&self, other: &Self) -> Self {
                self.wrapping_sub(other)
            }

            #[inline(always)]
            fn wrapping_mul(&self, other: &Self) -> Self {
                self.wrapping_mul(other)
            }

            #[inline(always)]
            fn wrapping_div(&self, other: &Self) -> Self {
                self.wrapping_div(other)
            }

            #[inline(always)]
            fn wrapping_rem(&self, other: &Self) -> Self {
                self.wrapping_rem(other)
            }

            #[inline]
            fn gcd(a: Self, b: Self) -> Self {
                gcd_generic(a, b)
            }

            #[inline]
            fn to_le_bytes_vec(&self) -> Vec<u8> {
                self.to_le_bytes().as_ref().to_vec()
            }

            #[inline]
            fn from_le_bytes_slice(bytes: &[u8]) -> Self {
                let mut arr = <$type>::ZERO.to_le_bytes();
                let arr_ref = arr.as_mut();
                let copy_len = arr_ref.len().min(bytes.len());
                arr_ref[..copy_len].copy_from_slice(&bytes[..copy_len]);
                <$type>::from_le_bytes(arr)
            }

            #[inline]
            fn first_word(&self) -> u64 {
                let words = self.to_words();
                #[cfg(target_pointer_width = "32")]
                {
                    if words.len() >= 2 {
                        (words[0] as u64) | ((words[1] as u64) << 32)
                    } else {
                        words[0] as u64
                    }
                }
                #[cfg(not(target_pointer_width = "32"))]
                {
                    words[0]
                }
            }
        }
    };
}

macro_rules! impl_ratio_integer {
    ($narrow:ty, $wide:ty, $bits:expr) => {
        impl_wide_integer!($narrow, $bits);

        impl RatioInteger for $narrow {
            type Wide = $wide;

            #[inline(always)]
            fn from_u64(n: u64) -> Self {
                <$narrow>::from_u64(n)
            }

            #[inline]
            fn to_wide(&self) -> Self::Wide {
                <$wide as WideInteger>::from_le_bytes_slice(&WideInteger::to_le_bytes_vec(self))
            }

            #[inline]
            fn from_wide_checked(wide: &Self::Wide) -> Option<Self> {
                let wide_bytes = WideInteger::to_le_bytes_vec(wide);
                let narrow_size = ($bits / 8) as usize;
                if wide_bytes[narrow_size..].iter().any(|&b| b != 0) {
                    return None;
                }
                Some(WideInteger::from_le_bytes_slice(&wide_bytes[..narrow_size]))
            }

            #[inline(always)]
            fn mul_wide(&self, other: &Self) -> (Self, Self) {
                self.mul_wide(other)
            }
        }
    };
}

impl_ratio_integer!(U64, U128, 64);
impl_ratio_integer!(U128, U256, 128);
impl_ratio_integer!(U256, U512, 256);
impl_ratio_integer!(U512, U1024, 512);

// U1024 only backs U512 overflow
impl_wide_integer!(U1024, 1024);

/// Euclidean GCD that drops to native `u64` arithmetic as soon as both
/// operands fit in a word.
///
/// ```
/// use crypto_bigint::U256;
/// use padic_ratio::WideInteger;
///
/// assert_eq!(U256::gcd(U256::from_u64(1477), U256::from_u64(517)), U256::from_u64(1));
/// assert_eq!(U256::gcd(U256::from_u64(60), U256::from_u64(12)), U256::from_u64(12));
/// ```
pub fn gcd_generic<T: WideInteger>(mut a: T, mut b: T) -> T {
    if a.is_zero_bool() {
        return b;
    }
    if b.is_zero_bool() {
        return a;
    }
    if a < b {
        core::mem::swap(&mut a, &mut b);
    }
    while !b.is_zero_bool() {
        if a.bits_u32() <= 64 {
            let g = gcd_u64(a.first_word(), b.first_word());
            return T::from_le_bytes_slice(&g.to_le_bytes());
        }
        let rem = a.wrapping_rem(&b);
        a = b;
        b = rem;
    }
    a
}

/// Euclidean GCD on machine words.
#[inline]
pub(crate) fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}
