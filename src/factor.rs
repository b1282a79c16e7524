//! Trial-division factorization and the signed factor maps of ratios.

use std::collections::BTreeMap;

use crate::ratio_trait::RatioInteger;

/// Prime → exponent map of an unsigned integer.
pub type Factorization<T> = BTreeMap<T, u32>;

/// Prime → signed exponent map of a ratio (numerator minus denominator).
pub type FactorMap<T> = BTreeMap<T, i32>;

/// Factors `n` by trial division.
///
/// Returns an empty map for `n < 2`. Divisors are tried in increasing order
/// while `d * d <= n`; whatever remains above 1 is prime.
///
/// ```
/// use crypto_bigint::U64;
/// use padic_ratio::factor::factorize;
/// use padic_ratio::RatioInteger;
///
/// let f = factorize(&U64::from_u64(60));
/// let found: Vec<(u64, u32)> = f.iter().map(|(p, e)| (p.try_to_u64().unwrap(), *e)).collect();
/// assert_eq!(found, vec![(2, 2), (3, 1), (5, 1)]);
/// ```
pub fn factorize<T: RatioInteger>(n: &T) -> Factorization<T> {
    let mut factors = Factorization::new();
    let two = T::from_u64(2);
    if *n < two {
        return factors;
    }

    let mut rest = n.clone();
    let mut divisor = two;
    loop {
        match divisor.checked_mul(&divisor) {
            Some(square) if square <= rest => {}
            _ => break,
        }
        while rest.wrapping_rem(&divisor).is_zero_bool() {
            *factors.entry(divisor.clone()).or_insert(0) += 1;
            rest = rest.wrapping_div(&divisor);
        }
        divisor = divisor.wrapping_add(&T::ONE);
    }
    if rest > T::ONE {
        *factors.entry(rest).or_insert(0) += 1;
    }
    factors
}

/// Combined factor map of `numer / denom`, dropping primes whose exponents
/// cancel.
pub fn ratio_factors<T: RatioInteger>(numer: &T, denom: &T) -> FactorMap<T> {
    let mut combined = FactorMap::new();
    for (prime, exp) in factorize(numer) {
        *combined.entry(prime).or_insert(0) += exp as i32;
    }
    for (prime, exp) in factorize(denom) {
        *combined.entry(prime).or_insert(0) -= exp as i32;
    }
    combined.retain(|_, exp| *exp != 0);
    combined
}

/// How often `prime` divides `n`, and the cofactor left after dividing it
/// out. `(0, n)` when `n` is zero or `prime < 2`.
///
/// ```
/// use crypto_bigint::U64;
/// use padic_ratio::factor::strip_factor;
///
/// assert_eq!(strip_factor(&U64::from_u64(200), 5), (2, U64::from_u64(8)));
/// ```
pub fn strip_factor<T: RatioInteger>(n: &T, prime: u64) -> (u32, T) {
    if n.is_zero_bool() || prime < 2 {
        return (0, n.clone());
    }
    let divisor = T::from_u64(prime);
    let mut rest = n.clone();
    let mut count = 0;
    while rest.rem_u64(prime) == 0 {
        rest = rest.wrapping_div(&divisor);
        count += 1;
    }
    (count, rest)
}

/// Primality by trial division over odd candidates.
///
/// ```
/// use padic_ratio::factor::is_prime;
///
/// assert!(is_prime(32_749));
/// assert!(!is_prime(32_751));
/// ```
pub fn is_prime(n: u64) -> bool {
    match n {
        0 | 1 => false,
        2 | 3 => true,
        _ if n % 2 == 0 => false,
        _ => {
            let mut i = 3u64;
            while i.saturating_mul(i) <= n {
                if n % i == 0 {
                    return false;
                }
                i += 2;
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_bigint::U64;

    fn map_of(entries: &[(u64, u32)]) -> Factorization<U64> {
        entries.iter().map(|&(p, e)| (U64::from_u64(p), e)).collect()
    }

    #[test]
    fn test_factorize_composites() {
        assert_eq!(factorize(&U64::from_u64(60)), map_of(&[(2, 2), (3, 1), (5, 1)]));
        assert_eq!(factorize(&U64::from_u64(140)), map_of(&[(2, 2), (5, 1), (7, 1)]));
        assert_eq!(factorize(&U64::from_u64(297)), map_of(&[(3, 3), (11, 1)]));
    }

    #[test]
    fn test_factorize_trivial_inputs() {
        assert!(factorize(&U64::ZERO).is_empty());
        assert!(factorize(&U64::ONE).is_empty());
        assert_eq!(factorize(&U64::from_u64(32_749)), map_of(&[(32_749, 1)]));
    }

    #[test]
    fn test_ratio_factors_subtracts_denominator() {
        let got = ratio_factors(&U64::from_u64(140), &U64::from_u64(297));
        let expected: FactorMap<U64> = [(2, 2), (3, -3), (5, 1), (7, 1), (11, -1)]
            .iter()
            .map(|&(p, e)| (U64::from_u64(p), e))
            .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_ratio_factors_drops_cancelled() {
        let got = ratio_factors(&U64::from_u64(12), &U64::from_u64(18));
        let expected: FactorMap<U64> = [(2, 1), (3, -1)]
            .iter()
            .map(|&(p, e)| (U64::from_u64(p), e))
            .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_strip_factor() {
        assert_eq!(strip_factor(&U64::from_u64(1 << 20), 2), (20, U64::ONE));
        assert_eq!(strip_factor(&U64::from_u64(297), 3), (3, U64::from_u64(11)));
        assert_eq!(strip_factor(&U64::from_u64(297), 5), (0, U64::from_u64(297)));
        assert_eq!(strip_factor(&U64::ZERO, 3), (0, U64::ZERO));
        // 2 * (2^61 - 1): no trial division of the cofactor
        let big = U64::from_u64(((1u64 << 61) - 1) * 2);
        assert_eq!(strip_factor(&big, 2), (1, U64::from_u64((1u64 << 61) - 1)));
    }

    #[test]
    fn test_is_prime() {
        let primes: Vec<u64> = (0..50).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]);
        assert!(!is_prime(1_048_576));
    }
}
