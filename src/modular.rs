//! Word-sized modular arithmetic.
//!
//! The p-adic engine only ever inverts the unit part of a denominator modulo
//! a prime below [`Bounds::max_prime`](crate::Bounds), so everything here
//! works on `u64`/`i64` and widens to 128 bits for products.

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` with `g = gcd(a, b) >= 0` and `a*x + b*y = g`.
///
/// ```
/// use padic_ratio::modular::gcd_extended;
///
/// let (g, x, y) = gcd_extended(15156, 6564);
/// assert_eq!(g, 12);
/// assert_eq!(15156 * x + 6564 * y, 12);
/// ```
pub fn gcd_extended(a: i64, b: i64) -> (i64, i64, i64) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_s, mut s) = (1i64, 0i64);
    let (mut old_t, mut t) = (0i64, 1i64);

    while r != 0 {
        let quotient = old_r / r;
        (old_r, r) = (r, old_r - quotient * r);
        (old_s, s) = (s, old_s - quotient * s);
        (old_t, t) = (t, old_t - quotient * t);
    }

    if old_r < 0 {
        (-old_r, -old_s, -old_t)
    } else {
        (old_r, old_s, old_t)
    }
}

/// Inverse of `a` modulo `m`, or `None` when `gcd(a, m) != 1`.
///
/// ```
/// use padic_ratio::modular::mod_inverse;
///
/// assert_eq!(mod_inverse(3, 5), Some(2));
/// assert_eq!(mod_inverse(6, 9), None);
/// ```
pub fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    if m < 2 || m > i64::MAX as u64 {
        return None;
    }
    let (g, x, _) = gcd_extended((a % m) as i64, m as i64);
    if g != 1 {
        return None;
    }
    Some(x.rem_euclid(m as i64) as u64)
}

/// `(a * b) mod m` without overflow.
#[inline]
pub fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}
