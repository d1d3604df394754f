use super::*;

#[test]
fn test_exponent_of_two_in_ten_factorial() {
    // 10! = 3628800 = 2^8 · 3^4 · 5^2 · 7
    assert_eq!(legendre_exponent(10, 2), 8);
    assert_eq!(legendre_exponent(10, 3), 4);
    assert_eq!(legendre_exponent(10, 5), 2);
    assert_eq!(legendre_exponent(10, 7), 1);
}

#[test]
fn test_exponent_known_values() {
    // e_2(100!) = 50 + 25 + 12 + 6 + 3 + 1 = 97
    assert_eq!(legendre_exponent(100, 2), 97);
    assert_eq!(legendre_exponent(100, 5), 24); // trailing zeros of 100!
    assert_eq!(legendre_exponent(100, 97), 1);
    assert_eq!(legendre_exponent(1000, 5), 249);
}

#[test]
fn test_exponent_prime_larger_than_n() {
    assert_eq!(legendre_exponent(10, 11), 0);
    assert_eq!(legendre_exponent(0, 2), 0);
    assert_eq!(legendre_exponent(1, 2), 0);
}

#[test]
fn test_exponent_of_two_via_popcount_identity() {
    // e_2(n!) = n - popcount(n), a classic identity used as a cross-check.
    for n in [1u64, 2, 3, 7, 8, 100, 1023, 1024, 123_456_789] {
        let expected = (n - n.count_ones() as u64) as u128;
        assert_eq!(legendre_exponent(n, 2), expected, "n = {n}");
    }
}

#[test]
fn test_exponent_near_u64_max_does_not_wrap() {
    let n = u64::MAX;
    // e_2(n!) = n - popcount(n) = 2^64 - 1 - 64
    assert_eq!(legendre_exponent(n, 2), (u64::MAX - 64) as u128);
    // p close to √n: exactly two terms, ⌊n/p⌋ + ⌊n/p²⌋.
    let p = 4_294_967_291; // largest prime below 2^32
    assert_eq!(legendre_exponent(n, p), (n / p + n / p / p) as u128);
}

#[test]
fn test_low_range_exponents_small_n() {
    // T = ⌊√10⌋ = 3: primes 2 and 3 only.
    assert_eq!(low_range_exponents(10), vec![(2, 8), (3, 4)]);
    // T = ⌊√3⌋ = 1: no low-range primes at all.
    assert_eq!(low_range_exponents(3), vec![]);
    assert_eq!(low_range_exponents(0), vec![]);
}

#[test]
fn test_low_range_exponents_ascending_and_complete() {
    let pairs = low_range_exponents(10_000);
    // Primes up to T = 100: π(100) = 25 of them.
    assert_eq!(pairs.len(), 25);
    for w in pairs.windows(2) {
        assert!(w[0].0 < w[1].0);
    }
    for &(p, e) in &pairs {
        assert_eq!(e, legendre_exponent(10_000, p));
        assert!(e > 0);
    }
}
