//! Elementary number-theoretic routines backing the group construction.
//!
//! Everything here works on u64 with u128-widened intermediates, so all
//! operations are exact for any modulus the group construction accepts.

use num_integer::Integer;

/// Modular product a * b mod m, widening through u128.
#[inline]
pub fn mod_mul(a: u64, b: u64, m: u64) -> u64 {
    (a as u128 * b as u128 % m as u128) as u64
}

/// Modular exponentiation: base^exp mod modulus.
pub fn mod_pow(mut base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let mut result = 1u64;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mod_mul(result, base, modulus);
        }
        exp >>= 1;
        base = mod_mul(base, base, modulus);
    }
    result
}

/// Factor n into (prime, exponent) pairs by trial division, primes ascending.
///
/// Returns an empty list for n <= 1.
pub fn factorize(n: u64) -> Vec<(u64, u32)> {
    let mut factors: Vec<(u64, u32)> = Vec::new();
    let mut remaining = n;

    if remaining <= 1 {
        return factors;
    }

    let mut exp = 0u32;
    while remaining % 2 == 0 {
        exp += 1;
        remaining /= 2;
    }
    if exp > 0 {
        factors.push((2, exp));
    }

    let mut d = 3u64;
    while d.saturating_mul(d) <= remaining {
        let mut exp = 0u32;
        while remaining % d == 0 {
            exp += 1;
            remaining /= d;
        }
        if exp > 0 {
            factors.push((d, exp));
        }
        d += 2;
    }

    if remaining > 1 {
        factors.push((remaining, 1));
    }

    factors
}

/// Euler's totient phi(n), computed from the factorization of n.
pub fn euler_totient(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    factorize(n)
        .iter()
        .fold(n, |phi, &(p, _)| phi / p * (p - 1))
}

/// Deterministic Miller-Rabin primality test for u64.
///
/// The witness set {2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37} is known to
/// be correct for every n < 3.3 * 10^24, which covers all of u64.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &p in &[2u64, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37] {
        if n == p {
            return true;
        }
        if n % p == 0 {
            return false;
        }
    }

    // Write n-1 as 2^r * d with d odd
    let mut d = n - 1;
    let mut r = 0u32;
    while d % 2 == 0 {
        d /= 2;
        r += 1;
    }

    'witness: for &a in &[2u64, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37] {
        let mut x = mod_pow(a, d, n);
        if x == 1 || x == n - 1 {
            continue 'witness;
        }
        for _ in 0..r - 1 {
            x = mod_mul(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }

    true
}

/// Find a generator of (Z/pk)* where pk = p^e is an odd prime power.
///
/// Strategy: find a primitive root g mod p by checking g^((p-1)/r) != 1 for
/// every prime r dividing p-1, then lift to p^e (if g^(p-1) = 1 mod p^2,
/// g + p is a root of every power of p; otherwise g already is).
///
/// Precondition: pk is an odd prime power > 1. Guaranteed to terminate since
/// (Z/p^e)* is cyclic for odd p.
pub fn primitive_root(pk: u64) -> u64 {
    debug_assert!(pk > 1 && pk % 2 == 1);
    let p = factorize(pk)[0].0;
    debug_assert!(is_prime(p));

    let prime_divisors: Vec<u64> = factorize(p - 1).iter().map(|&(r, _)| r).collect();

    let mut g = 2u64;
    loop {
        let is_root = prime_divisors
            .iter()
            .all(|&r| mod_pow(g, (p - 1) / r, p) != 1);
        if is_root {
            break;
        }
        g += 1;
    }

    if pk == p {
        return g;
    }

    // Lift to the prime power: g generates (Z/p^e)* unless g^(p-1) = 1 mod p^2.
    let p2 = p * p;
    if mod_pow(g, p - 1, p2) == 1 {
        g + p
    } else {
        g
    }
}

/// Modular inverse a^(-1) mod m via the extended Euclidean algorithm.
///
/// Returns `None` when gcd(a, m) != 1.
pub fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    if m <= 1 {
        return None;
    }
    let a = a % m;
    if a.gcd(&m) != 1 {
        return None;
    }

    let (mut old_r, mut r) = (a as i128, m as i128);
    let (mut old_s, mut s) = (1i128, 0i128);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }

    Some(old_s.rem_euclid(m as i128) as u64)
}

/// Multiplicative order of a mod n, searched by repeated multiplication.
///
/// Returns `None` when gcd(a, n) != 1.
pub fn multiplicative_order(a: u64, n: u64) -> Option<u64> {
    if n == 1 {
        return Some(1);
    }
    let a = a % n;
    if a.gcd(&n) != 1 {
        return None;
    }
    let mut current = a;
    let mut ord = 1u64;
    while current != 1 {
        current = mod_mul(current, a, n);
        ord += 1;
    }
    Some(ord)
}
