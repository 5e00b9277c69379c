//! Gauss sums and conductor detection.
//!
//! The Gauss sum tau(chi) = sum_{a mod q} chi(a) e(a/q) measures primitivity:
//! for a primitive character mod q, |tau(chi)|^2 = q. The conductor is the
//! smallest modulus a character is induced from; a character is primitive
//! exactly when its conductor equals its modulus.

use num_integer::Integer;
use std::f64::consts::PI;

use crate::character::DirichletCharacter;
use crate::complex::{self, Complex};

/// Compute the Gauss sum tau(chi) = sum_{a=0}^{q-1} chi(a) e(a/q).
pub fn gauss_sum(chi: &DirichletCharacter) -> Complex {
    let q = chi.modulus();
    let mut sum = complex::ZERO;

    for a in 0..q {
        let chi_a = chi.value(a as i64);
        if complex::cnorm_sq(chi_a) < 1e-20 {
            continue;
        }
        let e = complex::cis(2.0 * PI * a as f64 / q as f64);
        sum = complex::cadd(sum, complex::cmul(chi_a, e));
    }

    sum
}

/// All divisors of n, ascending.
pub fn divisors(n: u64) -> Vec<u64> {
    let mut divs = Vec::new();
    let mut i = 1u64;
    while i * i <= n {
        if n % i == 0 {
            divs.push(i);
            if i != n / i {
                divs.push(n / i);
            }
        }
        i += 1;
    }
    divs.sort_unstable();
    divs
}

/// The conductor of chi: the smallest divisor d of q such that chi is
/// induced from a character mod d.
///
/// chi is induced from mod d when chi(a) = chi(b) for all units a = b (mod d).
/// Consistency with the table-based test: conductor(chi) == q iff
/// `chi.is_primitive()`.
pub fn conductor(chi: &DirichletCharacter) -> u64 {
    let q = chi.modulus();

    if chi.is_principal() {
        return 1;
    }

    for d in divisors(q) {
        if d == 1 {
            continue; // only the principal character has conductor 1
        }
        if d == q || is_induced_from(chi, d) {
            return d;
        }
    }

    q
}

/// Whether chi mod q is induced from some character mod d: constant on the
/// units of (Z/q)* within each residue class mod d.
fn is_induced_from(chi: &DirichletCharacter, d: u64) -> bool {
    let q = chi.modulus();

    for r in 0..d {
        let mut first: Option<Complex> = None;
        let mut a = r;
        while a < q {
            if a.gcd(&q) == 1 {
                let v = chi.value(a as i64);
                match first {
                    None => first = Some(v),
                    Some(f) => {
                        if complex::cnorm_sq(complex::csub(v, f)) > 1e-16 {
                            return false;
                        }
                    }
                }
            }
            a += d;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::DirichletGroup;

    #[test]
    fn test_divisors() {
        assert_eq!(divisors(12), vec![1, 2, 3, 4, 6, 12]);
        assert_eq!(divisors(77), vec![1, 7, 11, 77]);
        assert_eq!(divisors(1), vec![1]);
    }

    #[test]
    fn test_gauss_sum_primitive_magnitude() {
        // |tau(chi)|^2 = q for every primitive chi
        for q in [5u64, 7, 8, 9, 11, 12, 16] {
            let g = DirichletGroup::new(q).unwrap();
            for chi in g.primitive_characters() {
                let mag_sq = complex::cnorm_sq(gauss_sum(&chi));
                assert!(
                    (mag_sq - q as f64).abs() < 1e-6,
                    "q={} chi={}: |tau|^2 = {}",
                    q,
                    chi,
                    mag_sq
                );
            }
        }
    }

    #[test]
    fn test_conductor_prime_modulus() {
        // Every non-principal character mod a prime is primitive
        let g = DirichletGroup::new(7).unwrap();
        for chi in g.characters() {
            let c = conductor(&chi);
            if chi.is_principal() {
                assert_eq!(c, 1);
            } else {
                assert_eq!(c, 7);
            }
        }
    }

    #[test]
    fn test_conductor_composite() {
        // q = 15 = 3 * 5: conductors 1, 3, 5 and 15 all occur
        let g = DirichletGroup::new(15).unwrap();
        let mut conductors: Vec<u64> = g.characters().map(|chi| conductor(&chi)).collect();
        conductors.sort_unstable();
        conductors.dedup();
        assert_eq!(conductors, vec![1, 3, 5, 15]);
    }

    #[test]
    fn test_conductor_matches_primitivity() {
        for q in [4u64, 8, 9, 12, 15, 16, 24, 45] {
            let g = DirichletGroup::new(q).unwrap();
            for chi in g.characters() {
                assert_eq!(
                    conductor(&chi) == q,
                    chi.is_primitive(),
                    "q={} chi={}",
                    q,
                    chi
                );
            }
        }
    }
}
