//! Per-modulus structure for the Dirichlet group mod q.
//!
//! Construction splits q = q_even * q_odd (power of two times odd), factors
//! the odd part into prime powers, and precomputes:
//!
//! 1. a discrete-log table A: for each prime-power factor x_j = p_j^e_j with
//!    chosen generator g_j, A(m, j) is the exponent a with m = g_j^a mod x_j,
//!    filled for every m in [0, q_odd) by walking powers of g_j (the column
//!    only depends on m mod x_j, so each power fills a full stride);
//! 2. a power-of-two encoding for q_even > 4: every odd m mod q_even is
//!    s * 3^e with s in {1, -1}, since (Z/2^a)* = <-1> x <3> for a >= 3;
//! 3. root-of-unity tables for both parts, so evaluation never calls
//!    transcendental functions.
//!
//! The structure is immutable after construction and holds no interior
//! mutability, so it can be shared read-only across threads.

use num_integer::Integer;
use std::f64::consts::PI;

use crate::arith;
use crate::complex::{self, Complex};

/// Largest supported modulus.
///
/// Tables are O(q * k) entries, and all exponent arithmetic goes through
/// u128 intermediates, so this bound is about keeping sizes meaningful
/// rather than arithmetic exactness.
pub const MAX_MODULUS: u64 = 1 << 40;

/// Errors raised by group construction. Evaluation never fails.
#[derive(Debug, thiserror::Error)]
pub enum GroupError {
    #[error("modulus {0} is outside the supported range [1, 2^40]")]
    UnsupportedModulus(u64),
}

/// One odd prime-power factor x_j = p^e of q_odd, with its cyclic-group data.
#[derive(Debug, Clone)]
pub struct OddFactor {
    /// The prime p.
    pub prime: u64,
    /// The exponent e.
    pub exponent: u32,
    /// The prime power x_j = p^e.
    pub prime_power: u64,
    /// A generator of (Z/x_j)*.
    pub generator: u64,
    /// phi(x_j) = p^(e-1) * (p-1), the order of the cyclic component.
    pub phi: u64,
    /// phi(q_odd) / phi(x_j), the CRT weight of this component.
    pub phi_scale: u64,
}

/// The Dirichlet group mod q: all per-modulus tables, built once, immutable.
#[derive(Debug, Clone)]
pub struct DirichletGroup {
    q: u64,
    q_even: u64,
    q_odd: u64,
    phi_q: u64,
    phi_q_odd: u64,
    factors: Vec<OddFactor>,
    /// Flat row-major table: dlog[m * k + j] = A(m, j), `None` where m is
    /// not coprime to x_j (and forced `None` in column 0 whenever m is not
    /// a unit mod q_odd).
    dlog: Vec<Option<u64>>,
    /// odd_roots[t] = e(t / phi(q_odd)); empty when q_odd = 1.
    odd_roots: Vec<Complex>,
    /// Sign component of the two-adic encoding, indexed by residue mod
    /// q_even; only odd residues are meaningful. Empty when q_even <= 4.
    even_sign: Vec<i8>,
    /// Exponent component of the two-adic encoding; paired with `even_sign`.
    even_exp: Vec<u64>,
    /// even_roots[t] = e(4t / q_even); empty when q_even <= 4.
    even_roots: Vec<Complex>,
}

impl DirichletGroup {
    /// Build the full structure for modulus q.
    ///
    /// Fails with [`GroupError::UnsupportedModulus`] when q = 0, q exceeds
    /// [`MAX_MODULUS`], or the discrete-log table size would overflow.
    pub fn new(q: u64) -> Result<Self, GroupError> {
        if q == 0 || q > MAX_MODULUS {
            return Err(GroupError::UnsupportedModulus(q));
        }

        let mut q_odd = q;
        let mut q_even = 1u64;
        while q_odd % 2 == 0 {
            q_odd /= 2;
            q_even *= 2;
        }

        let prime_powers = arith::factorize(q_odd);
        let k = prime_powers.len();

        let phi_q_odd: u64 = prime_powers
            .iter()
            .map(|&(p, e)| p.pow(e) / p * (p - 1))
            .product();

        let factors: Vec<OddFactor> = prime_powers
            .iter()
            .map(|&(p, e)| {
                let x = p.pow(e);
                let phi = x / p * (p - 1);
                OddFactor {
                    prime: p,
                    exponent: e,
                    prime_power: x,
                    generator: arith::primitive_root(x),
                    phi,
                    phi_scale: phi_q_odd / phi,
                }
            })
            .collect();

        // Discrete-log table, one column per factor. Walking the powers of
        // g_j fills each column in O(q_odd) total: the value g_j^t lands at
        // every residue congruent to it mod x_j.
        let table_len = (q_odd as usize)
            .checked_mul(k)
            .ok_or(GroupError::UnsupportedModulus(q))?;
        let mut dlog: Vec<Option<u64>> = vec![None; table_len];
        for (j, f) in factors.iter().enumerate() {
            let mut v = 1u64;
            for t in 0..f.phi {
                let mut m = v;
                while m < q_odd {
                    dlog[m as usize * k + j] = Some(t);
                    m += f.prime_power;
                }
                v = arith::mod_mul(v, f.generator, f.prime_power);
            }
        }
        // Column 0 doubles as the unit marker for (Z/q_odd)*.
        if k > 0 {
            for m in 0..q_odd {
                if m.gcd(&q_odd) != 1 {
                    dlog[m as usize * k] = None;
                }
            }
        }

        let odd_roots: Vec<Complex> = if q_odd > 1 {
            (0..phi_q_odd)
                .map(|t| complex::cis(2.0 * PI * t as f64 / phi_q_odd as f64))
                .collect()
        } else {
            Vec::new()
        };

        // Two-adic part: for q_even in {1, 2} the even contribution is
        // trivially 1, for q_even = 4 it is a parity check, and only for
        // q_even > 4 does the <-1> x <3> encoding exist. The three-way split
        // mirrors the structure of (Z/2^a)*.
        let (even_sign, even_exp, even_roots) = if q_even > 4 {
            let quarter = q_even / 4;
            let mut sign = vec![0i8; q_even as usize];
            let mut exp = vec![0u64; q_even as usize];
            let mut v = 1u64;
            for e in 0..quarter {
                sign[v as usize] = 1;
                exp[v as usize] = e;
                sign[(q_even - v) as usize] = -1;
                exp[(q_even - v) as usize] = e;
                v = arith::mod_mul(v, 3, q_even);
            }
            let roots = (0..quarter)
                .map(|t| complex::cis(2.0 * PI * (4 * t) as f64 / q_even as f64))
                .collect();
            (sign, exp, roots)
        } else {
            (Vec::new(), Vec::new(), Vec::new())
        };

        let phi_even = if q_even == 1 { 1 } else { q_even / 2 };

        Ok(DirichletGroup {
            q,
            q_even,
            q_odd,
            phi_q: phi_even * phi_q_odd,
            phi_q_odd,
            factors,
            dlog,
            odd_roots,
            even_sign,
            even_exp,
            even_roots,
        })
    }

    /// The modulus q.
    pub fn modulus(&self) -> u64 {
        self.q
    }

    /// The number of characters mod q, i.e. phi(q).
    pub fn size(&self) -> u64 {
        self.phi_q
    }

    /// The power-of-two part of q.
    pub fn q_even(&self) -> u64 {
        self.q_even
    }

    /// The odd part of q.
    pub fn q_odd(&self) -> u64 {
        self.q_odd
    }

    /// phi(q_odd).
    pub fn phi_q_odd(&self) -> u64 {
        self.phi_q_odd
    }

    /// The odd prime-power factors of q, primes ascending.
    pub fn factors(&self) -> &[OddFactor] {
        &self.factors
    }

    /// Discrete log of m to base g_j mod x_j, or `None` when m is not
    /// coprime to x_j. Column 0 is additionally `None` for every m that is
    /// not a unit mod q_odd.
    pub(crate) fn dlog(&self, m: u64, j: usize) -> Option<u64> {
        debug_assert!(m < self.q_odd && j < self.factors.len());
        self.dlog[m as usize * self.factors.len() + j]
    }

    /// The two-adic encoding (sign, exponent) of an odd residue mod q_even.
    /// Only valid when q_even > 4.
    pub(crate) fn two_adic_log(&self, m: u64) -> (i8, u64) {
        debug_assert!(self.q_even > 4 && m < self.q_even && m % 2 == 1);
        (self.even_sign[m as usize], self.even_exp[m as usize])
    }

    /// Combined odd exponent of the pairing chi(a, b) on (Z/q_odd)*:
    /// sum over factors of A(a, j) * A(b, j) * PHI_j, mod phi(q_odd).
    ///
    /// Returns `None` when a or b is not a unit mod q_odd (the character
    /// vanishes there). Arguments must already be reduced mod q_odd; only
    /// call with q_odd > 1.
    pub(crate) fn chi_odd_exponent(&self, a: u64, b: u64) -> Option<u64> {
        debug_assert!(self.q_odd > 1 && a < self.q_odd && b < self.q_odd);
        let mut acc: u128 = 0;
        for j in 0..self.factors.len() {
            let da = self.dlog(a, j)?;
            let db = self.dlog(b, j)?;
            acc += da as u128 * db as u128 % self.phi_q_odd as u128
                * self.factors[j].phi_scale as u128;
        }
        Some((acc % self.phi_q_odd as u128) as u64)
    }

    /// Combined even exponent of the pairing chi(a, b) on (Z/q_even)*, as an
    /// index into the even root table, i.e. mod q_even/4.
    ///
    /// The q_even/8 correction applies only when both signs are negative:
    /// -1 has order 2 while 3 has order q_even/4, so the sign components
    /// interact multiplicatively only in that case.
    ///
    /// Arguments must be odd, reduced mod q_even; only call with q_even > 4.
    pub(crate) fn chi_even_exponent(&self, a: u64, b: u64) -> u64 {
        debug_assert!(self.q_even > 4);
        let quarter = self.q_even / 4;
        let (sa, ea) = self.two_adic_log(a);
        let (sb, eb) = self.two_adic_log(b);
        let mut e = (ea as u128 * eb as u128 % quarter as u128) as u64;
        if sa < 0 && sb < 0 {
            e = (e + self.q_even / 8) % quarter;
        }
        e
    }

    /// Root-of-unity lookup for the odd part: e(t / phi(q_odd)).
    pub(crate) fn odd_root(&self, t: u64) -> Complex {
        self.odd_roots[t as usize]
    }

    /// Root-of-unity lookup for the even part: e(4t / q_even).
    pub(crate) fn even_root(&self, t: u64) -> Complex {
        self.even_roots[t as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_moduli() {
        assert!(matches!(
            DirichletGroup::new(0),
            Err(GroupError::UnsupportedModulus(0))
        ));
        assert!(DirichletGroup::new(MAX_MODULUS + 1).is_err());
    }

    #[test]
    fn test_modulus_split() {
        let g = DirichletGroup::new(48).unwrap();
        assert_eq!(g.q_even(), 16);
        assert_eq!(g.q_odd(), 3);
        assert_eq!(g.size(), 16); // phi(48)

        let g = DirichletGroup::new(45).unwrap();
        assert_eq!(g.q_even(), 1);
        assert_eq!(g.q_odd(), 45);
        assert_eq!(g.size(), 24);
    }

    #[test]
    fn test_factor_metadata() {
        // 45 = 3^2 * 5: x_0 = 9, x_1 = 5
        let g = DirichletGroup::new(45).unwrap();
        let fs = g.factors();
        assert_eq!(fs.len(), 2);
        assert_eq!((fs[0].prime, fs[0].prime_power, fs[0].phi), (3, 9, 6));
        assert_eq!((fs[1].prime, fs[1].prime_power, fs[1].phi), (5, 5, 4));
        // PHI_j = phi(q_odd) / phi(x_j)
        assert_eq!(fs[0].phi_scale, 4);
        assert_eq!(fs[1].phi_scale, 6);
    }

    #[test]
    fn test_dlog_table_inverts_generator() {
        let g = DirichletGroup::new(45).unwrap();
        for (j, f) in g.factors().iter().enumerate() {
            for m in 0..g.q_odd() {
                if let Some(a) = g.dlog(m, j) {
                    assert!(a < f.phi);
                    assert_eq!(
                        arith::mod_pow(f.generator, a, f.prime_power),
                        m % f.prime_power,
                        "g^A(m,j) should equal m mod x_j for m = {}",
                        m
                    );
                }
            }
        }
    }

    #[test]
    fn test_dlog_column_periodicity() {
        // A(., j) depends only on m mod x_j
        let g = DirichletGroup::new(45).unwrap();
        for (j, f) in g.factors().iter().enumerate() {
            for m in 0..g.q_odd() {
                if m % f.prime != 0 {
                    // ignore the column-0 unit marking, compare raw columns
                    if m.gcd(&g.q_odd()) == 1 && (m % f.prime_power).gcd(&g.q_odd()) == 1 {
                        assert_eq!(g.dlog(m, j), g.dlog(m % f.prime_power, j));
                    }
                }
            }
        }
    }

    #[test]
    fn test_non_units_marked() {
        let g = DirichletGroup::new(45).unwrap();
        for m in 0..45 {
            let is_unit = m.gcd(&45u64) == 1;
            assert_eq!(g.dlog(m, 0).is_some(), is_unit, "m = {}", m);
        }
    }

    #[test]
    fn test_two_adic_encoding_mod_16() {
        // 3^0..3^3 mod 16 = 1, 3, 9, 11; negatives are 15, 13, 7, 5
        let g = DirichletGroup::new(16).unwrap();
        assert_eq!(g.two_adic_log(1), (1, 0));
        assert_eq!(g.two_adic_log(3), (1, 1));
        assert_eq!(g.two_adic_log(9), (1, 2));
        assert_eq!(g.two_adic_log(11), (1, 3));
        assert_eq!(g.two_adic_log(15), (-1, 0));
        assert_eq!(g.two_adic_log(13), (-1, 1));
        assert_eq!(g.two_adic_log(7), (-1, 2));
        assert_eq!(g.two_adic_log(5), (-1, 3));
    }

    #[test]
    fn test_small_even_parts_have_no_tables() {
        for q in [1u64, 2, 3, 4, 12] {
            let g = DirichletGroup::new(q).unwrap();
            assert!(g.even_roots.is_empty());
            assert!(g.even_sign.is_empty());
        }
        let g = DirichletGroup::new(8).unwrap();
        assert_eq!(g.even_roots.len(), 2);
    }

    #[test]
    fn test_trivial_modulus() {
        let g = DirichletGroup::new(1).unwrap();
        assert_eq!(g.size(), 1);
        assert_eq!(g.q_odd(), 1);
        assert_eq!(g.q_even(), 1);
        assert!(g.factors().is_empty());
    }
}
