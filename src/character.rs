//! Character evaluation in the Conrey numbering.
//!
//! A [`DirichletCharacter`] is a borrowed view into a [`DirichletGroup`]: the
//! group owns every table, the character owns only its label. Evaluation
//! multiplies an even and an odd contribution, each a table lookup; the
//! character vanishes off the unit group.

use num_integer::Integer;
use std::fmt;

use crate::arith;
use crate::complex::{self, Complex};
use crate::group::DirichletGroup;

/// The character chi_q(n, .), identified by its Conrey label n.
#[derive(Debug, Clone, Copy)]
pub struct DirichletCharacter<'a> {
    group: &'a DirichletGroup,
    label: i64,
    residue: u64,
}

impl<'a> DirichletCharacter<'a> {
    fn new(group: &'a DirichletGroup, label: i64) -> Self {
        let residue = label.rem_euclid(group.modulus() as i64) as u64;
        DirichletCharacter {
            group,
            label,
            residue,
        }
    }

    /// The group this character belongs to.
    pub fn group(&self) -> &'a DirichletGroup {
        self.group
    }

    /// The modulus q.
    pub fn modulus(&self) -> u64 {
        self.group.modulus()
    }

    /// The raw label, as given (kept for display).
    pub fn label(&self) -> i64 {
        self.label
    }

    /// The effective residue, label mod q.
    pub fn residue(&self) -> u64 {
        self.residue
    }

    /// Whether this is the principal character (label congruent to 1 mod q).
    pub fn is_principal(&self) -> bool {
        self.residue == 1 % self.group.modulus()
    }

    /// Evaluate chi(m).
    ///
    /// Returns 0 when gcd(m, q) > 1, otherwise a point on the unit circle.
    pub fn value(&self, m: i64) -> Complex {
        let group = self.group;
        let q = group.modulus();
        let q_even = group.q_even();
        let q_odd = group.q_odd();
        let n = self.residue;
        let m = m.rem_euclid(q as i64) as u64;

        // When 2 | q, both the label and the argument must be odd.
        if q_even > 1 && (n % 2 == 0 || m % 2 == 0) {
            return complex::ZERO;
        }

        let even = match q_even {
            1 | 2 => complex::ONE,
            4 => {
                if n % 4 == 3 && m % 4 == 3 {
                    (-1.0, 0.0)
                } else {
                    complex::ONE
                }
            }
            _ => group.even_root(group.chi_even_exponent(n % q_even, m % q_even)),
        };

        let odd = if q_odd == 1 {
            complex::ONE
        } else {
            match group.chi_odd_exponent(n % q_odd, m % q_odd) {
                Some(t) => group.odd_root(t),
                None => return complex::ZERO,
            }
        };

        complex::cmul(even, odd)
    }

    /// The exponent a in [0, phi(q)) with chi(m) = e(a / phi(q)).
    ///
    /// Only meaningful when chi(m) != 0; at a zero of chi the returned value
    /// carries no information (check vanishing via [`Self::value`] first).
    pub fn exponent(&self, m: i64) -> u64 {
        let group = self.group;
        let q = group.modulus();
        let q_even = group.q_even();
        let q_odd = group.q_odd();
        let phi_q = group.size();
        let phi_q_odd = group.phi_q_odd();
        let n = self.residue;
        let m = m.rem_euclid(q as i64) as u64;

        // The character vanishes here; return something defined.
        if q_even > 1 && (n % 2 == 0 || m % 2 == 0) {
            return 0;
        }

        let odd_exp = if q_odd == 1 {
            0
        } else {
            group
                .chi_odd_exponent(n % q_odd, m % q_odd)
                .unwrap_or(0)
        };

        if q_even == 1 {
            return odd_exp % phi_q;
        }

        // Common denominator phi(q) = phi(q_even) * phi(q_odd): the odd
        // numerator scales by phi(q_even) = q_even/2, the even numerator by
        // phi(q)/(order of the even component).
        let even_term: u128 = match q_even {
            2 => 0,
            4 => {
                if n % 4 == 3 && m % 4 == 3 {
                    phi_q_odd as u128
                } else {
                    0
                }
            }
            // Even root entries are e(t / (q_even/4)), an order-(q_even/4)
            // component, so each step is 2 * phi(q_odd) in the numerator.
            _ => {
                2 * phi_q_odd as u128
                    * group.chi_even_exponent(n % q_even, m % q_even) as u128
            }
        };

        ((odd_exp as u128 * (q_even / 2) as u128 + even_term) % phi_q as u128) as u64
    }

    /// Whether chi(-1) = 1.
    pub fn is_even(&self) -> bool {
        self.exponent(-1) == 0
    }

    /// Whether chi(-1) = -1.
    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    /// Whether the character is primitive, i.e. not induced by a character
    /// of any proper divisor of q.
    ///
    /// Primitive iff primitive at every odd prime factor and at 2.
    pub fn is_primitive(&self) -> bool {
        let group = self.group;
        let q_odd = group.q_odd();

        // Non-unit labels do not define characters.
        if group.modulus() > 1 && self.residue.gcd(&group.modulus()) != 1 {
            return false;
        }

        if q_odd > 1 {
            let n_odd = self.residue % q_odd;
            for (j, f) in group.factors().iter().enumerate() {
                // Primitive at p_j iff the discrete log is not divisible by
                // p_j (otherwise chi lands in the proper subgroup induced
                // from modulus q / p_j).
                match group.dlog(n_odd, j) {
                    Some(a) => {
                        if a % f.prime == 0 {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
        }

        self.primitive_at_two()
    }

    /// Primitivity at the prime 2, following the index-2 subgroup structure
    /// of (Z/2^a)*.
    fn primitive_at_two(&self) -> bool {
        let group = self.group;
        let q_even = group.q_even();
        match q_even {
            1 => true,
            2 => false,
            4 => self.residue % 4 == 3,
            8 => {
                let (s, e) = group.two_adic_log(self.residue % q_even);
                (e % 2 == 1 && s > 0) || (e % 2 == 0 && s < 0)
            }
            _ => {
                let (_, e) = group.two_adic_log(self.residue % q_even);
                e % 2 == 1
            }
        }
    }

    /// The order of chi in the character group. Equals the multiplicative
    /// order of the label in (Z/q)*, since the Conrey numbering is an
    /// isomorphism onto the dual group.
    pub fn order(&self) -> u64 {
        arith::multiplicative_order(self.residue, self.group.modulus())
            .unwrap_or(0)
    }

    /// Whether chi takes only real values (order at most 2).
    pub fn is_real(&self) -> bool {
        self.order() <= 2
    }

    /// The pointwise product character chi_q(n1 * n2, .).
    ///
    /// Both characters must belong to the same group.
    pub fn multiply(&self, other: &DirichletCharacter<'a>) -> DirichletCharacter<'a> {
        debug_assert_eq!(self.group.modulus(), other.group.modulus());
        let q = self.group.modulus();
        let n = arith::mod_mul(self.residue, other.residue, q);
        DirichletCharacter::new(self.group, n as i64)
    }

    /// The conjugate character chi_q(n^-1, .), the inverse in the character
    /// group. Only defined for valid labels (gcd(n, q) = 1).
    pub fn inverse(&self) -> Option<DirichletCharacter<'a>> {
        let q = self.group.modulus();
        if q == 1 {
            return Some(*self);
        }
        let inv = arith::mod_inverse(self.residue, q)?;
        Some(DirichletCharacter::new(self.group, inv as i64))
    }
}

impl fmt::Display for DirichletCharacter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chi_{}({}, .)", self.group.modulus(), self.label)
    }
}

/// Lazy iterator over all valid Conrey labels mod q, ascending.
///
/// A label n in [1, q) is valid iff n is coprime to q_odd and odd whenever
/// 2 | q; the trivial modulus q = 1 yields the single label 1.
pub struct Characters<'a> {
    group: &'a DirichletGroup,
    next: u64,
    done: bool,
}

impl<'a> Iterator for Characters<'a> {
    type Item = DirichletCharacter<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let q = self.group.modulus();
        if q == 1 {
            self.done = true;
            return Some(DirichletCharacter::new(self.group, 1));
        }
        while self.next < q {
            let n = self.next;
            self.next += 1;
            if self.group.is_valid_label(n) {
                return Some(DirichletCharacter::new(self.group, n as i64));
            }
        }
        self.done = true;
        None
    }
}

impl DirichletGroup {
    /// Whether n in [1, q) labels a character: coprime to the odd part and
    /// odd whenever the modulus is even.
    fn is_valid_label(&self, n: u64) -> bool {
        (self.q_odd() == 1 || (n % self.q_odd()).gcd(&self.q_odd()) == 1)
            && (self.q_even() == 1 || n % 2 == 1)
    }

    /// The character with the given label (any integer; reduced mod q).
    pub fn character(&self, label: i64) -> DirichletCharacter<'_> {
        DirichletCharacter::new(self, label)
    }

    /// Iterate over all phi(q) characters mod q, by ascending label.
    pub fn characters(&self) -> Characters<'_> {
        Characters {
            group: self,
            next: 1,
            done: false,
        }
    }

    /// Iterate over the primitive characters mod q, by ascending label.
    pub fn primitive_characters(&self) -> impl Iterator<Item = DirichletCharacter<'_>> {
        self.characters().filter(|chi| chi.is_primitive())
    }
}
