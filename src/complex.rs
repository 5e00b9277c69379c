//! Complex arithmetic over (f64, f64) tuples.
//!
//! Character values are points on the unit circle (or zero), so only a small
//! set of operations is needed: the unit-circle constructor `cis` plus
//! multiplication, addition and magnitude checks.

/// A complex number represented as (real, imaginary).
pub type Complex = (f64, f64);

/// The complex number zero.
pub const ZERO: Complex = (0.0, 0.0);

/// The complex number one.
pub const ONE: Complex = (1.0, 0.0);

/// The point e^{i*theta} on the unit circle.
#[inline]
pub fn cis(theta: f64) -> Complex {
    (theta.cos(), theta.sin())
}

/// Multiply two complex numbers.
#[inline]
pub fn cmul(a: Complex, b: Complex) -> Complex {
    (a.0 * b.0 - a.1 * b.1, a.0 * b.1 + a.1 * b.0)
}

/// Add two complex numbers.
#[inline]
pub fn cadd(a: Complex, b: Complex) -> Complex {
    (a.0 + b.0, a.1 + b.1)
}

/// Subtract two complex numbers.
#[inline]
pub fn csub(a: Complex, b: Complex) -> Complex {
    (a.0 - b.0, a.1 - b.1)
}

/// Complex conjugate.
#[inline]
pub fn conj(a: Complex) -> Complex {
    (a.0, -a.1)
}

/// Squared magnitude |z|^2.
#[inline]
pub fn cnorm_sq(a: Complex) -> f64 {
    a.0 * a.0 + a.1 * a.1
}

/// Magnitude |z|.
#[inline]
pub fn cabs(a: Complex) -> f64 {
    cnorm_sq(a).sqrt()
}
