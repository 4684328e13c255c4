//! Coefficient normalization for `Ax + By + C = 0`.
//!
//! [`integerize`] only clears denominators. [`canonicalize`] then divides by
//! the common factor and fixes the sign so that every line has exactly one
//! stored representation.

use num_integer::Integer;

use crate::error::GeometryError;
use crate::geometry::rational::{MAX_DENOMINATOR, Rational, RationalExt, checked_lcm};

/// Approximate three numbers as fractions and scale them to integers.
pub fn integerize(a: f64, b: f64, c: f64) -> Result<[i128; 3], GeometryError> {
    let coefficients = [
        Rational::approximate(a, MAX_DENOMINATOR)?,
        Rational::approximate(b, MAX_DENOMINATOR)?,
        Rational::approximate(c, MAX_DENOMINATOR)?,
    ];
    clear_denominators(coefficients)
}

/// Multiply every fraction by the LCM of the denominators.
pub fn clear_denominators(coefficients: [Rational; 3]) -> Result<[i128; 3], GeometryError> {
    let common = coefficients
        .iter()
        .try_fold(1i128, |acc, r| checked_lcm(acc, *r.denom()))
        .ok_or(GeometryError::Overflow)?;

    let mut integers = [0i128; 3];
    for (slot, r) in integers.iter_mut().zip(coefficients) {
        *slot = r
            .numer()
            .checked_mul(common / *r.denom())
            .ok_or(GeometryError::Overflow)?;
    }
    Ok(integers)
}

/// Reduce by the GCD and make the leading nonzero coefficient positive.
pub fn canonicalize(coefficients: [i128; 3]) -> Result<[i128; 3], GeometryError> {
    let [a, b, c] = coefficients;
    if a == 0 && b == 0 {
        return Err(GeometryError::NotALine);
    }

    let g = a.gcd(&b).gcd(&c);
    let leading = if a != 0 { a } else { b };
    let g = if leading < 0 { -g } else { g };
    Ok([a / g, b / g, c / g])
}

/// Full pipeline for exact input.
pub fn normalize(coefficients: [Rational; 3]) -> Result<[i128; 3], GeometryError> {
    canonicalize(clear_denominators(coefficients)?)
}
