//! Exact fractions over `i128`.
//!
//! `Ratio` keeps every value reduced with a positive denominator, so equal
//! fractions share one representation. Arithmetic on coordinates goes
//! through the `Checked*` traits and overflow is reported as a domain error.

use num_integer::Integer;
use num_rational::Ratio;
use num_traits::{CheckedSub, Zero};

use crate::error::GeometryError;

pub type Rational = Ratio<i128>;

/// Largest denominator used when approximating floating point input.
pub const MAX_DENOMINATOR: i128 = 1_000_000;

/// Conversions `Ratio` does not provide for bounded exact input.
pub trait RationalExt: Sized {
    /// `None` when the denominator is zero.
    fn checked_new(num: i128, den: i128) -> Option<Self>;

    /// Best approximation of `value` whose denominator does not exceed `max_den`.
    fn approximate(value: f64, max_den: i128) -> Result<Self, GeometryError>;

    /// Closest fraction with denominator at most `max_den`.
    fn limit_denominator(&self, max_den: i128) -> Option<Self>;

    fn checked_neg(&self) -> Option<Self>;

    fn as_f64(&self) -> f64;
}

impl RationalExt for Rational {
    fn checked_new(num: i128, den: i128) -> Option<Self> {
        (den != 0).then(|| Ratio::new(num, den))
    }

    /// The float is first converted to the exact binary fraction it stores
    /// and then reduced with [`RationalExt::limit_denominator`], so `1.0 / 3.0`
    /// comes back as `1/3` and `0.1` as `1/10`.
    fn approximate(value: f64, max_den: i128) -> Result<Self, GeometryError> {
        if !value.is_finite() {
            return Err(GeometryError::NonFinite(value));
        }
        if value == 0.0 {
            return Ok(Rational::zero());
        }

        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let exponent = ((bits >> 52) & 0x7ff) as i32;
        let fraction = bits & ((1u64 << 52) - 1);
        let (mut mantissa, mut exp) = if exponent == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), exponent - 1075)
        };
        let shift = mantissa.trailing_zeros();
        mantissa >>= shift;
        exp += shift as i32;

        let mantissa = if negative {
            -(mantissa as i128)
        } else {
            mantissa as i128
        };

        if exp >= 0 {
            if exp > 73 {
                return Err(GeometryError::Overflow);
            }
            return Ok(Rational::from_integer(mantissa << exp));
        }
        if exp < -120 {
            // far below 1 / (2 * max_den): rounds to zero
            return Ok(Rational::zero());
        }

        Ratio::new(mantissa, 1i128 << (-exp))
            .limit_denominator(max_den)
            .ok_or(GeometryError::Overflow)
    }

    fn limit_denominator(&self, max_den: i128) -> Option<Self> {
        let den = *self.denom();
        if den <= max_den {
            return Some(*self);
        }

        let (mut p0, mut q0, mut p1, mut q1) = (0i128, 1i128, 1i128, 0i128);
        let (mut n, mut d) = (*self.numer(), den);
        loop {
            let a = Integer::div_floor(&n, &d);
            let q2 = q0.checked_add(a.checked_mul(q1)?)?;
            if q2 > max_den {
                break;
            }
            let p2 = p0.checked_add(a.checked_mul(p1)?)?;
            (p0, q0, p1, q1) = (p1, q1, p2, q2);
            (n, d) = (d, n.checked_sub(a.checked_mul(d)?)?);
        }

        let k = (max_den - q0) / q1;
        let bound_den = q0.checked_add(k.checked_mul(q1)?)?;
        if 2i128.checked_mul(d)?.checked_mul(bound_den)? <= den {
            Some(Ratio::new(p1, q1))
        } else {
            Some(Ratio::new(p0.checked_add(k.checked_mul(p1)?)?, bound_den))
        }
    }

    fn checked_neg(&self) -> Option<Self> {
        Rational::zero().checked_sub(self)
    }

    fn as_f64(&self) -> f64 {
        *self.numer() as f64 / *self.denom() as f64
    }
}

/// Least common multiple, `None` on overflow.
pub fn checked_lcm(a: i128, b: i128) -> Option<i128> {
    let g = a.gcd(&b);
    if g == 0 {
        return Some(0);
    }
    (a / g).checked_mul(b).map(i128::abs)
}
