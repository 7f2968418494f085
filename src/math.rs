//! Degree based trigonometry and range reduction.
//!
//! Every function takes and returns degrees. Out of domain inputs (for
//! example `darccos(1.2)`) yield `NaN`, which is left to flow through the
//! caller's arithmetic.

use std::f64::consts::PI;

/* degree sin */
pub fn dsin(d: f64) -> f64 {
    deg2rad(d).sin()
}

/* degree cos */
pub fn dcos(d: f64) -> f64 {
    deg2rad(d).cos()
}

/* degree tan */
pub fn dtan(d: f64) -> f64 {
    deg2rad(d).tan()
}

/* degree arcsin */
pub fn darcsin(x: f64) -> f64 {
    rad2deg(x.asin())
}

/* degree arccos */
pub fn darccos(x: f64) -> f64 {
    rad2deg(x.acos())
}

/* degree arctan */
pub fn darctan(x: f64) -> f64 {
    rad2deg(x.atan())
}

/* degree arctan2 */
pub fn darctan2(y: f64, x: f64) -> f64 {
    rad2deg(y.atan2(x))
}

/* degree arccot */
pub fn darccot(x: f64) -> f64 {
    rad2deg((1.0 / x).atan())
}

fn deg2rad(d: f64) -> f64 {
    d * PI / 180.0
}

fn rad2deg(r: f64) -> f64 {
    r * 180.0 / PI
}

/// Euclidean remainder of `a` by `b`, always in `[0, b)` for finite input.
pub fn fix(a: f64, b: f64) -> f64 {
    let a = a - b * (a / b).floor();
    if a < 0.0 {
        a + b
    } else if a >= b {
        // floor rounding can leave `b` itself for tiny negative inputs
        a - b
    } else {
        a
    }
}

/* range reduce angle in degrees */
pub fn fix_angle(a: f64) -> f64 {
    fix(a, 360.0)
}

/* range reduce hours to 0..24 */
pub fn fix_hour(a: f64) -> f64 {
    fix(a, 24.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn degree_trig() {
        assert_abs_diff_eq!(dsin(30.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(dcos(60.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(dtan(45.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(darcsin(0.5), 30.0, epsilon = 1e-12);
        assert_abs_diff_eq!(darccos(0.5), 60.0, epsilon = 1e-12);
        assert_abs_diff_eq!(darctan(1.0), 45.0, epsilon = 1e-12);
        assert_abs_diff_eq!(darccot(1.0), 45.0, epsilon = 1e-12);
        assert_abs_diff_eq!(darctan2(-1.0, -1.0), -135.0, epsilon = 1e-12);
    }

    #[test]
    fn inverse_trig_out_of_domain_is_nan() {
        assert!(darccos(1.5).is_nan());
        assert!(darcsin(-2.0).is_nan());
    }

    #[test]
    fn fix_wraps_negative_values() {
        assert_abs_diff_eq!(fix_hour(-1.0), 23.0);
        assert_abs_diff_eq!(fix_hour(49.5), 1.5);
        assert_abs_diff_eq!(fix_angle(-30.0), 330.0);
        assert_abs_diff_eq!(fix_angle(720.0), 0.0);
        assert_eq!(fix_hour(24.0), 0.0);
    }

    #[test]
    fn fix_tiny_negative_stays_below_modulus() {
        let r = fix_hour(-1e-18);
        assert!((0.0..24.0).contains(&r));
    }

    #[test]
    fn fix_propagates_nan() {
        assert!(fix_hour(f64::NAN).is_nan());
    }
}
