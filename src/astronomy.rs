//! Low precision solar model.
//!
//! Ref: <http://aa.usno.navy.mil/faq/docs/SunApprox.php>, good to about a
//! minute of time between 1950 and 2050.

use crate::math::{darcsin, darctan2, dcos, dsin, fix_angle, fix_hour};

/// Julian date of the J2000.0 epoch.
pub const J2000: f64 = 2451545.0;

/// Declination of the sun and the equation of time at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Degrees north (+) or south (-) of the celestial equator.
    pub declination: f64,
    /// Apparent minus mean solar time, in hours.
    pub equation_of_time: f64,
}

/* compute declination angle of sun and equation of time */
pub fn sun_position(jd: f64) -> SunPosition {
    let d = jd - J2000;
    let g = fix_angle(357.529 + 0.98560028 * d);
    let q = fix_angle(280.459 + 0.98564736 * d);
    let l = fix_angle(q + 1.915 * dsin(g) + 0.020 * dsin(2. * g));

    let e = 23.439 - 0.00000036 * d;

    let ra = darctan2(dcos(e) * dsin(l), dcos(l)) / 15.0;
    let equation_of_time = q / 15.0 - fix_hour(ra);
    let declination = darcsin(dsin(e) * dsin(l));

    SunPosition {
        declination,
        equation_of_time,
    }
}

/// Julian day number at 0h UT of a Gregorian calendar date (Meeus).
pub fn julian_date(year: i32, month: u32, day: u32) -> f64 {
    let (year, month) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };

    let a = (year as f64 / 100.).floor();
    let b = 2. - a + (a / 4.).floor();

    (365.25 * (year as f64 + 4716.)).floor()
        + (30.6001 * (month as f64 + 1.)).floor()
        + day as f64
        + b
        - 1524.5
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn julian_date_epochs() {
        assert_abs_diff_eq!(julian_date(2000, 1, 1), 2451544.5);
        assert_abs_diff_eq!(julian_date(1957, 10, 4), 2436115.5);
        // Meeus, example 7.a
        assert_abs_diff_eq!(julian_date(1987, 1, 27), 2446822.5);
    }

    #[test]
    fn declination_at_solstices() {
        let june = sun_position(julian_date(2024, 6, 21) + 0.5);
        assert!(june.declination > 23.3 && june.declination < 23.5);

        let december = sun_position(julian_date(2024, 12, 21) + 0.5);
        assert!(december.declination < -23.3 && december.declination > -23.5);
    }

    #[test]
    fn declination_near_zero_at_equinox() {
        let march = sun_position(julian_date(2024, 3, 20) + 0.5);
        assert!(march.declination.abs() < 0.5);
    }

    #[test]
    fn equation_of_time_extremes() {
        // apparent noon runs about 16 minutes early at the start of November
        let november = sun_position(julian_date(2024, 11, 3) + 0.5);
        assert!(november.equation_of_time > 0.25 && november.equation_of_time < 0.29);

        // and about 14 minutes late in mid February
        let february = sun_position(julian_date(2024, 2, 11) + 0.5);
        assert!(february.equation_of_time < -0.22 && february.equation_of_time > -0.25);
    }
}
